use crate::session::Session;
use crate::userdb::{User, UserLookup};

use super::errors::CoordinationError;

/// Flash slot the login form reads its error from
pub const FLASH_ERROR_KEY: &str = "error";

/// Shown for both unknown email and wrong password
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Result of a credential check
#[derive(Debug)]
pub enum LoginOutcome {
    /// The session is now bound to this user
    Authenticated(User),
    /// The session holds the error flash; the user id is untouched
    InvalidCredentials,
}

/// Error to show on the login form, consumed on read
pub fn login_form(session: &mut Session) -> Option<String> {
    session.take_flash(FLASH_ERROR_KEY)
}

/// Check `email` and `password` and bind the session to the user on success
///
/// The session id is renewed on success so a pre-login cookie cannot be
/// reused after authentication.
#[tracing::instrument(skip(session, users, password))]
pub async fn login_create<U>(
    session: &mut Session,
    users: &U,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, CoordinationError>
where
    U: UserLookup + ?Sized,
{
    let user = users.find_by_email(email).await?;
    let verified = match &user {
        Some(user) => user.check_password(password).await,
        None => false,
    };

    match user {
        Some(user) if verified => {
            tracing::info!("User {} logged in", user.id);
            session.set_user_id(user.id);
            session.take_flash(FLASH_ERROR_KEY);
            session.renew();
            Ok(LoginOutcome::Authenticated(user))
        }
        _ => {
            tracing::info!("Login failed");
            session.set_flash(FLASH_ERROR_KEY, INVALID_CREDENTIALS_MESSAGE);
            Ok(LoginOutcome::InvalidCredentials)
        }
    }
}

/// Log out: unbind the user from the session
pub fn login_destroy(session: &mut Session) {
    if let Some(user_id) = session.user_id() {
        tracing::info!("User {} logged out", user_id);
    }
    session.clear_user_id();
}
