use crate::session::Session;
use crate::userdb::{User, UserLookup};

use super::errors::CoordinationError;

/// Resolve the user bound to `session`
///
/// Returns `Ok(None)` without touching the store when the session carries no
/// user id. A user id that no longer resolves is cleared from the session.
#[tracing::instrument(skip(session, users))]
pub async fn resolve_current_user<U>(
    session: &mut Session,
    users: &U,
) -> Result<Option<User>, CoordinationError>
where
    U: UserLookup + ?Sized,
{
    let Some(user_id) = session.user_id() else {
        return Ok(None);
    };

    match users.find_by_id(user_id).await? {
        Some(user) => Ok(Some(user)),
        None => {
            tracing::info!("Session refers to missing user {}, clearing", user_id);
            session.clear_user_id();
            Ok(None)
        }
    }
}

/// Gate for handlers that need an authenticated user
pub fn authorize_user(current_user: Option<&User>) -> Result<&User, CoordinationError> {
    current_user.ok_or(CoordinationError::Unauthorized)
}
