use thiserror::Error;

use crate::session::SessionError;
use crate::userdb::UserError;

/// Errors from the login flow
///
/// Bad credentials are not an error; see
/// [`LoginOutcome::InvalidCredentials`](super::LoginOutcome::InvalidCredentials).
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// No user is bound to the session
    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Session error: {0}")]
    SessionError(SessionError),

    #[error("User error: {0}")]
    UserError(UserError),
}

impl CoordinationError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::Unauthorized => tracing::debug!("Unauthorized access"),
            Self::SessionError(err) => tracing::error!("Session error: {}", err),
            Self::UserError(err) => tracing::error!("User error: {}", err),
        }
        self
    }
}

// From conversions log as they wrap

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        let error = Self::SessionError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        let error = Self::UserError(err);
        tracing::error!("{}", error);
        error
    }
}
