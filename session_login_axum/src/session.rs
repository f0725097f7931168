use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Redirect, Response},
};
use http::{StatusCode, request::Parts};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use session_login::{Session, User, authorize_user};

use super::config::LOGIN_PATH;

/// The session of the current request, shared between middleware and handler
///
/// Inserted by [`fetch_user`](crate::fetch_user); changes made through
/// [`lock`](Self::lock) are saved when the handler returns.
#[derive(Clone)]
pub struct RequestSession(Arc<Mutex<Session>>);

impl RequestSession {
    pub(crate) fn new(session: Session) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.0.lock().await
    }
}

impl<S> FromRequestParts<S> for RequestSession
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or_else(|| {
            tracing::error!("RequestSession missing; is fetch_user installed?");
            (StatusCode::INTERNAL_SERVER_ERROR, "Session unavailable")
        })
    }
}

/// The user resolved from the session, if any
#[derive(Clone, Debug, Default)]
pub struct CurrentUser(pub Option<User>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned().unwrap_or_default())
    }
}

/// Rejection that sends anonymous clients to the login page
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        tracing::debug!("Redirecting to {}", LOGIN_PATH.as_str());
        Redirect::to(LOGIN_PATH.as_str()).into_response()
    }
}

/// Authenticated user, available as an Axum extractor
///
/// Extraction fails with [`AuthRedirect`] when no user is bound to the
/// session. Use `Option<AuthUser>` for pages open to everyone.
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use session_login_axum::AuthUser;
///
/// async fn protected_handler(AuthUser(user): AuthUser) -> String {
///     format!("Hello, {}!", user.email)
/// }
///
/// let app: Router = Router::new()
///     .route("/protected", get(protected_handler));
/// ```
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let current = parts.extensions.get::<CurrentUser>();
        authorize_user(current.and_then(|c| c.0.as_ref()))
            .map(|user| AuthUser(user.clone()))
            .map_err(|_| AuthRedirect)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <AuthUser as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(user) => Ok(Some(user)),
            Err(_) => Ok(None),
        }
    }
}
