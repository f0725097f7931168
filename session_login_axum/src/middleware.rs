use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::header::SET_COOKIE;

use session_login::{CoordinationError, authorize_user, resolve_current_user};

use super::error::IntoResponseError;
use super::session::{AuthRedirect, CurrentUser, RequestSession};
use super::state::LoginState;

/// Load the session and resolve the current user before the handler runs,
/// then save the session and attach its cookie to the response.
///
/// Install with `axum::middleware::from_fn_with_state` around every route that
/// reads the session. Handlers reach the results through [`RequestSession`],
/// [`CurrentUser`] and [`AuthUser`](crate::AuthUser).
pub async fn fetch_user(
    State(state): State<LoginState>,
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let mut session = state
        .sessions
        .load_from_headers(req.headers())
        .await
        .map_err(CoordinationError::from)
        .into_response_error()?;

    let current_user = resolve_current_user(&mut session, state.users.as_ref())
        .await
        .into_response_error()?;

    let request_session = RequestSession::new(session);
    req.extensions_mut().insert(request_session.clone());
    req.extensions_mut().insert(CurrentUser(current_user));

    let mut response = next.run(req).await;

    let session = request_session.lock().await.clone();
    let cookies = state
        .sessions
        .save(&session)
        .await
        .map_err(CoordinationError::from)
        .into_response_error()?;

    if let Some(cookies) = cookies {
        for value in cookies.get_all(SET_COOKIE) {
            response.headers_mut().append(SET_COOKIE, value.clone());
        }
    }

    Ok(response)
}

/// Gate for routes that require a logged-in user
///
/// Must run inside [`fetch_user`], e.g. as a `route_layer`.
pub async fn is_authenticated_or_redirect(req: Request, next: Next) -> Response {
    let current = req.extensions().get::<CurrentUser>();
    if authorize_user(current.and_then(|c| c.0.as_ref())).is_err() {
        return AuthRedirect.into_response();
    }
    next.run(req).await
}
