use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::config::LOGIN_PATH;
use super::middleware::{fetch_user, is_authenticated_or_redirect};
use super::pages;
use super::state::LoginState;

/// Router with the login pages, the session middleware and HTTP tracing
///
/// | Method | Path        | Handler             |
/// |--------|-------------|---------------------|
/// | GET    | `/`         | home page           |
/// | GET    | `/about/me` | static page         |
/// | GET    | `/account`  | requires login      |
/// | GET    | `/login`    | login form          |
/// | POST   | `/login`    | check credentials   |
/// | DELETE | `/login`    | log out             |
/// | POST   | `/logout`   | log out (HTML form) |
///
/// The login routes follow `LOGIN_PATH`.
pub fn session_login_router(state: LoginState) -> Router {
    session_login_router_no_trace(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`session_login_router`] without the HTTP tracing layer
pub fn session_login_router_no_trace(state: LoginState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/about/me", get(pages::about_me))
        .route(
            "/account",
            get(pages::account).route_layer(from_fn(is_authenticated_or_redirect)),
        )
        .route(
            LOGIN_PATH.as_str(),
            get(pages::new).post(pages::create).delete(pages::destroy),
        )
        .route("/logout", post(pages::destroy))
        .layer(from_fn_with_state(state.clone(), fetch_user))
        .with_state(state)
}
