//! session_login_axum - Axum integration for `session-login`
//!
//! Provides the request middleware that loads the session and resolves the
//! current user, the extractors handlers use to reach them, and a ready-made
//! router with the login pages.

mod config;
mod error;
mod middleware;
mod pages;
mod router;
mod session;
mod state;

pub use config::{LOGIN_PATH, LOGIN_REDIRECT_PATH};
pub use error::IntoResponseError;
pub use middleware::{fetch_user, is_authenticated_or_redirect};
pub use router::{session_login_router, session_login_router_no_trace};
pub use session::{AuthRedirect, AuthUser, CurrentUser, RequestSession};
pub use state::LoginState;

// Re-export the core crate's setup so applications need only this crate
pub use session_login::{Stores, UserStore, init};
