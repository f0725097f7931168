use axum::{Router, body::Body, response::Response};
use http::{Request, header};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use session_login::{InMemoryCacheStore, SessionStore, SqliteDataStore, User, UserStore};
use session_login_axum::{LoginState, session_login_router_no_trace};

pub const COOKIE_NAME: &str = "test-session";
pub const EMAIL: &str = "a@x.com";
pub const PASSWORD: &str = "correct horse";

pub struct TestApp {
    pub router: Router,
    pub users: UserStore,
    pub user: User,
}

/// Router over an in-memory cache and a private in-memory SQLite database
/// holding one user
pub async fn test_app() -> TestApp {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    let users = UserStore::new(Arc::new(SqliteDataStore::new(pool)));
    users.init().await.expect("init users");
    let user = users.create_user(EMAIL, PASSWORD).await.expect("seed user");

    let cache = Arc::new(Mutex::new(
        Box::new(InMemoryCacheStore::new()) as Box<dyn session_login::CacheStore>
    ));
    let sessions = SessionStore::with_cookie(cache, COOKIE_NAME, 600);
    let state = LoginState::new(sessions, Arc::new(users.clone()));

    TestApp {
        router: session_login_router_no_trace(state),
        users,
        user,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("infallible router")
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response {
        self.send(request("GET", path, cookie, None)).await
    }

    pub async fn login(&self, email: &str, password: &str, cookie: Option<&str>) -> Response {
        let body = format!("email={}&password={}", encode(email), encode(password));
        self.send(request("POST", "/login", cookie, Some(body))).await
    }
}

pub fn request(method: &str, path: &str, cookie: Option<&str>, form: Option<String>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(value) = cookie {
        builder = builder.header(header::COOKIE, format!("{COOKIE_NAME}={value}"));
    }
    match form {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

// Enough form encoding for the addresses and passwords used here
fn encode(value: &str) -> String {
    value.replace('%', "%25").replace('@', "%40").replace(' ', "+")
}

/// Session id from the response's Set-Cookie, `Some("")` when cleared
pub fn session_cookie(response: &Response) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = set_cookie.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    (name == COOKIE_NAME).then(|| value.to_string())
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
