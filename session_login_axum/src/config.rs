use std::sync::LazyLock;

/// Login page, and where the authorization gate sends anonymous users
/// Default: "/login"
pub static LOGIN_PATH: LazyLock<String> =
    LazyLock::new(|| path_or_default(std::env::var("LOGIN_PATH").ok(), "/login"));

/// Where to go after a successful login or a logout
/// Default: "/"
pub static LOGIN_REDIRECT_PATH: LazyLock<String> =
    LazyLock::new(|| path_or_default(std::env::var("LOGIN_REDIRECT_PATH").ok(), "/"));

fn path_or_default(env_value: Option<String>, default: &str) -> String {
    env_value.unwrap_or_else(|| default.to_string())
}
