use std::sync::LazyLock;

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(session_cookie_name_from_env);

/// Session lifetime in seconds, refreshed on every write
pub static SESSION_COOKIE_MAX_AGE: LazyLock<u64> = LazyLock::new(session_cookie_max_age_from_env);

fn session_cookie_name_from_env() -> String {
    std::env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("__Host-SessionId".to_string())
}

fn session_cookie_max_age_from_env() -> u64 {
    std::env::var("SESSION_COOKIE_MAX_AGE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(600) // Default to 10 minutes if not set or invalid
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Set an environment variable for the duration of `test`, restoring it afterward.
    fn with_env_var<F, R>(key: &str, value: Option<&str>, test: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();

        match value {
            Some(val) => unsafe { env::set_var(key, val) },
            None => unsafe { env::remove_var(key) },
        }

        let result = test();

        match original {
            Some(val) => unsafe { env::set_var(key, val) },
            None => unsafe { env::remove_var(key) },
        }

        result
    }

    #[test]
    #[serial]
    fn test_parse_session_cookie_name() {
        with_env_var("SESSION_COOKIE_NAME", None, || {
            assert_eq!(session_cookie_name_from_env(), "__Host-SessionId");
        });

        with_env_var("SESSION_COOKIE_NAME", Some("CustomSessionId"), || {
            assert_eq!(session_cookie_name_from_env(), "CustomSessionId");
        });
    }

    #[test]
    #[serial]
    fn test_parse_session_cookie_max_age() {
        with_env_var("SESSION_COOKIE_MAX_AGE", None, || {
            assert_eq!(session_cookie_max_age_from_env(), 600);
        });

        with_env_var("SESSION_COOKIE_MAX_AGE", Some("1800"), || {
            assert_eq!(session_cookie_max_age_from_env(), 1800);
        });

        with_env_var("SESSION_COOKIE_MAX_AGE", Some("invalid"), || {
            assert_eq!(session_cookie_max_age_from_env(), 600);
        });
    }
}
