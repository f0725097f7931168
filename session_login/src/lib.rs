//! session_login - Cookie-session login core
//!
//! This crate resolves the current user from a session cookie, authenticates
//! email/password credentials, and keeps the per-client session record in a
//! pluggable cache store. Framework integration lives in `session-login-axum`.

mod coordination;
mod session;
mod storage;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

pub use coordination::{
    CoordinationError, FLASH_ERROR_KEY, INVALID_CREDENTIALS_MESSAGE, LoginOutcome,
    authorize_user, login_create, login_destroy, login_form, resolve_current_user,
};

pub use session::{
    SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, Session, SessionError, SessionStore,
    get_session_id_from_headers,
};

pub use storage::{
    CacheData, CacheStore, DataStore, InMemoryCacheStore, PostgresDataStore, RedisCacheStore,
    SharedCacheStore, SqliteDataStore, StorageError,
};

pub use userdb::{User, UserError, UserLookup, UserSearchField, UserStore, hash_password};

/// Stores built from the environment
///
/// See [`init`].
#[derive(Clone)]
pub struct Stores {
    pub sessions: SessionStore,
    pub users: UserStore,
}

/// Build the session and user stores from `GENERIC_CACHE_STORE_*` and
/// `GENERIC_DATA_STORE_*`, and create the user table if needed.
pub async fn init() -> Result<Stores, Box<dyn std::error::Error + Send + Sync>> {
    let cache = storage::cache_store_from_env().await?;
    let data = storage::data_store_from_env()?;

    let users = UserStore::new(data);
    users.init().await?;

    Ok(Stores {
        sessions: SessionStore::new(cache),
        users,
    })
}
