//! Shared helpers for unit tests across the crate
//!
//! Every helper builds fresh, isolated stores so tests can run in parallel.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::session::SessionStore;
use crate::storage::{CacheStore, InMemoryCacheStore, SharedCacheStore, SqliteDataStore};
use crate::userdb::UserStore;

/// In-memory cache store wrapped the way the crate shares it
pub(crate) fn memory_cache_store() -> SharedCacheStore {
    Arc::new(Mutex::new(
        Box::new(InMemoryCacheStore::new()) as Box<dyn CacheStore>
    ))
}

pub(crate) fn memory_session_store() -> SessionStore {
    SessionStore::with_cookie(memory_cache_store(), "test-session", 600)
}

/// User store backed by a private in-memory SQLite database
///
/// A single connection keeps every query on the same in-memory database.
pub(crate) async fn memory_user_store() -> UserStore {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    let store = UserStore::new(Arc::new(SqliteDataStore::new(pool)));
    store.init().await.expect("Failed to initialize UserStore");
    store
}
