use std::sync::{Arc, LazyLock};
use std::env;
use tokio::sync::Mutex;

use crate::storage::errors::StorageError;

use super::types::{CacheStore, InMemoryCacheStore, RedisCacheStore, SharedCacheStore};

pub(crate) static GENERIC_CACHE_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_CACHE_STORE_TYPE").unwrap_or_else(|_| "memory".to_string())
});

pub(crate) static GENERIC_CACHE_STORE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_CACHE_STORE_URL").unwrap_or_else(|_| "memory".to_string())
});

/// Build the cache store selected by `GENERIC_CACHE_STORE_TYPE`
pub async fn cache_store_from_env() -> Result<SharedCacheStore, StorageError> {
    build_cache_store(
        GENERIC_CACHE_STORE_TYPE.as_str(),
        GENERIC_CACHE_STORE_URL.as_str(),
    )
    .await
}

pub(crate) async fn build_cache_store(
    store_type: &str,
    store_url: &str,
) -> Result<SharedCacheStore, StorageError> {
    tracing::info!(
        "Initializing cache store with type: {}, url: {}",
        store_type,
        store_url
    );

    let store: Box<dyn CacheStore> = match store_type {
        "memory" => Box::new(InMemoryCacheStore::new()),
        "redis" => {
            let client = redis::Client::open(store_url).map_err(|e| {
                tracing::error!("Failed to create Redis client: {}", e);
                StorageError::from(e)
            })?;
            let store = RedisCacheStore::new(client);
            store.init().await.map_err(|e| {
                tracing::error!("Failed to connect to Redis: {}", e);
                e
            })?;
            Box::new(store)
        }
        t => {
            return Err(StorageError::Config(format!(
                "Unsupported cache store type: {t}. Supported types are 'memory' and 'redis'"
            )));
        }
    };

    tracing::info!("Connected to cache store: type={}", store_type);

    Ok(Arc::new(Mutex::new(store)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::types::CacheData;

    #[tokio::test]
    async fn test_build_memory_cache_store() {
        let store = build_cache_store("memory", "memory")
            .await
            .expect("memory store");

        let mut guard = store.lock().await;
        guard
            .put_with_ttl(
                "session",
                "id",
                CacheData {
                    value: "v".to_string(),
                },
                60,
            )
            .await
            .expect("put");
        assert!(guard.get("session", "id").await.expect("get").is_some());
    }

    #[tokio::test]
    async fn test_build_unsupported_cache_store() {
        let result = build_cache_store("memcached", "memcached://localhost").await;
        match result {
            Err(StorageError::Config(msg)) => assert!(msg.contains("memcached")),
            Err(other) => panic!("Expected Config error, got {other:?}"),
            Ok(_) => panic!("Expected Config error, got a store"),
        }
    }
}
