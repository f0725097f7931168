mod cache_store;
mod data_store;
mod errors;
mod schema_validation;
mod types;

pub use cache_store::{
    CacheStore, InMemoryCacheStore, RedisCacheStore, SharedCacheStore, cache_store_from_env,
};
pub use data_store::{
    DB_TABLE_PREFIX, DataStore, PostgresDataStore, SqliteDataStore, data_store_from_env,
};
pub use errors::StorageError;
pub use types::CacheData;

pub(crate) use schema_validation::{validate_postgres_table_schema, validate_sqlite_table_schema};
