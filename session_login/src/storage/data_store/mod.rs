mod config;
mod types;

pub use config::{DB_TABLE_PREFIX, data_store_from_env};
pub use types::{DataStore, PostgresDataStore, SqliteDataStore};
