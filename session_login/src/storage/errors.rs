use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Json conversion(Serde) error: {0}")]
    Serde(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<redis::RedisError> for StorageError {
    fn from(err: redis::RedisError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let error = StorageError::Storage("Connection failed".to_string());
        assert_eq!(error.to_string(), "Storage error: Connection failed");

        let error = StorageError::Serde("Invalid JSON".to_string());
        assert_eq!(error.to_string(), "Json conversion(Serde) error: Invalid JSON");

        let error = StorageError::Config("Unsupported store type: foo".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: Unsupported store type: foo"
        );
    }

    #[test]
    fn test_from_redis_error() {
        let redis_error =
            redis::RedisError::from((redis::ErrorKind::IoError, "Connection refused"));

        match StorageError::from(redis_error) {
            StorageError::Storage(msg) => assert!(msg.contains("Connection refused")),
            other => panic!("Expected Storage variant, got {other:?}"),
        }
    }

    #[test]
    fn test_from_serde_error() {
        let serde_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();

        match StorageError::from(serde_error) {
            StorageError::Serde(msg) => assert!(msg.contains("expected value")),
            other => panic!("Expected Serde variant, got {other:?}"),
        }
    }

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<StorageError>();
    }
}
