use async_trait::async_trait;
use std::sync::Arc;

use crate::storage::DataStore;
use crate::userdb::{
    errors::UserError,
    password::hash_password_blocking,
    types::{User, UserLookup, UserSearchField},
};

use super::postgres::*;
use super::sqlite::*;

/// Users table access over the configured [`DataStore`]
#[derive(Clone)]
pub struct UserStore {
    store: Arc<dyn DataStore>,
}

impl UserStore {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Create the users table if needed and check its columns
    pub async fn init(&self) -> Result<(), UserError> {
        match (self.store.as_sqlite(), self.store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_user_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_user_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    #[tracing::instrument(skip(self), fields(user_field = %field))]
    pub async fn get_user_by(&self, field: UserSearchField) -> Result<Option<User>, UserError> {
        let result = if let Some(pool) = self.store.as_sqlite() {
            get_user_by_field_sqlite(pool, &field).await
        } else if let Some(pool) = self.store.as_postgres() {
            get_user_by_field_postgres(pool, &field).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(Some(_)) => tracing::debug!(found = true, "User lookup completed"),
            Ok(None) => tracing::debug!(found = false, "User lookup completed - not found"),
            Err(e) => tracing::error!(error = %e, "User lookup failed"),
        }

        result
    }

    /// Hash `password` and insert a new user
    #[tracing::instrument(skip(self, password))]
    pub async fn create_user(&self, email: &str, password: &str) -> Result<User, UserError> {
        if email.trim().is_empty() {
            return Err(UserError::InvalidData("Email cannot be empty".to_string()));
        }

        let password_hash = hash_password_blocking(password).await?;

        let result = if let Some(pool) = self.store.as_sqlite() {
            insert_user_sqlite(pool, email, &password_hash).await
        } else if let Some(pool) = self.store.as_postgres() {
            insert_user_postgres(pool, email, &password_hash).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(user) => tracing::info!(user_id = user.id, "User created"),
            Err(e) => tracing::error!(error = %e, "User creation failed"),
        }

        result
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), UserError> {
        if let Some(pool) = self.store.as_sqlite() {
            delete_user_sqlite(pool, id).await
        } else if let Some(pool) = self.store.as_postgres() {
            delete_user_postgres(pool, id).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}

#[async_trait]
impl UserLookup for UserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserError> {
        self.get_user_by(UserSearchField::Id(id)).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.get_user_by(UserSearchField::Email(email.to_string()))
            .await
    }
}
