use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use super::errors::UserError;
use super::password;

/// A user who can log in with email and password
#[derive(Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    /// Database-assigned identifier
    pub id: i64,
    /// Login email, unique across users
    pub email: String,
    /// Argon2 PHC string, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check `plaintext` against the stored password hash
    pub fn verify_password(&self, plaintext: &str) -> bool {
        password::verify_password(plaintext, &self.password_hash)
    }

    /// [`verify_password`](Self::verify_password) without blocking the async worker
    pub async fn check_password(&self, plaintext: &str) -> bool {
        password::verify_password_blocking(plaintext, &self.password_hash).await
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Typed lookup key for [`UserStore::get_user_by`](super::UserStore::get_user_by)
#[derive(Debug, Clone, PartialEq)]
pub enum UserSearchField {
    Id(i64),
    Email(String),
}

impl fmt::Display for UserSearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserSearchField::Id(id) => write!(f, "id={id}"),
            UserSearchField::Email(email) => write!(f, "email={email}"),
        }
    }
}

/// Read access to users, as needed by the login flow
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}
