use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::userdb::{User, UserError, UserLookup, hash_password};

/// Fixed set of users that counts every lookup
pub(crate) struct CountingLookup {
    users: Vec<User>,
    pub(crate) calls: AtomicUsize,
    fail: bool,
}

impl CountingLookup {
    pub(crate) fn with_user(id: i64, email: &str, password: &str) -> Self {
        let now = Utc::now();
        Self {
            users: vec![User {
                id,
                email: email.to_string(),
                password_hash: hash_password(password).expect("hash"),
                created_at: now,
                updated_at: now,
            }],
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            users: Vec::new(),
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> Result<(), UserError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(UserError::Storage("lookup failed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserLookup for CountingLookup {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserError> {
        self.record()?;
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.record()?;
        Ok(self.users.iter().find(|u| u.email == email).cloned())
    }
}
