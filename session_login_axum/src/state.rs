use std::sync::Arc;

use session_login::{SessionStore, Stores, UserLookup};

/// Shared state for the login routes and middleware
#[derive(Clone)]
pub struct LoginState {
    pub sessions: SessionStore,
    pub users: Arc<dyn UserLookup>,
}

impl LoginState {
    pub fn new(sessions: SessionStore, users: Arc<dyn UserLookup>) -> Self {
        Self { sessions, users }
    }
}

impl From<Stores> for LoginState {
    fn from(stores: Stores) -> Self {
        Self::new(stores.sessions, Arc::new(stores.users))
    }
}
