use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::session::errors::SessionError;
use crate::storage::CacheData;

/// Values kept for one client between requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) flash: BTreeMap<String, String>,
}

impl SessionData {
    pub(crate) fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.flash.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct StoredSession {
    #[serde(flatten)]
    pub(super) data: SessionData,
    pub(super) expires_at: DateTime<Utc>,
}

impl TryFrom<&StoredSession> for CacheData {
    type Error = SessionError;

    fn try_from(session: &StoredSession) -> Result<Self, Self::Error> {
        Ok(Self {
            value: serde_json::to_string(session)
                .map_err(|e| SessionError::Storage(e.to_string()))?,
        })
    }
}

impl TryFrom<CacheData> for StoredSession {
    type Error = SessionError;

    fn try_from(data: CacheData) -> Result<Self, Self::Error> {
        serde_json::from_str(&data.value).map_err(|e| SessionError::Storage(e.to_string()))
    }
}

/// The session of the client making the current request
///
/// Loaded by [`SessionStore::load`](crate::SessionStore::load) at the start of a
/// request, mutated by the resolver and handlers, and written back by
/// [`SessionStore::save`](crate::SessionStore::save) only if something changed.
#[derive(Debug, Clone, Default)]
pub struct Session {
    id: Option<String>,
    pub(crate) data: SessionData,
    changed: bool,
    renew: bool,
}

impl Session {
    /// An empty session with no cookie yet
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn restore(id: String, data: SessionData) -> Self {
        Self {
            id: Some(id),
            data,
            changed: false,
            renew: false,
        }
    }

    /// Session id from the client's cookie, if the client presented a live one
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.data.user_id
    }

    pub fn set_user_id(&mut self, user_id: i64) {
        self.data.user_id = Some(user_id);
        self.changed = true;
    }

    /// Clear the user id. A session without one is left untouched.
    pub fn clear_user_id(&mut self) {
        if self.data.user_id.take().is_some() {
            self.changed = true;
        }
    }

    /// Store a message for the next request that reads `key`
    pub fn set_flash(&mut self, key: &str, message: impl Into<String>) {
        self.data.flash.insert(key.to_string(), message.into());
        self.changed = true;
    }

    /// Read and remove a flash message
    pub fn take_flash(&mut self, key: &str) -> Option<String> {
        let message = self.data.flash.remove(key);
        if message.is_some() {
            self.changed = true;
        }
        message
    }

    /// Issue a new session id on the next save and drop the old one
    pub fn renew(&mut self) {
        self.renew = true;
        self.changed = true;
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub(crate) fn renew_requested(&self) -> bool {
        self.renew
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_unchanged_and_anonymous() {
        let session = Session::new();
        assert_eq!(session.id(), None);
        assert_eq!(session.user_id(), None);
        assert!(!session.is_changed());
    }

    #[test]
    fn test_clear_user_id_on_anonymous_session_is_noop() {
        let mut session = Session::new();
        session.clear_user_id();
        assert!(!session.is_changed());
    }

    #[test]
    fn test_set_and_clear_user_id() {
        let mut session = Session::restore("sid".to_string(), SessionData::default());

        session.set_user_id(7);
        assert_eq!(session.user_id(), Some(7));
        assert!(session.is_changed());

        session.clear_user_id();
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn test_flash_is_read_once() {
        let mut session = Session::new();
        session.set_flash("error", "Invalid credentials");

        assert_eq!(
            session.take_flash("error").as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(session.take_flash("error"), None);
    }

    #[test]
    fn test_take_missing_flash_does_not_mark_changed() {
        let mut session = Session::restore("sid".to_string(), SessionData::default());
        assert_eq!(session.take_flash("error"), None);
        assert!(!session.is_changed());
    }

    #[test]
    fn test_stored_session_cache_roundtrip() {
        let mut flash = BTreeMap::new();
        flash.insert("error".to_string(), "Invalid credentials".to_string());
        let stored = StoredSession {
            data: SessionData {
                user_id: Some(7),
                flash,
            },
            expires_at: Utc::now(),
        };

        let cache = CacheData::try_from(&stored).expect("serialize");
        let restored = StoredSession::try_from(cache).expect("deserialize");

        assert_eq!(restored.data, stored.data);
        assert_eq!(restored.expires_at, stored.expires_at);
    }

    #[test]
    fn test_stored_session_rejects_garbage() {
        let result = StoredSession::try_from(CacheData {
            value: "not json".to_string(),
        });
        assert!(matches!(result, Err(SessionError::Storage(_))));
    }

    #[test]
    fn test_empty_data_omits_fields() {
        let stored = StoredSession {
            data: SessionData::default(),
            expires_at: Utc::now(),
        };
        let json = serde_json::to_value(&stored).expect("serialize");
        assert!(json.get("user_id").is_none());
        assert!(json.get("flash").is_none());
        assert!(json.get("expires_at").is_some());
    }
}
