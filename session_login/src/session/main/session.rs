use chrono::{Duration, Utc};
use http::header::HeaderMap;

use crate::session::config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
use crate::session::errors::SessionError;
use crate::session::main::cookie::get_session_id_from_headers;
use crate::session::types::{Session, StoredSession};
use crate::storage::{CacheData, SharedCacheStore};
use crate::utils::{gen_random_string, header_set_cookie};

const SESSION_PREFIX: &str = "session";

/// Loads and saves [`Session`]s in a cache store, keyed by the session cookie
#[derive(Clone)]
pub struct SessionStore {
    cache: SharedCacheStore,
    cookie_name: String,
    max_age: u64,
}

impl SessionStore {
    /// Store using `SESSION_COOKIE_NAME` and `SESSION_COOKIE_MAX_AGE`
    pub fn new(cache: SharedCacheStore) -> Self {
        Self::with_cookie(cache, SESSION_COOKIE_NAME.as_str(), *SESSION_COOKIE_MAX_AGE)
    }

    pub fn with_cookie(cache: SharedCacheStore, cookie_name: &str, max_age: u64) -> Self {
        Self {
            cache,
            cookie_name: cookie_name.to_string(),
            max_age,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Load the session named by the request's session cookie
    pub async fn load_from_headers(&self, headers: &HeaderMap) -> Result<Session, SessionError> {
        let session_id = get_session_id_from_headers(headers, &self.cookie_name)?;
        self.load(session_id).await
    }

    /// Load a session by id
    ///
    /// A missing id, an unknown id, an expired record, or a record that no
    /// longer deserializes all yield a fresh empty session.
    pub async fn load(&self, session_id: Option<&str>) -> Result<Session, SessionError> {
        let Some(session_id) = session_id else {
            return Ok(Session::new());
        };

        let cached = self.cache.lock().await.get(SESSION_PREFIX, session_id).await?;
        let Some(cached) = cached else {
            tracing::debug!("Session not found in cache");
            return Ok(Session::new());
        };

        let stored = match StoredSession::try_from(cached) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Discarding unreadable session record: {}", e);
                return Ok(Session::new());
            }
        };

        if stored.expires_at < Utc::now() {
            tracing::debug!("Session expired at {}", stored.expires_at);
            self.cache
                .lock()
                .await
                .remove(SESSION_PREFIX, session_id)
                .await?;
            return Ok(Session::new());
        }

        Ok(Session::restore(session_id.to_string(), stored.data))
    }

    /// Persist `session` if it changed
    ///
    /// Returns the `Set-Cookie` headers the response must carry, or `None` when
    /// the client's cookie is already correct.
    pub async fn save(&self, session: &Session) -> Result<Option<HeaderMap>, SessionError> {
        if !session.is_changed() {
            return Ok(None);
        }

        let mut headers = HeaderMap::new();

        if session.data.is_empty() {
            let Some(old_id) = session.id() else {
                return Ok(None);
            };
            self.cache
                .lock()
                .await
                .remove(SESSION_PREFIX, old_id)
                .await?;
            header_set_cookie(&mut headers, &self.cookie_name, "", 0)?;
            tracing::debug!("Session emptied, cookie cleared");
            return Ok(Some(headers));
        }

        let session_id = match session.id() {
            Some(id) if !session.renew_requested() => id.to_string(),
            old_id => {
                if let Some(old_id) = old_id {
                    self.cache
                        .lock()
                        .await
                        .remove(SESSION_PREFIX, old_id)
                        .await?;
                    tracing::debug!("Session id rotated");
                }
                gen_random_string(32)?
            }
        };

        let stored = StoredSession {
            data: session.data.clone(),
            expires_at: Utc::now() + Duration::seconds(self.max_age as i64),
        };

        self.cache
            .lock()
            .await
            .put_with_ttl(
                SESSION_PREFIX,
                &session_id,
                CacheData::try_from(&stored)?,
                self.max_age as usize,
            )
            .await?;

        header_set_cookie(
            &mut headers,
            &self.cookie_name,
            &session_id,
            self.max_age as i64,
        )?;

        Ok(Some(headers))
    }
}
