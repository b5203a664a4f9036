//! In-memory session registry and the auth-or-guest policy
//!
//! The dashboard admits two kinds of visitors: authenticated users (checked
//! against config-declared credentials) and anonymous guests. Pages that
//! read data accept either; favorites, history, and master data require a
//! real login. Sessions live in memory keyed by a uuid carried in a cookie
//! and idle-expire; a background sweep evicts stale entries.

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::UserCredential;

// ============================================================================
// Session Data
// ============================================================================

/// What kind of visitor a session belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionKind {
    /// Anonymous but permitted browsing
    Guest,

    /// Logged-in user
    Authenticated { username: String },
}

/// One active session
#[derive(Debug, Clone)]
pub struct SessionData {
    pub id: Uuid,
    pub kind: SessionKind,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl SessionData {
    fn new(kind: SessionKind) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            kind,
            created_at: now,
            last_seen: now,
        }
    }

    /// True for logged-in users, false for guests
    pub fn is_authenticated(&self) -> bool {
        matches!(self.kind, SessionKind::Authenticated { .. })
    }

    /// Username of the logged-in user, if any
    pub fn username(&self) -> Option<&str> {
        match &self.kind {
            SessionKind::Authenticated { username } => Some(username),
            SessionKind::Guest => None,
        }
    }

    /// Check if the session sat idle past the timeout
    pub fn is_stale(&self, idle_timeout_secs: i64) -> bool {
        (Utc::now() - self.last_seen).num_seconds() > idle_timeout_secs
    }
}

// ============================================================================
// Session Errors
// ============================================================================

/// Session errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// No session cookie, or the id is unknown
    #[error("No active session")]
    NotFound,

    /// Session idle-expired
    #[error("Session expired")]
    Expired,
}

// ============================================================================
// Session Store
// ============================================================================

/// In-memory session registry
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionData>>,
    idle_timeout_secs: i64,
}

impl SessionStore {
    /// Create a new store with the given idle timeout
    pub fn new(idle_timeout_secs: u64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout_secs: idle_timeout_secs as i64,
        }
    }

    /// Start a guest session
    pub async fn create_guest(&self) -> SessionData {
        self.insert(SessionData::new(SessionKind::Guest)).await
    }

    /// Start an authenticated session
    pub async fn create_authenticated(&self, username: impl Into<String>) -> SessionData {
        self.insert(SessionData::new(SessionKind::Authenticated {
            username: username.into(),
        }))
        .await
    }

    async fn insert(&self, session: SessionData) -> SessionData {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session.clone());
        session
    }

    /// Look up a session and refresh its idle timer.
    ///
    /// Expired sessions are evicted on access rather than waiting for the
    /// sweep.
    pub async fn get(&self, id: Uuid) -> Result<SessionData, SessionError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id) {
            Some(session) if session.is_stale(self.idle_timeout_secs) => {
                sessions.remove(&id);
                Err(SessionError::Expired)
            }
            Some(session) => {
                session.last_seen = Utc::now();
                Ok(session.clone())
            }
            None => Err(SessionError::NotFound),
        }
    }

    /// Destroy a session (logout)
    pub async fn remove(&self, id: Uuid) {
        self.sessions.write().await.remove(&id);
    }

    /// Evict idle-expired sessions, returning how many were removed
    pub async fn sweep_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_stale(self.idle_timeout_secs));
        before - sessions.len()
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True when no sessions are active
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

// ============================================================================
// Credential Verification
// ============================================================================

/// Hex-encoded SHA-256 digest of a password
pub fn password_digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check a username/password pair against the declared users
pub fn verify_credentials(users: &[UserCredential], username: &str, password: &str) -> bool {
    let digest = password_digest(password);
    users
        .iter()
        .any(|u| u.username == username && u.password_sha256.eq_ignore_ascii_case(&digest))
}

// ============================================================================
// Cookie Handling
// ============================================================================

/// Extract the session id from the request's Cookie header
pub fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == cookie_name {
            Uuid::parse_str(value.trim()).ok()
        } else {
            None
        }
    })
}

/// Build the Set-Cookie value establishing a session
pub fn session_cookie(cookie_name: &str, id: Uuid) -> String {
    format!("{cookie_name}={id}; Path=/; HttpOnly; SameSite=Lax")
}

/// Build the Set-Cookie value clearing the session cookie
pub fn clear_session_cookie(cookie_name: &str) -> String {
    format!("{cookie_name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_guest_session_lifecycle() {
        let store = SessionStore::new(3600);
        let session = store.create_guest().await;
        assert!(!session.is_authenticated());
        assert!(session.username().is_none());

        let fetched = store.get(session.id).await.unwrap();
        assert_eq!(fetched.kind, SessionKind::Guest);

        store.remove(session.id).await;
        assert_eq!(
            store.get(session.id).await.unwrap_err(),
            SessionError::NotFound
        );
    }

    #[tokio::test]
    async fn test_authenticated_session() {
        let store = SessionStore::new(3600);
        let session = store.create_authenticated("ana").await;
        assert!(session.is_authenticated());
        assert_eq!(session.username(), Some("ana"));
    }

    #[tokio::test]
    async fn test_expired_session_evicted_on_access() {
        let store = SessionStore::new(0);
        let session = store.create_guest().await;
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
        assert_eq!(
            store.get(session.id).await.unwrap_err(),
            SessionError::Expired
        );
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_sweep_expired() {
        let store = SessionStore::new(0);
        store.create_guest().await;
        store.create_guest().await;
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
        assert_eq!(store.sweep_expired().await, 2);
        assert!(store.is_empty().await);
    }

    #[test]
    fn test_verify_credentials() {
        let users = vec![UserCredential {
            username: "ana".into(),
            password_sha256: password_digest("rahasia"),
        }];
        assert!(verify_credentials(&users, "ana", "rahasia"));
        assert!(!verify_credentials(&users, "ana", "salah"));
        assert!(!verify_credentials(&users, "budi", "rahasia"));
    }

    #[test]
    fn test_cookie_roundtrip() {
        let id = Uuid::new_v4();
        let cookie = session_cookie("kabar_session", id);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("other=1; {}", cookie.split(';').next().unwrap()))
                .unwrap(),
        );

        assert_eq!(session_id_from_headers(&headers, "kabar_session"), Some(id));
        assert_eq!(session_id_from_headers(&headers, "missing"), None);
    }

    #[test]
    fn test_clear_cookie_has_zero_max_age() {
        assert!(clear_session_cookie("kabar_session").contains("Max-Age=0"));
    }
}
