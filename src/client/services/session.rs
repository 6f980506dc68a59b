//! # Session Store
//!
//! Holds the opaque session token handed back by `/login`. Validity is
//! checked when an admin route is entered and whenever the backend
//! answers 401/403; there is no background timer re-checking the
//! session.

use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// Token lifetime without "remember me".
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24);

/// Token lifetime with "remember me" set at login.
pub const REMEMBERED_SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 30);

#[derive(Debug, Clone)]
struct SessionToken {
    value: String,
    expires_at: SystemTime,
}

/// Shared store for the admin session token.
#[derive(Debug)]
pub struct SessionStore {
    cookie_name: String,
    token: Mutex<Option<SessionToken>>,
}

impl SessionStore {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            token: Mutex::new(None),
        }
    }

    /// Store a token after a successful login. `remember` extends the
    /// lifetime from one day to thirty.
    pub fn establish(&self, token: impl Into<String>, remember: bool) {
        let ttl = if remember {
            REMEMBERED_SESSION_TTL
        } else {
            SESSION_TTL
        };
        let session = SessionToken {
            value: token.into(),
            expires_at: SystemTime::now() + ttl,
        };
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(session);
        tracing::info!(remember, "session established");
    }

    /// Current token, if present and unexpired. An expired token is
    /// dropped on the way out.
    pub fn token(&self) -> Option<String> {
        let mut guard = self.token.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(session) if session.expires_at > SystemTime::now() => {
                Some(session.value.clone())
            }
            Some(_) => {
                tracing::info!("session token expired");
                *guard = None;
                None
            }
            None => None,
        }
    }

    /// Route-entry check: is there a live session?
    pub fn is_valid(&self) -> bool {
        self.token().is_some()
    }

    /// Log out.
    pub fn clear(&self) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// The backend rejected our credentials; drop the token so the next
    /// route entry redirects to login.
    pub fn handle_unauthorized(&self) {
        tracing::warn!("backend rejected session, clearing token");
        self.clear();
    }

    /// `Cookie` header value for outgoing requests.
    pub fn cookie_header(&self) -> Option<String> {
        self.token()
            .map(|token| format!("{}={}", self.cookie_name, token))
    }

    #[cfg(test)]
    fn establish_with_ttl(&self, token: &str, ttl: Duration) {
        let session = SessionToken {
            value: token.into(),
            expires_at: SystemTime::now() + ttl,
        };
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_should_be_invalid_before_login() {
        let store = SessionStore::new("forecourt_session");
        assert!(!store.is_valid());
        assert!(store.cookie_header().is_none());
    }

    #[test]
    fn session_should_expose_cookie_header_after_login() {
        let store = SessionStore::new("forecourt_session");
        store.establish("tok-123", false);

        assert!(store.is_valid());
        assert_eq!(
            store.cookie_header().as_deref(),
            Some("forecourt_session=tok-123")
        );
    }

    #[test]
    fn expired_session_should_read_as_logged_out() {
        let store = SessionStore::new("forecourt_session");
        store.establish_with_ttl("tok-123", Duration::ZERO);

        assert!(!store.is_valid());
        assert!(store.token().is_none());
    }

    #[test]
    fn unauthorized_response_should_clear_the_session() {
        let store = SessionStore::new("forecourt_session");
        store.establish("tok-123", true);

        store.handle_unauthorized();

        assert!(!store.is_valid());
    }
}
