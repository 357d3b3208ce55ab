//! # Bearer Token Store
//!
//! In-process storage for the authenticated user's bearer token and
//! identity.
//!
//! ## Token Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Token Lifecycle                                     │
//! │                                                                         │
//! │  login() ──► backend returns {token, id, username, email, role}        │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  TokenStore.set(identity) ──► every later request attaches             │
//! │                               Authorization: Bearer <token>             │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  logout() / 401 ──► TokenStore.clear()                                 │
//! │                                                                         │
//! │  No token? Authenticated reads degrade (balance → 0) instead of        │
//! │  failing hard; writes return Unauthorized.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The frontend persists the token string across page loads; this store is
//! the single in-process copy all sub-clients share.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// The authenticated identity, as returned by `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Bearer token attached to authenticated requests.
    pub token: String,

    /// Backend user id.
    pub id: i64,

    pub username: String,
    pub email: String,

    /// "USER" or "ADMIN"; gates the admin console client-side.
    pub role: String,
}

impl AuthSession {
    /// Whether this identity may use the admin console.
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("ADMIN")
    }
}

/// Shared, thread-safe holder for the current [`AuthSession`].
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<AuthSession>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        TokenStore::default()
    }

    /// Installs the identity returned by a successful login.
    pub fn set(&self, session: AuthSession) {
        *self.inner.write().expect("token lock poisoned") = Some(session);
    }

    /// Clears the identity (logout, or a 401 from the backend).
    pub fn clear(&self) {
        *self.inner.write().expect("token lock poisoned") = None;
    }

    /// The bearer token to attach, if logged in.
    pub fn bearer(&self) -> Option<String> {
        self.inner
            .read()
            .expect("token lock poisoned")
            .as_ref()
            .map(|s| s.token.clone())
    }

    /// A copy of the current identity, if logged in.
    pub fn current(&self) -> Option<AuthSession> {
        self.inner.read().expect("token lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().expect("token lock poisoned").is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: &str) -> AuthSession {
        AuthSession {
            token: "tok-123".to_string(),
            id: 1,
            username: "asha".to_string(),
            email: "asha@example.com".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_set_and_clear() {
        let store = TokenStore::new();
        assert!(!store.is_authenticated());
        assert_eq!(store.bearer(), None);

        store.set(session("USER"));
        assert!(store.is_authenticated());
        assert_eq!(store.bearer().as_deref(), Some("tok-123"));

        store.clear();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_is_admin() {
        assert!(session("ADMIN").is_admin());
        assert!(session("admin").is_admin());
        assert!(!session("USER").is_admin());
    }

    #[test]
    fn test_clones_share_state() {
        let store = TokenStore::new();
        let clone = store.clone();

        store.set(session("USER"));
        assert!(clone.is_authenticated());
    }
}
