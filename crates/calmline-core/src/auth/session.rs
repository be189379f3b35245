use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use super::TokenStore;

/// The bearer token currently in use, mirrored into a `TokenStore`.
///
/// The store is read exactly once, in `Session::load`. After that the
/// in-memory copy is authoritative and the store is only written.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    token: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Session {
    /// Create a session, picking up any token the store already holds.
    /// An unreadable store starts the session logged out.
    pub fn load(store: Arc<dyn TokenStore>) -> Self {
        let token = match store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to load stored token, starting without one");
                None
            }
        };
        debug!(has_token = token.is_some(), "Session loaded");
        Self { store, token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Hold `token` and persist it.
    pub fn set_token(&mut self, token: String) -> Result<()> {
        self.store.save(&token)?;
        self.token = Some(token);
        Ok(())
    }

    /// Forget the token and delete it from the store.
    pub fn remove_token(&mut self) -> Result<()> {
        self.token = None;
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;

    #[test]
    fn test_load_reads_existing_token() {
        let session = Session::load(Arc::new(MemoryTokenStore::with_token("abc")));
        assert_eq!(session.token(), Some("abc"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_set_and_remove_mirror_into_store() {
        let store = Arc::new(MemoryTokenStore::new());
        let mut session = Session::load(store.clone());
        assert!(!session.is_authenticated());

        session.set_token("xyz".to_string()).unwrap();
        assert_eq!(session.token(), Some("xyz"));
        assert_eq!(store.load().unwrap().as_deref(), Some("xyz"));

        session.remove_token().unwrap();
        assert_eq!(session.token(), None);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_store_read_only_once() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = Session::load(store.clone());
        store.save("written-elsewhere").unwrap();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::load(Arc::new(MemoryTokenStore::with_token("secret")));
        assert!(!format!("{:?}", session).contains("secret"));
    }
}
