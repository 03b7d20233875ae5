//! Explicit session object shared by the API client and the auth view.
//!
//! The token lives in a [`TokenStore`]; [`Session`] caches it in memory so
//! request building never touches the disk.

mod store;
mod token;

pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use token::SecureString;

use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read session token '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write session token '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: Box<dyn TokenStore>,
    token: RwLock<Option<SecureString>>,
}

impl Session {
    /// Open a session over `store`, picking up any token it already holds.
    pub fn open(store: impl TokenStore + 'static) -> Result<Self, SessionError> {
        let token = store.load()?;
        Ok(Self {
            inner: Arc::new(SessionInner {
                store: Box::new(store),
                token: RwLock::new(token),
            }),
        })
    }

    /// Session that forgets its token when the process exits.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                store: Box::new(MemoryTokenStore::new()),
                token: RwLock::new(None),
            }),
        }
    }

    pub fn token(&self) -> Option<SecureString> {
        self.inner.token.read().clone()
    }

    /// True when a token is held. Says nothing about server-side validity.
    pub fn is_authenticated(&self) -> bool {
        self.inner.token.read().is_some()
    }

    /// Persist `token` and make it the active credential.
    ///
    /// The in-memory copy only changes once the store accepted the write.
    pub fn set_token(&self, token: SecureString) -> Result<(), SessionError> {
        self.inner.store.save(&token)?;
        *self.inner.token.write() = Some(token);
        Ok(())
    }

    /// Forget the active token, in memory and in the store.
    pub fn clear(&self) -> Result<(), SessionError> {
        *self.inner.token.write() = None;
        self.inner.store.clear()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_picks_up_stored_token() {
        let store = Arc::new(MemoryTokenStore::new());
        store.save(&SecureString::new("T")).unwrap();
        let session = Session::open(Arc::clone(&store)).unwrap();
        assert_eq!(session.token().unwrap().expose(), "T");
    }

    #[test]
    fn clear_removes_token_from_store() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = Session::open(Arc::clone(&store)).unwrap();
        session.set_token(SecureString::new("T")).unwrap();
        assert!(session.is_authenticated());

        session.clear().unwrap();
        assert!(!session.is_authenticated());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn clones_share_token() {
        let session = Session::in_memory();
        let other = session.clone();
        session.set_token(SecureString::new("shared")).unwrap();
        assert_eq!(other.token().unwrap().expose(), "shared");
    }
}
