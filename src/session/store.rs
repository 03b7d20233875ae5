//! Token persistence backends.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use fs2::FileExt;
use parking_lot::Mutex;

use super::token::SecureString;
use super::SessionError;

/// Persistent storage for the single active bearer token.
pub trait TokenStore: Send + Sync {
    /// Read the stored token, `None` when logged out.
    fn load(&self) -> Result<Option<SecureString>, SessionError>;

    /// Replace the stored token.
    fn save(&self, token: &SecureString) -> Result<(), SessionError>;

    /// Remove the stored token. Succeeds when nothing is stored.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Token kept in a single file (`<data_dir>/stockdesk/token` by default).
///
/// Writes take an exclusive `fs2` lock so two clients sharing a profile
/// never interleave partial tokens.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<SecureString>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(SecureString::new(token)))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::Read {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn save(&self, token: &SecureString) -> Result<(), SessionError> {
        let write_err = |source| SessionError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(write_err)?;

        file.lock_exclusive().map_err(write_err)?;
        let result = file
            .set_len(0)
            .and_then(|_| file.write_all(token.expose().as_bytes()))
            .and_then(|_| file.sync_all());
        let _ = FileExt::unlock(&file);
        result.map_err(write_err)
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Write {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

/// Process-local token store used by `--ephemeral` and tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SecureString>>,
    writes: AtomicUsize,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<SecureString>, SessionError> {
        Ok(self.token.lock().clone())
    }

    fn save(&self, token: &SecureString) -> Result<(), SessionError> {
        *self.token.lock() = Some(token.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.token.lock() = None;
        Ok(())
    }
}

impl<T: TokenStore + ?Sized> TokenStore for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<SecureString>, SessionError> {
        (**self).load()
    }

    fn save(&self, token: &SecureString) -> Result<(), SessionError> {
        (**self).save(token)
    }

    fn clear(&self) -> Result<(), SessionError> {
        (**self).clear()
    }
}
