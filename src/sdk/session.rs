//! Bearer token session
//!
//! A [`Session`] is handed to the [`ApiClient`](crate::sdk::ApiClient) at
//! construction; `set_token`/`clear_token` are the only writers and every
//! outgoing request reads it.

use crate::sdk::errors::Result;
use parking_lot::RwLock;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Persists the token between runs
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    /// Previously saved token, if any
    fn load(&self) -> Result<Option<String>>;
    /// Save
    fn save(&self, token: &str) -> Result<()>;
    /// Forget the saved token
    fn clear(&self) -> Result<()>;
}

/// Keeps the token for the lifetime of the process only
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.read().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.write() = None;
        Ok(())
    }
}

/// Stores the token in a plain file
#[derive(Debug, Clone)]
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
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Written readable by the owner only on Unix
    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        // An existing file keeps its old mode through open()
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(token.as_bytes())?;

        debug!("Token saved to {:?}", self.path);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-wide authentication state
#[derive(Debug, Clone)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
    store: Arc<dyn TokenStore>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Arc::new(MemoryTokenStore::default()))
    }
}

impl Session {
    /// Create a session backed by `store`; the stored token is not loaded
    /// until [`Session::restore`].
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            token: Arc::new(RwLock::new(None)),
            store,
        }
    }

    /// Current token
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Replace the token and persist it
    pub fn set_token(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        self.store.save(&token)?;
        *self.token.write() = Some(token);
        Ok(())
    }

    /// Drop the token from memory and from the store
    pub fn clear_token(&self) {
        *self.token.write() = None;
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear persisted token: {}", e);
        }
    }

    /// Load a persisted token into memory. Returns whether one was found.
    pub fn restore(&self) -> Result<bool> {
        let stored = self.store.load()?;
        let found = stored.is_some();
        *self.token.write() = stored;
        Ok(found)
    }

    /// `Authorization` header value
    pub(crate) fn bearer(&self) -> Option<String> {
        self.token.read().as_ref().map(|t| format!("Bearer {t}"))
    }
}
