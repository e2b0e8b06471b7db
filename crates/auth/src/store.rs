//! Durable session token storage.
//!
//! Exactly one item is persisted client-side between runs: the session token,
//! under a fixed path. Absence is "not authenticated". The store is handed
//! explicitly to the API client and the session monitor; nothing reads
//! ambient global state.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use thiserror::Error;

pub trait TokenStore: Send + Sync {
    /// Current token, if any. Read at call time by every consumer so a token
    /// replaced mid-session is picked up on the next use.
    fn load(&self) -> Option<String>;

    fn save(&self, token: &str) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("no usable application data directory")]
    NoDataDir,
}

/// File-backed store at `{data_dir}/aula/session.token`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store under the OS application data directory.
    pub fn new() -> Result<Self, StoreError> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .ok_or(StoreError::NoDataDir)?;

        let mut dir = base;
        dir.push("aula");
        std::fs::create_dir_all(&dir)?;

        dir.push("session.token");
        Ok(Self { path: dir })
    }

    /// Store at an explicit path (tests, embedding).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim().to_string();
                if token.is_empty() { None } else { Some(token) }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("failed to read session token: {e}");
                None
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        std::fs::write(&self.path, token)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        *self.token.write().expect("token lock poisoned") = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.token.write().expect("token lock poisoned") = None;
        Ok(())
    }
}
