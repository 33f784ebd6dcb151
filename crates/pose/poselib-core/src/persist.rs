//! Persistence adapters for the store document.
//!
//! Hosts decide where a document's pose data lives; the core only needs to load a
//! [`Store`] when a document opens and hand it back on save.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{PoseError, Result};
use crate::store::Store;

/// Load/save hook for the host's document storage.
pub trait StoreBackend {
    /// `Ok(None)` when the document has no pose data yet.
    fn load(&mut self) -> Result<Option<Store>>;
    fn save(&mut self, store: &Store) -> Result<()>;
}

/// Store document kept as pretty JSON in a single file.
#[derive(Clone, Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreBackend for JsonFileBackend {
    fn load(&mut self) -> Result<Option<Store>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no store document at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(PoseError::io(&self.path, e)),
        };
        let store = serde_json::from_str(&text).map_err(|e| {
            PoseError::format(format!("store document {}: {e}", self.path.display()))
        })?;
        Ok(Some(store))
    }

    fn save(&mut self, store: &Store) -> Result<()> {
        let text = serde_json::to_string_pretty(store)?;
        fs::write(&self.path, text).map_err(|e| PoseError::io(&self.path, e))
    }
}

/// Keeps the last saved store in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    pub document: Option<Store>,
}

impl MemoryBackend {
    pub fn new(document: Option<Store>) -> Self {
        Self { document }
    }
}

impl StoreBackend for MemoryBackend {
    fn load(&mut self) -> Result<Option<Store>> {
        Ok(self.document.clone())
    }

    fn save(&mut self, store: &Store) -> Result<()> {
        self.document = Some(store.clone());
        Ok(())
    }
}
