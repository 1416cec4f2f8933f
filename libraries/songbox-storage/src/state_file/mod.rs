//! On-disk state slot
//!
//! The whole library state lives in a single JSON document. Writes go to a
//! sibling temp file first and are renamed into place, so a crash mid-write
//! leaves the previous snapshot intact.

use crate::codec::decode_state;
use crate::error::{Result, StorageError};
use songbox_core::{LibraryState, StateStore};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// State store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for `path` (the file need not exist yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the state file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the state file
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub fn read(&self) -> Result<Option<LibraryState>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if text.trim().is_empty() {
            return Ok(None);
        }

        decode_state(&text).map(Some)
    }

    /// Encode and atomically replace the state file
    pub fn write(&self, state: &LibraryState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let bytes = serde_json::to_vec(state)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        let tmp = self.temp_path();
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), songs = state.songs.len(), "Wrote state file");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for JsonFileStore {
    /// Unreadable or malformed files are logged and treated as absent
    fn load(&self) -> songbox_core::Result<Option<LibraryState>> {
        match self.read() {
            Ok(state) => Ok(state),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable state file");
                Ok(None)
            }
        }
    }

    fn save(&mut self, state: &LibraryState) -> songbox_core::Result<()> {
        self.write(state).map_err(Into::into)
    }
}
