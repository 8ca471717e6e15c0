use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::StoreError;
use crate::types::CargoSpec;

/// Saves and restores the cargo list between sessions.
pub trait CargoStore {
    fn load(&self) -> Result<Vec<CargoSpec>, StoreError>;
    fn save(&self, cargo: &[CargoSpec]) -> Result<(), StoreError>;
}

/// Cargo list kept as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CargoStore for JsonFileStore {
    /// A missing file is an empty list.
    fn load(&self) -> Result<Vec<CargoSpec>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&self, cargo: &[CargoSpec]) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(cargo)?;
        std::fs::write(&self.path, text).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), items = cargo.len(), "cargo list saved");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    cargo: Mutex<Vec<CargoSpec>>,
}

impl CargoStore for MemoryStore {
    fn load(&self) -> Result<Vec<CargoSpec>, StoreError> {
        // A panic while holding the lock cannot leave the list half written
        let stored = self.cargo.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(stored.clone())
    }

    fn save(&self, cargo: &[CargoSpec]) -> Result<(), StoreError> {
        let mut stored = self.cargo.lock().unwrap_or_else(PoisonError::into_inner);
        *stored = cargo.to_vec();
        Ok(())
    }
}
