//! File-backed cart store.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{CartStore, StoreError};

/// Stores the serialized cart in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store for `key` inside `dir`. Nothing is touched on disk until the first save.
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStore for FileStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(String::from_utf8(bytes)?)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored cart");
                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }

    fn save(&mut self, serialized: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Staged write, renamed over the previous cart.
        let staging = self.path.with_extension("json.tmp");

        fs::write(&staging, serialized)?;
        fs::rename(&staging, &self.path)?;

        debug!(path = %self.path.display(), bytes = serialized.len(), "saved cart");

        Ok(())
    }
}
