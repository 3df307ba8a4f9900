//! JSON file-based storage backend.
//!
//! Each slot lives in its own `<slot>.json` file inside the data directory.
//! Writes go to a temporary file first and are then renamed over the target,
//! so a crash mid-write never leaves a half-written slot behind.

use crate::domain::error::{NewsdeskError, Result};
use crate::storage::backend::Storage;
use std::path::PathBuf;

/// JSON file storage backend.
///
/// # File Layout
///
/// ```text
/// <data_dir>/
///   annotations.json   {"read": {"id": true}, "star": {}}
///   theme.json         "dark"
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    /// Directory holding one file per slot.
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Opens storage rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use newsdesk::storage::JsonFileStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonFileStorage::new(PathBuf::from("/tmp/newsdesk"))?;
    /// # Ok::<(), newsdesk::NewsdeskError>(())
    /// ```
    pub fn new(dir: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?dir, "initializing JSON storage");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        if slot.is_empty() || slot.contains(['/', '\\', '.']) {
            return Err(NewsdeskError::Storage(format!("invalid slot name: {slot:?}")));
        }
        Ok(self.dir.join(format!("{slot}.json")))
    }
}

impl Storage for JsonFileStorage {
    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        let _span = tracing::debug_span!("json_read_slot", slot = %slot).entered();

        let path = self.slot_path(slot)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(bytes = contents.len(), "slot loaded");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("slot not found");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_slot(&mut self, slot: &str, contents: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_write_slot", slot = %slot, bytes = contents.len()).entered();

        let path = self.slot_path(slot)?;
        let tmp_path = path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, contents)?;
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!("slot saved");
        Ok(())
    }
}
