//! In-memory storage backend.
//!
//! Used by tests, and by the plugin when the data directory cannot be
//! created: marks then last only for the lifetime of the pane.

use crate::domain::error::Result;
use crate::storage::backend::Storage;
use std::collections::HashMap;

/// Storage backend keeping every slot in a `HashMap`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates storage pre-filled with one slot.
    #[must_use]
    pub fn with_slot(slot: &str, contents: &str) -> Self {
        let mut storage = Self::default();
        storage.slots.insert(slot.to_string(), contents.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write_slot(&mut self, slot: &str, contents: &str) -> Result<()> {
        self.slots.insert(slot.to_string(), contents.to_string());
        Ok(())
    }
}
