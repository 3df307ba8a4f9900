//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait over named persistence slots.
//! Newsdesk persists exactly two independent slots, the annotation record and
//! the theme preference, and never sends either off the device.
//!
//! # Design Philosophy
//!
//! The trait only moves raw strings. Parsing and validation live with the
//! owners of each slot so a corrupt slot can be recovered without the backend
//! knowing its shape.

use crate::domain::error::Result;

/// Slot holding the serialized annotation record.
pub const ANNOTATIONS_SLOT: &str = "annotations";

/// Slot holding the theme preference.
pub const THEME_SLOT: &str = "theme";

/// Abstraction over device-local keyed storage.
///
/// # Implementations
///
/// - [`JsonFileStorage`](crate::storage::JsonFileStorage): one JSON file per slot
/// - [`MemoryStorage`](crate::storage::MemoryStorage): in-process map
///
/// # Examples
///
/// ```
/// use newsdesk::storage::{MemoryStorage, Storage};
///
/// let mut storage = MemoryStorage::default();
/// storage.write_slot("theme", "\"dark\"")?;
/// assert_eq!(storage.read_slot("theme")?.as_deref(), Some("\"dark\""));
/// # Ok::<(), newsdesk::NewsdeskError>(())
/// ```
pub trait Storage: Send + std::fmt::Debug {
    /// Reads the raw contents of a slot.
    ///
    /// Returns `Ok(None)` when the slot was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read.
    fn read_slot(&self, slot: &str) -> Result<Option<String>>;

    /// Replaces the contents of a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the write does not complete.
    fn write_slot(&mut self, slot: &str, contents: &str) -> Result<()>;
}
