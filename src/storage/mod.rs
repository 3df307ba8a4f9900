//! Storage layer for device-local persistence.
//!
//! Newsdesk keeps two independent slots on the device: the read/star
//! annotation record and the theme preference. Neither is ever transmitted.
//!
//! # Modules
//!
//! - `backend`: Slot-oriented storage trait
//! - `json`: One-JSON-file-per-slot implementation with atomic writes
//! - `memory`: In-memory implementation
//! - `annotations`: Read/star record, validation and toggles
//! - `preferences`: Light/dark theme preference

pub mod annotations;
pub mod backend;
pub mod json;
pub mod memory;
pub mod preferences;

pub use annotations::{AnnotationRecord, AnnotationStore};
pub use backend::{Storage, ANNOTATIONS_SLOT, THEME_SLOT};
pub use json::JsonFileStorage;
pub use memory::MemoryStorage;
pub use preferences::{PreferenceStore, ThemePreference};
