//! Device-local read/star annotations.
//!
//! The annotation record keeps two boolean flags per item id. It is loaded
//! once at startup, mutated only by explicit toggles, and written back to the
//! `annotations` slot after every single toggle so no mark is lost if the pane
//! closes right away.
//!
//! Loading never fails: a missing, unparsable or wrongly shaped slot falls
//! back to an empty record and the reason is logged.

use crate::domain::error::Result;
use crate::domain::Sanitized;
use crate::storage::backend::{Storage, ANNOTATIONS_SLOT};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Per-item `read` and `star` flags keyed by item id.
///
/// Absence means `false`. Entries appear on the first toggle of an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Read flags.
    #[serde(default)]
    pub read: BTreeMap<String, bool>,
    /// Star flags.
    #[serde(default)]
    pub star: BTreeMap<String, bool>,
}

impl AnnotationRecord {
    #[must_use]
    pub fn is_read(&self, id: &str) -> bool {
        self.read.get(id).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn is_starred(&self, id: &str) -> bool {
        self.star.get(id).copied().unwrap_or(false)
    }
}

/// Validates a raw annotation slot.
///
/// # Recovery Rules
///
/// - absent slot: empty record, nothing discarded
/// - not JSON, not an object, or `read`/`star` present but not objects:
///   empty record with the reason recorded
/// - non-boolean flag values: that entry is dropped, the rest kept
///
/// # Examples
///
/// ```
/// use newsdesk::storage::annotations::{sanitize_annotations, AnnotationRecord};
///
/// let recovered = sanitize_annotations(Some("[1, 2, 3]"));
/// assert_eq!(recovered.value, AnnotationRecord::default());
/// assert!(recovered.was_corrupt());
/// ```
#[must_use]
pub fn sanitize_annotations(raw: Option<&str>) -> Sanitized<AnnotationRecord> {
    let Some(raw) = raw else {
        return Sanitized::clean(AnnotationRecord::default());
    };

    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            return Sanitized::recovered(AnnotationRecord::default(), format!("not valid JSON: {e}"));
        }
    };

    let Value::Object(fields) = parsed else {
        return Sanitized::recovered(AnnotationRecord::default(), "annotation record is not an object");
    };

    let mut discarded = Vec::new();
    let mut mappings = Vec::with_capacity(2);
    for name in ["read", "star"] {
        let flags = match fields.get(name) {
            None | Some(Value::Null) => BTreeMap::new(),
            Some(Value::Object(raw)) => {
                let (flags, dropped) = collect_flags(raw);
                if dropped > 0 {
                    discarded.push(format!("{dropped} non-boolean {name} flags dropped"));
                }
                flags
            }
            Some(_) => {
                return Sanitized::recovered(
                    AnnotationRecord::default(),
                    format!("{name} mapping is not an object"),
                );
            }
        };
        mappings.push(flags);
    }

    let star = mappings.pop().unwrap_or_default();
    let read = mappings.pop().unwrap_or_default();
    Sanitized {
        value: AnnotationRecord { read, star },
        discarded,
    }
}

fn collect_flags(raw: &Map<String, Value>) -> (BTreeMap<String, bool>, usize) {
    let mut flags = BTreeMap::new();
    let mut dropped = 0;
    for (id, flag) in raw {
        match flag.as_bool() {
            Some(flag) => {
                flags.insert(id.clone(), flag);
            }
            None => dropped += 1,
        }
    }
    (flags, dropped)
}

/// Annotation record bound to the storage it persists into.
#[derive(Debug)]
pub struct AnnotationStore {
    record: AnnotationRecord,
    storage: Box<dyn Storage>,
}

impl AnnotationStore {
    /// Loads the persisted record, recovering silently from any corruption.
    ///
    /// A storage read error is treated the same as corrupt data.
    #[must_use]
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let _span = tracing::debug_span!("annotations_load").entered();

        let sanitized = match storage.read_slot(ANNOTATIONS_SLOT) {
            Ok(raw) => sanitize_annotations(raw.as_deref()),
            Err(e) => Sanitized::recovered(AnnotationRecord::default(), format!("read failed: {e}")),
        };
        let record = sanitized.into_logged("annotations");

        tracing::debug!(
            read_count = record.read.len(),
            star_count = record.star.len(),
            "annotations loaded"
        );

        Self { record, storage }
    }

    #[must_use]
    pub const fn record(&self) -> &AnnotationRecord {
        &self.record
    }

    #[must_use]
    pub fn is_read(&self, id: &str) -> bool {
        self.record.is_read(id)
    }

    #[must_use]
    pub fn is_starred(&self, id: &str) -> bool {
        self.record.is_starred(id)
    }

    /// Serializes the full record into the annotations slot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the slot write fails.
    pub fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.record)?;
        self.storage.write_slot(ANNOTATIONS_SLOT, &json)
    }

    /// Flips the read flag of `id` and persists the record.
    ///
    /// Returns the new flag value.
    ///
    /// # Errors
    ///
    /// Returns an error if the save fails. The in-memory flip is kept.
    pub fn toggle_read(&mut self, id: &str) -> Result<bool> {
        let flag = flip(&mut self.record.read, id);
        tracing::debug!(item_id = %id, read = flag, "read flag toggled");
        self.save()?;
        Ok(flag)
    }

    /// Flips the star flag of `id` and persists the record.
    ///
    /// Returns the new flag value.
    ///
    /// # Errors
    ///
    /// Returns an error if the save fails. The in-memory flip is kept.
    pub fn toggle_star(&mut self, id: &str) -> Result<bool> {
        let flag = flip(&mut self.record.star, id);
        tracing::debug!(item_id = %id, starred = flag, "star flag toggled");
        self.save()?;
        Ok(flag)
    }
}

fn flip(flags: &mut BTreeMap<String, bool>, id: &str) -> bool {
    let entry = flags.entry(id.to_string()).or_insert(false);
    *entry = !*entry;
    *entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonFileStorage, MemoryStorage};
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_slot_loads_empty_record() {
        let store = AnnotationStore::load(Box::new(MemoryStorage::default()));
        assert_eq!(store.record(), &AnnotationRecord::default());
    }

    #[test]
    fn json_array_recovers_to_empty_record() {
        let storage = MemoryStorage::with_slot(ANNOTATIONS_SLOT, "[\"a\", \"b\"]");
        let store = AnnotationStore::load(Box::new(storage));
        assert_eq!(store.record(), &AnnotationRecord::default());
    }

    #[test]
    fn garbage_text_is_detected_as_corrupt() {
        let sanitized = sanitize_annotations(Some("{not json"));
        assert!(sanitized.was_corrupt());
        assert_eq!(sanitized.value, AnnotationRecord::default());
    }

    #[test]
    fn wrongly_shaped_mapping_recovers_to_empty_record() {
        let sanitized = sanitize_annotations(Some(r#"{"read": ["a"], "star": {"b": true}}"#));
        assert!(sanitized.was_corrupt());
        assert_eq!(sanitized.value, AnnotationRecord::default());
    }

    #[test]
    fn non_boolean_flags_are_dropped_individually() {
        let sanitized = sanitize_annotations(Some(r#"{"read": {"a": true, "b": "yes"}}"#));

        assert!(sanitized.was_corrupt());
        assert!(sanitized.value.is_read("a"));
        assert!(!sanitized.value.read.contains_key("b"));
    }

    #[test]
    fn toggle_twice_restores_original_value() {
        let mut store = AnnotationStore::load(Box::new(MemoryStorage::default()));

        assert!(store.toggle_read("x").unwrap());
        assert!(!store.toggle_read("x").unwrap());
        assert!(!store.is_read("x"));

        assert!(store.toggle_star("x").unwrap());
        assert!(!store.toggle_star("x").unwrap());
        assert!(!store.is_starred("x"));
    }

    #[test]
    fn toggle_is_persisted_immediately() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = AnnotationStore::load(Box::new(JsonFileStorage::new(dir.path().to_path_buf()).unwrap()));
        store.toggle_read("item-1").unwrap();
        store.toggle_star("item-2").unwrap();

        let reloaded = AnnotationStore::load(Box::new(JsonFileStorage::new(dir.path().to_path_buf()).unwrap()));
        assert!(reloaded.is_read("item-1"));
        assert!(reloaded.is_starred("item-2"));
        assert!(!reloaded.is_starred("item-1"));
    }
}
