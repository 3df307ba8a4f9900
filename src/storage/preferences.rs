//! Persisted theme preference.
//!
//! The preference lives in its own `theme` slot as the JSON string `"light"`
//! or `"dark"`. Anything else reads back as the default light theme.

use crate::domain::error::Result;
use crate::domain::Sanitized;
use crate::storage::backend::{Storage, THEME_SLOT};
use serde::{Deserialize, Serialize};

/// Which palette the user picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// Name of the built-in palette for this preference.
    #[must_use]
    pub const fn theme_name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Validates a raw theme slot. Absent or malformed data gives `Light`.
#[must_use]
pub fn sanitize_theme(raw: Option<&str>) -> Sanitized<ThemePreference> {
    match raw {
        None => Sanitized::clean(ThemePreference::default()),
        Some(raw) => match serde_json::from_str::<ThemePreference>(raw) {
            Ok(pref) => Sanitized::clean(pref),
            Err(e) => Sanitized::recovered(ThemePreference::default(), format!("invalid theme preference: {e}")),
        },
    }
}

/// Theme preference bound to the storage it persists into.
#[derive(Debug)]
pub struct PreferenceStore {
    theme: ThemePreference,
    storage: Box<dyn Storage>,
}

impl PreferenceStore {
    /// Loads the stored preference, silently defaulting on any problem.
    #[must_use]
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let sanitized = match storage.read_slot(THEME_SLOT) {
            Ok(raw) => sanitize_theme(raw.as_deref()),
            Err(e) => Sanitized::recovered(ThemePreference::default(), format!("read failed: {e}")),
        };
        let theme = sanitized.into_logged("theme");
        tracing::debug!(theme = ?theme, "theme preference loaded");
        Self { theme, storage }
    }

    #[must_use]
    pub const fn theme(&self) -> ThemePreference {
        self.theme
    }

    /// Flips between light and dark and persists the new value.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot write fails. The flip is kept in memory.
    pub fn toggle_theme(&mut self) -> Result<ThemePreference> {
        self.theme = self.theme.toggled();
        let json = serde_json::to_string(&self.theme)?;
        self.storage.write_slot(THEME_SLOT, &json)?;
        Ok(self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonFileStorage, MemoryStorage};
    use pretty_assertions::assert_eq;

    #[test]
    fn stored_values_round_trip_through_slot_format() {
        assert_eq!(sanitize_theme(Some("\"dark\"")).value, ThemePreference::Dark);
        assert_eq!(sanitize_theme(Some("\"light\"")).value, ThemePreference::Light);
    }

    #[test]
    fn malformed_slot_defaults_to_light() {
        let sanitized = sanitize_theme(Some("{\"theme\": 3}"));
        assert_eq!(sanitized.value, ThemePreference::Light);
        assert!(sanitized.was_corrupt());

        let store = PreferenceStore::load(Box::new(MemoryStorage::with_slot(THEME_SLOT, "\"purple\"")));
        assert_eq!(store.theme(), ThemePreference::Light);
    }

    #[test]
    fn toggle_flips_and_writes() {
        let mut store = PreferenceStore::load(Box::new(MemoryStorage::default()));

        assert_eq!(store.toggle_theme().unwrap(), ThemePreference::Dark);
        assert_eq!(store.toggle_theme().unwrap(), ThemePreference::Light);
    }

    #[test]
    fn toggle_is_persisted_immediately() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = PreferenceStore::load(Box::new(JsonFileStorage::new(dir.path().to_path_buf()).unwrap()));
        store.toggle_theme().unwrap();

        let reloaded = PreferenceStore::load(Box::new(JsonFileStorage::new(dir.path().to_path_buf()).unwrap()));
        assert_eq!(reloaded.theme(), ThemePreference::Dark);
        assert_eq!(std::fs::read_to_string(dir.path().join("theme.json")).unwrap(), "\"dark\"");

        let mut store = reloaded;
        store.toggle_theme().unwrap();
        let reloaded = PreferenceStore::load(Box::new(JsonFileStorage::new(dir.path().to_path_buf()).unwrap()));
        assert_eq!(reloaded.theme(), ThemePreference::Light);
    }
}
