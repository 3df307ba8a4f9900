//! Sanitized values with a record of what was discarded.
//!
//! Untrusted input (persisted slots, remote item fields) is never rejected
//! outright. Validation functions return a [`Sanitized`] value holding a safe
//! result plus the reasons anything was dropped or defaulted, so callers can
//! log the corruption and tests can assert it was noticed.

/// A sanitized value plus the reasons input was discarded to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized<T> {
    /// The safe value to use.
    pub value: T,
    /// Why parts of the input were ignored. Empty when the input was clean.
    pub discarded: Vec<String>,
}

impl<T> Sanitized<T> {
    /// Wraps a value that needed no repair.
    #[must_use]
    pub const fn clean(value: T) -> Self {
        Self {
            value,
            discarded: Vec::new(),
        }
    }

    /// Wraps a fallback value chosen because the input was unusable.
    #[must_use]
    pub fn recovered(value: T, reason: impl Into<String>) -> Self {
        Self {
            value,
            discarded: vec![reason.into()],
        }
    }

    /// Returns `true` when any part of the input was discarded.
    #[must_use]
    pub fn was_corrupt(&self) -> bool {
        !self.discarded.is_empty()
    }

    /// Logs every discard reason under `context` and returns the value.
    pub fn into_logged(self, context: &str) -> T {
        for reason in &self.discarded {
            tracing::warn!(context = context, reason = %reason, "discarded malformed input");
        }
        self.value
    }
}
