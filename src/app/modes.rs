//! Input mode and dataset lifecycle state types.
//!
//! # State Machine
//!
//! Input focus alternates between two modes:
//! - **Normal**: single-key commands over the result list
//! - **Search**: keystrokes edit the free-text query
//!
//! The dataset moves through [`DatasetPhase`]:
//!
//! ```text
//! Empty ──fetch──▶ Loading ──ok──▶ Loaded ──fetch──▶ Loading ...
//!                     │
//!                     └──err──▶ Failed ──fetch──▶ Loading ...
//! ```

/// Which widget has keyboard focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Result list focus. Keys are commands (j/k, r, s, f, ...).
    #[default]
    Normal,

    /// Query input focus. Printable keys are appended to the query.
    Search,
}

/// Where the dataset is in its fetch lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatasetPhase {
    /// Nothing fetched yet.
    #[default]
    Empty,

    /// A fetch is in flight. Any previous dataset is still shown.
    Loading,

    /// The last settled fetch succeeded.
    Loaded,

    /// The last settled fetch failed with this user-visible message.
    Failed {
        message: String,
    },
}

impl DatasetPhase {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}
