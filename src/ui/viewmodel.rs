//! View model types representing renderable UI state.
//!
//! View models are created by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They carry display-ready strings and flags only: remote text
//! is already stripped of control characters and truncated to its column.

use crate::app::pagination::PageControls;

/// Rows taken by fixed chrome: top blank, header, border, filter bar, table
/// header, pagination row, border, footer and the bottom blank.
pub const CHROME_ROWS: usize = 9;
/// Extra rows taken by the search box when it is shown.
pub const SEARCH_BAR_ROWS: usize = 3;

/// Read/star badge column.
pub const BADGE_WIDTH: usize = 4;
/// Source label column.
pub const SOURCE_WIDTH: usize = 18;
/// Publication date column (`YYYY-MM-DD`).
pub const DATE_WIDTH: usize = 10;

/// Width left for the title column after the fixed columns and separators.
#[must_use]
pub const fn title_width(cols: usize) -> usize {
    cols.saturating_sub(BADGE_WIDTH + SOURCE_WIDTH + DATE_WIDTH + 2)
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    pub filter_bar: FilterBarInfo,

    /// Shown while the query has focus or is non-empty.
    pub search_bar: Option<SearchBarInfo>,

    /// Rows of the current page inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the cursor row within `display_items`.
    pub selected_index: usize,

    pub pagination: PaginationInfo,

    pub footer: FooterInfo,

    /// Replaces the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub title: String,
    pub source: String,
    /// `YYYY-MM-DD`, empty when unknown.
    pub published: String,
    pub is_selected: bool,
    pub is_read: bool,
    pub is_starred: bool,
    /// Query matches in `title` as `(start, end)` char indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title with the shown/total counts.
    pub title: String,
    /// Fetch status: loading, failed or the last update time.
    pub status: String,
}

/// Current selector values and flag toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarInfo {
    pub source: String,
    pub topic: String,
    pub hide_read: bool,
    pub star_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Whether keystrokes currently go to the query.
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    pub controls: PageControls,
    /// Range line such as `51-100 of 120`.
    pub showing: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Message shown in place of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
    /// Drawn in the error colour when set.
    pub is_error: bool,
}
