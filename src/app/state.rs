//! View state and application state containers.
//!
//! [`ViewState`] owns everything that decides *which* items are on screen:
//! filter criteria, the requested page, the dataset and its fetch phase, the
//! selector option lists and the derived filtered list. It only changes
//! through named transitions, and each transition re-derives the filtered list
//! and clamps the page so the page is always within `1..=total_pages`.
//!
//! [`AppState`] wraps the view state with the persisted stores, the active
//! palette, keyboard focus and the in-page cursor, and turns all of it into a
//! [`UIViewModel`] on demand.
//!
//! # Example
//!
//! ```
//! use newsdesk::app::{AppState, FeedSettings};
//! use newsdesk::storage::MemoryStorage;
//!
//! let state = AppState::with_storage(
//!     FeedSettings::default(),
//!     Box::new(MemoryStorage::default()),
//!     Box::new(MemoryStorage::default()),
//! );
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.empty_state.is_some());
//! ```

use super::filter::{self, FilterCriteria};
use super::modes::{DatasetPhase, InputMode};
use super::pagination::{self, Page};
use crate::domain::{Dataset, Item};
use crate::storage::{AnnotationRecord, AnnotationStore, PreferenceStore, Storage};
use crate::ui::helpers::{strip_control, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    self, DisplayItem, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, PaginationInfo,
    SearchBarInfo, UIViewModel,
};
use chrono::{DateTime, Utc};
use std::num::NonZeroUsize;

/// Feed endpoint used when the plugin configuration names none.
pub const DEFAULT_FEED_URL: &str = "http://127.0.0.1:8080/api/top";
/// Requested item count when unconfigured.
pub const DEFAULT_TOP_N: u32 = 200;
/// Items per page when unconfigured.
pub const DEFAULT_PAGE_SIZE: usize = 50;
/// Numbered page buttons shown when unconfigured.
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 7;

/// Fetch and paging settings taken from the plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    /// Base URL of the feed endpoint, without the `top` parameter.
    pub feed_url: String,
    /// Number of items requested from the endpoint.
    pub top_n: u32,
    /// Items per page.
    pub page_size: NonZeroUsize,
    /// Upper bound on numbered page buttons.
    pub max_visible_pages: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            top_n: DEFAULT_TOP_N,
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
        }
    }
}

/// Filter, paging and dataset state.
#[derive(Debug, Clone)]
pub struct ViewState {
    criteria: FilterCriteria,
    page: usize,
    page_size: NonZeroUsize,
    dataset: Option<Dataset>,
    phase: DatasetPhase,
    sources: Vec<String>,
    topics: Vec<String>,
    filtered: Vec<Item>,
}

impl ViewState {
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            page: 1,
            page_size,
            dataset: None,
            phase: DatasetPhase::Empty,
            sources: vec![],
            topics: vec![],
            filtered: vec![],
        }
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The stored, already clamped, 1-based page.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    #[must_use]
    pub const fn phase(&self) -> &DatasetPhase {
        &self.phase
    }

    #[must_use]
    pub const fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Source selector options, without the leading "All".
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Topic selector options, without the leading "All".
    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Items passing the current criteria, in dataset order.
    #[must_use]
    pub fn filtered(&self) -> &[Item] {
        &self.filtered
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.filtered.len(), self.page_size)
    }

    pub fn set_query(&mut self, query: impl Into<String>, annotations: &AnnotationRecord) {
        self.criteria.query = query.into();
        self.reset_page(annotations);
    }

    pub fn set_source(&mut self, source: Option<String>, annotations: &AnnotationRecord) {
        self.criteria.source = source;
        self.reset_page(annotations);
    }

    pub fn set_topic(&mut self, topic: Option<String>, annotations: &AnnotationRecord) {
        self.criteria.topic = topic;
        self.reset_page(annotations);
    }

    pub fn set_hide_read(&mut self, hide_read: bool, annotations: &AnnotationRecord) {
        self.criteria.hide_read = hide_read;
        self.reset_page(annotations);
    }

    pub fn set_star_only(&mut self, star_only: bool, annotations: &AnnotationRecord) {
        self.criteria.star_only = star_only;
        self.reset_page(annotations);
    }

    /// Stores the clamped page. Criteria are left alone.
    ///
    /// Returns the page actually stored.
    pub fn request_page(&mut self, requested: i64) -> usize {
        self.page = pagination::clamp_page(requested, self.total_pages());
        tracing::debug!(requested, page = self.page, "page requested");
        self.page
    }

    /// Marks a fetch as in flight. The current dataset stays visible and any
    /// previous failure is replaced.
    pub fn begin_fetch(&mut self) {
        self.phase = DatasetPhase::Loading;
    }

    /// Replaces the dataset wholesale with a fetched snapshot.
    ///
    /// Criteria survive the swap, the page goes back to 1.
    pub fn resolve_fetch(
        &mut self,
        items: Vec<Item>,
        fetched_at: DateTime<Utc>,
        annotations: &AnnotationRecord,
    ) {
        self.sources = filter::distinct_sources(&items);
        self.topics = filter::distinct_topics(&items);
        self.dataset = Some(Dataset::new(items, fetched_at));
        self.phase = DatasetPhase::Loaded;
        self.reset_page(annotations);
    }

    /// Discards the dataset and records a user-visible failure.
    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        self.dataset = None;
        self.sources.clear();
        self.topics.clear();
        self.filtered.clear();
        self.phase = DatasetPhase::Failed {
            message: message.into(),
        };
        self.page = 1;
    }

    /// Re-runs the filter engine and clamps the page to the new page count.
    ///
    /// Called after every transition, annotation toggles included.
    pub fn refresh(&mut self, annotations: &AnnotationRecord) {
        self.filtered = match &self.dataset {
            Some(dataset) => filter::apply(&dataset.items, &self.criteria, annotations)
                .into_iter()
                .cloned()
                .collect(),
            None => vec![],
        };
        self.page = pagination::clamp_page(i64::try_from(self.page).unwrap_or(i64::MAX), self.total_pages());
    }

    /// The page currently on screen.
    #[must_use]
    pub fn current_page(&self) -> Page<'_, Item> {
        pagination::paginate(
            &self.filtered,
            self.page_size,
            i64::try_from(self.page).unwrap_or(i64::MAX),
        )
    }

    fn reset_page(&mut self, annotations: &AnnotationRecord) {
        self.page = 1;
        self.refresh(annotations);
    }
}

/// Central application state container.
///
/// Mutated only by the event handler. Not `Clone`: the stores own their
/// storage handles.
#[derive(Debug)]
pub struct AppState {
    /// Filter, page and dataset state.
    pub view: ViewState,

    /// Read/star flags, persisted on every toggle.
    pub annotations: AnnotationStore,

    /// Persisted light/dark preference.
    pub preferences: PreferenceStore,

    /// Palette matching `preferences`.
    pub theme: Theme,

    /// Which widget has keyboard focus.
    pub input_mode: InputMode,

    /// Zero-based cursor within the current page.
    ///
    /// Clamped after every re-derive, wraps during `j`/`k` navigation.
    pub selected_index: usize,

    pub settings: FeedSettings,

    next_request_id: u64,
}

impl AppState {
    /// Creates the state from already-loaded stores.
    #[must_use]
    pub fn new(
        settings: FeedSettings,
        annotations: AnnotationStore,
        preferences: PreferenceStore,
        theme: Theme,
    ) -> Self {
        Self {
            view: ViewState::new(settings.page_size),
            annotations,
            preferences,
            theme,
            input_mode: InputMode::Normal,
            selected_index: 0,
            settings,
            next_request_id: 1,
        }
    }

    /// Loads both stores from their backends and picks the matching palette.
    ///
    /// # Parameters
    ///
    /// * `settings` - Feed and paging settings
    /// * `annotation_storage` - Backend holding the `annotations` slot
    /// * `preference_storage` - Backend holding the `theme` slot
    ///
    /// Never fails: corrupt slots and palette errors fall back to defaults.
    #[must_use]
    pub fn with_storage(
        settings: FeedSettings,
        annotation_storage: Box<dyn Storage>,
        preference_storage: Box<dyn Storage>,
    ) -> Self {
        let annotations = AnnotationStore::load(annotation_storage);
        let preferences = PreferenceStore::load(preference_storage);
        let theme = Theme::from_preference(preferences.theme()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default theme");
            Theme::default()
        });
        Self::new(settings, annotations, preferences, theme)
    }

    /// Returns a fresh id for the next fetch, used only for log correlation.
    pub fn next_request_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Re-derives the view after annotation or criteria changes.
    pub fn refresh_view(&mut self) {
        self.view.refresh(self.annotations.record());
        self.clamp_selection();
    }

    /// Items on the page currently shown.
    #[must_use]
    pub fn page_items(&self) -> &[Item] {
        self.view.current_page().page_items
    }

    /// Moves the cursor down within the page, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.page_items().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the cursor up within the page, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.page_items().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&Item> {
        self.page_items().get(self.selected_index)
    }

    /// Keeps the cursor on an existing row of the current page.
    pub fn clamp_selection(&mut self) {
        let len = self.page_items().len();
        self.selected_index = if len == 0 { 0 } else { self.selected_index.min(len - 1) };
    }

    /// Computes a renderable view model for the given pane size.
    ///
    /// # Windowing
    ///
    /// When the page has more rows than fit, the visible window is centred on
    /// the cursor and pushed back from the page end so it stays full.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let page = self.view.current_page();
        let available_rows = self.calculate_available_rows(rows).max(1);
        let len = page.page_items.len();

        let cursor = self.selected_index.min(len.saturating_sub(1));
        let mut visible_start = cursor.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(len);
        if visible_end - visible_start < available_rows && len >= available_rows {
            visible_start = visible_end - available_rows;
        }

        let title_width = viewmodel::title_width(cols);
        let display_items = page.page_items[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, item)| self.compute_display_item(item, visible_start + offset, title_width))
            .collect();

        UIViewModel {
            header: self.compute_header(),
            filter_bar: self.compute_filter_bar(),
            search_bar: self.compute_search_bar(),
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            pagination: self.compute_pagination(&page),
            footer: self.compute_footer(),
            empty_state: self.compute_empty_state(),
        }
    }

    fn compute_display_item(&self, item: &Item, index: usize, title_width: usize) -> DisplayItem {
        let title = truncate(&strip_control(&item.title), title_width);
        let highlight_ranges = filter::query_match_ranges(&title, &self.view.criteria().query);

        DisplayItem {
            title,
            source: truncate(&strip_control(&item.feed_title), viewmodel::SOURCE_WIDTH),
            published: item
                .published_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            is_selected: index == self.selected_index,
            is_read: self.annotations.is_read(&item.id),
            is_starred: self.annotations.is_starred(&item.id),
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let shown = self.view.filtered().len();
        let total = self.view.dataset().map_or(0, |d| d.items.len());

        let status = match (self.view.phase(), self.view.dataset()) {
            (DatasetPhase::Loading, _) => "loading…".to_string(),
            (DatasetPhase::Failed { .. }, _) => "fetch failed".to_string(),
            (DatasetPhase::Loaded, Some(dataset)) => {
                format!("updated {} UTC", dataset.fetched_at.format("%H:%M"))
            }
            _ => "not loaded".to_string(),
        };

        HeaderInfo {
            title: format!(" Newsdesk ({shown}/{total}) "),
            status,
        }
    }

    fn compute_filter_bar(&self) -> FilterBarInfo {
        let criteria = self.view.criteria();
        FilterBarInfo {
            source: criteria.source.as_deref().map_or_else(|| "All".to_string(), strip_control),
            topic: criteria.topic.as_deref().map_or_else(|| "All".to_string(), strip_control),
            hide_read: criteria.hide_read,
            star_only: criteria.star_only,
        }
    }

    /// The search box is shown while focused or while a query is active.
    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        let query = &self.view.criteria().query;
        let focused = self.input_mode == InputMode::Search;
        if focused || !query.is_empty() {
            Some(SearchBarInfo {
                query: query.clone(),
                focused,
            })
        } else {
            None
        }
    }

    fn compute_pagination(&self, page: &Page<'_, Item>) -> PaginationInfo {
        let total_items = self.view.filtered().len();
        let showing = if page.page_items.is_empty() {
            format!("0 of {total_items}")
        } else {
            let first = (page.current_page - 1) * self.view.page_size().get() + 1;
            let last = first + page.page_items.len() - 1;
            format!("{first}-{last} of {total_items}")
        };

        PaginationInfo {
            controls: pagination::page_buttons(page.total_pages, page.current_page, self.settings.max_visible_pages),
            showing,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search => "Type to filter  Backspace: delete  Enter: results  Esc: clear".to_string(),
            InputMode::Normal => {
                "j/k: move  h/l: page  /: search  f/t: source/topic  u: hide read  m: starred  r/s: mark  Enter: open  R: refresh  d: theme  q: quit"
                    .to_string()
            }
        };

        FooterInfo { keybindings }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.view.filtered().is_empty() {
            return None;
        }

        let (message, subtitle, is_error) = match (self.view.phase(), self.view.dataset()) {
            (DatasetPhase::Failed { message }, _) => (
                "Could not load the feed".to_string(),
                format!("{}  (R: retry)", strip_control(message)),
                true,
            ),
            (DatasetPhase::Loading, None) => (
                "Loading…".to_string(),
                format!("Fetching {}", self.settings.feed_url),
                false,
            ),
            (DatasetPhase::Empty, _) => (
                "Nothing loaded yet".to_string(),
                "Press R to fetch the feed".to_string(),
                false,
            ),
            (_, Some(dataset)) if dataset.items.is_empty() => (
                "The feed returned no items".to_string(),
                "Press R to refresh".to_string(),
                false,
            ),
            _ => (
                "No items match the current filters".to_string(),
                "Esc clears the query, f/t cycle source and topic, u/m toggle flags".to_string(),
                false,
            ),
        };

        Some(EmptyState {
            message,
            subtitle,
            is_error,
        })
    }

    /// Rows left for table rows after the fixed chrome.
    fn calculate_available_rows(&self, total_rows: usize) -> usize {
        let search_rows = if self.compute_search_bar().is_some() {
            viewmodel::SEARCH_BAR_ROWS
        } else {
            0
        };
        total_rows.saturating_sub(viewmodel::CHROME_ROWS + search_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn items(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| {
                let feed = if i % 2 == 0 { "Reuters" } else { "AP" };
                Item::new(format!("id-{i}"), format!("Story {i}"), format!("https://x.example/{i}"), feed, vec![])
            })
            .collect()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    fn state() -> AppState {
        AppState::with_storage(
            FeedSettings::default(),
            Box::new(MemoryStorage::default()),
            Box::new(MemoryStorage::default()),
        )
    }

    #[test]
    fn setters_reset_page_and_keep_it_in_range() {
        let empty = AnnotationRecord::default();
        let mut view = ViewState::new(NonZeroUsize::new(50).unwrap());
        view.resolve_fetch(items(120), now(), &empty);

        assert_eq!(view.request_page(3), 3);
        view.set_query("story", &empty);
        assert_eq!(view.page(), 1);

        view.request_page(3);
        view.set_source(Some("AP".into()), &empty);
        assert_eq!(view.page(), 1);
        assert_eq!(view.filtered().len(), 60);
        assert_eq!(view.total_pages(), 2);
    }

    #[test]
    fn request_page_clamps_without_touching_criteria() {
        let empty = AnnotationRecord::default();
        let mut view = ViewState::new(NonZeroUsize::new(50).unwrap());
        view.resolve_fetch(items(120), now(), &empty);
        view.set_hide_read(true, &empty);

        assert_eq!(view.request_page(5), 3);
        assert_eq!(view.current_page().page_items.len(), 20);
        assert!(view.criteria().hide_read);
    }

    #[test]
    fn refresh_clamps_page_when_list_shrinks() {
        let mut annotations = AnnotationRecord::default();
        let mut view = ViewState::new(NonZeroUsize::new(10).unwrap());
        view.resolve_fetch(items(30), now(), &annotations);
        view.set_hide_read(true, &annotations);
        view.request_page(3);

        for i in 10..30 {
            annotations.read.insert(format!("id-{i}"), true);
        }
        view.refresh(&annotations);

        assert_eq!(view.page(), 1);
        assert_eq!(view.total_pages(), 1);
    }

    #[test]
    fn resolve_builds_options_and_keeps_criteria() {
        let empty = AnnotationRecord::default();
        let mut view = ViewState::new(NonZeroUsize::new(50).unwrap());
        view.set_source(Some("AP".into()), &empty);

        view.resolve_fetch(items(4), now(), &empty);

        assert_eq!(view.sources(), &["AP".to_string(), "Reuters".to_string()]);
        assert_eq!(view.criteria().source.as_deref(), Some("AP"));
        assert_eq!(view.filtered().len(), 2);
        assert_eq!(view.phase(), &DatasetPhase::Loaded);
    }

    #[test]
    fn loading_keeps_previous_dataset_and_failure_discards_it() {
        let empty = AnnotationRecord::default();
        let mut view = ViewState::new(NonZeroUsize::new(50).unwrap());
        view.resolve_fetch(items(3), now(), &empty);

        view.begin_fetch();
        assert!(view.phase().is_loading());
        assert_eq!(view.filtered().len(), 3);

        view.fail_fetch("HTTP 500");
        assert!(view.dataset().is_none());
        assert!(view.sources().is_empty());
        assert!(view.filtered().is_empty());
        assert_eq!(view.page(), 1);
        assert_eq!(view.phase(), &DatasetPhase::Failed { message: "HTTP 500".into() });
    }

    #[test]
    fn selection_wraps_within_page() {
        let mut state = state();
        let annotations = state.annotations.record().clone();
        state.view.resolve_fetch(items(3), now(), &annotations);

        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_item().map(|i| i.id.as_str()), Some("id-0"));
    }

    #[test]
    fn viewmodel_windows_around_cursor() {
        let mut state = state();
        let annotations = state.annotations.record().clone();
        state.view.resolve_fetch(items(40), now(), &annotations);
        state.selected_index = 39;

        let vm = state.compute_viewmodel(20, 100);

        let available = 20 - viewmodel::CHROME_ROWS;
        assert_eq!(vm.display_items.len(), available);
        assert_eq!(vm.selected_index, available - 1);
        assert!(vm.display_items[vm.selected_index].is_selected);
        assert_eq!(vm.pagination.showing, "1-40 of 40");
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn viewmodel_reports_failure_message() {
        let mut state = state();
        state.view.fail_fetch("rate limited");

        let vm = state.compute_viewmodel(24, 80);

        let empty = vm.empty_state.unwrap();
        assert!(empty.is_error);
        assert!(empty.subtitle.starts_with("rate limited"));
        assert_eq!(vm.header.status, "fetch failed");
    }

    #[test]
    fn viewmodel_marks_annotations_and_highlights_query() {
        let mut state = state();
        state.annotations.toggle_star("id-1").unwrap();
        let annotations = state.annotations.record().clone();
        state.view.resolve_fetch(items(2), now(), &annotations);
        state.view.set_query("story 1", &annotations);

        let vm = state.compute_viewmodel(24, 100);

        assert_eq!(vm.display_items.len(), 1);
        assert!(vm.display_items[0].is_starred);
        assert!(!vm.display_items[0].is_read);
        assert_eq!(vm.display_items[0].highlight_ranges, vec![(0, 7)]);
        assert!(vm.search_bar.is_some());
    }
}
