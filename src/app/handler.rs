//! Event handling and state transition logic.
//!
//! Every user intent and every fetch outcome arrives as an [`Event`].
//! [`handle_event`] applies the matching transition to [`AppState`] and
//! returns whether the pane needs a redraw plus the [`Action`]s to execute.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `NextPage`, `PrevPage`, `PageRequested`
//! - **Query**: `FocusSearch`, `FocusResults`, `Char`, `Backspace`, `QueryChanged`, `ClearQuery`
//! - **Filters**: `FilterChanged`, `CycleSource`, `CycleTopic`
//! - **Annotations**: `ToggleRead`, `ToggleStar`
//! - **Fetch**: `FetchRequested`, `FetchResolved`, `FetchFailed`
//! - **Other**: `OpenSelected`, `ToggleTheme`, `CloseFocus`
//!
//! # Page Rules
//!
//! Any criteria change resets the page to 1. Page requests never touch the
//! criteria. Annotation toggles keep both the page and the criteria.
//!
//! # Example
//!
//! ```
//! use newsdesk::app::{handle_event, AppState, Event, FeedSettings};
//! use newsdesk::storage::MemoryStorage;
//!
//! let mut state = AppState::with_storage(
//!     FeedSettings::default(),
//!     Box::new(MemoryStorage::default()),
//!     Box::new(MemoryStorage::default()),
//! );
//! let (render, actions) = handle_event(&mut state, &Event::FetchRequested)?;
//! assert!(render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), newsdesk::NewsdeskError>(())
//! ```

use super::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::Item;
use crate::fetch::{self, FetchRequest};
use crate::ui::theme::Theme;
use chrono::{DateTime, Utc};

/// A single filter criterion change.
///
/// `None` stands for the "All" choice of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Source(Option<String>),
    Topic(Option<String>),
    HideRead(bool),
    StarOnly(bool),
}

/// Events triggered by user input or by a settled fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor down (wraps to top of the page).
    KeyDown,
    /// Moves the cursor up (wraps to bottom of the page).
    KeyUp,
    /// Shows the following page, if any.
    NextPage,
    /// Shows the preceding page, if any.
    PrevPage,
    /// Shows page `n`, clamped into range.
    PageRequested(i64),

    /// Gives the query input keyboard focus.
    FocusSearch,
    /// Returns keyboard focus to the result list, keeping the query.
    FocusResults,
    /// Empties the query and returns focus to the result list.
    ClearQuery,
    /// Appends a character to the query (search mode only).
    Char(char),
    /// Removes the last query character (search mode only).
    Backspace,
    /// Replaces the whole query.
    QueryChanged(String),

    /// Sets one filter criterion.
    FilterChanged(FilterChange),
    /// Selects the next or previous source option, wrapping through "All".
    CycleSource { forward: bool },
    /// Selects the next or previous topic option, wrapping through "All".
    CycleTopic { forward: bool },

    /// Flips the read flag of an item.
    ToggleRead(String),
    /// Flips the star flag of an item.
    ToggleStar(String),
    /// Opens the link of the item under the cursor.
    OpenSelected,

    /// Flips between the light and dark palettes.
    ToggleTheme,
    /// Closes the floating pane.
    CloseFocus,

    /// Starts a new fetch. Does not cancel one already in flight.
    FetchRequested,
    /// A fetch succeeded with this snapshot.
    FetchResolved {
        items: Vec<Item>,
        fetched_at: DateTime<Utc>,
    },
    /// A fetch failed with this user-visible message.
    FetchFailed { message: String },
}

impl Event {
    /// Converts a raw web request result into the matching fetch event.
    ///
    /// # Example
    ///
    /// ```
    /// use newsdesk::app::Event;
    ///
    /// let event = Event::from_fetch_result(429, br#"{"error":"rate limited"}"#, chrono::Utc::now());
    /// assert_eq!(event, Event::FetchFailed { message: "rate limited".into() });
    /// ```
    #[must_use]
    pub fn from_fetch_result(status: u16, body: &[u8], fetched_at: DateTime<Utc>) -> Self {
        match fetch::decode_response(status, body) {
            Ok(decoded) => Self::FetchResolved {
                items: fetch::into_items(decoded),
                fetched_at,
            },
            Err(e) => Self::FetchFailed {
                message: e.to_string(),
            },
        }
    }

    /// Short variant name for span fields. Avoids dumping whole datasets.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::KeyDown => "KeyDown",
            Self::KeyUp => "KeyUp",
            Self::NextPage => "NextPage",
            Self::PrevPage => "PrevPage",
            Self::PageRequested(_) => "PageRequested",
            Self::FocusSearch => "FocusSearch",
            Self::FocusResults => "FocusResults",
            Self::ClearQuery => "ClearQuery",
            Self::Char(_) => "Char",
            Self::Backspace => "Backspace",
            Self::QueryChanged(_) => "QueryChanged",
            Self::FilterChanged(_) => "FilterChanged",
            Self::CycleSource { .. } => "CycleSource",
            Self::CycleTopic { .. } => "CycleTopic",
            Self::ToggleRead(_) => "ToggleRead",
            Self::ToggleStar(_) => "ToggleStar",
            Self::OpenSelected => "OpenSelected",
            Self::ToggleTheme => "ToggleTheme",
            Self::CloseFocus => "CloseFocus",
            Self::FetchRequested => "FetchRequested",
            Self::FetchResolved { .. } => "FetchResolved",
            Self::FetchFailed { .. } => "FetchFailed",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// `(needs_render, actions)`. Actions are executed in order by the plugin shim.
///
/// # Errors
///
/// Returns an error when persisting an annotation or the theme fails. The
/// in-memory change is kept and the view is already re-derived, so callers
/// should still redraw.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.kind()).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::NextPage => {
            let next = to_i64(state.view.page()).saturating_add(1);
            Ok((change_page(state, next), vec![]))
        }
        Event::PrevPage => {
            let previous = to_i64(state.view.page()).saturating_sub(1);
            Ok((change_page(state, previous), vec![]))
        }
        Event::PageRequested(page) => Ok((change_page(state, *page), vec![])),

        Event::FocusSearch => {
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::ClearQuery => {
            state.input_mode = InputMode::Normal;
            set_query(state, String::new());
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            let mut query = state.view.criteria().query.clone();
            query.push(*c);
            tracing::trace!(query = %query, "query updated");
            set_query(state, query);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            let mut query = state.view.criteria().query.clone();
            if query.pop().is_none() {
                return Ok((false, vec![]));
            }
            set_query(state, query);
            Ok((true, vec![]))
        }
        Event::QueryChanged(query) => {
            set_query(state, query.clone());
            Ok((true, vec![]))
        }

        Event::FilterChanged(change) => {
            apply_filter_change(state, change.clone());
            Ok((true, vec![]))
        }
        Event::CycleSource { forward } => {
            let next = cycle(state.view.sources(), state.view.criteria().source.as_deref(), *forward);
            apply_filter_change(state, FilterChange::Source(next));
            Ok((true, vec![]))
        }
        Event::CycleTopic { forward } => {
            let next = cycle(state.view.topics(), state.view.criteria().topic.as_deref(), *forward);
            apply_filter_change(state, FilterChange::Topic(next));
            Ok((true, vec![]))
        }

        Event::ToggleRead(id) => {
            let result = state.annotations.toggle_read(id);
            state.refresh_view();
            if let Err(e) = &result {
                tracing::error!(item_id = %id, error = %e, "failed to persist read flag");
            }
            result?;
            Ok((true, vec![]))
        }
        Event::ToggleStar(id) => {
            let result = state.annotations.toggle_star(id);
            state.refresh_view();
            if let Err(e) = &result {
                tracing::error!(item_id = %id, error = %e, "failed to persist star flag");
            }
            result?;
            Ok((true, vec![]))
        }
        Event::OpenSelected => {
            let Some(item) = state.selected_item() else {
                tracing::debug!("no item selected");
                return Ok((false, vec![]));
            };
            if item.url.is_empty() {
                tracing::debug!(item_id = %item.id, "selected item has no link");
                return Ok((false, vec![]));
            }
            tracing::debug!(item_id = %item.id, url = %item.url, "opening link");
            Ok((false, vec![Action::OpenUrl { url: item.url.clone() }]))
        }

        Event::ToggleTheme => {
            let preference = state.preferences.theme().toggled();
            state.theme = Theme::from_preference(preference)?;
            if let Err(e) = state.preferences.toggle_theme() {
                tracing::error!(error = %e, "failed to persist theme preference");
                return Err(e);
            }
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::FetchRequested => {
            let request_id = state.next_request_id();
            match FetchRequest::new(&state.settings.feed_url, state.settings.top_n, request_id) {
                Ok(request) => {
                    tracing::info!(request_id, url = %request.url, "fetch requested");
                    state.view.begin_fetch();
                    Ok((true, vec![Action::Fetch(request)]))
                }
                Err(e) => {
                    tracing::error!(request_id, error = %e, "cannot build fetch request");
                    state.view.fail_fetch(e.to_string());
                    state.selected_index = 0;
                    Ok((true, vec![]))
                }
            }
        }
        Event::FetchResolved { items, fetched_at } => {
            tracing::info!(item_count = items.len(), "fetch resolved");
            state.view.resolve_fetch(items.clone(), *fetched_at, state.annotations.record());
            state.selected_index = 0;
            Ok((true, vec![]))
        }
        Event::FetchFailed { message } => {
            tracing::warn!(message = %message, "fetch failed");
            state.view.fail_fetch(message.clone());
            state.selected_index = 0;
            Ok((true, vec![]))
        }
    }
}

fn set_query(state: &mut AppState, query: String) {
    state.view.set_query(query, state.annotations.record());
    state.selected_index = 0;
}

fn apply_filter_change(state: &mut AppState, change: FilterChange) {
    tracing::debug!(change = ?change, "filter changed");
    let annotations = state.annotations.record();
    match change {
        FilterChange::Source(source) => state.view.set_source(source, annotations),
        FilterChange::Topic(topic) => state.view.set_topic(topic, annotations),
        FilterChange::HideRead(hide_read) => state.view.set_hide_read(hide_read, annotations),
        FilterChange::StarOnly(star_only) => state.view.set_star_only(star_only, annotations),
    }
    state.selected_index = 0;
}

/// Returns `true` when the shown page actually changed.
fn change_page(state: &mut AppState, requested: i64) -> bool {
    let before = state.view.page();
    let after = state.view.request_page(requested);
    if after == before {
        return false;
    }
    state.selected_index = 0;
    true
}

/// Steps through `[All, options...]`. A selection missing from `options`
/// counts as "All".
fn cycle(options: &[String], current: Option<&str>, forward: bool) -> Option<String> {
    let len = options.len() + 1;
    let index = current
        .and_then(|value| options.iter().position(|option| option == value))
        .map_or(0, |position| position + 1);

    let next = if forward { (index + 1) % len } else { (index + len - 1) % len };

    if next == 0 {
        None
    } else {
        Some(options[next - 1].clone())
    }
}

fn to_i64(page: usize) -> i64 {
    i64::try_from(page).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::FeedSettings;
    use crate::app::filter::FilterCriteria;
    use crate::app::DatasetPhase;
    use crate::storage::{MemoryStorage, Storage};
    use crate::NewsdeskError;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn item(i: usize, feed: &str, tags: &[&str]) -> Item {
        Item::new(
            format!("id-{i}"),
            format!("Story {i}"),
            format!("https://news.example/{i}"),
            feed,
            tags.iter().map(|t| (*t).to_string()).collect(),
        )
    }

    fn dataset(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| item(i, if i % 3 == 0 { "Reuters" } else { "AP" }, &["world"]))
            .collect()
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    fn state() -> AppState {
        AppState::with_storage(
            FeedSettings::default(),
            Box::new(MemoryStorage::default()),
            Box::new(MemoryStorage::default()),
        )
    }

    fn loaded(count: usize) -> AppState {
        let mut state = state();
        handle_event(&mut state, &Event::FetchResolved { items: dataset(count), fetched_at: at(9) }).unwrap();
        state
    }

    #[test]
    fn filter_changes_reset_page_to_one() {
        let mut state = loaded(120);

        handle_event(&mut state, &Event::PageRequested(2)).unwrap();
        assert_eq!(state.view.page(), 2);
        handle_event(&mut state, &Event::FilterChanged(FilterChange::HideRead(true))).unwrap();
        assert_eq!(state.view.page(), 1);

        handle_event(&mut state, &Event::PageRequested(2)).unwrap();
        handle_event(&mut state, &Event::QueryChanged("story".into())).unwrap();
        assert_eq!(state.view.page(), 1);

        handle_event(&mut state, &Event::PageRequested(2)).unwrap();
        handle_event(&mut state, &Event::CycleTopic { forward: true }).unwrap();
        assert_eq!(state.view.criteria().topic.as_deref(), Some("world"));
        assert_eq!(state.view.page(), 1);
    }

    #[test]
    fn page_requests_clamp_and_leave_criteria() {
        let mut state = loaded(120);
        handle_event(&mut state, &Event::FilterChanged(FilterChange::StarOnly(false))).unwrap();

        handle_event(&mut state, &Event::PageRequested(5)).unwrap();
        assert_eq!(state.view.page(), 3);
        assert_eq!(state.page_items().len(), 20);

        let (render, _) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(!render);
        handle_event(&mut state, &Event::PrevPage).unwrap();
        assert_eq!(state.view.page(), 2);
        assert_eq!(state.view.criteria(), &FilterCriteria::default());
    }

    #[test]
    fn toggles_keep_page_and_criteria() {
        let mut state = loaded(120);
        handle_event(&mut state, &Event::PageRequested(2)).unwrap();
        state.selected_index = 4;

        handle_event(&mut state, &Event::ToggleRead("id-60".into())).unwrap();
        handle_event(&mut state, &Event::ToggleStar("id-61".into())).unwrap();

        assert_eq!(state.view.page(), 2);
        assert_eq!(state.selected_index, 4);
        assert!(state.annotations.is_read("id-60"));
        assert!(state.annotations.is_starred("id-61"));
    }

    #[test]
    fn toggle_read_under_hide_read_removes_item_and_clamps_page() {
        let mut state = state();
        handle_event(&mut state, &Event::FetchResolved { items: dataset(51), fetched_at: at(9) }).unwrap();
        handle_event(&mut state, &Event::FilterChanged(FilterChange::HideRead(true))).unwrap();
        handle_event(&mut state, &Event::PageRequested(2)).unwrap();
        assert_eq!(state.page_items().len(), 1);

        handle_event(&mut state, &Event::ToggleRead("id-50".into())).unwrap();

        assert_eq!(state.view.filtered().len(), 50);
        assert_eq!(state.view.page(), 1);
    }

    #[test]
    fn fetch_results_apply_last_writer_wins() {
        let mut state = state();

        let (_, first) = handle_event(&mut state, &Event::FetchRequested).unwrap();
        let (_, second) = handle_event(&mut state, &Event::FetchRequested).unwrap();
        let ids: Vec<u64> = first
            .iter()
            .chain(second.iter())
            .filter_map(|action| match action {
                Action::Fetch(request) => Some(request.request_id),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(state.view.phase().is_loading());

        handle_event(&mut state, &Event::FetchResolved { items: dataset(2), fetched_at: at(10) }).unwrap();
        handle_event(&mut state, &Event::FetchResolved { items: dataset(5), fetched_at: at(9) }).unwrap();

        let dataset = state.view.dataset().unwrap();
        assert_eq!(dataset.items.len(), 5);
        assert_eq!(dataset.fetched_at, at(9));
    }

    #[test]
    fn failure_discards_dataset_and_options() {
        let mut state = loaded(10);
        handle_event(&mut state, &Event::FilterChanged(FilterChange::Source(Some("AP".into())))).unwrap();

        handle_event(&mut state, &Event::FetchFailed { message: "rate limited".into() }).unwrap();

        assert!(state.view.dataset().is_none());
        assert!(state.view.sources().is_empty());
        assert!(state.page_items().is_empty());
        assert_eq!(state.view.phase(), &DatasetPhase::Failed { message: "rate limited".into() });
        assert_eq!(state.view.criteria().source.as_deref(), Some("AP"));
    }

    #[test]
    fn refetch_after_failure_replaces_error_with_loading() {
        let mut state = state();
        handle_event(&mut state, &Event::FetchFailed { message: "rate limited".into() }).unwrap();
        assert!(state.compute_viewmodel(24, 100).empty_state.is_some_and(|e| e.is_error));

        let (render, actions) = handle_event(&mut state, &Event::FetchRequested).unwrap();

        assert!(render);
        assert_eq!(actions.len(), 1);
        assert!(state.view.phase().is_loading());
        let empty = state.compute_viewmodel(24, 100).empty_state.unwrap();
        assert!(!empty.is_error);
        assert_eq!(empty.message, "Loading…");
    }

    #[test]
    fn invalid_feed_url_fails_immediately() {
        let mut state = AppState::with_storage(
            FeedSettings { feed_url: "not a url".into(), ..FeedSettings::default() },
            Box::new(MemoryStorage::default()),
            Box::new(MemoryStorage::default()),
        );

        let (render, actions) = handle_event(&mut state, &Event::FetchRequested).unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert!(matches!(state.view.phase(), DatasetPhase::Failed { .. }));
    }

    #[test]
    fn typing_only_edits_query_in_search_mode() {
        let mut state = loaded(5);

        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert_eq!(state.view.criteria().query, "");

        handle_event(&mut state, &Event::FocusSearch).unwrap();
        for c in "ap".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        handle_event(&mut state, &Event::Char('x')).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(state.view.criteria().query, "ap");

        handle_event(&mut state, &Event::FocusResults).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.view.criteria().query, "ap");

        handle_event(&mut state, &Event::ClearQuery).unwrap();
        assert_eq!(state.view.criteria().query, "");
    }

    #[test]
    fn source_cycle_wraps_through_all() {
        let mut state = loaded(6);
        assert_eq!(state.view.sources(), &["AP".to_string(), "Reuters".to_string()]);

        let mut seen = vec![];
        for _ in 0..3 {
            handle_event(&mut state, &Event::CycleSource { forward: true }).unwrap();
            seen.push(state.view.criteria().source.clone());
        }
        assert_eq!(seen, vec![Some("AP".to_string()), Some("Reuters".to_string()), None]);

        handle_event(&mut state, &Event::CycleSource { forward: false }).unwrap();
        assert_eq!(state.view.criteria().source.as_deref(), Some("Reuters"));
    }

    #[test]
    fn open_selected_emits_link() {
        let mut state = loaded(3);
        handle_event(&mut state, &Event::KeyDown).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::OpenSelected).unwrap();

        assert_eq!(actions, vec![Action::OpenUrl { url: "https://news.example/1".into() }]);
    }

    #[test]
    fn theme_toggle_swaps_palette_and_persists() {
        let mut state = state();
        let before = state.theme.name.clone();

        handle_event(&mut state, &Event::ToggleTheme).unwrap();

        assert_ne!(state.theme.name, before);
        assert_eq!(state.theme.name, state.preferences.theme().theme_name());
    }

    #[derive(Debug)]
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn read_slot(&self, _slot: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn write_slot(&mut self, slot: &str, _contents: &str) -> Result<()> {
            Err(NewsdeskError::Storage(format!("{slot} is read-only")))
        }
    }

    #[test]
    fn failed_save_keeps_in_memory_flip() {
        let mut state = AppState::with_storage(
            FeedSettings::default(),
            Box::new(ReadOnlyStorage),
            Box::new(MemoryStorage::default()),
        );

        let result = handle_event(&mut state, &Event::ToggleStar("x".into()));

        assert!(matches!(result, Err(NewsdeskError::Storage(_))));
        assert!(state.annotations.is_starred("x"));
    }
}
