//! Filter engine over the fetched dataset.
//!
//! Filtering is a pure, order-preserving pass: an item is kept only when it
//! satisfies every active criterion. The same module derives the option lists
//! for the source and topic selectors.
//!
//! # Predicate Order
//!
//! Checks short-circuit cheapest first:
//!
//! 1. source label equality
//! 2. topic membership
//! 3. hide-read
//! 4. star-only
//! 5. free-text query (case-insensitive substring)

use crate::domain::item::fold_case;
use crate::domain::Item;
use crate::storage::AnnotationRecord;
use std::cmp::Ordering;

/// The conjunctive set of active filter conditions.
///
/// Every field defaults to "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Free-text query. Matched after trimming and lowercasing.
    pub query: String,
    /// Exact source label, `None` for all sources.
    pub source: Option<String>,
    /// Exact tag, `None` for all topics.
    pub topic: Option<String>,
    /// Exclude items marked read.
    pub hide_read: bool,
    /// Keep only starred items.
    pub star_only: bool,
}

/// Converts a selector value to a criterion, treating `""` as "All".
///
/// # Examples
///
/// ```
/// use newsdesk::app::filter::selection;
///
/// assert_eq!(selection(""), None);
/// assert_eq!(selection("Reuters"), Some("Reuters".to_string()));
/// ```
#[must_use]
pub fn selection(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Returns `true` when `item` satisfies every criterion.
#[must_use]
pub fn matches(item: &Item, criteria: &FilterCriteria, annotations: &AnnotationRecord) -> bool {
    if criteria.source.as_ref().is_some_and(|source| &item.feed_title != source) {
        return false;
    }

    if criteria.topic.as_ref().is_some_and(|topic| !item.tags.contains(topic)) {
        return false;
    }

    if criteria.hide_read && annotations.is_read(&item.id) {
        return false;
    }

    if criteria.star_only && !annotations.is_starred(&item.id) {
        return false;
    }

    let query = criteria.query.trim();
    if !query.is_empty() && !item.search_text().contains(&fold_case(query)) {
        return false;
    }

    true
}

/// Returns the items matching `criteria`, in their original order.
#[must_use]
pub fn apply<'a>(items: &'a [Item], criteria: &FilterCriteria, annotations: &AnnotationRecord) -> Vec<&'a Item> {
    let _span = tracing::debug_span!("filter_apply",
        total_items = items.len(),
        query_len = criteria.query.len(),
        source = ?criteria.source,
        topic = ?criteria.topic,
        hide_read = criteria.hide_read,
        star_only = criteria.star_only
    ).entered();

    let filtered: Vec<&Item> = items
        .iter()
        .filter(|item| matches(item, criteria, annotations))
        .collect();

    tracing::debug!(filtered_count = filtered.len(), "filter applied");
    filtered
}

/// Distinct non-empty source labels, sorted for display.
#[must_use]
pub fn distinct_sources(items: &[Item]) -> Vec<String> {
    sorted_distinct(items.iter().map(|item| item.feed_title.as_str()))
}

/// Distinct tags across all items, sorted for display.
#[must_use]
pub fn distinct_topics(items: &[Item]) -> Vec<String> {
    sorted_distinct(items.iter().flat_map(|item| item.tags.iter().map(String::as_str)))
}

fn sorted_distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values.filter(|v| !v.is_empty()).map(str::to_string).collect();
    out.sort_by(|a, b| collate(a, b));
    out.dedup();
    out
}

/// Human-facing string order: case-folded first, exact order as tie-break.
///
/// Keeps "apple", "Banana" and "cherry" together regardless of case, which is
/// what a locale-aware comparison gives for plain labels.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Character ranges of every case-insensitive occurrence of `query` in `text`.
///
/// Ranges are `(start, end)` char indices into `text` with exclusive end,
/// suitable for highlighting. Folding is the same [`fold_case`] the filter
/// uses, so a highlighted run always corresponds to a filter hit. When a
/// match starts or ends inside a char that folds to several, the whole
/// original char is highlighted. An empty (or whitespace-only) query yields
/// no ranges.
#[must_use]
pub fn query_match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = fold_case(query.trim()).chars().collect();
    if needle.is_empty() {
        return vec![];
    }

    // Folded chars paired with the index of the original char they came from.
    let (hay, origin): (Vec<char>, Vec<usize>) = text
        .chars()
        .enumerate()
        .flat_map(|(i, c)| c.to_lowercase().map(move |l| (l, i)))
        .unzip();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    while start + needle.len() <= hay.len() {
        if hay[start..start + needle.len()] == needle[..] {
            let from = origin[start];
            let to = origin[start + needle.len() - 1] + 1;
            match ranges.last_mut() {
                Some(last) if last.1 > from => last.1 = last.1.max(to),
                _ => ranges.push((from, to)),
            }
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}
