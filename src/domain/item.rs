//! Feed item and dataset domain model.
//!
//! An [`Item`] is one entry of the fetched feed. Items are built from the raw
//! JSON payload with tolerant field access: a missing or malformed field never
//! drops the item, it only falls back to an empty default and records why.

use super::sanitize::Sanitized;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

/// One content entry of the dataset.
///
/// Items are immutable once built. `host` is derived from `url` at build time
/// so the query filter does not re-parse URLs on every keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Stable identifier, coerced to a string from whatever scalar the feed sent.
    pub id: String,
    /// Headline text.
    pub title: String,
    /// Absolute link to the article.
    pub url: String,
    /// Label of the originating source. Empty when the feed omitted it.
    pub feed_title: String,
    /// Publication time, when the feed provided a parseable one.
    pub published_at: Option<DateTime<Utc>>,
    /// Topic labels in feed order.
    pub tags: Vec<String>,
    /// Hostname of `url`, empty when `url` does not parse.
    pub host: String,
}

impl Item {
    /// Creates an item from already-clean parts, deriving `host` from `url`.
    ///
    /// # Examples
    ///
    /// ```
    /// use newsdesk::Item;
    ///
    /// let item = Item::new("42", "Rates hold", "https://www.example.com/a", "Reuters", vec![]);
    /// assert_eq!(item.host, "www.example.com");
    /// assert!(item.published_at.is_none());
    /// ```
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        feed_title: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        let url = url.into();
        let host = host_of(&url);
        Self {
            id: id.into(),
            title: title.into(),
            url,
            feed_title: feed_title.into(),
            published_at: None,
            tags,
            host,
        }
    }

    /// Builds an item from one element of the payload's `items` array.
    ///
    /// `position` is the element's index and only serves as the id of last
    /// resort when neither an id nor a url is present.
    ///
    /// # Field Rules
    ///
    /// - `id`: any scalar, else the url, else `item-{position}`
    /// - `feed_title`: `feed.title`, a string `feed`, or `feedTitle`
    /// - `publishedAt`: RFC 3339 string or integer epoch seconds
    /// - `tags`: strings from an array, other elements dropped
    #[must_use]
    pub fn from_json(value: &Value, position: usize) -> Sanitized<Self> {
        let mut discarded = Vec::new();

        let Some(fields) = value.as_object() else {
            let fallback = Self::new(format!("item-{position}"), "", "", "", vec![]);
            return Sanitized::recovered(fallback, format!("item {position} is not an object"));
        };

        let title = string_field(fields.get("title"), "title", &mut discarded);
        let url = string_field(fields.get("url"), "url", &mut discarded);

        let id = match fields.get("id").and_then(scalar_to_string) {
            Some(id) => id,
            None if !url.is_empty() => {
                discarded.push("id missing, using url".to_string());
                url.clone()
            }
            None => {
                discarded.push("id and url missing, using position".to_string());
                format!("item-{position}")
            }
        };

        let feed_title = match fields.get("feed") {
            Some(Value::Object(feed)) => feed.get("title").and_then(Value::as_str).map(str::to_string),
            Some(Value::String(label)) => Some(label.clone()),
            _ => None,
        }
        .or_else(|| fields.get("feedTitle").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_default();

        let published_at = match fields.get("publishedAt") {
            None | Some(Value::Null) => None,
            Some(raw) => {
                let parsed = parse_timestamp(raw);
                if parsed.is_none() {
                    discarded.push(format!("unparseable publishedAt: {raw}"));
                }
                parsed
            }
        };

        let tags = match fields.get("tags") {
            Some(Value::Array(raw)) => {
                let tags: Vec<String> = raw.iter().filter_map(Value::as_str).map(str::to_string).collect();
                if tags.len() != raw.len() {
                    discarded.push(format!("{} non-string tags dropped", raw.len() - tags.len()));
                }
                tags
            }
            None | Some(Value::Null) => Vec::new(),
            Some(_) => {
                discarded.push("tags is not an array".to_string());
                Vec::new()
            }
        };

        let host = host_of(&url);

        Sanitized {
            value: Self {
                id,
                title,
                url,
                feed_title,
                published_at,
                tags,
                host,
            },
            discarded,
        }
    }

    /// Concatenated lowercase text the free-text query is matched against.
    #[must_use]
    pub fn search_text(&self) -> String {
        fold_case(&format!(
            "{} {} {} {}",
            self.title,
            self.feed_title,
            self.host,
            self.tags.join(" ")
        ))
    }
}

/// Case-folds `text` one char at a time.
///
/// Each char expands to its full lowercase mapping (`İ` becomes `i̇`), with no
/// context rules, so the same char always folds the same way in queries, the
/// search text and highlight ranges.
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// A full snapshot of items from one successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// Items in server order.
    pub items: Vec<Item>,
    /// When the snapshot was received.
    pub fetched_at: DateTime<Utc>,
}

impl Dataset {
    #[must_use]
    pub const fn new(items: Vec<Item>, fetched_at: DateTime<Utc>) -> Self {
        Self { items, fetched_at }
    }
}

fn host_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_default()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_field(value: Option<&Value>, name: &str, discarded: &mut Vec<String>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => {
            discarded.push(format!("{name} missing"));
            String::new()
        }
        Some(other) => {
            discarded.push(format!("{name} is not a string"));
            scalar_to_string(other).unwrap_or_default()
        }
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn full_item_parses_cleanly() {
        let raw = json!({
            "id": "abc",
            "title": "Markets rally",
            "url": "https://news.example.org/markets",
            "feed": { "title": "Reuters" },
            "publishedAt": "2024-03-01T12:00:00Z",
            "tags": ["finance", "markets"]
        });

        let item = Item::from_json(&raw, 0);

        assert!(!item.was_corrupt());
        assert_eq!(item.value.id, "abc");
        assert_eq!(item.value.feed_title, "Reuters");
        assert_eq!(item.value.host, "news.example.org");
        assert_eq!(item.value.tags, vec!["finance", "markets"]);
        assert_eq!(
            item.value.published_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single()
        );
    }

    #[test]
    fn numeric_id_is_coerced_to_string() {
        let raw = json!({ "id": 1234, "title": "t", "url": "https://a.example/x" });
        assert_eq!(Item::from_json(&raw, 3).value.id, "1234");
    }

    #[test]
    fn missing_optional_fields_default_without_dropping_item() {
        let raw = json!({ "id": "x", "title": "Only a title", "url": "not a url" });

        let item = Item::from_json(&raw, 0).value;

        assert_eq!(item.feed_title, "");
        assert!(item.tags.is_empty());
        assert!(item.published_at.is_none());
        assert_eq!(item.host, "");
    }

    #[test]
    fn malformed_fields_are_recorded() {
        let raw = json!({
            "title": "t",
            "url": "https://example.com/a",
            "tags": "not-a-list",
            "publishedAt": "yesterday"
        });

        let item = Item::from_json(&raw, 7);

        assert_eq!(item.value.id, "https://example.com/a");
        assert!(item.discarded.iter().any(|r| r.contains("tags")));
        assert!(item.discarded.iter().any(|r| r.contains("publishedAt")));
    }

    #[test]
    fn non_object_element_still_yields_an_item() {
        let item = Item::from_json(&json!("garbage"), 5);
        assert!(item.was_corrupt());
        assert_eq!(item.value.id, "item-5");
    }

    #[test]
    fn epoch_seconds_and_string_feed_are_accepted() {
        let raw = json!({ "id": "e", "title": "t", "url": "", "feed": "AP", "publishedAt": 0 });
        let item = Item::from_json(&raw, 0).value;
        assert_eq!(item.feed_title, "AP");
        assert_eq!(item.published_at, Utc.timestamp_opt(0, 0).single());
    }

    #[test]
    fn search_text_joins_all_matchable_fields() {
        let item = Item::new("1", "Big News", "https://Example.com/p", "Wire", vec!["World".into(), "Asia".into()]);
        assert_eq!(item.search_text(), "big news wire example.com world asia");
    }

    #[test]
    fn fold_case_expands_multi_char_lowercase() {
        assert_eq!(fold_case("İstanbul"), "i\u{307}stanbul");
        assert_eq!(fold_case("ΟΔΟΣ"), "οδοσ");
    }
}
