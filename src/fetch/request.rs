//! Outgoing feed requests.

use crate::domain::error::{NewsdeskError, Result};
use std::collections::BTreeMap;
use url::Url;

/// Context key carrying the request id through the host's web request.
pub const REQUEST_ID_KEY: &str = "newsdesk_request_id";

/// A single GET of the feed endpoint.
///
/// The request id is only used to correlate log lines with the result that
/// eventually comes back. Results are never matched against it: whichever
/// result is handled last wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Absolute URL including the `top` parameter.
    pub url: String,
    /// Monotonic id assigned by the application state.
    pub request_id: u64,
}

impl FetchRequest {
    /// Builds the request URL from the configured base and item count.
    ///
    /// An existing `top` parameter in `feed_url` is replaced, other query
    /// parameters are kept in order.
    ///
    /// # Errors
    ///
    /// Returns [`NewsdeskError::Config`] if `feed_url` is not an absolute
    /// `http` or `https` URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use newsdesk::fetch::FetchRequest;
    ///
    /// let request = FetchRequest::new("https://news.example.com/api/top", 200, 1).unwrap();
    /// assert_eq!(request.url, "https://news.example.com/api/top?top=200");
    /// ```
    pub fn new(feed_url: &str, top_n: u32, request_id: u64) -> Result<Self> {
        let mut url = Url::parse(feed_url)
            .map_err(|e| NewsdeskError::Config(format!("invalid feed_url {feed_url:?}: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(NewsdeskError::Config(format!(
                "feed_url must use http or https, got {:?}",
                url.scheme()
            )));
        }

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "top")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("top", &top_n.to_string());

        Ok(Self {
            url: url.into(),
            request_id,
        })
    }

    /// Context map handed to the host alongside the web request.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(REQUEST_ID_KEY.to_string(), self.request_id.to_string())])
    }
}

/// Reads the request id back out of a result's context map.
#[must_use]
pub fn request_id_from_context(context: &BTreeMap<String, String>) -> Option<u64> {
    context.get(REQUEST_ID_KEY).and_then(|id| id.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn appends_top_to_default_endpoint() {
        let request = FetchRequest::new("http://127.0.0.1:8080/api/top", 200, 7).unwrap();
        assert_eq!(request.url, "http://127.0.0.1:8080/api/top?top=200");
        assert_eq!(request.request_id, 7);
    }

    #[test]
    fn replaces_existing_top_and_keeps_other_parameters() {
        let request = FetchRequest::new("https://x.example/feed?lang=en&top=5", 30, 1).unwrap();
        assert_eq!(request.url, "https://x.example/feed?lang=en&top=30");
    }

    #[test]
    fn rejects_relative_and_non_http_urls() {
        assert!(matches!(
            FetchRequest::new("api/top", 10, 1),
            Err(NewsdeskError::Config(_))
        ));
        assert!(matches!(
            FetchRequest::new("file:///etc/passwd", 10, 1),
            Err(NewsdeskError::Config(_))
        ));
    }

    #[test]
    fn context_round_trips_request_id() {
        let request = FetchRequest::new("https://x.example/", 1, 42).unwrap();
        assert_eq!(request_id_from_context(&request.context()), Some(42));
        assert_eq!(request_id_from_context(&BTreeMap::new()), None);
    }
}
