//! Decoding of feed responses.
//!
//! The body is parsed as JSON before the status is looked at, so an error
//! response can carry its own message (`{"error": "rate limited"}`) through
//! to the user.

use crate::domain::{FetchError, Item, Sanitized};
use serde_json::Value;

/// Turns a raw HTTP result into sanitized items or a fetch failure.
///
/// # Parameters
///
/// * `status` - HTTP status code reported by the host
/// * `body` - Raw response body
///
/// # Errors
///
/// - non-2xx: [`FetchError::Status`], with the body's `error` string when
///   present, else `HTTP <status>`
/// - 2xx with a non-JSON body: [`FetchError::InvalidBody`]
/// - 2xx JSON without an `items` array: [`FetchError::MalformedPayload`]
///
/// # Examples
///
/// ```
/// use newsdesk::fetch::decode_response;
///
/// let err = decode_response(429, br#"{"error":"rate limited"}"#).unwrap_err();
/// assert_eq!(err.to_string(), "rate limited");
/// ```
pub fn decode_response(status: u16, body: &[u8]) -> Result<Vec<Sanitized<Item>>, FetchError> {
    let _span = tracing::debug_span!("decode_response", status, body_len = body.len()).entered();

    let parsed: std::result::Result<Value, serde_json::Error> = serde_json::from_slice(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .as_ref()
            .ok()
            .and_then(|payload| payload.get("error"))
            .and_then(Value::as_str)
            .map_or_else(|| format!("HTTP {status}"), str::to_string);
        tracing::debug!(message = %message, "error status");
        return Err(FetchError::Status { status, message });
    }

    let payload = parsed.map_err(|e| FetchError::InvalidBody(e.to_string()))?;

    let Some(raw_items) = payload.get("items").and_then(Value::as_array) else {
        return Err(FetchError::MalformedPayload);
    };

    let items: Vec<Sanitized<Item>> = raw_items
        .iter()
        .enumerate()
        .map(|(position, raw)| Item::from_json(raw, position))
        .collect();

    tracing::debug!(item_count = items.len(), "response decoded");
    Ok(items)
}

/// Unwraps sanitized items, logging every discard reason once per item.
#[must_use]
pub fn into_items(decoded: Vec<Sanitized<Item>>) -> Vec<Item> {
    decoded
        .into_iter()
        .map(|item| {
            if item.was_corrupt() {
                let id = item.value.id.clone();
                item.into_logged(&format!("item {id}"))
            } else {
                item.value
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_field_is_shown_verbatim() {
        let err = decode_response(429, br#"{"error": "rate limited"}"#).unwrap_err();
        assert_eq!(err, FetchError::Status { status: 429, message: "rate limited".into() });
        assert_eq!(err.to_string(), "rate limited");
    }

    #[test]
    fn error_status_without_message_uses_status_line() {
        assert_eq!(decode_response(502, b"<html>bad gateway</html>").unwrap_err().to_string(), "HTTP 502");
        assert_eq!(decode_response(500, br#"{"error": 5}"#).unwrap_err().to_string(), "HTTP 500");
    }

    #[test]
    fn success_with_non_json_body_is_invalid() {
        assert!(matches!(decode_response(200, b"not json"), Err(FetchError::InvalidBody(_))));
    }

    #[test]
    fn success_without_items_list_is_malformed() {
        assert_eq!(decode_response(200, br#"{"data": []}"#).unwrap_err(), FetchError::MalformedPayload);
        assert_eq!(decode_response(200, br#"{"items": {}}"#).unwrap_err(), FetchError::MalformedPayload);
        assert_eq!(decode_response(200, b"[]").unwrap_err(), FetchError::MalformedPayload);
    }

    #[test]
    fn items_keep_server_order_and_survive_bad_fields() {
        let body = br#"{"items": [
            {"id": 1, "title": "First", "url": "https://a.example/1", "feedTitle": "AP"},
            {"id": "two", "title": "Second", "url": "https://b.example/2", "tags": [1, "world"]},
            "junk"
        ]}"#;

        let items = into_items(decode_response(200, body).unwrap());

        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "two", "item-2"]);
        assert_eq!(items[0].feed_title, "AP");
        assert_eq!(items[1].tags, vec!["world"]);
    }

    #[test]
    fn empty_items_list_is_a_valid_dataset() {
        assert!(decode_response(204, br#"{"items": []}"#).unwrap().is_empty());
    }
}
