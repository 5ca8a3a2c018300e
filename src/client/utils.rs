//! Utility functions for the protocol client.
//!
//! - Status code classification
//! - Header collection for failure reports

use http::header::{HeaderMap, HeaderName};
use http::StatusCode;
use std::collections::BTreeMap;

/// Whether a status falls outside the accepted `[200, 400)` range.
///
/// # Examples
///
/// ```
/// use fcrepo_http::client::is_failure_status;
///
/// assert!(!is_failure_status(201));
/// assert!(!is_failure_status(303));
/// assert!(is_failure_status(404));
/// assert!(is_failure_status(101));
/// ```
pub fn is_failure_status(status: u16) -> bool {
    !(200..400).contains(&status)
}

/// Reason phrase for a status, or an empty string for unregistered codes.
pub fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}

/// Collect response headers into a map with lower-case keys.
///
/// Repeated headers are joined with `", "`; values that are not visible ASCII
/// are skipped.
pub fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    collected
}

/// First value of a header as a string.
pub(crate) fn first_header(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{HeaderValue, CONTENT_TYPE, LINK};

    #[test]
    fn test_is_failure_status() {
        assert!(!is_failure_status(200));
        assert!(!is_failure_status(399));
        assert!(is_failure_status(400));
        assert!(is_failure_status(500));
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(StatusCode::NOT_FOUND), "Not Found");
    }

    #[test]
    fn test_collect_headers_joins_repeats() {
        let mut headers = HeaderMap::new();
        headers.append(LINK, HeaderValue::from_static("<a>; rel=\"type\""));
        headers.append(LINK, HeaderValue::from_static("<b>; rel=\"type\""));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/turtle"));

        let collected = collect_headers(&headers);
        assert_eq!(
            collected.get("link").map(String::as_str),
            Some("<a>; rel=\"type\", <b>; rel=\"type\"")
        );
        assert_eq!(collected.get("content-type").map(String::as_str), Some("text/turtle"));
    }

    #[test]
    fn test_first_header() {
        let mut headers = HeaderMap::new();
        headers.append(CONTENT_TYPE, HeaderValue::from_static("text/turtle"));
        headers.append(CONTENT_TYPE, HeaderValue::from_static("application/ld+json"));
        assert_eq!(first_header(&headers, CONTENT_TYPE).as_deref(), Some("text/turtle"));
    }
}
