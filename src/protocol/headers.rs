//! `Link` header parsing.
//!
//! Parses [RFC 8288] `Link` header values and applies the repository's rule for
//! the `describedby` relation: a binary resource points at its RDF description
//! with exactly one such link. Zero links and more than one link are both
//! reported as "no description"; an ambiguous answer is never resolved by
//! picking one of them.
//!
//! # Examples
//!
//! ```
//! use fcrepo_http::protocol::{described_by, parse_link_header};
//!
//! let value = r#"<http://localhost/rest/img/fcr:metadata>; rel="describedby", <http://www.w3.org/ns/ldp#NonRDFSource>; rel="type""#;
//! let links = parse_link_header(value);
//! assert_eq!(links.len(), 2);
//!
//! let target = described_by([value], "http://localhost/rest/img");
//! assert_eq!(target.as_deref(), Some("http://localhost/rest/img/fcr:metadata"));
//!
//! // Two candidates: treated as absent
//! let a = r#"<http://localhost/a>; rel="describedby""#;
//! let b = r#"<http://localhost/b>; rel="describedby""#;
//! assert_eq!(described_by([a, b], "http://localhost/rest/img"), None);
//! ```
//!
//! [RFC 8288]: https://datatracker.ietf.org/doc/html/rfc8288

use super::constants::relations;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static LINK_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^>]*)>([^<]*)").expect("link pattern is valid"));

static REL_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|;)\s*rel\s*=\s*(?:"([^"]*)"|([^\s;,"]+))"#).expect("rel pattern is valid")
});

/// A single link from a `Link` header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// Target URI, exactly as written between `<` and `>`
    pub uri: String,

    /// Relation types (a `rel` parameter may list several, space-separated)
    pub rels: Vec<String>,
}

impl Link {
    /// Whether this link carries the given relation (case-insensitive).
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rels.iter().any(|r| r.eq_ignore_ascii_case(rel))
    }
}

/// Parse every link out of one `Link` header value.
///
/// A header value may hold several comma-separated links. Links without a
/// `rel` parameter are returned with an empty relation list.
///
/// # Examples
///
/// ```
/// use fcrepo_http::protocol::parse_link_header;
///
/// let links = parse_link_header(r#"<http://a>; rel="describedby type""#);
/// assert_eq!(links[0].uri, "http://a");
/// assert_eq!(links[0].rels, vec!["describedby", "type"]);
///
/// assert!(parse_link_header("").is_empty());
/// ```
pub fn parse_link_header(value: &str) -> Vec<Link> {
    LINK_VALUE
        .captures_iter(value)
        .map(|caps| {
            let uri = caps[1].trim().to_string();
            let params = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            let rels = REL_PARAM
                .captures(params)
                .and_then(|rel| rel.get(1).or_else(|| rel.get(2)))
                .map(|m| m.as_str().split_whitespace().map(str::to_string).collect())
                .unwrap_or_default();
            Link { uri, rels }
        })
        .collect()
}

/// Find the single `describedby` target across all `Link` header values.
///
/// Returns `None` when there is no such link or when there is more than one.
/// A relative target is resolved against `request_url`.
pub fn described_by<'a, I>(values: I, request_url: &str) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut candidates = values
        .into_iter()
        .flat_map(parse_link_header)
        .filter(|link| link.has_rel(relations::DESCRIBED_BY));

    let link = candidates.next()?;
    if candidates.next().is_some() {
        return None;
    }

    match Url::parse(&link.uri) {
        Ok(_) => Some(link.uri),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(request_url)
            .and_then(|base| base.join(&link.uri))
            .map(|resolved| resolved.to_string())
            .ok(),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_link() {
        let links = parse_link_header(r#"<http://localhost/rest/foo>; rel="describedby""#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].uri, "http://localhost/rest/foo");
        assert!(links[0].has_rel("describedby"));
    }

    #[test]
    fn test_parse_unquoted_rel() {
        let links = parse_link_header("<http://localhost/rest/foo>;rel=describedby");
        assert!(links[0].has_rel("DescribedBy"));
    }

    #[test]
    fn test_parse_multiple_links_in_one_value() {
        let value = r#"<http://a>; rel="type", <http://b>; title="x"; rel="describedby""#;
        let links = parse_link_header(value);
        assert_eq!(links.len(), 2);
        assert!(links[0].has_rel("type"));
        assert!(links[1].has_rel("describedby"));
    }

    #[test]
    fn test_link_without_rel() {
        let links = parse_link_header("<http://a>; title=\"nothing\"");
        assert_eq!(links.len(), 1);
        assert!(links[0].rels.is_empty());
    }

    #[test]
    fn test_described_by_absent() {
        let value = r#"<http://www.w3.org/ns/ldp#Resource>; rel="type""#;
        assert_eq!(described_by([value], "http://localhost/rest/foo"), None);
        assert_eq!(described_by(Vec::<&str>::new(), "http://localhost/rest/foo"), None);
    }

    #[test]
    fn test_described_by_two_headers_is_absent() {
        let a = r#"<http://localhost/rest/foo/fcr:metadata>; rel="describedby""#;
        let b = r#"<http://localhost/rest/bar/fcr:metadata>; rel="describedby""#;
        assert_eq!(described_by([a, b], "http://localhost/rest/foo"), None);
    }

    #[test]
    fn test_described_by_two_links_in_one_header_is_absent() {
        let value = r#"<http://localhost/a>; rel="describedby", <http://localhost/b>; rel="describedby""#;
        assert_eq!(described_by([value], "http://localhost/rest/foo"), None);
    }

    #[test]
    fn test_described_by_relative_target() {
        let value = r#"</rest/foo/fcr:metadata>; rel="describedby""#;
        assert_eq!(
            described_by([value], "http://localhost:8080/rest/foo").as_deref(),
            Some("http://localhost:8080/rest/foo/fcr:metadata")
        );
    }
}
