//! URL path assembly.

/// Join a base URL and path segments with exactly one `/` between each part.
///
/// Empty segments are skipped, so an empty resource path addresses the base
/// itself. Trailing slashes of the last segment are kept.
///
/// # Examples
///
/// ```
/// use fcrepo_http::protocol::join_path;
///
/// assert_eq!(join_path("http://localhost/rest/", &["/foo"]), "http://localhost/rest/foo");
/// assert_eq!(join_path("http://localhost/rest", &["tx:1", "foo", "fcr:tombstone"]),
///            "http://localhost/rest/tx:1/foo/fcr:tombstone");
/// assert_eq!(join_path("http://localhost/rest", &[""]), "http://localhost/rest");
/// ```
pub fn join_path(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        let segment = segment.trim_start_matches('/');
        if segment.is_empty() {
            continue;
        }
        url.truncate(url.trim_end_matches('/').len());
        url.push('/');
        url.push_str(segment);
    }
    url
}

/// Whether a URL string starts with an explicit `http` or `https` scheme.
pub fn has_scheme(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_strips_duplicate_slashes() {
        assert_eq!(join_path("http://h/rest/", &["/a/"]), "http://h/rest/a/");
        assert_eq!(join_path("http://h/rest//", &["//a", "b"]), "http://h/rest/a/b");
    }

    #[test]
    fn test_join_without_segments() {
        assert_eq!(join_path("http://h/rest/", &[]), "http://h/rest");
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("http://localhost:8080/rest"));
        assert!(has_scheme("HTTPS://localhost/rest"));
        assert!(!has_scheme("localhost:8080/rest"));
    }
}
