//! URL joining utilities.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! The sitemap generator and link checker both need to turn a site-relative
//! path into a full URL against a configured base. This is a simplified
//! joiner for the cases a static-site export actually produces, not a full
//! implementation of the URL Standard's parsing algorithm.

/// Join a site-relative path onto a base URL.
///
/// [URL Standard § 4.3](https://url.spec.whatwg.org/#url-parsing)
/// "An absolute-URL string is a URL-scheme string, followed by U+003A (:),
/// followed by a scheme-specific part."
///
/// - An already-absolute `path` (scheme prefix) is returned unchanged.
/// - An absolute path (`/about.html`) is joined onto the base's origin.
/// - Anything else is joined onto the base with exactly one `/` between.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    if let Some(rest) = path.strip_prefix('/') {
        // Absolute path - join with the base's origin (scheme://host).
        if let Some(scheme_end) = base.find("://") {
            let after_scheme = &base[scheme_end + 3..];
            let origin = after_scheme.find('/').map_or(base, |path_start| {
                &base[..scheme_end + 3 + path_start]
            });
            return format!("{origin}/{rest}");
        }
        return format!("{}/{rest}", base.trim_end_matches('/'));
    }

    format!("{}/{path}", base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::join_url;

    #[test]
    fn test_join_relative_path() {
        assert_eq!(
            join_url("https://example.com/", "about.html"),
            "https://example.com/about.html"
        );
    }

    #[test]
    fn test_join_absolute_path_uses_origin() {
        assert_eq!(
            join_url("https://example.com/sub/dir/", "/about.html"),
            "https://example.com/about.html"
        );
    }

    #[test]
    fn test_join_empty_path_is_base() {
        assert_eq!(join_url("https://example.com", ""), "https://example.com/");
    }

    #[test]
    fn test_absolute_url_passes_through() {
        assert_eq!(
            join_url("https://example.com/", "https://other.test/x"),
            "https://other.test/x"
        );
    }
}
