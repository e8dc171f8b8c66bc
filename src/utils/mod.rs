//! Utility functions and helpers.

pub mod cache;
pub mod html;
pub mod http;

use url::Url;

use crate::error::Result;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve a URL string against a base URL string.
pub fn resolve(base_url: &str, href: &str) -> Result<String> {
    Ok(resolve_url(&Url::parse(base_url)?, href))
}

/// Last path segment of a URL, used as a local file name.
pub fn file_name(url_str: &str) -> Option<String> {
    Url::parse(url_str)
        .ok()?
        .path_segments()?
        .last()
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/path/").unwrap();
        assert_eq!(
            resolve_url(&base, "page.html"),
            "https://example.com/path/page.html"
        );
        assert_eq!(
            resolve_url(&base, "/root.html"),
            "https://example.com/root.html"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_resolve_relative_from_file() {
        assert_eq!(
            resolve("https://docs.python.org/3/download.html", "archives/a.zip").unwrap(),
            "https://docs.python.org/3/archives/a.zip"
        );
        assert!(resolve("not a url", "x").is_err());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            file_name("https://docs.python.org/3/archives/python-3.13-docs-pdf-a4.zip"),
            Some("python-3.13-docs-pdf-a4.zip".to_string())
        );
        assert_eq!(file_name("https://docs.python.org/3/"), None);
        assert_eq!(file_name("invalid-url"), None);
    }
}
