//! Source links: finding URLs in model text and deciding which ones are safe
//! to render as links.

use regex::Regex;
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s<>"'\\)\]]+"#).expect("valid URL pattern"));

/// Only absolute http(s) URLs with a host are rendered as links.
pub fn is_safe_url(candidate: &str) -> bool {
    match url::Url::parse(candidate) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Safe URLs found in `text`, in order of first appearance, without
/// duplicates. Trailing sentence punctuation is not part of the URL.
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut urls = Vec::new();
    for m in URL_PATTERN.find_iter(text) {
        let url = m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?']);
        push_unique(&mut urls, url);
    }
    urls
}

/// Appends the safe entries of `extra` that are not present yet.
pub fn merge_sources<I, S>(sources: &mut Vec<String>, extra: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for src in extra {
        push_unique(sources, src.as_ref().trim());
    }
}

fn push_unique(sources: &mut Vec<String>, url: &str) {
    if is_safe_url(url) && !sources.iter().any(|s| s == url) {
        sources.push(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_url_rules() {
        assert!(is_safe_url("https://en.wikipedia.org/wiki/Durga_Puja"));
        assert!(is_safe_url("http://example.com"));
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url("ftp://example.com/file"));
        assert!(!is_safe_url("file:///etc/passwd"));
        assert!(!is_safe_url("not a url"));
        assert!(!is_safe_url(""));
    }

    #[test]
    fn extracts_urls_in_order_without_duplicates() {
        let text = "See https://a.example/x. Also (https://b.example/y) and https://a.example/x again.";
        assert_eq!(
            extract_urls(text),
            vec!["https://a.example/x", "https://b.example/y"]
        );
    }

    #[test]
    fn no_urls_in_plain_text() {
        assert!(extract_urls("Durga Puja is in autumn").is_empty());
    }

    #[test]
    fn merge_skips_unsafe_and_existing() {
        let mut sources = vec!["https://a.example".to_string()];
        merge_sources(
            &mut sources,
            ["https://a.example", "javascript:void(0)", " https://c.example "],
        );
        assert_eq!(sources, vec!["https://a.example", "https://c.example"]);
    }
}
