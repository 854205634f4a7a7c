//! Tracking link generation.

use uuid::Uuid;

/// Path served by the click tracker.
pub const CLICK_PATH: &str = "/clique";

/// Builds tracking tokens and the absolute URLs that carry them.
#[derive(Debug, Clone)]
pub struct LinkGenerator {
    base_url: String,
}

impl LinkGenerator {
    /// Create a generator for the given public base URL.
    ///
    /// One trailing `/` on the base is dropped; the rest is used as given.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Fresh 128-bit random token in canonical hyphenated form.
    pub fn new_token(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// `<base>/clique?id=<token>`
    pub fn build_trackable_url(&self, token: &str) -> String {
        format!("{}{}?id={}", self.base_url, CLICK_PATH, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trackable_url_format() {
        let links = LinkGenerator::new("https://example.com");
        assert_eq!(
            links.build_trackable_url("abc"),
            "https://example.com/clique?id=abc"
        );
    }

    #[test]
    fn test_trailing_slash_is_not_doubled() {
        let links = LinkGenerator::new("https://example.com/");
        assert_eq!(
            links.build_trackable_url("abc"),
            "https://example.com/clique?id=abc"
        );
    }

    #[test]
    fn test_only_one_trailing_slash_is_removed() {
        let links = LinkGenerator::new("https://example.com/app//");
        assert_eq!(
            links.build_trackable_url("abc"),
            "https://example.com/app//clique?id=abc"
        );
    }

    #[test]
    fn test_tokens_are_unique_uuids() {
        let links = LinkGenerator::new("https://example.com");
        let first = links.new_token();
        let second = links.new_token();

        assert_ne!(first, second);
        let parsed = Uuid::parse_str(&first).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(first, parsed.to_string());
    }
}
