// src/crawl/extract.rs
// =============================================================================
// Finds addresses in fetched content.
//
// There is no HTML parsing here: content is scanned with a single regular
// expression that looks for address-like text right after a quote, e.g.
//
//   <a href="https://example.com/a">   -> https://example.com/a
//   <img src='//cdn.example.com/x.png'> -> //cdn.example.com/x.png
//   <link href="/style.css">            -> /style.css
//
// That works on HTML, XML, JSON, inline scripts... anything that quotes its
// links.
//
// Steps:
// 1. Collect every match (first-seen order, duplicates dropped)
// 2. Normalize each one against the crawl origin
// 3. Keep only what the allow/deny rules accept
// 4. Drop duplicates again (normalizing can make two matches equal)
// 5. Let the after-extract hook look at the final list
// =============================================================================

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::context::CrawlContext;
use super::hooks::LifecycleHooks;
use super::normalize::{normalize, Origin};
use super::rules::RuleSet;
use crate::error::ConfigError;

// Quoted absolute (http/https), protocol-relative (//) and root-relative (/)
// addresses. Group 1 is the address without the leading quote.
pub const DEFAULT_ADDRESS_PATTERN: &str =
    r#"(?i)["']((?:https?://|//|/)(?:[^\s/?.#"'<>-][^\s/?.#"'<>]*\.?)+(?:/[^"'\s<>]*)?)"#;

// Compiled once, cloned into every default extractor
static DEFAULT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DEFAULT_ADDRESS_PATTERN)
        .unwrap_or_else(|e| unreachable!("built-in address pattern is valid: {}", e))
});

#[derive(Debug, Clone)]
pub struct AddressExtractor {
    pattern: Regex,
}

impl AddressExtractor {
    // Builds an extractor from a custom pattern
    //
    // If the pattern has a capture group, group 1 is taken as the address;
    // otherwise the whole match is.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let pattern =
            Regex::new(pattern).map_err(|source| ConfigError::InvalidExtractionPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    // Every distinct raw match, in the order it first appears
    pub fn raw_matches<'c>(&self, content: &'c str) -> Vec<&'c str> {
        let mut seen = HashSet::new();

        self.pattern
            .captures_iter(content)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
            .map(|m| m.as_str())
            .filter(|address| seen.insert(*address))
            .collect()
    }

    // Returns the normalized, allowed, de-duplicated addresses in `content`
    pub fn extract(
        &self,
        content: &str,
        rules: &RuleSet,
        hooks: &LifecycleHooks,
        ctx: &CrawlContext<'_>,
    ) -> Vec<String> {
        let origin = ctx
            .origin()
            .cloned()
            .unwrap_or_else(|| Origin::from_seed(""));

        let mut seen = HashSet::new();
        let addresses: Vec<String> = self
            .raw_matches(content)
            .into_iter()
            .map(|raw| normalize(raw, &origin))
            .filter(|address| rules.is_allowed(address, ctx))
            .filter(|address| seen.insert(address.clone()))
            .collect();

        hooks.notify_extract(&addresses, content, ctx);

        addresses
    }
}

impl Default for AddressExtractor {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::queue::CrawlQueue;
    use crate::crawl::rules::Rule;
    use std::sync::{Arc, Mutex};

    fn queue_for(seed: &str) -> CrawlQueue {
        let mut queue = CrawlQueue::new();
        queue.enqueue_all([seed]);
        queue
    }

    fn extract(content: &str, rules: &RuleSet) -> Vec<String> {
        let queue = queue_for("https://example.com/start");
        let ctx = CrawlContext::new(&queue);
        AddressExtractor::default().extract(content, rules, &LifecycleHooks::new(), &ctx)
    }

    #[test]
    fn test_duplicate_links_yield_one_address() {
        let html = r#"<a href="http://a.test/">x</a><a href="http://a.test/">y</a>"#;
        assert_eq!(extract(html, &RuleSet::default()), vec!["http://a.test/"]);
    }

    #[test]
    fn test_all_forms_are_recognized_and_normalized() {
        let html = r#"
            <a href="https://example.com/abs">a</a>
            <img src='//cdn.example.com/img.png'>
            <link href="/style.css" rel="stylesheet">
        "#;

        assert_eq!(
            extract(html, &RuleSet::default()),
            vec![
                "https://example.com/abs",
                "https://cdn.example.com/img.png",
                "https://example.com/style.css",
            ]
        );
    }

    #[test]
    fn test_unquoted_and_relative_paths_are_ignored() {
        let html = r##"see https://example.com/bare and <a href="page.html">rel</a> <a href="#top">"##;
        assert!(extract(html, &RuleSet::default()).is_empty());
    }

    #[test]
    fn test_empty_content() {
        assert!(extract("", &RuleSet::default()).is_empty());
    }

    #[test]
    fn test_normalization_collisions_are_deduplicated() {
        let html = r#"<a href="/a"></a><a href="https://example.com/a"></a><a href="//example.com/a"></a>"#;
        assert_eq!(extract(html, &RuleSet::default()), vec!["https://example.com/a"]);
    }

    #[test]
    fn test_rules_filter_normalized_addresses() {
        let rules = RuleSet::new(
            vec![Rule::pattern(r"\.html$").unwrap()],
            vec![Rule::pattern("/admin").unwrap()],
        );
        let html = r#"<a href="/page.html"></a><a href="/admin/page.html"></a><a href="/img.png"></a>"#;

        assert_eq!(extract(html, &rules), vec!["https://example.com/page.html"]);
    }

    #[test]
    fn test_query_string_and_case_insensitive_scheme() {
        let html = r#"<a href="HTTPS://Example.com/search?q=rust&page=2">"#;
        assert_eq!(
            extract(html, &RuleSet::default()),
            vec!["HTTPS://Example.com/search?q=rust&page=2"]
        );
    }

    #[test]
    fn test_after_extract_hook_observes_final_list() {
        let queue = queue_for("https://example.com/");
        let ctx = CrawlContext::new(&queue);
        let observed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&observed);
        let hooks = LifecycleHooks::new().after_extract(move |addresses, content, _| {
            sink.lock().unwrap().push((addresses.to_vec(), content.len()));
        });

        let html = r#"<a href="/x"></a><a href="/x"></a>"#;
        let result = AddressExtractor::default().extract(html, &RuleSet::default(), &hooks, &ctx);

        let observed = observed.lock().unwrap();
        assert_eq!(observed.len(), 1);
        assert_eq!(observed[0].0, result);
        assert_eq!(observed[0].1, html.len());
    }

    #[test]
    fn test_custom_pattern_without_group_uses_whole_match() {
        let queue = queue_for("https://example.com/");
        let ctx = CrawlContext::new(&queue);
        let extractor = AddressExtractor::new(r"/docs/[a-z]+").unwrap();

        let result = extractor.extract(
            "see /docs/intro and /docs/setup",
            &RuleSet::default(),
            &LifecycleHooks::new(),
            &ctx,
        );

        assert_eq!(
            result,
            vec!["https://example.com/docs/intro", "https://example.com/docs/setup"]
        );
    }

    #[test]
    fn test_invalid_custom_pattern() {
        let err = AddressExtractor::new("[").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidExtractionPattern { .. }));
    }
}
