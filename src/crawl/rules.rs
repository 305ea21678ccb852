// src/crawl/rules.rs
// =============================================================================
// Allow / deny rules for discovered addresses.
//
// A rule is either:
// - a regular expression, matched anywhere in the address, or
// - a predicate: any closure taking (address, crawl context) -> bool
//
// Evaluation:
// 1. If there are allow rules, at least one must match (first match wins)
// 2. If any deny rule matches, the address is rejected (first match wins)
// 3. Deny always beats allow
// 4. No rules at all = everything is allowed
//
// Rust concepts:
// - Enums with data: Rule::Pattern holds a Regex, Rule::Predicate a closure
// - Arc<dyn Fn>: a shareable, type-erased closure
// =============================================================================

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use super::context::CrawlContext;
use crate::error::ConfigError;

pub type RulePredicate = Arc<dyn Fn(&str, &CrawlContext<'_>) -> bool + Send + Sync>;

#[derive(Clone)]
pub enum Rule {
    Pattern(Regex),
    Predicate(RulePredicate),
}

impl Rule {
    // Compiles a pattern rule
    //
    // An invalid expression is reported now, while the configuration is
    // built, rather than in the middle of a crawl.
    pub fn pattern(pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(pattern)
            .map(Rule::Pattern)
            .map_err(|source| ConfigError::InvalidRulePattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&str, &CrawlContext<'_>) -> bool + Send + Sync + 'static,
    {
        Rule::Predicate(Arc::new(predicate))
    }

    pub fn matches(&self, address: &str, ctx: &CrawlContext<'_>) -> bool {
        match self {
            Rule::Pattern(regex) => regex.is_match(address),
            Rule::Predicate(predicate) => predicate(address, ctx),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Rule::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    allow: Vec<Rule>,
    deny: Vec<Rule>,
}

impl RuleSet {
    pub fn new(allow: Vec<Rule>, deny: Vec<Rule>) -> Self {
        Self { allow, deny }
    }

    pub fn allow_rules(&self) -> &[Rule] {
        &self.allow
    }

    pub fn deny_rules(&self) -> &[Rule] {
        &self.deny
    }

    // Checks an address against the allow rules, then the deny rules
    pub fn is_allowed(&self, address: &str, ctx: &CrawlContext<'_>) -> bool {
        let allowed =
            self.allow.is_empty() || self.allow.iter().any(|rule| rule.matches(address, ctx));

        allowed && !self.deny.iter().any(|rule| rule.matches(address, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::queue::CrawlQueue;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn patterns(list: &[&str]) -> Vec<Rule> {
        list.iter().map(|p| Rule::pattern(p).unwrap()).collect()
    }

    #[test]
    fn test_deny_overrides_allow() {
        let queue = CrawlQueue::new();
        let ctx = CrawlContext::new(&queue);
        let rules = RuleSet::new(patterns(&[r".*\.html$"]), patterns(&["/admin"]));

        assert!(rules.is_allowed("/page.html", &ctx));
        assert!(!rules.is_allowed("/admin/page.html", &ctx));
        assert!(!rules.is_allowed("/image.png", &ctx));
    }

    #[test]
    fn test_no_rules_allows_everything() {
        let queue = CrawlQueue::new();
        let ctx = CrawlContext::new(&queue);
        let rules = RuleSet::default();

        assert!(rules.is_allowed("http://anything.test/", &ctx));
        assert!(rules.is_allowed("/x", &ctx));
    }

    #[test]
    fn test_predicate_rule_sees_context() {
        let mut queue = CrawlQueue::new();
        queue.enqueue_all(["http://a.test/", "http://a.test/b"]);
        let ctx = CrawlContext::new(&queue);

        let small_queue = Rule::predicate(|_, ctx| ctx.queue_size() < 2);
        let rules = RuleSet::new(vec![small_queue], Vec::new());

        assert!(!rules.is_allowed("http://a.test/c", &ctx));
    }

    #[test]
    fn test_allow_rules_short_circuit_in_order() {
        let queue = CrawlQueue::new();
        let ctx = CrawlContext::new(&queue);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let rules = RuleSet::new(
            vec![
                Rule::pattern("a.test").unwrap(),
                Rule::predicate(move |_, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    true
                }),
            ],
            Vec::new(),
        );

        assert!(rules.is_allowed("http://a.test/", &ctx));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(rules.is_allowed("http://b.test/", &ctx));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_pattern_fails_at_build_time() {
        let err = Rule::pattern("(unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRulePattern { .. }));
    }
}
