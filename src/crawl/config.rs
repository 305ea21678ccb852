// src/crawl/config.rs
// =============================================================================
// Everything the engine needs to know before a crawl starts.
//
// CrawlConfig is built once through CrawlConfigBuilder and then handed to the
// engine, which owns it for the rest of its life. There is no way to change
// rules or hooks while a crawl is running.
//
// Regular expressions are compiled in build(), so a typo in a rule shows up
// as a ConfigError before a single request is made.
// =============================================================================

use super::context::CrawlContext;
use super::extract::AddressExtractor;
use super::hooks::LifecycleHooks;
use super::rules::{Rule, RuleSet};
use crate::error::ConfigError;

#[derive(Debug, Default)]
pub struct CrawlConfig {
    pub rules: RuleSet,
    pub hooks: LifecycleHooks,
    pub extractor: AddressExtractor,
}

impl CrawlConfig {
    pub fn builder() -> CrawlConfigBuilder {
        CrawlConfigBuilder::default()
    }
}

// A rule waiting to be compiled, kept in the order it was added
#[derive(Debug)]
enum PendingRule {
    Pattern(String),
    Ready(Rule),
}

impl PendingRule {
    fn compile(self) -> Result<Rule, ConfigError> {
        match self {
            PendingRule::Pattern(pattern) => Rule::pattern(&pattern),
            PendingRule::Ready(rule) => Ok(rule),
        }
    }
}

#[derive(Debug, Default)]
pub struct CrawlConfigBuilder {
    allow: Vec<PendingRule>,
    deny: Vec<PendingRule>,
    extraction_pattern: Option<String>,
    hooks: LifecycleHooks,
}

impl CrawlConfigBuilder {
    pub fn allow_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.allow.push(PendingRule::Pattern(pattern.into()));
        self
    }

    pub fn allow_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow
            .extend(patterns.into_iter().map(|p| PendingRule::Pattern(p.into())));
        self
    }

    pub fn allow_if<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str, &CrawlContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.allow.push(PendingRule::Ready(Rule::predicate(predicate)));
        self
    }

    pub fn deny_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.deny.push(PendingRule::Pattern(pattern.into()));
        self
    }

    pub fn deny_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deny
            .extend(patterns.into_iter().map(|p| PendingRule::Pattern(p.into())));
        self
    }

    pub fn deny_if<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str, &CrawlContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.deny.push(PendingRule::Ready(Rule::predicate(predicate)));
        self
    }

    pub fn extraction_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.extraction_pattern = Some(pattern.into());
        self
    }

    pub fn hooks(mut self, hooks: LifecycleHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> Result<CrawlConfig, ConfigError> {
        let allow = self
            .allow
            .into_iter()
            .map(PendingRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let deny = self
            .deny
            .into_iter()
            .map(PendingRule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        let extractor = match self.extraction_pattern {
            Some(pattern) => AddressExtractor::new(&pattern)?,
            None => AddressExtractor::default(),
        };

        Ok(CrawlConfig {
            rules: RuleSet::new(allow, deny),
            hooks: self.hooks,
            extractor,
        })
    }
}
