// src/crawl/mod.rs
// =============================================================================
// This module is the crawl engine.
//
// Submodules (leaf-first):
// - normalize: turns "/a" and "//host/a" into absolute addresses
// - queue: ordered, de-duplicated list of addresses with a cursor
// - context: read-only view of the queue for rules and hooks
// - rules: allow / deny rules (regex or closure)
// - hooks: optional callbacks around each fetch
// - extract: finds addresses in fetched content
// - fetch: the Fetcher trait and the reqwest-based HttpFetcher
// - config: builds the immutable CrawlConfig
// - report: what a crawl did, serializable to JSON
// - engine: the breadth-first loop tying it all together
// =============================================================================

mod config;
mod context;
mod engine;
mod extract;
mod fetch;
mod hooks;
mod normalize;
mod queue;
mod report;
mod rules;

pub use config::{CrawlConfig, CrawlConfigBuilder};
pub use context::CrawlContext;
pub use engine::{CrawlEngine, CrawlPhase, Seeds};
pub use extract::{AddressExtractor, DEFAULT_ADDRESS_PATTERN};
pub use fetch::{FetchOutcome, FetchSettings, Fetcher, HttpFetcher};
pub use hooks::{FetchDecision, LifecycleHooks};
pub use normalize::{normalize, Origin};
pub use queue::CrawlQueue;
pub use report::{CrawlReport, FetchFailure};
pub use rules::{Rule, RuleSet};
