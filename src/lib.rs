// src/lib.rs
// =============================================================================
// crawl-queue: a breadth-first web crawler.
//
// Give it one or more seed addresses and it keeps fetching pages, pulling
// quoted addresses out of them, filtering those through allow/deny rules and
// queueing the new ones, until there is nothing left to fetch.
//
//   let config = CrawlConfig::builder()
//       .allow_pattern(r"^https://example\.com/")
//       .deny_pattern("/admin")
//       .build()?;
//   let fetcher = HttpFetcher::new(&FetchSettings::default())?;
//   let report = CrawlEngine::new(config, fetcher)
//       .crawl("https://example.com/")
//       .await;
//
// Modules:
// - crawl: the engine and everything it is built from
// - settings: JSON settings file + command-line merge
// - error: configuration errors
// - logging: tracing subscriber setup
// =============================================================================

pub mod crawl;
pub mod error;
pub mod logging;
pub mod settings;

pub use crawl::{CrawlConfig, CrawlEngine, CrawlReport, FetchSettings, HttpFetcher};
pub use error::ConfigError;
pub use settings::Settings;
