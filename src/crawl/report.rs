// src/crawl/report.rs
// =============================================================================
// What happened during a crawl.
//
// The engine fills one CrawlReport per crawl() call. main.rs prints it as a
// table or, with --json, serializes it with serde.
// =============================================================================

use serde::{Deserialize, Serialize};

// A fetch that didn't produce content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub address: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    /// The seeds exactly as given to crawl()
    pub seeds: Vec<String>,
    /// Every address that entered the queue, in queue order
    pub queued: Vec<String>,
    /// Addresses fetched successfully, in fetch order
    pub fetched: Vec<String>,
    /// Addresses vetoed by the before-fetch hook
    pub skipped: Vec<String>,
    pub failures: Vec<FetchFailure>,
}

impl CrawlReport {
    pub fn new(seeds: Vec<String>) -> Self {
        Self {
            seeds,
            ..Self::default()
        }
    }

    // Number of fetch attempts (successful or not)
    pub fn attempts(&self) -> usize {
        self.fetched.len() + self.failures.len()
    }

    /// true when no fetch failed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
