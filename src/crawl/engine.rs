// src/crawl/engine.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. Put the seed addresses in the queue
// 2. Take the next address off the queue (stop when there is none)
// 3. Ask the before-fetch hook whether to fetch it at all
// 4. Fetch it
//    - failure: report it (hook or log warning) and go back to 2
//    - success: let the after-success hook swap the content if it wants
// 5. Extract addresses from the content and queue the new ones
// 6. Go back to 2
//
// One address is fully processed before the next one is taken, so there is
// exactly one request in flight at any time. Nothing inside the loop can
// stop it early: the crawl ends when the queue runs dry.
//
// Rust concepts:
// - Generics: CrawlEngine<F> works with any Fetcher
// - async fn: the fetch is the only point where the loop waits
// - while let: loop until queue.next() returns None
// =============================================================================

use super::config::CrawlConfig;
use super::context::CrawlContext;
use super::fetch::{FetchOutcome, Fetcher};
use super::hooks::FetchDecision;
use super::normalize::{normalize, Origin};
use super::queue::CrawlQueue;
use super::report::{CrawlReport, FetchFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    Idle,
    Running,
    Done,
}

// Seed addresses: one address or a list of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seeds(Vec<String>);

impl Seeds {
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for Seeds {
    fn from(seed: &str) -> Self {
        Seeds(vec![seed.to_string()])
    }
}

impl From<String> for Seeds {
    fn from(seed: String) -> Self {
        Seeds(vec![seed])
    }
}

impl From<Vec<String>> for Seeds {
    fn from(seeds: Vec<String>) -> Self {
        Seeds(seeds)
    }
}

impl From<Vec<&str>> for Seeds {
    fn from(seeds: Vec<&str>) -> Self {
        Seeds(seeds.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Seeds {
    fn from(seeds: &[&str]) -> Self {
        Seeds(seeds.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Seeds {
    fn from(seeds: [&str; N]) -> Self {
        Seeds(seeds.iter().map(|s| s.to_string()).collect())
    }
}

pub struct CrawlEngine<F> {
    config: CrawlConfig,
    fetcher: F,
    phase: CrawlPhase,
}

impl<F: Fetcher> CrawlEngine<F> {
    pub fn new(config: CrawlConfig, fetcher: F) -> Self {
        Self {
            config,
            fetcher,
            phase: CrawlPhase::Idle,
        }
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    // Crawls breadth-first from the seeds until the queue is exhausted
    //
    // Never fails: every fetch failure ends up in the returned report.
    pub async fn crawl(&mut self, seeds: impl Into<Seeds>) -> CrawlReport {
        let seeds = seeds.into().into_vec();
        self.phase = CrawlPhase::Running;

        let mut queue = CrawlQueue::new();
        queue.enqueue_all(&seeds);
        let mut report = CrawlReport::new(seeds);

        tracing::info!(seeds = queue.size(), "crawl started");

        let CrawlConfig {
            rules,
            hooks,
            extractor,
        } = &self.config;

        while let Some(address) = queue.next() {
            let origin = queue.origin().cloned().unwrap_or_else(|| Origin::from_seed(""));
            let address = normalize(&address, &origin);
            let ctx = CrawlContext::new(&queue);

            if hooks.check_before_fetch(&address, &ctx) == FetchDecision::Skip {
                tracing::debug!(%address, "skipped by before-fetch hook");
                report.skipped.push(address);
                continue;
            }

            tracing::debug!(
                %address,
                visited = queue.visited(),
                queued = queue.size(),
                "fetching"
            );

            let content = match self.fetcher.fetch(&address).await {
                FetchOutcome::Content(content) => content,
                FetchOutcome::Failure(message) => {
                    if !hooks.notify_fail(&address, &message, &ctx) {
                        tracing::warn!(%address, "fetch failed: {}", message);
                    }
                    report.failures.push(FetchFailure { address, message });
                    continue;
                }
            };

            let content = hooks.apply_after_success(&address, content, &ctx);
            let discovered = extractor.extract(&content, rules, hooks, &ctx);
            let added = queue.enqueue_all(&discovered);

            tracing::info!(
                %address,
                discovered = discovered.len(),
                added,
                remaining = queue.remaining(),
                "fetched"
            );
            report.fetched.push(address);
        }

        report.queued = queue.addresses().to_vec();
        self.phase = CrawlPhase::Done;

        tracing::info!(
            fetched = report.fetched.len(),
            failed = report.failures.len(),
            skipped = report.skipped.len(),
            "crawl finished"
        );

        report
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does crawl() take &mut self?
//    - It records the phase (Idle -> Running -> Done) on the engine
//    - The queue itself is a local variable: a fresh one for every crawl
//
// 2. What is `let CrawlConfig { rules, hooks, extractor } = &self.config;`?
//    - Destructuring a reference gives us three references at once
//    - Shorter than writing self.config.rules everywhere in the loop
//
// 3. Why is CrawlContext created inside the loop?
//    - It borrows the queue immutably
//    - queue.enqueue_all() needs a mutable borrow later in the same iteration
//    - The borrow checker is happy because ctx is no longer used by then
//
// 4. impl<const N: usize> From<[&str; N]>
//    - "const generics": one impl covers arrays of any length
//    - So engine.crawl(["http://a", "http://b"]) just works
// -----------------------------------------------------------------------------
