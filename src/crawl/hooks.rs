// src/crawl/hooks.rs
// =============================================================================
// Optional extension points in the fetch lifecycle.
//
//   before_fetch   (address, ctx)            -> FetchDecision  may veto a fetch
//   after_success  (address, content, ctx)   -> Option<String> may replace content
//   after_fail     (address, message, ctx)                     replaces the default warning
//   after_extract  (addresses, content, ctx)                   observe only
//
// A hook that isn't set means "do the default thing", never an error.
//
// Hooks are plain Fn closures. If a hook needs to keep state (counters,
// collected pages...) it uses interior mutability: an AtomicUsize, a Mutex.
// =============================================================================

use std::fmt;

use super::context::CrawlContext;

// What the before-fetch hook wants done with an address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDecision {
    Proceed,
    /// Skip this address: no fetch, no failure report, nothing extracted
    Skip,
}

pub type BeforeFetchHook = Box<dyn Fn(&str, &CrawlContext<'_>) -> FetchDecision + Send + Sync>;
pub type AfterSuccessHook =
    Box<dyn Fn(&str, &str, &CrawlContext<'_>) -> Option<String> + Send + Sync>;
pub type AfterFailHook = Box<dyn Fn(&str, &str, &CrawlContext<'_>) + Send + Sync>;
pub type AfterExtractHook = Box<dyn Fn(&[String], &str, &CrawlContext<'_>) + Send + Sync>;

#[derive(Default)]
pub struct LifecycleHooks {
    before_fetch: Option<BeforeFetchHook>,
    after_success: Option<AfterSuccessHook>,
    after_fail: Option<AfterFailHook>,
    after_extract: Option<AfterExtractHook>,
}

impl LifecycleHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before_fetch<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &CrawlContext<'_>) -> FetchDecision + Send + Sync + 'static,
    {
        self.before_fetch = Some(Box::new(hook));
        self
    }

    // Returning Some(content) replaces what was fetched (an empty string
    // included); None keeps the fetched content.
    pub fn after_success<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &str, &CrawlContext<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.after_success = Some(Box::new(hook));
        self
    }

    pub fn after_fail<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &str, &CrawlContext<'_>) + Send + Sync + 'static,
    {
        self.after_fail = Some(Box::new(hook));
        self
    }

    pub fn after_extract<F>(mut self, hook: F) -> Self
    where
        F: Fn(&[String], &str, &CrawlContext<'_>) + Send + Sync + 'static,
    {
        self.after_extract = Some(Box::new(hook));
        self
    }

    // Runs the before-fetch hook; without one every address proceeds
    pub fn check_before_fetch(&self, address: &str, ctx: &CrawlContext<'_>) -> FetchDecision {
        match &self.before_fetch {
            Some(hook) => hook(address, ctx),
            None => FetchDecision::Proceed,
        }
    }

    // Runs the after-success hook and returns the content to extract from
    pub fn apply_after_success(
        &self,
        address: &str,
        content: String,
        ctx: &CrawlContext<'_>,
    ) -> String {
        match &self.after_success {
            Some(hook) => hook(address, &content, ctx).unwrap_or(content),
            None => content,
        }
    }

    // Runs the after-fail hook
    //
    // Returns: false when no hook is set, so the caller reports the failure
    pub fn notify_fail(&self, address: &str, message: &str, ctx: &CrawlContext<'_>) -> bool {
        match &self.after_fail {
            Some(hook) => {
                hook(address, message, ctx);
                true
            }
            None => false,
        }
    }

    pub fn notify_extract(&self, addresses: &[String], content: &str, ctx: &CrawlContext<'_>) {
        if let Some(hook) = &self.after_extract {
            hook(addresses, content, ctx);
        }
    }
}

impl fmt::Debug for LifecycleHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHooks")
            .field("before_fetch", &self.before_fetch.is_some())
            .field("after_success", &self.after_success.is_some())
            .field("after_fail", &self.after_fail.is_some())
            .field("after_extract", &self.after_extract.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::queue::CrawlQueue;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_defaults_when_no_hooks_set() {
        let queue = CrawlQueue::new();
        let ctx = CrawlContext::new(&queue);
        let hooks = LifecycleHooks::new();

        assert_eq!(hooks.check_before_fetch("http://a.test/", &ctx), FetchDecision::Proceed);
        assert_eq!(
            hooks.apply_after_success("http://a.test/", "body".to_string(), &ctx),
            "body"
        );
        assert!(!hooks.notify_fail("http://a.test/", "boom", &ctx));
    }

    #[test]
    fn test_after_success_replaces_only_when_some() {
        let queue = CrawlQueue::new();
        let ctx = CrawlContext::new(&queue);
        let hooks = LifecycleHooks::new().after_success(|address, _, _| {
            address.ends_with("/rewrite").then(|| "replaced".to_string())
        });

        assert_eq!(
            hooks.apply_after_success("http://a.test/rewrite", "body".to_string(), &ctx),
            "replaced"
        );
        assert_eq!(
            hooks.apply_after_success("http://a.test/keep", "body".to_string(), &ctx),
            "body"
        );
    }

    #[test]
    fn test_after_fail_hook_receives_message() {
        let queue = CrawlQueue::new();
        let ctx = CrawlContext::new(&queue);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let hooks = LifecycleHooks::new().after_fail(move |address, message, _| {
            sink.lock().unwrap().push(format!("{} {}", address, message));
        });

        assert!(hooks.notify_fail("http://a.test/", "HTTP 404 Not Found", &ctx));
        assert_eq!(*seen.lock().unwrap(), vec!["http://a.test/ HTTP 404 Not Found"]);
    }
}
