// src/crawl/context.rs
// =============================================================================
// A read-only window onto the running crawl.
//
// Predicate rules and lifecycle hooks get a CrawlContext alongside the
// address they are looking at. It lets them make decisions based on how far
// the crawl has got ("stop after 100 pages", "only follow links while the
// queue is small") without being able to modify the queue.
// =============================================================================

use super::normalize::Origin;
use super::queue::CrawlQueue;

#[derive(Debug, Clone, Copy)]
pub struct CrawlContext<'a> {
    queue: &'a CrawlQueue,
}

impl<'a> CrawlContext<'a> {
    pub fn new(queue: &'a CrawlQueue) -> Self {
        Self { queue }
    }

    /// Total addresses queued so far, visited ones included
    pub fn queue_size(&self) -> usize {
        self.queue.size()
    }

    /// Addresses already taken off the queue (fetched, failed or skipped)
    pub fn visited(&self) -> usize {
        self.queue.visited()
    }

    /// Scheme and host of the first seed
    pub fn origin(&self) -> Option<&'a Origin> {
        self.queue.origin()
    }

    pub fn is_queued(&self, address: &str) -> bool {
        self.queue.contains(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_reflects_queue_state() {
        let mut queue = CrawlQueue::new();
        queue.enqueue_all(["http://a.test/", "/x", "http://b.test/y"]);
        queue.next();

        let ctx = CrawlContext::new(&queue);

        assert_eq!(ctx.queue_size(), 3);
        assert_eq!(ctx.visited(), 1);
        assert_eq!(ctx.origin(), Some(&Origin::from_seed("http://a.test/")));
    }

    #[test]
    fn test_is_queued_matches_normalized_addresses() {
        let mut queue = CrawlQueue::new();
        queue.enqueue_all(["http://a.test/", "/x"]);
        let ctx = CrawlContext::new(&queue);

        // Relative links are stored resolved against the first seed
        assert!(ctx.is_queued("http://a.test/x"));
        assert!(ctx.is_queued("http://a.test/"));
        assert!(!ctx.is_queued("/x"));
        assert!(!ctx.is_queued("http://a.test/y"));
    }

    #[test]
    fn test_empty_queue_has_no_origin() {
        let queue = CrawlQueue::new();
        let ctx = CrawlContext::new(&queue);

        assert_eq!(ctx.origin(), None);
        assert!(!ctx.is_queued("http://a.test/"));
    }
}
