// src/crawl/queue.rs
// =============================================================================
// The crawl queue: every address we ever decided to visit, in discovery order.
//
// How it works:
// 1. Addresses are appended to the end of a Vec, never removed
// 2. A cursor points at the next address to hand out
// 3. next() returns the address under the cursor and moves the cursor on
// 4. A HashSet remembers what is already in the Vec, so nothing is added twice
//
// Because the Vec only grows and the cursor only moves forward, every address
// is handed out exactly once. That is what makes the crawl terminate: once the
// cursor passes the end and no new addresses were discovered, we're done.
//
// Addresses are normalized against the origin (scheme + host of the very first
// address) *before* the duplicate check, so "/a" and "http://host/a" share a
// single slot.
//
// Rust concepts:
// - Vec + HashSet: ordered storage with O(1) membership checks
// - IntoIterator: enqueue_all accepts Vecs, slices, iterators...
// =============================================================================

use std::collections::HashSet;

use super::normalize::{normalize, Origin};

#[derive(Debug, Default)]
pub struct CrawlQueue {
    addresses: Vec<String>,
    seen: HashSet<String>,
    cursor: usize,
    origin: Option<Origin>,
}

impl CrawlQueue {
    pub fn new() -> Self {
        Self::default()
    }

    // Appends every address that isn't queued yet
    //
    // Returns: how many addresses were actually added
    pub fn enqueue_all<I, S>(&mut self, addresses: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;

        for address in addresses {
            let address = address.as_ref();

            // The first address ever queued defines the origin
            let origin = self
                .origin
                .get_or_insert_with(|| Origin::from_seed(address));
            let address = normalize(address, origin);

            if self.seen.insert(address.clone()) {
                self.addresses.push(address);
                added += 1;
            }
        }

        added
    }

    // Hands out the next address, or None once the queue is exhausted
    pub fn next(&mut self) -> Option<String> {
        let address = self.addresses.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(address)
    }

    // Total number of addresses ever queued (visited ones included)
    pub fn size(&self) -> usize {
        self.addresses.len()
    }

    // Number of addresses already handed out by next()
    pub fn visited(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.addresses.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.addresses.len()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.seen.contains(address)
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    // Scheme and host of the first queued address, if any
    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not a VecDeque like a "normal" BFS?
//    - A VecDeque forgets items once popped
//    - We keep every address so size() can report the full crawl and the
//      report can list everything that was discovered
//    - The cursor plays the role of pop_front()
//
// 2. What does get_or_insert_with do?
//    - If self.origin is None, it runs the closure and stores the result
//    - Either way it returns a reference to the value inside the Option
//
// 3. Why does HashSet::insert return a bool?
//    - true = the value was new, false = it was already there
//    - That single call both checks and records membership
//
// 4. Why does next() clone the String?
//    - The Vec keeps owning its addresses
//    - The caller gets its own copy to pass to the fetcher and hooks
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enqueue_existing_address_is_noop() {
        let mut queue = CrawlQueue::new();
        queue.enqueue_all(["https://example.com/", "https://example.com/a"]);
        let before = queue.size();

        let added = queue.enqueue_all(["https://example.com/a"]);

        assert_eq!(added, 0);
        assert_eq!(queue.size(), before);
    }

    #[test]
    fn test_next_returns_each_address_once_in_order() {
        let mut queue = CrawlQueue::new();
        let addresses = ["http://a.test/", "http://a.test/1", "http://a.test/2"];
        queue.enqueue_all(addresses);

        let mut handed_out = Vec::new();
        for _ in 0..queue.size() {
            handed_out.push(queue.next().unwrap());
        }

        assert_eq!(handed_out, addresses);
        assert_eq!(queue.next(), None);
        assert!(queue.is_exhausted());
    }

    #[test]
    fn test_queue_keeps_growing_after_cursor_moves() {
        let mut queue = CrawlQueue::new();
        queue.enqueue_all(["http://a.test/"]);
        assert_eq!(queue.next().as_deref(), Some("http://a.test/"));
        assert_eq!(queue.next(), None);

        queue.enqueue_all(["http://a.test/more"]);

        assert_eq!(queue.remaining(), 1);
        assert_eq!(queue.next().as_deref(), Some("http://a.test/more"));
        assert_eq!(queue.visited(), 2);
    }

    #[test]
    fn test_relative_and_absolute_spellings_share_a_slot() {
        // Addresses are normalized before the duplicate check, so a
        // root-relative spelling of a queued address is not queued again.
        let mut queue = CrawlQueue::new();
        queue.enqueue_all(["http://host.test/", "http://host.test/a"]);

        let added = queue.enqueue_all(["/a", "//host.test/a"]);

        assert_eq!(added, 0);
        assert_eq!(queue.size(), 2);
    }

    #[test]
    fn test_origin_comes_from_first_address() {
        let mut queue = CrawlQueue::new();
        assert!(queue.origin().is_none());

        queue.enqueue_all(["https://first.test/x", "http://second.test/"]);
        queue.enqueue_all(["/y"]);

        assert_eq!(queue.origin().unwrap().host, "first.test");
        assert!(queue.contains("https://first.test/y"));
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = CrawlQueue::new();
        assert_eq!(queue.size(), 0);
        assert_eq!(queue.next(), None);
        assert_eq!(queue.visited(), 0);
    }
}
