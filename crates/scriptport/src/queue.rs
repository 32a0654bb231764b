//! Thread-safe hand-off buffer between connection threads and the tick.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Unbounded, insertion-ordered queue of raw payload strings.
///
/// This is the only state shared between the network threads (producers)
/// and the dispatcher tick (sole consumer). Appends from one producer are
/// never reordered relative to each other; interleaving between producers
/// is unspecified beyond the total FIFO order. There is no capacity bound:
/// a sustained producer rate above the consumption rate grows the queue
/// without limit.
#[derive(Debug, Default)]
pub struct RequestQueue {
    entries: Mutex<VecDeque<String>>,
}

impl RequestQueue {
    /// Builds an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a completed payload. Callable from any producer thread.
    pub fn append(&self, payload: String) {
        self.lock_entries().push_back(payload);
    }

    /// Removes and returns all queued payloads in FIFO order.
    ///
    /// Intended for the single consumer on the dispatcher tick.
    #[must_use]
    pub fn drain_all(&self) -> Vec<String> {
        self.lock_entries().drain(..).collect()
    }

    /// Number of payloads currently queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// Whether the queue holds no payloads.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    // A producer panicking mid-append poisons the mutex but leaves the
    // deque itself coherent; recover the guard so the drain keeps working.
    fn lock_entries(&self) -> std::sync::MutexGuard<'_, VecDeque<String>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn drains_in_insertion_order() {
        let queue = RequestQueue::new();
        queue.append("first".to_string());
        queue.append("second".to_string());
        queue.append("third".to_string());

        assert_eq!(queue.drain_all(), vec!["first", "second", "third"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn drain_on_empty_queue_returns_nothing() {
        let queue = RequestQueue::new();
        assert!(queue.drain_all().is_empty());
    }

    #[test]
    fn concurrent_appends_preserve_per_producer_order() {
        const PRODUCERS: usize = 8;
        const PER_PRODUCER: usize = 100;

        let queue = Arc::new(RequestQueue::new());
        let workers: Vec<_> = (0..PRODUCERS)
            .map(|producer| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for sequence in 0..PER_PRODUCER {
                        queue.append(format!("{producer}:{sequence}"));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("producer thread");
        }

        let drained = queue.drain_all();
        assert_eq!(drained.len(), PRODUCERS * PER_PRODUCER);

        for producer in 0..PRODUCERS {
            let prefix = format!("{producer}:");
            let sequences: Vec<usize> = drained
                .iter()
                .filter_map(|entry| entry.strip_prefix(&prefix))
                .map(|sequence| sequence.parse().expect("sequence number"))
                .collect();
            let mut sorted = sequences.clone();
            sorted.sort_unstable();
            assert_eq!(sequences, sorted, "producer {producer} was reordered");
        }
    }
}
