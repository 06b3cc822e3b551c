//! Bounded blocking FIFO queue.
//!
//! A fixed-capacity ring buffer guarded by one mutex and two condition
//! variables, mirroring the classic two-semaphore bounded-buffer design:
//! `not_full` stands in for the `empty` semaphore, `not_empty` for `full`.
//! Two condvars are used deliberately instead of one. A single "state
//! changed" condvar would force every waiter to re-check the predicate on
//! every wakeup regardless of which side changed it; splitting the two
//! conditions gives the same strict hand-off the semaphore pair gives.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

struct Ring<T> {
    items: VecDeque<T>,
    capacity: usize,
}

/// A bounded, thread-safe FIFO. `put` blocks while full, `get` blocks while
/// empty. Capacity is fixed at construction and never grows.
pub struct BoundedQueue<T> {
    state: Mutex<Ring<T>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<T> BoundedQueue<T> {
    /// Allocate a queue with room for `capacity` items. Capacity is clamped
    /// to at least 1; a zero-capacity queue can never be put to or drained.
    pub fn alloc(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Mutex::new(Ring {
                items: VecDeque::with_capacity(capacity),
                capacity,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Block until there is room, then push `item` at the tail.
    pub fn put(&self, item: T) {
        let mut ring = self.state.lock().unwrap_or_else(|e| e.into_inner());
        while ring.items.len() >= ring.capacity {
            ring = self.not_full.wait(ring).unwrap_or_else(|e| e.into_inner());
        }
        ring.items.push_back(item);
        drop(ring);
        self.not_empty.notify_one();
    }

    /// Block until an item is available, then pop it from the head.
    pub fn get(&self) -> T {
        let mut ring = self.state.lock().unwrap_or_else(|e| e.into_inner());
        while ring.items.is_empty() {
            ring = self.not_empty.wait(ring).unwrap_or_else(|e| e.into_inner());
        }
        let item = ring.items.pop_front().expect("checked non-empty above");
        drop(ring);
        self.not_full.notify_one();
        item
    }

    /// Number of items currently occupying the queue. For diagnostics only;
    /// callers must not use this to decide whether `get`/`put` will block.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).items.len()
    }

    pub fn capacity(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn fifo_order_single_thread() {
        let q = BoundedQueue::alloc(4);
        q.put(1);
        q.put(2);
        q.put(3);
        assert_eq!(q.get(), 1);
        assert_eq!(q.get(), 2);
        assert_eq!(q.get(), 3);
    }

    #[test]
    fn never_exceeds_capacity() {
        let q = Arc::new(BoundedQueue::alloc(2));
        q.put(1);
        q.put(2);
        assert_eq!(q.len(), 2);

        let q2 = Arc::clone(&q);
        let handle = thread::spawn(move || {
            // Blocks until a slot frees up.
            q2.put(3);
        });

        thread::sleep(Duration::from_millis(50));
        assert_eq!(q.len(), 2, "put must block while the queue is full");

        assert_eq!(q.get(), 1);
        handle.join().unwrap();
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn blocked_get_unblocks_on_put() {
        let q = Arc::new(BoundedQueue::alloc(4));
        let q2 = Arc::clone(&q);

        let handle = thread::spawn(move || q2.get());

        thread::sleep(Duration::from_millis(50));
        q.put(42);

        assert_eq!(handle.join().unwrap(), 42);
    }

    #[test]
    fn sentinel_preserves_fifo_position() {
        let q: BoundedQueue<Option<i32>> = BoundedQueue::alloc(4);
        q.put(Some(1));
        q.put(None);
        q.put(Some(2));

        assert_eq!(q.get(), Some(1));
        assert_eq!(q.get(), None);
        assert_eq!(q.get(), Some(2));
    }

    #[test]
    fn fifo_across_many_producers_consumers() {
        let q = Arc::new(BoundedQueue::alloc(8));
        let producers: Vec<_> = (0..4)
            .map(|t| {
                let q = Arc::clone(&q);
                thread::spawn(move || {
                    for i in 0..25 {
                        q.put(t * 25 + i);
                    }
                })
            })
            .collect();

        let consumer_q = Arc::clone(&q);
        let consumer = thread::spawn(move || {
            let mut seen = Vec::with_capacity(100);
            for _ in 0..100 {
                seen.push(consumer_q.get());
            }
            seen
        });

        for p in producers {
            p.join().unwrap();
        }
        let mut seen = consumer.join().unwrap();
        seen.sort_unstable();
        assert_eq!(seen, (0..100).collect::<Vec<_>>());
    }
}
