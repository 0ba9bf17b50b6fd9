//! Deadline-ordered timers polled from the frame loop.
//!
//! Nothing fires on its own: the driver calls [`TimerQueue::poll`] once per
//! frame with the current clock reading and handles whatever came due.
//! Timers due at the same instant fire in the order they were scheduled.
//!
//! ```ignore
//! let mut timers = TimerQueue::new();
//! let handle = timers.schedule("revert", Duration::from_millis(2000));
//!
//! // Later, in the frame loop:
//! for (_handle, key) in timers.poll(time.elapsed_duration()) {
//!     // ...
//! }
//! ```

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};
use std::time::Duration;

/// Identifies one scheduled timer, for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Entry<K> {
    deadline: Duration,
    seq: u64,
    key: K,
}

impl<K> PartialEq for Entry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<K> Eq for Entry<K> {}

impl<K> PartialOrd for Entry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Entry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.deadline, self.seq).cmp(&(other.deadline, other.seq))
    }
}

/// A min-heap of timers keyed by deadline.
///
/// Cancelled timers stay in the heap until they reach the front and are
/// discarded there.
#[derive(Debug)]
pub struct TimerQueue<K> {
    heap: BinaryHeap<Reverse<Entry<K>>>,
    /// Sequence numbers of timers that have neither fired nor been cancelled.
    live: HashSet<u64>,
    next_seq: u64,
}

impl<K> TimerQueue<K> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashSet::new(),
            next_seq: 0,
        }
    }

    /// Schedule `key` to come due at `deadline`.
    pub fn schedule(&mut self, key: K, deadline: Duration) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { deadline, seq, key }));
        self.live.insert(seq);
        TimerHandle(seq)
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let cancelled = self.live.remove(&handle.0);
        self.discard_stale();
        cancelled
    }

    /// Remove and return every live timer with `deadline <= now`, earliest
    /// first.
    pub fn poll(&mut self, now: Duration) -> Vec<(TimerHandle, K)> {
        let mut due = Vec::new();
        while let Some(Reverse(entry)) = self.heap.peek() {
            if entry.deadline > now {
                break;
            }
            if let Some(Reverse(entry)) = self.heap.pop() {
                if self.live.remove(&entry.seq) {
                    due.push((TimerHandle(entry.seq), entry.key));
                }
            }
        }
        self.discard_stale();
        due
    }

    /// Deadline of the next live timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(entry)| entry.deadline)
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether no timers are live.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Drop every timer without firing it.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
    }

    /// Pop cancelled entries off the front so `next_deadline` stays exact.
    fn discard_stale(&mut self) {
        while let Some(Reverse(entry)) = self.heap.peek() {
            if self.live.contains(&entry.seq) {
                break;
            }
            self.heap.pop();
        }
    }
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn keys<K>(due: Vec<(TimerHandle, K)>) -> Vec<K> {
        due.into_iter().map(|(_, key)| key).collect()
    }

    #[test]
    fn test_poll_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule("late", ms(300));
        timers.schedule("early", ms(100));
        timers.schedule("middle", ms(200));

        assert!(timers.poll(ms(99)).is_empty());
        assert_eq!(keys(timers.poll(ms(250))), vec!["early", "middle"]);
        assert_eq!(keys(timers.poll(ms(1000))), vec!["late"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut timers = TimerQueue::new();
        for key in 0..5 {
            timers.schedule(key, ms(10));
        }
        assert_eq!(keys(timers.poll(ms(10))), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerQueue::new();
        let a = timers.schedule('a', ms(10));
        let b = timers.schedule('b', ms(20));

        assert!(timers.cancel(a));
        assert!(!timers.cancel(a));
        assert_eq!(timers.next_deadline(), Some(ms(20)));
        assert_eq!(timers.len(), 1);

        assert_eq!(timers.poll(ms(100)), vec![(b, 'b')]);
        assert!(!timers.cancel(b));
    }

    #[test]
    fn test_clear() {
        let mut timers = TimerQueue::new();
        timers.schedule(1, ms(1));
        timers.clear();
        assert!(timers.poll(ms(10)).is_empty());
        assert_eq!(timers.next_deadline(), None);
    }
}
