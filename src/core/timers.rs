//! Core domain: scheduled single-shot timers keyed by absolute expiry.
//!
//! Timers never block the tick. The owner polls [`TimerQueue::pop_due`]
//! once per tick with the current simulation time and applies whatever
//! expired. Scheduling a key that is already pending replaces it, so a
//! key has at most one live expiry at a time.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

#[derive(Debug, Clone, Copy)]
struct Scheduled<K> {
    at: f32,
    seq: u64,
    key: K,
}

impl<K> PartialEq for Scheduled<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K> Eq for Scheduled<K> {}

impl<K> PartialOrd for Scheduled<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Scheduled<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Equal expiries fire in scheduling order
        self.at
            .total_cmp(&other.at)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    heap: BinaryHeap<Reverse<Scheduled<K>>>,
    /// Live entry per key: (sequence number, expiry)
    live: HashMap<K, (u64, f32)>,
    next_seq: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<K: Copy + Eq + Hash> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `key` to fire at absolute time `at`, replacing any pending expiry.
    pub fn schedule(&mut self, key: K, at: f32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.live.insert(key, (seq, at));
        self.heap.push(Reverse(Scheduled { at, seq, key }));
    }

    /// Drop the pending expiry for `key`. Returns whether one was pending.
    #[allow(dead_code)]
    pub fn cancel(&mut self, key: K) -> bool {
        self.live.remove(&key).is_some()
    }

    #[allow(dead_code)]
    pub fn is_pending(&self, key: K) -> bool {
        self.live.contains_key(&key)
    }

    #[allow(dead_code)]
    pub fn expiry(&self, key: K) -> Option<f32> {
        self.live.get(&key).map(|&(_, at)| at)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
    }

    /// Pop the earliest timer whose expiry is at or before `now`.
    pub fn pop_due(&mut self, now: f32) -> Option<K> {
        while let Some(Reverse(top)) = self.heap.peek() {
            if top.at > now {
                return None;
            }
            let Some(Reverse(entry)) = self.heap.pop() else {
                return None;
            };
            // Superseded or cancelled entries stay in the heap until they surface
            match self.live.get(&entry.key) {
                Some(&(seq, _)) if seq == entry.seq => {
                    self.live.remove(&entry.key);
                    return Some(entry.key);
                }
                _ => continue,
            }
        }
        None
    }
}
