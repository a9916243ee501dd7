//! Deterministic timer queue driving the spin sequencer
//!
//! Replaces callback chaining with an explicit prioritized queue: actions
//! are scheduled at absolute timestamps on the engine's logical clock and
//! drained in due order by `tick`. Entries with equal due times fire in
//! scheduling order (stable FIFO via a monotonic sequence number).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// An engine-internal action fired at its due time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Begin a column's scroll motion (after its stagger delay)
    StartScroll { column: u8 },
    /// A column's scroll completed: fix the outcome and start settling
    FinishScroll { column: u8 },
    /// A column's settle-bounce finished (cosmetic)
    SettleDone { column: u8 },
    /// The payline overlay finished fading out
    OverlayHidden,
}

#[derive(Debug, Clone)]
struct Entry {
    due_ms: f64,
    seq: u64,
    action: Action,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the earliest due
        // time (then lowest seq) on top
        other
            .due_ms
            .total_cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Prioritized timer queue
#[derive(Debug, Default)]
pub struct Scheduler {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an action at an absolute timestamp
    pub fn schedule(&mut self, due_ms: f64, action: Action) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            due_ms,
            seq,
            action,
        });
    }

    /// Pop the earliest action due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(f64, Action)> {
        if self.heap.peek().is_some_and(|e| e.due_ms <= now_ms) {
            self.heap.pop().map(|e| (e.due_ms, e.action))
        } else {
            None
        }
    }

    /// Next due timestamp, if any
    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.due_ms)
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop all pending entries
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_due_order() {
        let mut sched = Scheduler::new();
        sched.schedule(960.0, Action::FinishScroll { column: 2 });
        sched.schedule(800.0, Action::FinishScroll { column: 0 });
        sched.schedule(880.0, Action::FinishScroll { column: 1 });

        assert_eq!(
            sched.pop_due(1000.0),
            Some((800.0, Action::FinishScroll { column: 0 }))
        );
        assert_eq!(
            sched.pop_due(1000.0),
            Some((880.0, Action::FinishScroll { column: 1 }))
        );
        assert_eq!(
            sched.pop_due(1000.0),
            Some((960.0, Action::FinishScroll { column: 2 }))
        );
        assert_eq!(sched.pop_due(1000.0), None);
    }

    #[test]
    fn test_holds_future_entries() {
        let mut sched = Scheduler::new();
        sched.schedule(500.0, Action::SettleDone { column: 0 });

        assert_eq!(sched.pop_due(499.9), None);
        assert_eq!(sched.len(), 1);
        assert!(sched.pop_due(500.0).is_some());
        assert!(sched.is_empty());
    }

    #[test]
    fn test_equal_due_times_fire_in_schedule_order() {
        let mut sched = Scheduler::new();
        sched.schedule(100.0, Action::StartScroll { column: 0 });
        sched.schedule(100.0, Action::StartScroll { column: 1 });
        sched.schedule(100.0, Action::StartScroll { column: 2 });

        let mut cols = Vec::new();
        while let Some((_, Action::StartScroll { column })) = sched.pop_due(100.0) {
            cols.push(column);
        }
        assert_eq!(cols, vec![0, 1, 2]);
    }

    #[test]
    fn test_clear() {
        let mut sched = Scheduler::new();
        sched.schedule(10.0, Action::OverlayHidden);
        sched.clear();
        assert!(sched.is_empty());
        assert_eq!(sched.next_due(), None);
    }
}
