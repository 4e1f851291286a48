//! Deterministic fixed-delay timer queue.
//!
//! Stands in for host timers: tasks are scheduled relative to a virtual
//! clock and handed back by [`TimerQueue::advance`] once due. Nothing can be
//! cancelled, and two tasks scheduled for the same instant come back in the
//! order they were scheduled.

#[derive(Debug)]
struct Scheduled<T> {
    deadline_ms: u64,
    task: T,
}

/// Pending tasks ordered by deadline, then by scheduling order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now_ms: u64,
    /// Sorted by deadline; ties keep insertion order.
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            pending: Vec::new(),
        }
    }

    /// Virtual time elapsed since the queue was created.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `task` to become due `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, task: T) {
        let deadline_ms = self.now_ms.saturating_add(delay_ms);
        // Insert after every entry due at or before this deadline.
        let pos = self
            .pending
            .partition_point(|s| s.deadline_ms <= deadline_ms);
        self.pending.insert(pos, Scheduled { deadline_ms, task });
    }

    /// Move time forward by `elapsed_ms` and return every task that became
    /// due, earliest first.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<T> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        let due = self
            .pending
            .partition_point(|s| s.deadline_ms <= self.now_ms);
        self.pending.drain(..due).map(|s| s.task).collect()
    }

    /// Number of tasks not yet due.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Milliseconds until the next task is due, if any.
    pub fn next_due_in(&self) -> Option<u64> {
        self.pending
            .first()
            .map(|s| s.deadline_ms.saturating_sub(self.now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_fires_early() {
        let mut q = TimerQueue::new();
        q.schedule(200, "navigate");
        assert!(q.advance(199).is_empty());
        assert_eq!(q.advance(1), vec!["navigate"]);
        assert!(q.is_empty());
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(200, "late");
        q.schedule(100, "early");
        assert_eq!(q.advance(500), vec!["early", "late"]);
    }

    #[test]
    fn ties_fire_in_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(200, "style");
        q.schedule(200, "location");
        q.schedule(200, "third");
        assert_eq!(q.advance(200), vec!["style", "location", "third"]);
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut q = TimerQueue::new();
        q.advance(1000);
        q.schedule(100, "a");
        assert_eq!(q.next_due_in(), Some(100));
        assert!(q.advance(99).is_empty());
        assert_eq!(q.advance(1), vec!["a"]);
        assert_eq!(q.now_ms(), 1100);
    }

    #[test]
    fn next_due_in_tracks_the_earliest_task() {
        let mut q = TimerQueue::new();
        assert_eq!(q.next_due_in(), None);
        q.schedule(20, 2);
        q.schedule(10, 1);
        assert_eq!(q.next_due_in(), Some(10));
        q.advance(15);
        assert_eq!(q.next_due_in(), Some(5));
        assert_eq!(q.len(), 1);
    }
}
