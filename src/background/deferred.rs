use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Internal wrapper ordering work by due time, then by submission order
struct ScheduledTask<A> {
    due_ms: f64,
    seq: u64,
    action: A,
}

impl<A> PartialEq for ScheduledTask<A> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl<A> Eq for ScheduledTask<A> {}

impl<A> PartialOrd for ScheduledTask<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for ScheduledTask<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: earliest due first, then earliest submission
        other
            .due_ms
            .total_cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// One-shot delayed actions on a virtual clock.
///
/// The clock only moves when [`advance`](Self::advance) is called, so the
/// owner decides when deferred work runs. Dropping the queue drops all pending
/// work.
pub struct DeferredQueue<A> {
    now_ms: f64,
    next_seq: u64,
    heap: BinaryHeap<ScheduledTask<A>>,
}

impl<A> DeferredQueue<A> {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            next_seq: 0,
            heap: BinaryHeap::new(),
        }
    }

    /// Schedules `action` to become due `delay_ms` from the current clock.
    pub fn schedule(&mut self, delay_ms: u64, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(ScheduledTask {
            due_ms: self.now_ms + delay_ms as f64,
            seq,
            action,
        });
    }

    /// Moves the clock forward and returns every action that became due, in order.
    pub fn advance(&mut self, delta_ms: f64) -> Vec<A> {
        self.now_ms += delta_ms.max(0.0);

        let mut due = Vec::new();
        while self
            .heap
            .peek()
            .is_some_and(|task| task.due_ms <= self.now_ms)
        {
            if let Some(task) = self.heap.pop() {
                due.push(task.action);
            }
        }
        due
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<A> Default for DeferredQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_fire_when_due() {
        let mut queue = DeferredQueue::new();
        queue.schedule(1000, "popup");

        assert!(queue.advance(999.0).is_empty());
        assert_eq!(queue.advance(1.0), vec!["popup"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_due_order_then_submission_order() {
        let mut queue = DeferredQueue::new();
        queue.schedule(500, "b");
        queue.schedule(100, "a");
        queue.schedule(500, "c");

        assert_eq!(queue.advance(1000.0), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_delay_is_relative_to_clock() {
        let mut queue = DeferredQueue::new();
        queue.advance(250.0);
        queue.schedule(100, 1);

        assert!(queue.advance(99.0).is_empty());
        assert_eq!(queue.advance(1.0), vec![1]);
    }
}
