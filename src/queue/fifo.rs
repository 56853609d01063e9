//! FIFO queue of task ids.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::{PriorityBuckets, ReadyQueue};
use crate::models::{Task, TaskArena, TaskId};

/// Ordered list of task ids with O(1) push-tail and pop-head.
///
/// Owns no task memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FifoQueue {
    ids: VecDeque<TaskId>,
}

impl FifoQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens a bucket array into one service order.
    ///
    /// Priority 127 down to 0, FIFO inside each bucket. The priority ranking
    /// only fixes the initial positions; the queue itself never preempts.
    pub fn from_buckets(buckets: &PriorityBuckets) -> Self {
        Self {
            ids: buckets.iter_by_priority().collect(),
        }
    }

    /// Appends at the tail.
    #[inline]
    pub fn push(&mut self, id: TaskId) {
        self.ids.push_back(id);
    }

    /// Removes the head.
    #[inline]
    pub fn pop(&mut self) -> Option<TaskId> {
        self.ids.pop_front()
    }

    /// Head without removing it.
    #[inline]
    pub fn peek(&self) -> Option<TaskId> {
        self.ids.front().copied()
    }

    /// Moves the head to the tail.
    pub fn rotate(&mut self) {
        if let Some(id) = self.ids.pop_front() {
            self.ids.push_back(id);
        }
    }

    /// Whether the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of queued ids.
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Iterates head to tail.
    pub fn iter(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.ids.iter().copied()
    }

    /// Drops every id.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl ReadyQueue for FifoQueue {
    fn name(&self) -> &'static str {
        "fifo"
    }

    fn next_task(&mut self, _arena: &TaskArena) -> Option<TaskId> {
        self.pop()
    }

    fn requeue(&mut self, task: &mut Task) {
        self.push(task.id);
    }

    fn finish_tick(&mut self, _arena: &mut TaskArena) {}

    fn rotate_stalled(&mut self, _last_priority: u8) {
        self.rotate();
    }

    fn is_empty(&self) -> bool {
        FifoQueue::is_empty(self)
    }

    fn len(&self) -> usize {
        FifoQueue::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let mut q = FifoQueue::new();
        q.push(3);
        q.push(1);
        q.push(2);
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop(), Some(3));
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), Some(2));
        assert_eq!(q.pop(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn test_rotate() {
        let mut q = FifoQueue::new();
        q.rotate(); // no-op on empty
        q.push(0);
        q.push(1);
        q.rotate();
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![1, 0]);
        assert_eq!(q.peek(), Some(1));
    }

    #[test]
    fn test_from_buckets_orders_by_priority() {
        let mut arena = TaskArena::new();
        let low = arena.insert(1, vec![1]);
        let high = arena.insert(9, vec![1]);
        let low2 = arena.insert(1, vec![1]);
        let top = arena.insert(127, vec![1]);

        let mut buckets = PriorityBuckets::new();
        for task in arena.iter() {
            buckets.push(task);
        }

        let q = FifoQueue::from_buckets(&buckets);
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![top, high, low, low2]);
    }

    #[test]
    fn test_ready_queue_requeue_appends() {
        let mut arena = TaskArena::new();
        arena.insert(0, vec![1]);
        arena.insert(0, vec![1]);
        let mut q = FifoQueue::new();
        q.push(0);
        q.push(1);

        let id = q.next_task(&arena).unwrap();
        let task = arena.get_mut(id).unwrap();
        q.requeue(task);
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![1, 0]);
    }
}
