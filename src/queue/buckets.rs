//! Priority bucket array.
//!
//! # Algorithm
//!
//! One FIFO bucket per priority level. Selection scans from the highest
//! level down and takes the head of the first bucket whose head has not yet
//! had a turn in the current tick pass. Served tasks are re-appended to the
//! tail of their own bucket, which yields round-robin inside a level.
//!
//! # Complexity
//! O(128) per selection; the bucket count is a small constant.

use serde::{Deserialize, Serialize};

use super::{FifoQueue, ReadyQueue};
use crate::models::{Task, TaskArena, TaskId, PRIORITY_LEVELS};

/// 128 FIFO queues indexed by priority.
///
/// A task id sits in at most one bucket: the one matching its priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBuckets {
    buckets: Vec<FifoQueue>,
}

impl PriorityBuckets {
    /// Creates 128 empty buckets.
    pub fn new() -> Self {
        Self {
            buckets: vec![FifoQueue::new(); PRIORITY_LEVELS],
        }
    }

    /// Appends a task to the tail of its bucket (priority clamped to 127).
    pub fn push(&mut self, task: &Task) {
        self.buckets[task.bucket()].push(task.id);
    }

    /// Removes the head of the highest non-empty bucket whose head is untouched.
    ///
    /// A touched head hides the rest of its bucket for the current pass.
    pub fn pop_highest_unprocessed(&mut self, arena: &TaskArena) -> Option<TaskId> {
        let level = self.buckets.iter().rposition(|bucket| {
            bucket
                .peek()
                .is_some_and(|id| arena.get(id).is_some_and(|t| !t.touched_this_tick))
        })?;
        self.buckets[level].pop()
    }

    /// Whether every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(FifoQueue::is_empty)
    }

    /// Total number of queued ids.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(FifoQueue::len).sum()
    }

    /// Resets `touched_this_tick` on every resident task.
    pub fn clear_touched_flags(&self, arena: &mut TaskArena) {
        for id in self.buckets.iter().flat_map(FifoQueue::iter) {
            if let Some(task) = arena.get_mut(id) {
                task.touched_this_tick = false;
            }
        }
    }

    /// Moves the head of one bucket to its tail.
    pub fn rotate(&mut self, priority: u8) {
        if let Some(bucket) = self.buckets.get_mut(usize::from(priority)) {
            bucket.rotate();
        }
    }

    /// Bucket for a priority level.
    pub fn bucket(&self, priority: u8) -> Option<&FifoQueue> {
        self.buckets.get(usize::from(priority))
    }

    /// All queued ids, priority 127 down to 0, FIFO inside each bucket.
    pub fn iter_by_priority(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.buckets.iter().rev().flat_map(FifoQueue::iter)
    }

    /// Empties every bucket.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(FifoQueue::clear);
    }
}

impl Default for PriorityBuckets {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadyQueue for PriorityBuckets {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn next_task(&mut self, arena: &TaskArena) -> Option<TaskId> {
        self.pop_highest_unprocessed(arena)
    }

    fn requeue(&mut self, task: &mut Task) {
        task.touched_this_tick = true;
        self.push(task);
    }

    fn finish_tick(&mut self, arena: &mut TaskArena) {
        self.clear_touched_flags(arena);
    }

    fn rotate_stalled(&mut self, last_priority: u8) {
        self.rotate(last_priority);
    }

    fn is_empty(&self) -> bool {
        PriorityBuckets::is_empty(self)
    }

    fn len(&self) -> usize {
        PriorityBuckets::len(self)
    }
}
