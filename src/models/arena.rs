//! Task arena.
//!
//! Tasks live in id-indexed slots. Queues and buckets hold only ids, so a
//! task keeps its timeline row for its whole life and destroying it is just
//! emptying the slot.

use serde::{Deserialize, Serialize};

use super::{Task, TaskId};

/// Owner of every task in a workload, addressed by [`TaskId`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskArena {
    slots: Vec<Option<Task>>,
}

impl TaskArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a task, assigning it the next id.
    pub fn insert(&mut self, priority: u8, periods: Vec<u32>) -> TaskId {
        let id = self.slots.len();
        self.slots.push(Some(Task::new(id, priority, periods)));
        id
    }

    /// Live task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    /// Mutable live task by id.
    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.slots.get_mut(id).and_then(Option::as_mut)
    }

    /// Destroys a task, returning it if it was alive.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        self.slots.get_mut(id).and_then(Option::take)
    }

    /// Number of slots ever allocated (= timeline rows).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live tasks.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Iterates over live tasks in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.slots.iter().flatten()
    }

    /// Total processing need of all live tasks.
    pub fn total_work(&self) -> u64 {
        self.iter().map(Task::total_work).sum()
    }
}
