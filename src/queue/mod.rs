//! Ready queues.
//!
//! Two containers decide which task gets the next turn inside a tick:
//!
//! - **`FifoQueue`**: plain round-robin, unconditional pop-head.
//! - **`PriorityBuckets`**: 128 FIFO buckets, highest priority first,
//!   skipping tasks already served in the current tick pass.
//!
//! Both store task ids only; the tasks themselves live in a
//! [`TaskArena`](crate::models::TaskArena).

mod buckets;
mod fifo;

pub use buckets::PriorityBuckets;
pub use fifo::FifoQueue;

use crate::models::{Task, TaskArena, TaskId};

/// Selection policy seam used by the tick runner.
///
/// The runner owns the tick loop; implementors only decide ordering.
pub trait ReadyQueue {
    /// Policy name for logs and reports.
    fn name(&self) -> &'static str;

    /// Removes and returns the next task to serve in this tick pass.
    ///
    /// Returns `None` when no eligible task is left for the pass.
    fn next_task(&mut self, arena: &TaskArena) -> Option<TaskId>;

    /// Puts a surviving task back after its turn.
    fn requeue(&mut self, task: &mut Task);

    /// Called once after every tick pass.
    fn finish_tick(&mut self, arena: &mut TaskArena);

    /// Anti-starvation rotation, applied when a tick finished no task.
    ///
    /// `last_priority` is the priority of the last task served in the tick.
    fn rotate_stalled(&mut self, last_priority: u8);

    /// Whether no task is queued.
    fn is_empty(&self) -> bool;

    /// Number of queued tasks.
    fn len(&self) -> usize;
}
