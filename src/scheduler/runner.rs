//! Tick loop shared by both policies.
//!
//! # Algorithm
//!
//! ```text
//! while queue not empty:
//!     budget = tick_length
//!     repeat (live tasks at tick start) times:
//!         id = queue.next_task()   // None ends the pass early
//!         turn(id)                 // see `turn`
//!         finished -> destroy      else -> queue.requeue()
//!     queue.finish_tick()
//!     downtime[tick] = budget left
//!     no task finished and queue not empty -> queue.rotate_stalled(last priority)
//! ```
//!
//! The rotation keeps a level that never completes work cycling its order,
//! so under ties the same task does not lead every tick.

use log::debug;

use super::turn::{take_turn, TickBudget, TurnOutcome};
use super::{Policy, RunReport};
use crate::error::{SimError, SimResult};
use crate::models::{SimParams, TaskArena, MAX_PRIORITY};
use crate::queue::ReadyQueue;
use crate::timeline::TimelineTable;

/// Drains `queue` (backed by `arena`) tick by tick.
///
/// Both structures are consumed destructively; pass a snapshot.
pub fn run_queue<Q: ReadyQueue>(
    policy: Policy,
    mut arena: TaskArena,
    mut queue: Q,
    params: &SimParams,
) -> SimResult<RunReport> {
    let tick_length = params.tick_length;
    if tick_length == 0 && !queue.is_empty() {
        return Err(SimError::ZeroTickLength { queued: queue.len() });
    }
    let total_work = arena.total_work();
    let mut timeline = TimelineTable::new(arena.capacity(), tick_length)?;
    let mut downtime = Vec::new();
    let mut active = arena.live_count();
    let mut tick_index = 0usize;

    while !queue.is_empty() {
        timeline.ensure_capacity(tick_index)?;

        let mut tick = TickBudget::new(tick_index, tick_length);
        let active_at_start = active;
        let mut last_priority = None;

        for _ in 0..active_at_start {
            let Some(id) = queue.next_task(&arena) else {
                break;
            };
            let task = arena.get_mut(id).ok_or(SimError::MissingTask { id })?;

            let outcome = take_turn(task, &mut tick, &mut timeline, params.input_time);
            last_priority = Some(task.priority.min(MAX_PRIORITY));

            match outcome {
                TurnOutcome::Finished => {
                    arena.remove(id);
                    active -= 1;
                }
                TurnOutcome::Continue => queue.requeue(task),
            }
        }

        queue.finish_tick(&mut arena);
        downtime.push(tick.remaining);
        debug!(
            "{} tick {}: consumed {}/{}, {} task(s) left",
            queue.name(),
            tick_index,
            tick.consumed(),
            tick_length,
            active
        );

        if active == active_at_start && !queue.is_empty() {
            if let Some(priority) = last_priority {
                queue.rotate_stalled(priority);
            }
        }
        tick_index += 1;
    }

    Ok(RunReport {
        policy,
        tick_count: tick_index,
        tick_length,
        downtime,
        total_work,
        timeline,
    })
}
