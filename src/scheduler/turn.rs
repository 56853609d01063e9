//! Tick engine: one task's turn inside a tick.
//!
//! # Algorithm
//!
//! A turn runs four phases in order and writes the task's own row of the
//! current tick, starting at offset 0:
//!
//! 1. **Processing**: spend the tick's shared budget on `residual`. The CPU is
//!    a single resource, so processing cells are placed after the units
//!    earlier turns already consumed in this tick.
//! 2. **Termination**: last period drained means the task is done; the caller
//!    destroys it and nothing else is written.
//! 3. **Input**: a closed period owes `input_time` units of input wait before
//!    the next period starts. Input does not use the budget. Once paid, the
//!    cursor advances; the new period is processed from the next turn on.
//!    A turn therefore holds at most one processing phase.
//! 4. **Scheduled idle**: a task that processed during this turn holds the
//!    rest of its row for the tick.

use log::trace;

use crate::models::Task;
use crate::timeline::{CellState, TimelineTable};

/// Shared state of the tick currently being simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickBudget {
    /// Tick index (timeline column group).
    pub index: usize,
    /// Units per tick.
    pub length: u32,
    /// Processing units not yet consumed in this tick.
    pub remaining: u32,
}

impl TickBudget {
    /// Starts tick `index` with a full budget.
    pub fn new(index: usize, length: u32) -> Self {
        Self {
            index,
            length,
            remaining: length,
        }
    }

    /// Units consumed so far in this tick.
    #[inline]
    pub fn consumed(&self) -> u32 {
        self.length - self.remaining
    }
}

/// Result of a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// All periods are done; the task must be destroyed.
    Finished,
    /// The task has work (or input) left.
    Continue,
}

/// Runs one turn of `task` in the tick described by `tick`.
pub fn take_turn(
    task: &mut Task,
    tick: &mut TickBudget,
    table: &mut TimelineTable,
    input_time: u32,
) -> TurnOutcome {
    let len = tick.length;
    let mut offset = 0u32;
    task.became_active = false;

    if task.residual > 0 {
        offset = tick.consumed();
    }
    while task.residual > 0 && offset < len && tick.remaining > 0 {
        table.write(tick.index, task.id, offset as usize, CellState::Processing);
        task.residual -= 1;
        tick.remaining -= 1;
        task.became_active = true;
        offset += 1;
    }

    if task.is_terminal() {
        trace!("tick {}: task {} finished", tick.index, task.id);
        return TurnOutcome::Finished;
    }

    if task.residual == 0 {
        if task.pending_input == 0 {
            task.pending_input = input_time;
        }
        while task.pending_input > 0 && offset < len {
            table.write(tick.index, task.id, offset as usize, CellState::InputWait);
            task.pending_input -= 1;
            offset += 1;
        }
        if task.pending_input == 0 {
            task.advance_period();
            trace!(
                "tick {}: task {} entered period {}",
                tick.index,
                task.id,
                task.period_cursor
            );
        }
    }

    if task.became_active {
        while offset < len {
            table.write(tick.index, task.id, offset as usize, CellState::ScheduledIdle);
            offset += 1;
        }
    }
    TurnOutcome::Continue
}
