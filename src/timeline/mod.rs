//! Execution timeline.
//!
//! A grid of per-unit symbols: one row per task slot, `tick_length` cells per
//! tick. Rows never move, so a task keeps its row after it finishes (its
//! remaining cells stay [`CellState::Off`]).
//!
//! # Layout
//! Cells are stored tick-major in one vector, so growing the tick dimension
//! only appends and never relocates written cells.

mod render;

pub use render::{TimelineRender, TICKS_PER_LINE};

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::models::TaskId;

/// Initial tick capacity of a fresh table.
pub const INITIAL_TICK_CAPACITY: usize = 6;

/// What a task was doing during one time unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Not scheduled in this tick.
    #[default]
    Off,
    /// Consumed one processing unit.
    Processing,
    /// Waiting for input between periods.
    InputWait,
    /// Holding the processor for the rest of a tick with nothing to do.
    ScheduledIdle,
}

impl CellState {
    /// Printable symbol.
    pub fn symbol(self) -> char {
        match self {
            Self::Off => ' ',
            Self::Processing => 'P',
            Self::InputWait => 'i',
            Self::ScheduledIdle => '-',
        }
    }
}

/// Growable grid of [`CellState`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineTable {
    rows: usize,
    tick_length: usize,
    tick_capacity: usize,
    cells: Vec<CellState>,
}

impl TimelineTable {
    /// Creates a table with [`INITIAL_TICK_CAPACITY`] ticks, all cells Off.
    pub fn new(rows: usize, tick_length: u32) -> SimResult<Self> {
        let mut table = Self {
            rows,
            tick_length: tick_length as usize,
            tick_capacity: 0,
            cells: Vec::new(),
        };
        table.grow_to(INITIAL_TICK_CAPACITY)?;
        Ok(table)
    }

    /// Number of task rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cells per tick.
    #[inline]
    pub fn tick_length(&self) -> usize {
        self.tick_length
    }

    /// Ticks currently allocated.
    #[inline]
    pub fn tick_capacity(&self) -> usize {
        self.tick_capacity
    }

    /// Makes `tick_index` writable, doubling capacity as often as needed.
    ///
    /// Previously written cells keep their values and coordinates.
    pub fn ensure_capacity(&mut self, tick_index: usize) -> SimResult<()> {
        if tick_index < self.tick_capacity {
            return Ok(());
        }
        let mut target = self.tick_capacity.max(1);
        while target <= tick_index {
            target *= 2;
        }
        self.grow_to(target)
    }

    fn grow_to(&mut self, ticks: usize) -> SimResult<()> {
        let len = ticks * self.rows * self.tick_length;
        let additional = len.saturating_sub(self.cells.len());
        self.cells
            .try_reserve_exact(additional)
            .map_err(|e| SimError::allocation(ticks, e))?;
        self.cells.resize(len, CellState::Off);
        self.tick_capacity = ticks;
        Ok(())
    }

    #[inline]
    fn index(&self, tick: usize, row: TaskId, offset: usize) -> usize {
        debug_assert!(tick < self.tick_capacity, "tick {tick} not allocated");
        debug_assert!(row < self.rows, "row {row} out of range");
        debug_assert!(offset < self.tick_length, "offset {offset} outside tick");
        (tick * self.rows + row) * self.tick_length + offset
    }

    /// Writes one cell. `offset` must be in `[0, tick_length)`.
    #[inline]
    pub fn write(&mut self, tick: usize, row: TaskId, offset: usize, state: CellState) {
        let idx = self.index(tick, row, offset);
        self.cells[idx] = state;
    }

    /// Reads one cell; `None` outside the allocated grid.
    pub fn get(&self, tick: usize, row: TaskId, offset: usize) -> Option<CellState> {
        if tick >= self.tick_capacity || row >= self.rows || offset >= self.tick_length {
            return None;
        }
        Some(self.cells[self.index(tick, row, offset)])
    }

    /// The cells of one row inside one tick.
    pub fn tick_row(&self, tick: usize, row: TaskId) -> &[CellState] {
        let start = self.index(tick, row, 0);
        &self.cells[start..start + self.tick_length]
    }

    /// Counts cells in `state` for one row over the first `ticks` ticks.
    pub fn count_in_row(&self, row: TaskId, ticks: usize, state: CellState) -> usize {
        (0..ticks.min(self.tick_capacity))
            .flat_map(|t| self.tick_row(t, row))
            .filter(|&&c| c == state)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_off() {
        let table = TimelineTable::new(3, 4).unwrap();
        assert_eq!(table.tick_capacity(), INITIAL_TICK_CAPACITY);
        assert_eq!(table.get(5, 2, 3), Some(CellState::Off));
        assert_eq!(table.get(6, 0, 0), None);
        assert_eq!(table.get(0, 3, 0), None);
        assert_eq!(table.get(0, 0, 4), None);
    }

    #[test]
    fn test_write_and_read() {
        let mut table = TimelineTable::new(2, 3).unwrap();
        table.write(1, 1, 2, CellState::InputWait);
        assert_eq!(table.get(1, 1, 2), Some(CellState::InputWait));
        assert_eq!(table.get(1, 0, 2), Some(CellState::Off));
        assert_eq!(
            table.tick_row(1, 1),
            &[CellState::Off, CellState::Off, CellState::InputWait]
        );
    }

    #[test]
    fn test_growth_doubles_and_preserves_cells() {
        let mut table = TimelineTable::new(2, 2).unwrap();
        table.write(0, 0, 0, CellState::Processing);
        table.write(5, 1, 1, CellState::ScheduledIdle);

        table.ensure_capacity(5).unwrap();
        assert_eq!(table.tick_capacity(), 6);

        table.ensure_capacity(6).unwrap();
        assert_eq!(table.tick_capacity(), 12);
        assert_eq!(table.get(0, 0, 0), Some(CellState::Processing));
        assert_eq!(table.get(5, 1, 1), Some(CellState::ScheduledIdle));
        assert_eq!(table.get(11, 1, 1), Some(CellState::Off));

        table.ensure_capacity(40).unwrap();
        assert_eq!(table.tick_capacity(), 48);
        assert_eq!(table.get(0, 0, 0), Some(CellState::Processing));
        assert_eq!(table.get(5, 1, 1), Some(CellState::ScheduledIdle));
    }

    #[test]
    fn test_zero_rows() {
        let mut table = TimelineTable::new(0, 3).unwrap();
        table.ensure_capacity(100).unwrap();
        assert_eq!(table.get(0, 0, 0), None);
    }

    #[test]
    fn test_count_in_row() {
        let mut table = TimelineTable::new(1, 2).unwrap();
        table.write(0, 0, 0, CellState::Processing);
        table.write(0, 0, 1, CellState::Processing);
        table.write(2, 0, 1, CellState::Processing);
        assert_eq!(table.count_in_row(0, 3, CellState::Processing), 3);
        assert_eq!(table.count_in_row(0, 2, CellState::Processing), 2);
    }

    #[test]
    fn test_symbols_distinct() {
        let symbols = [
            CellState::Off.symbol(),
            CellState::Processing.symbol(),
            CellState::InputWait.symbol(),
            CellState::ScheduledIdle.symbol(),
        ];
        for (i, a) in symbols.iter().enumerate() {
            for b in &symbols[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
