//! Text rendering of a timeline table.

use std::fmt;

use super::{CellState, TimelineTable};

/// Ticks shown per block of lines.
pub const TICKS_PER_LINE: usize = 15;

/// Printable view of a finished run's timeline.
///
/// Produced by [`RunReport::render`](crate::scheduler::RunReport::render);
/// the caller decides whether to print it.
#[derive(Debug, Clone, Copy)]
pub struct TimelineRender<'a> {
    /// Policy name shown in the header.
    pub policy: &'a str,
    /// Table to draw.
    pub table: &'a TimelineTable,
    /// Ticks actually simulated.
    pub tick_count: usize,
    /// Unused budget per tick.
    pub downtime: &'a [u32],
    /// Processing need / elapsed units.
    pub utilization: f64,
}

impl TimelineRender<'_> {
    fn write_block(&self, f: &mut fmt::Formatter<'_>, start: usize, end: usize) -> fmt::Result {
        let len = self.table.tick_length();

        f.write_str("Idle ")?;
        for tick in start..end {
            let idle = (self.downtime.get(tick).copied().unwrap_or(0) as usize).min(len);
            write!(f, "{}{}|", " ".repeat(len - idle), "*".repeat(idle))?;
        }
        writeln!(f)?;

        f.write_str("Tick ")?;
        for tick in start..end {
            write!(f, "{:>len$}|", tick % 100)?;
        }
        writeln!(f)?;

        f.write_str("-----")?;
        for _ in start..end {
            write!(f, "{}+", "-".repeat(len))?;
        }
        writeln!(f)?;

        for row in 0..self.table.rows() {
            write!(f, "  {row:2} ")?;
            for tick in start..end {
                for &cell in self.table.tick_row(tick, row) {
                    write!(f, "{}", cell.symbol())?;
                }
                f.write_str("|")?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for TimelineRender<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.table.tick_length();
        let ticks = self.tick_count.min(self.table.tick_capacity());

        writeln!(f, "=== EXECUTION TIMELINE ({}) ===", self.policy)?;
        writeln!(
            f,
            "Legend: {}=processing, {}=input wait, {}=scheduled idle, '{}'=off, *=cpu idle",
            CellState::Processing.symbol(),
            CellState::InputWait.symbol(),
            CellState::ScheduledIdle.symbol(),
            CellState::Off.symbol(),
        )?;
        writeln!(f)?;

        for start in (0..ticks).step_by(TICKS_PER_LINE) {
            let end = (start + TICKS_PER_LINE).min(ticks);
            if ticks > TICKS_PER_LINE {
                writeln!(f, "--- Ticks {}-{} ---", start, end - 1)?;
            }
            self.write_block(f, start, end)?;
        }

        let total_downtime: u64 = self.downtime.iter().map(|&d| u64::from(d)).sum();
        writeln!(f, "=== SUMMARY ===")?;
        writeln!(f, "Total ticks: {ticks}")?;
        writeln!(f, "Tasks: {}", self.table.rows())?;
        writeln!(f, "Time units per tick: {len}")?;
        writeln!(f, "Total time units: {}", ticks * len)?;
        writeln!(f, "Total downtime: {total_downtime}")?;
        write!(f, "Utilization: {:.6}", self.utilization)
    }
}
