//! Discrete-tick scheduling simulator.
//!
//! Models one processor servicing synthetic tasks under two policies
//! (strict priority with round-robin inside a level, and FIFO round-robin)
//! and reports an execution timeline with utilization and downtime.
//! Time is an abstract unit count; runs are single-threaded and fully
//! deterministic.
//!
//! # Modules
//!
//! - **`models`**: `Task`, `TaskArena`, `WorkloadConfig`, `SimParams`
//! - **`queue`**: `FifoQueue`, `PriorityBuckets`, the `ReadyQueue` seam
//! - **`timeline`**: growable `TimelineTable` and its text rendering
//! - **`scheduler`**: tick engine, policy loops, `Simulator`, sweeps
//! - **`validation`**: boundary checks for workload configurations
//! - **`error`**: `SimError`
//!
//! # Example
//!
//! ```
//! use u_tick::models::{SimParams, TaskSpec};
//! use u_tick::scheduler::{Policy, Simulator};
//!
//! let mut sim = Simulator::from_specs(&[
//!     TaskSpec::new(1, vec![2]),
//!     TaskSpec::new(1, vec![2]),
//! ]);
//! let report = sim.run(Policy::Priority, &SimParams::new(0, 2)).unwrap();
//! assert_eq!(report.tick_count, 2);
//! assert_eq!(report.total_downtime(), 0);
//! println!("{}", report.render());
//! ```

pub mod error;
pub mod models;
pub mod queue;
pub mod scheduler;
pub mod timeline;
pub mod validation;

pub use error::{SimError, SimResult};
