//! Simulation domain models.
//!
//! Provides the task type, the id-addressed arena that owns tasks during a
//! run, and the workload configuration supplied from outside the core.
//!
//! # Ownership
//!
//! | Type | Owns | Referenced by |
//! |------|------|---------------|
//! | `TaskArena` | every `Task` | ids in queues and buckets |
//! | `WorkloadConfig` | `TaskSpec`s and `SimParams` | converted into a workload |

mod arena;
mod task;
mod workload;

pub use arena::TaskArena;
pub use task::{Task, TaskId, MAX_PRIORITY, PRIORITY_LEVELS};
pub use workload::{SimParams, TaskSpec, WorkloadConfig, MAX_PERIOD_UNITS};
