//! Domain model for the Metronome job-scheduling API.
//!
//! This crate contains every entity the client sends to or receives from the
//! service, together with the validated value types they are built from. Values
//! are checked when constructed or decoded, so anything that reaches the
//! transport is already well formed.
//!
//! ## Architectural Layer
//!
//! **Pure data.** This crate has no I/O dependencies. It defines the JSON shape
//! of the API; the `client` crate decides how to move it over HTTP.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`values`] | Closed vocabularies (`Operator`, `MountMode`, policies, `Embed`) and `ContainerPath` |
//! | [`job`] | Request-side entities (`Job`, `Run`, `Volume`, `Constraint`, etc.) |
//! | [`schedule`] | Cron triggers (`Schedule`) |
//! | [`status`] | Read-only outcome records (`JobStatus`, `History`, etc.) |
//! | [`errors`] | Validation error type |

pub mod errors;
pub mod job;
pub mod schedule;
pub mod status;
pub mod values;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::ModelError;
pub use job::{Artifact, Constraint, Docker, Job, Placement, Restart, Run, Volume};
pub use schedule::{Schedule, MIN_STARTING_DEADLINE_SECONDS};
pub use status::{ActiveRun, FinishedRun, History, HistorySummary, JobStatus, TaskStatus};
pub use values::{ConcurrencyPolicy, ContainerPath, Embed, MountMode, Operator, RestartPolicy};
