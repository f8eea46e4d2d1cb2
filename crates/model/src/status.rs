//! Server-reported run outcomes.
//!
//! These types are decode targets only. They are `#[non_exhaustive]`, so code
//! outside this crate can read their fields but never construct one; every
//! instance comes from a service response. Timestamps are kept as the strings
//! the service sent (e.g. `2016-12-12T19:27:59.057+0000`).

use serde::{Deserialize, Serialize};

/// Status of one run of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct JobStatus {
    pub id: String,
    pub job_id: String,
    /// Run lifecycle state as reported, e.g. `INITIAL`, `ACTIVE`, `SUCCESS`.
    pub status: String,
    pub created_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub tasks: Vec<TaskStatus>,
}

/// A run that is currently in flight, as embedded under `activeRuns`.
pub type ActiveRun = JobStatus;

/// One Mesos task launched for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct TaskStatus {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// A completed run, listed in [`History`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct FinishedRun {
    pub id: String,
    pub created_at: String,
    pub finished_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct History {
    pub success_count: u64,
    pub failure_count: u64,
    #[serde(default)]
    pub last_success_at: Option<String>,
    #[serde(default)]
    pub last_failure_at: Option<String>,
    #[serde(default)]
    pub successful_finished_runs: Vec<FinishedRun>,
    #[serde(default)]
    pub failed_finished_runs: Vec<FinishedRun>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct HistorySummary {
    pub success_count: u64,
    pub failure_count: u64,
    #[serde(default)]
    pub last_success_at: Option<String>,
    #[serde(default)]
    pub last_failure_at: Option<String>,
}
