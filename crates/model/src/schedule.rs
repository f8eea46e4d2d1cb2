//! Recurring triggers attached to a job.

use serde::{Deserialize, Serialize};

use crate::{ConcurrencyPolicy, ModelError};

/// Smallest starting deadline the service accepts.
pub const MIN_STARTING_DEADLINE_SECONDS: u64 = 2;

/// A cron-driven trigger for a job.
///
/// `next_run_at` is reported by the service and is never sent meaningfully;
/// a locally built schedule leaves it absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    id: String,
    cron: String,
    concurrency_policy: ConcurrencyPolicy,
    enabled: bool,
    starting_deadline_seconds: u64,
    timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next_run_at: Option<String>,
}

impl Schedule {
    /// Creates an enabled schedule in UTC with `ALLOW` concurrency and a 60 second
    /// starting deadline.
    pub fn new(id: impl Into<String>, cron: impl Into<String>) -> Result<Self, ModelError> {
        let schedule = Self {
            id: id.into(),
            cron: cron.into(),
            concurrency_policy: ConcurrencyPolicy::Allow,
            enabled: true,
            starting_deadline_seconds: 60,
            timezone: "UTC".to_string(),
            next_run_at: None,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn with_concurrency_policy(mut self, policy: ConcurrencyPolicy) -> Self {
        self.concurrency_policy = policy;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_starting_deadline_seconds(mut self, seconds: u64) -> Self {
        self.starting_deadline_seconds = seconds;
        self
    }

    /// Sets the IANA timezone the cron expression is evaluated in.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Checks the client-side invariants.
    ///
    /// Decoded schedules are not validated automatically; the client calls this
    /// before sending a schedule on create or update.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.id.is_empty() {
            return Err(ModelError::Required { field: "Schedule.id" });
        }
        if self.cron.is_empty() {
            return Err(ModelError::Required { field: "Schedule.cron" });
        }
        if self.starting_deadline_seconds < MIN_STARTING_DEADLINE_SECONDS {
            return Err(ModelError::InvalidValue {
                field: "Schedule.startingDeadlineSeconds",
                reason: format!(
                    "must be at least {MIN_STARTING_DEADLINE_SECONDS}, got {}",
                    self.starting_deadline_seconds
                ),
            });
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cron(&self) -> &str {
        &self.cron
    }

    pub fn concurrency_policy(&self) -> ConcurrencyPolicy {
        self.concurrency_policy
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn starting_deadline_seconds(&self) -> u64 {
        self.starting_deadline_seconds
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn next_run_at(&self) -> Option<&str> {
        self.next_run_at.as_deref()
    }
}
