//! Maps parsed commands onto [`Metronome`] calls.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use client::{twenty_four_hours_ago, Metronome};

use crate::cli::{Command, JobCommand, RunCommand, ScheduleCommand};

/// What a command prints on success.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Rendered as pretty JSON.
    Json(Value),
    /// Printed verbatim.
    Text(String),
}

impl Output {
    fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Output::Json(
            serde_json::to_value(value).context("failed to render result")?,
        ))
    }

    pub fn render(&self) -> Result<String> {
        match self {
            Output::Json(value) => {
                serde_json::to_string_pretty(value).context("failed to render result")
            }
            Output::Text(text) => Ok(text.clone()),
        }
    }
}

/// Executes one command against `service`.
pub async fn run(command: &Command, service: &dyn Metronome) -> Result<Output> {
    match command {
        Command::Job(job) => run_job(job, service).await,
        Command::Run(run) => run_run(run, service).await,
        Command::Schedule(schedule) => run_schedule(schedule, service).await,
        Command::Metrics => Ok(Output::Json(
            service.metrics().await.context("failed to read metrics")?,
        )),
        Command::Ping => Ok(Output::Text(service.ping().await.context("ping failed")?)),
    }
}

async fn run_job(command: &JobCommand, service: &dyn Metronome) -> Result<Output> {
    match command {
        JobCommand::Create { job, run_now } => {
            let definition = job.to_job()?;
            let created = service
                .create_job(&definition)
                .await
                .with_context(|| format!("failed to create job '{}'", definition.id()))?;
            if !*run_now {
                return Output::json(&created);
            }
            info!(job_id = %created.id(), "starting run");
            let status = service
                .start_job(created.id())
                .await
                .with_context(|| format!("job '{}' was created but could not be started", created.id()))?;
            Output::json(&status)
        }
        JobCommand::Update { job } => {
            let definition = job.to_job()?;
            let updated = service
                .update_job(definition.id(), &definition)
                .await
                .with_context(|| format!("failed to update job '{}'", definition.id()))?;
            Ok(Output::Json(updated))
        }
        JobCommand::Delete { job_id } => {
            let deleted = service
                .delete_job(job_id)
                .await
                .with_context(|| format!("failed to delete job '{job_id}'"))?;
            Output::json(&deleted)
        }
        JobCommand::Get { job_id } => {
            let job = service
                .get_job(job_id, &[])
                .await
                .with_context(|| format!("failed to get job '{job_id}'"))?;
            Output::json(&job)
        }
        JobCommand::Ls => {
            let jobs = service.jobs(&[]).await.context("failed to list jobs")?;
            Output::json(&jobs)
        }
        JobCommand::History { job_id, since_ms } => {
            let since = since_ms.unwrap_or_else(twenty_four_hours_ago);
            let job = service
                .job_history(job_id, since)
                .await
                .with_context(|| format!("failed to get history of job '{job_id}'"))?;
            Output::json(&job)
        }
    }
}

async fn run_run(command: &RunCommand, service: &dyn Metronome) -> Result<Output> {
    match command {
        RunCommand::Ls { job_id } => {
            let runs = service
                .runs(job_id)
                .await
                .with_context(|| format!("failed to list runs of job '{job_id}'"))?;
            Output::json(&runs)
        }
        RunCommand::Start { job_id } => {
            let status = service
                .start_job(job_id)
                .await
                .with_context(|| format!("failed to start job '{job_id}'"))?;
            Output::json(&status)
        }
        RunCommand::Get { job_id, run_id } => {
            let status = service
                .run_status(job_id, run_id)
                .await
                .with_context(|| format!("failed to get run '{run_id}' of job '{job_id}'"))?;
            Output::json(&status)
        }
        RunCommand::Stop { job_id, run_id } => {
            let stopped = service
                .stop_run(job_id, run_id)
                .await
                .with_context(|| format!("failed to stop run '{run_id}' of job '{job_id}'"))?;
            Ok(Output::Json(stopped))
        }
    }
}

async fn run_schedule(command: &ScheduleCommand, service: &dyn Metronome) -> Result<Output> {
    match command {
        ScheduleCommand::Create(args) => {
            let schedule = args.to_schedule()?;
            let created = service
                .create_schedule(&args.job_id, &schedule)
                .await
                .with_context(|| format!("failed to create schedule for job '{}'", args.job_id))?;
            Output::json(&created)
        }
        ScheduleCommand::Update(args) => {
            let schedule = args.to_schedule()?;
            let updated = service
                .update_schedule(&args.job_id, &args.sched_id, &schedule)
                .await
                .with_context(|| {
                    format!(
                        "failed to update schedule '{}' of job '{}'",
                        args.sched_id, args.job_id
                    )
                })?;
            Ok(Output::Json(updated))
        }
        ScheduleCommand::Get { job_id, sched_id } => {
            let schedule = service
                .get_schedule(job_id, sched_id)
                .await
                .with_context(|| format!("failed to get schedule '{sched_id}' of job '{job_id}'"))?;
            Output::json(&schedule)
        }
        ScheduleCommand::Delete { job_id, sched_id } => {
            let deleted = service
                .delete_schedule(job_id, sched_id)
                .await
                .with_context(|| {
                    format!("failed to delete schedule '{sched_id}' of job '{job_id}'")
                })?;
            Ok(Output::Json(deleted))
        }
        ScheduleCommand::Ls { job_id } => {
            let schedules = service
                .schedules(job_id)
                .await
                .with_context(|| format!("failed to list schedules of job '{job_id}'"))?;
            Output::json(&schedules)
        }
    }
}
