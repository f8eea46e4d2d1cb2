//! Command-line definitions for the `metronome` binary.

use std::time::Duration;

use anyhow::{ensure, Result};
use clap::{Args, Parser, Subcommand};

use client::ClientConfig;
use model::{
    Artifact, ConcurrencyPolicy, Constraint, Docker, Job, Placement, Restart, RestartPolicy, Run,
    Schedule, Volume,
};

use crate::args::{parse_artifact, parse_key_value, parse_volume};

/// Command-line client for the Metronome job scheduler.
#[derive(Parser, Debug)]
#[command(name = "metronome")]
#[command(version)]
pub struct Cli {
    /// Base URL of the Metronome service
    #[arg(long, env = "METRONOME_URL", default_value = "http://localhost:9000")]
    pub metronome_url: String,

    /// Log every request and enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Authorization token, sent as `token=<value>`
    #[arg(long, env = "METRONOME_AUTH_TOKEN")]
    pub authorization: Option<String>,

    /// HTTP basic auth user
    #[arg(long, env = "METRONOME_USER")]
    pub user: Option<String>,

    /// HTTP basic auth password
    #[arg(long, env = "METRONOME_PASSWORD")]
    pub password: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "METRONOME_TIMEOUT", default_value_t = 5)]
    pub timeout: u64,

    /// Accept unverifiable TLS certificates
    #[arg(long)]
    pub insecure: bool,

    /// Write logs as JSON
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            url: self.metronome_url.clone(),
            request_timeout: Duration::from_secs(self.timeout),
            allow_unverified_tls: self.insecure,
            debug: self.debug,
            auth_token: self.authorization.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Job definitions
    #[command(subcommand)]
    Job(JobCommand),
    /// Job runs
    #[command(subcommand)]
    Run(RunCommand),
    /// Job schedules
    #[command(subcommand)]
    Schedule(ScheduleCommand),
    /// Service metrics
    Metrics,
    /// Check that the service answers
    Ping,
}

#[derive(Subcommand, Debug)]
pub enum JobCommand {
    /// Create a job
    Create {
        #[command(flatten)]
        job: JobArgs,
        /// Start a run as soon as the job is created
        #[arg(long)]
        run_now: bool,
    },
    /// Replace a job definition
    Update {
        #[command(flatten)]
        job: JobArgs,
    },
    /// Delete a job
    Delete {
        #[arg(long)]
        job_id: String,
    },
    /// Show a job
    Get {
        #[arg(long)]
        job_id: String,
    },
    /// List jobs
    Ls,
    /// Show a job with its runs, schedules and history
    History {
        #[arg(long)]
        job_id: String,
        /// Only include runs since this time, in milliseconds since the epoch [default: 24 hours ago]
        #[arg(long)]
        since_ms: Option<i64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum RunCommand {
    /// List the runs of a job
    Ls {
        #[arg(long)]
        job_id: String,
    },
    /// Start a run now
    Start {
        #[arg(long)]
        job_id: String,
    },
    /// Show a run
    Get {
        #[arg(long)]
        job_id: String,
        #[arg(long)]
        run_id: String,
    },
    /// Stop a run
    Stop {
        #[arg(long)]
        job_id: String,
        #[arg(long)]
        run_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ScheduleCommand {
    /// Attach a schedule to a job
    Create(ScheduleArgs),
    /// Replace a schedule
    Update(ScheduleArgs),
    /// Show a schedule
    Get {
        #[arg(long)]
        job_id: String,
        #[arg(long)]
        sched_id: String,
    },
    /// Delete a schedule
    Delete {
        #[arg(long)]
        job_id: String,
        #[arg(long)]
        sched_id: String,
    },
    /// List the schedules of a job
    Ls {
        #[arg(long)]
        job_id: String,
    },
}

/// Flags describing a job definition.
#[derive(Args, Debug, Clone)]
pub struct JobArgs {
    #[arg(long)]
    pub job_id: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Container image to run in
    #[arg(long)]
    pub docker_image: Option<String>,

    #[arg(long, default_value_t = 0.2)]
    pub cpus: f64,

    /// Memory in MiB
    #[arg(long, default_value_t = 128)]
    pub memory: u32,

    /// Disk in MiB
    #[arg(long, default_value_t = 128)]
    pub disk: u32,

    /// NEVER or ON_FAILURE
    #[arg(long, default_value = "NEVER")]
    pub restart_policy: RestartPolicy,

    #[arg(long, default_value_t = 0)]
    pub restart_active_deadline_seconds: u64,

    /// Placement rule `ATTRIBUTE EQ|LIKE|UNLIKE VALUE` (repeatable)
    #[arg(long = "constraint")]
    pub constraints: Vec<Constraint>,

    /// `CONTAINER_PATH:HOST_PATH[:RO|RW]` (repeatable)
    #[arg(long = "volume", value_parser = parse_volume)]
    pub volumes: Vec<Volume>,

    /// `uri=URI [executable=BOOL] [extract=BOOL] [cache=BOOL]` (repeatable)
    #[arg(long = "artifact", value_parser = parse_artifact)]
    pub artifacts: Vec<Artifact>,

    /// Argument passed to the container (repeatable)
    #[arg(long = "arg", allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Environment variable `NAME=VALUE` (repeatable)
    #[arg(long = "env", value_parser = parse_key_value)]
    pub env: Vec<(String, String)>,

    /// Label `KEY=VALUE` (repeatable)
    #[arg(long = "label", value_parser = parse_key_value)]
    pub labels: Vec<(String, String)>,

    /// User the run executes as
    #[arg(long, default_value = "root")]
    pub user: String,

    /// Shell command to run
    #[arg(long)]
    pub cmd: Option<String>,

    /// Seconds to wait for the run to start before giving up
    #[arg(long, default_value_t = 900, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_launch_delay: u32,
}

impl JobArgs {
    /// Assembles the job definition these flags describe.
    pub fn to_job(&self) -> Result<Job> {
        ensure!(
            self.cmd.is_some() || self.docker_image.is_some(),
            "a command (--cmd) or a docker image (--docker-image) is required"
        );

        let mut run = Run::new(self.cpus, self.memory, self.disk)?
            .with_artifacts(self.artifacts.clone())
            .with_args(self.args.clone())
            .with_env(self.env.iter().cloned().collect())
            .with_max_launch_delay(self.max_launch_delay)
            .with_restart(Restart::new(
                self.restart_active_deadline_seconds,
                self.restart_policy,
            ))
            .with_user(self.user.as_str())
            .with_volumes(self.volumes.clone());
        if let Some(cmd) = &self.cmd {
            run = run.with_cmd(cmd.as_str());
        }
        if let Some(image) = &self.docker_image {
            run = run.with_docker(Docker::new(image.as_str())?);
        }
        if !self.constraints.is_empty() {
            run = run.with_placement(Placement::new(self.constraints.clone()));
        }

        let mut job = Job::new(self.job_id.as_str(), run)?.with_description(self.description.as_str());
        if !self.labels.is_empty() {
            job = job.with_labels(self.labels.iter().cloned().collect());
        }
        Ok(job)
    }
}

/// Flags describing a schedule.
#[derive(Args, Debug, Clone)]
pub struct ScheduleArgs {
    #[arg(long)]
    pub job_id: String,

    #[arg(long)]
    pub sched_id: String,

    /// Cron expression, e.g. `*/5 * * * *`
    #[arg(long)]
    pub cron: String,

    /// Time zone the cron expression is evaluated in
    #[arg(long, default_value = "GMT")]
    pub tz: String,

    /// Seconds after the trigger time a missed run may still start
    #[arg(long, default_value_t = 60)]
    pub start_deadline: u64,

    /// ALLOW, FORBID or REPLACE
    #[arg(long, default_value = "ALLOW")]
    pub concurrency_policy: ConcurrencyPolicy,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub enabled: bool,
}

impl ScheduleArgs {
    pub fn to_schedule(&self) -> Result<Schedule> {
        let schedule = Schedule::new(self.sched_id.as_str(), self.cron.as_str())?
            .with_timezone(self.tz.as_str())
            .with_starting_deadline_seconds(self.start_deadline)
            .with_concurrency_policy(self.concurrency_policy)
            .with_enabled(self.enabled);
        schedule.validate()?;
        Ok(schedule)
    }
}
