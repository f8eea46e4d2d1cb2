//! Typed endpoint methods.
//!
//! [`Metronome`] has one method per REST endpoint. [`MetronomeClient`] is the
//! HTTP implementation; each method builds exactly one [`Transport::call`] and
//! returns its typed result without retrying, caching, or interpreting it.
//! Code that only needs to issue calls should depend on `&dyn Metronome` so a
//! test double can stand in for the service.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use model::{Embed, Job, JobStatus, Schedule};

use crate::transport::{Json, QueryParams, Transport, NO_BODY};
use crate::{ClientConfig, ClientError};

/// Every embed value, as requested by [`Metronome::job_history`].
const HISTORY_EMBEDS: [Embed; 4] = [
    Embed::ActiveRuns,
    Embed::History,
    Embed::HistorySummary,
    Embed::Schedules,
];

/// Milliseconds since the Unix epoch, 24 hours before now.
///
/// The default lower bound for [`Metronome::job_history`].
pub fn twenty_four_hours_ago() -> i64 {
    (Utc::now() - Duration::hours(24)).timestamp_millis()
}

/// Operations offered by a Metronome service.
#[async_trait]
pub trait Metronome: Send + Sync {
    // -----------------------------------------------------------------------
    // Jobs
    // -----------------------------------------------------------------------
    /// `POST /v1/jobs`
    async fn create_job(&self, job: &Job) -> Result<Job, ClientError>;

    /// `GET /v1/jobs/{job_id}`, embedding the requested nested data.
    async fn get_job(&self, job_id: &str, embed: &[Embed]) -> Result<Job, ClientError>;

    /// `GET /v1/jobs`
    async fn jobs(&self, embed: &[Embed]) -> Result<Vec<Job>, ClientError>;

    /// `GET /v1/jobs/{job_id}` with every embed and history limited to runs
    /// since `since_ms` (milliseconds since the epoch).
    async fn job_history(&self, job_id: &str, since_ms: i64) -> Result<Job, ClientError>;

    /// `PUT /v1/jobs/{job_id}`
    async fn update_job(&self, job_id: &str, job: &Job) -> Result<Value, ClientError>;

    /// `DELETE /v1/jobs/{job_id}`
    async fn delete_job(&self, job_id: &str) -> Result<Job, ClientError>;

    // -----------------------------------------------------------------------
    // Runs
    // -----------------------------------------------------------------------
    /// `GET /v1/jobs/{job_id}/runs`
    async fn runs(&self, job_id: &str) -> Result<Vec<JobStatus>, ClientError>;

    /// `POST /v1/jobs/{job_id}/runs`
    async fn start_job(&self, job_id: &str) -> Result<JobStatus, ClientError>;

    /// `GET /v1/jobs/{job_id}/runs/{run_id}`
    async fn run_status(&self, job_id: &str, run_id: &str) -> Result<JobStatus, ClientError>;

    /// `POST /v1/jobs/{job_id}/runs/{run_id}/action/stop`
    async fn stop_run(&self, job_id: &str, run_id: &str) -> Result<Value, ClientError>;

    // -----------------------------------------------------------------------
    // Schedules
    // -----------------------------------------------------------------------
    /// `POST /v1/jobs/{job_id}/schedules`
    async fn create_schedule(
        &self,
        job_id: &str,
        schedule: &Schedule,
    ) -> Result<Schedule, ClientError>;

    /// `GET /v1/jobs/{job_id}/schedules/{schedule_id}`
    async fn get_schedule(&self, job_id: &str, schedule_id: &str)
        -> Result<Schedule, ClientError>;

    /// `GET /v1/jobs/{job_id}/schedules`
    async fn schedules(&self, job_id: &str) -> Result<Vec<Schedule>, ClientError>;

    /// `PUT /v1/jobs/{job_id}/schedules/{schedule_id}`
    async fn update_schedule(
        &self,
        job_id: &str,
        schedule_id: &str,
        schedule: &Schedule,
    ) -> Result<Value, ClientError>;

    /// `DELETE /v1/jobs/{job_id}/schedules/{schedule_id}`
    async fn delete_schedule(&self, job_id: &str, schedule_id: &str)
        -> Result<Value, ClientError>;

    // -----------------------------------------------------------------------
    // Service
    // -----------------------------------------------------------------------
    /// `GET /v1/metrics`
    async fn metrics(&self) -> Result<Value, ClientError>;

    /// `GET /v1/ping`
    async fn ping(&self) -> Result<String, ClientError>;
}

/// HTTP implementation of [`Metronome`].
#[derive(Debug, Clone)]
pub struct MetronomeClient {
    transport: Transport,
}

impl MetronomeClient {
    /// Builds a client and checks that the service answers a job listing.
    ///
    /// Fails with [`ClientError::Unreachable`] if the check does not succeed.
    pub async fn connect(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Self {
            transport: Transport::new(config)?,
        };
        match client.jobs(&[]).await {
            Ok(jobs) => {
                debug!(url = %client.transport.config().url, jobs = jobs.len(), "connected to metronome");
                Ok(client)
            }
            Err(err) => Err(ClientError::Unreachable {
                source: Box::new(err),
            }),
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> Result<T, ClientError> {
        let response = self
            .transport
            .call::<Json<T>, _>(Method::GET, path, query, NO_BODY)
            .await?;
        response.into_body().map(|Json(value)| value)
    }

    async fn send<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let response = self
            .transport
            .call::<Json<T>, B>(method, path, &QueryParams::new(), body)
            .await?;
        response.into_body().map(|Json(value)| value)
    }

    async fn send_raw<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Value, ClientError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let response = self
            .transport
            .call::<Value, B>(method, path, &QueryParams::new(), body)
            .await?;
        Ok(response.body.unwrap_or_default())
    }
}

fn embed_query(embed: &[Embed]) -> QueryParams {
    let mut query = QueryParams::new();
    if !embed.is_empty() {
        query.insert(
            "embed".to_string(),
            embed.iter().map(|e| e.as_str().to_string()).collect(),
        );
    }
    query
}

#[async_trait]
impl Metronome for MetronomeClient {
    async fn create_job(&self, job: &Job) -> Result<Job, ClientError> {
        self.send(Method::POST, "/v1/jobs", Some(job)).await
    }

    async fn get_job(&self, job_id: &str, embed: &[Embed]) -> Result<Job, ClientError> {
        self.fetch(&format!("/v1/jobs/{job_id}"), &embed_query(embed))
            .await
    }

    async fn jobs(&self, embed: &[Embed]) -> Result<Vec<Job>, ClientError> {
        self.fetch("/v1/jobs", &embed_query(embed)).await
    }

    async fn job_history(&self, job_id: &str, since_ms: i64) -> Result<Job, ClientError> {
        let mut query = embed_query(&HISTORY_EMBEDS);
        query.insert("_timestamp".to_string(), vec![since_ms.to_string()]);
        self.fetch(&format!("/v1/jobs/{job_id}"), &query).await
    }

    async fn update_job(&self, job_id: &str, job: &Job) -> Result<Value, ClientError> {
        self.send_raw(Method::PUT, &format!("/v1/jobs/{job_id}"), Some(job))
            .await
    }

    async fn delete_job(&self, job_id: &str) -> Result<Job, ClientError> {
        self.send(Method::DELETE, &format!("/v1/jobs/{job_id}"), NO_BODY)
            .await
    }

    async fn runs(&self, job_id: &str) -> Result<Vec<JobStatus>, ClientError> {
        self.fetch(&format!("/v1/jobs/{job_id}/runs"), &QueryParams::new())
            .await
    }

    async fn start_job(&self, job_id: &str) -> Result<JobStatus, ClientError> {
        self.send(Method::POST, &format!("/v1/jobs/{job_id}/runs"), NO_BODY)
            .await
    }

    async fn run_status(&self, job_id: &str, run_id: &str) -> Result<JobStatus, ClientError> {
        self.fetch(&format!("/v1/jobs/{job_id}/runs/{run_id}"), &QueryParams::new())
            .await
    }

    async fn stop_run(&self, job_id: &str, run_id: &str) -> Result<Value, ClientError> {
        self.send_raw(
            Method::POST,
            &format!("/v1/jobs/{job_id}/runs/{run_id}/action/stop"),
            NO_BODY,
        )
        .await
    }

    async fn create_schedule(
        &self,
        job_id: &str,
        schedule: &Schedule,
    ) -> Result<Schedule, ClientError> {
        schedule.validate()?;
        self.send(
            Method::POST,
            &format!("/v1/jobs/{job_id}/schedules"),
            Some(schedule),
        )
        .await
    }

    async fn get_schedule(
        &self,
        job_id: &str,
        schedule_id: &str,
    ) -> Result<Schedule, ClientError> {
        self.fetch(
            &format!("/v1/jobs/{job_id}/schedules/{schedule_id}"),
            &QueryParams::new(),
        )
        .await
    }

    async fn schedules(&self, job_id: &str) -> Result<Vec<Schedule>, ClientError> {
        self.fetch(&format!("/v1/jobs/{job_id}/schedules"), &QueryParams::new())
            .await
    }

    async fn update_schedule(
        &self,
        job_id: &str,
        schedule_id: &str,
        schedule: &Schedule,
    ) -> Result<Value, ClientError> {
        schedule.validate()?;
        self.send_raw(
            Method::PUT,
            &format!("/v1/jobs/{job_id}/schedules/{schedule_id}"),
            Some(schedule),
        )
        .await
    }

    async fn delete_schedule(
        &self,
        job_id: &str,
        schedule_id: &str,
    ) -> Result<Value, ClientError> {
        self.send_raw(
            Method::DELETE,
            &format!("/v1/jobs/{job_id}/schedules/{schedule_id}"),
            NO_BODY,
        )
        .await
    }

    async fn metrics(&self) -> Result<Value, ClientError> {
        self.send_raw(Method::GET, "/v1/metrics", NO_BODY).await
    }

    async fn ping(&self) -> Result<String, ClientError> {
        let response = self
            .transport
            .call::<String, _>(Method::GET, "/v1/ping", &QueryParams::new(), NO_BODY)
            .await?;
        Ok(response.body.unwrap_or_default())
    }
}
