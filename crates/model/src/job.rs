//! Job definition entities.
//!
//! A [`Job`] owns exactly one [`Run`], which in turn owns its placement,
//! restart policy, volumes, and artifacts. Request-side values are built with
//! validating constructors and then refined with consuming `with_*` methods:
//!
//! ```
//! use model::{Docker, Job, MountMode, Run, Volume};
//!
//! let run = Run::new(1.5, 32, 128)?
//!     .with_docker(Docker::new("foo/bla:test")?)
//!     .with_cmd("nuke --dry --master local")
//!     .with_volume(Volume::new("/mnt/test", "/etc/guest", MountMode::Rw)?);
//! let job = Job::new("prod.example.app", run)?;
//! assert_eq!(job.run().cpus(), 1.5);
//! # Ok::<(), model::ModelError>(())
//! ```
//!
//! Optional composites (`docker`, `placement`, `restart`, `labels`) are
//! `Option`s so that absent JSON fields stay absent through a round trip.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    ContainerPath, History, HistorySummary, JobStatus, ModelError, MountMode, Operator,
    RestartPolicy, Schedule,
};

fn require(value: &str, field: &'static str) -> Result<(), ModelError> {
    if value.is_empty() {
        Err(ModelError::Required { field })
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Artifact
// ---------------------------------------------------------------------------

/// A resource fetched into the sandbox before the run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    uri: String,
    #[serde(default)]
    executable: bool,
    #[serde(default)]
    extract: bool,
    #[serde(default)]
    cache: bool,
}

impl Artifact {
    /// Creates an artifact for `uri` with all flags off.
    pub fn new(uri: impl Into<String>) -> Result<Self, ModelError> {
        let uri = uri.into();
        require(&uri, "Artifact.uri")?;
        Ok(Self {
            uri,
            executable: false,
            extract: false,
            cache: false,
        })
    }

    /// Marks the fetched file executable.
    pub fn with_executable(mut self, executable: bool) -> Self {
        self.executable = executable;
        self
    }

    /// Extracts the fetched archive.
    pub fn with_extract(mut self, extract: bool) -> Self {
        self.extract = extract;
        self
    }

    /// Caches the fetched file on the agent.
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn executable(&self) -> bool {
        self.executable
    }

    pub fn extract(&self) -> bool {
        self.extract
    }

    pub fn cache(&self) -> bool {
        self.cache
    }
}

// ---------------------------------------------------------------------------
// Docker
// ---------------------------------------------------------------------------

/// Container image the run executes in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Docker {
    image: String,
}

impl Docker {
    /// Creates an image reference such as `"alpine:3.4"`.
    pub fn new(image: impl Into<String>) -> Result<Self, ModelError> {
        let image = image.into();
        require(&image, "Docker.image")?;
        Ok(Self { image })
    }

    pub fn image(&self) -> &str {
        &self.image
    }
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// A single placement rule: `attribute operator value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    attribute: String,
    operator: Operator,
    #[serde(default)]
    value: String,
}

impl Constraint {
    /// Creates a constraint; `attribute` must be non-empty.
    pub fn new(
        attribute: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let attribute = attribute.into();
        require(&attribute, "Constraint.attribute")?;
        Ok(Self {
            attribute,
            operator,
            value: value.into(),
        })
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Parses the whitespace-separated form `attribute OPERATOR value`.
impl FromStr for Constraint {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        match parts.as_slice() {
            [attribute, operator, value] => Constraint::new(*attribute, operator.parse()?, *value),
            _ => Err(ModelError::MalformedConstraint {
                input: s.to_string(),
            }),
        }
    }
}

/// The set of constraints restricting where a run may be placed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(default)]
    constraints: Vec<Constraint>,
}

impl Placement {
    pub fn new(constraints: Vec<Constraint>) -> Self {
        Self { constraints }
    }

    /// Appends one constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

// ---------------------------------------------------------------------------
// Volume
// ---------------------------------------------------------------------------

/// A host directory mounted into the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    container_path: ContainerPath,
    host_path: String,
    mode: MountMode,
}

impl Volume {
    /// Creates a volume, validating the container path and requiring a host path.
    pub fn new(
        container_path: impl Into<String>,
        host_path: impl Into<String>,
        mode: MountMode,
    ) -> Result<Self, ModelError> {
        let container_path = ContainerPath::new(container_path)?;
        let host_path = host_path.into();
        require(&host_path, "host path")?;
        Ok(Self {
            container_path,
            host_path,
            mode,
        })
    }

    pub fn container_path(&self) -> &ContainerPath {
        &self.container_path
    }

    pub fn host_path(&self) -> &str {
        &self.host_path
    }

    pub fn mode(&self) -> MountMode {
        self.mode
    }
}

// ---------------------------------------------------------------------------
// Restart
// ---------------------------------------------------------------------------

/// Behaviour when a run fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restart {
    #[serde(default)]
    active_deadline_seconds: u64,
    policy: RestartPolicy,
}

impl Restart {
    /// Creates a restart policy.
    ///
    /// `active_deadline_seconds` bounds how long the service keeps relaunching;
    /// zero means no bound.
    pub fn new(active_deadline_seconds: u64, policy: RestartPolicy) -> Self {
        Self {
            active_deadline_seconds,
            policy,
        }
    }

    /// Creates a restart policy from its wire name, rejecting empty or unknown names.
    pub fn parse(active_deadline_seconds: u64, policy: &str) -> Result<Self, ModelError> {
        require(policy, "Restart.policy")?;
        Ok(Self::new(active_deadline_seconds, policy.parse()?))
    }

    pub fn active_deadline_seconds(&self) -> u64 {
        self.active_deadline_seconds
    }

    pub fn policy(&self) -> RestartPolicy {
        self.policy
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Resource and execution settings of a job.
///
/// Field order matches the service's canonical rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    artifacts: Vec<Artifact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cmd: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    args: Vec<String>,
    cpus: f64,
    mem: u32,
    disk: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    docker: Option<Docker>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    env: BTreeMap<String, String>,
    #[serde(default)]
    max_launch_delay: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placement: Option<Placement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    restart: Option<Restart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(default)]
    volumes: Vec<Volume>,
}

impl Run {
    /// Creates a run with the three required resources.
    ///
    /// `cpus` must be a positive finite number; `mem` (MiB) and `disk` (MiB)
    /// must be non-zero. Collections start empty and optional composites absent.
    pub fn new(cpus: f64, mem: u32, disk: u32) -> Result<Self, ModelError> {
        if !(cpus.is_finite() && cpus > 0.0) {
            return Err(ModelError::Required { field: "Run.cpus" });
        }
        if mem == 0 {
            return Err(ModelError::Required { field: "Run.mem" });
        }
        if disk == 0 {
            return Err(ModelError::Required { field: "Run.disk" });
        }
        Ok(Self {
            artifacts: Vec::new(),
            cmd: None,
            args: Vec::new(),
            cpus,
            mem,
            disk,
            docker: None,
            env: BTreeMap::new(),
            max_launch_delay: 0,
            placement: None,
            restart: None,
            user: None,
            volumes: Vec::new(),
        })
    }

    pub fn with_artifacts(mut self, artifacts: Vec<Artifact>) -> Self {
        self.artifacts = artifacts;
        self
    }

    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    /// Sets the shell command (`/bin/sh -c <cmd>` on the agent).
    pub fn with_cmd(mut self, cmd: impl Into<String>) -> Self {
        self.cmd = Some(cmd.into());
        self
    }

    /// Sets the argument vector, the alternative to [`Run::with_cmd`].
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_docker(mut self, docker: Docker) -> Self {
        self.docker = Some(docker);
        self
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn with_env_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    /// Seconds the service waits for the run to start before aborting it.
    pub fn with_max_launch_delay(mut self, seconds: u32) -> Self {
        self.max_launch_delay = seconds;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn with_restart(mut self, restart: Restart) -> Self {
        self.restart = Some(restart);
        self
    }

    /// Sets the agent user the task runs as.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_volumes(mut self, volumes: Vec<Volume>) -> Self {
        self.volumes = volumes;
        self
    }

    pub fn with_volume(mut self, volume: Volume) -> Self {
        self.volumes.push(volume);
        self
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn cmd(&self) -> Option<&str> {
        self.cmd.as_deref()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn cpus(&self) -> f64 {
        self.cpus
    }

    pub fn mem(&self) -> u32 {
        self.mem
    }

    pub fn disk(&self) -> u32 {
        self.disk
    }

    pub fn docker(&self) -> Option<&Docker> {
        self.docker.as_ref()
    }

    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn max_launch_delay(&self) -> u32 {
        self.max_launch_delay
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    pub fn restart(&self) -> Option<&Restart> {
        self.restart.as_ref()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }
}

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// The top-level schedulable unit.
///
/// The read-only fields (`schedules`, `activeRuns`, `history`,
/// `historySummary`) are only ever populated by decoding a response that
/// requested them through `embed`; a locally built job never carries them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default)]
    description: String,
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    labels: Option<BTreeMap<String, String>>,
    run: Run,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schedules: Option<Vec<Schedule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active_runs: Option<Vec<JobStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    history: Option<History>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    history_summary: Option<HistorySummary>,
}

impl Job {
    /// Creates a job with an empty description and no labels.
    pub fn new(id: impl Into<String>, run: Run) -> Result<Self, ModelError> {
        let id = id.into();
        require(&id, "Job.id")?;
        Ok(Self {
            description: String::new(),
            id,
            labels: None,
            run,
            schedules: None,
            active_runs: None,
            history: None,
            history_summary: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replaces the label map.
    pub fn with_labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Adds one label, creating the label map if absent.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.run = run;
        self
    }

    /// Drops every server-reported field, leaving a definition that can be
    /// sent back on update.
    pub fn into_definition(mut self) -> Self {
        self.schedules = None;
        self.active_runs = None;
        self.history = None;
        self.history_summary = None;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn labels(&self) -> Option<&BTreeMap<String, String>> {
        self.labels.as_ref()
    }

    pub fn run(&self) -> &Run {
        &self.run
    }

    pub fn schedules(&self) -> Option<&[Schedule]> {
        self.schedules.as_deref()
    }

    pub fn active_runs(&self) -> Option<&[JobStatus]> {
        self.active_runs.as_deref()
    }

    pub fn history(&self) -> Option<&History> {
        self.history.as_ref()
    }

    pub fn history_summary(&self) -> Option<&HistorySummary> {
        self.history_summary.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_JOB: &str = r#"{"description":"Example Application","id":"prod.example.app","labels":{"location":"olympus","owner":"zeus"},"run":{"artifacts":[{"uri":"http://foo.test.com/application.zip","extract":true,"executable":true,"cache":false}],"cmd":"nuke --dry --master local","args":["nuke","--dry","--master","local"],"cpus":1.5,"mem":32,"disk":128,"docker":{"image":"foo/bla:test"},"env":{"MON":"test","CONNECT":"direct"},"maxLaunchDelay":3600,"placement":{"constraints":[{"attribute":"rack","operator":"EQ","value":"rack-2"}]},"restart":{"activeDeadlineSeconds":120,"policy":"NEVER"},"user":"root","volumes":[{"containerPath":"/mnt/test","hostPath":"/etc/guest","mode":"RW"}]}}"#;

    const EMBEDDED_JOB: &str = r#"{"id":"foo.bar","description":"","labels":{},"run":{"cpus":0.2,"mem":128,"disk":128,"cmd":"echo \"testing $(date)\"","env":{},"placement":{"constraints":[]},"artifacts":[],"maxLaunchDelay":900,"docker":{"image":"alpine:3.4"},"volumes":[{"containerPath":"/var/lib/tmp","hostPath":"/app","mode":"RO"}],"restart":{"policy":"NEVER","activeDeadlineSeconds":0}},"schedules":[{"id":"every2","cron":"*/2 * * * *","timezone":"Etc/GMT","startingDeadlineSeconds":60,"concurrencyPolicy":"ALLOW","enabled":true,"nextRunAt":"2016-12-12T20:16:00.000+0000"}],"activeRuns":[{"id":"20161212192759dliHA","jobId":"foo.bar","status":"INITIAL","createdAt":"2016-12-12T19:27:59.057+0000","completedAt":null,"tasks":[]}],"history":{"successCount":2,"failureCount":1,"lastSuccessAt":"2016-12-12T18:02:00.251+0000","lastFailureAt":"2016-12-12T17:36:00.409+0000","successfulFinishedRuns":[{"id":"20161212180159qfl4J","createdAt":"2016-12-12T18:01:59.335+0000","finishedAt":"2016-12-12T18:02:00.251+0000"},{"id":"201612121759592WzzE","createdAt":"2016-12-12T17:59:59.314+0000","finishedAt":"2016-12-12T18:00:00.271+0000"}],"failedFinishedRuns":[{"id":"20161212173559asQpr","createdAt":"2016-12-12T17:35:59.483+0000","finishedAt":"2016-12-12T17:36:00.409+0000"}]},"historySummary":{"successCount":2,"failureCount":1,"lastSuccessAt":"2016-12-12T18:02:00.251+0000","lastFailureAt":"2016-12-12T17:36:00.409+0000"}}"#;

    fn example_run() -> Run {
        Run::new(1.5, 32, 128).unwrap()
    }

    #[test]
    fn test_run_requires_positive_resources() {
        assert_eq!(
            Run::new(0.0, 32, 128).unwrap_err(),
            ModelError::Required { field: "Run.cpus" }
        );
        assert_eq!(
            Run::new(1.5, 0, 128).unwrap_err(),
            ModelError::Required { field: "Run.mem" }
        );
        assert_eq!(
            Run::new(1.5, 32, 0).unwrap_err(),
            ModelError::Required { field: "Run.disk" }
        );
        assert!(Run::new(-1.0, 32, 128).is_err());
        assert!(Run::new(f64::NAN, 32, 128).is_err());
        assert_eq!(
            Run::new(0.0, 32, 128).unwrap_err().to_string(),
            "Run.cpus is required"
        );
    }

    #[test]
    fn test_new_run_starts_with_empty_collections() {
        let run = example_run();
        assert_eq!(run.cpus(), 1.5);
        assert_eq!(run.mem(), 32);
        assert_eq!(run.disk(), 128);
        assert!(run.artifacts().is_empty());
        assert!(run.args().is_empty());
        assert!(run.env().is_empty());
        assert!(run.volumes().is_empty());
        assert!(run.docker().is_none());
        assert!(run.placement().is_none());
        assert!(run.restart().is_none());
    }

    #[test]
    fn test_minimal_run_omits_absent_composites() {
        let json = serde_json::to_value(example_run()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"cpus": 1.5, "mem": 32, "disk": 128, "maxLaunchDelay": 0, "volumes": []})
        );
    }

    #[test]
    fn test_job_requires_id() {
        assert_eq!(
            Job::new("", example_run()).unwrap_err(),
            ModelError::Required { field: "Job.id" }
        );
    }

    #[test]
    fn test_volume_requires_host_path_and_valid_container_path() {
        assert_eq!(
            Volume::new("/mnt/test", "", MountMode::Ro).unwrap_err().to_string(),
            "host path is required"
        );
        assert!(matches!(
            Volume::new("!mnt/test", "/etc/guest", MountMode::Ro),
            Err(ModelError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_constraint_parses_three_tokens() {
        let c: Constraint = "rack   LIKE  rack-[12]".parse().unwrap();
        assert_eq!(c.attribute(), "rack");
        assert_eq!(c.operator(), Operator::Like);
        assert_eq!(c.value(), "rack-[12]");

        assert!(matches!(
            "rack EQ".parse::<Constraint>(),
            Err(ModelError::MalformedConstraint { .. })
        ));
        assert!(matches!(
            "rack GT 2".parse::<Constraint>(),
            Err(ModelError::InvalidEnumValue { .. })
        ));
        assert!(Constraint::new("", Operator::Eq, "x").is_err());
    }

    #[test]
    fn test_restart_parse_rejects_empty_and_unknown_policy() {
        assert_eq!(
            Restart::parse(0, "").unwrap_err(),
            ModelError::Required { field: "Restart.policy" }
        );
        assert!(Restart::parse(0, "ALWAYS").is_err());
        let restart = Restart::parse(120, "ON_FAILURE").unwrap();
        assert_eq!(restart.policy(), RestartPolicy::OnFailure);
        assert_eq!(restart.active_deadline_seconds(), 120);
    }

    #[test]
    fn test_artifact_and_docker_require_values() {
        assert!(Artifact::new("").is_err());
        assert!(Docker::new("").is_err());
        let a = Artifact::new("http://foo.test.com/application.zip")
            .unwrap()
            .with_extract(true)
            .with_executable(true);
        assert!(a.extract() && a.executable() && !a.cache());
    }

    #[test]
    fn test_example_job_round_trips() {
        let first: Job = serde_json::from_str(EXAMPLE_JOB).unwrap();
        let encoded = serde_json::to_string(&first).unwrap();
        let second: Job = serde_json::from_str(&encoded).unwrap();
        assert_eq!(first, second);

        let run = first.run();
        assert_eq!(run.artifacts().len(), 1);
        assert_eq!(run.docker().map(Docker::image), Some("foo/bla:test"));
        assert_eq!(run.env().get("MON").map(String::as_str), Some("test"));
        assert_eq!(run.placement().map(|p| p.constraints().len()), Some(1));
        assert_eq!(run.restart().map(Restart::policy), Some(RestartPolicy::Never));
        assert_eq!(run.volumes()[0].mode(), MountMode::Rw);
    }

    #[test]
    fn test_built_job_equals_decoded_example() {
        let run = example_run()
            .with_docker(Docker::new("foo/bla:test").unwrap())
            .with_env_var("MON", "test")
            .with_env_var("CONNECT", "direct")
            .with_args(
                ["nuke", "--dry", "--master", "local"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            )
            .with_cmd("nuke --dry --master local")
            .with_placement(
                Placement::default()
                    .with_constraint(Constraint::new("rack", Operator::Eq, "rack-2").unwrap()),
            )
            .with_artifact(
                Artifact::new("http://foo.test.com/application.zip")
                    .unwrap()
                    .with_extract(true)
                    .with_executable(true),
            )
            .with_max_launch_delay(3600)
            .with_restart(Restart::new(120, RestartPolicy::Never))
            .with_volume(Volume::new("/mnt/test", "/etc/guest", MountMode::Rw).unwrap())
            .with_user("root");
        let built = Job::new("prod.example.app", run)
            .unwrap()
            .with_description("Example Application")
            .with_label("location", "olympus")
            .with_label("owner", "zeus");

        let decoded: Job = serde_json::from_str(EXAMPLE_JOB).unwrap();
        assert_eq!(built, decoded);
    }

    #[test]
    fn test_encoding_renders_canonical_run() {
        let run = example_run()
            .with_docker(Docker::new("foo/bla:test").unwrap())
            .with_cmd("nuke --dry --master local")
            .with_volume(Volume::new("/mnt/test", "/etc/guest", MountMode::Rw).unwrap());
        let job = Job::new("prod.example.app", run).unwrap();

        let encoded = serde_json::to_string(&job).unwrap();
        assert!(encoded.contains(r#""cpus":1.5,"mem":32,"disk":128,"docker":{"image":"foo/bla:test"}"#));
        assert!(encoded.contains(
            r#""volumes":[{"containerPath":"/mnt/test","hostPath":"/etc/guest","mode":"RW"}]"#
        ));
        assert!(!encoded.contains("labels"));
        assert!(!encoded.contains("schedules"));
    }

    #[test]
    fn test_encoding_does_not_escape_html_characters() {
        let run = example_run().with_cmd("echo a<b && echo c>d");
        let encoded = serde_json::to_string(&Job::new("html.job", run).unwrap()).unwrap();
        assert!(encoded.contains(r#""cmd":"echo a<b && echo c>d""#));
    }

    #[test]
    fn test_decodes_embedded_server_data() {
        let job: Job = serde_json::from_str(EMBEDDED_JOB).unwrap();
        assert_eq!(job.id(), "foo.bar");
        assert_eq!(job.schedules().map(<[Schedule]>::len), Some(1));
        assert_eq!(job.active_runs().map(<[JobStatus]>::len), Some(1));
        let history = job.history().unwrap();
        assert_eq!(history.successful_finished_runs.len(), 2);
        assert_eq!(history.failed_finished_runs.len(), 1);
        let summary = job.history_summary().unwrap();
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.failure_count, 1);

        let again: Job = serde_json::from_str(&serde_json::to_string(&job).unwrap()).unwrap();
        assert_eq!(job, again);

        let definition = job.into_definition();
        assert!(definition.schedules().is_none());
        assert!(definition.history().is_none());
        assert_eq!(definition.run().volumes()[0].container_path().as_str(), "/var/lib/tmp");
    }

    #[test]
    fn test_decode_rejects_invalid_wire_values() {
        let bad_path = EXAMPLE_JOB.replace("\"/mnt/test\"", "\"!mnt/test\"");
        assert!(serde_json::from_str::<Job>(&bad_path).is_err());
        let bad_mode = EXAMPLE_JOB.replace("\"RW\"", "\"RWW\"");
        assert!(serde_json::from_str::<Job>(&bad_mode).is_err());
        let bad_operator = EXAMPLE_JOB.replace("\"EQ\"", "\"eq\"");
        assert!(serde_json::from_str::<Job>(&bad_operator).is_err());
    }
}
