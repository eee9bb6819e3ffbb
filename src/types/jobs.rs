// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Jobs API (2.1) request/response types.
//!
//! A job task carries exactly one payload key (`notebook_task`,
//! `spark_jar_task`, ...) and at most one cluster key (`existing_cluster_id`,
//! `job_cluster_key`, `new_cluster`). Both are modelled as enums and decoded
//! through [`JobTaskWire`]. Task collections are [`TaskSet`]s, linked as soon
//! as they are decoded.

use crate::error::{Error, Result};
use crate::types::clusters::{ClusterAttributes, ClusterInstance};
use crate::types::libraries::Library;
use crate::types::permissions::AccessControlRequest;
use crate::types::task_graph::{GraphTask, TaskDependency, TaskSet};
use crate::types::variant::{at_most_one, de_error, exactly_one};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a notebook or Python file is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Source {
    Workspace,
    Git,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookTask {
    pub notebook_path: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub base_parameters: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl NotebookTask {
    pub fn new(notebook_path: impl Into<String>) -> Self {
        Self {
            notebook_path: notebook_path.into(),
            base_parameters: BTreeMap::new(),
            source: None,
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.base_parameters.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparkJarTask {
    pub main_class_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jar_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparkPythonTask {
    pub python_file: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparkSubmitTask {
    #[serde(default)]
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineTask {
    pub pipeline_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_refresh: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonWheelTask {
    pub package_name: String,
    pub entry_point: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub named_parameters: BTreeMap<String, String>,
}

/// The work a task performs; exactly one per task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPayload {
    Notebook(NotebookTask),
    SparkJar(SparkJarTask),
    SparkPython(SparkPythonTask),
    SparkSubmit(SparkSubmitTask),
    Pipeline(PipelineTask),
    PythonWheel(PythonWheelTask),
}

impl TaskPayload {
    /// The wire key of this payload.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Notebook(_) => "notebook_task",
            Self::SparkJar(_) => "spark_jar_task",
            Self::SparkPython(_) => "spark_python_task",
            Self::SparkSubmit(_) => "spark_submit_task",
            Self::Pipeline(_) => "pipeline_task",
            Self::PythonWheel(_) => "python_wheel_task",
        }
    }
}

/// Compute a task runs on.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskCluster {
    /// An all-purpose cluster that already exists.
    Existing(String),
    /// A cluster declared once in the job's `job_clusters`.
    JobCluster(String),
    /// A cluster created for this task only.
    New(ClusterAttributes),
}

/// Retry settings of a task. All fields absent means the server default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    /// `-1` retries indefinitely.
    pub max_retries: Option<i32>,
    pub min_retry_interval_millis: Option<i64>,
    pub retry_on_timeout: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEmailNotifications {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_start: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_success: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_failure: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_alert_for_skipped_runs: Option<bool>,
}

/// When a task runs relative to its dependencies' outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunIf {
    AllSuccess,
    AtLeastOneSuccess,
    NoneFailed,
    AllDone,
    AtLeastOneFailed,
    AllFailed,
}

/// One node of a job's task graph.
#[derive(Debug, Clone, PartialEq)]
pub struct JobTask {
    pub task_key: String,
    pub description: Option<String>,
    pub depends_on: Vec<TaskDependency>,
    pub run_if: Option<RunIf>,
    pub cluster: Option<TaskCluster>,
    pub payload: TaskPayload,
    pub libraries: Vec<Library>,
    pub retry_policy: RetryPolicy,
    pub timeout_seconds: Option<i32>,
    pub email_notifications: Option<JobEmailNotifications>,
}

impl JobTask {
    pub fn new(task_key: impl Into<String>, payload: TaskPayload) -> Self {
        Self {
            task_key: task_key.into(),
            description: None,
            depends_on: Vec::new(),
            run_if: None,
            cluster: None,
            payload,
            libraries: Vec::new(),
            retry_policy: RetryPolicy::default(),
            timeout_seconds: None,
            email_notifications: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_dependencies<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.depends_on
            .extend(keys.into_iter().map(|k| TaskDependency::new(k)));
        self
    }

    pub fn on_existing_cluster(mut self, cluster_id: impl Into<String>) -> Self {
        self.cluster = Some(TaskCluster::Existing(cluster_id.into()));
        self
    }

    pub fn on_job_cluster(mut self, job_cluster_key: impl Into<String>) -> Self {
        self.cluster = Some(TaskCluster::JobCluster(job_cluster_key.into()));
        self
    }

    pub fn on_new_cluster(mut self, new_cluster: ClusterAttributes) -> Self {
        self.cluster = Some(TaskCluster::New(new_cluster));
        self
    }

    pub fn with_library(mut self, library: Library) -> Self {
        self.libraries.push(library);
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: i32) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    pub fn with_retries(mut self, max_retries: i32, min_retry_interval_millis: i64) -> Self {
        self.retry_policy.max_retries = Some(max_retries);
        self.retry_policy.min_retry_interval_millis = Some(min_retry_interval_millis);
        self
    }
}

impl GraphTask for JobTask {
    fn task_key(&self) -> &str {
        &self.task_key
    }

    fn depends_on(&self) -> &[TaskDependency] {
        &self.depends_on
    }
}

/// Flat wire form of [`JobTask`]: every candidate key is optional here and
/// the conversion enforces one payload and at most one cluster.
#[derive(Deserialize)]
struct JobTaskWire {
    task_key: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    depends_on: Vec<TaskDependency>,
    #[serde(default)]
    run_if: Option<RunIf>,
    #[serde(default)]
    existing_cluster_id: Option<String>,
    #[serde(default)]
    job_cluster_key: Option<String>,
    #[serde(default)]
    new_cluster: Option<ClusterAttributes>,
    #[serde(default)]
    notebook_task: Option<NotebookTask>,
    #[serde(default)]
    spark_jar_task: Option<SparkJarTask>,
    #[serde(default)]
    spark_python_task: Option<SparkPythonTask>,
    #[serde(default)]
    spark_submit_task: Option<SparkSubmitTask>,
    #[serde(default)]
    pipeline_task: Option<PipelineTask>,
    #[serde(default)]
    python_wheel_task: Option<PythonWheelTask>,
    #[serde(default)]
    libraries: Vec<Library>,
    #[serde(default)]
    max_retries: Option<i32>,
    #[serde(default)]
    min_retry_interval_millis: Option<i64>,
    #[serde(default)]
    retry_on_timeout: Option<bool>,
    #[serde(default)]
    timeout_seconds: Option<i32>,
    #[serde(default)]
    email_notifications: Option<JobEmailNotifications>,
}

/// Encoding counterpart of [`JobTaskWire`], borrowing from the task.
#[derive(Default, Serialize)]
struct JobTaskWireRef<'a> {
    task_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    depends_on: &'a [TaskDependency],
    #[serde(skip_serializing_if = "Option::is_none")]
    run_if: Option<&'a RunIf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    existing_cluster_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    job_cluster_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_cluster: Option<&'a ClusterAttributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notebook_task: Option<&'a NotebookTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spark_jar_task: Option<&'a SparkJarTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spark_python_task: Option<&'a SparkPythonTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spark_submit_task: Option<&'a SparkSubmitTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pipeline_task: Option<&'a PipelineTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    python_wheel_task: Option<&'a PythonWheelTask>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    libraries: &'a [Library],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_retries: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_retry_interval_millis: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_on_timeout: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_seconds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_notifications: Option<&'a JobEmailNotifications>,
}

impl TryFrom<JobTaskWire> for JobTask {
    type Error = Error;

    fn try_from(wire: JobTaskWire) -> Result<Self> {
        let family = format!("task '{}'", wire.task_key);
        let payload = exactly_one(
            &family,
            [
                ("notebook_task", wire.notebook_task.map(TaskPayload::Notebook)),
                ("spark_jar_task", wire.spark_jar_task.map(TaskPayload::SparkJar)),
                (
                    "spark_python_task",
                    wire.spark_python_task.map(TaskPayload::SparkPython),
                ),
                (
                    "spark_submit_task",
                    wire.spark_submit_task.map(TaskPayload::SparkSubmit),
                ),
                ("pipeline_task", wire.pipeline_task.map(TaskPayload::Pipeline)),
                (
                    "python_wheel_task",
                    wire.python_wheel_task.map(TaskPayload::PythonWheel),
                ),
            ],
        )?;

        let cluster = at_most_one(
            &family,
            [
                (
                    "existing_cluster_id",
                    wire.existing_cluster_id.map(TaskCluster::Existing),
                ),
                (
                    "job_cluster_key",
                    wire.job_cluster_key.map(TaskCluster::JobCluster),
                ),
                ("new_cluster", wire.new_cluster.map(TaskCluster::New)),
            ],
        )?;

        Ok(Self {
            task_key: wire.task_key,
            description: wire.description,
            depends_on: wire.depends_on,
            run_if: wire.run_if,
            cluster,
            payload,
            libraries: wire.libraries,
            retry_policy: RetryPolicy {
                max_retries: wire.max_retries,
                min_retry_interval_millis: wire.min_retry_interval_millis,
                retry_on_timeout: wire.retry_on_timeout,
            },
            timeout_seconds: wire.timeout_seconds,
            email_notifications: wire.email_notifications,
        })
    }
}

fn is_empty_slice<T>(slice: &&[T]) -> bool {
    slice.is_empty()
}

impl<'a> From<&'a JobTask> for JobTaskWireRef<'a> {
    fn from(task: &'a JobTask) -> Self {
        let mut wire = JobTaskWireRef {
            task_key: &task.task_key,
            description: task.description.as_deref(),
            depends_on: &task.depends_on,
            run_if: task.run_if.as_ref(),
            libraries: &task.libraries,
            max_retries: task.retry_policy.max_retries,
            min_retry_interval_millis: task.retry_policy.min_retry_interval_millis,
            retry_on_timeout: task.retry_policy.retry_on_timeout,
            timeout_seconds: task.timeout_seconds,
            email_notifications: task.email_notifications.as_ref(),
            ..Default::default()
        };

        match &task.cluster {
            Some(TaskCluster::Existing(id)) => wire.existing_cluster_id = Some(id.as_str()),
            Some(TaskCluster::JobCluster(key)) => wire.job_cluster_key = Some(key.as_str()),
            Some(TaskCluster::New(attributes)) => wire.new_cluster = Some(attributes),
            None => {}
        }

        match &task.payload {
            TaskPayload::Notebook(t) => wire.notebook_task = Some(t),
            TaskPayload::SparkJar(t) => wire.spark_jar_task = Some(t),
            TaskPayload::SparkPython(t) => wire.spark_python_task = Some(t),
            TaskPayload::SparkSubmit(t) => wire.spark_submit_task = Some(t),
            TaskPayload::Pipeline(t) => wire.pipeline_task = Some(t),
            TaskPayload::PythonWheel(t) => wire.python_wheel_task = Some(t),
        }

        wire
    }
}

impl Serialize for JobTask {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        JobTaskWireRef::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for JobTask {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let wire = JobTaskWire::deserialize(deserializer)?;
        JobTask::try_from(wire).map_err(de_error)
    }
}

/// Cluster declared at job level and shared by tasks via `job_cluster_key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobCluster {
    pub job_cluster_key: String,
    pub new_cluster: ClusterAttributes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PauseStatus {
    Paused,
    Unpaused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronSchedule {
    pub quartz_cron_expression: String,
    pub timezone_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_status: Option<PauseStatus>,
}

/// Git hosting service, serialized with the server's camelCase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GitProvider {
    #[serde(rename = "gitHub")]
    GitHub,
    #[serde(rename = "bitbucketCloud")]
    BitbucketCloud,
    #[serde(rename = "azureDevOpsServices")]
    AzureDevOpsServices,
    #[serde(rename = "gitHubEnterprise")]
    GitHubEnterprise,
    #[serde(rename = "bitbucketServer")]
    BitbucketServer,
    #[serde(rename = "gitLab")]
    GitLab,
    #[serde(rename = "gitLabEnterpriseEdition")]
    GitLabEnterpriseEdition,
    #[serde(rename = "awsCodeCommit")]
    AwsCodeCommit,
}

/// Which revision of the repository to check out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitReference {
    Branch(String),
    Tag(String),
    Commit(String),
}

/// Remote repository holding the job's notebooks and files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GitSourceWire", into = "GitSourceWire")]
pub struct GitSource {
    pub git_url: String,
    pub git_provider: GitProvider,
    pub reference: GitReference,
}

#[derive(Serialize, Deserialize)]
struct GitSourceWire {
    git_url: String,
    git_provider: GitProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    git_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    git_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    git_commit: Option<String>,
}

impl TryFrom<GitSourceWire> for GitSource {
    type Error = Error;

    fn try_from(wire: GitSourceWire) -> Result<Self> {
        let reference = exactly_one(
            "git reference",
            [
                ("git_branch", wire.git_branch.map(GitReference::Branch)),
                ("git_tag", wire.git_tag.map(GitReference::Tag)),
                ("git_commit", wire.git_commit.map(GitReference::Commit)),
            ],
        )?;
        Ok(Self {
            git_url: wire.git_url,
            git_provider: wire.git_provider,
            reference,
        })
    }
}

impl From<GitSource> for GitSourceWire {
    fn from(source: GitSource) -> Self {
        let (git_branch, git_tag, git_commit) = match source.reference {
            GitReference::Branch(b) => (Some(b), None, None),
            GitReference::Tag(t) => (None, Some(t), None),
            GitReference::Commit(c) => (None, None, Some(c)),
        };
        Self {
            git_url: source.git_url,
            git_provider: source.git_provider,
            git_branch,
            git_tag,
            git_commit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobFormat {
    SingleTask,
    MultiTask,
}

/// Settings of a job. Also used as the partial `new_settings` of
/// `jobs/update`, where absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "TaskSet::is_empty")]
    pub tasks: TaskSet<JobTask>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub job_clusters: Vec<JobCluster>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<JobEmailNotifications>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<CronSchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_runs: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_source: Option<GitSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<JobFormat>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl JobSettings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            format: Some(JobFormat::MultiTask),
            ..Default::default()
        }
    }

    /// Replaces the task list, linking it.
    pub fn with_tasks(mut self, tasks: Vec<JobTask>) -> Result<Self> {
        self.tasks = TaskSet::link(tasks)?;
        Ok(self)
    }

    pub fn with_job_cluster(
        mut self,
        job_cluster_key: impl Into<String>,
        new_cluster: ClusterAttributes,
    ) -> Self {
        self.job_clusters.push(JobCluster {
            job_cluster_key: job_cluster_key.into(),
            new_cluster,
        });
        self
    }

    pub fn with_schedule(mut self, schedule: CronSchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn with_git_source(mut self, git_source: GitSource) -> Self {
        self.git_source = Some(git_source);
        self
    }
}

/// Body of `jobs/create`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateJobRequest {
    #[serde(flatten)]
    pub settings: JobSettings,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub access_control_list: Vec<AccessControlRequest>,
}

/// Response of `jobs/create`; also the body of `jobs/delete` and
/// `jobs/runs/cancel-all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobId {
    pub job_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_user_name: Option<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub settings: JobSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobsListResponse {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetJobRequest {
    pub job_id: i64,
    pub new_settings: JobSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateJobRequest {
    pub job_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_settings: Option<JobSettings>,
    /// Top-level fields to clear, e.g. `libraries` or `schedule`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields_to_remove: Vec<String>,
}

/// Parameter overrides for `jobs/run-now`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunParameters {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub jar_params: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub notebook_params: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub python_params: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub python_named_params: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spark_submit_params: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunNowRequest {
    pub job_id: i64,
    #[serde(flatten)]
    pub parameters: RunParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_token: Option<String>,
}

/// Body of the run endpoints that take only a run id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunId {
    pub run_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunIdentifier {
    pub run_id: i64,
    #[serde(default)]
    pub number_in_job: Option<i64>,
}

/// Life-cycle state of a run, mirrored from the server's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunLifeCycleState {
    Queued,
    Pending,
    Running,
    Terminating,
    Terminated,
    Skipped,
    InternalError,
    Blocked,
    WaitingForRetry,
}

impl RunLifeCycleState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Terminated | Self::Skipped | Self::InternalError
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunResultState {
    Success,
    Failed,
    Timedout,
    Canceled,
    MaximumConcurrentRunsReached,
    Excluded,
    SuccessWithFailures,
    UpstreamFailed,
    UpstreamCanceled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub life_cycle_state: RunLifeCycleState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_state: Option<RunResultState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_cancelled_or_timedout: Option<bool>,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        self.life_cycle_state.is_terminal()
    }

    pub fn is_success(&self) -> bool {
        self.result_state == Some(RunResultState::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerType {
    Periodic,
    OneTime,
    Retry,
    RunJobTask,
    FileArrival,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunType {
    JobRun,
    WorkflowRun,
    SubmitRun,
}

/// A task as it ran within a job run: the task definition plus run details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<i64>,
    #[serde(flatten)]
    pub task: JobTask,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<RunState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_instance: Option<ClusterInstance>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanup_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_number: Option<i32>,
}

impl GraphTask for RunTask {
    fn task_key(&self) -> &str {
        &self.task.task_key
    }

    fn depends_on(&self) -> &[TaskDependency] {
        &self.task.depends_on
    }
}

/// A job run or one-time submitted run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub run_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_in_job: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_attempt_run_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_page_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_type: Option<RunType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TriggerType>,
    pub state: RunState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<CronSchedule>,
    #[serde(default, skip_serializing_if = "TaskSet::is_empty")]
    pub tasks: TaskSet<RunTask>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub job_clusters: Vec<JobCluster>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_instance: Option<ClusterInstance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_source: Option<GitSource>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanup_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_number: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunsListResponse {
    #[serde(default)]
    pub runs: Vec<Run>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Filters for `jobs/runs/list`, sent as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunsListFilter {
    pub job_id: Option<i64>,
    pub active_only: bool,
    pub completed_only: bool,
    pub run_type: Option<RunType>,
    pub start_time_from: Option<DateTime<Utc>>,
    pub start_time_to: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
    pub page_token: Option<String>,
}

impl RunsListFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(job_id) = self.job_id {
            query.push(("job_id", job_id.to_string()));
        }
        if self.active_only {
            query.push(("active_only", "true".to_string()));
        }
        if self.completed_only {
            query.push(("completed_only", "true".to_string()));
        }
        if let Some(run_type) = self.run_type {
            let name = match run_type {
                RunType::JobRun => "JOB_RUN",
                RunType::WorkflowRun => "WORKFLOW_RUN",
                RunType::SubmitRun => "SUBMIT_RUN",
            };
            query.push(("run_type", name.to_string()));
        }
        if let Some(from) = self.start_time_from {
            query.push(("start_time_from", from.timestamp_millis().to_string()));
        }
        if let Some(to) = self.start_time_to {
            query.push(("start_time_to", to.timestamp_millis().to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(ref token) = self.page_token {
            query.push(("page_token", token.clone()));
        }
        query
    }
}

/// Body of `jobs/runs/submit`: a one-time run that does not create a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSubmitSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_name: Option<String>,
    #[serde(default, skip_serializing_if = "TaskSet::is_empty")]
    pub tasks: TaskSet<JobTask>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub job_clusters: Vec<JobCluster>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_source: Option<GitSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<JobEmailNotifications>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_control_list: Vec<AccessControlRequest>,
}

impl RunSubmitSettings {
    pub fn new(run_name: impl Into<String>) -> Self {
        Self {
            run_name: Some(run_name.into()),
            ..Default::default()
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<JobTask>) -> Result<Self> {
        self.tasks = TaskSet::link(tasks)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookOutput {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutput {
    #[serde(default)]
    pub notebook_output: Option<NotebookOutput>,
    #[serde(default)]
    pub logs: Option<String>,
    #[serde(default)]
    pub logs_truncated: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_trace: Option<String>,
    #[serde(default)]
    pub metadata: Option<Run>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewType {
    Notebook,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewsToExport {
    Code,
    Dashboards,
    All,
}

impl ViewsToExport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "CODE",
            Self::Dashboards => "DASHBOARDS",
            Self::All => "ALL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewItem {
    pub content: String,
    pub name: String,
    #[serde(rename = "type")]
    pub view_type: ViewType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRunResponse {
    #[serde(default)]
    pub views: Vec<ViewItem>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RepairRunRequest {
    pub run_id: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rerun_tasks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rerun_all_failed_tasks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_repair_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RepairRunResponse {
    pub repair_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn three_task_settings() -> JobSettings {
        JobSettings::new("etl")
            .with_job_cluster(
                "shared",
                ClusterAttributes::new("13.3.x-scala2.12", "i3.xlarge").with_num_workers(2),
            )
            .with_tasks(vec![
                JobTask::new("A", TaskPayload::Notebook(NotebookTask::new("/etl/a")))
                    .on_job_cluster("shared"),
                JobTask::new(
                    "B",
                    TaskPayload::SparkJar(SparkJarTask {
                        main_class_name: "com.example.B".to_string(),
                        parameters: vec!["--full".to_string()],
                        jar_uri: None,
                    }),
                )
                .on_existing_cluster("1234-567890-abc")
                .with_library(Library::jar("dbfs:/libs/b.jar")),
                JobTask::new(
                    "C",
                    TaskPayload::Pipeline(PipelineTask {
                        pipeline_id: "p-1".to_string(),
                        full_refresh: Some(false),
                    }),
                )
                .with_dependencies(["A", "B"])
                .with_retries(3, 60_000),
            ])
            .unwrap()
    }

    #[test]
    fn test_task_wire_shape() {
        let settings = three_task_settings();
        let value = serde_json::to_value(&settings).unwrap();
        let tasks = value["tasks"].as_array().unwrap();

        assert_eq!(tasks[0]["job_cluster_key"], "shared");
        assert_eq!(tasks[0]["notebook_task"]["notebook_path"], "/etl/a");
        assert_eq!(tasks[1]["existing_cluster_id"], "1234-567890-abc");
        assert_eq!(tasks[1]["libraries"], json!([{"jar": "dbfs:/libs/b.jar"}]));
        assert_eq!(
            tasks[2]["depends_on"],
            json!([{"task_key": "A"}, {"task_key": "B"}])
        );
        assert_eq!(tasks[2]["max_retries"], 3);
        assert!(tasks[2].get("existing_cluster_id").is_none());
        assert!(tasks[2].get("new_cluster").is_none());
    }

    #[test]
    fn test_task_encodes_every_field_in_place() {
        let mut task = JobTask::new(
            "wide",
            TaskPayload::Notebook(NotebookTask::new("/etl/wide")),
        )
        .with_description("all optional fields")
        .on_new_cluster(
            ClusterAttributes::new("13.3.x-scala2.12", "i3.xlarge").with_num_workers(4),
        )
        .with_library(Library::jar("dbfs:/libs/w.jar"))
        .with_timeout_seconds(600);
        task.run_if = Some(RunIf::AllDone);
        task.retry_policy.retry_on_timeout = Some(true);
        task.email_notifications = Some(JobEmailNotifications {
            on_failure: vec!["ops@example.com".to_string()],
            ..Default::default()
        });

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["description"], "all optional fields");
        assert_eq!(value["run_if"], "ALL_DONE");
        assert_eq!(value["new_cluster"]["num_workers"], 4);
        assert_eq!(value["retry_on_timeout"], true);
        assert_eq!(value["timeout_seconds"], 600);
        assert_eq!(
            value["email_notifications"],
            json!({"on_failure": ["ops@example.com"]})
        );
        assert!(value.get("depends_on").is_none());
        assert!(value.get("max_retries").is_none());

        let decoded: JobTask = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, task);
    }

    #[test]
    fn test_settings_decode_links_tasks() {
        let json = serde_json::to_string(&three_task_settings()).unwrap();
        let settings: JobSettings = serde_json::from_str(&json).unwrap();

        let deps = settings.tasks.dependencies_of("C").unwrap();
        assert!(std::ptr::eq(deps[0], settings.tasks.get("A").unwrap()));
        assert!(std::ptr::eq(deps[1], settings.tasks.get("B").unwrap()));
        assert_eq!(serde_json::to_string(&settings).unwrap(), json);
    }

    #[test]
    fn test_task_rejects_two_payloads() {
        let result: std::result::Result<JobTask, _> = serde_json::from_value(json!({
            "task_key": "x",
            "notebook_task": {"notebook_path": "/a"},
            "spark_python_task": {"python_file": "dbfs:/a.py"}
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("task 'x'"), "{}", err);
        assert!(err.contains("notebook_task, spark_python_task"), "{}", err);
    }

    #[test]
    fn test_task_rejects_missing_payload() {
        let result: std::result::Result<JobTask, _> =
            serde_json::from_value(json!({"task_key": "x", "existing_cluster_id": "c"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_task_rejects_two_clusters() {
        let result: std::result::Result<JobTask, _> = serde_json::from_value(json!({
            "task_key": "x",
            "existing_cluster_id": "c",
            "job_cluster_key": "k",
            "spark_submit_task": {"parameters": ["--class", "Main"]}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_decode_rejects_unknown_dependency() {
        let result: std::result::Result<JobSettings, _> = serde_json::from_value(json!({
            "name": "broken",
            "tasks": [
                {"task_key": "A", "notebook_task": {"notebook_path": "/a"}},
                {"task_key": "C", "depends_on": [{"task_key": "Z"}],
                 "notebook_task": {"notebook_path": "/c"}}
            ]
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("task 'C' depends on unknown task 'Z'"), "{}", err);
    }

    #[test]
    fn test_git_source_wire_shape() {
        let source = GitSource {
            git_url: "https://github.com/example/jobs".to_string(),
            git_provider: GitProvider::GitHub,
            reference: GitReference::Tag("v1.2.0".to_string()),
        };
        let value = serde_json::to_value(&source).unwrap();
        assert_eq!(
            value,
            json!({
                "git_url": "https://github.com/example/jobs",
                "git_provider": "gitHub",
                "git_tag": "v1.2.0"
            })
        );
        assert_eq!(serde_json::from_value::<GitSource>(value).unwrap(), source);

        let result: std::result::Result<GitSource, _> = serde_json::from_value(json!({
            "git_url": "u",
            "git_provider": "gitLab",
            "git_branch": "main",
            "git_commit": "abc"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_run_deserialization_links_run_tasks() {
        let json = r#"{
            "job_id": 11223344,
            "run_id": 455644833,
            "number_in_job": 1,
            "state": {
                "life_cycle_state": "TERMINATED",
                "result_state": "SUCCESS",
                "state_message": ""
            },
            "run_type": "JOB_RUN",
            "trigger": "PERIODIC",
            "start_time": 1625060460483,
            "tasks": [
                {
                    "run_id": 2112892,
                    "task_key": "Orders_Ingest",
                    "notebook_task": {"notebook_path": "/Users/a/Orders"},
                    "existing_cluster_id": "0923-164208-meows279",
                    "state": {"life_cycle_state": "TERMINATED", "result_state": "SUCCESS"},
                    "attempt_number": 0
                },
                {
                    "run_id": 2112897,
                    "task_key": "Match",
                    "depends_on": [{"task_key": "Orders_Ingest"}],
                    "spark_python_task": {"python_file": "dbfs:/match.py"},
                    "new_cluster": {"spark_version": "13.3.x-scala2.12", "num_workers": 1},
                    "cluster_instance": {"cluster_id": "0923-164208-xyz"},
                    "state": {"life_cycle_state": "RUNNING"}
                }
            ]
        }"#;

        let run: Run = serde_json::from_str(json).unwrap();
        assert!(run.state.is_terminal());
        assert!(run.state.is_success());
        assert_eq!(run.trigger, Some(TriggerType::Periodic));
        assert_eq!(run.start_time.unwrap().timestamp_millis(), 1625060460483);

        let matched = run.tasks.get("Match").unwrap();
        assert_eq!(matched.run_id, Some(2112897));
        assert!(matches!(matched.task.cluster, Some(TaskCluster::New(_))));
        assert!(!matched.state.as_ref().unwrap().is_terminal());

        let upstream = run.tasks.dependencies_of("Match").unwrap();
        assert!(std::ptr::eq(upstream[0], &run.tasks.tasks()[0]));
    }

    #[test]
    fn test_runs_list_filter_query() {
        let filter = RunsListFilter {
            job_id: Some(42),
            active_only: true,
            run_type: Some(RunType::SubmitRun),
            limit: Some(25),
            ..Default::default()
        };
        let query = filter.to_query();
        assert_eq!(
            query,
            vec![
                ("job_id", "42".to_string()),
                ("active_only", "true".to_string()),
                ("run_type", "SUBMIT_RUN".to_string()),
                ("limit", "25".to_string()),
            ]
        );
    }

    #[test]
    fn test_run_now_request_flattens_parameters() {
        let mut parameters = RunParameters::default();
        parameters
            .notebook_params
            .insert("date".to_string(), "2024-01-01".to_string());
        let request = RunNowRequest {
            job_id: 7,
            parameters,
            idempotency_token: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"job_id": 7, "notebook_params": {"date": "2024-01-01"}})
        );
    }
}
