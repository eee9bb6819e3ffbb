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

//! Jobs API client (`/api/2.1/jobs`).
//!
//! Job settings and runs returned by this client carry linked task sets:
//! decoding fails if a task names an unknown or duplicate key.

use crate::client::RestClient;
use crate::error::Result;
use crate::types::jobs::{
    CreateJobRequest, ExportRunResponse, Job, JobId, JobSettings, JobsListResponse,
    RepairRunRequest, RepairRunResponse, ResetJobRequest, Run, RunId, RunIdentifier,
    RunNowRequest, RunOutput, RunParameters, RunSubmitSettings, RunsListFilter,
    RunsListResponse, UpdateJobRequest, ViewsToExport,
};
use crate::types::permissions::AccessControlRequest;
use tracing::debug;

const BASE: &str = "/api/2.1/jobs";

#[derive(Debug, Clone)]
pub struct JobsClient {
    rest: RestClient,
}

impl JobsClient {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    fn path(endpoint: &str) -> String {
        format!("{}/{}", BASE, endpoint)
    }

    /// Creates a job and returns its id.
    pub async fn create(
        &self,
        settings: JobSettings,
        access_control_list: Vec<AccessControlRequest>,
    ) -> Result<i64> {
        debug!(
            "Creating job {:?} with {} tasks",
            settings.name,
            settings.tasks.len()
        );
        let request = CreateJobRequest {
            settings,
            access_control_list,
        };
        let created: JobId = self.rest.post(&Self::path("create"), &request).await?;
        Ok(created.job_id)
    }

    /// One page of jobs, with their task lists.
    pub async fn list(&self, limit: Option<u32>, page_token: Option<&str>) -> Result<JobsListResponse> {
        let mut query = vec![("expand_tasks", "true".to_string())];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(token) = page_token {
            query.push(("page_token", token.to_string()));
        }
        self.rest.get(&Self::path("list"), &query).await
    }

    pub async fn get(&self, job_id: i64) -> Result<Job> {
        self.rest
            .get(&Self::path("get"), &[("job_id", job_id.to_string())])
            .await
    }

    /// Overwrites all settings of a job.
    pub async fn reset(&self, job_id: i64, new_settings: JobSettings) -> Result<()> {
        let request = ResetJobRequest {
            job_id,
            new_settings,
        };
        self.rest.post_unit(&Self::path("reset"), &request).await
    }

    /// Adds, changes or removes individual settings.
    pub async fn update(&self, request: &UpdateJobRequest) -> Result<()> {
        self.rest.post_unit(&Self::path("update"), request).await
    }

    pub async fn delete(&self, job_id: i64) -> Result<()> {
        self.rest
            .post_unit(&Self::path("delete"), &JobId { job_id })
            .await
    }

    /// Triggers a run of an existing job.
    pub async fn run_now(
        &self,
        job_id: i64,
        parameters: RunParameters,
        idempotency_token: Option<String>,
    ) -> Result<RunIdentifier> {
        let request = RunNowRequest {
            job_id,
            parameters,
            idempotency_token,
        };
        let run: RunIdentifier = self.rest.post(&Self::path("run-now"), &request).await?;
        debug!("Job {} started run {}", job_id, run.run_id);
        Ok(run)
    }

    /// Submits a one-time run without creating a job.
    pub async fn runs_submit(&self, settings: &RunSubmitSettings) -> Result<RunIdentifier> {
        let run: RunIdentifier = self.rest.post(&Self::path("runs/submit"), settings).await?;
        debug!("Submitted run {}", run.run_id);
        Ok(run)
    }

    pub async fn runs_list(&self, filter: &RunsListFilter) -> Result<RunsListResponse> {
        self.rest
            .get(&Self::path("runs/list"), &filter.to_query())
            .await
    }

    pub async fn runs_get(&self, run_id: i64) -> Result<Run> {
        self.rest
            .get(&Self::path("runs/get"), &[("run_id", run_id.to_string())])
            .await
    }

    pub async fn runs_cancel(&self, run_id: i64) -> Result<()> {
        self.rest
            .post_unit(&Self::path("runs/cancel"), &RunId { run_id })
            .await
    }

    pub async fn runs_cancel_all(&self, job_id: i64) -> Result<()> {
        self.rest
            .post_unit(&Self::path("runs/cancel-all"), &JobId { job_id })
            .await
    }

    /// Deletes a non-active run.
    pub async fn runs_delete(&self, run_id: i64) -> Result<()> {
        self.rest
            .post_unit(&Self::path("runs/delete"), &RunId { run_id })
            .await
    }

    /// Output of a single task run. Multi-task runs must be queried per task run id.
    pub async fn runs_get_output(&self, run_id: i64) -> Result<RunOutput> {
        self.rest
            .get(
                &Self::path("runs/get-output"),
                &[("run_id", run_id.to_string())],
            )
            .await
    }

    pub async fn runs_export(&self, run_id: i64, views: ViewsToExport) -> Result<ExportRunResponse> {
        self.rest
            .get(
                &Self::path("runs/export"),
                &[
                    ("run_id", run_id.to_string()),
                    ("views_to_export", views.as_str().to_string()),
                ],
            )
            .await
    }

    /// Re-runs failed or selected tasks of a job run.
    pub async fn runs_repair(&self, request: &RepairRunRequest) -> Result<i64> {
        let response: RepairRunResponse =
            self.rest.post(&Self::path("runs/repair"), request).await?;
        Ok(response.repair_id)
    }
}
