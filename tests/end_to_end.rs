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

//! Client flows against an in-memory workspace that stores what it is sent.

use async_trait::async_trait;
use databricks_rest::types::jobs::{
    JobSettings, JobTask, NotebookTask, RunLifeCycleState, RunSubmitSettings, TaskPayload,
};
use databricks_rest::types::secrets::SecretValue;
use databricks_rest::{ApiRequest, ApiTransport, DatabricksClient, Error, GraphTask, Result};
use reqwest::Method;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct FakeWorkspace {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    jobs: BTreeMap<i64, Value>,
    runs: BTreeMap<i64, Value>,
    secrets: BTreeMap<String, Vec<String>>,
    paths: Vec<String>,
}

impl FakeWorkspace {
    fn query<'a>(request: &'a ApiRequest, key: &str) -> Option<&'a str> {
        request
            .query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn not_found(what: &str) -> Error {
        Error::from_response(
            404,
            json!({"error_code": "RESOURCE_DOES_NOT_EXIST", "message": what}).to_string(),
        )
    }
}

#[async_trait]
impl ApiTransport for FakeWorkspace {
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>> {
        let mut state = self.state.lock().unwrap();
        state.paths.push(request.path.clone());
        let body = request.body.clone().unwrap_or_else(|| json!({}));

        let response = match (request.method.clone(), request.path.as_str()) {
            (Method::POST, "/api/2.1/jobs/create") => {
                state.next_id += 1;
                let id = state.next_id;
                let mut settings = body;
                if let Some(settings) = settings.as_object_mut() {
                    settings.remove("access_control_list");
                }
                state.jobs.insert(id, settings);
                json!({"job_id": id})
            }
            (Method::GET, "/api/2.1/jobs/get") => {
                let id: i64 = Self::query(&request, "job_id")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_default();
                let settings = state
                    .jobs
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| Self::not_found("job"))?;
                json!({"job_id": id, "settings": settings})
            }
            (Method::POST, "/api/2.1/jobs/runs/submit") => {
                state.next_id += 1;
                let id = state.next_id;
                let tasks: Vec<Value> = body["tasks"]
                    .as_array()
                    .cloned()
                    .unwrap_or_default()
                    .into_iter()
                    .enumerate()
                    .map(|(i, mut task)| {
                        task["run_id"] = json!(id * 100 + i as i64);
                        task["state"] = json!({"life_cycle_state": "TERMINATED",
                                               "result_state": "SUCCESS"});
                        task
                    })
                    .collect();
                state.runs.insert(
                    id,
                    json!({
                        "run_id": id,
                        "run_name": body["run_name"],
                        "state": {"life_cycle_state": "TERMINATED", "result_state": "SUCCESS"},
                        "tasks": tasks
                    }),
                );
                json!({"run_id": id})
            }
            (Method::GET, "/api/2.1/jobs/runs/get") => {
                let id: i64 = Self::query(&request, "run_id")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_default();
                state
                    .runs
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| Self::not_found("run"))?
            }
            (Method::POST, "/api/2.0/secrets/scopes/create") => {
                let scope = body["scope"].as_str().unwrap_or_default().to_string();
                state.secrets.insert(scope, Vec::new());
                json!({})
            }
            (Method::POST, "/api/2.0/secrets/put") => {
                let scope = body["scope"].as_str().unwrap_or_default();
                let key = body["key"].as_str().unwrap_or_default().to_string();
                state
                    .secrets
                    .get_mut(scope)
                    .ok_or_else(|| Self::not_found("scope"))?
                    .push(key);
                return Ok(None);
            }
            (Method::GET, "/api/2.0/secrets/list") => {
                let scope = Self::query(&request, "scope").unwrap_or_default();
                let keys = state
                    .secrets
                    .get(scope)
                    .cloned()
                    .ok_or_else(|| Self::not_found("scope"))?;
                let secrets: Vec<Value> = keys
                    .into_iter()
                    .map(|key| json!({"key": key, "last_updated_timestamp": 1700000000000i64}))
                    .collect();
                json!({"secrets": secrets})
            }
            (method, path) => {
                return Err(Error::transport(format!("unexpected {} {}", method, path)))
            }
        };
        Ok(Some(response))
    }
}

fn workspace() -> (DatabricksClient, Arc<FakeWorkspace>) {
    let fake = Arc::new(FakeWorkspace::default());
    (DatabricksClient::with_transport(fake.clone()), fake)
}

fn notebook(key: &str) -> JobTask {
    JobTask::new(
        key,
        TaskPayload::Notebook(NotebookTask::new(format!("/etl/{}", key))),
    )
    .on_existing_cluster("0123-456789-abcdef")
}

#[tokio::test]
async fn test_created_job_reads_back_with_same_graph() {
    let (client, _fake) = workspace();

    let settings = JobSettings::new("diamond")
        .with_tasks(vec![
            notebook("A"),
            notebook("B"),
            notebook("C").with_dependencies(["A", "B"]),
        ])
        .unwrap();
    let job_id = client.jobs().create(settings.clone(), Vec::new()).await.unwrap();

    let job = client.jobs().get(job_id).await.unwrap();
    assert_eq!(job.job_id, job_id);
    assert_eq!(job.settings, settings);

    let upstream: Vec<&str> = job
        .settings
        .tasks
        .dependencies_of("C")
        .unwrap()
        .into_iter()
        .map(|t| t.task_key())
        .collect();
    assert_eq!(upstream, vec!["A", "B"]);
}

#[tokio::test]
async fn test_submitted_run_links_task_runs() {
    let (client, _fake) = workspace();

    let settings = RunSubmitSettings::new("one-off")
        .with_tasks(vec![notebook("A"), notebook("B").with_dependencies(["A"])])
        .unwrap();
    let submitted = client.jobs().runs_submit(&settings).await.unwrap();
    let run = client.jobs().runs_get(submitted.run_id).await.unwrap();

    assert_eq!(run.state.life_cycle_state, RunLifeCycleState::Terminated);
    assert!(run.state.is_success());
    let downstream = run.tasks.dependents_of("A").unwrap();
    assert_eq!(downstream.len(), 1);
    assert_eq!(downstream[0].task_key(), "B");
    assert!(std::ptr::eq(
        run.tasks.dependencies_of("B").unwrap()[0],
        run.tasks.get("A").unwrap()
    ));
}

#[tokio::test]
async fn test_missing_job_is_not_found() {
    let (client, _fake) = workspace();

    let err = client.jobs().get(404).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.error_code(), Some("RESOURCE_DOES_NOT_EXIST"));
}

#[tokio::test]
async fn test_secret_scope_flow() {
    let (client, fake) = workspace();
    let scope = databricks_rest::types::secrets::SecretScope::Databricks {
        name: "demo".to_string(),
    };

    client.secrets().create_scope(&scope, None).await.unwrap();
    client
        .secrets()
        .put_secret("demo", "password", SecretValue::String("hunter2".to_string()))
        .await
        .unwrap();
    let secrets = client.secrets().list_secrets("demo").await.unwrap();

    assert_eq!(secrets.len(), 1);
    assert_eq!(secrets[0].key, "password");
    assert!(secrets[0].last_updated_timestamp.is_some());
    assert_eq!(
        fake.state.lock().unwrap().paths,
        vec![
            "/api/2.0/secrets/scopes/create",
            "/api/2.0/secrets/put",
            "/api/2.0/secrets/list"
        ]
    );
}
