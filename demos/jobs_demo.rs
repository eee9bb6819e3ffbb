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

//! Submits a one-time run of three notebook tasks, `C` waiting on `A` and
//! `B`, and polls it to completion.
//!
//! ```bash
//! cargo run --example jobs_demo -- https://my-workspace.cloud.databricks.com dapi... 0123-456789-abcdef
//! ```
//!
//! The third argument is an existing cluster id (or `DATABRICKS_CLUSTER_ID`).
//! Notebooks are read from `DATABRICKS_NOTEBOOK_DIR` (default `/Shared/demo`).

use databricks_rest::types::jobs::{JobTask, NotebookTask, RunSubmitSettings, TaskPayload};
use databricks_rest::{ClientConfig, DatabricksClient, GraphTask};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_secs(10);
const MAX_POLLS: usize = 90;

fn notebook_task(dir: &str, key: &str, cluster_id: &str) -> JobTask {
    let notebook = NotebookTask::new(format!("{}/{}", dir, key)).with_parameter("step", key);
    JobTask::new(key, TaskPayload::Notebook(notebook)).on_existing_cluster(cluster_id)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut args = std::env::args().skip(1);
    let mut config = ClientConfig::from_env();
    if let Some(host) = args.next() {
        config = config.with_host(host);
    }
    if let Some(token) = args.next() {
        config = config.with_token(token);
    }
    let cluster_id = args
        .next()
        .or_else(|| std::env::var("DATABRICKS_CLUSTER_ID").ok())
        .expect("cluster id argument or DATABRICKS_CLUSTER_ID required");
    let dir = std::env::var("DATABRICKS_NOTEBOOK_DIR").unwrap_or_else(|_| "/Shared/demo".into());

    let client = DatabricksClient::new(&config).expect("Failed to create client");

    let settings = RunSubmitSettings::new("databricks-rest-demo")
        .with_tasks(vec![
            notebook_task(&dir, "A", &cluster_id),
            notebook_task(&dir, "B", &cluster_id),
            notebook_task(&dir, "C", &cluster_id).with_dependencies(["A", "B"]),
        ])
        .expect("Failed to link tasks");
    let order: Vec<&str> = settings
        .tasks
        .execution_order()
        .expect("Task graph has a cycle")
        .into_iter()
        .map(|t| t.task_key())
        .collect();
    println!("Execution order: {}", order.join(" -> "));

    let submitted = client
        .jobs()
        .runs_submit(&settings)
        .await
        .expect("Failed to submit run");
    println!("Submitted run {}", submitted.run_id);

    for _ in 0..MAX_POLLS {
        let run = client
            .jobs()
            .runs_get(submitted.run_id)
            .await
            .expect("Failed to get run");
        println!("  run: {:?}", run.state.life_cycle_state);
        for task in run.tasks.iter() {
            let upstream: Vec<&str> = run
                .tasks
                .dependencies_of(task.task_key())
                .unwrap_or_default()
                .into_iter()
                .map(|t| t.task_key())
                .collect();
            println!(
                "    {} (after {:?}): {:?}",
                task.task_key(),
                upstream,
                task.state.as_ref().map(|s| s.life_cycle_state)
            );
        }
        if run.state.is_terminal() {
            println!("Result: {:?}", run.state.result_state);
            return;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    println!("Run {} still active, giving up", submitted.run_id);
}
