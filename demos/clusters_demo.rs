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

//! Creates a small cluster, waits for it to start, then terminates it.
//!
//! ```bash
//! cargo run --example clusters_demo -- https://my-workspace.cloud.databricks.com dapi...
//! ```
//!
//! Host and token fall back to `DATABRICKS_HOST` and `DATABRICKS_TOKEN`.
//! `DATABRICKS_SPARK_VERSION` and `DATABRICKS_NODE_TYPE` pick the cluster shape.

use databricks_rest::types::clusters::{ClusterAttributes, ClusterState};
use databricks_rest::{ClientConfig, DatabricksClient, LogConfig};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_secs(15);
const MAX_POLLS: usize = 60;

#[tokio::main]
async fn main() {
    let mut args = std::env::args().skip(1);
    let mut config = ClientConfig::from_env().with_log_config(LogConfig {
        level: Some("DEBUG".to_string()),
        file: None,
    });
    if let Some(host) = args.next() {
        config = config.with_host(host);
    }
    if let Some(token) = args.next() {
        config = config.with_token(token);
    }
    let client = DatabricksClient::new(&config).expect("Failed to create client");

    let spark_version =
        std::env::var("DATABRICKS_SPARK_VERSION").unwrap_or_else(|_| "13.3.x-scala2.12".into());
    let node_type = std::env::var("DATABRICKS_NODE_TYPE").unwrap_or_else(|_| "i3.xlarge".into());

    let attributes = ClusterAttributes::new(spark_version, node_type)
        .with_name("databricks-rest-demo")
        .with_num_workers(1)
        .with_autotermination_minutes(20);
    let cluster_id = client
        .clusters()
        .create(&attributes)
        .await
        .expect("Failed to create cluster");
    println!("Created cluster {}", cluster_id);

    for _ in 0..MAX_POLLS {
        let info = client
            .clusters()
            .get(&cluster_id)
            .await
            .expect("Failed to get cluster");
        let state = info.state.unwrap_or(ClusterState::Unknown);
        println!("  state: {:?}", state);
        if state == ClusterState::Running || state.is_terminal() {
            break;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    client
        .clusters()
        .terminate(&cluster_id)
        .await
        .expect("Failed to terminate cluster");
    println!("Terminated cluster {}", cluster_id);
}
