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

//! Typed client for the Databricks REST API.
//!
//! ## Overview
//!
//! - [`DatabricksClient`] - Entry point, hands out one client per API area
//! - [`ClientConfig`] - Host, token, HTTP and logging settings
//! - [`types`] - Request and response types for every API area
//! - [`TaskSet`] - Job tasks linked into a dependency graph
//!
//! Payloads whose shape is selected by which key is present (libraries, task
//! payloads, task clusters, Git references, ACL principals) are modelled as
//! enums. Decoding fails when zero or several of the selecting keys are
//! present, so a decoded value always names exactly one variant.
//!
//! ## Example
//!
//! ```ignore
//! use databricks_rest::{ClientConfig, DatabricksClient};
//! use databricks_rest::types::jobs::{JobTask, NotebookTask, RunSubmitSettings, TaskPayload};
//!
//! let config = ClientConfig::new()
//!     .with_host("my-workspace.cloud.databricks.com")
//!     .with_token("dapi...");
//! let client = DatabricksClient::new(&config)?;
//!
//! let task = JobTask::new("ingest", TaskPayload::Notebook(NotebookTask::new("/etl/ingest")))
//!     .on_existing_cluster("0123-456789-abcdef");
//! let settings = RunSubmitSettings::new("one-off").with_tasks(vec![task])?;
//! let run = client.jobs().runs_submit(&settings).await?;
//! ```
//!
//! ## Configuration Options
//!
//! | Option | Description |
//! |--------|-------------|
//! | `databricks.host` | Workspace URL |
//! | `databricks.access_token` | Personal access token |
//! | `databricks.http.connect_timeout_ms` | TCP connect timeout |
//! | `databricks.http.read_timeout_ms` | Request timeout |
//! | `databricks.http.max_connections_per_host` | Idle connection pool size |
//! | `databricks.log_level` | Log level filter, `OFF` disables logging |
//! | `databricks.log_file` | Append logs to this file instead of stderr |

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export main types
pub use client::{ApiRequest, ApiTransport, DatabricksClient, RestClient};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use logging::{init_logging, LogConfig};

// Re-export client types for advanced users
pub use auth::{AuthProvider, PersonalAccessToken};
pub use client::{DatabricksHttpClient, HttpClientConfig};

pub use types::{GraphTask, TaskDependency, TaskSet};
