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

//! Request and response types of the Databricks REST API.
//!
//! This module contains data structures organized by API area:
//! - `clusters`, `libraries`: compute and installed libraries
//! - `jobs`, `task_graph`: jobs, runs and their linked task graphs
//! - `dbfs`, `workspace`: files and notebooks
//! - `secrets`, `permissions`, `tokens`: access control
//! - `warehouses`, `repos`, `pipelines`, `unity_catalog`
//!
//! Polymorphic payloads whose variant is chosen by key presence are decoded
//! through the helpers in `variant`.

pub mod clusters;
pub mod dbfs;
pub mod encoding;
pub mod jobs;
pub mod libraries;
pub mod permissions;
pub mod pipelines;
pub mod repos;
pub mod secrets;
pub mod task_graph;
pub mod tokens;
pub mod unity_catalog;
pub(crate) mod variant;
pub mod warehouses;
pub mod workspace;

// Re-export commonly used types
pub use clusters::{ClusterAttributes, ClusterInfo, ClusterState};
pub use jobs::{
    GitProvider, GitReference, GitSource, Job, JobSettings, JobTask, Run, RunLifeCycleState,
    RunSubmitSettings, RunTask, TaskCluster, TaskPayload,
};
pub use libraries::Library;
pub use permissions::{AccessControlRequest, AclPermissionItem, PermissionLevel};
pub use secrets::{SecretScope, SecretValue};
pub use task_graph::{GraphTask, TaskDependency, TaskSet};
