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

//! Delta Live Tables pipeline types.
//!
//! Pipeline libraries are another key-presence union: one of `notebook`,
//! `file`, `jar`, `maven` or `whl` per entry.

use crate::error::Error;
use crate::types::clusters::AutoScale;
use crate::types::libraries::MavenLibrary;
use crate::types::variant::exactly_one;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathReference {
    pub path: String,
}

/// Source code or artifact loaded by a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PipelineLibraryWire", into = "PipelineLibraryWire")]
pub enum PipelineLibrary {
    Notebook(String),
    File(String),
    Jar(String),
    Maven(MavenLibrary),
    Whl(String),
}

#[derive(Default, Serialize, Deserialize)]
struct PipelineLibraryWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notebook: Option<PathReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<PathReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    jar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    maven: Option<MavenLibrary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    whl: Option<String>,
}

impl TryFrom<PipelineLibraryWire> for PipelineLibrary {
    type Error = Error;

    fn try_from(wire: PipelineLibraryWire) -> Result<Self, Self::Error> {
        exactly_one(
            "pipeline library",
            [
                ("notebook", wire.notebook.map(|n| Self::Notebook(n.path))),
                ("file", wire.file.map(|f| Self::File(f.path))),
                ("jar", wire.jar.map(Self::Jar)),
                ("maven", wire.maven.map(Self::Maven)),
                ("whl", wire.whl.map(Self::Whl)),
            ],
        )
    }
}

impl From<PipelineLibrary> for PipelineLibraryWire {
    fn from(library: PipelineLibrary) -> Self {
        let mut wire = Self::default();
        match library {
            PipelineLibrary::Notebook(path) => wire.notebook = Some(PathReference { path }),
            PipelineLibrary::File(path) => wire.file = Some(PathReference { path }),
            PipelineLibrary::Jar(jar) => wire.jar = Some(jar),
            PipelineLibrary::Maven(maven) => wire.maven = Some(maven),
            PipelineLibrary::Whl(whl) => wire.whl = Some(whl),
        }
        wire
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineCluster {
    /// `default` or `maintenance`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_workers: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscale: Option<AutoScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_node_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub spark_conf: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineEdition {
    Core,
    Pro,
    Advanced,
}

/// Pipeline specification sent to `create` and `edit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub configuration: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clusters: Vec<PipelineCluster>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<PipelineLibrary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuous: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photon: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serverless: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<PipelineEdition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl PipelineSettings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_library(mut self, library: PipelineLibrary) -> Self {
        self.libraries.push(library);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineState {
    Deploying,
    Starting,
    Running,
    Stopping,
    Deleted,
    Recovering,
    Failed,
    Resetting,
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineHealth {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateState {
    Queued,
    Created,
    WaitingForResources,
    Initializing,
    Resetting,
    SettingUpTables,
    Running,
    Stopping,
    Completed,
    Failed,
    Canceled,
}

impl UpdateState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Canceled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStateInfo {
    pub update_id: String,
    #[serde(default)]
    pub state: Option<UpdateState>,
    /// ISO-8601 timestamp string, as the pipelines API reports it.
    #[serde(default)]
    pub creation_time: Option<String>,
}

/// Response of `GET pipelines/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineInfo {
    pub pipeline_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub spec: Option<PipelineSettings>,
    #[serde(default)]
    pub state: Option<PipelineState>,
    #[serde(default)]
    pub health: Option<PipelineHealth>,
    #[serde(default)]
    pub cluster_id: Option<String>,
    #[serde(default)]
    pub creator_user_name: Option<String>,
    #[serde(default)]
    pub latest_updates: Vec<UpdateStateInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListPipelinesResponse {
    #[serde(default)]
    pub statuses: Vec<PipelineInfo>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePipelineResponse {
    pub pipeline_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StartUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_refresh: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub refresh_selection: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub full_refresh_selection: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartUpdateResponse {
    pub update_id: String,
}
