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

//! Libraries API client (`/api/2.0/libraries`).

use crate::client::RestClient;
use crate::error::Result;
use crate::types::libraries::{
    AllClusterLibraryStatuses, ClusterLibraries, ClusterLibraryStatuses, Library,
};
use tracing::debug;

const BASE: &str = "/api/2.0/libraries";

#[derive(Debug, Clone)]
pub struct LibrariesClient {
    rest: RestClient,
}

impl LibrariesClient {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    pub async fn all_cluster_statuses(&self) -> Result<Vec<ClusterLibraryStatuses>> {
        let response: AllClusterLibraryStatuses = self
            .rest
            .get(&format!("{}/all-cluster-statuses", BASE), &[])
            .await?;
        Ok(response.statuses)
    }

    pub async fn cluster_status(&self, cluster_id: &str) -> Result<ClusterLibraryStatuses> {
        self.rest
            .get(
                &format!("{}/cluster-status", BASE),
                &[("cluster_id", cluster_id.to_string())],
            )
            .await
    }

    /// Installs libraries asynchronously; poll `cluster_status` for progress.
    pub async fn install(&self, cluster_id: &str, libraries: Vec<Library>) -> Result<()> {
        debug!("Installing {} libraries on {}", libraries.len(), cluster_id);
        let request = ClusterLibraries {
            cluster_id: cluster_id.to_string(),
            libraries,
        };
        self.rest
            .post_unit(&format!("{}/install", BASE), &request)
            .await
    }

    /// Marks libraries for removal; they are removed on the next restart.
    pub async fn uninstall(&self, cluster_id: &str, libraries: Vec<Library>) -> Result<()> {
        let request = ClusterLibraries {
            cluster_id: cluster_id.to_string(),
            libraries,
        };
        self.rest
            .post_unit(&format!("{}/uninstall", BASE), &request)
            .await
    }
}
