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

//! Clusters API client (`/api/2.0/clusters`).

use crate::client::RestClient;
use crate::error::Result;
use crate::types::clusters::{
    ClusterAttributes, ClusterEventsRequest, ClusterEventsResponse, ClusterId, ClusterInfo,
    ClusterSize, EditClusterRequest, ListClustersResponse, ListNodeTypesResponse, NodeType,
    ResizeRequest, SparkVersion, SparkVersionsResponse,
};
use tracing::debug;

const BASE: &str = "/api/2.0/clusters";

#[derive(Debug, Clone)]
pub struct ClustersClient {
    rest: RestClient,
}

impl ClustersClient {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    fn path(endpoint: &str) -> String {
        format!("{}/{}", BASE, endpoint)
    }

    /// Creates a cluster and returns its id. The cluster starts in `PENDING`.
    pub async fn create(&self, attributes: &ClusterAttributes) -> Result<String> {
        let created: ClusterId = self.rest.post(&Self::path("create"), attributes).await?;
        debug!("Created cluster {}", created.cluster_id);
        Ok(created.cluster_id)
    }

    /// Replaces the configuration of a cluster.
    pub async fn edit(&self, cluster_id: &str, attributes: ClusterAttributes) -> Result<()> {
        let request = EditClusterRequest {
            cluster_id: cluster_id.to_string(),
            attributes,
        };
        self.rest.post_unit(&Self::path("edit"), &request).await
    }

    pub async fn start(&self, cluster_id: &str) -> Result<()> {
        self.rest
            .post_unit(&Self::path("start"), &ClusterId::new(cluster_id))
            .await
    }

    pub async fn restart(&self, cluster_id: &str) -> Result<()> {
        self.rest
            .post_unit(&Self::path("restart"), &ClusterId::new(cluster_id))
            .await
    }

    pub async fn resize(&self, cluster_id: &str, size: ClusterSize) -> Result<()> {
        let request = ResizeRequest {
            cluster_id: cluster_id.to_string(),
            size,
        };
        self.rest.post_unit(&Self::path("resize"), &request).await
    }

    /// Terminates a cluster. It keeps its configuration and can be started again.
    pub async fn terminate(&self, cluster_id: &str) -> Result<()> {
        self.rest
            .post_unit(&Self::path("delete"), &ClusterId::new(cluster_id))
            .await
    }

    pub async fn permanent_delete(&self, cluster_id: &str) -> Result<()> {
        self.rest
            .post_unit(&Self::path("permanent-delete"), &ClusterId::new(cluster_id))
            .await
    }

    pub async fn get(&self, cluster_id: &str) -> Result<ClusterInfo> {
        self.rest
            .get(&Self::path("get"), &[("cluster_id", cluster_id.to_string())])
            .await
    }

    pub async fn list(&self) -> Result<Vec<ClusterInfo>> {
        let response: ListClustersResponse = self.rest.get(&Self::path("list"), &[]).await?;
        Ok(response.clusters)
    }

    pub async fn pin(&self, cluster_id: &str) -> Result<()> {
        self.rest
            .post_unit(&Self::path("pin"), &ClusterId::new(cluster_id))
            .await
    }

    pub async fn unpin(&self, cluster_id: &str) -> Result<()> {
        self.rest
            .post_unit(&Self::path("unpin"), &ClusterId::new(cluster_id))
            .await
    }

    pub async fn list_node_types(&self) -> Result<Vec<NodeType>> {
        let response: ListNodeTypesResponse =
            self.rest.get(&Self::path("list-node-types"), &[]).await?;
        Ok(response.node_types)
    }

    pub async fn list_spark_versions(&self) -> Result<Vec<SparkVersion>> {
        let response: SparkVersionsResponse =
            self.rest.get(&Self::path("spark-versions"), &[]).await?;
        Ok(response.versions)
    }

    /// One page of cluster events. Pass `next_page` back for the following page.
    pub async fn events(&self, request: &ClusterEventsRequest) -> Result<ClusterEventsResponse> {
        self.rest.post(&Self::path("events"), request).await
    }
}
