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

//! Delta Live Tables pipelines client (`/api/2.0/pipelines`).

use crate::client::{path_segment, RestClient};
use crate::error::Result;
use crate::types::pipelines::{
    CreatePipelineResponse, ListPipelinesResponse, PipelineInfo, PipelineSettings,
    StartUpdateRequest, StartUpdateResponse,
};
use tracing::debug;

const BASE: &str = "/api/2.0/pipelines";

#[derive(Debug, Clone)]
pub struct PipelinesClient {
    rest: RestClient,
}

impl PipelinesClient {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    fn path(pipeline_id: &str) -> Result<String> {
        Ok(format!("{}/{}", BASE, path_segment("pipeline id", pipeline_id)?))
    }

    /// Creates a pipeline and returns its id.
    pub async fn create(&self, settings: &PipelineSettings) -> Result<String> {
        let created: CreatePipelineResponse = self.rest.post(BASE, settings).await?;
        debug!("Created pipeline {}", created.pipeline_id);
        Ok(created.pipeline_id)
    }

    pub async fn get(&self, pipeline_id: &str) -> Result<PipelineInfo> {
        self.rest.get(&Self::path(pipeline_id)?, &[]).await
    }

    pub async fn list(&self, page_token: Option<&str>) -> Result<ListPipelinesResponse> {
        let query: Vec<(&str, String)> = page_token
            .map(|token| vec![("page_token", token.to_string())])
            .unwrap_or_default();
        self.rest.get(BASE, &query).await
    }

    /// Replaces the settings of a pipeline.
    pub async fn edit(&self, pipeline_id: &str, settings: &PipelineSettings) -> Result<()> {
        let mut settings = settings.clone();
        settings.id = Some(pipeline_id.to_string());
        self.rest
            .put_unit(&Self::path(pipeline_id)?, &settings)
            .await
    }

    pub async fn delete(&self, pipeline_id: &str) -> Result<()> {
        self.rest.delete(&Self::path(pipeline_id)?, &[]).await
    }

    /// Starts an update and returns its id.
    pub async fn start_update(
        &self,
        pipeline_id: &str,
        request: &StartUpdateRequest,
    ) -> Result<String> {
        let response: StartUpdateResponse = self
            .rest
            .post(&format!("{}/updates", Self::path(pipeline_id)?), request)
            .await?;
        debug!("Pipeline {} started update {}", pipeline_id, response.update_id);
        Ok(response.update_id)
    }

    /// Stops the active update, if any.
    pub async fn stop(&self, pipeline_id: &str) -> Result<()> {
        self.rest
            .post_unit(
                &format!("{}/stop", Self::path(pipeline_id)?),
                &serde_json::json!({}),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::mock::mock_client;
    use crate::types::pipelines::{
        PipelineLibrary, PipelineSettings, PipelineState, StartUpdateRequest, UpdateState,
    };
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_sends_library_variants() {
        let (client, mock) = mock_client();
        mock.push_response(json!({"pipeline_id": "p1"}));

        let settings = PipelineSettings::new("bronze")
            .with_library(PipelineLibrary::Notebook("/Repos/me/dlt/bronze".to_string()));
        let id = client.pipelines().create(&settings).await.unwrap();

        assert_eq!(id, "p1");
        assert_eq!(
            mock.last_request().body.unwrap()["libraries"],
            json!([{"notebook": {"path": "/Repos/me/dlt/bronze"}}])
        );
    }

    #[tokio::test]
    async fn test_edit_sets_id_and_uses_put() {
        let (client, mock) = mock_client();
        mock.push_empty();

        client
            .pipelines()
            .edit("p1", &PipelineSettings::new("bronze"))
            .await
            .unwrap();

        let request = mock.last_request();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path, "/api/2.0/pipelines/p1");
        assert_eq!(request.body.unwrap()["id"], "p1");
    }

    #[tokio::test]
    async fn test_get_and_start_update() {
        let (client, mock) = mock_client();
        mock.push_response(json!({
            "pipeline_id": "p1",
            "state": "IDLE",
            "latest_updates": [{"update_id": "u0", "state": "COMPLETED"}]
        }));
        mock.push_response(json!({"update_id": "u1"}));

        let info = client.pipelines().get("p1").await.unwrap();
        assert_eq!(info.state, Some(PipelineState::Idle));
        assert!(info.latest_updates[0].state.unwrap().is_terminal());
        assert_ne!(info.latest_updates[0].state, Some(UpdateState::Running));

        let request = StartUpdateRequest {
            full_refresh: Some(true),
            ..Default::default()
        };
        let update_id = client.pipelines().start_update("p1", &request).await.unwrap();
        assert_eq!(update_id, "u1");
        assert_eq!(mock.last_request().path, "/api/2.0/pipelines/p1/updates");
    }
}
