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

//! Workspace API client (`/api/2.0/workspace`).

use crate::client::RestClient;
use crate::error::Result;
use crate::types::workspace::{
    DeleteRequest, ExportFormat, ExportResponse, ImportRequest, ListResponse, MkdirsRequest,
    ObjectInfo,
};

const BASE: &str = "/api/2.0/workspace";

#[derive(Debug, Clone)]
pub struct WorkspaceClient {
    rest: RestClient,
}

impl WorkspaceClient {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    fn path(endpoint: &str) -> String {
        format!("{}/{}", BASE, endpoint)
    }

    pub async fn list(&self, path: &str) -> Result<Vec<ObjectInfo>> {
        let response: ListResponse = self
            .rest
            .get(&Self::path("list"), &[("path", path.to_string())])
            .await?;
        Ok(response.objects)
    }

    pub async fn get_status(&self, path: &str) -> Result<ObjectInfo> {
        self.rest
            .get(&Self::path("get-status"), &[("path", path.to_string())])
            .await
    }

    pub async fn mkdirs(&self, path: &str) -> Result<()> {
        let request = MkdirsRequest {
            path: path.to_string(),
        };
        self.rest.post_unit(&Self::path("mkdirs"), &request).await
    }

    /// Deletes an object. Non-empty directories require `recursive`.
    pub async fn delete(&self, path: &str, recursive: bool) -> Result<()> {
        let request = DeleteRequest {
            path: path.to_string(),
            recursive,
        };
        self.rest.post_unit(&Self::path("delete"), &request).await
    }

    pub async fn import(&self, request: &ImportRequest) -> Result<()> {
        self.rest.post_unit(&Self::path("import"), request).await
    }

    /// Exports an object and returns its decoded content.
    pub async fn export(&self, path: &str, format: ExportFormat) -> Result<Vec<u8>> {
        let response: ExportResponse = self
            .rest
            .get(
                &Self::path("export"),
                &[
                    ("path", path.to_string()),
                    ("format", format.as_str().to_string()),
                ],
            )
            .await?;
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::mock::mock_client;
    use crate::types::workspace::{ExportFormat, ImportRequest, Language, ObjectType};
    use serde_json::json;

    #[tokio::test]
    async fn test_import_encodes_content() {
        let (client, mock) = mock_client();
        mock.push_empty();

        let request = ImportRequest {
            path: "/Users/me/hello".to_string(),
            format: ExportFormat::Source,
            language: Some(Language::Python),
            content: b"print(1)".to_vec(),
            overwrite: true,
        };
        client.workspace().import(&request).await.unwrap();

        assert_eq!(
            mock.last_request().body,
            Some(json!({
                "path": "/Users/me/hello",
                "format": "SOURCE",
                "language": "PYTHON",
                "content": "cHJpbnQoMSk=",
                "overwrite": true
            }))
        );
    }

    #[tokio::test]
    async fn test_export_decodes_content() {
        let (client, mock) = mock_client();
        mock.push_response(json!({"content": "cHJpbnQoMSk=", "file_type": "py"}));

        let content = client
            .workspace()
            .export("/Users/me/hello", ExportFormat::RMarkdown)
            .await
            .unwrap();
        assert_eq!(content, b"print(1)");
        assert_eq!(
            mock.last_request().query[1],
            ("format".to_string(), "R_MARKDOWN".to_string())
        );
    }

    #[tokio::test]
    async fn test_list_objects() {
        let (client, mock) = mock_client();
        mock.push_response(json!({"objects": [
            {"path": "/Users/me/nb", "object_type": "NOTEBOOK", "language": "SQL", "object_id": 1},
            {"path": "/Users/me/dir", "object_type": "DIRECTORY"}
        ]}));

        let objects = client.workspace().list("/Users/me").await.unwrap();
        assert_eq!(objects[0].language, Some(Language::Sql));
        assert_eq!(objects[1].object_type, ObjectType::Directory);
    }
}
