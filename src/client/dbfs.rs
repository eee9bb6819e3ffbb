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

//! DBFS API client (`/api/2.0/dbfs`).
//!
//! Payloads travel base64 encoded. `put` is limited to small files; larger
//! files go through a streaming handle (`create`, `add_block`, `close`),
//! which `upload` drives in [`DBFS_BLOCK_SIZE`] chunks.

use crate::client::RestClient;
use crate::error::Result;
use crate::types::dbfs::{
    AddBlockRequest, CreateRequest, DeleteRequest, FileInfo, ListResponse, MoveRequest,
    PathRequest, PutRequest, ReadResponse, StreamHandle, DBFS_BLOCK_SIZE,
};
use tracing::{debug, warn};

const BASE: &str = "/api/2.0/dbfs";

#[derive(Debug, Clone)]
pub struct DbfsClient {
    rest: RestClient,
}

impl DbfsClient {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    fn path(endpoint: &str) -> String {
        format!("{}/{}", BASE, endpoint)
    }

    /// Opens a write stream and returns its handle.
    pub async fn create(&self, path: &str, overwrite: bool) -> Result<i64> {
        let request = CreateRequest {
            path: path.to_string(),
            overwrite,
        };
        let handle: StreamHandle = self.rest.post(&Self::path("create"), &request).await?;
        Ok(handle.handle)
    }

    /// Appends a block of at most [`DBFS_BLOCK_SIZE`] bytes to an open stream.
    pub async fn add_block(&self, handle: i64, data: &[u8]) -> Result<()> {
        let request = AddBlockRequest {
            handle,
            data: data.to_vec(),
        };
        self.rest
            .post_unit(&Self::path("add-block"), &request)
            .await
    }

    pub async fn close(&self, handle: i64) -> Result<()> {
        self.rest
            .post_unit(&Self::path("close"), &StreamHandle { handle })
            .await
    }

    /// Uploads a file in a single call. Use [`DbfsClient::upload`] above 1 MB.
    pub async fn put(&self, path: &str, contents: &[u8], overwrite: bool) -> Result<()> {
        let request = PutRequest {
            path: path.to_string(),
            contents: Some(contents.to_vec()),
            overwrite,
        };
        self.rest.post_unit(&Self::path("put"), &request).await
    }

    /// Writes `contents` through a stream handle, one block per call.
    ///
    /// The handle is closed even when a block fails; the block error is
    /// returned in that case.
    pub async fn upload(&self, path: &str, contents: &[u8], overwrite: bool) -> Result<()> {
        let handle = self.create(path, overwrite).await?;
        debug!(
            "Uploading {} bytes to {} using handle {}",
            contents.len(),
            path,
            handle
        );
        let written = self.write_blocks(handle, contents).await;
        let closed = self.close(handle).await;
        if let Err(ref e) = written {
            warn!("Upload to {} failed on handle {}: {}", path, handle, e);
        }
        written.and(closed)
    }

    async fn write_blocks(&self, handle: i64, contents: &[u8]) -> Result<()> {
        for block in contents.chunks(DBFS_BLOCK_SIZE) {
            self.add_block(handle, block).await?;
        }
        Ok(())
    }

    /// Reads up to `length` bytes starting at `offset`.
    pub async fn read(&self, path: &str, offset: i64, length: i64) -> Result<ReadResponse> {
        self.rest
            .get(
                &Self::path("read"),
                &[
                    ("path", path.to_string()),
                    ("offset", offset.to_string()),
                    ("length", length.to_string()),
                ],
            )
            .await
    }

    pub async fn get_status(&self, path: &str) -> Result<FileInfo> {
        self.rest
            .get(&Self::path("get-status"), &[("path", path.to_string())])
            .await
    }

    pub async fn list(&self, path: &str) -> Result<Vec<FileInfo>> {
        let response: ListResponse = self
            .rest
            .get(&Self::path("list"), &[("path", path.to_string())])
            .await?;
        Ok(response.files)
    }

    pub async fn mkdirs(&self, path: &str) -> Result<()> {
        let request = PathRequest {
            path: path.to_string(),
        };
        self.rest.post_unit(&Self::path("mkdirs"), &request).await
    }

    /// Moves a file or directory (`dbfs/move`).
    pub async fn move_path(&self, source_path: &str, destination_path: &str) -> Result<()> {
        let request = MoveRequest {
            source_path: source_path.to_string(),
            destination_path: destination_path.to_string(),
        };
        self.rest.post_unit(&Self::path("move"), &request).await
    }

    pub async fn delete(&self, path: &str, recursive: bool) -> Result<()> {
        let request = DeleteRequest {
            path: path.to_string(),
            recursive,
        };
        self.rest.post_unit(&Self::path("delete"), &request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::mock::mock_client;
    use crate::types::dbfs::DBFS_BLOCK_SIZE;
    use serde_json::json;

    #[tokio::test]
    async fn test_upload_splits_into_blocks() {
        let (client, mock) = mock_client();
        mock.push_response(json!({"handle": 7}));
        mock.push_empty();
        mock.push_empty();
        mock.push_empty();

        let contents = vec![0u8; DBFS_BLOCK_SIZE + 3];
        client
            .dbfs()
            .upload("/tmp/big.bin", &contents, true)
            .await
            .unwrap();

        let requests = mock.requests();
        let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/api/2.0/dbfs/create",
                "/api/2.0/dbfs/add-block",
                "/api/2.0/dbfs/add-block",
                "/api/2.0/dbfs/close"
            ]
        );
        assert_eq!(
            requests[0].body,
            Some(json!({"path": "/tmp/big.bin", "overwrite": true}))
        );
        assert_eq!(
            requests[2].body,
            Some(json!({"handle": 7, "data": "AAAA"}))
        );
        assert_eq!(requests[3].body, Some(json!({"handle": 7})));
    }

    #[tokio::test]
    async fn test_upload_closes_handle_after_failed_block() {
        let (client, mock) = mock_client();
        mock.push_response(json!({"handle": 7}));
        mock.push_error(crate::error::Error::from_response(
            400,
            r#"{"error_code": "MAX_BLOCK_SIZE_EXCEEDED", "message": "too big"}"#.to_string(),
        ));
        mock.push_empty();

        let err = client
            .dbfs()
            .upload("/tmp/x", b"abc", false)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), Some("MAX_BLOCK_SIZE_EXCEEDED"));

        let requests = mock.requests();
        let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/api/2.0/dbfs/create",
                "/api/2.0/dbfs/add-block",
                "/api/2.0/dbfs/close"
            ]
        );
        assert_eq!(requests[2].body, Some(json!({"handle": 7})));
    }

    #[tokio::test]
    async fn test_upload_reports_close_failure() {
        let (client, mock) = mock_client();
        mock.push_response(json!({"handle": 9}));
        mock.push_empty();
        mock.push_error(crate::error::Error::from_response(
            404,
            r#"{"error_code": "RESOURCE_DOES_NOT_EXIST", "message": "no handle"}"#.to_string(),
        ));

        let err = client
            .dbfs()
            .upload("/tmp/y", b"abc", true)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(mock.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_read_decodes_base64() {
        let (client, mock) = mock_client();
        mock.push_response(json!({"bytes_read": 5, "data": "aGVsbG8="}));

        let response = client.dbfs().read("/tmp/a.txt", 0, 5).await.unwrap();
        assert_eq!(response.data.as_deref(), Some(&b"hello"[..]));
        assert_eq!(
            mock.last_request().query,
            vec![
                ("path".to_string(), "/tmp/a.txt".to_string()),
                ("offset".to_string(), "0".to_string()),
                ("length".to_string(), "5".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_list_and_move() {
        let (client, mock) = mock_client();
        mock.push_response(json!({"files": [
            {"path": "/tmp/a", "is_dir": true, "file_size": 0},
            {"path": "/tmp/b.txt", "is_dir": false, "file_size": 12, "modification_time": 1700000000000i64}
        ]}));
        mock.push_empty();

        let files = client.dbfs().list("/tmp").await.unwrap();
        assert!(files[0].is_dir);
        assert_eq!(files[1].file_size, 12);

        client.dbfs().move_path("/tmp/b.txt", "/tmp/c.txt").await.unwrap();
        assert_eq!(
            mock.last_request().body,
            Some(json!({"source_path": "/tmp/b.txt", "destination_path": "/tmp/c.txt"}))
        );
    }
}
