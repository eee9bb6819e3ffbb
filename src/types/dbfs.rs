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

//! DBFS API types.

use crate::types::encoding::{base64_bytes, base64_bytes_opt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest block accepted by `dbfs/add-block` and returned by `dbfs/read`.
pub const DBFS_BLOCK_SIZE: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub path: String,
    #[serde(default)]
    pub is_dir: bool,
    #[serde(default)]
    pub file_size: i64,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub modification_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub files: Vec<FileInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRequest {
    pub path: String,
    pub overwrite: bool,
}

/// Open stream handle, valid until `dbfs/close` or 10 minutes of inactivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamHandle {
    pub handle: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddBlockRequest {
    pub handle: i64,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// Body of `dbfs/put`. Without `contents` the file must be sent as multipart,
/// which this client does not do, so `contents` is always set.
#[derive(Debug, Clone, Serialize)]
pub struct PutRequest {
    pub path: String,
    #[serde(with = "base64_bytes_opt", skip_serializing_if = "Option::is_none")]
    pub contents: Option<Vec<u8>>,
    pub overwrite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReadResponse {
    #[serde(default)]
    pub bytes_read: i64,
    #[serde(default, with = "base64_bytes_opt")]
    pub data: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathRequest {
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoveRequest {
    pub source_path: String,
    pub destination_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteRequest {
    pub path: String,
    pub recursive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_block_request_encodes_data() {
        let request = AddBlockRequest {
            handle: 7,
            data: vec![0, 1, 2, 255],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"handle": 7, "data": "AAEC/w=="})
        );
    }

    #[test]
    fn test_read_response_decodes_data() {
        let response: ReadResponse =
            serde_json::from_value(json!({"bytes_read": 5, "data": "SGVsbG8="})).unwrap();
        assert_eq!(response.bytes_read, 5);
        assert_eq!(response.data.as_deref(), Some(&b"Hello"[..]));

        let empty: ReadResponse = serde_json::from_value(json!({"bytes_read": 0})).unwrap();
        assert!(empty.data.is_none());
    }

    #[test]
    fn test_file_info_modification_time() {
        let info: FileInfo = serde_json::from_value(json!({
            "path": "/tmp/a.txt",
            "is_dir": false,
            "file_size": 12,
            "modification_time": 1700000000000i64
        }))
        .unwrap();
        assert!(!info.is_dir);
        assert_eq!(
            info.modification_time.unwrap().timestamp_millis(),
            1700000000000
        );
    }
}
