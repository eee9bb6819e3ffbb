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

//! Workspace (notebooks, folders and files) API types.

use crate::types::encoding::base64_bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectType {
    Notebook,
    Directory,
    Library,
    File,
    Repo,
    Dashboard,
}

/// Notebook language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    Scala,
    Python,
    Sql,
    R,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExportFormat {
    Source,
    Html,
    Jupyter,
    Dbc,
    RMarkdown,
    Auto,
}

impl ExportFormat {
    /// Query parameter value for `workspace/export`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "SOURCE",
            Self::Html => "HTML",
            Self::Jupyter => "JUPYTER",
            Self::Dbc => "DBC",
            Self::RMarkdown => "R_MARKDOWN",
            Self::Auto => "AUTO",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    pub path: String,
    pub object_type: ObjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub objects: Vec<ObjectInfo>,
}

/// Body of `workspace/import`.
#[derive(Debug, Clone, Serialize)]
pub struct ImportRequest {
    pub path: String,
    pub format: ExportFormat,
    /// Required for `SOURCE` imports of notebooks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
    pub overwrite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExportResponse {
    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
    #[serde(default)]
    pub file_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteRequest {
    pub path: String,
    pub recursive: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MkdirsRequest {
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_import_request_shape() {
        let request = ImportRequest {
            path: "/Users/me/hello".to_string(),
            format: ExportFormat::Source,
            language: Some(Language::Python),
            content: b"print('hi')".to_vec(),
            overwrite: true,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "path": "/Users/me/hello",
                "format": "SOURCE",
                "language": "PYTHON",
                "content": "cHJpbnQoJ2hpJyk=",
                "overwrite": true
            })
        );
    }

    #[test]
    fn test_object_info_deserialization() {
        let info: ObjectInfo = serde_json::from_value(json!({
            "object_type": "NOTEBOOK",
            "path": "/Users/me/nb",
            "language": "SQL",
            "object_id": 42,
            "modified_at": 1700000000000i64
        }))
        .unwrap();
        assert_eq!(info.object_type, ObjectType::Notebook);
        assert_eq!(info.language, Some(Language::Sql));
        assert!(info.created_at.is_none());
    }

    #[test]
    fn test_export_format_query_value_matches_serde() {
        let value = serde_json::to_value(ExportFormat::RMarkdown).unwrap();
        assert_eq!(value, ExportFormat::RMarkdown.as_str());
    }
}
