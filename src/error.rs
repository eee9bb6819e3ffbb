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

//! Error types for the Databricks REST client.

use serde::Deserialize;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the client, the model converters and the task linker.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The server answered with a non-success status code.
    #[error("HTTP {status}: {}", api_detail(.message, .body))]
    Api {
        status: u16,
        error_code: Option<String>,
        message: Option<String>,
        /// Raw response body, kept for payloads that are not JSON.
        body: String,
    },

    /// The request could not be built, sent or read.
    #[error("transport error: {0}")]
    Transport(String),

    /// A response body did not match the expected type.
    #[error("failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A request body could not be encoded.
    #[error("failed to encode {context}: {source}")]
    Encode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A polymorphic payload had zero or several discriminator keys, or an
    /// inconsistent backend type.
    #[error("invalid variant: {0}")]
    InvalidVariant(String),

    /// A value was rejected at construction time.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two tasks in the same collection share a key.
    #[error("duplicate task key '{0}'")]
    DuplicateTaskKey(String),

    /// A task depends on a key that no sibling carries.
    #[error("task '{task}' depends on unknown task '{dependency}'")]
    UnresolvedTaskDependency { task: String, dependency: String },

    /// The dependency graph contains a cycle through the listed keys.
    #[error("task dependency cycle: {}", .0.join(" -> "))]
    TaskCycle(Vec<String>),

    /// The client configuration is incomplete or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

fn api_detail<'a>(message: &'a Option<String>, body: &'a str) -> &'a str {
    message.as_deref().unwrap_or(body)
}

impl Error {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn invalid_variant(msg: impl Into<String>) -> Self {
        Self::InvalidVariant(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }

    pub fn encode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Encode {
            context: context.into(),
            source,
        }
    }

    /// Builds an [`Error::Api`] from a non-success response.
    ///
    /// Databricks error bodies look like
    /// `{"error_code": "RESOURCE_DOES_NOT_EXIST", "message": "..."}`. Bodies
    /// that are not JSON are kept verbatim.
    pub fn from_response(status: u16, body: String) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            #[serde(default)]
            error_code: Option<String>,
            #[serde(default)]
            message: Option<String>,
        }

        let (error_code, message) = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => (parsed.error_code, parsed.message),
            Err(_) => (None, None),
        };
        Self::Api {
            status,
            error_code,
            message,
            body,
        }
    }

    /// HTTP status code for [`Error::Api`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided error code (e.g. `RESOURCE_DOES_NOT_EXIST`).
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Api { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }

    /// True when the server reported that the addressed resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404) || self.error_code() == Some("RESOURCE_DOES_NOT_EXIST")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_prefers_message() {
        let err = Error::Api {
            status: 400,
            error_code: Some("INVALID_PARAMETER_VALUE".to_string()),
            message: Some("Cluster name is required".to_string()),
            body: "{...}".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 400: Cluster name is required");
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.error_code(), Some("INVALID_PARAMETER_VALUE"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_api_error_display_falls_back_to_body() {
        let err = Error::Api {
            status: 502,
            error_code: None,
            message: None,
            body: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_not_found_by_error_code() {
        let err = Error::Api {
            status: 400,
            error_code: Some("RESOURCE_DOES_NOT_EXIST".to_string()),
            message: None,
            body: String::new(),
        };
        assert!(err.is_not_found());
        assert!(Error::transport("boom").status().is_none());
    }

    #[test]
    fn test_from_response_parses_error_body() {
        let err = Error::from_response(
            404,
            r#"{"error_code":"RESOURCE_DOES_NOT_EXIST","message":"Cluster 123 does not exist"}"#
                .to_string(),
        );
        assert_eq!(err.error_code(), Some("RESOURCE_DOES_NOT_EXIST"));
        assert_eq!(err.to_string(), "HTTP 404: Cluster 123 does not exist");
        assert!(err.is_not_found());

        let err = Error::from_response(503, "<html>unavailable</html>".to_string());
        assert!(err.error_code().is_none());
        assert_eq!(err.to_string(), "HTTP 503: <html>unavailable</html>");
    }

    #[test]
    fn test_task_cycle_display() {
        let err = Error::TaskCycle(vec!["a".into(), "b".into(), "a".into()]);
        assert_eq!(err.to_string(), "task dependency cycle: a -> b -> a");
    }
}
