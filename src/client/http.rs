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

//! HTTP transport for the Databricks REST API.
//!
//! This module provides the reqwest-backed [`ApiTransport`] with:
//! - Connection pooling
//! - Bearer token authentication
//! - Configurable timeouts
//!
//! Every call is a single round trip. Non-success responses become
//! [`Error::Api`]; retrying is left to the caller.

use crate::auth::AuthProvider;
use crate::client::{ApiRequest, ApiTransport};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Whole-request timeout duration.
    pub read_timeout: Duration,
    /// Maximum number of idle connections per host.
    pub max_connections_per_host: usize,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(60),
            max_connections_per_host: 100,
            user_agent: format!("databricks-rest-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP client for one Databricks workspace.
#[derive(Debug)]
pub struct DatabricksHttpClient {
    client: Client,
    host: String,
    config: HttpClientConfig,
    auth_provider: Arc<dyn AuthProvider>,
}

impl DatabricksHttpClient {
    /// Creates a client for `host` (e.g. `https://adb-123.azuredatabricks.net`).
    pub fn new(
        host: impl Into<String>,
        config: HttpClientConfig,
        auth_provider: Arc<dyn AuthProvider>,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .pool_max_idle_per_host(config.max_connections_per_host)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            host: host.into().trim_end_matches('/').to_string(),
            config,
            auth_provider,
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the authorization header value.
    pub fn auth_header(&self) -> Result<String> {
        self.auth_provider.get_auth_header()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.host, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ApiTransport for DatabricksHttpClient {
    async fn send(&self, request: ApiRequest) -> Result<Option<serde_json::Value>> {
        let url = self.url(&request.path);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(AUTHORIZATION, self.auth_header()?);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }
        let http_request = builder
            .build()
            .map_err(|e| Error::transport(format!("Failed to build request: {}", e)))?;

        debug!("Executing {} {}", request.method, url);

        let response = self
            .client
            .execute(http_request)
            .await
            .map_err(|e| Error::transport(format!("HTTP request failed: {}", e)))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            warn!(
                "{} {} failed with HTTP {}",
                request.method,
                request.path,
                status.as_u16()
            );
            return Err(Error::from_response(status.as_u16(), body));
        }

        debug!(
            "{} {} returned HTTP {} ({} bytes)",
            request.method,
            request.path,
            status.as_u16(),
            body.len()
        );

        if body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| Error::decode(format!("response of {} {}", request.method, request.path), e))
    }
}
