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

//! Clients for the Databricks REST API.
//!
//! This module provides:
//! - `ApiTransport` trait: one JSON request, one JSON response
//! - `DatabricksHttpClient`: the reqwest implementation of `ApiTransport`
//! - `RestClient`: typed get/post/put/patch/delete on top of a transport
//! - `DatabricksClient`: entry point handing out one client per API area

pub mod clusters;
pub mod dbfs;
pub mod http;
pub mod jobs;
pub mod libraries;
pub mod permissions;
pub mod pipelines;
pub mod repos;
pub mod secrets;
pub mod tokens;
pub mod unity_catalog;
pub mod warehouses;
pub mod workspace;

#[cfg(test)]
pub(crate) mod mock;

use crate::auth::PersonalAccessToken;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::logging::init_logging;
use async_trait::async_trait;
use reqwest::Method;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use std::sync::Arc;

pub use clusters::ClustersClient;
pub use dbfs::DbfsClient;
pub use http::{DatabricksHttpClient, HttpClientConfig};
pub use jobs::JobsClient;
pub use libraries::LibrariesClient;
pub use permissions::PermissionsClient;
pub use pipelines::PipelinesClient;
pub use repos::ReposClient;
pub use secrets::SecretsClient;
pub use tokens::TokensClient;
pub use unity_catalog::UnityCatalogClient;
pub use warehouses::WarehousesClient;
pub use workspace::WorkspaceClient;

/// A single REST call: verb, path below the workspace host, query and JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path starting with `/api/...`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }
}

/// Sends one request and returns the decoded JSON body.
///
/// Returns `Ok(None)` for an empty success body. Implementations must turn
/// non-success statuses into [`Error::Api`] and must not retry.
#[async_trait]
pub trait ApiTransport: Send + Sync + std::fmt::Debug {
    async fn send(&self, request: ApiRequest) -> Result<Option<serde_json::Value>>;
}

/// Typed request helpers shared by the per-area clients.
#[derive(Debug, Clone)]
pub struct RestClient {
    transport: Arc<dyn ApiTransport>,
}

impl RestClient {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<R> {
        self.call(Method::GET, path, query, None).await
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode(path, body)?;
        self.call(Method::POST, path, &[], Some(body)).await
    }

    /// POST whose response body carries nothing of interest.
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.post::<B, IgnoredAny>(path, body).await.map(|_| ())
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode(path, body)?;
        self.call(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn put_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.put::<B, IgnoredAny>(path, body).await.map(|_| ())
    }

    pub async fn patch<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode(path, body)?;
        self.call(Method::PATCH, path, &[], Some(body)).await
    }

    pub async fn patch_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.patch::<B, IgnoredAny>(path, body).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str, query: &[(&str, String)]) -> Result<()> {
        self.call::<IgnoredAny>(Method::DELETE, path, query, None)
            .await
            .map(|_| ())
    }

    async fn call<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<R> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            body,
        };
        let value = self
            .transport
            .send(request)
            .await?
            .unwrap_or_else(|| serde_json::Value::Object(Default::default()));
        serde_json::from_value(value).map_err(|e| Error::decode(format!("response of {}", path), e))
    }
}

fn encode<B: Serialize + ?Sized>(path: &str, body: &B) -> Result<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| Error::encode(format!("request body for {}", path), e))
}

/// Checks that a caller-supplied name or id fits in one URL path segment.
pub(crate) fn path_segment<'a>(what: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(Error::invalid_argument(format!("{} must not be empty", what)));
    }
    match value.chars().find(|c| matches!(c, '/' | '?' | '#' | '%')) {
        Some(c) => Err(Error::invalid_argument(format!(
            "{} '{}' must not contain '{}'",
            what, value, c
        ))),
        None => Ok(value),
    }
}

/// Entry point: one instance per workspace, cheap to clone and share.
///
/// ```no_run
/// # async fn demo() -> databricks_rest::Result<()> {
/// use databricks_rest::{ClientConfig, DatabricksClient};
///
/// let client = DatabricksClient::new(&ClientConfig::from_env())?;
/// for cluster in client.clusters().list().await? {
///     println!("{} {:?}", cluster.cluster_id, cluster.state);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DatabricksClient {
    rest: RestClient,
}

impl DatabricksClient {
    /// Builds an HTTP-backed client. Initializes logging from `config.log`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        init_logging(&config.log);
        let (host, token) = config.credentials()?;
        let auth = Arc::new(PersonalAccessToken::new(token));
        let http = DatabricksHttpClient::new(host, config.http.clone(), auth)?;
        Ok(Self::with_transport(Arc::new(http)))
    }

    /// Same as `new(&ClientConfig::from_env())`.
    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env())
    }

    /// Builds a client over any transport, e.g. a recording mock in tests.
    pub fn with_transport(transport: Arc<dyn ApiTransport>) -> Self {
        Self {
            rest: RestClient::new(transport),
        }
    }

    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    pub fn clusters(&self) -> ClustersClient {
        ClustersClient::new(self.rest.clone())
    }

    pub fn libraries(&self) -> LibrariesClient {
        LibrariesClient::new(self.rest.clone())
    }

    pub fn jobs(&self) -> JobsClient {
        JobsClient::new(self.rest.clone())
    }

    pub fn dbfs(&self) -> DbfsClient {
        DbfsClient::new(self.rest.clone())
    }

    pub fn workspace(&self) -> WorkspaceClient {
        WorkspaceClient::new(self.rest.clone())
    }

    pub fn secrets(&self) -> SecretsClient {
        SecretsClient::new(self.rest.clone())
    }

    pub fn permissions(&self) -> PermissionsClient {
        PermissionsClient::new(self.rest.clone())
    }

    pub fn tokens(&self) -> TokensClient {
        TokensClient::new(self.rest.clone())
    }

    pub fn warehouses(&self) -> WarehousesClient {
        WarehousesClient::new(self.rest.clone())
    }

    pub fn repos(&self) -> ReposClient {
        ReposClient::new(self.rest.clone())
    }

    pub fn pipelines(&self) -> PipelinesClient {
        PipelinesClient::new(self.rest.clone())
    }

    pub fn unity_catalog(&self) -> UnityCatalogClient {
        UnityCatalogClient::new(self.rest.clone())
    }
}
