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

//! Secrets API client (`/api/2.0/secrets`).

use crate::client::RestClient;
use crate::error::Result;
use crate::types::secrets::{
    AclPermission, CreateScopeRequest, DeleteAclRequest, ListAclsResponse, ListScopesResponse,
    ListSecretsResponse, PutAclRequest, PutSecretRequest, ScopeRequest, SecretAclItem,
    SecretKeyRequest, SecretMetadata, SecretScope, SecretValue,
};
use tracing::debug;

const BASE: &str = "/api/2.0/secrets";

#[derive(Debug, Clone)]
pub struct SecretsClient {
    rest: RestClient,
}

impl SecretsClient {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    fn path(endpoint: &str) -> String {
        format!("{}/{}", BASE, endpoint)
    }

    /// Creates a scope. The backend is taken from the scope variant.
    pub async fn create_scope(
        &self,
        scope: &SecretScope,
        initial_manage_principal: Option<String>,
    ) -> Result<()> {
        debug!(
            "Creating secret scope {} ({:?})",
            scope.name(),
            scope.backend_type()
        );
        let request = CreateScopeRequest::new(scope, initial_manage_principal);
        self.rest
            .post_unit(&Self::path("scopes/create"), &request)
            .await
    }

    pub async fn delete_scope(&self, scope: &str) -> Result<()> {
        let request = ScopeRequest {
            scope: scope.to_string(),
        };
        self.rest
            .post_unit(&Self::path("scopes/delete"), &request)
            .await
    }

    pub async fn list_scopes(&self) -> Result<Vec<SecretScope>> {
        let response: ListScopesResponse = self.rest.get(&Self::path("scopes/list"), &[]).await?;
        Ok(response.scopes)
    }

    /// Stores a string or binary secret, replacing any existing value.
    pub async fn put_secret(&self, scope: &str, key: &str, value: SecretValue) -> Result<()> {
        let request = PutSecretRequest::new(scope, key, value);
        self.rest.post_unit(&Self::path("put"), &request).await
    }

    pub async fn delete_secret(&self, scope: &str, key: &str) -> Result<()> {
        let request = SecretKeyRequest {
            scope: scope.to_string(),
            key: key.to_string(),
        };
        self.rest.post_unit(&Self::path("delete"), &request).await
    }

    /// Lists secret keys and update times; values are never returned.
    pub async fn list_secrets(&self, scope: &str) -> Result<Vec<SecretMetadata>> {
        let response: ListSecretsResponse = self
            .rest
            .get(&Self::path("list"), &[("scope", scope.to_string())])
            .await?;
        Ok(response.secrets)
    }

    pub async fn put_acl(&self, scope: &str, principal: &str, permission: AclPermission) -> Result<()> {
        let request = PutAclRequest {
            scope: scope.to_string(),
            principal: principal.to_string(),
            permission,
        };
        self.rest.post_unit(&Self::path("acls/put"), &request).await
    }

    pub async fn delete_acl(&self, scope: &str, principal: &str) -> Result<()> {
        let request = DeleteAclRequest {
            scope: scope.to_string(),
            principal: principal.to_string(),
        };
        self.rest
            .post_unit(&Self::path("acls/delete"), &request)
            .await
    }

    pub async fn get_acl(&self, scope: &str, principal: &str) -> Result<SecretAclItem> {
        self.rest
            .get(
                &Self::path("acls/get"),
                &[
                    ("scope", scope.to_string()),
                    ("principal", principal.to_string()),
                ],
            )
            .await
    }

    pub async fn list_acls(&self, scope: &str) -> Result<Vec<SecretAclItem>> {
        let response: ListAclsResponse = self
            .rest
            .get(&Self::path("acls/list"), &[("scope", scope.to_string())])
            .await?;
        Ok(response.items)
    }
}
