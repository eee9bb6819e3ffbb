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

//! Secret scope, secret and secret ACL types.

use crate::error::Error;
use crate::types::encoding::base64_bytes_opt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage backend of a secret scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeBackendType {
    Databricks,
    AzureKeyvault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzureKeyVaultMetadata {
    /// DNS name of the vault, e.g. `https://my-vault.vault.azure.net/`.
    pub dns_name: String,
    /// Azure resource id of the vault.
    pub resource_id: String,
}

/// A secret scope.
///
/// The backend type is intrinsic to the variant: it is written as
/// `backend_type` on the wire and cannot be set independently. Decoding
/// requires `keyvault_metadata` to be present exactly when `backend_type` is
/// `AZURE_KEYVAULT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SecretScopeWire", into = "SecretScopeWire")]
pub enum SecretScope {
    Databricks {
        name: String,
    },
    AzureKeyVault {
        name: String,
        keyvault_metadata: AzureKeyVaultMetadata,
    },
}

impl SecretScope {
    pub fn name(&self) -> &str {
        match self {
            Self::Databricks { name } | Self::AzureKeyVault { name, .. } => name,
        }
    }

    pub fn backend_type(&self) -> ScopeBackendType {
        match self {
            Self::Databricks { .. } => ScopeBackendType::Databricks,
            Self::AzureKeyVault { .. } => ScopeBackendType::AzureKeyvault,
        }
    }

    pub fn keyvault_metadata(&self) -> Option<&AzureKeyVaultMetadata> {
        match self {
            Self::Databricks { .. } => None,
            Self::AzureKeyVault {
                keyvault_metadata, ..
            } => Some(keyvault_metadata),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SecretScopeWire {
    name: String,
    backend_type: ScopeBackendType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    keyvault_metadata: Option<AzureKeyVaultMetadata>,
}

impl TryFrom<SecretScopeWire> for SecretScope {
    type Error = Error;

    fn try_from(wire: SecretScopeWire) -> Result<Self, Self::Error> {
        match (wire.backend_type, wire.keyvault_metadata) {
            (ScopeBackendType::Databricks, None) => Ok(Self::Databricks { name: wire.name }),
            (ScopeBackendType::AzureKeyvault, Some(keyvault_metadata)) => {
                Ok(Self::AzureKeyVault {
                    name: wire.name,
                    keyvault_metadata,
                })
            }
            (ScopeBackendType::Databricks, Some(_)) => Err(Error::invalid_variant(format!(
                "secret scope '{}' has backend_type DATABRICKS but carries keyvault_metadata",
                wire.name
            ))),
            (ScopeBackendType::AzureKeyvault, None) => Err(Error::invalid_variant(format!(
                "secret scope '{}' has backend_type AZURE_KEYVAULT but no keyvault_metadata",
                wire.name
            ))),
        }
    }
}

impl From<SecretScope> for SecretScopeWire {
    fn from(scope: SecretScope) -> Self {
        let backend_type = scope.backend_type();
        match scope {
            SecretScope::Databricks { name } => Self {
                name,
                backend_type,
                keyvault_metadata: None,
            },
            SecretScope::AzureKeyVault {
                name,
                keyvault_metadata,
            } => Self {
                name,
                backend_type,
                keyvault_metadata: Some(keyvault_metadata),
            },
        }
    }
}

/// Body of `secrets/scopes/create`.
///
/// The request uses different field names from the scope listing
/// (`scope_backend_type`, `backend_azure_keyvault`).
#[derive(Debug, Clone, Serialize)]
pub struct CreateScopeRequest {
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_manage_principal: Option<String>,
    pub scope_backend_type: ScopeBackendType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_azure_keyvault: Option<AzureKeyVaultMetadata>,
}

impl CreateScopeRequest {
    /// Builds the request for the given scope; the backend follows the variant.
    pub fn new(scope: &SecretScope, initial_manage_principal: Option<String>) -> Self {
        Self {
            scope: scope.name().to_string(),
            initial_manage_principal,
            scope_backend_type: scope.backend_type(),
            backend_azure_keyvault: scope.keyvault_metadata().cloned(),
        }
    }
}

/// Secret key and last update time; values are never returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretMetadata {
    pub key: String,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated_timestamp: Option<DateTime<Utc>>,
}

/// Value stored under a secret key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretValue {
    String(String),
    Bytes(Vec<u8>),
}

/// Body of `secrets/put`.
#[derive(Debug, Clone, Serialize)]
pub struct PutSecretRequest {
    pub scope: String,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "base64_bytes_opt::serialize"
    )]
    pub bytes_value: Option<Vec<u8>>,
}

impl PutSecretRequest {
    pub fn new(scope: impl Into<String>, key: impl Into<String>, value: SecretValue) -> Self {
        let (string_value, bytes_value) = match value {
            SecretValue::String(s) => (Some(s), None),
            SecretValue::Bytes(b) => (None, Some(b)),
        };
        Self {
            scope: scope.into(),
            key: key.into(),
            string_value,
            bytes_value,
        }
    }
}

/// Permission granted on a secret scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AclPermission {
    Read,
    Write,
    Manage,
}

/// Secret scope ACL entry. `principal` is a user name, group name or service
/// principal application id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretAclItem {
    pub principal: String,
    pub permission: AclPermission,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListScopesResponse {
    #[serde(default)]
    pub scopes: Vec<SecretScope>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListSecretsResponse {
    #[serde(default)]
    pub secrets: Vec<SecretMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListAclsResponse {
    #[serde(default)]
    pub items: Vec<SecretAclItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScopeRequest {
    pub scope: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecretKeyRequest {
    pub scope: String,
    pub key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PutAclRequest {
    pub scope: String,
    pub principal: String,
    pub permission: AclPermission,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteAclRequest {
    pub scope: String,
    pub principal: String,
}
