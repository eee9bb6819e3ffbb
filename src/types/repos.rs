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

//! Git folder (repo) types.

use crate::error::Error;
use crate::types::jobs::GitProvider;
use crate::types::variant::exactly_one;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseCheckout {
    #[serde(default)]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub id: i64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub provider: Option<GitProvider>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub head_commit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparse_checkout: Option<SparseCheckout>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRepoRequest {
    pub url: String,
    pub provider: GitProvider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparse_checkout: Option<SparseCheckout>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListReposResponse {
    #[serde(default)]
    pub repos: Vec<RepoInfo>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Body of `PATCH repos/{id}`: check out a branch, or a tag in detached
/// HEAD. Exactly one of `branch` and `tag` is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RepoCheckoutWire", into = "RepoCheckoutWire")]
pub enum RepoCheckout {
    Branch(String),
    Tag(String),
}

#[derive(Serialize, Deserialize)]
struct RepoCheckoutWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
}

impl TryFrom<RepoCheckoutWire> for RepoCheckout {
    type Error = Error;

    fn try_from(wire: RepoCheckoutWire) -> Result<Self, Self::Error> {
        exactly_one(
            "repo checkout",
            [
                ("branch", wire.branch.map(Self::Branch)),
                ("tag", wire.tag.map(Self::Tag)),
            ],
        )
    }
}

impl From<RepoCheckout> for RepoCheckoutWire {
    fn from(checkout: RepoCheckout) -> Self {
        match checkout {
            RepoCheckout::Branch(branch) => Self {
                branch: Some(branch),
                tag: None,
            },
            RepoCheckout::Tag(tag) => Self {
                branch: None,
                tag: Some(tag),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_checkout_emits_one_key() {
        assert_eq!(
            serde_json::to_value(RepoCheckout::Tag("v1".to_string())).unwrap(),
            json!({"tag": "v1"})
        );
        let result: Result<RepoCheckout, _> =
            serde_json::from_value(json!({"branch": "main", "tag": "v1"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_repo_info_provider() {
        let repo: RepoInfo = serde_json::from_value(json!({
            "id": 123,
            "url": "https://github.com/example/repo.git",
            "provider": "gitHub",
            "path": "/Repos/me/repo",
            "branch": "main"
        }))
        .unwrap();
        assert_eq!(repo.provider, Some(GitProvider::GitHub));
        assert_eq!(repo.branch.as_deref(), Some("main"));
    }
}
