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

//! Repos API client (`/api/2.0/repos`).

use crate::client::RestClient;
use crate::error::Result;
use crate::types::repos::{CreateRepoRequest, ListReposResponse, RepoCheckout, RepoInfo};

const BASE: &str = "/api/2.0/repos";

#[derive(Debug, Clone)]
pub struct ReposClient {
    rest: RestClient,
}

impl ReposClient {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    fn path(repo_id: i64) -> String {
        format!("{}/{}", BASE, repo_id)
    }

    pub async fn create(&self, request: &CreateRepoRequest) -> Result<RepoInfo> {
        self.rest.post(BASE, request).await
    }

    pub async fn get(&self, repo_id: i64) -> Result<RepoInfo> {
        self.rest.get(&Self::path(repo_id), &[]).await
    }

    /// One page of repos, optionally restricted to a workspace path prefix.
    pub async fn list(
        &self,
        path_prefix: Option<&str>,
        next_page_token: Option<&str>,
    ) -> Result<ListReposResponse> {
        let mut query = Vec::new();
        if let Some(prefix) = path_prefix {
            query.push(("path_prefix", prefix.to_string()));
        }
        if let Some(token) = next_page_token {
            query.push(("next_page_token", token.to_string()));
        }
        self.rest.get(BASE, &query).await
    }

    /// Checks out a branch or tag, pulling the latest commit.
    pub async fn update(&self, repo_id: i64, checkout: RepoCheckout) -> Result<()> {
        self.rest.patch_unit(&Self::path(repo_id), &checkout).await
    }

    pub async fn delete(&self, repo_id: i64) -> Result<()> {
        self.rest.delete(&Self::path(repo_id), &[]).await
    }
}
