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

//! Token API client (`/api/2.0/token`).

use crate::client::RestClient;
use crate::error::Result;
use crate::types::tokens::{
    CreateTokenRequest, CreateTokenResponse, ListTokensResponse, PublicTokenInfo,
    RevokeTokenRequest,
};

const BASE: &str = "/api/2.0/token";

#[derive(Debug, Clone)]
pub struct TokensClient {
    rest: RestClient,
}

impl TokensClient {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// Creates a token for the calling user. The value is only returned here.
    pub async fn create(&self, request: &CreateTokenRequest) -> Result<CreateTokenResponse> {
        self.rest.post(&format!("{}/create", BASE), request).await
    }

    pub async fn list(&self) -> Result<Vec<PublicTokenInfo>> {
        let response: ListTokensResponse = self.rest.get(&format!("{}/list", BASE), &[]).await?;
        Ok(response.token_infos)
    }

    pub async fn revoke(&self, token_id: &str) -> Result<()> {
        let request = RevokeTokenRequest {
            token_id: token_id.to_string(),
        };
        self.rest
            .post_unit(&format!("{}/delete", BASE), &request)
            .await
    }
}
