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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateTokenRequest {
    /// Omit for a token that never expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifetime_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicTokenInfo {
    pub token_id: String,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_time: Option<DateTime<Utc>>,
    /// Epoch milliseconds, `-1` when the token does not expire.
    #[serde(default = "never_expires")]
    pub expiry_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

fn never_expires() -> i64 {
    -1
}

impl PublicTokenInfo {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.expiry_time < 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.expiry_time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTokenResponse {
    pub token_value: String,
    pub token_info: PublicTokenInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListTokensResponse {
    #[serde(default)]
    pub token_infos: Vec<PublicTokenInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevokeTokenRequest {
    pub token_id: String,
}
