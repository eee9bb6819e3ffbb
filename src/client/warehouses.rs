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

//! SQL Warehouses API client (`/api/2.0/sql/warehouses`).

use crate::client::{path_segment, RestClient};
use crate::error::Result;
use crate::types::warehouses::{
    CreateWarehouseResponse, ListWarehousesResponse, WarehouseAttributes, WarehouseInfo,
};
use tracing::debug;

const BASE: &str = "/api/2.0/sql/warehouses";

#[derive(Debug, Clone)]
pub struct WarehousesClient {
    rest: RestClient,
}

impl WarehousesClient {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    fn path(id: &str) -> Result<String> {
        Ok(format!("{}/{}", BASE, path_segment("warehouse id", id)?))
    }

    /// Creates a warehouse and returns its id.
    pub async fn create(&self, attributes: &WarehouseAttributes) -> Result<String> {
        let created: CreateWarehouseResponse = self.rest.post(BASE, attributes).await?;
        debug!("Created warehouse {}", created.id);
        Ok(created.id)
    }

    pub async fn get(&self, id: &str) -> Result<WarehouseInfo> {
        self.rest.get(&Self::path(id)?, &[]).await
    }

    pub async fn list(&self) -> Result<Vec<WarehouseInfo>> {
        let response: ListWarehousesResponse = self.rest.get(BASE, &[]).await?;
        Ok(response.warehouses)
    }

    pub async fn edit(&self, id: &str, attributes: &WarehouseAttributes) -> Result<()> {
        self.rest
            .post_unit(&format!("{}/edit", Self::path(id)?), attributes)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.rest.delete(&Self::path(id)?, &[]).await
    }

    pub async fn start(&self, id: &str) -> Result<()> {
        self.rest
            .post_unit(&format!("{}/start", Self::path(id)?), &serde_json::json!({}))
            .await
    }

    pub async fn stop(&self, id: &str) -> Result<()> {
        self.rest
            .post_unit(&format!("{}/stop", Self::path(id)?), &serde_json::json!({}))
            .await
    }
}
