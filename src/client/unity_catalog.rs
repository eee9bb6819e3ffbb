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

//! Unity Catalog client (`/api/2.1/unity-catalog`): catalogs, schemas and
//! tables.
//!
//! Schemas and tables are addressed by their full dotted name
//! (`catalog.schema` and `catalog.schema.table`).

use crate::client::{path_segment, RestClient};
use crate::error::Result;
use crate::types::unity_catalog::{
    CatalogInfo, CreateCatalogRequest, CreateSchemaRequest, ListCatalogsResponse,
    ListSchemasResponse, ListTablesResponse, SchemaInfo, TableInfo,
};

const BASE: &str = "/api/2.1/unity-catalog";

#[derive(Debug, Clone)]
pub struct UnityCatalogClient {
    rest: RestClient,
}

impl UnityCatalogClient {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    fn path(collection: &str, name: Option<&str>) -> Result<String> {
        match name {
            Some(name) => Ok(format!(
                "{}/{}/{}",
                BASE,
                collection,
                path_segment("name", name)?
            )),
            None => Ok(format!("{}/{}", BASE, collection)),
        }
    }

    pub async fn list_catalogs(&self) -> Result<Vec<CatalogInfo>> {
        let response: ListCatalogsResponse =
            self.rest.get(&Self::path("catalogs", None)?, &[]).await?;
        Ok(response.catalogs)
    }

    pub async fn get_catalog(&self, name: &str) -> Result<CatalogInfo> {
        self.rest
            .get(&Self::path("catalogs", Some(name))?, &[])
            .await
    }

    pub async fn create_catalog(&self, request: &CreateCatalogRequest) -> Result<CatalogInfo> {
        self.rest
            .post(&Self::path("catalogs", None)?, request)
            .await
    }

    /// Deletes a catalog. Without `force` the catalog must be empty.
    pub async fn delete_catalog(&self, name: &str, force: bool) -> Result<()> {
        self.rest
            .delete(
                &Self::path("catalogs", Some(name))?,
                &[("force", force.to_string())],
            )
            .await
    }

    pub async fn list_schemas(&self, catalog_name: &str) -> Result<Vec<SchemaInfo>> {
        let response: ListSchemasResponse = self
            .rest
            .get(
                &Self::path("schemas", None)?,
                &[("catalog_name", catalog_name.to_string())],
            )
            .await?;
        Ok(response.schemas)
    }

    pub async fn get_schema(&self, full_name: &str) -> Result<SchemaInfo> {
        self.rest
            .get(&Self::path("schemas", Some(full_name))?, &[])
            .await
    }

    pub async fn create_schema(&self, request: &CreateSchemaRequest) -> Result<SchemaInfo> {
        self.rest.post(&Self::path("schemas", None)?, request).await
    }

    pub async fn delete_schema(&self, full_name: &str) -> Result<()> {
        self.rest
            .delete(&Self::path("schemas", Some(full_name))?, &[])
            .await
    }

    /// One page of tables in a schema.
    pub async fn list_tables(
        &self,
        catalog_name: &str,
        schema_name: &str,
        page_token: Option<&str>,
    ) -> Result<ListTablesResponse> {
        let mut query = vec![
            ("catalog_name", catalog_name.to_string()),
            ("schema_name", schema_name.to_string()),
        ];
        if let Some(token) = page_token {
            query.push(("page_token", token.to_string()));
        }
        self.rest.get(&Self::path("tables", None)?, &query).await
    }

    pub async fn get_table(&self, full_name: &str) -> Result<TableInfo> {
        self.rest
            .get(&Self::path("tables", Some(full_name))?, &[])
            .await
    }

    pub async fn delete_table(&self, full_name: &str) -> Result<()> {
        self.rest
            .delete(&Self::path("tables", Some(full_name))?, &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::mock::mock_client;
    use crate::types::unity_catalog::{CreateSchemaRequest, TableType};
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_table_by_full_name() {
        let (client, mock) = mock_client();
        mock.push_response(json!({
            "name": "trips",
            "catalog_name": "main",
            "schema_name": "nyc",
            "full_name": "main.nyc.trips",
            "table_type": "MANAGED",
            "columns": [
                {"name": "id", "type_name": "LONG", "position": 0, "nullable": false},
                {"name": "fare", "type_name": "DOUBLE", "position": 1}
            ]
        }));

        let table = client.unity_catalog().get_table("main.nyc.trips").await.unwrap();
        assert_eq!(table.table_type, Some(TableType::Managed));
        assert!(!table.columns[0].nullable);
        assert!(table.columns[1].nullable);
        assert_eq!(
            mock.last_request().path,
            "/api/2.1/unity-catalog/tables/main.nyc.trips"
        );
    }

    #[tokio::test]
    async fn test_name_with_query_marker_is_rejected() {
        let (client, mock) = mock_client();

        let err = client
            .unity_catalog()
            .delete_table("main.nyc.trips?force=true")
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::InvalidArgument(_)));
        assert!(err.to_string().contains("'?'"), "{}", err);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_list_tables_query() {
        let (client, mock) = mock_client();
        mock.push_response(json!({"tables": []}));

        let page = client
            .unity_catalog()
            .list_tables("main", "nyc", Some("tok"))
            .await
            .unwrap();
        assert!(page.tables.is_empty());
        assert_eq!(
            mock.last_request().query,
            vec![
                ("catalog_name".to_string(), "main".to_string()),
                ("schema_name".to_string(), "nyc".to_string()),
                ("page_token".to_string(), "tok".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_create_schema_and_delete_catalog() {
        let (client, mock) = mock_client();
        mock.push_response(json!({"name": "staging", "catalog_name": "main"}));
        mock.push_empty();

        let request = CreateSchemaRequest {
            name: "staging".to_string(),
            catalog_name: "main".to_string(),
            ..Default::default()
        };
        let schema = client.unity_catalog().create_schema(&request).await.unwrap();
        assert_eq!(schema.catalog_name, "main");

        client
            .unity_catalog()
            .delete_catalog("main", true)
            .await
            .unwrap();
        let request = mock.last_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.query, vec![("force".to_string(), "true".to_string())]);
    }
}
