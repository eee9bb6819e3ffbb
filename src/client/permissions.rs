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

//! Permissions API client (`/api/2.0/permissions/{object_type}/{object_id}`).

use crate::client::{path_segment, RestClient};
use crate::error::Result;
use crate::types::permissions::{
    AccessControlRequest, ObjectPermissions, PermissionLevelDescription,
    PermissionLevelsResponse, PermissionObjectType, PermissionsRequest,
};

const BASE: &str = "/api/2.0/permissions";

#[derive(Debug, Clone)]
pub struct PermissionsClient {
    rest: RestClient,
}

impl PermissionsClient {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    fn path(object_type: PermissionObjectType, object_id: &str) -> Result<String> {
        Ok(format!(
            "{}/{}/{}",
            BASE,
            object_type.path_segment(),
            path_segment("object id", object_id)?
        ))
    }

    pub async fn get(
        &self,
        object_type: PermissionObjectType,
        object_id: &str,
    ) -> Result<ObjectPermissions> {
        self.rest
            .get(&Self::path(object_type, object_id)?, &[])
            .await
    }

    /// Replaces all direct permissions of the object.
    pub async fn set(
        &self,
        object_type: PermissionObjectType,
        object_id: &str,
        access_control_list: Vec<AccessControlRequest>,
    ) -> Result<ObjectPermissions> {
        let request = PermissionsRequest {
            access_control_list,
        };
        self.rest
            .put(&Self::path(object_type, object_id)?, &request)
            .await
    }

    /// Adds or changes the given entries, leaving others untouched.
    pub async fn update(
        &self,
        object_type: PermissionObjectType,
        object_id: &str,
        access_control_list: Vec<AccessControlRequest>,
    ) -> Result<ObjectPermissions> {
        let request = PermissionsRequest {
            access_control_list,
        };
        self.rest
            .patch(&Self::path(object_type, object_id)?, &request)
            .await
    }

    pub async fn get_permission_levels(
        &self,
        object_type: PermissionObjectType,
        object_id: &str,
    ) -> Result<Vec<PermissionLevelDescription>> {
        let path = format!("{}/permissionLevels", Self::path(object_type, object_id)?);
        let response: PermissionLevelsResponse = self.rest.get(&path, &[]).await?;
        Ok(response.permission_levels)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::mock::mock_client;
    use crate::types::permissions::{
        AccessControlRequest, AclPermissionItem, PermissionLevel, PermissionObjectType,
        PrincipalKind,
    };
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_update_sends_patch_with_acl() {
        let (client, mock) = mock_client();
        mock.push_response(json!({
            "object_id": "/sql/warehouses/abc",
            "object_type": "warehouses",
            "access_control_list": [
                {"group_name": "analysts", "permission_level": "CAN_USE"},
                {"user_name": "me@example.com", "permission_level": "IS_OWNER"}
            ]
        }));

        let acl = vec![AccessControlRequest::group("analysts", PermissionLevel::CanUse).unwrap()];
        let permissions = client
            .permissions()
            .update(PermissionObjectType::SqlWarehouses, "abc", acl)
            .await
            .unwrap();

        let request = mock.last_request();
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.path, "/api/2.0/permissions/sql/warehouses/abc");
        assert_eq!(
            request.body,
            Some(json!({"access_control_list": [
                {"group_name": "analysts", "permission_level": "CAN_USE"}
            ]}))
        );

        let kinds: Vec<PrincipalKind> = permissions
            .access_control_list
            .iter()
            .map(AclPermissionItem::principal_kind)
            .collect();
        assert_eq!(kinds, vec![PrincipalKind::Group, PrincipalKind::User]);
    }

    #[tokio::test]
    async fn test_group_owner_in_response_is_rejected() {
        let (client, mock) = mock_client();
        mock.push_response(json!({
            "access_control_list": [
                {"group_name": "admins", "permission_level": "IS_OWNER"}
            ]
        }));

        let result = client
            .permissions()
            .get(PermissionObjectType::Jobs, "12")
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_permission_levels_path() {
        let (client, mock) = mock_client();
        mock.push_response(json!({"permission_levels": [
            {"permission_level": "CAN_ATTACH_TO", "description": "Can attach"}
        ]}));

        let levels = client
            .permissions()
            .get_permission_levels(PermissionObjectType::Clusters, "c1")
            .await
            .unwrap();
        assert_eq!(levels[0].permission_level, PermissionLevel::CanAttachTo);
        assert_eq!(
            mock.last_request().path,
            "/api/2.0/permissions/clusters/c1/permissionLevels"
        );
    }
}
