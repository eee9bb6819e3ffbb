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

//! Access control types for the Permissions API and job ACLs.
//!
//! Both [`AclPermissionItem`] (read side) and [`AccessControlRequest`] (write
//! side) identify their principal by which key is present: `user_name`,
//! `group_name` or `service_principal_name`. Ownership is a user-only concept,
//! so the group variants reject [`PermissionLevel::IsOwner`] when constructed.

use crate::error::{Error, Result};
use crate::types::variant::exactly_one;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionLevel {
    CanManage,
    CanRestart,
    CanAttachTo,
    IsOwner,
    CanManageRun,
    CanView,
    CanRead,
    CanRun,
    CanEdit,
    CanUse,
    CanManageStagingVersions,
    CanManageProductionVersions,
    CanBind,
    CanQuery,
    CanMonitor,
}

/// Kind of principal an ACL entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincipalKind {
    User,
    Group,
    ServicePrincipal,
}

impl PrincipalKind {
    /// The wire key naming a principal of this kind.
    pub fn key(&self) -> &'static str {
        match self {
            Self::User => "user_name",
            Self::Group => "group_name",
            Self::ServicePrincipal => "service_principal_name",
        }
    }
}

fn check_group_level(group_name: &str, level: PermissionLevel) -> Result<()> {
    if level == PermissionLevel::IsOwner {
        return Err(Error::invalid_argument(format!(
            "group '{}' cannot be granted IS_OWNER; only users can own objects",
            group_name
        )));
    }
    Ok(())
}

/// Inheritance details of an existing grant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inheritance {
    pub inherited: bool,
    /// Objects the grant is inherited from, e.g. `/directories/12345`.
    pub inherited_from_object: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAclItem {
    pub user_name: String,
    pub permission_level: PermissionLevel,
    pub inheritance: Inheritance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePrincipalAclItem {
    pub service_principal_name: String,
    pub permission_level: PermissionLevel,
    pub inheritance: Inheritance,
}

/// Group grant. The level is private so `IS_OWNER` can never be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAclItem {
    pub group_name: String,
    permission_level: PermissionLevel,
    pub inheritance: Inheritance,
}

impl GroupAclItem {
    pub fn new(group_name: impl Into<String>, permission_level: PermissionLevel) -> Result<Self> {
        let group_name = group_name.into();
        check_group_level(&group_name, permission_level)?;
        Ok(Self {
            group_name,
            permission_level,
            inheritance: Inheritance::default(),
        })
    }

    pub fn permission_level(&self) -> PermissionLevel {
        self.permission_level
    }

    pub fn set_permission_level(&mut self, permission_level: PermissionLevel) -> Result<()> {
        check_group_level(&self.group_name, permission_level)?;
        self.permission_level = permission_level;
        Ok(())
    }
}

/// An access control entry as returned by the Permissions API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AclWire", into = "AclWire")]
pub enum AclPermissionItem {
    User(UserAclItem),
    Group(GroupAclItem),
    ServicePrincipal(ServicePrincipalAclItem),
}

impl AclPermissionItem {
    pub fn user(user_name: impl Into<String>, permission_level: PermissionLevel) -> Self {
        Self::User(UserAclItem {
            user_name: user_name.into(),
            permission_level,
            inheritance: Inheritance::default(),
        })
    }

    pub fn group(group_name: impl Into<String>, permission_level: PermissionLevel) -> Result<Self> {
        GroupAclItem::new(group_name, permission_level).map(Self::Group)
    }

    pub fn service_principal(
        service_principal_name: impl Into<String>,
        permission_level: PermissionLevel,
    ) -> Self {
        Self::ServicePrincipal(ServicePrincipalAclItem {
            service_principal_name: service_principal_name.into(),
            permission_level,
            inheritance: Inheritance::default(),
        })
    }

    pub fn principal_kind(&self) -> PrincipalKind {
        match self {
            Self::User(_) => PrincipalKind::User,
            Self::Group(_) => PrincipalKind::Group,
            Self::ServicePrincipal(_) => PrincipalKind::ServicePrincipal,
        }
    }

    pub fn principal(&self) -> &str {
        match self {
            Self::User(item) => &item.user_name,
            Self::Group(item) => &item.group_name,
            Self::ServicePrincipal(item) => &item.service_principal_name,
        }
    }

    pub fn permission_level(&self) -> PermissionLevel {
        match self {
            Self::User(item) => item.permission_level,
            Self::Group(item) => item.permission_level(),
            Self::ServicePrincipal(item) => item.permission_level,
        }
    }

    pub fn inheritance(&self) -> &Inheritance {
        match self {
            Self::User(item) => &item.inheritance,
            Self::Group(item) => &item.inheritance,
            Self::ServicePrincipal(item) => &item.inheritance,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct AclWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service_principal_name: Option<String>,
    permission_level: PermissionLevel,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    inherited: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    inherited_from_object: Vec<String>,
}

impl TryFrom<AclWire> for AclPermissionItem {
    type Error = Error;

    fn try_from(wire: AclWire) -> Result<Self> {
        let principal = exactly_one(
            "principal",
            [
                ("user_name", wire.user_name.map(|n| (PrincipalKind::User, n))),
                ("group_name", wire.group_name.map(|n| (PrincipalKind::Group, n))),
                (
                    "service_principal_name",
                    wire.service_principal_name
                        .map(|n| (PrincipalKind::ServicePrincipal, n)),
                ),
            ],
        )?;
        let inheritance = Inheritance {
            inherited: wire.inherited,
            inherited_from_object: wire.inherited_from_object,
        };

        let item = match principal {
            (PrincipalKind::User, user_name) => Self::User(UserAclItem {
                user_name,
                permission_level: wire.permission_level,
                inheritance,
            }),
            (PrincipalKind::Group, group_name) => {
                let mut item = GroupAclItem::new(group_name, wire.permission_level)?;
                item.inheritance = inheritance;
                Self::Group(item)
            }
            (PrincipalKind::ServicePrincipal, service_principal_name) => {
                Self::ServicePrincipal(ServicePrincipalAclItem {
                    service_principal_name,
                    permission_level: wire.permission_level,
                    inheritance,
                })
            }
        };
        Ok(item)
    }
}

impl From<AclPermissionItem> for AclWire {
    fn from(item: AclPermissionItem) -> Self {
        let permission_level = item.permission_level();
        let mut wire = AclWire {
            user_name: None,
            group_name: None,
            service_principal_name: None,
            permission_level,
            inherited: false,
            inherited_from_object: Vec::new(),
        };
        let inheritance = match item {
            AclPermissionItem::User(item) => {
                wire.user_name = Some(item.user_name);
                item.inheritance
            }
            AclPermissionItem::Group(item) => {
                wire.group_name = Some(item.group_name);
                item.inheritance
            }
            AclPermissionItem::ServicePrincipal(item) => {
                wire.service_principal_name = Some(item.service_principal_name);
                item.inheritance
            }
        };
        wire.inherited = inheritance.inherited;
        wire.inherited_from_object = inheritance.inherited_from_object;
        wire
    }
}

/// Group entry of an [`AccessControlRequest`]; `IS_OWNER` is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAccessControl {
    pub group_name: String,
    permission_level: PermissionLevel,
}

impl GroupAccessControl {
    pub fn new(group_name: impl Into<String>, permission_level: PermissionLevel) -> Result<Self> {
        let group_name = group_name.into();
        check_group_level(&group_name, permission_level)?;
        Ok(Self {
            group_name,
            permission_level,
        })
    }

    pub fn permission_level(&self) -> PermissionLevel {
        self.permission_level
    }

    pub fn set_permission_level(&mut self, permission_level: PermissionLevel) -> Result<()> {
        check_group_level(&self.group_name, permission_level)?;
        self.permission_level = permission_level;
        Ok(())
    }
}

/// A grant to apply, used by `permissions` set/update and job ACLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AccessControlWire", into = "AccessControlWire")]
pub enum AccessControlRequest {
    User {
        user_name: String,
        permission_level: PermissionLevel,
    },
    Group(GroupAccessControl),
    ServicePrincipal {
        service_principal_name: String,
        permission_level: PermissionLevel,
    },
}

impl AccessControlRequest {
    pub fn user(user_name: impl Into<String>, permission_level: PermissionLevel) -> Self {
        Self::User {
            user_name: user_name.into(),
            permission_level,
        }
    }

    pub fn group(group_name: impl Into<String>, permission_level: PermissionLevel) -> Result<Self> {
        GroupAccessControl::new(group_name, permission_level).map(Self::Group)
    }

    pub fn service_principal(
        service_principal_name: impl Into<String>,
        permission_level: PermissionLevel,
    ) -> Self {
        Self::ServicePrincipal {
            service_principal_name: service_principal_name.into(),
            permission_level,
        }
    }

    pub fn principal_kind(&self) -> PrincipalKind {
        match self {
            Self::User { .. } => PrincipalKind::User,
            Self::Group(_) => PrincipalKind::Group,
            Self::ServicePrincipal { .. } => PrincipalKind::ServicePrincipal,
        }
    }

    pub fn principal(&self) -> &str {
        match self {
            Self::User { user_name, .. } => user_name,
            Self::Group(group) => &group.group_name,
            Self::ServicePrincipal {
                service_principal_name,
                ..
            } => service_principal_name,
        }
    }

    pub fn permission_level(&self) -> PermissionLevel {
        match self {
            Self::User {
                permission_level, ..
            }
            | Self::ServicePrincipal {
                permission_level, ..
            } => *permission_level,
            Self::Group(group) => group.permission_level(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct AccessControlWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service_principal_name: Option<String>,
    permission_level: PermissionLevel,
}

impl TryFrom<AccessControlWire> for AccessControlRequest {
    type Error = Error;

    fn try_from(wire: AccessControlWire) -> Result<Self> {
        let level = wire.permission_level;
        exactly_one(
            "principal",
            [
                (
                    "user_name",
                    wire.user_name.map(|n| Ok(Self::user(n, level))),
                ),
                (
                    "group_name",
                    wire.group_name.map(|n| Self::group(n, level)),
                ),
                (
                    "service_principal_name",
                    wire.service_principal_name
                        .map(|n| Ok(Self::service_principal(n, level))),
                ),
            ],
        )?
    }
}

impl From<AccessControlRequest> for AccessControlWire {
    fn from(request: AccessControlRequest) -> Self {
        let permission_level = request.permission_level();
        let (user_name, group_name, service_principal_name) = match request {
            AccessControlRequest::User { user_name, .. } => (Some(user_name), None, None),
            AccessControlRequest::Group(group) => (None, Some(group.group_name), None),
            AccessControlRequest::ServicePrincipal {
                service_principal_name,
                ..
            } => (None, None, Some(service_principal_name)),
        };
        Self {
            user_name,
            group_name,
            service_principal_name,
            permission_level,
        }
    }
}

/// Object families addressable through `/api/2.0/permissions/{type}/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionObjectType {
    Clusters,
    ClusterPolicies,
    InstancePools,
    Jobs,
    Pipelines,
    Notebooks,
    Directories,
    Repos,
    Experiments,
    RegisteredModels,
    SqlWarehouses,
    Tokens,
}

impl PermissionObjectType {
    /// Path segment used in the Permissions API URL.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Clusters => "clusters",
            Self::ClusterPolicies => "cluster-policies",
            Self::InstancePools => "instance-pools",
            Self::Jobs => "jobs",
            Self::Pipelines => "pipelines",
            Self::Notebooks => "notebooks",
            Self::Directories => "directories",
            Self::Repos => "repos",
            Self::Experiments => "experiments",
            Self::RegisteredModels => "registered-models",
            Self::SqlWarehouses => "sql/warehouses",
            Self::Tokens => "authorization/tokens",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPermissions {
    #[serde(default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub access_control_list: Vec<AclPermissionItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PermissionsRequest {
    pub access_control_list: Vec<AccessControlRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionLevelDescription {
    pub permission_level: PermissionLevel,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PermissionLevelsResponse {
    #[serde(default)]
    pub permission_levels: Vec<PermissionLevelDescription>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_acl_item_round_trip_per_variant() {
        let items = vec![
            AclPermissionItem::user("alice@example.com", PermissionLevel::IsOwner),
            AclPermissionItem::group("data-eng", PermissionLevel::CanManageRun).unwrap(),
            AclPermissionItem::service_principal("9f0c-...", PermissionLevel::CanView),
        ];
        for item in items {
            let value = serde_json::to_value(&item).unwrap();
            assert_eq!(value[item.principal_kind().key()], json!(item.principal()));

            let decoded: AclPermissionItem = serde_json::from_value(value).unwrap();
            assert_eq!(decoded.principal(), item.principal());
            assert_eq!(decoded.permission_level(), item.permission_level());
            assert_eq!(decoded, item);
        }
    }

    #[test]
    fn test_acl_item_inheritance() {
        let value = json!({
            "group_name": "admins",
            "permission_level": "CAN_MANAGE",
            "inherited": true,
            "inherited_from_object": ["/directories/1234"]
        });
        let item: AclPermissionItem = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(item.principal_kind(), PrincipalKind::Group);
        assert!(item.inheritance().inherited);
        assert_eq!(item.inheritance().inherited_from_object, vec!["/directories/1234"]);
        assert_eq!(serde_json::to_value(&item).unwrap(), value);
    }

    #[test]
    fn test_group_owner_rejected_on_construction() {
        let err = AclPermissionItem::group("admins", PermissionLevel::IsOwner).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let err = AccessControlRequest::group("admins", PermissionLevel::IsOwner).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_group_owner_rejected_on_assignment() {
        let mut item = GroupAclItem::new("admins", PermissionLevel::CanView).unwrap();
        assert!(item.set_permission_level(PermissionLevel::IsOwner).is_err());
        assert_eq!(item.permission_level(), PermissionLevel::CanView);
        item.set_permission_level(PermissionLevel::CanManage).unwrap();
        assert_eq!(item.permission_level(), PermissionLevel::CanManage);
    }

    #[test]
    fn test_group_owner_rejected_on_decode() {
        let result: std::result::Result<AccessControlRequest, _> =
            serde_json::from_value(json!({"group_name": "g", "permission_level": "IS_OWNER"}));
        assert!(result.is_err());

        let result: std::result::Result<AclPermissionItem, _> =
            serde_json::from_value(json!({"group_name": "g", "permission_level": "IS_OWNER"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_access_control_request_round_trip() {
        let requests = vec![
            AccessControlRequest::user("bob@example.com", PermissionLevel::IsOwner),
            AccessControlRequest::group("users", PermissionLevel::CanView).unwrap(),
            AccessControlRequest::service_principal("sp-app-id", PermissionLevel::CanManageRun),
        ];
        for request in requests {
            let value = serde_json::to_value(&request).unwrap();
            assert_eq!(value.as_object().unwrap().len(), 2);
            let decoded: AccessControlRequest = serde_json::from_value(value).unwrap();
            assert_eq!(decoded, request);
        }
    }

    #[test]
    fn test_access_control_request_rejects_two_principals() {
        let result: std::result::Result<AccessControlRequest, _> = serde_json::from_value(json!({
            "user_name": "a",
            "group_name": "b",
            "permission_level": "CAN_VIEW"
        }));
        assert!(result.is_err());

        let result: std::result::Result<AccessControlRequest, _> =
            serde_json::from_value(json!({"permission_level": "CAN_VIEW"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_object_permissions_deserialization() {
        let json = r#"{
            "object_id": "/jobs/42",
            "object_type": "job",
            "access_control_list": [
                {"user_name": "alice@example.com", "permission_level": "IS_OWNER"},
                {"group_name": "admins", "permission_level": "CAN_MANAGE", "inherited": true,
                 "inherited_from_object": ["/jobs/"]}
            ]
        }"#;
        let permissions: ObjectPermissions = serde_json::from_str(json).unwrap();
        assert_eq!(permissions.access_control_list.len(), 2);
        assert_eq!(
            permissions.access_control_list[0].permission_level(),
            PermissionLevel::IsOwner
        );
    }

    #[test]
    fn test_permission_object_path_segment() {
        assert_eq!(PermissionObjectType::SqlWarehouses.path_segment(), "sql/warehouses");
        assert_eq!(PermissionObjectType::Jobs.path_segment(), "jobs");
    }
}
