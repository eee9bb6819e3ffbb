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

//! Clusters API request/response types.
//!
//! [`ClusterAttributes`] is the cluster specification shared by
//! `clusters/create`, `clusters/edit`, job clusters and the `new_cluster` of a
//! job task. [`ClusterInfo`] is what `clusters/get` and `clusters/list` return.

use crate::error::Error;
use crate::types::variant::exactly_one;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Life-cycle state of a cluster, as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterState {
    Pending,
    Running,
    Restarting,
    Resizing,
    Terminating,
    Terminated,
    Error,
    Unknown,
}

impl ClusterState {
    /// True for states the cluster will not leave without a user request.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated | Self::Error | Self::Unknown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoScale {
    pub min_workers: i32,
    pub max_workers: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AwsAvailability {
    Spot,
    OnDemand,
    SpotWithFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EbsVolumeType {
    GeneralPurposeSsd,
    ThroughputOptimizedHdd,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_on_demand: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<AwsAvailability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_profile_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_bid_price_percent: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ebs_volume_type: Option<EbsVolumeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ebs_volume_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ebs_volume_size: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AzureAvailability {
    SpotAzure,
    OnDemandAzure,
    SpotWithFallbackAzure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AzureAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_on_demand: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<AzureAvailability>,
    /// Maximum spot price; `-1` means on-demand price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_bid_max_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AzureDiskVolumeType {
    PremiumLrs,
    StandardLrs,
}

/// Disk type of a cluster's attached storage.
///
/// Wire shape is `{"ebs_volume_type": ...}` on AWS or
/// `{"azure_disk_volume_type": ...}` on Azure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DiskTypeWire", into = "DiskTypeWire")]
pub enum DiskType {
    Ebs(EbsVolumeType),
    AzureDisk(AzureDiskVolumeType),
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct DiskTypeWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ebs_volume_type: Option<EbsVolumeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    azure_disk_volume_type: Option<AzureDiskVolumeType>,
}

impl TryFrom<DiskTypeWire> for DiskType {
    type Error = Error;

    fn try_from(wire: DiskTypeWire) -> Result<Self, Error> {
        exactly_one(
            "disk type",
            [
                ("ebs_volume_type", wire.ebs_volume_type.map(DiskType::Ebs)),
                (
                    "azure_disk_volume_type",
                    wire.azure_disk_volume_type.map(DiskType::AzureDisk),
                ),
            ],
        )
    }
}

impl From<DiskType> for DiskTypeWire {
    fn from(disk_type: DiskType) -> Self {
        match disk_type {
            DiskType::Ebs(t) => Self {
                ebs_volume_type: Some(t),
                azure_disk_volume_type: None,
            },
            DiskType::AzureDisk(t) => Self {
                ebs_volume_type: None,
                azure_disk_volume_type: Some(t),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskSpec {
    pub disk_type: DiskType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_count: Option<i32>,
    /// Size of each disk in GiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_size: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbfsStorageInfo {
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3StorageInfo {
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_encryption: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canned_acl: Option<String>,
}

/// Where cluster logs are delivered. Only one destination may be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusterLogConf {
    #[serde(rename = "dbfs")]
    Dbfs(DbfsStorageInfo),
    #[serde(rename = "s3")]
    S3(S3StorageInfo),
}

/// Location of an init script, keyed by storage kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InitScriptWire", into = "InitScriptWire")]
pub enum InitScriptInfo {
    Workspace(String),
    Volumes(String),
    Dbfs(String),
    File(String),
    Abfss(String),
    S3(S3StorageInfo),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Destination {
    destination: String,
}

#[derive(Clone, Default, Serialize, Deserialize)]
struct InitScriptWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    workspace: Option<Destination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    volumes: Option<Destination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dbfs: Option<Destination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<Destination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    abfss: Option<Destination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    s3: Option<S3StorageInfo>,
}

impl TryFrom<InitScriptWire> for InitScriptInfo {
    type Error = Error;

    fn try_from(wire: InitScriptWire) -> Result<Self, Error> {
        exactly_one(
            "init script",
            [
                ("workspace", wire.workspace.map(|d| Self::Workspace(d.destination))),
                ("volumes", wire.volumes.map(|d| Self::Volumes(d.destination))),
                ("dbfs", wire.dbfs.map(|d| Self::Dbfs(d.destination))),
                ("file", wire.file.map(|d| Self::File(d.destination))),
                ("abfss", wire.abfss.map(|d| Self::Abfss(d.destination))),
                ("s3", wire.s3.map(Self::S3)),
            ],
        )
    }
}

impl From<InitScriptInfo> for InitScriptWire {
    fn from(info: InitScriptInfo) -> Self {
        let dest = |destination| Some(Destination { destination });
        let mut wire = Self::default();
        match info {
            InitScriptInfo::Workspace(d) => wire.workspace = dest(d),
            InitScriptInfo::Volumes(d) => wire.volumes = dest(d),
            InitScriptInfo::Dbfs(d) => wire.dbfs = dest(d),
            InitScriptInfo::File(d) => wire.file = dest(d),
            InitScriptInfo::Abfss(d) => wire.abfss = dest(d),
            InitScriptInfo::S3(s3) => wire.s3 = Some(s3),
        }
        wire
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerBasicAuth {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<DockerBasicAuth>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuntimeEngine {
    Standard,
    Photon,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSecurityMode {
    None,
    SingleUser,
    UserIsolation,
    LegacyTableAcl,
    LegacyPassthrough,
    LegacySingleUser,
    LegacySingleUserStandard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterSource {
    Ui,
    Api,
    Job,
    Models,
    Pipeline,
    PipelineMaintenance,
    Sql,
}

/// Cluster specification.
///
/// Either `num_workers` or `autoscale` should be set; both absent means a
/// single-node cluster with zero workers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spark_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_workers: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscale: Option<AutoScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_node_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_pool_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_instance_pool_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub spark_conf: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub spark_env_vars: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssh_public_keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_attributes: Option<AwsAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_attributes: Option<AzureAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_log_conf: Option<ClusterLogConf>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub init_scripts: Vec<InitScriptInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_image: Option<DockerImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_spec: Option<DiskSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autotermination_minutes: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_elastic_disk: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_local_disk_encryption: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_engine: Option<RuntimeEngine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_security_mode: Option<DataSecurityMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_policy_default_values: Option<bool>,
}

impl ClusterAttributes {
    pub fn new(spark_version: impl Into<String>, node_type_id: impl Into<String>) -> Self {
        Self {
            spark_version: Some(spark_version.into()),
            node_type_id: Some(node_type_id.into()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, cluster_name: impl Into<String>) -> Self {
        self.cluster_name = Some(cluster_name.into());
        self
    }

    pub fn with_num_workers(mut self, num_workers: i32) -> Self {
        self.num_workers = Some(num_workers);
        self.autoscale = None;
        self
    }

    pub fn with_autoscale(mut self, min_workers: i32, max_workers: i32) -> Self {
        self.autoscale = Some(AutoScale {
            min_workers,
            max_workers,
        });
        self.num_workers = None;
        self
    }

    pub fn with_autotermination_minutes(mut self, minutes: i32) -> Self {
        self.autotermination_minutes = Some(minutes);
        self
    }

    pub fn with_spark_conf(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spark_conf.insert(key.into(), value.into());
        self
    }
}

/// Body of `clusters/edit`: a full specification plus the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditClusterRequest {
    pub cluster_id: String,
    #[serde(flatten)]
    pub attributes: ClusterAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparkNode {
    #[serde(default)]
    pub private_ip: Option<String>,
    #[serde(default)]
    pub public_dns: Option<String>,
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub instance_id: Option<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub host_private_ip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminationReason {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, rename = "type")]
    pub reason_type: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
}

/// Cluster a run or task ran on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInstance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spark_context_id: Option<String>,
}

/// Cluster description returned by `clusters/get` and `clusters/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub cluster_id: String,
    #[serde(flatten)]
    pub attributes: ClusterAttributes,
    #[serde(default)]
    pub state: Option<ClusterState>,
    #[serde(default)]
    pub state_message: Option<String>,
    #[serde(default)]
    pub creator_user_name: Option<String>,
    #[serde(default)]
    pub cluster_source: Option<ClusterSource>,
    #[serde(default)]
    pub driver: Option<SparkNode>,
    #[serde(default)]
    pub executors: Vec<SparkNode>,
    #[serde(default)]
    pub spark_context_id: Option<i64>,
    #[serde(default)]
    pub jdbc_port: Option<i32>,
    #[serde(default)]
    pub cluster_memory_mb: Option<i64>,
    #[serde(default)]
    pub cluster_cores: Option<f64>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub terminated_time: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_state_loss_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub termination_reason: Option<TerminationReason>,
    #[serde(default)]
    pub default_tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeType {
    pub node_type_id: String,
    #[serde(default)]
    pub memory_mb: i64,
    #[serde(default)]
    pub num_cores: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instance_type_id: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default)]
    pub num_gpus: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparkVersion {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterEventType {
    Creating,
    DidNotExpandDisk,
    ExpandedDisk,
    FailedToExpandDisk,
    InitScriptsStarting,
    InitScriptsFinished,
    Starting,
    Restarting,
    Terminating,
    Edited,
    Running,
    Resizing,
    UpsizeCompleted,
    NodesLost,
    DriverHealthy,
    DriverUnavailable,
    SparkException,
    DriverNotResponding,
    DbfsDown,
    MetastoreDown,
    AutoscalingStatsReport,
    NodeBlacklisted,
    Pinned,
    Unpinned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ListOrder {
    Desc,
    Asc,
}

/// Body of `clusters/events`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterEventsRequest {
    pub cluster_id: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<ListOrder>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_types: Vec<ClusterEventType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl ClusterEventsRequest {
    pub fn new(cluster_id: impl Into<String>) -> Self {
        Self {
            cluster_id: cluster_id.into(),
            start_time: None,
            end_time: None,
            order: None,
            event_types: Vec::new(),
            offset: None,
            limit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterEvent {
    pub cluster_id: String,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub event_type: ClusterEventType,
    #[serde(default)]
    pub details: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterEventsResponse {
    #[serde(default)]
    pub events: Vec<ClusterEvent>,
    /// Request for the next page; absent on the last page.
    #[serde(default)]
    pub next_page: Option<serde_json::Value>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// Request or response carrying only a cluster id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterId {
    pub cluster_id: String,
}

impl ClusterId {
    pub fn new(cluster_id: impl Into<String>) -> Self {
        Self {
            cluster_id: cluster_id.into(),
        }
    }
}

/// Target size for `clusters/resize`: fixed or autoscaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterSize {
    NumWorkers(i32),
    Autoscale(AutoScale),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResizeRequest {
    pub cluster_id: String,
    #[serde(flatten)]
    pub size: ClusterSize,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListClustersResponse {
    #[serde(default)]
    pub clusters: Vec<ClusterInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListNodeTypesResponse {
    #[serde(default)]
    pub node_types: Vec<NodeType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SparkVersionsResponse {
    #[serde(default)]
    pub versions: Vec<SparkVersion>,
}
