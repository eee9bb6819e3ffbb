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

//! Cluster library types for the Libraries API and job task attachments.

use crate::types::variant::{de_error, exactly_one};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A dependency installable on a cluster.
///
/// On the wire a library is an object with exactly one of the keys `jar`,
/// `egg`, `whl`, `pypi`, `cran` or `maven`; the key names the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Library {
    /// URI of a JAR (`dbfs:/`, `s3://`, workspace path, ...).
    Jar(String),
    /// URI of a Python egg.
    Egg(String),
    /// URI of a Python wheel.
    Whl(String),
    Pypi(PythonPyPiLibrary),
    Cran(RCranLibrary),
    Maven(MavenLibrary),
}

impl Library {
    pub fn jar(uri: impl Into<String>) -> Self {
        Self::Jar(uri.into())
    }

    pub fn egg(uri: impl Into<String>) -> Self {
        Self::Egg(uri.into())
    }

    pub fn whl(uri: impl Into<String>) -> Self {
        Self::Whl(uri.into())
    }

    pub fn pypi(package: impl Into<String>) -> Self {
        Self::Pypi(PythonPyPiLibrary {
            package: package.into(),
            repo: None,
        })
    }

    pub fn cran(package: impl Into<String>) -> Self {
        Self::Cran(RCranLibrary {
            package: package.into(),
            repo: None,
        })
    }

    pub fn maven(coordinates: impl Into<String>) -> Self {
        Self::Maven(MavenLibrary {
            coordinates: coordinates.into(),
            repo: None,
            exclusions: Vec::new(),
        })
    }

    /// The wire key that discriminates this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Jar(_) => "jar",
            Self::Egg(_) => "egg",
            Self::Whl(_) => "whl",
            Self::Pypi(_) => "pypi",
            Self::Cran(_) => "cran",
            Self::Maven(_) => "maven",
        }
    }
}

impl Serialize for Library {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Jar(uri) | Self::Egg(uri) | Self::Whl(uri) => {
                map.serialize_entry(self.kind(), uri)?
            }
            Self::Pypi(lib) => map.serialize_entry(self.kind(), lib)?,
            Self::Cran(lib) => map.serialize_entry(self.kind(), lib)?,
            Self::Maven(lib) => map.serialize_entry(self.kind(), lib)?,
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct LibraryWire {
    #[serde(default)]
    jar: Option<String>,
    #[serde(default)]
    egg: Option<String>,
    #[serde(default)]
    whl: Option<String>,
    #[serde(default)]
    pypi: Option<PythonPyPiLibrary>,
    #[serde(default)]
    cran: Option<RCranLibrary>,
    #[serde(default)]
    maven: Option<MavenLibrary>,
}

impl<'de> Deserialize<'de> for Library {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = LibraryWire::deserialize(deserializer)?;
        exactly_one(
            "library",
            [
                ("jar", wire.jar.map(Library::Jar)),
                ("egg", wire.egg.map(Library::Egg)),
                ("whl", wire.whl.map(Library::Whl)),
                ("pypi", wire.pypi.map(Library::Pypi)),
                ("cran", wire.cran.map(Library::Cran)),
                ("maven", wire.maven.map(Library::Maven)),
            ],
        )
        .map_err(de_error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonPyPiLibrary {
    /// Package name, optionally with a version specifier (`simplejson==3.8.0`).
    pub package: String,
    /// Index URL; the default PyPI index when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RCranLibrary {
    pub package: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MavenLibrary {
    /// Gradle-style coordinates, e.g. `org.jsoup:jsoup:1.7.2`.
    pub coordinates: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Dependencies to exclude, e.g. `slf4j:slf4j`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<String>,
}

/// Installation state of a library on a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LibraryInstallStatus {
    Pending,
    Resolving,
    Installing,
    Installed,
    Skipped,
    Failed,
    UninstallOnRestart,
    Restored,
}

impl LibraryInstallStatus {
    /// True once the status will not change without user action.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Installed | Self::Skipped | Self::Failed | Self::UninstallOnRestart
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryFullStatus {
    pub library: Library,
    pub status: LibraryInstallStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
    #[serde(default)]
    pub is_library_for_all_clusters: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterLibraryStatuses {
    pub cluster_id: String,
    #[serde(default)]
    pub library_statuses: Vec<LibraryFullStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AllClusterLibraryStatuses {
    #[serde(default)]
    pub statuses: Vec<ClusterLibraryStatuses>,
}

/// Body of `libraries/install` and `libraries/uninstall`.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterLibraries {
    pub cluster_id: String,
    pub libraries: Vec<Library>,
}
