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

//! Client configuration.
//!
//! A [`ClientConfig`] is filled through builder methods, string options
//! (`databricks.*` keys) or the `DATABRICKS_*` environment variables, then
//! handed to [`crate::DatabricksClient::new`].

use crate::client::HttpClientConfig;
use crate::error::{Error, Result};
use crate::logging::LogConfig;
use std::time::Duration;
use tracing::debug;

pub const OPTION_HOST: &str = "databricks.host";
pub const OPTION_ACCESS_TOKEN: &str = "databricks.access_token";
pub const OPTION_CONNECT_TIMEOUT_MS: &str = "databricks.http.connect_timeout_ms";
pub const OPTION_READ_TIMEOUT_MS: &str = "databricks.http.read_timeout_ms";
pub const OPTION_MAX_CONNECTIONS_PER_HOST: &str = "databricks.http.max_connections_per_host";
pub const OPTION_LOG_LEVEL: &str = "databricks.log_level";
pub const OPTION_LOG_FILE: &str = "databricks.log_file";

pub const ENV_HOST: &str = "DATABRICKS_HOST";
pub const ENV_TOKEN: &str = "DATABRICKS_TOKEN";
pub const ENV_LOG_LEVEL: &str = "DATABRICKS_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "DATABRICKS_LOG_FILE";

/// Connection settings for a workspace.
#[derive(Clone, Default)]
pub struct ClientConfig {
    host: Option<String>,
    access_token: Option<String>,
    pub http: HttpClientConfig,
    pub log: LogConfig,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("http", &self.http)
            .field("log", &self.log)
            .finish()
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `DATABRICKS_HOST`, `DATABRICKS_TOKEN`, `DATABRICKS_LOG_LEVEL` and
    /// `DATABRICKS_LOG_FILE`. Unset variables leave the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        config.host = lookup(ENV_HOST).map(|h| normalize_host(&h));
        config.access_token = lookup(ENV_TOKEN);
        config.log.level = lookup(ENV_LOG_LEVEL);
        config.log.file = lookup(ENV_LOG_FILE);
        config
    }

    pub fn with_host(mut self, host: impl AsRef<str>) -> Self {
        self.host = Some(normalize_host(host.as_ref()));
        self
    }

    pub fn with_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    pub fn with_http_config(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }

    pub fn with_log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Workspace URL without a trailing slash, e.g. `https://adb-123.azuredatabricks.net`.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Sets a configuration value by its string key.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            OPTION_HOST => self.host = Some(normalize_host(value)),
            OPTION_ACCESS_TOKEN => self.access_token = Some(value.to_string()),
            OPTION_CONNECT_TIMEOUT_MS => {
                self.http.connect_timeout = Duration::from_millis(parse_u64(key, value)?)
            }
            OPTION_READ_TIMEOUT_MS => {
                self.http.read_timeout = Duration::from_millis(parse_u64(key, value)?)
            }
            OPTION_MAX_CONNECTIONS_PER_HOST => {
                self.http.max_connections_per_host = parse_u64(key, value)? as usize
            }
            OPTION_LOG_LEVEL => self.log.level = Some(value.to_string()),
            OPTION_LOG_FILE => self.log.file = Some(value.to_string()),
            _ => {
                return Err(Error::invalid_argument(format!(
                    "unknown option '{}'",
                    key
                )))
            }
        }
        debug!("Set option {}", key);
        Ok(())
    }

    /// Returns the host and token, failing if either is missing.
    pub(crate) fn credentials(&self) -> Result<(&str, &str)> {
        let host = self
            .host()
            .ok_or_else(|| Error::config(format!("{} / {} is not set", OPTION_HOST, ENV_HOST)))?;
        let token = self.access_token().ok_or_else(|| {
            Error::config(format!("{} / {} is not set", OPTION_ACCESS_TOKEN, ENV_TOKEN))
        })?;
        Ok((host, token))
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| {
        Error::invalid_argument(format!(
            "option '{}' expects a non-negative integer, got '{}'",
            key, value
        ))
    })
}

/// Adds `https://` when no scheme is given and strips trailing slashes.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// Extracts the warehouse id from a SQL `http_path`.
/// Format: /sql/1.0/warehouses/{warehouse_id}
pub fn warehouse_id_from_http_path(http_path: &str) -> Option<String> {
    http_path
        .strip_prefix("/sql/1.0/warehouses/")
        .or_else(|| http_path.strip_prefix("sql/1.0/warehouses/"))
        .map(|s| s.trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_set_option() {
        let mut config = ClientConfig::new();
        config
            .set_option(OPTION_HOST, "adb-1.azuredatabricks.net/")
            .unwrap();
        config.set_option(OPTION_ACCESS_TOKEN, "dapi123").unwrap();
        config.set_option(OPTION_CONNECT_TIMEOUT_MS, "1500").unwrap();
        config
            .set_option(OPTION_MAX_CONNECTIONS_PER_HOST, "8")
            .unwrap();
        config.set_option(OPTION_LOG_LEVEL, "debug").unwrap();

        assert_eq!(config.host(), Some("https://adb-1.azuredatabricks.net"));
        assert_eq!(config.access_token(), Some("dapi123"));
        assert_eq!(config.http.connect_timeout, Duration::from_millis(1500));
        assert_eq!(config.http.max_connections_per_host, 8);
        assert_eq!(config.log.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_set_option_rejects_bad_values() {
        let mut config = ClientConfig::new();
        assert!(matches!(
            config.set_option(OPTION_READ_TIMEOUT_MS, "soon"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            config.set_option("databricks.nope", "x"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_HOST, "http://localhost:8080"),
            (ENV_TOKEN, "t"),
            (ENV_LOG_FILE, "/tmp/dbx.log"),
        ]
        .into_iter()
        .collect();
        let config = ClientConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.host(), Some("http://localhost:8080"));
        assert_eq!(config.credentials().unwrap(), ("http://localhost:8080", "t"));
        assert!(config.log.level.is_none());
        assert_eq!(config.log.file.as_deref(), Some("/tmp/dbx.log"));
    }

    #[test]
    fn test_credentials_require_host_and_token() {
        let config = ClientConfig::new().with_token("t");
        assert!(matches!(config.credentials(), Err(Error::Config(_))));

        let config = ClientConfig::new().with_host("h");
        assert!(matches!(config.credentials(), Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new().with_host("h").with_token("dapi-secret");
        assert!(!format!("{:?}", config).contains("dapi-secret"));
    }

    #[test]
    fn test_warehouse_id_from_http_path() {
        assert_eq!(
            warehouse_id_from_http_path("/sql/1.0/warehouses/abc123"),
            Some("abc123".to_string())
        );
        assert_eq!(
            warehouse_id_from_http_path("sql/1.0/warehouses/abc123/"),
            Some("abc123".to_string())
        );
        assert_eq!(warehouse_id_from_http_path("/sql/protocolv1/o/1/0123"), None);
        assert_eq!(warehouse_id_from_http_path("/sql/1.0/warehouses/"), None);
    }
}
