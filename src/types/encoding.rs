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

//! Serde helpers for base64-encoded binary fields.
//!
//! DBFS blocks, workspace exports and secret bytes travel as standard base64
//! strings inside JSON. Use with `#[serde(with = "...")]`.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Deserializer, Serializer};

/// `Vec<u8>` <-> base64 string.
pub mod base64_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

/// `Option<Vec<u8>>` <-> optional base64 string. Empty strings decode to `None`.
pub mod base64_bytes_opt {
    use super::*;

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        match opt {
            Some(s) if !s.is_empty() => STANDARD
                .decode(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Block {
        #[serde(with = "super::base64_bytes")]
        data: Vec<u8>,
        #[serde(default, with = "super::base64_bytes_opt")]
        extra: Option<Vec<u8>>,
    }

    #[test]
    fn test_base64_encode() {
        let block = Block {
            data: b"Hello, World!".to_vec(),
            extra: None,
        };
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"data":"SGVsbG8sIFdvcmxkIQ==","extra":null}"#);
    }

    #[test]
    fn test_base64_decode_empty_optional() {
        let block: Block = serde_json::from_str(r#"{"data":"","extra":""}"#).unwrap();
        assert!(block.data.is_empty());
        assert!(block.extra.is_none());
    }

    #[test]
    fn test_base64_decode_invalid() {
        let result: Result<Block, _> = serde_json::from_str(r#"{"data":"***"}"#);
        assert!(result.is_err());
    }
}
