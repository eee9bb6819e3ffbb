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

//! Helpers for JSON unions discriminated by key presence.
//!
//! Several Databricks payloads encode a closed set of variants without a tag
//! field: the name of the single key present in the object selects the variant
//! (`{"jar": ...}` vs `{"pypi": {...}}`). Each family decodes into a "wire"
//! struct with every candidate key optional, then calls [`exactly_one`] to pick
//! the variant. Writing goes the other way through a `From<Variant>` for the
//! wire struct, which sets exactly one key.

use crate::error::{Error, Result};

/// A candidate discriminator key and the value decoded for it, if present.
pub(crate) type Candidate<T> = (&'static str, Option<T>);

/// Selects the only present candidate.
///
/// Fails with [`Error::InvalidVariant`] when no key or more than one key is
/// present. The error names the family and the offending keys.
pub(crate) fn exactly_one<T, const N: usize>(
    family: &str,
    candidates: [Candidate<T>; N],
) -> Result<T> {
    let keys: Vec<&'static str> = candidates.iter().map(|(key, _)| *key).collect();
    let mut found: Option<T> = None;
    let mut present: Vec<&'static str> = Vec::new();

    for (key, value) in candidates {
        if let Some(value) = value {
            present.push(key);
            if found.is_none() {
                found = Some(value);
            }
        }
    }

    match found {
        Some(value) if present.len() == 1 => Ok(value),
        Some(_) => Err(Error::invalid_variant(format!(
            "{} requires exactly one discriminator key, found {}",
            family,
            present.join(", ")
        ))),
        None => Err(Error::invalid_variant(format!(
            "{} requires exactly one of the keys [{}], found none",
            family,
            keys.join(", ")
        ))),
    }
}

/// Selects the present candidate, if any.
///
/// Like [`exactly_one`] but absence is allowed, for optional unions such as the
/// cluster spec of a pipeline task.
pub(crate) fn at_most_one<T, const N: usize>(
    family: &str,
    candidates: [Candidate<T>; N],
) -> Result<Option<T>> {
    if candidates.iter().all(|(_, value)| value.is_none()) {
        return Ok(None);
    }
    exactly_one(family, candidates).map(Some)
}

/// Converts a converter error into a serde error for `Deserialize` impls.
pub(crate) fn de_error<E: serde::de::Error>(err: Error) -> E {
    E::custom(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_picks_present_key() {
        let value =
            exactly_one("library", [("jar", None), ("egg", Some(2)), ("whl", None)]).unwrap();
        assert_eq!(value, 2);
    }

    #[test]
    fn test_exactly_one_rejects_none() {
        let err = exactly_one::<i32, 2>("library", [("jar", None), ("egg", None)]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("found none"), "{}", msg);
        assert!(msg.contains("[jar, egg]"), "{}", msg);
    }

    #[test]
    fn test_exactly_one_rejects_many() {
        let err = exactly_one("library", [("jar", Some(1)), ("egg", Some(2))]).unwrap_err();
        assert!(matches!(err, Error::InvalidVariant(_)));
        assert!(err.to_string().contains("jar, egg"));
    }

    #[test]
    fn test_at_most_one_allows_absence() {
        let value = at_most_one::<i32, 2>("task cluster", [("a", None), ("b", None)]).unwrap();
        assert!(value.is_none());
        assert!(at_most_one("task cluster", [("a", Some(1)), ("b", Some(1))]).is_err());
    }
}
