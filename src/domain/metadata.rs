//! Package metadata as published by the registry
//!
//! The npm packument is loosely typed in practice: `repository` may be a
//! plain string, `deprecated` may be a string or a boolean, and mirrors
//! sometimes return `null` for whole sections. The serde field helpers keep
//! what has the expected shape and drop the rest, so a record only fails to
//! load when the body is not a JSON object at all.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Name of the distribution tag pointing at the current release
pub const LATEST_TAG: &str = "latest";

/// Deprecation marker attached to a published version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeprecationMarker {
    /// Deprecated with a maintainer message
    Message(String),
    /// Deprecated without a usable message (e.g. `true`)
    Flag,
}

impl DeprecationMarker {
    /// Interprets a raw `deprecated` value with JavaScript truthiness.
    ///
    /// `null`, `false`, `""` and `0` mean "not deprecated".
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::Bool(true) => Some(DeprecationMarker::Flag),
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(DeprecationMarker::Message(s.clone())),
            Value::Number(n) => {
                if n.as_f64().map(|f| f == 0.0 || f.is_nan()).unwrap_or(false) {
                    None
                } else {
                    Some(DeprecationMarker::Flag)
                }
            }
            Value::Array(_) | Value::Object(_) => Some(DeprecationMarker::Flag),
        }
    }

    /// Returns the maintainer message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            DeprecationMarker::Message(msg) => Some(msg),
            DeprecationMarker::Flag => None,
        }
    }
}

/// Per-version information
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VersionMetadata {
    #[serde(default, deserialize_with = "deprecation_marker")]
    pub deprecated: Option<DeprecationMarker>,
}

/// Repository descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryDescriptor {
    /// Raw URL, only kept when the registry sent a string
    pub url: Option<String>,
}

/// Package record fetched from the registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistryMetadata {
    /// Package name as reported by the registry
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Distribution tags (tag name → version)
    #[serde(default, rename = "dist-tags", deserialize_with = "lenient_entries")]
    pub dist_tags: HashMap<String, String>,
    /// Published versions
    #[serde(default, deserialize_with = "lenient_entries")]
    pub versions: HashMap<String, VersionMetadata>,
    /// Source repository
    #[serde(default, deserialize_with = "repository_descriptor")]
    pub repository: Option<RepositoryDescriptor>,
}

impl RegistryMetadata {
    /// Builds a record from a decoded JSON body.
    ///
    /// Only objects are accepted; the derived decoder alone would also take
    /// a JSON array as a positional field list.
    pub fn from_json(value: Value) -> Result<Self, String> {
        if !value.is_object() {
            return Err("expected a JSON object".to_string());
        }
        serde_json::from_value(value).map_err(|e| e.to_string())
    }

    /// Returns the `latest` distribution tag, ignoring empty values
    pub fn latest_version(&self) -> Option<&str> {
        self.dist_tags
            .get(LATEST_TAG)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Returns the deprecation marker of a published version
    pub fn deprecation(&self, version: &str) -> Option<&DeprecationMarker> {
        self.versions.get(version)?.deprecated.as_ref()
    }

    /// Returns the raw repository URL, if it was a string
    pub fn repository_url(&self) -> Option<&str> {
        self.repository.as_ref()?.url.as_deref()
    }
}

/// Falls back to the default when the value has an unexpected shape
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Keeps the entries of an object that decode as `T`, drops the rest
fn lenient_entries<'de, D, T>(deserializer: D) -> Result<HashMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(HashMap::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(key, value)| T::deserialize(value).ok().map(|v| (key, v)))
        .collect())
}

fn deprecation_marker<'de, D>(deserializer: D) -> Result<Option<DeprecationMarker>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(DeprecationMarker::from_value(&value))
}

/// `repository` may also be a shorthand string like `github:org/repo`
fn repository_descriptor<'de, D>(deserializer: D) -> Result<Option<RepositoryDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(repository) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    let url = repository.get("url").and_then(Value::as_str).map(str::to_string);
    Ok(Some(RepositoryDescriptor { url }))
}
