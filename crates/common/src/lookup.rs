//! Lookup configuration: where a variable is resolved from.
//!
//! [`LookupConfig`] is the raw, serialisable shape used both for the
//! construction-time default and for per-call overrides. Validation turns a
//! pair of them into a [`ResolvedConfig`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EnvVarsError;

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Source a variable is resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Process environment, optionally KMS-encrypted.
    LambdaConfig,
    /// A JSON document stored in S3.
    S3,
}

impl Location {
    /// The accepted wire values, in display order.
    pub const ALLOWED: [&'static str; 2] = ["lambdaConfig", "s3"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::LambdaConfig => "lambdaConfig",
            Location::S3 => "s3",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = EnvVarsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lambdaConfig" => Ok(Location::LambdaConfig),
            "s3" => Ok(Location::S3),
            other => Err(EnvVarsError::InvalidLocation {
                location: other.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// S3 reference
// ---------------------------------------------------------------------------

/// Reference to a JSON document in S3. All fields are required for an S3
/// lookup; they are optional here so partial defaults can be expressed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl S3Config {
    /// Build a complete reference.
    pub fn new(
        bucket_name: impl Into<String>,
        bucket_region: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            bucket_name: Some(bucket_name.into()),
            bucket_region: Some(bucket_region.into()),
            file_name: Some(file_name.into()),
        }
    }

    /// Names of the required fields that are absent or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("bucketName", &self.bucket_name),
            ("bucketRegion", &self.bucket_region),
            ("fileName", &self.file_name),
        ]
        .into_iter()
        .filter(|(_, v)| v.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }

    /// The composite cache key, or `None` if any field is missing.
    pub fn document_key(&self) -> Option<DocumentKey> {
        match (&self.bucket_name, &self.bucket_region, &self.file_name) {
            (Some(b), Some(r), Some(f)) if !b.is_empty() && !r.is_empty() && !f.is_empty() => {
                Some(DocumentKey::new(b.as_str(), r.as_str(), f.as_str()))
            }
            _ => None,
        }
    }
}

/// Composite key identifying one S3 document: bucket, region and object key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    pub bucket_name: String,
    pub bucket_region: String,
    pub file_name: String,
}

impl DocumentKey {
    pub fn new(
        bucket_name: impl Into<String>,
        bucket_region: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            bucket_region: bucket_region.into(),
            file_name: file_name.into(),
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "s3://{}/{} ({})",
            self.bucket_name, self.file_name, self.bucket_region
        )
    }
}

// ---------------------------------------------------------------------------
// Lookup configuration
// ---------------------------------------------------------------------------

/// Raw lookup configuration as supplied by a caller or the instance default.
///
/// `location` is kept as a string so that unknown values surface as
/// [`EnvVarsError::InvalidLocation`] during validation rather than as a
/// deserialisation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_config: Option<S3Config>,
}

impl LookupConfig {
    /// An override that sets nothing; every field falls back to the default.
    pub fn empty() -> Self {
        Self {
            location: None,
            s3_config: None,
        }
    }

    /// An override selecting the S3 location with the given reference.
    pub fn s3(s3_config: S3Config) -> Self {
        Self {
            location: Some(Location::S3.as_str().to_owned()),
            s3_config: Some(s3_config),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl Default for LookupConfig {
    /// The instance default: environment lookups, no S3 reference.
    fn default() -> Self {
        Self {
            location: Some(Location::LambdaConfig.as_str().to_owned()),
            s3_config: Some(S3Config::default()),
        }
    }
}

/// Validated, merged configuration for a single lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub location: Location,
    pub s3_config: S3Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_parses_allowed_values() {
        for s in Location::ALLOWED {
            let loc: Location = s.parse().unwrap();
            assert_eq!(loc.to_string(), s);
        }
    }

    #[test]
    fn location_rejects_unknown() {
        let err = "dynamo".parse::<Location>().unwrap_err();
        assert_eq!(err.kind(), "invalid_location");
    }

    #[test]
    fn missing_fields_treats_empty_as_missing() {
        let cfg = S3Config {
            bucket_name: Some(String::new()),
            bucket_region: Some("eu-west-1".into()),
            file_name: None,
        };
        assert_eq!(cfg.missing_fields(), vec!["bucketName", "fileName"]);
        assert!(cfg.document_key().is_none());
    }

    #[test]
    fn complete_config_yields_key() {
        let cfg = S3Config::new("b", "r", "f.json");
        assert!(cfg.missing_fields().is_empty());
        assert_eq!(cfg.document_key(), Some(DocumentKey::new("b", "r", "f.json")));
    }

    #[test]
    fn lookup_config_uses_camel_case() {
        let cfg: LookupConfig = serde_json::from_str(
            r#"{"location":"s3","s3Config":{"bucketName":"b","bucketRegion":"r","fileName":"f"}}"#,
        )
        .unwrap();
        assert_eq!(cfg, LookupConfig::s3(S3Config::new("b", "r", "f")));
    }

    #[test]
    fn default_is_lambda_config() {
        let cfg = LookupConfig::default();
        assert_eq!(cfg.location.as_deref(), Some("lambdaConfig"));
        assert_eq!(cfg.s3_config, Some(S3Config::default()));
    }

    #[test]
    fn document_key_display() {
        let key = DocumentKey::new("b", "us-east-1", "vars.json");
        assert_eq!(key.to_string(), "s3://b/vars.json (us-east-1)");
    }
}
