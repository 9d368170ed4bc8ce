//! Error types shared across crates.

use thiserror::Error;

use crate::lookup::DocumentKey;

/// Errors surfaced by every public lookup operation.
///
/// All variants are per-call and recoverable; nothing here is fatal to the
/// hosting process. Collaborator failures are never retried.
#[derive(Debug, Error)]
pub enum EnvVarsError {
    /// The requested (or defaulted) location is not one of the supported values.
    #[error("invalid location \"{location}\": must be one of lambdaConfig, s3")]
    InvalidLocation { location: String },

    /// `location: "s3"` was requested without a complete object-store reference.
    #[error(
        "s3Config must provide bucketName, bucketRegion and fileName (missing: {})",
        .missing.join(", ")
    )]
    MissingS3Config { missing: Vec<&'static str> },

    /// The fetched object is not a JSON object document.
    #[error("document {key} is not a valid JSON object: {source}")]
    MalformedDocument {
        key: DocumentKey,
        #[source]
        source: serde_json::Error,
    },

    /// The decryption service rejected the ciphertext, or it could not be decoded.
    #[error("failed to decrypt variable {name}: {source}")]
    DecryptionFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// Transport or access failure reported by the object store.
    #[error("failed to fetch document {key}: {source}")]
    ObjectStore {
        key: DocumentKey,
        #[source]
        source: anyhow::Error,
    },
}

impl EnvVarsError {
    /// Short machine-readable code for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            EnvVarsError::InvalidLocation { .. } => "invalid_location",
            EnvVarsError::MissingS3Config { .. } => "missing_s3_config",
            EnvVarsError::MalformedDocument { .. } => "malformed_document",
            EnvVarsError::DecryptionFailed { .. } => "decryption_failed",
            EnvVarsError::ObjectStore { .. } => "object_store",
        }
    }
}
