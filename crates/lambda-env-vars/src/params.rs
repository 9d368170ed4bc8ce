//! Merging and validation of per-call lookup configuration.

use common::{EnvVarsError, Location, LookupConfig, ResolvedConfig};

/// Overlay `call` onto `default` and validate the result.
///
/// The overlay is shallow: a call-supplied `s3_config` replaces the default
/// one wholesale. The merged location must be a known [`Location`].
///
/// When the *call* selects `"s3"`, the *call's* own `s3_config` must be
/// complete; an S3 reference inherited from `default` does not satisfy it.
///
/// # Errors
///
/// - [`EnvVarsError::InvalidLocation`] if the merged location is unknown or unset.
/// - [`EnvVarsError::MissingS3Config`] if the call asks for S3 without a full reference.
pub fn validate(
    call: &LookupConfig,
    default: &LookupConfig,
) -> Result<ResolvedConfig, EnvVarsError> {
    let location = call
        .location
        .as_deref()
        .or(default.location.as_deref())
        .unwrap_or_default()
        .parse::<Location>()?;

    if call.location.as_deref() == Some(Location::S3.as_str()) {
        let missing = match &call.s3_config {
            Some(s3) => s3.missing_fields(),
            None => vec!["bucketName", "bucketRegion", "fileName"],
        };
        if !missing.is_empty() {
            return Err(EnvVarsError::MissingS3Config { missing });
        }
    }

    let s3_config = call
        .s3_config
        .clone()
        .or_else(|| default.s3_config.clone())
        .unwrap_or_default();

    Ok(ResolvedConfig {
        location,
        s3_config,
    })
}
