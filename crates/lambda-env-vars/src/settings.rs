//! Construction-time settings loaded from `ENV_VARS_*` environment variables.
//!
//! These only configure the helper itself: the default lookup location, AWS
//! wiring, and logging. The variables being looked up are read separately
//! through [`crate::env::Environment`].

use anyhow::{Context, Result};
use common::{LookupConfig, S3Config};
use serde::Deserialize;

/// Prefix shared by every settings variable.
pub const ENV_PREFIX: &str = "ENV_VARS";

/// Validated helper settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Default lookup location (`lambdaConfig` or `s3`).
    #[serde(default = "default_location")]
    pub location: String,

    /// Default S3 bucket holding the variables document.
    #[serde(default)]
    pub s3_bucket_name: Option<String>,

    /// Region of the default S3 bucket.
    #[serde(default)]
    pub s3_bucket_region: Option<String>,

    /// Object key of the default variables document.
    #[serde(default)]
    pub s3_file_name: Option<String>,

    /// Bind KMS decryption to `AWS_LAMBDA_FUNCTION_NAME`, as required for
    /// variables encrypted with the Lambda console helpers.
    #[serde(default)]
    pub kms_lambda_context: bool,

    /// Endpoint override for all AWS services (LocalStack etc.).
    #[serde(default)]
    pub aws_endpoint_url: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// OTLP endpoint for trace export; logs only when unset.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,
}

fn default_location() -> String {
    "lambdaConfig".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            location: default_location(),
            s3_bucket_name: None,
            s3_bucket_region: None,
            s3_file_name: None,
            kms_lambda_context: false,
            aws_endpoint_url: None,
            log_level: default_log_level(),
            otel_exporter_otlp_endpoint: None,
        }
    }
}

impl Settings {
    /// Load and validate settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("failed to build settings from environment")?;

        let s: Settings = cfg
            .try_deserialize()
            .context("failed to deserialise settings")?;

        s.validate()?;
        Ok(s)
    }

    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.log_level, "ENV_VARS_LOG_LEVEL")?;
        if let Some(url) = &self.aws_endpoint_url {
            ensure_non_empty(url, "ENV_VARS_AWS_ENDPOINT_URL")?;
        }
        if let Some(endpoint) = &self.otel_exporter_otlp_endpoint {
            ensure_non_empty(endpoint, "ENV_VARS_OTEL_EXPORTER_OTLP_ENDPOINT")?;
        }
        Ok(())
    }

    /// The instance-wide default [`LookupConfig`] described by these settings.
    ///
    /// The location is passed through unparsed; an unknown value is reported
    /// on the first lookup rather than here.
    pub fn lookup_defaults(&self) -> LookupConfig {
        LookupConfig {
            location: Some(self.location.clone()),
            s3_config: Some(S3Config {
                bucket_name: self.s3_bucket_name.clone(),
                bucket_region: self.s3_bucket_region.clone(),
                file_name: self.s3_file_name.clone(),
            }),
        }
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} must not be empty");
    }
    Ok(())
}
