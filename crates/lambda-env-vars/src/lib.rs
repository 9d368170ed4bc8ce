//! `lambda-env-vars`: configuration lookups for AWS Lambda functions.
//!
//! Values come from three places:
//!
//! - plain environment variables ([`LambdaEnvVars::get_plain_value`]),
//! - KMS-encrypted environment variables, decrypted once per process
//!   ([`LambdaEnvVars::get_value`] with the default `lambdaConfig` location),
//! - JSON documents in S3, fetched once per bucket/region/file
//!   ([`LambdaEnvVars::get_value`] with `location: "s3"`).
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use lambda_env_vars::{LambdaEnvVars, LookupConfig};
//!
//! let vars = LambdaEnvVars::from_env().await?;
//! let password = vars.get_value("DB_PASSWORD", &LookupConfig::empty()).await?;
//! # Ok(())
//! # }
//! ```

pub mod aws;
pub mod cache;
pub mod env;
pub mod lookup;
pub mod params;
pub mod settings;
pub mod telemetry;

pub use cache::ValueCache;
pub use common::{
    ConfigValue, Document, DocumentKey, EnvVarsError, Location, LookupConfig, ResolvedConfig,
    S3Config,
};
pub use env::{Environment, ProcessEnvironment};
pub use lookup::LambdaEnvVars;
pub use settings::Settings;
