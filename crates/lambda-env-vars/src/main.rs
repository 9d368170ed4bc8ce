//! `env-vars`: resolve variables the way a function would and print them.
//!
//! Startup sequence:
//! 1. Parse the command line.
//! 2. Load and validate [`Settings`] from `ENV_VARS_*` variables.
//! 3. Initialise the tracing subscriber (JSON logs on stderr, optional OTLP).
//! 4. Initialise AWS SDK clients and wire [`LambdaEnvVars`].
//! 5. Resolve every requested name and print a JSON object on stdout.

use std::collections::HashMap;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use lambda_env_vars::aws::AwsClients;
use lambda_env_vars::telemetry;
use lambda_env_vars::{ConfigValue, LambdaEnvVars, LookupConfig, S3Config, Settings};

#[derive(Parser, Debug)]
#[command(name = "env-vars")]
#[command(about = "Resolve plain, KMS-encrypted, or S3-hosted configuration values", long_about = None)]
struct Cli {
    /// Variable names to resolve
    #[arg(value_name = "NAME", required = true)]
    names: Vec<String>,

    /// Read the process environment only; never call KMS or S3
    #[arg(long, conflicts_with_all = ["location", "bucket_name", "bucket_region", "file_name"])]
    plain: bool,

    /// Lookup location for this call (`lambdaConfig` or `s3`)
    #[arg(long)]
    location: Option<String>,

    /// S3 bucket holding the variables document
    #[arg(long)]
    bucket_name: Option<String>,

    /// Region of the S3 bucket
    #[arg(long)]
    bucket_region: Option<String>,

    /// Object key of the variables document
    #[arg(long)]
    file_name: Option<String>,
}

impl Cli {
    /// Per-call override built from the flags; unset flags fall back to settings.
    fn lookup_config(&self) -> LookupConfig {
        let s3 = S3Config {
            bucket_name: self.bucket_name.clone(),
            bucket_region: self.bucket_region.clone(),
            file_name: self.file_name.clone(),
        };
        LookupConfig {
            location: self.location.clone(),
            s3_config: (s3 != S3Config::default()).then_some(s3),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: settings invalid: {e:#}");
        e
    })?;

    telemetry::init_telemetry(
        settings.otel_exporter_otlp_endpoint.as_deref(),
        &settings.log_level,
    )?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        names = cli.names.len(),
        "env-vars starting"
    );

    let aws = AwsClients::init(settings.aws_endpoint_url.as_deref()).await?;
    let vars = LambdaEnvVars::from_clients(&aws, &settings);

    let values: HashMap<String, Option<ConfigValue>> = if cli.plain {
        cli.names
            .iter()
            .map(|name| (name.clone(), Some(ConfigValue::String(vars.get_plain_value(name)))))
            .collect()
    } else {
        vars.get_value_list(&cli.names, &cli.lookup_config())
            .await
            .context("lookup failed")?
    };

    let out = serde_json::to_string_pretty(&values).context("failed to serialise values")?;
    println!("{out}");
    Ok(())
}
