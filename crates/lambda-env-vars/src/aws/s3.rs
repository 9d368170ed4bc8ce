//! S3 object fetches for JSON variable documents.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::config::Region;
use bytes::Bytes;
use tracing::debug;

/// Fetches a whole object from a bucket in a given region.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, bucket: &str, region: &str, key: &str) -> Result<Bytes>;
}

/// [`ObjectStore`] backed by AWS S3.
#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    sdk_config: SdkConfig,
}

impl S3ObjectStore {
    pub fn new(sdk_config: SdkConfig) -> Self {
        Self { sdk_config }
    }

    /// Build a client pinned to `region`, keeping any endpoint override.
    fn client(&self, region: &str) -> aws_sdk_s3::Client {
        let mut builder =
            aws_sdk_s3::config::Builder::from(&self.sdk_config).region(Region::new(region.to_owned()));

        // Emulators such as LocalStack and MinIO only serve path-style URLs.
        if let Some(endpoint) = self.sdk_config.endpoint_url() {
            debug!(endpoint, "using custom S3 endpoint");
            builder = builder.force_path_style(true);
        }

        aws_sdk_s3::Client::from_conf(builder.build())
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, region: &str, key: &str) -> Result<Bytes> {
        let get = self
            .client(region)
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("failed to fetch s3://{bucket}/{key}"))?;

        let body = get
            .body
            .collect()
            .await
            .with_context(|| format!("failed to read body for s3://{bucket}/{key}"))?
            .into_bytes();

        Ok(body)
    }
}
