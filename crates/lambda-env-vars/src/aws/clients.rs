//! AWS SDK client bundle built from the ambient Lambda execution role.

use anyhow::Result;
use aws_config::{BehaviorVersion, SdkConfig};

use super::{KmsDecrypter, S3ObjectStore};

/// Shared SDK configuration plus the KMS client.
///
/// S3 clients are not created here because every document reference carries
/// its own bucket region; [`S3ObjectStore`] derives a regional client from
/// the shared [`SdkConfig`] per request.
#[derive(Clone, Debug)]
pub struct AwsClients {
    /// Resolved credentials, region, and optional endpoint override.
    pub sdk_config: SdkConfig,
    /// KMS client used to decrypt encrypted environment variables.
    pub kms: aws_sdk_kms::Client,
}

impl AwsClients {
    /// Load the SDK configuration from the standard credential chain.
    ///
    /// `endpoint_url` overrides the endpoint of every service, which is how
    /// LocalStack and other AWS emulators are targeted.
    ///
    /// # Errors
    ///
    /// Returns an error if the SDK config cannot be loaded.
    pub async fn init(endpoint_url: Option<&str>) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let sdk_config = loader.load().await;

        let kms = aws_sdk_kms::Client::new(&sdk_config);

        Ok(Self { sdk_config, kms })
    }

    /// A [`KmsDecrypter`] backed by the shared KMS client.
    pub fn decrypter(&self) -> KmsDecrypter {
        KmsDecrypter::new(self.kms.clone())
    }

    /// An [`S3ObjectStore`] that builds regional clients from the shared config.
    pub fn object_store(&self) -> S3ObjectStore {
        S3ObjectStore::new(self.sdk_config.clone())
    }
}
