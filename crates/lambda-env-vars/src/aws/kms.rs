//! KMS decryption of encrypted environment variables.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_kms::primitives::Blob;

/// Encryption-context key the Lambda console binds to encrypted variables.
pub const LAMBDA_FUNCTION_CONTEXT_KEY: &str = "LambdaFunctionName";

/// Decrypts raw ciphertext blobs into plaintext bytes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Decrypter: Send + Sync {
    async fn decrypt(&self, ciphertext: Vec<u8>) -> Result<Vec<u8>>;
}

/// [`Decrypter`] backed by AWS KMS.
#[derive(Clone, Debug)]
pub struct KmsDecrypter {
    client: aws_sdk_kms::Client,
    encryption_context: Option<HashMap<String, String>>,
}

impl KmsDecrypter {
    pub fn new(client: aws_sdk_kms::Client) -> Self {
        Self {
            client,
            encryption_context: None,
        }
    }

    /// Attach an encryption-context pair sent with every decrypt call.
    pub fn with_encryption_context(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.encryption_context
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Bind decryption to the running function, as console-encrypted
    /// variables require. No-op outside Lambda (`function_name` is `None`).
    pub fn with_lambda_function_context(self, function_name: Option<String>) -> Self {
        match function_name {
            Some(name) if !name.is_empty() => {
                self.with_encryption_context(LAMBDA_FUNCTION_CONTEXT_KEY, name)
            }
            _ => self,
        }
    }
}

#[async_trait]
impl Decrypter for KmsDecrypter {
    async fn decrypt(&self, ciphertext: Vec<u8>) -> Result<Vec<u8>> {
        let resp = self
            .client
            .decrypt()
            .ciphertext_blob(Blob::new(ciphertext))
            .set_encryption_context(self.encryption_context.clone())
            .send()
            .await
            .context("KMS decrypt call failed")?;

        let plaintext = resp
            .plaintext()
            .context("KMS decrypt response contained no plaintext")?;

        Ok(plaintext.as_ref().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> aws_sdk_kms::Client {
        let conf = aws_sdk_kms::Config::builder()
            .behavior_version(aws_sdk_kms::config::BehaviorVersion::latest())
            .region(aws_sdk_kms::config::Region::new("us-east-1"))
            .build();
        aws_sdk_kms::Client::from_conf(conf)
    }

    #[test]
    fn no_context_by_default() {
        let d = KmsDecrypter::new(client());
        assert!(d.encryption_context.is_none());
    }

    #[test]
    fn lambda_context_uses_function_name() {
        let d = KmsDecrypter::new(client()).with_lambda_function_context(Some("my-fn".into()));
        let ctx = d.encryption_context.unwrap();
        assert_eq!(ctx.get(LAMBDA_FUNCTION_CONTEXT_KEY).map(String::as_str), Some("my-fn"));
    }

    #[test]
    fn lambda_context_skipped_without_function_name() {
        let d = KmsDecrypter::new(client())
            .with_lambda_function_context(None)
            .with_lambda_function_context(Some(String::new()));
        assert!(d.encryption_context.is_none());
    }
}
