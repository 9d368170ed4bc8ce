//! [`LambdaEnvVars`]: the public lookup entry points.
//!
//! A lookup is dispatched on its validated [`Location`]:
//!
//! - `lambdaConfig`: the environment value is treated as base64 KMS
//!   ciphertext, decrypted once, and cached by variable name.
//! - `s3`: the referenced JSON document is fetched once, cached by
//!   bucket/region/file, and the variable is read from it.
//!
//! [`LambdaEnvVars::get_plain_value`] bypasses both and reads the environment.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use futures_util::future::try_join_all;
use tracing::{debug, info, warn};

use common::{ConfigValue, Document, EnvVarsError, Location, LookupConfig, S3Config};

use crate::aws::{AwsClients, Decrypter, ObjectStore};
use crate::cache::ValueCache;
use crate::env::{Environment, ProcessEnvironment};
use crate::params;
use crate::settings::Settings;

/// Cached variable lookups over the environment, KMS, and S3.
///
/// Cheap to clone; clones share collaborators and caches.
#[derive(Clone)]
pub struct LambdaEnvVars {
    env: Arc<dyn Environment>,
    decrypter: Arc<dyn Decrypter>,
    store: Arc<dyn ObjectStore>,
    cache: ValueCache,
    defaults: LookupConfig,
}

impl LambdaEnvVars {
    /// Assemble a lookup instance from explicit parts.
    pub fn new(
        env: Arc<dyn Environment>,
        decrypter: Arc<dyn Decrypter>,
        store: Arc<dyn ObjectStore>,
        cache: ValueCache,
        defaults: LookupConfig,
    ) -> Self {
        Self {
            env,
            decrypter,
            store,
            cache,
            defaults,
        }
    }

    /// Production wiring: process environment, AWS clients, and the
    /// process-wide cache.
    pub fn from_clients(aws: &AwsClients, settings: &Settings) -> Self {
        let mut decrypter = aws.decrypter();
        if settings.kms_lambda_context {
            decrypter = decrypter
                .with_lambda_function_context(std::env::var("AWS_LAMBDA_FUNCTION_NAME").ok());
        }

        Self::new(
            Arc::new(ProcessEnvironment),
            Arc::new(decrypter),
            Arc::new(aws.object_store()),
            ValueCache::process(),
            settings.lookup_defaults(),
        )
    }

    /// Load [`Settings`] and AWS configuration from the environment and wire
    /// a production instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the SDK config cannot load.
    pub async fn from_env() -> anyhow::Result<Self> {
        let settings = Settings::from_env()?;
        let aws = AwsClients::init(settings.aws_endpoint_url.as_deref()).await?;
        Ok(Self::from_clients(&aws, &settings))
    }

    /// The instance-wide default configuration that per-call overrides sit on.
    pub fn defaults(&self) -> &LookupConfig {
        &self.defaults
    }

    /// The caches backing this instance.
    pub fn cache(&self) -> &ValueCache {
        &self.cache
    }

    /// Return the raw environment value for `name`, or `""` if unset.
    pub fn get_plain_value(&self, name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }
        self.env.var(name).unwrap_or_default()
    }

    /// Resolve `name` according to `call` overlaid on the instance defaults.
    ///
    /// Environment lookups always yield `Some`; an unset variable yields an
    /// empty string. S3 lookups yield `None` when the document has no such key.
    ///
    /// # Errors
    ///
    /// Validation errors, decryption failures, and object-store failures are
    /// returned as-is; nothing is retried.
    pub async fn get_value(
        &self,
        name: &str,
        call: &LookupConfig,
    ) -> Result<Option<ConfigValue>, EnvVarsError> {
        let resolved = params::validate(call, &self.defaults)?;

        match resolved.location {
            Location::S3 => self.resolve_from_store(name, &resolved.s3_config).await,
            Location::LambdaConfig => {
                if let Some(cached) = self.cache.decrypted.get(name).await {
                    debug!(variable = name, "decrypted variable served from cache");
                    return Ok(Some(ConfigValue::String(cached)));
                }

                let encrypted = self.get_plain_value(name);
                if encrypted.is_empty() {
                    return Ok(Some(ConfigValue::String(String::new())));
                }

                let plaintext = self.decrypt_value(name, &encrypted).await?;
                Ok(Some(ConfigValue::String(
                    self.set_cached_value(name, plaintext).await,
                )))
            }
        }
    }

    /// Resolve every name in `names` concurrently.
    ///
    /// Results are keyed by name, so completion order does not matter.
    ///
    /// # Errors
    ///
    /// Fails as a whole with the first error any single lookup produces.
    pub async fn get_value_list<S: AsRef<str> + Sync>(
        &self,
        names: &[S],
        call: &LookupConfig,
    ) -> Result<HashMap<String, Option<ConfigValue>>, EnvVarsError> {
        let lookups = names.iter().map(|name| async move {
            let name = name.as_ref();
            let value = self.get_value(name, call).await?;
            Ok::<_, EnvVarsError>((name.to_owned(), value))
        });

        Ok(try_join_all(lookups).await?.into_iter().collect())
    }

    /// Store `value` as the decrypted plaintext for `name` and return it.
    pub async fn set_cached_value(&self, name: &str, value: String) -> String {
        self.cache.decrypted.insert(name, value.clone()).await;
        value
    }

    /// Decrypt the base64 ciphertext currently stored in the environment
    /// under `name`. The result is not cached.
    ///
    /// # Errors
    ///
    /// Returns [`EnvVarsError::DecryptionFailed`] if the value is not base64
    /// or KMS rejects it.
    pub async fn decrypt(&self, name: &str) -> Result<String, EnvVarsError> {
        let encrypted = self.get_plain_value(name);
        self.decrypt_value(name, &encrypted).await
    }

    async fn decrypt_value(&self, name: &str, encrypted: &str) -> Result<String, EnvVarsError> {
        let failed = |source: anyhow::Error| EnvVarsError::DecryptionFailed {
            name: name.to_owned(),
            source,
        };

        let ciphertext = decode_ciphertext(encrypted)
            .context("value is not valid base64")
            .map_err(failed)?;

        let plaintext = self.decrypter.decrypt(ciphertext).await.map_err(|e| {
            warn!(variable = name, error = %e, "decryption failed");
            failed(e)
        })?;

        info!(variable = name, "variable decrypted");
        Ok(plaintext_to_text(plaintext))
    }

    /// Read `name` from the S3 document referenced by `s3`, fetching and
    /// caching the document on first use.
    ///
    /// Returns `None` if the document has no entry for `name`.
    ///
    /// # Errors
    ///
    /// - [`EnvVarsError::MissingS3Config`] if `s3` is incomplete.
    /// - [`EnvVarsError::ObjectStore`] if the fetch fails.
    /// - [`EnvVarsError::MalformedDocument`] if the body is not a JSON object.
    pub async fn resolve_from_store(
        &self,
        name: &str,
        s3: &S3Config,
    ) -> Result<Option<ConfigValue>, EnvVarsError> {
        let key = s3.document_key().ok_or_else(|| EnvVarsError::MissingS3Config {
            missing: s3.missing_fields(),
        })?;

        let document = match self.cache.documents.get(&key) {
            Some(doc) => {
                debug!(document = %key, "document served from cache");
                doc
            }
            None => {
                let body = self
                    .store
                    .get_object(&key.bucket_name, &key.bucket_region, &key.file_name)
                    .await
                    .map_err(|source| {
                        warn!(document = %key, error = %source, "document fetch failed");
                        EnvVarsError::ObjectStore {
                            key: key.clone(),
                            source,
                        }
                    })?;

                let parsed: Document = serde_json::from_slice(&body).map_err(|source| {
                    EnvVarsError::MalformedDocument {
                        key: key.clone(),
                        source,
                    }
                })?;

                info!(document = %key, entries = parsed.len(), "document fetched");
                self.cache.documents.insert(key, parsed)
            }
        };

        Ok(document.get(name).cloned())
    }
}

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Decode base64 ciphertext, accepting padded or unpadded input in either
/// the standard or URL-safe alphabet.
fn decode_ciphertext(encrypted: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let encrypted = encrypted.trim();
    STANDARD_LENIENT
        .decode(encrypted)
        .or_else(|_| URL_SAFE_LENIENT.decode(encrypted))
}

/// Plaintext as text. Valid UTF-8 is kept as-is; anything else is read as
/// 7-bit ASCII with the high bit of each byte cleared.
fn plaintext_to_text(plaintext: Vec<u8>) -> String {
    match String::from_utf8(plaintext) {
        Ok(text) => text,
        Err(e) => e.as_bytes().iter().map(|b| char::from(b & 0x7f)).collect(),
    }
}
