//! [`DecryptedCache`]: decrypted plaintext keyed by variable name.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Thread-safe map from variable name to decrypted plaintext.
///
/// Entries are never evicted. Once a name is decrypted its plaintext is served
/// from here for the rest of the process, even if the underlying encrypted
/// value changes.
#[derive(Clone, Debug, Default)]
pub struct DecryptedCache {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl DecryptedCache {
    /// Create a new, empty [`DecryptedCache`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone the cached plaintext for `name`, if any.
    pub async fn get(&self, name: &str) -> Option<String> {
        self.inner.read().await.get(name).cloned()
    }

    /// Store (or overwrite) the plaintext for `name`.
    pub async fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.write().await.insert(name.into(), value.into());
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.inner.read().await.contains_key(name)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
