//! Process-lifetime caches for decrypted variables and S3 documents.
//!
//! # Lifecycle
//!
//! 1. The first call to [`ValueCache::process`] creates the shared instance.
//! 2. Every [`crate::LambdaEnvVars`] built with [`ValueCache::process`] sees
//!    the same entries, so a warm Lambda container reuses prior lookups.
//! 3. Entries are never evicted or refreshed; the cache lives until the
//!    process exits.
//!
//! # Invariants
//!
//! - Plaintext values are never logged.
//! - A failed decryption or fetch leaves the cache untouched.

pub mod decrypted;
pub mod documents;

pub use decrypted::DecryptedCache;
pub use documents::DocumentCache;

use std::sync::OnceLock;

static PROCESS_CACHE: OnceLock<ValueCache> = OnceLock::new();

/// Both caches, cheaply cloneable and shared between clones.
#[derive(Clone, Debug, Default)]
pub struct ValueCache {
    pub decrypted: DecryptedCache,
    pub documents: DocumentCache,
}

impl ValueCache {
    /// Create an isolated cache not shared with the rest of the process.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache, created on first use.
    pub fn process() -> Self {
        PROCESS_CACHE.get_or_init(ValueCache::new).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Document, DocumentKey};

    #[tokio::test]
    async fn process_cache_is_shared() {
        let a = ValueCache::process();
        let b = ValueCache::process();
        a.decrypted.insert("PROCESS_CACHE_SHARED", "v").await;
        assert_eq!(b.decrypted.get("PROCESS_CACHE_SHARED").await.as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn new_cache_is_isolated() {
        let shared = ValueCache::process();
        shared.decrypted.insert("PROCESS_CACHE_ISOLATED", "v").await;
        shared
            .documents
            .insert(DocumentKey::new("iso", "r", "f"), Document::new());

        let isolated = ValueCache::new();
        assert!(!isolated.decrypted.contains("PROCESS_CACHE_ISOLATED").await);
        assert!(isolated.documents.is_empty());
    }
}
