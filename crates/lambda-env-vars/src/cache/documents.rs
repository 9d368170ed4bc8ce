//! In-memory cache of parsed S3 documents, keyed by bucket, region and file.
//!
//! Documents are fetched at most once per key in normal operation and never
//! refreshed. Reads go through `arc-swap` and never block.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use common::{Document, DocumentKey};

/// Shared, lock-free cache of parsed documents.
///
/// Inserts copy the map and swap it in with [`ArcSwap::rcu`]. Two concurrent
/// inserts for the same key both succeed and the later one wins; both hold
/// the same parsed content, so either is correct.
#[derive(Clone, Debug)]
pub struct DocumentCache {
    inner: Arc<ArcSwap<HashMap<DocumentKey, Arc<Document>>>>,
}

impl DocumentCache {
    /// Create a new, empty [`DocumentCache`].
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ArcSwap::new(Arc::new(HashMap::new()))),
        }
    }

    /// Return the number of documents currently cached.
    pub fn len(&self) -> usize {
        self.inner.load().len()
    }

    /// Return `true` if no documents are cached.
    pub fn is_empty(&self) -> bool {
        self.inner.load().is_empty()
    }

    /// Look up a document by its composite key.
    pub fn get(&self, key: &DocumentKey) -> Option<Arc<Document>> {
        self.inner.load().get(key).cloned()
    }

    /// Add `document` under `key` and return the shared handle.
    pub fn insert(&self, key: DocumentKey, document: Document) -> Arc<Document> {
        let document = Arc::new(document);
        self.inner.rcu(|current| {
            let mut next = HashMap::clone(current);
            next.insert(key.clone(), Arc::clone(&document));
            next
        });
        document
    }
}

impl Default for DocumentCache {
    fn default() -> Self {
        Self::new()
    }
}
