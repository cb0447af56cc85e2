//! Class-like metadata lookup.
//!
//! The store is built by an earlier construction phase; the resolver only
//! reads from it through [`ClassLikeStore`].

use std::sync::Arc;

use tracing::debug;

use super::error::{PropertyError, PropertyResult};
use super::metadata::ClassLikeMetadata;
use super::{ClassName, FxIndexMap};

/// Source of per-pass class-like metadata.
pub trait ClassLikeStore: Send + Sync {
    /// Look up a class-like by fully-qualified name.
    ///
    /// Fails with [`PropertyError::ClassNotFound`] when the name is unknown.
    fn get(&self, fq_class_name: &str) -> PropertyResult<Arc<ClassLikeMetadata>>;
}

impl<T: ClassLikeStore + ?Sized> ClassLikeStore for Arc<T> {
    fn get(&self, fq_class_name: &str) -> PropertyResult<Arc<ClassLikeMetadata>> {
        (**self).get(fq_class_name)
    }
}

impl<T: ClassLikeStore + ?Sized> ClassLikeStore for &T {
    fn get(&self, fq_class_name: &str) -> PropertyResult<Arc<ClassLikeMetadata>> {
        (**self).get(fq_class_name)
    }
}

/// In-memory store keyed by exact class name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClassLikeStore {
    classes: FxIndexMap<ClassName, Arc<ClassLikeMetadata>>,
}

impl InMemoryClassLikeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a class-like.
    pub fn insert(&mut self, metadata: ClassLikeMetadata) -> Arc<ClassLikeMetadata> {
        let metadata = Arc::new(metadata);
        if self
            .classes
            .insert(metadata.name.clone(), Arc::clone(&metadata))
            .is_some()
        {
            debug!("[STORE] replaced metadata for {}", metadata.name);
        }
        metadata
    }

    pub fn contains(&self, fq_class_name: &str) -> bool {
        self.classes.contains_key(fq_class_name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ClassLikeMetadata>> {
        self.classes.values()
    }
}

impl ClassLikeStore for InMemoryClassLikeStore {
    fn get(&self, fq_class_name: &str) -> PropertyResult<Arc<ClassLikeMetadata>> {
        self.classes
            .get(fq_class_name)
            .cloned()
            .ok_or_else(|| PropertyError::class_not_found(fq_class_name))
    }
}

impl FromIterator<ClassLikeMetadata> for InMemoryClassLikeStore {
    fn from_iter<I: IntoIterator<Item = ClassLikeMetadata>>(iter: I) -> Self {
        let mut store = Self::new();
        for metadata in iter {
            store.insert(metadata);
        }
        store
    }
}

#[cfg(feature = "serde")]
impl InMemoryClassLikeStore {
    /// Serialize every class-like, in insertion order. Collected reference
    /// locations are not part of the cache.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let classes: Vec<&ClassLikeMetadata> = self.classes.values().map(Arc::as_ref).collect();
        serde_json::to_string(&classes)
    }

    /// Rebuild a store from [`InMemoryClassLikeStore::to_json`] output.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let classes: Vec<ClassLikeMetadata> = serde_json::from_str(json)?;
        Ok(classes.into_iter().collect())
    }
}
