//! Property resolution queries.
//!
//! [`Properties`] answers existence, declaring/appearing class and type
//! questions for `Class::$name` identifiers against a [`ClassLikeStore`],
//! and forwards "method references property" edges to a [`ReferenceRecorder`].
//!
//! Two side channels are kept apart:
//! - edges to the recorder are written on every existence check that has a
//!   calling method, hit or miss;
//! - referencing locations are appended to the declaring property's storage
//!   only while `collect_references` is enabled.

use std::sync::Arc;

use tracing::{debug, error, trace, warn};

use super::config::AnalysisConfig;
use super::error::{PropertyError, PropertyResult};
use super::graphs::ReferenceRecorder;
use super::metadata::ClassLikeMetadata;
use super::property_id::{PropertyId, reference_key};
use super::storage::{PropertyStorage, ReferencingLocations};
use super::store::ClassLikeStore;
use super::ttype::Type;
use super::ClassName;
use crate::base::CodeLocation;

/// Resolver for class-like properties within one analysis run.
pub struct Properties<'a> {
    store: &'a dyn ClassLikeStore,
    references: &'a dyn ReferenceRecorder,
    config: AnalysisConfig,
}

impl<'a> Properties<'a> {
    pub fn new(store: &'a dyn ClassLikeStore, references: &'a dyn ReferenceRecorder) -> Self {
        Self::with_config(store, references, AnalysisConfig::default())
    }

    pub fn with_config(
        store: &'a dyn ClassLikeStore,
        references: &'a dyn ReferenceRecorder,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            store,
            references,
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn collect_references(&self) -> bool {
        self.config.collect_references
    }

    /// Toggle location collection. Only affects calls made afterwards.
    pub fn set_collect_references(&mut self, collect_references: bool) {
        debug!(
            "[PROPERTIES] collect_references: {} -> {}",
            self.config.collect_references, collect_references
        );
        self.config.collect_references = collect_references;
    }

    // ============================================================
    // Existence
    // ============================================================

    /// Whether a property exists on a class-like.
    ///
    /// With a `calling_method_id`, records an edge to the declaring class's
    /// member when found, or to the queried class's member when not found,
    /// so references to unknown properties stay discoverable.
    pub fn property_exists(
        &self,
        property_id: &str,
        calling_method_id: Option<&str>,
        code_location: Option<&CodeLocation>,
    ) -> PropertyResult<bool> {
        let id = PropertyId::parse(property_id)?;
        let property_name = id.property_name();
        let class_storage = self.store.get(id.class_name())?;
        let calling_method_id = calling_method_id.filter(|m| !m.is_empty());

        let Some(declaring_class) = class_storage.declaring_class_of(property_name) else {
            trace!("[PROPERTIES] {} does not exist", id);
            if let Some(calling_method_id) = calling_method_id {
                self.references
                    .add_reference_to_class_member(calling_method_id, &id.reference_key());
            }
            return Ok(false);
        };

        if let Some(calling_method_id) = calling_method_id {
            self.references.add_reference_to_class_member(
                calling_method_id,
                &reference_key(declaring_class, property_name),
            );
        }

        if self.config.collect_references {
            if let Some(location) = code_location {
                let (_, storage) = self.declared_storage(&id, &class_storage)?;
                trace!("[PROPERTIES] {} referenced at {}", id, location);
                storage.add_referencing_location(location.clone());
            }
        }

        Ok(true)
    }

    // ============================================================
    // Declaring / appearing class
    // ============================================================

    /// The class-like that physically declares the property (possibly a trait).
    pub fn declaring_class_for_property(
        &self,
        property_id: &str,
    ) -> PropertyResult<Option<ClassName>> {
        let id = PropertyId::parse(property_id)?;
        let class_storage = self.store.get(id.class_name())?;

        Ok(class_storage.declaring_class_of(id.property_name()).cloned())
    }

    /// The class the property appears on, as opposed to the trait that may
    /// declare it.
    pub fn appearing_class_for_property(
        &self,
        property_id: &str,
    ) -> PropertyResult<Option<ClassName>> {
        let id = PropertyId::parse(property_id)?;
        let class_storage = self.store.get(id.class_name())?;

        Ok(class_storage
            .appearing_property_id(id.property_name())
            .map(|appearing| ClassName::new(appearing.class_name())))
    }

    // ============================================================
    // Storage and type
    // ============================================================

    /// Storage of the property on its declaring class-like.
    pub fn property_storage(&self, property_id: &str) -> PropertyResult<Arc<PropertyStorage>> {
        let id = PropertyId::parse(property_id)?;
        let class_storage = self.store.get(id.class_name())?;
        let (_, storage) = self.declared_storage(&id, &class_storage)?;
        Ok(storage)
    }

    /// Locations collected for the property so far; `None` if none were
    /// ever collected.
    pub fn referencing_locations(
        &self,
        property_id: &str,
    ) -> PropertyResult<Option<ReferencingLocations>> {
        Ok(self.property_storage(property_id)?.referencing_locations())
    }

    /// Resolved type of the property for reads, or for writes when `for_write`.
    ///
    /// Precedence: pseudo-accessor type for the direction, then the declared
    /// type, then the first type found walking the overridden declarations in
    /// recorded order. `Ok(None)` means the property has no resolvable type.
    pub fn property_type(&self, property_id: &str, for_write: bool) -> PropertyResult<Option<Type>> {
        let id = PropertyId::parse(property_id)?;
        let mut active = Vec::new();
        self.resolve_type(&id, for_write, &mut active)
    }

    fn resolve_type(
        &self,
        id: &PropertyId,
        for_write: bool,
        active: &mut Vec<PropertyId>,
    ) -> PropertyResult<Option<Type>> {
        if active.contains(id) {
            warn!("[PROPERTIES] override cycle through {}, skipping", id);
            return Ok(None);
        }

        let property_name = id.property_name();
        let class_storage = self.store.get(id.class_name())?;
        let (declaring_storage, storage) = self.declared_storage(id, &class_storage)?;

        let pseudo_type = class_storage
            .pseudo_property_type(property_name, for_write)
            .or_else(|| declaring_storage.pseudo_property_type(property_name, for_write));
        if let Some(pseudo_type) = pseudo_type {
            trace!("[PROPERTIES] {} pseudo type {}", id, pseudo_type);
            return Ok(Some(pseudo_type.clone()));
        }

        if let Some(ty) = storage.ty() {
            return Ok(Some(ty.clone()));
        }

        let overridden = class_storage.overridden_property_ids(property_name);
        if overridden.is_empty() {
            return Ok(None);
        }

        active.push(id.clone());
        let mut resolved = None;
        for overridden_id in overridden {
            trace!("[PROPERTIES] {} untyped, trying {}", id, overridden_id);
            resolved = self.resolve_type(overridden_id, for_write, active)?;
            if resolved.is_some() {
                break;
            }
        }
        active.pop();

        Ok(resolved)
    }

    /// Find the declaring class-like and its storage for a property known to
    /// `class_storage`.
    fn declared_storage(
        &self,
        id: &PropertyId,
        class_storage: &ClassLikeMetadata,
    ) -> PropertyResult<(Arc<ClassLikeMetadata>, Arc<PropertyStorage>)> {
        let property_name = id.property_name();
        let Some(declaring_class) = class_storage.declaring_class_of(property_name) else {
            return Err(PropertyError::property_not_found(id));
        };

        let declaring_storage = self.store.get(declaring_class)?;
        let Some(storage) = declaring_storage.property(property_name).cloned() else {
            error!(
                "[PROPERTIES] {} is declared by {} but has no storage there",
                id, declaring_class
            );
            return Err(PropertyError::inconsistent(id, declaring_class.clone()));
        };

        Ok((declaring_storage, storage))
    }
}
