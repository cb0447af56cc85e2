//! Per-property storage owned by the declaring class-like.

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;

use super::ttype::Type;
use crate::base::CodeLocation;

/// Collected reference locations, grouped by source file in first-seen order.
pub type ReferencingLocations = IndexMap<SmolStr, Vec<CodeLocation>, FxBuildHasher>;

/// Storage record for a property, held by the class-like that declares it.
///
/// Everything except `referencing_locations` is fixed for the analysis pass.
/// The location map sits behind a lock so metadata can be shared through
/// `Arc` while references are accumulated.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyStorage {
    /// Declared or inferred type; `None` when the property is untyped
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    ty: Option<Type>,

    /// `None` until the first reference is collected
    #[cfg_attr(feature = "serde", serde(skip))]
    referencing_locations: RwLock<Option<ReferencingLocations>>,
}

impl PropertyStorage {
    pub fn new(ty: Option<Type>) -> Self {
        Self {
            ty,
            referencing_locations: RwLock::new(None),
        }
    }

    pub fn typed(ty: Type) -> Self {
        Self::new(Some(ty))
    }

    pub fn untyped() -> Self {
        Self::new(None)
    }

    pub fn ty(&self) -> Option<&Type> {
        self.ty.as_ref()
    }

    /// Append a referencing location under its file, creating the map on
    /// first use.
    pub fn add_referencing_location(&self, location: CodeLocation) {
        let mut guard = self.referencing_locations.write();
        guard
            .get_or_insert_with(ReferencingLocations::default)
            .entry(location.file_path.clone())
            .or_default()
            .push(location);
    }

    /// Snapshot of the collected locations; `None` if collection never ran
    /// for this property.
    pub fn referencing_locations(&self) -> Option<ReferencingLocations> {
        self.referencing_locations.read().clone()
    }

    pub fn has_collected_references(&self) -> bool {
        self.referencing_locations.read().is_some()
    }

    /// Drop collected locations, returning to the "never collected" state.
    pub fn clear_referencing_locations(&self) {
        *self.referencing_locations.write() = None;
    }
}

impl Clone for PropertyStorage {
    fn clone(&self) -> Self {
        Self {
            ty: self.ty.clone(),
            referencing_locations: RwLock::new(self.referencing_locations.read().clone()),
        }
    }
}
