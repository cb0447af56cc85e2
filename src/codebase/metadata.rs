//! Class-like metadata records consumed by the resolver.
//!
//! A [`ClassLikeMetadata`] describes one class, interface, trait or enum after
//! inheritance and trait composition have been flattened into it. The maps
//! are keyed by property name (without the `$`).

use std::sync::Arc;

use smol_str::SmolStr;
use tracing::trace;

use super::property_id::PropertyId;
use super::storage::PropertyStorage;
use super::ttype::Type;
use super::{ClassName, FxIndexMap};

/// The kind of class-like a metadata record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ClassLikeKind {
    #[default]
    Class,
    Interface,
    Trait,
    Enum,
}

/// Property maps for a single class-like.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassLikeMetadata {
    /// Fully-qualified name, original case
    pub name: ClassName,
    pub kind: ClassLikeKind,

    /// Property name → class-like that physically declares it (may be a trait)
    pub declaring_property_ids: FxIndexMap<SmolStr, ClassName>,

    /// Property name → the nearest property id through which it is visible
    pub appearing_property_ids: FxIndexMap<SmolStr, PropertyId>,

    /// Property name → ancestor declarations a local redeclaration overrides,
    /// in resolution priority order
    pub overridden_property_ids: FxIndexMap<SmolStr, Vec<PropertyId>>,

    /// Types from magic `__get` / `@property-read` style declarations
    pub pseudo_property_get_types: FxIndexMap<SmolStr, Type>,

    /// Types from magic `__set` / `@property-write` style declarations
    pub pseudo_property_set_types: FxIndexMap<SmolStr, Type>,

    /// Storage for properties declared directly in this class-like
    pub properties: FxIndexMap<SmolStr, Arc<PropertyStorage>>,
}

impl ClassLikeMetadata {
    pub fn new(name: impl Into<ClassName>, kind: ClassLikeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn class(name: impl Into<ClassName>) -> Self {
        Self::new(name, ClassLikeKind::Class)
    }

    pub fn interface(name: impl Into<ClassName>) -> Self {
        Self::new(name, ClassLikeKind::Interface)
    }

    pub fn trait_(name: impl Into<ClassName>) -> Self {
        Self::new(name, ClassLikeKind::Trait)
    }

    // ============================================================
    // Queries
    // ============================================================

    pub fn declaring_class_of(&self, property_name: &str) -> Option<&ClassName> {
        self.declaring_property_ids.get(property_name)
    }

    pub fn appearing_property_id(&self, property_name: &str) -> Option<&PropertyId> {
        self.appearing_property_ids.get(property_name)
    }

    /// Overridden ancestor declarations, empty when the property is not
    /// redeclared locally.
    pub fn overridden_property_ids(&self, property_name: &str) -> &[PropertyId] {
        self.overridden_property_ids
            .get(property_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The pseudo-accessor type for reads, or for writes when `for_write`.
    pub fn pseudo_property_type(&self, property_name: &str, for_write: bool) -> Option<&Type> {
        if for_write {
            self.pseudo_property_set_types.get(property_name)
        } else {
            self.pseudo_property_get_types.get(property_name)
        }
    }

    pub fn property(&self, property_name: &str) -> Option<&Arc<PropertyStorage>> {
        self.properties.get(property_name)
    }

    pub fn has_property(&self, property_name: &str) -> bool {
        self.declaring_property_ids.contains_key(property_name)
    }

    // ============================================================
    // Construction helpers
    //
    // Local declarations must be added before inheriting or using traits,
    // so that redeclarations are recognised as overrides.
    // ============================================================

    /// Declare a property in this class-like with its own storage.
    pub fn declare_property(&mut self, property_name: &str, ty: Option<Type>) -> &mut Self {
        let key = SmolStr::new(property_name);
        self.declaring_property_ids
            .insert(key.clone(), self.name.clone());
        self.appearing_property_ids
            .insert(key.clone(), PropertyId::new(self.name.clone(), key.clone()));
        self.properties
            .insert(key, Arc::new(PropertyStorage::new(ty)));
        self
    }

    /// Pull in the visible properties of a parent class or interface.
    ///
    /// Properties redeclared locally record the parent's declaration (and the
    /// parent's own override chain after it) as overridden.
    pub fn inherit_from(&mut self, parent: &ClassLikeMetadata) -> &mut Self {
        for (name, parent_declaring) in &parent.declaring_property_ids {
            if self.properties.contains_key(name) {
                let chain = self.overridden_property_ids.entry(name.clone()).or_default();
                push_unique(chain, PropertyId::new(parent_declaring.clone(), name.clone()));
                for ancestor in parent.overridden_property_ids(name) {
                    push_unique(chain, ancestor.clone());
                }
                trace!(
                    "[METADATA] {} overrides {}::${}",
                    self.name, parent_declaring, name
                );
                continue;
            }

            self.declaring_property_ids
                .entry(name.clone())
                .or_insert_with(|| parent_declaring.clone());
            if let Some(appearing) = parent.appearing_property_id(name) {
                self.appearing_property_ids
                    .entry(name.clone())
                    .or_insert_with(|| appearing.clone());
            }
            if let Some(chain) = parent.overridden_property_ids.get(name) {
                self.overridden_property_ids
                    .entry(name.clone())
                    .or_insert_with(|| chain.clone());
            }
        }

        for (name, ty) in &parent.pseudo_property_get_types {
            self.pseudo_property_get_types
                .entry(name.clone())
                .or_insert_with(|| ty.clone());
        }
        for (name, ty) in &parent.pseudo_property_set_types {
            self.pseudo_property_set_types
                .entry(name.clone())
                .or_insert_with(|| ty.clone());
        }
        self
    }

    /// Compose a trait: its properties are declared by the trait but appear
    /// on this class-like.
    pub fn use_trait(&mut self, used_trait: &ClassLikeMetadata) -> &mut Self {
        for (name, trait_declaring) in &used_trait.declaring_property_ids {
            if self.properties.contains_key(name) {
                continue;
            }
            self.declaring_property_ids
                .insert(name.clone(), trait_declaring.clone());
            self.appearing_property_ids
                .insert(name.clone(), PropertyId::new(self.name.clone(), name.clone()));
        }
        self
    }

    pub fn add_overridden_property(&mut self, property_name: &str, overridden: PropertyId) -> &mut Self {
        let chain = self
            .overridden_property_ids
            .entry(SmolStr::new(property_name))
            .or_default();
        push_unique(chain, overridden);
        self
    }

    pub fn set_pseudo_get_type(&mut self, property_name: &str, ty: Type) -> &mut Self {
        self.pseudo_property_get_types
            .insert(SmolStr::new(property_name), ty);
        self
    }

    pub fn set_pseudo_set_type(&mut self, property_name: &str, ty: Type) -> &mut Self {
        self.pseudo_property_set_types
            .insert(SmolStr::new(property_name), ty);
        self
    }
}

fn push_unique(chain: &mut Vec<PropertyId>, id: PropertyId) {
    if !chain.contains(&id) {
        chain.push(id);
    }
}
