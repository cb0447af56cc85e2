//! # Codebase
//!
//! Property resolution over flattened class-like metadata.
//!
//! The metadata store ([`ClassLikeStore`]) is built by an earlier phase. This
//! module reads it to answer property queries ([`Properties`]) and records
//! method → property edges into a [`ReferenceIndex`].

pub mod config;
pub mod error;
pub mod graphs;
pub mod metadata;
pub mod properties;
pub mod property_id;
pub mod storage;
pub mod store;
pub mod ttype;

pub use config::AnalysisConfig;
pub use error::{ErrorSeverity, PropertyError, PropertyResult};
pub use graphs::{ReferenceBuffer, ReferenceIndex, ReferenceRecorder};
pub use metadata::{ClassLikeKind, ClassLikeMetadata};
pub use properties::Properties;
pub use property_id::{PROPERTY_SEPARATOR, PropertyId, reference_key};
pub use storage::{PropertyStorage, ReferencingLocations};
pub use store::{ClassLikeStore, InMemoryClassLikeStore};
pub use ttype::{Atomic, Type, TypeParseError};

/// Fully-qualified class-like name, original case.
pub type ClassName = smol_str::SmolStr;

/// Insertion-ordered map with the fast non-cryptographic hasher.
pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
