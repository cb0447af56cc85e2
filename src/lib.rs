//! # propsight-base
//!
//! Property resolution across class, interface and trait hierarchies.
//!
//! Answers the questions a static analyzer asks about `$obj->prop`:
//! does the property exist on the class, which unit declares it, which class
//! it appears to belong to, and what type it has when read or written.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! codebase  → Property resolver, class-like metadata, reference index
//!   ↓
//! base      → Primitives (Position, Span, CodeLocation)
//! ```

// ============================================================================
// MODULES (dependency order: base → codebase)
// ============================================================================

/// Foundation types: source positions and code locations
pub mod base;

/// Class-like metadata, the property resolver and reference tracking
pub mod codebase;

// Re-export foundation types
pub use base::{CodeLocation, Position, Span};

// Re-export the resolver surface
pub use codebase::{
    AnalysisConfig, ClassLikeKind, ClassLikeMetadata, ClassLikeStore, ClassName,
    InMemoryClassLikeStore, Properties, PropertyError, PropertyId, PropertyResult,
    PropertyStorage, ReferenceBuffer, ReferenceIndex, ReferenceRecorder, Type,
};
