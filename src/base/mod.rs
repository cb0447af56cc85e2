//! Foundation types for the propsight resolver.
//!
//! This module provides the source-position primitives shared by the rest of
//! the crate:
//! - [`Position`], [`Span`] - 0-indexed line/column ranges
//! - [`CodeLocation`] - a span inside a named source file
//!
//! This module has NO dependencies on other propsight modules.

mod position;

pub use position::{CodeLocation, Position, Span};
