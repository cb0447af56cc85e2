//! Error types for property resolution.

use smol_str::SmolStr;
use thiserror::Error;

/// Result type for resolver and store operations.
pub type PropertyResult<T> = Result<T, PropertyError>;

/// Errors that can occur while resolving a property.
///
/// "Property does not exist" is not an error for existence checks; it is
/// only raised by operations that require the property to be present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The identifier is not of the form `Class::$name`.
    #[error("Malformed property identifier '{id}': {reason}")]
    MalformedIdentifier { id: String, reason: &'static str },

    /// The class metadata store has no entry for this class-like.
    #[error("Class-like '{class}' not found")]
    ClassNotFound { class: SmolStr },

    /// The property is not known to the queried class.
    #[error("Property {property_id} should exist")]
    PropertyNotFound { property_id: String },

    /// The declaring class does not hold storage for a property it is
    /// recorded as declaring.
    #[error("Property {property_id} is declared by '{declaring_class}' but has no storage there")]
    InternalInconsistency {
        property_id: String,
        declaring_class: SmolStr,
    },
}

/// How a caller should treat a [`PropertyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// A caller passed an identifier it should never have built.
    ContractViolation,
    /// An unresolved class reference; report it and keep analyzing.
    Diagnostic,
    /// Metadata for the current unit is unreliable; abandon the unit, not the run.
    UnitFatal,
}

impl PropertyError {
    /// Create a malformed identifier error.
    pub fn malformed(id: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedIdentifier {
            id: id.into(),
            reason,
        }
    }

    /// Create a class-not-found error.
    pub fn class_not_found(class: impl Into<SmolStr>) -> Self {
        Self::ClassNotFound {
            class: class.into(),
        }
    }

    /// Create a property-not-found error.
    pub fn property_not_found(property_id: impl ToString) -> Self {
        Self::PropertyNotFound {
            property_id: property_id.to_string(),
        }
    }

    /// Create an internal inconsistency error.
    pub fn inconsistent(property_id: impl ToString, declaring_class: impl Into<SmolStr>) -> Self {
        Self::InternalInconsistency {
            property_id: property_id.to_string(),
            declaring_class: declaring_class.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MalformedIdentifier { .. } => ErrorSeverity::ContractViolation,
            Self::ClassNotFound { .. } => ErrorSeverity::Diagnostic,
            Self::PropertyNotFound { .. } | Self::InternalInconsistency { .. } => {
                ErrorSeverity::UnitFatal
            }
        }
    }
}
