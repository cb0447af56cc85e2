//! Property identifiers of the form `Class::$name`.

use std::fmt;

use smol_str::SmolStr;

use super::error::{PropertyError, PropertyResult};
use super::ClassName;

/// Separator between the class-like name and the property name.
pub const PROPERTY_SEPARATOR: &str = "::$";

/// A property identifier: the owning class-like and the property name.
///
/// The class name keeps its original case for store lookups. Reference-index
/// keys use [`PropertyId::reference_key`], which lower-cases the class half.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct PropertyId {
    class_name: ClassName,
    property_name: SmolStr,
}

impl PropertyId {
    pub fn new(class_name: impl Into<ClassName>, property_name: impl Into<SmolStr>) -> Self {
        Self {
            class_name: class_name.into(),
            property_name: property_name.into(),
        }
    }

    /// Parse `Class::$name`, stripping one leading `\` from the class name.
    pub fn parse(raw: &str) -> PropertyResult<Self> {
        let trimmed = raw.strip_prefix('\\').unwrap_or(raw);

        let mut parts = trimmed.split(PROPERTY_SEPARATOR);
        let (Some(class_name), Some(property_name)) = (parts.next(), parts.next()) else {
            return Err(PropertyError::malformed(raw, "missing '::$' separator"));
        };
        if parts.next().is_some() {
            return Err(PropertyError::malformed(raw, "more than one '::$' separator"));
        }
        if class_name.is_empty() {
            return Err(PropertyError::malformed(raw, "empty class name"));
        }
        if property_name.is_empty() {
            return Err(PropertyError::malformed(raw, "empty property name"));
        }

        Ok(Self::new(class_name, property_name))
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// The key used for reference edges: `lower(class)::$name`.
    pub fn reference_key(&self) -> String {
        reference_key(&self.class_name, &self.property_name)
    }
}

/// Build a reference-index key without allocating a [`PropertyId`].
pub fn reference_key(class_name: &str, property_name: &str) -> String {
    format!(
        "{}{PROPERTY_SEPARATOR}{}",
        class_name.to_lowercase(),
        property_name
    )
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{PROPERTY_SEPARATOR}{}",
            self.class_name, self.property_name
        )
    }
}

impl std::str::FromStr for PropertyId {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PropertyId {
    type Error = PropertyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PropertyId> for String {
    fn from(id: PropertyId) -> Self {
        id.to_string()
    }
}
