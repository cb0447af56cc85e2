//! Property types.
//!
//! A [`Type`] is a union of [`Atomic`] members (`int|string|Foo`). The
//! resolver never invents a type: "no type" is `Option::<Type>::None`, which
//! is different from an explicit `mixed`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::ClassName;

/// One member of a union type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Atomic {
    Mixed,
    Null,
    Bool,
    Int,
    Float,
    String,
    /// `array<T>`; a bare `array` is `array<mixed>`
    Array(Box<Type>),
    /// A class, interface, trait or enum type
    Named(ClassName),
}

impl fmt::Display for Atomic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atomic::Mixed => f.write_str("mixed"),
            Atomic::Null => f.write_str("null"),
            Atomic::Bool => f.write_str("bool"),
            Atomic::Int => f.write_str("int"),
            Atomic::Float => f.write_str("float"),
            Atomic::String => f.write_str("string"),
            Atomic::Array(value) => write!(f, "array<{value}>"),
            Atomic::Named(name) => f.write_str(name),
        }
    }
}

/// A union of atomic types. Never empty; members are unique and keep the
/// order they were first added in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Type {
    atomics: Vec<Atomic>,
}

impl Type {
    pub fn new(atomic: Atomic) -> Self {
        Self {
            atomics: vec![atomic],
        }
    }

    /// Build a union. An empty iterator yields `mixed`, and `mixed`
    /// absorbs every other member.
    pub fn from_atomics(atomics: impl IntoIterator<Item = Atomic>) -> Self {
        let mut ty = Self { atomics: Vec::new() };
        for atomic in atomics {
            ty.push(atomic);
        }
        if ty.atomics.is_empty() {
            ty.atomics.push(Atomic::Mixed);
        }
        ty
    }

    pub fn mixed() -> Self {
        Self::new(Atomic::Mixed)
    }

    pub fn null() -> Self {
        Self::new(Atomic::Null)
    }

    pub fn bool() -> Self {
        Self::new(Atomic::Bool)
    }

    pub fn int() -> Self {
        Self::new(Atomic::Int)
    }

    pub fn float() -> Self {
        Self::new(Atomic::Float)
    }

    pub fn string() -> Self {
        Self::new(Atomic::String)
    }

    pub fn named(class_name: impl Into<ClassName>) -> Self {
        Self::new(Atomic::Named(class_name.into()))
    }

    pub fn array_of(value: Type) -> Self {
        Self::new(Atomic::Array(Box::new(value)))
    }

    pub fn atomics(&self) -> &[Atomic] {
        &self.atomics
    }

    pub fn is_mixed(&self) -> bool {
        self.atomics.iter().any(|a| matches!(a, Atomic::Mixed))
    }

    pub fn is_nullable(&self) -> bool {
        self.atomics.iter().any(|a| matches!(a, Atomic::Null))
    }

    /// Union of `self` and `other`.
    pub fn union_with(&self, other: &Type) -> Type {
        Self::from_atomics(self.atomics.iter().chain(&other.atomics).cloned())
    }

    /// `self|null`
    pub fn as_nullable(&self) -> Type {
        self.union_with(&Type::null())
    }

    fn push(&mut self, atomic: Atomic) {
        if self.is_mixed() {
            return;
        }
        if atomic == Atomic::Mixed {
            self.atomics.clear();
            self.atomics.push(Atomic::Mixed);
            return;
        }
        if !self.atomics.contains(&atomic) {
            self.atomics.push(atomic);
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, atomic) in self.atomics.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{atomic}")?;
        }
        Ok(())
    }
}

/// A type string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid type '{input}': {reason}")]
pub struct TypeParseError {
    pub input: String,
    pub reason: &'static str,
}

impl FromStr for Type {
    type Err = TypeParseError;

    /// Parse docblock-style type text: `int|string`, `?Foo`, `array<int|null>`,
    /// `\App\User`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| TypeParseError {
            input: s.to_string(),
            reason,
        };

        let text = s.trim();
        if text.is_empty() {
            return Err(err("empty type"));
        }

        let mut atomics = Vec::new();
        for part in split_top_level(text).ok_or_else(|| err("unbalanced '<' '>'"))? {
            let part = part.trim();
            if let Some(inner) = part.strip_prefix('?') {
                atomics.extend(inner.parse::<Type>()?.atomics);
                atomics.push(Atomic::Null);
            } else {
                atomics.push(parse_atomic(part).map_err(err)?);
            }
        }
        Ok(Self::from_atomics(atomics))
    }
}

fn split_top_level(text: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            '|' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&text[start..]);
    Some(parts)
}

fn parse_atomic(part: &str) -> Result<Atomic, &'static str> {
    if part.is_empty() {
        return Err("empty union member");
    }

    if let Some(rest) = part.strip_prefix("array<") {
        let inner = rest.strip_suffix('>').ok_or("unterminated array<...>")?;
        let value = inner.parse::<Type>().map_err(|e| e.reason)?;
        return Ok(Atomic::Array(Box::new(value)));
    }

    let atomic = match part.to_ascii_lowercase().as_str() {
        "mixed" => Atomic::Mixed,
        "null" => Atomic::Null,
        "bool" | "boolean" => Atomic::Bool,
        "int" | "integer" => Atomic::Int,
        "float" | "double" => Atomic::Float,
        "string" => Atomic::String,
        "array" => Atomic::Array(Box::new(Type::mixed())),
        _ => {
            let name = part.strip_prefix('\\').unwrap_or(part);
            let valid = !name.is_empty()
                && !name.starts_with(|c: char| c.is_ascii_digit())
                && name
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '\\');
            if !valid {
                return Err("not a class-like name");
            }
            Atomic::Named(name.into())
        }
    };
    Ok(atomic)
}

impl TryFrom<String> for Type {
    type Error = TypeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Type> for String {
    fn from(ty: Type) -> Self {
        ty.to_string()
    }
}
