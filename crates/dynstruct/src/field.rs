// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field kinds and field descriptors.

use crate::error::FieldError;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of a dynamic struct field.
///
/// Closed set: every kind knows its zero value and how the codecs encode it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    /// Platform-width signed integer (`isize`).
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    /// Platform-width unsigned integer (`usize`).
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    /// Timestamp carried as nanoseconds since the Unix epoch.
    UnixTime,
    /// Full calendar timestamp with UTC offset.
    Time,
    /// Ordered sequence of a single element kind.
    Sequence(Box<FieldKind>),
    /// Present in the layout but ignored by serializers.
    Skip,
}

impl FieldKind {
    /// Sequence of `element`.
    pub fn sequence_of(element: FieldKind) -> Self {
        Self::Sequence(Box::new(element))
    }

    /// Element kind if this is a sequence.
    pub fn element(&self) -> Option<&FieldKind> {
        match self {
            Self::Sequence(elem) => Some(elem),
            _ => None,
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Returns `true` for every signed and unsigned integer kind.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Uint
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    pub fn is_time(&self) -> bool {
        matches!(self, Self::UnixTime | Self::Time)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Int8 => write!(f, "int8"),
            Self::Int16 => write!(f, "int16"),
            Self::Int32 => write!(f, "int32"),
            Self::Int64 => write!(f, "int64"),
            Self::Uint => write!(f, "uint"),
            Self::Uint8 => write!(f, "uint8"),
            Self::Uint16 => write!(f, "uint16"),
            Self::Uint32 => write!(f, "uint32"),
            Self::Uint64 => write!(f, "uint64"),
            Self::Float32 => write!(f, "float32"),
            Self::Float64 => write!(f, "float64"),
            Self::String => write!(f, "string"),
            Self::UnixTime => write!(f, "unix_time"),
            Self::Time => write!(f, "time"),
            Self::Sequence(elem) => write!(f, "[]{elem}"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Unrecognized kind name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field kind: {0:?}")]
pub struct ParseKindError(pub String);

impl FromStr for FieldKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(elem) = s.strip_prefix("[]") {
            return elem
                .parse()
                .map(Self::sequence_of)
                .map_err(|_| ParseKindError(s.to_string()));
        }
        let kind = match s {
            "bool" => Self::Bool,
            "int" => Self::Int,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint" => Self::Uint,
            "uint8" | "byte" => Self::Uint8,
            "uint16" => Self::Uint16,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "string" => Self::String,
            "unix_time" => Self::UnixTime,
            "time" => Self::Time,
            "skip" => Self::Skip,
            other => return Err(ParseKindError(other.to_string())),
        };
        Ok(kind)
    }
}

/// A named, typed, tagged member of a dynamic struct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    name: String,
    kind: FieldKind,
    tag: String,
}

impl Field {
    /// Create a field after checking the name.
    ///
    /// The tag is stored verbatim and never inspected.
    pub fn new(
        name: impl Into<String>,
        kind: FieldKind,
        tag: impl Into<String>,
    ) -> Result<Self, FieldError> {
        let name = name.into();
        check_name(&name)?;
        Ok(Self {
            name,
            kind,
            tag: tag.into(),
        })
    }

    /// Name already checked by the caller.
    pub(crate) fn from_parts(name: String, kind: FieldKind, tag: String) -> Self {
        Self { name, kind, tag }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// Check that `name` is usable as an exported member name.
///
/// Exported means the first character is an uppercase letter; the rest must
/// be letters, digits or underscores.
pub fn check_name(name: &str) -> Result<(), FieldError> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(FieldError::EmptyName);
    };
    if !first.is_uppercase() {
        return Err(FieldError::Unexported {
            name: name.to_string(),
        });
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return Err(FieldError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// True if `name` passes [`check_name`].
pub fn is_exported(name: &str) -> bool {
    check_name(name).is_ok()
}
