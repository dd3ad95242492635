// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for registration, build and instance access.

use crate::field::FieldKind;
use thiserror::Error;

/// A single rejected registration.
///
/// Recorded by the [`Builder`](crate::Builder) instead of being returned, and
/// surfaced all at once by [`Builder::build`](crate::Builder::build).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum FieldError {
    #[error("field name must not be empty")]
    EmptyName,

    #[error("field name {name:?} must be exported (start with an uppercase letter)")]
    Unexported { name: String },

    #[error("field name {name:?} must contain only letters, digits or '_'")]
    InvalidName { name: String },

    #[error("field {name:?}: type must not be nil")]
    NilType { name: String },

    #[error("field {name:?}: slice element type must not be nil")]
    NilSliceElement { name: String },
}

impl FieldError {
    /// Name of the offending field (empty for [`FieldError::EmptyName`]).
    pub fn field_name(&self) -> &str {
        match self {
            Self::EmptyName => "",
            Self::Unexported { name }
            | Self::InvalidName { name }
            | Self::NilType { name }
            | Self::NilSliceElement { name } => name,
        }
    }

    /// True for both nil-type variants.
    pub fn is_nil_type(&self) -> bool {
        matches!(self, Self::NilType { .. } | Self::NilSliceElement { .. })
    }
}

/// Combined diagnostic returned by a failed build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid struct definition ({count} error(s)): {joined}", count = .errors.len(), joined = join_errors(.errors))]
pub struct BuildError {
    errors: Vec<FieldError>,
}

impl BuildError {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Every diagnostic, in registration order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors for by-name access on an [`Instance`](crate::Instance).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstanceError {
    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error("field {field:?}: expected {expected}, got {got}")]
    KindMismatch {
        field: String,
        expected: FieldKind,
        got: String,
    },
}
