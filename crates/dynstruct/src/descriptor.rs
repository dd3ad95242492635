// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Immutable struct descriptors produced by the builder.

use crate::field::Field;
use crate::instance::Instance;
use crate::tag::Tag;
use std::fmt;
use std::sync::Arc;

/// Runtime-defined struct type.
///
/// Holds the ordered field layout. Cloning is cheap (shared storage) and
/// descriptors are safe to share across threads. Two descriptors are equal
/// when their field sequences are equal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DynamicStruct {
    fields: Arc<[Field]>,
}

impl DynamicStruct {
    /// Fields must already be sorted by name and free of duplicates.
    pub(crate) fn from_sorted(fields: Vec<Field>) -> Self {
        Self {
            fields: fields.into(),
        }
    }

    /// Create an instance with every field at its zero value.
    pub fn new_instance(&self) -> Instance {
        Instance::new(self.clone())
    }

    /// Fields in layout order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.field_index(name).map(|idx| &self.fields[idx])
    }

    /// Position of `name` in the layout.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields
            .binary_search_by(|f| f.name().cmp(name))
            .ok()
    }

    /// Raw tag of a field.
    pub fn tag(&self, name: &str) -> Option<Tag<'_>> {
        self.field(name).map(|f| Tag::new(f.tag()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for DynamicStruct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicStruct")
            .field("fields", &self.fields())
            .finish()
    }
}

impl fmt::Display for DynamicStruct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "struct {{")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, " {} {}", field.name(), field.kind())?;
            if !field.tag().is_empty() {
                write!(f, " {:?}", field.tag())?;
            }
        }
        write!(f, " }}")
    }
}
