// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field registry and fluent builder for [`DynamicStruct`].

use crate::descriptor::DynamicStruct;
use crate::error::{BuildError, FieldError};
use crate::field::{check_name, Field, FieldKind};
use crate::typed::FieldType;
use std::collections::HashMap;

/// Accumulates field declarations and builds [`DynamicStruct`] descriptors.
///
/// Registration never fails on the spot. Invalid declarations are recorded
/// and reported together by [`Builder::build`], so a whole chain of
/// `add_*` calls runs to completion:
///
/// ```
/// use dynstruct::{Builder, FieldKind};
///
/// let ds = Builder::new()
///     .add_field("Name", FieldKind::String, r#"json:"name""#)
///     .add_int64_field("Age", r#"json:"age""#)
///     .build()
///     .unwrap();
///
/// let names: Vec<_> = ds.fields().iter().map(|f| f.name()).collect();
/// assert_eq!(names, ["Age", "Name"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    fields: HashMap<String, Field>,
    errors: Vec<FieldError>,
}

macro_rules! typed_adders {
    ($($(#[$doc:meta])* $method:ident => $kind:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $method(&mut self, name: impl Into<String>, tag: impl Into<String>) -> &mut Self {
                self.add_field(name, FieldKind::$kind, tag)
            }
        )*
    };
}

impl Builder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any field already registered under `name`.
    ///
    /// `kind` may be `None`, which is recorded as a "type must not be nil"
    /// diagnostic.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        kind: impl Into<Option<FieldKind>>,
        tag: impl Into<String>,
    ) -> &mut Self {
        let name = name.into();
        let kind = kind.into();
        let result = check_name(&name).and_then(|()| {
            kind.ok_or_else(|| FieldError::NilType { name: name.clone() })
        });
        self.insert(name, result, tag.into())
    }

    /// Add a sequence field whose elements are of `element` kind.
    pub fn add_slice_field(
        &mut self,
        name: impl Into<String>,
        element: impl Into<Option<FieldKind>>,
        tag: impl Into<String>,
    ) -> &mut Self {
        let name = name.into();
        let element = element.into();
        let result = check_name(&name).and_then(|()| {
            element
                .map(FieldKind::sequence_of)
                .ok_or_else(|| FieldError::NilSliceElement { name: name.clone() })
        });
        self.insert(name, result, tag.into())
    }

    /// Add a field whose kind is derived from the Rust type `T`.
    pub fn add_typed_field<T: FieldType>(
        &mut self,
        name: impl Into<String>,
        tag: impl Into<String>,
    ) -> &mut Self {
        self.add_field(name, T::field_kind(), tag)
    }

    typed_adders! {
        add_bool_field => Bool,
        /// Platform-width signed integer.
        add_int_field => Int,
        add_int8_field => Int8,
        add_int16_field => Int16,
        add_int32_field => Int32,
        add_int64_field => Int64,
        /// Platform-width unsigned integer.
        add_uint_field => Uint,
        add_uint8_field => Uint8,
        add_uint16_field => Uint16,
        add_uint32_field => Uint32,
        add_uint64_field => Uint64,
        add_float32_field => Float32,
        add_float64_field => Float64,
        add_string_field => String,
        /// Calendar timestamp (RFC 3339 in the codecs).
        add_time_field => Time,
        /// Timestamp as nanoseconds since the Unix epoch.
        add_unix_time_field => UnixTime,
        /// Field kept in the layout but ignored by serializers.
        add_skip_field => Skip,
    }

    /// Remove a field. Absent names are ignored.
    pub fn remove_field(&mut self, name: &str) -> &mut Self {
        if self.fields.remove(name).is_some() {
            log::trace!("[Builder] removed field {}", name);
        }
        self
    }

    /// Check if a field is currently registered.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get a registered field.
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Diagnostics recorded so far, in registration order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Forget every recorded diagnostic.
    ///
    /// Diagnostics are otherwise kept across failed builds.
    pub fn clear_errors(&mut self) -> &mut Self {
        self.errors.clear();
        self
    }

    /// Build an immutable descriptor from the current fields.
    ///
    /// Fails with every pending diagnostic if any registration was rejected.
    /// Fields are sorted by name, so the layout does not depend on the order
    /// of registration. The builder is left untouched and can build again.
    pub fn build(&self) -> Result<DynamicStruct, BuildError> {
        if !self.errors.is_empty() {
            log::debug!(
                "[Builder::build] rejected with {} diagnostic(s)",
                self.errors.len()
            );
            return Err(BuildError::new(self.errors.clone()));
        }

        let mut fields: Vec<Field> = self.fields.values().cloned().collect();
        fields.sort_by(|a, b| a.name().cmp(b.name()));

        log::debug!("[Builder::build] built struct with {} fields", fields.len());
        Ok(DynamicStruct::from_sorted(fields))
    }

    fn insert(
        &mut self,
        name: String,
        kind: Result<FieldKind, FieldError>,
        tag: String,
    ) -> &mut Self {
        match kind {
            Ok(kind) => {
                log::trace!("[Builder] add field {} ({})", name, kind);
                let field = Field::from_parts(name.clone(), kind, tag);
                self.fields.insert(name, field);
            }
            Err(err) => self.record(err),
        }
        self
    }

    fn record(&mut self, err: FieldError) {
        log::debug!("[Builder] rejected field: {}", err);
        if !self.errors.contains(&err) {
            self.errors.push(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_builder_is_empty() {
        let builder = Builder::new();
        assert!(builder.is_empty());
        assert_eq!(builder.len(), 0);
        assert!(!builder.has_errors());
    }

    #[test]
    fn test_add_field() {
        let mut builder = Builder::new();
        builder.add_field("Field", FieldKind::Int, r#"key:"value""#);

        let field = builder.get_field("Field").expect("field");
        assert_eq!(field.name(), "Field");
        assert_eq!(field.kind(), &FieldKind::Int);
        assert_eq!(field.tag(), r#"key:"value""#);
    }

    #[test]
    fn test_add_field_replaces() {
        let mut builder = Builder::new();
        builder
            .add_field("Field", FieldKind::Int, "a")
            .add_field("Field", FieldKind::String, "b");

        assert_eq!(builder.len(), 1);
        let field = builder.get_field("Field").expect("field");
        assert_eq!(field.kind(), &FieldKind::String);
        assert_eq!(field.tag(), "b");
        assert!(!builder.has_errors());
    }

    #[test]
    fn test_remove_field() {
        let mut builder = Builder::new();
        builder
            .add_field("Field", FieldKind::Int, "")
            .remove_field("Field");
        assert!(!builder.has_field("Field"));

        builder.remove_field("Missing");
        assert!(!builder.has_errors());
    }

    #[test]
    fn test_has_and_get_field() {
        let mut builder = Builder::new();
        assert!(!builder.has_field("Field"));
        assert!(builder.get_field("Field").is_none());

        builder.add_bool_field("Field", "");
        assert!(builder.has_field("Field"));
        assert!(builder.get_field("Field").is_some());
    }

    #[test]
    fn test_invalid_registrations_are_not_inserted() {
        let mut builder = Builder::new();
        builder
            .add_field("", FieldKind::Int, "")
            .add_field("lower", FieldKind::Int, "")
            .add_field("Good", None, "")
            .add_slice_field("Items", None, "");

        assert!(builder.is_empty());
        assert_eq!(
            builder.errors(),
            &[
                FieldError::EmptyName,
                FieldError::Unexported {
                    name: "lower".into()
                },
                FieldError::NilType {
                    name: "Good".into()
                },
                FieldError::NilSliceElement {
                    name: "Items".into()
                },
            ]
        );
    }

    #[test]
    fn test_name_checked_before_type() {
        let mut builder = Builder::new();
        builder.add_field("lower", None, "");
        assert_eq!(
            builder.errors(),
            &[FieldError::Unexported {
                name: "lower".into()
            }]
        );
    }

    #[test]
    fn test_duplicate_diagnostics_collapse() {
        let mut builder = Builder::new();
        builder.add_field("", FieldKind::Int, "").add_field("", FieldKind::Bool, "");
        assert_eq!(builder.errors(), &[FieldError::EmptyName]);
    }

    #[test]
    fn test_failed_build_keeps_errors() {
        let mut builder = Builder::new();
        builder.add_field("", FieldKind::Int, "");

        assert!(builder.build().is_err());
        assert!(builder.build().is_err());
        assert_eq!(builder.errors().len(), 1);

        builder.clear_errors();
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_build_sorts_by_name() {
        let ds = Builder::new()
            .add_field("Zebra", FieldKind::String, "")
            .add_field("Alpha", FieldKind::Int, "")
            .add_field("Middle", FieldKind::Bool, "")
            .build()
            .expect("build");

        let names: Vec<_> = ds.fields().iter().map(Field::name).collect();
        assert_eq!(names, ["Alpha", "Middle", "Zebra"]);
    }

    #[test]
    fn test_builder_reusable_after_build() {
        let mut builder = Builder::new();
        builder.add_string_field("Name", "");
        let first = builder.build().expect("first");

        builder.add_int_field("Age", "");
        let second = builder.build().expect("second");

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_typed_adders() {
        let mut builder = Builder::new();
        builder
            .add_uint8_field("U8", "")
            .add_float32_field("F32", "")
            .add_time_field("At", "")
            .add_unix_time_field("Stamp", "")
            .add_skip_field("Ignored", "")
            .add_typed_field::<Vec<String>>("Tags", "");

        let kind = |name: &str| builder.get_field(name).map(|f| f.kind().clone());
        assert_eq!(kind("U8"), Some(FieldKind::Uint8));
        assert_eq!(kind("F32"), Some(FieldKind::Float32));
        assert_eq!(kind("At"), Some(FieldKind::Time));
        assert_eq!(kind("Stamp"), Some(FieldKind::UnixTime));
        assert_eq!(kind("Ignored"), Some(FieldKind::Skip));
        assert_eq!(
            kind("Tags"),
            Some(FieldKind::sequence_of(FieldKind::String))
        );
    }
}
