// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapping from Rust types to field kinds, for generic registration.

use crate::field::FieldKind;
use crate::value::UnixTime;
use chrono::{DateTime, FixedOffset, Utc};

/// Marker type for fields serializers must ignore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Skip;

/// Rust types that have a corresponding [`FieldKind`].
///
/// Used by [`Builder::add_typed_field`](crate::Builder::add_typed_field).
pub trait FieldType {
    fn field_kind() -> FieldKind;
}

macro_rules! impl_field_type {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl FieldType for $ty {
                fn field_kind() -> FieldKind {
                    FieldKind::$kind
                }
            }
        )*
    };
}

impl_field_type! {
    bool => Bool,
    isize => Int,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    usize => Uint,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    UnixTime => UnixTime,
    DateTime<FixedOffset> => Time,
    DateTime<Utc> => Time,
    Skip => Skip,
}

impl<T: FieldType> FieldType for Vec<T> {
    fn field_kind() -> FieldKind {
        FieldKind::sequence_of(T::field_kind())
    }
}
