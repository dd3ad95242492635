// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic values stored in instance slots.

use crate::field::FieldKind;
use chrono::{DateTime, FixedOffset, Utc};

/// Timestamp stored as nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnixTime(pub i64);

impl UnixTime {
    pub const EPOCH: Self = Self(0);

    pub fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// `None` when the instant does not fit in an `i64` of nanoseconds
    /// (roughly outside 1677..2262).
    pub fn from_datetime<Tz: chrono::TimeZone>(dt: &DateTime<Tz>) -> Option<Self> {
        dt.timestamp_nanos_opt().map(Self)
    }

    pub fn nanos(&self) -> i64 {
        self.0
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }
}

impl From<DateTime<Utc>> for UnixTime {
    fn from(dt: DateTime<Utc>) -> Self {
        // Saturate instead of failing; callers wanting the check use from_datetime.
        Self::from_datetime(&dt).unwrap_or(if dt.timestamp() < 0 {
            Self(i64::MIN)
        } else {
            Self(i64::MAX)
        })
    }
}

/// A value held by one field of an [`Instance`](crate::Instance).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint(usize),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    UnixTime(UnixTime),
    Time(DateTime<FixedOffset>),
    Sequence(Vec<Value>),
    Skip,
}

impl Value {
    /// Zero value for a field kind.
    pub fn zero(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Bool => Self::Bool(false),
            FieldKind::Int => Self::Int(0),
            FieldKind::Int8 => Self::Int8(0),
            FieldKind::Int16 => Self::Int16(0),
            FieldKind::Int32 => Self::Int32(0),
            FieldKind::Int64 => Self::Int64(0),
            FieldKind::Uint => Self::Uint(0),
            FieldKind::Uint8 => Self::Uint8(0),
            FieldKind::Uint16 => Self::Uint16(0),
            FieldKind::Uint32 => Self::Uint32(0),
            FieldKind::Uint64 => Self::Uint64(0),
            FieldKind::Float32 => Self::Float32(0.0),
            FieldKind::Float64 => Self::Float64(0.0),
            FieldKind::String => Self::String(String::new()),
            FieldKind::UnixTime => Self::UnixTime(UnixTime::EPOCH),
            FieldKind::Time => Self::Time(zero_time()),
            FieldKind::Sequence(_) => Self::Sequence(Vec::new()),
            FieldKind::Skip => Self::Skip,
        }
    }

    /// Check whether this value can live in a slot of `kind`.
    ///
    /// Sequences are checked element by element.
    pub fn matches_kind(&self, kind: &FieldKind) -> bool {
        match (self, kind) {
            (Self::Bool(_), FieldKind::Bool)
            | (Self::Int(_), FieldKind::Int)
            | (Self::Int8(_), FieldKind::Int8)
            | (Self::Int16(_), FieldKind::Int16)
            | (Self::Int32(_), FieldKind::Int32)
            | (Self::Int64(_), FieldKind::Int64)
            | (Self::Uint(_), FieldKind::Uint)
            | (Self::Uint8(_), FieldKind::Uint8)
            | (Self::Uint16(_), FieldKind::Uint16)
            | (Self::Uint32(_), FieldKind::Uint32)
            | (Self::Uint64(_), FieldKind::Uint64)
            | (Self::Float32(_), FieldKind::Float32)
            | (Self::Float64(_), FieldKind::Float64)
            | (Self::String(_), FieldKind::String)
            | (Self::UnixTime(_), FieldKind::UnixTime)
            | (Self::Time(_), FieldKind::Time)
            | (Self::Skip, FieldKind::Skip) => true,
            (Self::Sequence(items), FieldKind::Sequence(elem)) => {
                items.iter().all(|item| item.matches_kind(elem))
            }
            _ => false,
        }
    }

    /// True if the value equals the zero value of its kind.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Bool(v) => !v,
            Self::Int(v) => *v == 0,
            Self::Int8(v) => *v == 0,
            Self::Int16(v) => *v == 0,
            Self::Int32(v) => *v == 0,
            Self::Int64(v) => *v == 0,
            Self::Uint(v) => *v == 0,
            Self::Uint8(v) => *v == 0,
            Self::Uint16(v) => *v == 0,
            Self::Uint32(v) => *v == 0,
            Self::Uint64(v) => *v == 0,
            Self::Float32(v) => *v == 0.0,
            Self::Float64(v) => *v == 0.0,
            Self::String(v) => v.is_empty(),
            Self::UnixTime(v) => *v == UnixTime::EPOCH,
            Self::Time(v) => *v == zero_time(),
            Self::Sequence(v) => v.is_empty(),
            Self::Skip => true,
        }
    }

    /// False for NaN or infinite floats, including inside sequences.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Float32(v) => v.is_finite(),
            Self::Float64(v) => v.is_finite(),
            Self::Sequence(items) => items.iter().all(Value::is_finite),
            _ => true,
        }
    }

    /// Short name of the value's shape, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Int8(_) => "int8",
            Self::Int16(_) => "int16",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Uint(_) => "uint",
            Self::Uint8(_) => "uint8",
            Self::Uint16(_) => "uint16",
            Self::Uint32(_) => "uint32",
            Self::Uint64(_) => "uint64",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
            Self::String(_) => "string",
            Self::UnixTime(_) => "unix_time",
            Self::Time(_) => "time",
            Self::Sequence(_) => "sequence",
            Self::Skip => "skip",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Any signed integer, widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => i64::try_from(*v).ok(),
            Self::Int8(v) => Some(i64::from(*v)),
            Self::Int16(v) => Some(i64::from(*v)),
            Self::Int32(v) => Some(i64::from(*v)),
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Any unsigned integer, widened to `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Uint(v) => u64::try_from(*v).ok(),
            Self::Uint8(v) => Some(u64::from(*v)),
            Self::Uint16(v) => Some(u64::from(*v)),
            Self::Uint32(v) => Some(u64::from(*v)),
            Self::Uint64(v) => Some(*v),
            _ => None,
        }
    }

    /// Either float kind, widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float32(v) => Some(f64::from(*v)),
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(v) => Some(v),
            _ => None,
        }
    }

    /// Either timestamp kind as a UTC instant.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::UnixTime(v) => Some(v.to_datetime()),
            Self::Time(v) => Some(v.with_timezone(&Utc)),
            _ => None,
        }
    }
}

/// Zero value of [`FieldKind::Time`]: the Unix epoch at UTC.
pub fn zero_time() -> DateTime<FixedOffset> {
    DateTime::<Utc>::UNIX_EPOCH.fixed_offset()
}

// Conversion traits
macro_rules! impl_from_primitive {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
}

impl_from_primitive!(bool, Bool);
impl_from_primitive!(isize, Int);
impl_from_primitive!(i8, Int8);
impl_from_primitive!(i16, Int16);
impl_from_primitive!(i32, Int32);
impl_from_primitive!(i64, Int64);
impl_from_primitive!(usize, Uint);
impl_from_primitive!(u8, Uint8);
impl_from_primitive!(u16, Uint16);
impl_from_primitive!(u32, Uint32);
impl_from_primitive!(u64, Uint64);
impl_from_primitive!(f32, Float32);
impl_from_primitive!(f64, Float64);
impl_from_primitive!(String, String);
impl_from_primitive!(UnixTime, UnixTime);
impl_from_primitive!(DateTime<FixedOffset>, Time);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Time(v.fixed_offset())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Sequence(v.into_iter().map(Into::into).collect())
    }
}

/// Extract a typed Rust value out of a [`Value`].
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_from_value {
    ($ty:ty, $variant:ident) => {
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        }
    };
}

impl_from_value!(bool, Bool);
impl_from_value!(isize, Int);
impl_from_value!(i8, Int8);
impl_from_value!(i16, Int16);
impl_from_value!(i32, Int32);
impl_from_value!(i64, Int64);
impl_from_value!(usize, Uint);
impl_from_value!(u8, Uint8);
impl_from_value!(u16, Uint16);
impl_from_value!(u32, Uint32);
impl_from_value!(u64, Uint64);
impl_from_value!(f32, Float32);
impl_from_value!(f64, Float64);
impl_from_value!(UnixTime, UnixTime);
impl_from_value!(DateTime<FixedOffset>, Time);

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Time(v) => Some(v.with_timezone(&Utc)),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_sequence()?.iter().map(T::from_value).collect()
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}
