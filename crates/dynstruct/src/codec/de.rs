// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{wire_fields, WireField};
use crate::descriptor::DynamicStruct;
use crate::field::FieldKind;
use crate::instance::Instance;
use crate::value::{UnixTime, Value};
use chrono::DateTime;
use serde::de::{self, DeserializeSeed, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Deserializes a map into a fresh [`Instance`] of `descriptor`.
///
/// Keys are matched against the `tag_key` tag entries, exactly first and then
/// ignoring case. Unknown keys are skipped; missing keys and `null` leave the
/// zero value.
#[derive(Debug, Clone, Copy)]
pub struct InstanceSeed<'a> {
    descriptor: &'a DynamicStruct,
    tag_key: &'a str,
}

impl<'a> InstanceSeed<'a> {
    pub fn new(descriptor: &'a DynamicStruct, tag_key: &'a str) -> Self {
        Self {
            descriptor,
            tag_key,
        }
    }
}

impl<'de> DeserializeSeed<'de> for InstanceSeed<'_> {
    type Value = Instance;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Instance, D::Error> {
        deserializer.deserialize_map(InstanceVisitor {
            instance: self.descriptor.new_instance(),
            wire: wire_fields(self.descriptor, self.tag_key),
        })
    }
}

struct InstanceVisitor {
    instance: Instance,
    wire: Vec<WireField>,
}

impl InstanceVisitor {
    fn resolve(&self, key: &str) -> Option<usize> {
        self.wire
            .iter()
            .find(|wf| wf.key == key)
            .or_else(|| {
                let folded = key.to_lowercase();
                self.wire.iter().find(|wf| wf.key.to_lowercase() == folded)
            })
            .map(|wf| wf.index)
    }
}

impl<'de> Visitor<'de> for InstanceVisitor {
    type Value = Instance;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of field values")
    }

    fn visit_map<M: MapAccess<'de>>(mut self, mut access: M) -> Result<Instance, M::Error> {
        while let Some(key) = access.next_key::<String>()? {
            let Some(index) = self.resolve(&key) else {
                log::trace!("[InstanceSeed] ignoring unknown key {}", key);
                access.next_value::<IgnoredAny>()?;
                continue;
            };
            let kind = self.instance.descriptor().fields()[index].kind().clone();
            let value = access.next_value_seed(ValueSeed { kind: &kind })?;
            *self.instance.slot_mut(index) = value;
        }
        Ok(self.instance)
    }
}

/// Decodes one value of a known kind; `null` yields the zero value.
struct ValueSeed<'a> {
    kind: &'a FieldKind,
}

impl<'de> DeserializeSeed<'de> for ValueSeed<'_> {
    type Value = Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_option(OptionVisitor { kind: self.kind })
    }
}

struct OptionVisitor<'a> {
    kind: &'a FieldKind,
}

impl<'de> Visitor<'de> for OptionVisitor<'_> {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "a {} value or null", self.kind)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::zero(self.kind))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::zero(self.kind))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        decode_kind(self.kind, deserializer)
    }
}

fn decode_kind<'de, D: Deserializer<'de>>(kind: &FieldKind, d: D) -> Result<Value, D::Error> {
    let value = match kind {
        FieldKind::Bool => Value::Bool(bool::deserialize(d)?),
        FieldKind::Int => Value::Int(isize::deserialize(d)?),
        FieldKind::Int8 => Value::Int8(i8::deserialize(d)?),
        FieldKind::Int16 => Value::Int16(i16::deserialize(d)?),
        FieldKind::Int32 => Value::Int32(i32::deserialize(d)?),
        FieldKind::Int64 => Value::Int64(i64::deserialize(d)?),
        FieldKind::Uint => Value::Uint(usize::deserialize(d)?),
        FieldKind::Uint8 => Value::Uint8(u8::deserialize(d)?),
        FieldKind::Uint16 => Value::Uint16(u16::deserialize(d)?),
        FieldKind::Uint32 => Value::Uint32(u32::deserialize(d)?),
        FieldKind::Uint64 => Value::Uint64(u64::deserialize(d)?),
        FieldKind::Float32 => Value::Float32(f32::deserialize(d)?),
        FieldKind::Float64 => Value::Float64(f64::deserialize(d)?),
        FieldKind::String => Value::String(String::deserialize(d)?),
        FieldKind::UnixTime => Value::UnixTime(UnixTime(i64::deserialize(d)?)),
        FieldKind::Time => {
            let text = String::deserialize(d)?;
            let parsed = DateTime::parse_from_rfc3339(&text).map_err(|e| {
                <D::Error as de::Error>::custom(format!("invalid RFC 3339 time {text:?}: {e}"))
            })?;
            Value::Time(parsed)
        }
        FieldKind::Sequence(elem) => d.deserialize_seq(SequenceVisitor { elem })?,
        FieldKind::Skip => {
            IgnoredAny::deserialize(d)?;
            Value::Skip
        }
    };
    Ok(value)
}

struct SequenceVisitor<'a> {
    elem: &'a FieldKind,
}

impl<'de> Visitor<'de> for SequenceVisitor<'_> {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "a sequence of {}", self.elem)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element_seed(ValueSeed { kind: self.elem })? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }
}
