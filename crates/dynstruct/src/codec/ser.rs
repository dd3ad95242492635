// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::wire_fields;
use crate::instance::Instance;
use crate::value::Value;
use chrono::SecondsFormat;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v as i64),
            Value::Int8(v) => serializer.serialize_i8(*v),
            Value::Int16(v) => serializer.serialize_i16(*v),
            Value::Int32(v) => serializer.serialize_i32(*v),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Uint(v) => serializer.serialize_u64(*v as u64),
            Value::Uint8(v) => serializer.serialize_u8(*v),
            Value::Uint16(v) => serializer.serialize_u16(*v),
            Value::Uint32(v) => serializer.serialize_u32(*v),
            Value::Uint64(v) => serializer.serialize_u64(*v),
            Value::Float32(v) => serializer.serialize_f32(*v),
            Value::Float64(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::UnixTime(v) => serializer.serialize_i64(v.nanos()),
            Value::Time(v) => {
                serializer.serialize_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Skip => serializer.serialize_unit(),
        }
    }
}

/// Serializes an [`Instance`] as a map keyed by the `tag_key` tag entries.
///
/// ```
/// use dynstruct::{codec::Tagged, Builder};
///
/// let ds = Builder::new()
///     .add_string_field("Name", r#"json:"name""#)
///     .build()
///     .unwrap();
/// let mut inst = ds.new_instance();
/// inst.set("Name", "Bob").unwrap();
///
/// let out = serde_json::to_string(&Tagged::new(&inst, "json")).unwrap();
/// assert_eq!(out, r#"{"name":"Bob"}"#);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Tagged<'a> {
    instance: &'a Instance,
    tag_key: &'a str,
}

impl<'a> Tagged<'a> {
    pub fn new(instance: &'a Instance, tag_key: &'a str) -> Self {
        Self { instance, tag_key }
    }
}

impl Serialize for Tagged<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries: Vec<(String, &Value)> = wire_fields(self.instance.descriptor(), self.tag_key)
            .into_iter()
            .map(|wf| (wf.key, wf.omit_empty, self.instance.slot(wf.index)))
            .filter(|(_, omit_empty, value)| !(*omit_empty && value.is_zero()))
            .map(|(key, _, value)| (key, value))
            .collect();

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in &entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
