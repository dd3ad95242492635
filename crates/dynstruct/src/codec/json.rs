// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON encoding keyed by `json:"..."` tag entries.

use super::{wire_fields, CodecError, InstanceSeed, Tagged};
use crate::descriptor::DynamicStruct;
use crate::instance::Instance;
use serde::de::DeserializeSeed;

/// Tag entry consulted for keys and options.
pub const TAG_KEY: &str = "json";

/// Encode as compact JSON.
///
/// NaN and infinite floats fail with [`CodecError::NonFinite`].
pub fn to_string(instance: &Instance) -> Result<String, CodecError> {
    check_finite(instance)?;
    Ok(serde_json::to_string(&Tagged::new(instance, TAG_KEY))?)
}

pub fn to_string_pretty(instance: &Instance) -> Result<String, CodecError> {
    check_finite(instance)?;
    Ok(serde_json::to_string_pretty(&Tagged::new(instance, TAG_KEY))?)
}

/// Encode into a `serde_json::Value` tree.
pub fn to_value(instance: &Instance) -> Result<serde_json::Value, CodecError> {
    check_finite(instance)?;
    Ok(serde_json::to_value(Tagged::new(instance, TAG_KEY))?)
}

// serde_json writes non-finite floats as `null`, which decodes back to zero.
fn check_finite(instance: &Instance) -> Result<(), CodecError> {
    let fields = instance.descriptor().fields();
    match wire_fields(instance.descriptor(), TAG_KEY)
        .into_iter()
        .find(|wf| !instance.slot(wf.index).is_finite())
    {
        Some(wf) => Err(CodecError::NonFinite {
            field: fields[wf.index].name().to_string(),
        }),
        None => Ok(()),
    }
}

/// Decode a JSON object into a new instance of `descriptor`.
///
/// Trailing content after the object is an error.
pub fn from_str(descriptor: &DynamicStruct, input: &str) -> Result<Instance, CodecError> {
    let mut de = serde_json::Deserializer::from_str(input);
    let instance = InstanceSeed::new(descriptor, TAG_KEY).deserialize(&mut de)?;
    de.end()?;
    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Builder, FieldKind, Value};
    use chrono::{TimeZone, Utc};

    fn person() -> DynamicStruct {
        Builder::new()
            .add_field("Name", FieldKind::String, r#"json:"name""#)
            .add_field("Age", FieldKind::Int, r#"json:"age""#)
            .build()
            .expect("build")
    }

    #[test]
    fn test_encode_uses_tag_keys() {
        let mut inst = person().new_instance();
        inst.set("Name", "Bob").expect("name");
        inst.set("Age", 25isize).expect("age");

        assert_eq!(to_string(&inst).expect("encode"), r#"{"age":25,"name":"Bob"}"#);
    }

    #[test]
    fn test_decode_matches_keys() {
        let ds = person();
        let inst = from_str(&ds, r#"{"NAME":"Eve","age":41,"extra":[1,2]}"#).expect("decode");
        assert_eq!(inst.get_as::<String>("Name").as_deref(), Some("Eve"));
        assert_eq!(inst.get("Age"), Some(&Value::Int(41)));
    }

    #[test]
    fn test_decode_null_and_missing() {
        let ds = person();
        let inst = from_str(&ds, r#"{"name":null}"#).expect("decode");
        assert_eq!(inst, ds.new_instance());
    }

    #[test]
    fn test_decode_errors() {
        let ds = person();
        assert!(matches!(
            from_str(&ds, r#"{"age":"old"}"#),
            Err(CodecError::Json(_))
        ));
        assert!(from_str(&ds, "[1,2]").is_err());
        assert!(from_str(&ds, "{} {}").is_err());
    }

    #[test]
    fn test_time_encoding() {
        let ds = Builder::new()
            .add_time_field("CreatedAt", r#"json:"created_at""#)
            .add_unix_time_field("Stamp", r#"json:"stamp""#)
            .build()
            .expect("build");
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).single().expect("time");

        let mut inst = ds.new_instance();
        inst.set("CreatedAt", at).expect("time");
        inst.set("Stamp", crate::UnixTime::from(at)).expect("stamp");

        let out = to_string(&inst).expect("encode");
        assert_eq!(
            out,
            r#"{"created_at":"2024-01-15T10:30:00Z","stamp":1705314600000000000}"#
        );
        assert_eq!(from_str(&ds, &out).expect("decode"), inst);
    }

    #[test]
    fn test_non_finite_floats_rejected() {
        let ds = Builder::new()
            .add_float64_field("F", "")
            .add_slice_field("Samples", FieldKind::Float32, r#"json:"samples""#)
            .add_float64_field("Hidden", r#"json:"-""#)
            .build()
            .expect("build");

        let mut inst = ds.new_instance();
        inst.set("Hidden", f64::NAN).expect("hidden");
        assert_eq!(to_string(&inst).expect("encode"), r#"{"F":0.0,"samples":[]}"#);

        inst.set("F", f64::INFINITY).expect("f");
        assert!(matches!(
            to_string(&inst),
            Err(CodecError::NonFinite { ref field }) if field == "F"
        ));
        assert!(to_string_pretty(&inst).is_err());
        assert!(to_value(&inst).is_err());

        inst.set("F", 2.5f64).expect("f");
        inst.set("Samples", vec![1.0f32, f32::NAN]).expect("samples");
        let err = to_string(&inst).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"field "Samples": non-finite float is not representable"#
        );
    }

    #[test]
    fn test_colliding_keys() {
        // Both tagged with the same key: neither is encoded or decoded.
        let ds = Builder::new()
            .add_int64_field("A", r#"json:"x""#)
            .add_int64_field("B", r#"json:"x""#)
            .add_int64_field("C", "")
            .build()
            .expect("build");
        let mut inst = ds.new_instance();
        inst.set("A", 1i64).expect("a");
        inst.set("B", 2i64).expect("b");
        assert_eq!(to_string(&inst).expect("encode"), r#"{"C":0}"#);

        let decoded = from_str(&ds, r#"{"x":5,"C":3}"#).expect("decode");
        assert_eq!(decoded.get("A"), Some(&Value::Int64(0)));
        assert_eq!(decoded.get("B"), Some(&Value::Int64(0)));
        assert_eq!(decoded.get("C"), Some(&Value::Int64(3)));

        // A tagged field beats an untagged one of the same name.
        let ds = Builder::new()
            .add_int64_field("Id", "")
            .add_int64_field("Key", r#"json:"Id""#)
            .build()
            .expect("build");
        let mut inst = ds.new_instance();
        inst.set("Id", 1i64).expect("id");
        inst.set("Key", 2i64).expect("key");
        let out = to_string(&inst).expect("encode");
        assert_eq!(out, r#"{"Id":2}"#);

        let decoded = from_str(&ds, &out).expect("decode");
        assert_eq!(decoded.get("Id"), Some(&Value::Int64(0)));
        assert_eq!(decoded.get("Key"), Some(&Value::Int64(2)));
    }

    #[test]
    fn test_omitempty_keeps_time() {
        let ds = Builder::new()
            .add_time_field("At", r#"json:"at,omitempty""#)
            .add_unix_time_field("Stamp", r#"json:"stamp,omitempty""#)
            .build()
            .expect("build");
        assert_eq!(
            to_string(&ds.new_instance()).expect("encode"),
            r#"{"at":"1970-01-01T00:00:00Z"}"#
        );
    }

    #[test]
    fn test_to_value() {
        let mut inst = person().new_instance();
        inst.set("Name", "Bob").expect("name");
        let value = to_value(&inst).expect("value");
        assert_eq!(value["name"], "Bob");
        assert_eq!(value["age"], 0);
    }
}
