// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tag-aware serde bridge for instances.
//!
//! The core never reads tags. This layer does: each field's entry under the
//! format key (`json`, `yaml`, ...) picks the serialized key and options.
//!
//! | tag value           | effect                                   |
//! |---------------------|------------------------------------------|
//! | absent / `""`       | key is the field name                    |
//! | `name`              | key is `name`                            |
//! | `-`                 | field never serialized                   |
//! | `name,omitempty`    | omitted while holding its zero value     |
//!
//! `omitempty` has no effect on `time` fields; a `unix_time` field is
//! omitted at `0` (the epoch). Fields sharing a key collide: a single tagged
//! field wins over untagged ones, otherwise every contender is dropped.
//! [`FieldKind::Skip`](crate::FieldKind::Skip) fields are never emitted.
//! `UnixTime` travels as integer nanoseconds, `Time` as an RFC 3339 string.
//!
//! [`Tagged`] and [`InstanceSeed`] work with any serde data format; the
//! [`json`] and [`yaml`] modules wrap the common cases.

mod de;
mod ser;

#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "yaml")]
pub mod yaml;

pub use de::InstanceSeed;
pub use ser::Tagged;

use crate::descriptor::DynamicStruct;
use crate::field::FieldKind;
use crate::tag::Tag;
use std::collections::HashMap;
use thiserror::Error;

/// Encoding or decoding failure.
#[derive(Debug, Error)]
pub enum CodecError {
    #[cfg(feature = "json")]
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "yaml")]
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// NaN or infinite float in a format that cannot represent it.
    #[error("field {field:?}: non-finite float is not representable")]
    NonFinite { field: String },
}

/// A field as seen by one format.
#[derive(Debug)]
pub(crate) struct WireField {
    pub index: usize,
    pub key: String,
    pub omit_empty: bool,
    /// Key comes from the tag rather than the field name.
    pub tagged: bool,
}

/// Serializable fields of `descriptor` under `tag_key`, in layout order.
///
/// Each key maps to at most one field. When several fields resolve to the
/// same key, the single tagged one wins; with zero or several tagged
/// fields, all of them are dropped.
pub(crate) fn wire_fields(descriptor: &DynamicStruct, tag_key: &str) -> Vec<WireField> {
    let candidates: Vec<WireField> = descriptor
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, field)| *field.kind() != FieldKind::Skip)
        .filter_map(|(index, field)| {
            let format = Tag::new(field.tag()).format(tag_key);
            if format.skip {
                return None;
            }
            Some(WireField {
                index,
                key: format.key(field.name()).to_string(),
                // Calendar times are never omitted.
                omit_empty: format.omit_empty && *field.kind() != FieldKind::Time,
                tagged: format.rename.is_some(),
            })
        })
        .collect();

    let mut by_key: HashMap<&str, (usize, usize)> = HashMap::new();
    for wf in &candidates {
        let (total, tagged) = by_key.entry(wf.key.as_str()).or_default();
        *total += 1;
        if wf.tagged {
            *tagged += 1;
        }
    }

    let keep: Vec<bool> = candidates
        .iter()
        .map(|wf| match by_key.get(wf.key.as_str()) {
            Some(&(1, _)) => true,
            Some(&(_, 1)) => wf.tagged,
            _ => false,
        })
        .collect();
    for (wf, kept) in candidates.iter().zip(&keep) {
        if !kept {
            log::debug!(
                "[codec] dropping field #{} from {}: key {:?} is ambiguous",
                wf.index,
                tag_key,
                wf.key
            );
        }
    }

    candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(wf, kept)| kept.then_some(wf))
        .collect()
}
