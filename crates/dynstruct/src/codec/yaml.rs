// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! YAML encoding keyed by `yaml:"..."` tag entries.

use super::{CodecError, InstanceSeed, Tagged};
use crate::descriptor::DynamicStruct;
use crate::instance::Instance;
use serde::de::DeserializeSeed;

/// Tag entry consulted for keys and options.
pub const TAG_KEY: &str = "yaml";

pub fn to_string(instance: &Instance) -> Result<String, CodecError> {
    Ok(serde_yaml::to_string(&Tagged::new(instance, TAG_KEY))?)
}

/// Decode a single YAML mapping into a new instance of `descriptor`.
pub fn from_str(descriptor: &DynamicStruct, input: &str) -> Result<Instance, CodecError> {
    let de = serde_yaml::Deserializer::from_str(input);
    Ok(InstanceSeed::new(descriptor, TAG_KEY).deserialize(de)?)
}
