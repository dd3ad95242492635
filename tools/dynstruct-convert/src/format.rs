// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use dynstruct::codec::{json, yaml, CodecError};
use dynstruct::{DynamicStruct, Instance};
use std::path::Path;

/// Data format on either side of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Guess from a file extension.
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    pub fn decode(self, descriptor: &DynamicStruct, input: &str) -> Result<Instance, CodecError> {
        match self {
            Self::Json => json::from_str(descriptor, input),
            Self::Yaml => yaml::from_str(descriptor, input),
        }
    }

    /// `pretty` only affects JSON; YAML output is always block style.
    pub fn encode(self, instance: &Instance, pretty: bool) -> Result<String, CodecError> {
        match self {
            Self::Json if pretty => json::to_string_pretty(instance),
            Self::Json => json::to_string(instance),
            Self::Yaml => yaml::to_string(instance),
        }
    }
}
