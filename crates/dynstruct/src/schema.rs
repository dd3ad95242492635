// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema files describing a dynamic struct.
//!
//! # Example YAML
//!
//! ```yaml
//! fields:
//!   - name: Name
//!     type: string
//!     tag: 'json:"name" yaml:"name"'
//!   - name: Scores
//!     type: "[]int"
//!   - name: CreatedAt
//!     type: time
//! ```
//!
//! Type names are the [`FieldKind`] display names (`bool`, `int8`,
//! `uint64`, `float32`, `string`, `time`, `unix_time`, `skip`, `[]elem`).
//! JSON documents with the same shape are accepted as well.

use crate::builder::Builder;
use crate::codec::CodecError;
use crate::descriptor::DynamicStruct;
use crate::field::{FieldKind, ParseKindError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Root schema document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}

/// One field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,

    /// Kind name, e.g. `int64` or `[]string`.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema: {0}")]
    Parse(#[from] CodecError),

    #[error("field {field:?}: {source}")]
    UnknownKind {
        field: String,
        #[source]
        source: ParseKindError,
    },
}

impl SchemaDocument {
    pub fn from_yaml(content: &str) -> Result<Self, SchemaError> {
        serde_yaml::from_str(content)
            .map_err(|e| SchemaError::Parse(CodecError::from(e)))
    }

    #[cfg(feature = "json")]
    pub fn from_json(content: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(content)
            .map_err(|e| SchemaError::Parse(CodecError::from(e)))
    }

    /// Load a schema file. `.json` files are read as JSON, anything else as
    /// YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("[SchemaDocument] loading {}", path.display());

        #[cfg(feature = "json")]
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            return Self::from_json(&content);
        }
        Self::from_yaml(&content)
    }

    /// Describe an existing descriptor, fields in layout order.
    pub fn from_descriptor(descriptor: &DynamicStruct) -> Self {
        Self {
            fields: descriptor
                .fields()
                .iter()
                .map(|f| SchemaField {
                    name: f.name().to_string(),
                    kind: f.kind().to_string(),
                    tag: f.tag().to_string(),
                })
                .collect(),
        }
    }

    pub fn to_yaml(&self) -> Result<String, SchemaError> {
        serde_yaml::to_string(self).map_err(|e| SchemaError::Parse(CodecError::from(e)))
    }

    /// Register every field on a fresh builder.
    ///
    /// Unknown type names fail here. Name problems are left to the builder's
    /// diagnostics and surface from [`Builder::build`].
    pub fn into_builder(&self) -> Result<Builder, SchemaError> {
        let mut builder = Builder::new();
        for field in &self.fields {
            let kind: FieldKind =
                field
                    .kind
                    .parse()
                    .map_err(|source| SchemaError::UnknownKind {
                        field: field.name.clone(),
                        source,
                    })?;
            builder.add_field(field.name.as_str(), kind, field.tag.as_str());
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCHEMA: &str = r#"
fields:
  - name: Name
    type: string
    tag: 'json:"name" yaml:"name"'
  - name: Scores
    type: "[]int"
  - name: CreatedAt
    type: time
"#;

    #[test]
    fn test_parse_yaml() {
        let doc = SchemaDocument::from_yaml(SCHEMA).expect("parse");
        assert_eq!(doc.fields.len(), 3);
        assert_eq!(doc.fields[0].tag, r#"json:"name" yaml:"name""#);
        assert_eq!(doc.fields[1].kind, "[]int");
        assert_eq!(doc.fields[2].tag, "");

        let ds = doc.into_builder().expect("builder").build().expect("build");
        let names: Vec<_> = ds.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["CreatedAt", "Name", "Scores"]);
        assert_eq!(
            ds.field("Scores").map(|f| f.kind().clone()),
            Some(FieldKind::sequence_of(FieldKind::Int))
        );
    }

    #[test]
    fn test_empty_document() {
        let doc = SchemaDocument::from_yaml("{}").expect("parse");
        assert!(doc.fields.is_empty());
    }

    #[test]
    fn test_unknown_kind() {
        let doc = SchemaDocument::from_yaml("fields: [{name: X, type: complex64}]").expect("parse");
        let err = doc.into_builder().unwrap_err();
        assert!(matches!(err, SchemaError::UnknownKind { ref field, .. } if field == "X"));
    }

    #[test]
    fn test_bad_names_reach_build() {
        let doc =
            SchemaDocument::from_yaml("fields: [{name: lower, type: int}, {name: '', type: int}]")
                .expect("parse");
        let err = doc.into_builder().expect("builder").build().unwrap_err();
        assert_eq!(err.errors().len(), 2);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            SchemaDocument::from_yaml("fields: [{name: X}]"),
            Err(SchemaError::Parse(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("tempfile");
        file.write_all(SCHEMA.as_bytes()).expect("write");

        let doc = SchemaDocument::from_file(file.path()).expect("load");
        assert_eq!(doc.fields.len(), 3);

        let missing = SchemaDocument::from_file("/nonexistent/schema.yaml");
        assert!(matches!(missing, Err(SchemaError::Io { .. })));
    }

    #[test]
    fn test_descriptor_roundtrip() {
        let ds = SchemaDocument::from_yaml(SCHEMA)
            .and_then(|doc| doc.into_builder())
            .expect("builder")
            .build()
            .expect("build");

        let yaml = SchemaDocument::from_descriptor(&ds).to_yaml().expect("yaml");
        let again = SchemaDocument::from_yaml(&yaml)
            .and_then(|doc| doc.into_builder())
            .expect("builder")
            .build()
            .expect("build");
        assert_eq!(ds, again);
    }
}
