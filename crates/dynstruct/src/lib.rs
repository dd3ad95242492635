// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime-defined struct types
//!
//! Declare record types while the program runs, create independent values of
//! them and exchange those values with serde formats.
//!
//! # Features
//!
//! - **Builder**: Validating field registry, errors accumulated until `build`
//! - **DynamicStruct**: Immutable descriptor with name-sorted field layout
//! - **Instance**: Typed, independently owned field values
//! - **Tags**: Opaque per-field metadata read by the codecs (`json:"name"`)
//! - **Codecs**: JSON/YAML exchange honoring tags (`json`, `yaml` features)
//! - **Schema files**: Load field declarations from YAML or JSON
//!
//! # Example
//!
//! ```rust
//! use dynstruct::{Builder, FieldKind};
//!
//! let person = Builder::new()
//!     .add_field("Name", FieldKind::String, r#"json:"name""#)
//!     .add_field("Age", FieldKind::Int, r#"json:"age""#)
//!     .build()
//!     .unwrap();
//!
//! let mut bob = person.new_instance();
//! bob.set("Name", "Bob").unwrap();
//! bob.set("Age", 25isize).unwrap();
//!
//! # #[cfg(feature = "json")]
//! assert_eq!(
//!     dynstruct::codec::json::to_string(&bob).unwrap(),
//!     r#"{"age":25,"name":"Bob"}"#
//! );
//! ```

mod builder;
pub mod codec;
mod descriptor;
mod error;
mod field;
mod instance;
#[cfg(feature = "yaml")]
pub mod schema;
mod tag;
mod typed;
mod value;

pub use builder::Builder;
pub use descriptor::DynamicStruct;
pub use error::{BuildError, FieldError, InstanceError};
pub use field::{check_name, is_exported, Field, FieldKind, ParseKindError};
pub use instance::Instance;
pub use tag::{FormatTag, Tag};
pub use typed::{FieldType, Skip};
pub use value::{zero_time, FromValue, UnixTime, Value};
