// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mutable values of a [`DynamicStruct`].

use crate::descriptor::DynamicStruct;
use crate::error::InstanceError;
use crate::field::Field;
use crate::tag::Tag;
use crate::value::{FromValue, Value};

/// One value of a dynamic struct type.
///
/// Slots follow the descriptor layout and always hold a value of the
/// declared kind. Instances are independent: mutating one never affects
/// another created from the same descriptor.
///
/// ```
/// use dynstruct::{Builder, FieldKind};
///
/// let ds = Builder::new()
///     .add_field("Name", FieldKind::String, "")
///     .build()
///     .unwrap();
///
/// let mut person = ds.new_instance();
/// person.set("Name", "Bob").unwrap();
/// assert_eq!(person.get_as::<String>("Name").as_deref(), Some("Bob"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    descriptor: DynamicStruct,
    values: Vec<Value>,
}

impl Instance {
    pub(crate) fn new(descriptor: DynamicStruct) -> Self {
        let values = descriptor
            .fields()
            .iter()
            .map(|f| Value::zero(f.kind()))
            .collect();
        Self { descriptor, values }
    }

    /// Descriptor this instance was created from.
    pub fn descriptor(&self) -> &DynamicStruct {
        &self.descriptor
    }

    /// Current value of a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.descriptor
            .field_index(name)
            .map(|idx| &self.values[idx])
    }

    /// Current value converted to a Rust type, `None` if absent or of
    /// another kind.
    pub fn get_as<T: FromValue>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(T::from_value)
    }

    /// Replace a field's value.
    ///
    /// # Errors
    ///
    /// [`InstanceError::FieldNotFound`] for unknown names and
    /// [`InstanceError::KindMismatch`] when the value does not fit the
    /// declared kind. The slot is unchanged on error.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), InstanceError> {
        let idx = self
            .descriptor
            .field_index(name)
            .ok_or_else(|| InstanceError::FieldNotFound(name.to_string()))?;
        let value = value.into();
        let kind = self.descriptor.fields()[idx].kind();
        if !value.matches_kind(kind) {
            return Err(InstanceError::KindMismatch {
                field: name.to_string(),
                expected: kind.clone(),
                got: value.type_name().to_string(),
            });
        }
        self.values[idx] = value;
        Ok(())
    }

    /// Tag of a field.
    pub fn tag(&self, name: &str) -> Option<Tag<'_>> {
        self.descriptor.tag(name)
    }

    /// Fields and their values in layout order.
    pub fn fields(&self) -> impl Iterator<Item = (&Field, &Value)> + '_ {
        self.descriptor.fields().iter().zip(self.values.iter())
    }

    /// Reset every field to its zero value.
    pub fn reset(&mut self) {
        for (slot, field) in self.values.iter_mut().zip(self.descriptor.fields()) {
            *slot = Value::zero(field.kind());
        }
    }

    pub(crate) fn slot(&self, idx: usize) -> &Value {
        &self.values[idx]
    }

    pub(crate) fn slot_mut(&mut self, idx: usize) -> &mut Value {
        &mut self.values[idx]
    }
}

#[cfg(test)]
mod tests {
    use crate::{Builder, FieldKind, InstanceError, Value};

    fn person() -> crate::DynamicStruct {
        Builder::new()
            .add_string_field("Name", r#"json:"name""#)
            .add_int64_field("Age", r#"json:"age""#)
            .add_slice_field("Tags", FieldKind::String, "")
            .build()
            .expect("build")
    }

    #[test]
    fn test_new_instance_is_zeroed() {
        let inst = person().new_instance();
        assert_eq!(inst.get("Name"), Some(&Value::String(String::new())));
        assert_eq!(inst.get("Age"), Some(&Value::Int64(0)));
        assert_eq!(inst.get("Tags"), Some(&Value::Sequence(Vec::new())));
        assert!(inst.get("Missing").is_none());
    }

    #[test]
    fn test_set_and_get() {
        let mut inst = person().new_instance();
        inst.set("Name", "Alice").expect("name");
        inst.set("Age", 30i64).expect("age");
        inst.set("Tags", vec!["a", "b"]).expect("tags");

        assert_eq!(inst.get_as::<String>("Name").as_deref(), Some("Alice"));
        assert_eq!(inst.get_as::<i64>("Age"), Some(30));
        assert_eq!(
            inst.get_as::<Vec<String>>("Tags"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(inst.get_as::<i32>("Age"), None);
    }

    #[test]
    fn test_set_errors() {
        let mut inst = person().new_instance();
        assert_eq!(
            inst.set("Missing", 1i64),
            Err(InstanceError::FieldNotFound("Missing".into()))
        );

        let err = inst.set("Age", "thirty").unwrap_err();
        assert!(matches!(err, InstanceError::KindMismatch { .. }));
        assert_eq!(err.to_string(), r#"field "Age": expected int64, got string"#);
        assert_eq!(inst.get("Age"), Some(&Value::Int64(0)));

        assert!(inst.set("Tags", vec![1i32]).is_err());
    }

    #[test]
    fn test_instances_are_independent() {
        let ds = person();
        let mut a = ds.new_instance();
        let b = ds.new_instance();
        a.set("Name", "changed").expect("set");

        assert_eq!(b.get_as::<String>("Name").as_deref(), Some(""));
        let c = a.clone();
        a.set("Name", "again").expect("set");
        assert_eq!(c.get_as::<String>("Name").as_deref(), Some("changed"));
    }

    #[test]
    fn test_fields_and_reset() {
        let mut inst = person().new_instance();
        inst.set("Age", 5i64).expect("set");

        let names: Vec<_> = inst.fields().map(|(f, _)| f.name()).collect();
        assert_eq!(names, ["Age", "Name", "Tags"]);
        assert_eq!(
            inst.tag("Age").and_then(|t| t.lookup("json")).as_deref(),
            Some("age")
        );

        inst.reset();
        assert_eq!(inst.get("Age"), Some(&Value::Int64(0)));
        assert_eq!(inst, person().new_instance());
    }
}
