use core::fmt;

use serde_json::Value;

/// JSON value types as reported in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JsonType::Array => "array",
            JsonType::Boolean => "boolean",
            JsonType::Integer => "integer",
            JsonType::Null => "null",
            JsonType::Number => "number",
            JsonType::Object => "object",
            JsonType::String => "string",
        })
    }
}

impl From<&Value> for JsonType {
    fn from(instance: &Value) -> Self {
        match instance {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Boolean,
            Value::Number(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }
}

impl JsonType {
    const fn bit(self) -> u8 {
        match self {
            JsonType::Array => 1 << 0,
            JsonType::Boolean => 1 << 1,
            JsonType::Integer => 1 << 2,
            JsonType::Null => 1 << 3,
            JsonType::Number => 1 << 4,
            JsonType::Object => 1 << 5,
            JsonType::String => 1 << 6,
        }
    }
}

/// A compact set of [`JsonType`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct JsonTypeSet(u8);

impl JsonTypeSet {
    pub(crate) const fn empty() -> Self {
        JsonTypeSet(0)
    }

    #[must_use]
    pub(crate) const fn insert(self, ty: JsonType) -> Self {
        JsonTypeSet(self.0 | ty.bit())
    }

    pub(crate) fn contains_value_type(self, instance: &Value) -> bool {
        self.0 & JsonType::from(instance).bit() != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!(null), JsonType::Null)]
    #[test_case(&json!(true), JsonType::Boolean)]
    #[test_case(&json!(1), JsonType::Number)]
    #[test_case(&json!(1.5), JsonType::Number)]
    #[test_case(&json!("a"), JsonType::String)]
    #[test_case(&json!([]), JsonType::Array)]
    #[test_case(&json!({}), JsonType::Object)]
    fn type_of_value(instance: &Value, expected: JsonType) {
        assert_eq!(JsonType::from(instance), expected);
    }

    #[test]
    fn type_set_membership() {
        let set = JsonTypeSet::empty()
            .insert(JsonType::String)
            .insert(JsonType::Boolean);
        assert!(set.contains_value_type(&json!("x")));
        assert!(set.contains_value_type(&json!(false)));
        assert!(!set.contains_value_type(&json!(1)));
        assert!(!set.contains_value_type(&json!(null)));
    }
}
