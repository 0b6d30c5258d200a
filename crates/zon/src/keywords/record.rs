use ahash::AHashSet;
use serde_json::{Map, Value};

use crate::{
    error::{error, no_error, ErrorIterator, ValidationError},
    paths::LazyLocation,
    types::JsonType,
    validator::{Validate, Validator},
};

/// What happens to object keys that are not declared as record fields.
enum UnknownKeys {
    /// Accepted without any check.
    Passthrough,
    /// Rejected.
    Strict,
    /// Validated against the given validator.
    Catchall(Box<Validator>),
}

/// A validator for JSON objects with a fixed set of fields.
///
/// Built with [`crate::record`] and converted into a [`Validator`] via `From`.
pub struct Record {
    fields: Vec<(String, Validator)>,
    unknown_keys: UnknownKeys,
}

impl Record {
    pub(crate) fn new<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Validator)>,
        K: Into<String>,
    {
        let mut collected: Vec<(String, Validator)> = Vec::new();
        for (name, validator) in fields {
            let name = name.into();
            if let Some(slot) = collected.iter_mut().find(|(existing, _)| *existing == name) {
                slot.1 = validator;
            } else {
                collected.push((name, validator));
            }
        }
        Record {
            fields: collected,
            unknown_keys: UnknownKeys::Passthrough,
        }
    }

    /// Reject keys that are not declared as fields.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Strict;
        self
    }

    /// Validate the values of undeclared keys against `validator`.
    #[must_use]
    pub fn catchall(mut self, validator: impl Into<Validator>) -> Self {
        self.unknown_keys = UnknownKeys::Catchall(Box::new(validator.into()));
        self
    }

    /// Accept undeclared keys without checking them. This is the default.
    #[must_use]
    pub fn passthrough(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Passthrough;
        self
    }

    #[must_use]
    pub fn optional(self) -> Validator {
        Validator::from(self).optional()
    }
}

impl From<Record> for Validator {
    fn from(record: Record) -> Self {
        let names = record.fields.iter().map(|(name, _)| name.clone()).collect();
        Validator::from_validate(RecordValidator {
            fields: record.fields,
            names,
            unknown_keys: record.unknown_keys,
        })
    }
}

struct RecordValidator {
    fields: Vec<(String, Validator)>,
    names: AHashSet<String>,
    unknown_keys: UnknownKeys,
}

impl RecordValidator {
    /// Entries of `object` that are not declared as fields.
    fn unknown<'s, 'o>(
        &'s self,
        object: &'o Map<String, Value>,
    ) -> impl Iterator<Item = (&'o String, &'o Value)> + 's
    where
        'o: 's,
    {
        object
            .iter()
            .filter(move |(name, _)| !self.names.contains(name.as_str()))
    }
}

impl Validate for RecordValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        let Value::Object(object) = instance else {
            return false;
        };
        for (name, validator) in &self.fields {
            match object.get(name) {
                Some(value) => {
                    if !validator.is_valid(value) {
                        return false;
                    }
                }
                None => {
                    if !validator.is_optional() {
                        return false;
                    }
                }
            }
        }
        match &self.unknown_keys {
            UnknownKeys::Passthrough => true,
            UnknownKeys::Strict => self.unknown(object).next().is_none(),
            UnknownKeys::Catchall(validator) => {
                self.unknown(object).all(|(_, value)| validator.is_valid(value))
            }
        }
    }

    fn iter_errors<'i>(&self, instance: &'i Value, location: &LazyLocation) -> ErrorIterator<'i> {
        let Value::Object(object) = instance else {
            return error(ValidationError::single_type_error(
                location.into(),
                instance,
                JsonType::Object,
            ));
        };
        if self.is_valid(instance) {
            return no_error();
        }
        let mut errors = Vec::new();
        for (name, validator) in &self.fields {
            match object.get(name) {
                Some(value) => {
                    errors.extend(validator.iter_errors_at(value, &location.push(name)));
                }
                None => {
                    if !validator.is_optional() {
                        errors.push(ValidationError::required(location.into(), instance, name));
                    }
                }
            }
        }
        match &self.unknown_keys {
            UnknownKeys::Passthrough => {}
            UnknownKeys::Strict => {
                for (name, _) in self.unknown(object) {
                    errors.push(ValidationError::additional_property(
                        location.into(),
                        instance,
                        name,
                    ));
                }
            }
            UnknownKeys::Catchall(validator) => {
                for (name, value) in self.unknown(object) {
                    errors.extend(validator.iter_errors_at(value, &location.push(name)));
                }
            }
        }
        Box::new(errors.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use crate::{boolean, integer_number, record, string, ValidationErrorKind, Validator};
    use serde_json::{json, Value};
    use test_case::test_case;

    fn fields() -> Vec<(&'static str, Validator)> {
        vec![
            ("name", string()),
            ("active", boolean().optional()),
        ]
    }

    #[test_case(&json!({"name": "x"}), true; "optional field absent")]
    #[test_case(&json!({"name": "x", "active": true}), true; "optional field present")]
    #[test_case(&json!({"name": "x", "active": "yes"}), false; "optional field invalid")]
    #[test_case(&json!({"active": true}), false; "required field absent")]
    #[test_case(&json!({"name": "x", "extra": 1}), true; "unknown keys pass through")]
    #[test_case(&json!(["name"]), false; "not an object")]
    fn passthrough(instance: &Value, expected: bool) {
        let validator: Validator = record(fields()).into();
        assert_eq!(validator.is_valid(instance), expected);
        assert_eq!(validator.validate(instance).is_ok(), expected);
    }

    #[test_case(&json!({"name": "x"}), true)]
    #[test_case(&json!({"name": "x", "extra": 1}), false)]
    fn strict(instance: &Value, expected: bool) {
        let validator: Validator = record(fields()).strict().into();
        assert_eq!(validator.is_valid(instance), expected);
        assert_eq!(validator.validate(instance).is_ok(), expected);
    }

    #[test_case(&json!({"name": "x", "extra": 1}), true)]
    #[test_case(&json!({"name": "x", "extra": "1"}), false)]
    #[test_case(&json!({"name": "x", "active": false, "a": 1, "b": 2}), true)]
    fn catchall(instance: &Value, expected: bool) {
        let validator: Validator = record(fields()).catchall(integer_number()).into();
        assert_eq!(validator.is_valid(instance), expected);
        assert_eq!(validator.validate(instance).is_ok(), expected);
    }

    #[test]
    fn passthrough_resets_policy() {
        let validator: Validator = record(fields()).strict().passthrough().into();
        assert!(validator.is_valid(&json!({"name": "x", "extra": 1})));
    }

    #[test]
    fn later_duplicate_field_wins() {
        let validator: Validator = record([("a", string()), ("a", boolean())]).into();
        assert!(validator.is_valid(&json!({"a": true})));
        assert!(!validator.is_valid(&json!({"a": "x"})));
    }

    #[test]
    fn error_locations() {
        let validator: Validator = record(fields()).strict().into();
        let instance = json!({"active": 1, "extra": null});
        let errors = validator.validate(&instance).expect_err("Should fail");
        let reported: Vec<_> = errors
            .iter()
            .map(|error| (error.path().to_string(), error.kind.clone()))
            .collect();
        assert_eq!(
            reported,
            vec![
                (
                    String::new(),
                    ValidationErrorKind::Required {
                        property: "name".to_string()
                    }
                ),
                (
                    "/active".to_string(),
                    ValidationErrorKind::Type {
                        expected: crate::JsonType::Boolean
                    }
                ),
                (
                    String::new(),
                    ValidationErrorKind::AdditionalProperty {
                        property: "extra".to_string()
                    }
                ),
            ]
        );
    }

    #[test]
    fn catchall_errors_point_at_unknown_keys() {
        let validator: Validator = record(fields()).catchall(integer_number()).into();
        let instance = json!({"name": "x", "a": 1, "b": "two", "c": null});
        let errors = validator.validate(&instance).expect_err("Should fail");
        let reported: Vec<_> = errors.iter().map(|error| error.path().to_string()).collect();
        assert_eq!(reported, vec!["/b", "/c"]);
        assert_eq!(errors[0].value(), &json!("two"));
    }

    #[test]
    fn nested_records() {
        let validator: Validator = record([(
            "outer",
            record([("inner", integer_number())]).into(),
        )])
        .into();
        let instance = json!({"outer": {"inner": "x"}});
        let errors = validator.validate(&instance).expect_err("Should fail");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path(), "/outer/inner");
    }
}
