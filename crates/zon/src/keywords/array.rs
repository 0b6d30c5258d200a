use serde_json::Value;

use crate::{
    error::{error, no_error, ErrorIterator, ValidationError},
    paths::LazyLocation,
    types::JsonType,
    validator::{Validate, Validator},
};

/// Every element must satisfy the same validator.
pub(crate) struct ListValidator {
    item: Box<Validator>,
}

impl ListValidator {
    pub(crate) fn new(item: Validator) -> Self {
        ListValidator {
            item: Box::new(item),
        }
    }
}

impl Validate for ListValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Array(items) = instance {
            items.iter().all(|item| self.item.is_valid(item))
        } else {
            false
        }
    }

    fn iter_errors<'i>(&self, instance: &'i Value, location: &LazyLocation) -> ErrorIterator<'i> {
        if let Value::Array(items) = instance {
            let errors: Vec<_> = items
                .iter()
                .enumerate()
                .flat_map(|(idx, item)| self.item.iter_errors_at(item, &location.push(idx)))
                .collect();
            Box::new(errors.into_iter())
        } else {
            error(ValidationError::single_type_error(
                location.into(),
                instance,
                JsonType::Array,
            ))
        }
    }
}

/// A validator for arrays with a fixed, positional prefix.
///
/// Built with [`crate::element_tuple`]. Elements past the prefix are rejected unless a
/// [`Tuple::rest`] validator is given.
pub struct Tuple {
    items: Vec<Validator>,
    rest: Option<Box<Validator>>,
}

impl Tuple {
    pub(crate) fn new(items: Vec<Validator>) -> Self {
        Tuple { items, rest: None }
    }

    /// Validate every element past the prefix against `validator`.
    #[must_use]
    pub fn rest(mut self, validator: impl Into<Validator>) -> Self {
        self.rest = Some(Box::new(validator.into()));
        self
    }

    #[must_use]
    pub fn optional(self) -> Validator {
        Validator::from(self).optional()
    }
}

impl From<Tuple> for Validator {
    fn from(tuple: Tuple) -> Self {
        Validator::from_validate(TupleValidator {
            items: tuple.items,
            rest: tuple.rest,
        })
    }
}

struct TupleValidator {
    items: Vec<Validator>,
    rest: Option<Box<Validator>>,
}

impl Validate for TupleValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        let Value::Array(elements) = instance else {
            return false;
        };
        if elements.len() < self.items.len() {
            return false;
        }
        let (prefix, extra) = elements.split_at(self.items.len());
        if !self
            .items
            .iter()
            .zip(prefix)
            .all(|(validator, element)| validator.is_valid(element))
        {
            return false;
        }
        match &self.rest {
            Some(rest) => extra.iter().all(|element| rest.is_valid(element)),
            None => extra.is_empty(),
        }
    }

    fn iter_errors<'i>(&self, instance: &'i Value, location: &LazyLocation) -> ErrorIterator<'i> {
        let Value::Array(elements) = instance else {
            return error(ValidationError::single_type_error(
                location.into(),
                instance,
                JsonType::Array,
            ));
        };
        if self.is_valid(instance) {
            return no_error();
        }
        let mut errors = Vec::new();
        if elements.len() < self.items.len() {
            errors.push(ValidationError::too_short(
                location.into(),
                instance,
                self.items.len(),
            ));
        }
        for (idx, (validator, element)) in self.items.iter().zip(elements).enumerate() {
            errors.extend(validator.iter_errors_at(element, &location.push(idx)));
        }
        if elements.len() > self.items.len() {
            match &self.rest {
                Some(rest) => {
                    for (idx, element) in elements.iter().enumerate().skip(self.items.len()) {
                        errors.extend(rest.iter_errors_at(element, &location.push(idx)));
                    }
                }
                None => errors.push(ValidationError::additional_items(
                    location.into(),
                    instance,
                    self.items.len(),
                )),
            }
        }
        Box::new(errors.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        anything, boolean, element_list, element_tuple, integer_number, never, string,
        ValidationErrorKind, Validator,
    };
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!([]), true; "empty")]
    #[test_case(&json!(["a", "b"]), true; "all strings")]
    #[test_case(&json!(["a", 1]), false; "one integer")]
    #[test_case(&json!({"0": "a"}), false; "not an array")]
    fn list(instance: &Value, expected: bool) {
        let validator = element_list(string());
        assert_eq!(validator.is_valid(instance), expected);
        assert_eq!(validator.validate(instance).is_ok(), expected);
    }

    #[test]
    fn list_error_locations() {
        let instance = json!([1, "x", 2, "y"]);
        let errors = element_list(integer_number())
            .validate(&instance)
            .expect_err("Should fail");
        let paths: Vec<_> = errors.iter().map(|error| error.path().to_string()).collect();
        assert_eq!(paths, vec!["/1", "/3"]);
    }

    fn pair() -> Vec<Validator> {
        vec![string(), boolean()]
    }

    #[test_case(&json!(["x", true]), true; "exact")]
    #[test_case(&json!(["x", true, 99]), false; "extra element")]
    #[test_case(&json!(["x"]), false; "too short")]
    #[test_case(&json!([1, true]), false; "wrong prefix")]
    fn tuple_without_rest(instance: &Value, expected: bool) {
        let validator: Validator = element_tuple(pair()).into();
        assert_eq!(validator.is_valid(instance), expected);
        assert_eq!(validator.validate(instance).is_ok(), expected);
    }

    #[test_case(&json!(["x", true]), true)]
    #[test_case(&json!(["x", true, 99, null]), true)]
    #[test_case(&json!(["x", "not-bool"]), false)]
    fn tuple_rest_anything(instance: &Value, expected: bool) {
        let validator: Validator = element_tuple(pair()).rest(anything()).into();
        assert_eq!(validator.is_valid(instance), expected);
        assert_eq!(validator.validate(instance).is_ok(), expected);
    }

    #[test_case(&json!(["x", true, 1, 2]), true)]
    #[test_case(&json!(["x", true, "nope"]), false)]
    fn tuple_rest_integer(instance: &Value, expected: bool) {
        let validator: Validator = element_tuple(pair()).rest(integer_number()).into();
        assert_eq!(validator.is_valid(instance), expected);
        assert_eq!(validator.validate(instance).is_ok(), expected);
    }

    #[test]
    fn tuple_rest_never_reports_each_element() {
        let validator: Validator = element_tuple(pair()).rest(never()).into();
        let instance = json!(["x", true, 1, 2]);
        let errors = validator.validate(&instance).expect_err("Should fail");
        let paths: Vec<_> = errors.iter().map(|error| error.path().to_string()).collect();
        assert_eq!(paths, vec!["/2", "/3"]);
    }

    #[test]
    fn tuple_too_short_error() {
        let validator: Validator = element_tuple(pair()).rest(anything()).into();
        let instance = json!([5]);
        let errors = validator.validate(&instance).expect_err("Should fail");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, ValidationErrorKind::TooShort { limit: 2 });
        assert_eq!(errors[0].path(), "");
        assert_eq!(errors[1].path(), "/0");
    }

    #[test]
    fn empty_tuple() {
        let validator: Validator = element_tuple(Vec::new()).into();
        assert!(validator.is_valid(&json!([])));
        assert!(!validator.is_valid(&json!([1])));
    }
}
