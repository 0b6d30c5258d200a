#![allow(clippy::float_cmp)]
use serde_json::{Number, Value};

use crate::{
    error::{error, no_error, ErrorIterator, ValidationError},
    paths::LazyLocation,
    types::JsonType,
    validator::Validate,
};

macro_rules! type_validator {
    ($name:ident, $ty:expr, $check:expr) => {
        pub(crate) struct $name;

        impl Validate for $name {
            #[inline]
            fn is_valid(&self, instance: &Value) -> bool {
                $check(instance)
            }

            fn iter_errors<'i>(
                &self,
                instance: &'i Value,
                location: &LazyLocation,
            ) -> ErrorIterator<'i> {
                if self.is_valid(instance) {
                    no_error()
                } else {
                    error(ValidationError::single_type_error(
                        location.into(),
                        instance,
                        $ty,
                    ))
                }
            }
        }
    };
}

type_validator!(BooleanValidator, JsonType::Boolean, |instance: &Value| {
    instance.is_boolean()
});
type_validator!(StringValidator, JsonType::String, |instance: &Value| {
    instance.is_string()
});
type_validator!(IntegerValidator, JsonType::Integer, |instance: &Value| {
    matches!(instance, Value::Number(number) if is_integer(number))
});
type_validator!(NumberValidator, JsonType::Number, |instance: &Value| {
    instance.is_number()
});

// `1.0` is an integer as well
fn is_integer(number: &Number) -> bool {
    number.is_u64()
        || number.is_i64()
        || number
            .as_f64()
            .is_some_and(|value| value.is_finite() && value.trunc() == value)
}

pub(crate) struct AnythingValidator;

impl Validate for AnythingValidator {
    #[inline]
    fn is_valid(&self, _: &Value) -> bool {
        true
    }

    fn iter_errors<'i>(&self, _: &'i Value, _: &LazyLocation) -> ErrorIterator<'i> {
        no_error()
    }
}

pub(crate) struct NeverValidator;

impl Validate for NeverValidator {
    #[inline]
    fn is_valid(&self, _: &Value) -> bool {
        false
    }

    fn iter_errors<'i>(&self, instance: &'i Value, location: &LazyLocation) -> ErrorIterator<'i> {
        error(ValidationError::never(location.into(), instance))
    }
}
