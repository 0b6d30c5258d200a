use serde_json::Value;

use crate::{
    error::{error, no_error, ErrorIterator, ValidationError},
    ext::cmp,
    paths::LazyLocation,
    types::{JsonType, JsonTypeSet},
    validator::Validate,
};

pub(crate) struct LiteralValidator {
    value: Value,
}

impl LiteralValidator {
    pub(crate) fn new(value: Value) -> Self {
        LiteralValidator { value }
    }
}

impl Validate for LiteralValidator {
    #[inline]
    fn is_valid(&self, instance: &Value) -> bool {
        cmp::equal(&self.value, instance)
    }

    fn iter_errors<'i>(&self, instance: &'i Value, location: &LazyLocation) -> ErrorIterator<'i> {
        if self.is_valid(instance) {
            no_error()
        } else {
            error(ValidationError::constant(
                location.into(),
                instance,
                &self.value,
            ))
        }
    }
}

pub(crate) struct EnumValidator {
    // Types that occur in items
    types: JsonTypeSet,
    items: Vec<Value>,
}

impl EnumValidator {
    pub(crate) fn new(items: Vec<Value>) -> Self {
        let mut types = JsonTypeSet::empty();
        for item in &items {
            types = types.insert(JsonType::from(item));
        }
        EnumValidator { types, items }
    }
}

impl Validate for EnumValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        // If the input value type is not in the types present among the enum options, then there
        // is no reason to compare it against all items
        if self.types.contains_value_type(instance) {
            self.items.iter().any(|item| cmp::equal(instance, item))
        } else {
            false
        }
    }

    fn iter_errors<'i>(&self, instance: &'i Value, location: &LazyLocation) -> ErrorIterator<'i> {
        if self.is_valid(instance) {
            no_error()
        } else {
            error(ValidationError::enumeration(
                location.into(),
                instance,
                &self.items,
            ))
        }
    }
}
