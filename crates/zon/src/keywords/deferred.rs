//! Validators that refer to a validator which is still being built.
//!
//! A [`Slot`] hands out weak references while its target is constructed. Binding the slot moves the
//! finished validator into shared storage owned by the returned validator, so the references
//! nested inside it stay valid for as long as the tree exists and no reference cycle is formed.
use std::sync::{Arc, OnceLock, Weak};

use serde_json::Value;

use crate::{
    error::{error, ErrorIterator, ValidationError},
    paths::LazyLocation,
    validator::{Validate, Validator},
};

/// A placeholder for a validator that is not built yet.
#[derive(Debug, Default)]
pub struct Slot {
    cell: Arc<OnceLock<Validator>>,
}

impl Slot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A validator delegating to whatever gets bound to this slot.
    #[must_use]
    pub fn reference(&self) -> Validator {
        Validator::from_validate(DeferredValidator {
            target: Arc::downgrade(&self.cell),
        })
    }

    /// Whether [`Slot::reference`] was called.
    pub fn is_referenced(&self) -> bool {
        Arc::weak_count(&self.cell) > 0
    }

    /// Bind the finished validator to all references handed out so far.
    ///
    /// Returns `validator` unchanged if there are no references.
    pub fn bind(self, validator: Validator) -> Validator {
        if !self.is_referenced() {
            return validator;
        }
        match self.cell.set(validator) {
            Ok(()) => Validator::from_validate(SharedValidator { target: self.cell }),
            Err(validator) => validator,
        }
    }
}

struct DeferredValidator {
    target: Weak<OnceLock<Validator>>,
}

impl Validate for DeferredValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        self.target
            .upgrade()
            .is_some_and(|cell| cell.get().is_some_and(|target| target.is_valid(instance)))
    }

    fn iter_errors<'i>(&self, instance: &'i Value, location: &LazyLocation) -> ErrorIterator<'i> {
        if let Some(cell) = self.target.upgrade() {
            if let Some(target) = cell.get() {
                return target.iter_errors_at(instance, location);
            }
        }
        error(ValidationError::unbound(location.into(), instance))
    }
}

struct SharedValidator {
    target: Arc<OnceLock<Validator>>,
}

impl Validate for SharedValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        self.target
            .get()
            .is_some_and(|target| target.is_valid(instance))
    }

    fn iter_errors<'i>(&self, instance: &'i Value, location: &LazyLocation) -> ErrorIterator<'i> {
        match self.target.get() {
            Some(target) => target.iter_errors_at(instance, location),
            None => error(ValidationError::unbound(location.into(), instance)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Slot;
    use crate::{element_list, integer_number, record, ValidationErrorKind, Validator};
    use serde_json::json;

    // tree = {"value": integer, "children": [tree]?}
    fn tree() -> Validator {
        let slot = Slot::new();
        let node: Validator = record([
            ("value", integer_number()),
            ("children", element_list(slot.reference()).optional()),
        ])
        .into();
        slot.bind(node)
    }

    #[test]
    fn unreferenced_slot_returns_validator_as_is() {
        let slot = Slot::new();
        assert!(!slot.is_referenced());
        let validator = slot.bind(integer_number());
        assert!(validator.is_valid(&json!(1)));
    }

    #[test]
    fn recursive_structure() {
        let validator = tree();
        assert!(validator.is_valid(&json!({"value": 1})));
        assert!(validator.is_valid(&json!({
            "value": 1,
            "children": [
                {"value": 2, "children": []},
                {"value": 3, "children": [{"value": 4}]}
            ]
        })));
        assert!(!validator.is_valid(&json!({
            "value": 1,
            "children": [{"value": 2, "children": [{"value": "deep"}]}]
        })));
    }

    #[test]
    fn recursive_error_location() {
        let validator = tree();
        let instance = json!({
            "value": 1,
            "children": [{"value": 2, "children": [{"value": "deep"}]}]
        });
        let errors = validator.validate(&instance).expect_err("Should fail");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path(), "/children/0/children/0/value");
    }

    #[test]
    fn dangling_reference_is_reported() {
        let reference = {
            let slot = Slot::new();
            slot.reference()
        };
        let instance = json!(1);
        assert!(!reference.is_valid(&instance));
        let errors = reference.validate(&instance).expect_err("Should fail");
        assert_eq!(errors[0].kind, ValidationErrorKind::Unbound);
    }
}
