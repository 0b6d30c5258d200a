use serde_json::Value;

use crate::{
    error::{ErrorIterator, ValidationError},
    paths::LazyLocation,
};

/// The core trait implemented by every validator in the tree.
///
/// `is_valid` is the fast path and must agree with `iter_errors` yielding nothing.
pub trait Validate: Send + Sync {
    fn is_valid(&self, instance: &Value) -> bool;

    fn iter_errors<'i>(&self, instance: &'i Value, location: &LazyLocation) -> ErrorIterator<'i>;

    fn validate<'i>(
        &self,
        instance: &'i Value,
        location: &LazyLocation,
    ) -> Result<(), ValidationError<'i>> {
        match self.iter_errors(instance, location).next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

pub(crate) type BoxedValidator = Box<dyn Validate>;

/// A composable validator.
///
/// The `optional` flag only matters when the validator is used as a record field: an optional
/// field accepts the absence of its key.
pub struct Validator {
    inner: BoxedValidator,
    optional: bool,
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("optional", &self.optional)
            .finish_non_exhaustive()
    }
}

impl Validator {
    pub(crate) fn from_validate(validate: impl Validate + 'static) -> Self {
        Validator {
            inner: Box::new(validate),
            optional: false,
        }
    }

    /// Accept the absence of the value when used as a record field.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Require the presence of the value. The inverse of [`Validator::optional`].
    #[must_use]
    pub fn unwrap(mut self) -> Self {
        self.optional = false;
        self
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Run validation and return a boolean result.
    #[inline]
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.inner.is_valid(instance)
    }

    /// Validate `instance` and collect every error.
    ///
    /// # Errors
    ///
    /// Returns all validation errors found in `instance`, in document order.
    pub fn validate<'i>(&self, instance: &'i Value) -> Result<(), Vec<ValidationError<'i>>> {
        let errors: Vec<_> = self.iter_errors(instance).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Iterate over all validation errors of `instance`.
    #[inline]
    pub fn iter_errors<'i>(&self, instance: &'i Value) -> ErrorIterator<'i> {
        self.inner.iter_errors(instance, &LazyLocation::new())
    }

    /// Iterate over the errors of `instance` nested at `location`.
    #[inline]
    pub(crate) fn iter_errors_at<'i>(
        &self,
        instance: &'i Value,
        location: &LazyLocation,
    ) -> ErrorIterator<'i> {
        self.inner.iter_errors(instance, location)
    }
}

impl Validate for Validator {
    #[inline]
    fn is_valid(&self, instance: &Value) -> bool {
        self.inner.is_valid(instance)
    }

    #[inline]
    fn iter_errors<'i>(&self, instance: &'i Value, location: &LazyLocation) -> ErrorIterator<'i> {
        self.inner.iter_errors(instance, location)
    }

    #[inline]
    fn validate<'i>(
        &self,
        instance: &'i Value,
        location: &LazyLocation,
    ) -> Result<(), ValidationError<'i>> {
        self.inner.validate(instance, location)
    }
}

#[cfg(test)]
mod tests {
    use crate::{element_list, element_tuple, integer_number, string, Validator};
    use serde_json::json;

    #[test]
    fn optional_and_unwrap_toggle_presence() {
        let validator = string().optional();
        assert!(validator.is_optional());
        let validator = validator.unwrap();
        assert!(!validator.is_optional());
    }

    #[test]
    fn optional_does_not_relax_the_value() {
        let validator = integer_number().optional();
        assert!(validator.is_valid(&json!(1)));
        assert!(!validator.is_valid(&json!(null)));
    }

    #[test]
    fn nested_errors_keep_their_location() {
        let validator: Validator = element_tuple([element_list(integer_number())])
            .rest(string())
            .into();
        let instance = json!([[1, "two"], 3]);
        let errors = validator.validate(&instance).expect_err("Should be invalid");
        let paths: Vec<_> = errors.iter().map(|error| error.path().to_string()).collect();
        assert_eq!(paths, vec!["/0/1", "/1"]);
    }

    #[test]
    fn validate_collects_errors() {
        let instance = json!(5);
        let errors = string()
            .validate(&instance)
            .expect_err("Should be invalid");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path(), "");
        assert_eq!(errors[0].message(), r#"5 is not of type "string""#);
        assert_eq!(errors[0].value(), &json!(5));
    }
}
