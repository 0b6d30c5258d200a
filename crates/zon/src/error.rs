//! Validation errors reported by validators.
use std::{borrow::Cow, fmt, iter::empty};

use serde_json::Value;

use crate::{paths::Location, types::JsonType};

/// An error that occurred during validation.
#[derive(Debug)]
pub struct ValidationError<'a> {
    /// Value of the property that failed validation.
    pub instance: Cow<'a, Value>,
    /// Type of validation error.
    pub kind: ValidationErrorKind,
    /// Path to the value that failed validation.
    pub instance_path: Location,
}

/// An iterator over instances of [`ValidationError`] that represent validation error for the
/// input instance.
pub type ErrorIterator<'a> = Box<dyn Iterator<Item = ValidationError<'a>> + Sync + Send + 'a>;

// Empty iterator means no error happened
pub(crate) fn no_error<'a>() -> ErrorIterator<'a> {
    Box::new(empty())
}

// A wrapper for one error
pub(crate) fn error(instance: ValidationError) -> ErrorIterator {
    Box::new(std::iter::once(instance))
}

/// Kinds of errors that may happen during validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationErrorKind {
    /// The value is not of the expected type.
    Type { expected: JsonType },
    /// A required property is absent.
    Required { property: String },
    /// An unknown property is present in a strict record.
    AdditionalProperty { property: String },
    /// The value differs from the expected literal.
    Constant { expected: Value },
    /// The value is not one of the listed options.
    Enum { options: Vec<Value> },
    /// A tuple is shorter than its fixed prefix.
    TooShort { limit: usize },
    /// A tuple without a rest validator has elements past its fixed prefix.
    AdditionalItems { limit: usize },
    /// The value is rejected unconditionally.
    Never,
    /// A deferred validator was evaluated before it was bound.
    Unbound,
}

impl<'a> ValidationError<'a> {
    fn new(instance: &'a Value, kind: ValidationErrorKind, instance_path: Location) -> Self {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind,
            instance_path,
        }
    }

    /// Converts into an owned error with a `'static` lifetime.
    #[must_use]
    pub fn to_owned(self) -> ValidationError<'static> {
        ValidationError {
            instance: Cow::Owned(self.instance.into_owned()),
            kind: self.kind,
            instance_path: self.instance_path,
        }
    }

    /// JSON pointer to the failing value.
    #[must_use]
    pub fn path(&self) -> &str {
        self.instance_path.as_str()
    }

    /// The failing value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.instance
    }

    /// Human-readable description of the failure.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub(crate) fn single_type_error(
        instance_path: Location,
        instance: &'a Value,
        expected: JsonType,
    ) -> Self {
        Self::new(instance, ValidationErrorKind::Type { expected }, instance_path)
    }

    pub(crate) fn required(instance_path: Location, instance: &'a Value, property: &str) -> Self {
        Self::new(
            instance,
            ValidationErrorKind::Required {
                property: property.to_string(),
            },
            instance_path,
        )
    }

    pub(crate) fn additional_property(
        instance_path: Location,
        instance: &'a Value,
        property: &str,
    ) -> Self {
        Self::new(
            instance,
            ValidationErrorKind::AdditionalProperty {
                property: property.to_string(),
            },
            instance_path,
        )
    }

    pub(crate) fn constant(instance_path: Location, instance: &'a Value, expected: &Value) -> Self {
        Self::new(
            instance,
            ValidationErrorKind::Constant {
                expected: expected.clone(),
            },
            instance_path,
        )
    }

    pub(crate) fn enumeration(
        instance_path: Location,
        instance: &'a Value,
        options: &[Value],
    ) -> Self {
        Self::new(
            instance,
            ValidationErrorKind::Enum {
                options: options.to_vec(),
            },
            instance_path,
        )
    }

    pub(crate) fn too_short(instance_path: Location, instance: &'a Value, limit: usize) -> Self {
        Self::new(instance, ValidationErrorKind::TooShort { limit }, instance_path)
    }

    pub(crate) fn additional_items(
        instance_path: Location,
        instance: &'a Value,
        limit: usize,
    ) -> Self {
        Self::new(
            instance,
            ValidationErrorKind::AdditionalItems { limit },
            instance_path,
        )
    }

    pub(crate) fn never(instance_path: Location, instance: &'a Value) -> Self {
        Self::new(instance, ValidationErrorKind::Never, instance_path)
    }

    pub(crate) fn unbound(instance_path: Location, instance: &'a Value) -> Self {
        Self::new(instance, ValidationErrorKind::Unbound, instance_path)
    }
}

impl std::error::Error for ValidationError<'_> {}

impl fmt::Display for ValidationError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValidationErrorKind::Type { expected } => {
                write!(f, r#"{} is not of type "{}""#, self.instance, expected)
            }
            ValidationErrorKind::Required { property } => {
                write!(f, r#""{property}" is a required property"#)
            }
            ValidationErrorKind::AdditionalProperty { property } => {
                write!(
                    f,
                    "Additional properties are not allowed ('{property}' was unexpected)"
                )
            }
            ValidationErrorKind::Constant { expected } => write!(f, "{expected} was expected"),
            ValidationErrorKind::Enum { options } => {
                write!(f, "{} is not one of ", self.instance)?;
                for (idx, option) in options.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{option}")?;
                }
                Ok(())
            }
            ValidationErrorKind::TooShort { limit } => {
                let suffix = if *limit == 1 { "" } else { "s" };
                write!(f, "{} has less than {limit} item{suffix}", self.instance)
            }
            ValidationErrorKind::AdditionalItems { limit } => {
                let suffix = if *limit == 1 { "" } else { "s" };
                write!(
                    f,
                    "Additional items are not allowed ({} has more than {limit} item{suffix})",
                    self.instance
                )
            }
            ValidationErrorKind::Never => write!(f, "{} is not allowed", self.instance),
            ValidationErrorKind::Unbound => {
                f.write_str("Deferred validator was evaluated before it was bound")
            }
        }
    }
}
