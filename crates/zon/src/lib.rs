//! # zon
//!
//! Composable validators for `serde_json::Value`.
//!
//! Validators are built from primitive constructors and combined into records, lists and tuples:
//!
//! ```rust
//! use serde_json::json;
//! use zon::{boolean, element_list, record, string, Validator};
//!
//! let vegetable: Validator = record([
//!     ("veggieName", string()),
//!     ("veggieLike", boolean()),
//! ])
//! .strict()
//! .into();
//! let validator: Validator = record([
//!     ("fruits", element_list(string()).optional()),
//!     ("vegetables", element_list(vegetable)),
//! ])
//! .into();
//!
//! assert!(validator.is_valid(&json!({
//!     "vegetables": [{"veggieName": "potato", "veggieLike": true}]
//! })));
//!
//! let instance = json!({"vegetables": [{"veggieName": "potato", "veggieLike": "yes"}]});
//! let errors = validator.validate(&instance).unwrap_err();
//! assert_eq!(errors[0].path(), "/vegetables/0/veggieLike");
//! assert_eq!(errors[0].message(), r#""yes" is not of type "boolean""#);
//! ```
mod error;
mod ext;
mod keywords;
mod paths;
mod types;
mod validator;

pub use error::{ErrorIterator, ValidationError, ValidationErrorKind};
pub use keywords::{array::Tuple, deferred::Slot, record::Record};
pub use paths::{LazyLocation, Location, LocationSegment};
pub use types::JsonType;
pub use validator::{Validate, Validator};

use serde_json::Value;

use keywords::{
    array::ListValidator,
    literal::{EnumValidator, LiteralValidator},
    primitives::{
        AnythingValidator, BooleanValidator, IntegerValidator, NeverValidator, NumberValidator,
        StringValidator,
    },
};

/// Accepts `true` and `false`.
#[must_use]
pub fn boolean() -> Validator {
    Validator::from_validate(BooleanValidator)
}

/// Accepts any string.
#[must_use]
pub fn string() -> Validator {
    Validator::from_validate(StringValidator)
}

/// Accepts numbers without a fractional part, `1.0` included.
#[must_use]
pub fn integer_number() -> Validator {
    Validator::from_validate(IntegerValidator)
}

/// Accepts any number.
#[must_use]
pub fn float_number() -> Validator {
    Validator::from_validate(NumberValidator)
}

/// An object validator with the given fields.
///
/// Fields are required unless their validator is [`Validator::optional`]. Undeclared keys pass
/// through unless [`Record::strict`] or [`Record::catchall`] is used.
pub fn record<I, K>(fields: I) -> Record
where
    I: IntoIterator<Item = (K, Validator)>,
    K: Into<String>,
{
    Record::new(fields)
}

/// An array whose elements all satisfy `item`.
#[must_use]
pub fn element_list(item: impl Into<Validator>) -> Validator {
    Validator::from_validate(ListValidator::new(item.into()))
}

/// An array whose leading elements satisfy `items` positionally.
pub fn element_tuple<I>(items: I) -> Tuple
where
    I: IntoIterator<Item = Validator>,
{
    Tuple::new(items.into_iter().collect())
}

/// Accepts values structurally equal to `value`.
#[must_use]
pub fn literal(value: Value) -> Validator {
    Validator::from_validate(LiteralValidator::new(value))
}

/// Accepts values structurally equal to one of `values`.
#[must_use]
pub fn enumeration(values: Vec<Value>) -> Validator {
    Validator::from_validate(EnumValidator::new(values))
}

/// Accepts every value.
#[must_use]
pub fn anything() -> Validator {
    Validator::from_validate(AnythingValidator)
}

/// Rejects every value.
#[must_use]
pub fn never() -> Validator {
    Validator::from_validate(NeverValidator)
}
