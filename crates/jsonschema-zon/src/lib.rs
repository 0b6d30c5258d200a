//! # jsonschema-zon
//!
//! Compiles JSON Schema documents into [`zon`] validators.
//!
//! Compilation has two phases. A raw document is parsed into a [`SchemaDocument`]: a tree of
//! [`SchemaNode`]s plus a [`Registry`] holding the entries of `$defs`. A validator is then
//! generated from the tree, with `$ref`s resolved through the registry.
//!
//! ```rust
//! use serde_json::json;
//!
//! let schema = json!({
//!     "$id": "https://example.com/person.json",
//!     "$defs": {
//!         "Name": {"type": "string"}
//!     },
//!     "type": "object",
//!     "properties": {
//!         "name": {"$ref": "#/$defs/Name"},
//!         "age": {"type": "integer"}
//!     },
//!     "required": ["name"],
//!     "additionalProperties": false
//! });
//! let validator = jsonschema_zon::validator_for(&schema).expect("Valid schema");
//!
//! assert!(validator.is_valid(&json!({"name": "Ada"})));
//! assert!(!validator.is_valid(&json!({"age": 36})));
//!
//! let instance = json!({"name": "Ada", "age": "old"});
//! let errors = validator.validate(&instance).unwrap_err();
//! assert_eq!(errors[0].path(), "/age");
//! ```
//!
//! Only a subset of JSON Schema is supported: the `boolean`, `string`, `integer`, `number`,
//! `object` and `array` types, `enum`, `const` and references into `$defs`. Other keywords are
//! ignored.
mod error;
mod generate;
mod options;
mod parse;
pub mod reader;
mod registry;
mod schema;

pub use error::{CompileError, ReadError};
pub use generate::generate;
pub use options::{CompileOptions, DEFAULT_MAX_DEPTH};
pub use registry::{Registry, DEFINITIONS_PREFIX};
pub use schema::{
    AdditionalProperties, ArrayNode, ExtraItems, ObjectNode, SchemaDocument, SchemaNode,
};
pub use zon;

use serde_json::Value;
use zon::Validator;

/// Options for compiling schema documents.
#[must_use]
pub fn options() -> CompileOptions {
    CompileOptions::default()
}

/// Parse a single schema with the default options.
///
/// The schema does not have to be a full document, so `$id` is not required. A `$ref` inside it
/// needs a registry to be generated, see [`generate`].
///
/// # Errors
///
/// Fails if the schema is malformed.
pub fn parse(raw: &Value) -> Result<SchemaNode, CompileError> {
    options().parse_node(raw)
}

/// Compile a schema document and generate the validator for its root schema.
///
/// # Errors
///
/// Fails if the document is malformed or refers to an undefined definition.
pub fn validator_for(raw: &Value) -> Result<Validator, CompileError> {
    options().build(raw)
}
