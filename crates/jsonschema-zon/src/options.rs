use serde_json::Value;
use zon::Validator;

use crate::{
    error::CompileError,
    parse::Compiler,
    schema::{SchemaDocument, SchemaNode},
};

/// Maximum nesting of sub-schemas accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration for compiling schema documents.
///
/// ```rust
/// use serde_json::json;
///
/// let document = jsonschema_zon::options()
///     .with_max_depth(8)
///     .parse(&json!({"$id": "point", "type": "integer"}))
///     .expect("Valid schema");
/// assert_eq!(document.id(), "point");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CompileOptions {
    /// Limit how deeply sub-schemas may be nested. The root schema is at depth zero.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse a full document: its `$id`, `$defs` and root schema.
    ///
    /// # Errors
    ///
    /// Fails if `$id` is missing or any schema in the document is malformed.
    pub fn parse(&self, raw: &Value) -> Result<SchemaDocument, CompileError> {
        Compiler::new(self.max_depth).parse_document(raw)
    }

    /// Parse a single schema that is not a full document. `$id` and `$defs` are not consulted.
    ///
    /// # Errors
    ///
    /// Fails if the schema is malformed.
    pub fn parse_node(&self, raw: &Value) -> Result<SchemaNode, CompileError> {
        Compiler::new(self.max_depth).parse_node(raw, 0)
    }

    /// Parse a document and generate the validator for its root schema.
    ///
    /// # Errors
    ///
    /// Fails if the document is malformed or refers to an undefined definition.
    pub fn build(&self, raw: &Value) -> Result<Validator, CompileError> {
        self.parse(raw)?.generate()
    }
}
