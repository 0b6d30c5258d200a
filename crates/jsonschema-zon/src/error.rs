use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// An error that makes a schema document unusable.
///
/// Errors raised inside a sub-schema are reported as [`CompileError::Nested`], carrying the JSON
/// pointer of the enclosing fragment; [`CompileError::root_cause`] returns the innermost error.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("'$id' not found in JSON Schema document")]
    MissingId,
    #[error("array schema declares neither 'items' nor 'prefixItems': {fragment}")]
    MissingItems { fragment: Value },
    #[error("unknown type {ty}: {fragment}")]
    UnknownType { ty: Value, fragment: Value },
    #[error("schema declares none of 'type', 'enum', 'const' or '$ref': {fragment}")]
    UnrecognizedSchemaShape { fragment: Value },
    #[error("'required' must be an array of property names, got {value}")]
    InvalidRequired { value: Value },
    #[error("'additionalProperties' must either be a valid JSON Schema or false, got {value}")]
    InvalidAdditionalProperties { value: Value },
    #[error("'{keyword}' has an invalid value: {value}")]
    InvalidKeyword { keyword: &'static str, value: Value },
    #[error("reference '{reference}' is not defined")]
    UnresolvedRef { reference: String },
    #[error("reference '{reference}' only refers to other references")]
    CircularRef { reference: String },
    #[error("schema nesting exceeds the limit of {limit} levels")]
    DepthExceeded { limit: usize },
    #[error("invalid schema at '{location}': {source}")]
    Nested {
        location: String,
        #[source]
        source: Box<CompileError>,
    },
}

impl CompileError {
    /// Attach the location of the enclosing fragment, e.g. `/properties/name`.
    ///
    /// Nested errors are flattened, so there is at most one `Nested` level whose location is
    /// relative to the outermost fragment that wrapped it.
    pub(crate) fn within(self, segments: &[&str]) -> Self {
        let mut prefix = String::new();
        for segment in segments {
            prefix.push('/');
            prefix.push_str(&escape_segment(segment));
        }
        match self {
            CompileError::Nested { location, source } => CompileError::Nested {
                location: prefix + &location,
                source,
            },
            other => CompileError::Nested {
                location: prefix,
                source: Box::new(other),
            },
        }
    }

    /// The error that caused compilation to fail, without location context.
    #[must_use]
    pub fn root_cause(&self) -> &CompileError {
        match self {
            CompileError::Nested { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// JSON pointer to the fragment that failed, relative to the compiled value.
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            CompileError::Nested { location, .. } => location,
            _ => "",
        }
    }
}

pub(crate) fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// An error that happened while loading a schema document.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Compile(#[from] CompileError),
}
