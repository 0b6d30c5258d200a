//! Loading schema documents from text and files.
use std::{fs, path::Path};

use tracing::debug;

use crate::{error::ReadError, options::CompileOptions, schema::SchemaDocument};

/// Parse a schema document from JSON text.
///
/// # Errors
///
/// Fails if the text is not JSON or the document is not a valid schema.
pub fn from_str(text: &str) -> Result<SchemaDocument, ReadError> {
    CompileOptions::default().read_str(text)
}

/// Parse a schema document from a JSON file.
///
/// # Errors
///
/// Fails if the file can not be read, is not JSON, or is not a valid schema.
pub fn from_path(path: impl AsRef<Path>) -> Result<SchemaDocument, ReadError> {
    CompileOptions::default().read_path(path)
}

impl CompileOptions {
    /// Parse a schema document from JSON text with these options.
    ///
    /// # Errors
    ///
    /// Fails if the text is not JSON or the document is not a valid schema.
    pub fn read_str(&self, text: &str) -> Result<SchemaDocument, ReadError> {
        let raw = serde_json::from_str(text)?;
        Ok(self.parse(&raw)?)
    }

    /// Parse a schema document from a JSON file with these options.
    ///
    /// # Errors
    ///
    /// Fails if the file can not be read, is not JSON, or is not a valid schema.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<SchemaDocument, ReadError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading schema");
        let text = fs::read_to_string(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.read_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::{from_path, from_str};
    use crate::error::{CompileError, ReadError};
    use std::io::Write;

    #[test]
    fn reads_text() {
        let document = from_str(r#"{"$id": "flag", "type": "boolean"}"#).expect("Valid schema");
        assert_eq!(document.id(), "flag");
    }

    #[test]
    fn invalid_json() {
        let error = from_str("{\"$id\": ").expect_err("Should fail");
        assert!(matches!(error, ReadError::Json(_)));
    }

    #[test]
    fn invalid_schema() {
        let error = from_str(r#"{"type": "boolean"}"#).expect_err("Should fail");
        assert!(matches!(error, ReadError::Compile(CompileError::MissingId)));
        assert_eq!(
            error.to_string(),
            "'$id' not found in JSON Schema document"
        );
    }

    #[test]
    fn reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create a file");
        write!(file, r#"{{"$id": "name", "type": "string"}}"#).expect("Failed to write");
        let document = from_path(file.path()).expect("Valid schema");
        assert_eq!(document.id(), "name");
        let validator = document.generate().expect("Valid schema");
        assert!(validator.is_valid(&serde_json::json!("Ada")));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().expect("Failed to create a directory");
        let path = dir.path().join("absent.json");
        let error = from_path(&path).expect_err("Should fail");
        assert!(matches!(error, ReadError::Io { .. }));
        assert!(error.to_string().starts_with("failed to read "));
    }
}
