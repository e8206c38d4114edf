//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Package description parsing error.
    #[error("package parse error: {0}")]
    Parse(#[from] cmdgen_schema::ParseError),

    /// Package lookup or validation error.
    #[error("schema error: {0}")]
    Schema(#[from] cmdgen_schema::SchemaError),

    /// Collection error.
    #[error("collection error: {0}")]
    Collection(#[from] cmdgen_core::CollectionError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },

    /// Two selected fields share a name, ignoring case.
    #[error("fields' names conflict with \"{name}\"")]
    FieldConflict {
        /// Field name.
        name: String,
    },

    /// Constructor parameter that is not a command field.
    #[error(
        "cannot build {constructor} constructor: field {field} does not exist, is excluded or not included"
    )]
    UnknownConstructorField {
        /// Constructor name.
        constructor: String,
        /// Parameter name.
        field: String,
    },

    /// Constructor declared twice.
    #[error("duplicated constructor name \"{name}\"")]
    DuplicateConstructor {
        /// Constructor name.
        name: String,
    },

    /// Malformed constructor declaration.
    #[error("invalid constructor '{spec}': {message}")]
    InvalidConstructor {
        /// Declaration as given.
        spec: String,
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates an invalid constructor error.
    pub fn invalid_constructor(spec: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConstructor {
            spec: spec.into(),
            message: message.into(),
        }
    }
}
