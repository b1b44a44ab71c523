//! Error types for the sild-core library.
//!
//! This module provides error handling using the `thiserror` crate. The
//! settings decoder reports five document-level kinds (`Structural`,
//! `UnknownCategory`, `UnknownField`, `TypeMismatch`, `UnknownVariant`);
//! the remaining variants cover file access, module loading and the engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sild operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all sild operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create output directory
    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreate {
        /// Path to the directory that failed to create
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The settings document is not valid JSON
    #[error("malformed settings document: {0}")]
    Json(#[from] serde_json::Error),

    /// A container token is missing or of the wrong kind
    #[error("structural error in {scope}: {details}")]
    Structural {
        /// Where in the document the error occurred
        scope: String,
        /// Detailed description of the issue
        details: String,
    },

    /// Top-level key is neither a category nor the formatting key
    #[error("unknown settings category '{category}'")]
    UnknownCategory {
        /// The offending key
        category: String,
    },

    /// Key inside a block is not a field of that block
    #[error("unknown field '{field}' in '{scope}'{}", hint_suffix(.hint))]
    UnknownField {
        /// Category label or formatting key the field appeared under
        scope: String,
        /// The offending key
        field: String,
        /// Category the field actually belongs to, if any
        hint: Option<String>,
    },

    /// Value token does not have the field's declared kind
    #[error("field '{field}' in '{scope}' expects {expected}, found {found}")]
    TypeMismatch {
        /// Category label or formatting key
        scope: String,
        /// Field name
        field: String,
        /// Declared kind of the field
        expected: String,
        /// Shape of the token that was found
        found: String,
    },

    /// Enumeration text is not one of the declared variants
    #[error("field '{field}' in '{scope}' has unknown variant '{value}' (expected one of: {expected})")]
    UnknownVariant {
        /// Category label or formatting key
        scope: String,
        /// Field name
        field: String,
        /// The text that was found
        value: String,
        /// Comma-separated list of accepted variants
        expected: String,
    },

    /// The schema tables violate a construction invariant
    #[error("invalid settings schema: {0}")]
    InvalidSchema(String),

    /// Input file is not a loadable PE module
    #[error("'{path}' is not a valid module: {details}")]
    InvalidModule {
        /// Path to the module
        path: PathBuf,
        /// Detailed description of the issue
        details: String,
    },

    /// The decompiler engine failed
    #[error("engine '{engine}' failed: {details}")]
    Engine {
        /// Engine name or executable
        engine: String,
        /// Detailed description of the failure
        details: String,
    },

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(category) => format!(" (it belongs to '{}')", category),
        None => String::new(),
    }
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new directory creation error
    pub fn directory_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreate {
            path: path.into(),
            source,
        }
    }

    /// Creates a new structural error
    pub fn structural(scope: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Structural {
            scope: scope.into(),
            details: details.into(),
        }
    }

    /// Creates a new unknown category error
    pub fn unknown_category(category: impl Into<String>) -> Self {
        Self::UnknownCategory {
            category: category.into(),
        }
    }

    /// Creates a new unknown field error
    pub fn unknown_field(
        scope: impl Into<String>,
        field: impl Into<String>,
        hint: Option<&str>,
    ) -> Self {
        Self::UnknownField {
            scope: scope.into(),
            field: field.into(),
            hint: hint.map(str::to_string),
        }
    }

    /// Creates a new type mismatch error
    pub fn type_mismatch(
        scope: impl Into<String>,
        field: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            scope: scope.into(),
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates a new unknown variant error
    pub fn unknown_variant(
        scope: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
        variants: &[&str],
    ) -> Self {
        Self::UnknownVariant {
            scope: scope.into(),
            field: field.into(),
            value: value.into(),
            expected: variants.join(", "),
        }
    }

    /// Creates a new schema error
    pub fn invalid_schema(msg: impl Into<String>) -> Self {
        Self::InvalidSchema(msg.into())
    }

    /// Creates a new invalid module error
    pub fn invalid_module(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::InvalidModule {
            path: path.into(),
            details: details.into(),
        }
    }

    /// Creates a new engine error
    pub fn engine(engine: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Engine {
            engine: engine.into(),
            details: details.into(),
        }
    }

    /// Creates a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this error was raised while decoding a settings document
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::Json(_)
                | Self::Structural { .. }
                | Self::UnknownCategory { .. }
                | Self::UnknownField { .. }
                | Self::TypeMismatch { .. }
                | Self::UnknownVariant { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::unknown_category("C# 99.0 / VS 2099");
        assert!(err.to_string().contains("unknown settings category"));
        assert!(err.to_string().contains("C# 99.0 / VS 2099"));
    }

    #[test]
    fn test_unknown_field_hint() {
        let err = Error::unknown_field("Other", "PatternMatching", Some("C# 7.0 / VS 2017"));
        assert_eq!(
            err.to_string(),
            "unknown field 'PatternMatching' in 'Other' (it belongs to 'C# 7.0 / VS 2017')"
        );

        let err = Error::unknown_field("Other", "Bogus", None);
        assert_eq!(err.to_string(), "unknown field 'Bogus' in 'Other'");
    }

    #[test]
    fn test_unknown_variant_lists_expected() {
        let err = Error::unknown_variant(
            "CSharpFormattingOptions",
            "UsingPlacement",
            "Nowhere",
            &["TopOfFile", "InsideNamespace"],
        );
        assert!(err.to_string().contains("TopOfFile, InsideNamespace"));
    }

    #[test]
    fn test_is_decode_error() {
        assert!(Error::unknown_category("x").is_decode_error());
        assert!(Error::structural("document", "expected an object").is_decode_error());
        assert!(!Error::invalid_schema("duplicate").is_decode_error());
        assert!(!Error::engine("ilspy-engine", "exit status 1").is_decode_error());
    }
}
