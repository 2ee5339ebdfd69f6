//! Binding error taxonomy.

use crate::path::FieldPath;
use thiserror::Error;

/// Result type for binding operations.
pub type BindResult<T> = Result<T, BindError>;

/// An error raised while materializing arguments into typed values.
///
/// All variants are fatal for the binding attempt that raised them; nothing
/// partial is returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The target type declares zero constructors, or several with none
    /// marked primary, so no binding strategy can be chosen.
    #[error("no primary or single public constructor found for type `{type_name}`")]
    AmbiguousConstructor {
        /// Readable name of the offending type.
        type_name: String,
    },

    /// A present value could not be converted to its declared shape.
    #[error("cannot coerce {actual} to {expected} at `{path}`")]
    Coercion {
        /// Path to the field that failed.
        path: FieldPath,
        /// The declared shape, rendered for diagnostics.
        expected: String,
        /// The kind of value actually received.
        actual: String,
    },

    /// A composite shape refers to a type with no registered descriptor.
    #[error("no type descriptor registered for `{type_name}` (referenced at `{path}`)")]
    UnregisteredType {
        /// Readable name of the missing type.
        type_name: String,
        /// Path of the reference.
        path: FieldPath,
    },

    /// A capability table and its typed extraction disagree. Indicates a
    /// descriptor registration bug rather than bad input.
    #[error("descriptor inconsistency at `{path}`: {message}")]
    Internal {
        /// Path of the failing extraction.
        path: FieldPath,
        /// What went wrong.
        message: String,
    },
}

impl BindError {
    /// Creates an ambiguous-constructor error.
    pub fn ambiguous_constructor(type_name: impl Into<String>) -> Self {
        Self::AmbiguousConstructor {
            type_name: type_name.into(),
        }
    }

    /// Creates a coercion error.
    pub fn coercion(
        path: FieldPath,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::Coercion {
            path,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates an unregistered-type error.
    pub fn unregistered_type(type_name: impl Into<String>, path: FieldPath) -> Self {
        Self::UnregisteredType {
            type_name: type_name.into(),
            path,
        }
    }

    /// Creates an internal descriptor-inconsistency error.
    pub fn internal(path: FieldPath, message: impl Into<String>) -> Self {
        Self::Internal {
            path,
            message: message.into(),
        }
    }

    /// Returns the stable error code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AmbiguousConstructor { .. } => codes::AMBIGUOUS_CONSTRUCTOR,
            Self::Coercion { .. } => codes::COERCION,
            Self::UnregisteredType { .. } => codes::UNREGISTERED_TYPE,
            Self::Internal { .. } => codes::INTERNAL,
        }
    }

    /// Returns the path of the failing field, if the error carries one.
    #[must_use]
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Self::AmbiguousConstructor { .. } => None,
            Self::Coercion { path, .. }
            | Self::UnregisteredType { path, .. }
            | Self::Internal { path, .. } => Some(path),
        }
    }
}

/// Stable binding error codes.
pub mod codes {
    pub const AMBIGUOUS_CONSTRUCTOR: &str = "B0001";
    pub const COERCION: &str = "B0002";
    pub const UNREGISTERED_TYPE: &str = "B0003";
    pub const INTERNAL: &str = "B0004";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_constructor_message() {
        let err = BindError::ambiguous_constructor("NoPrimaryConstructor");
        assert!(err
            .to_string()
            .contains("no primary or single public constructor found"));
        assert_eq!(err.code(), codes::AMBIGUOUS_CONSTRUCTOR);
        assert!(err.path().is_none());
    }

    #[test]
    fn test_coercion_message_carries_path() {
        let path = FieldPath::root().child("book").child("name");
        let err = BindError::coercion(path.clone(), "String", "object");
        assert_eq!(
            err.to_string(),
            "cannot coerce object to String at `book.name`"
        );
        assert_eq!(err.path(), Some(&path));
    }
}
