//! Value Error Types
//!
//! Errors raised while building or encoding values. Navigation errors live in
//! `nebula-navigator`; this crate only reports problems with the data itself.

use thiserror::Error;

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Value construction and encoding errors
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Type mismatch between expected and actual types
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A key of the wrong kind was inserted into a typed-key map
    #[error("Key kind mismatch: map declares {expected} keys, got {actual}")]
    KeyKindMismatch { expected: String, actual: String },

    /// A value that cannot serve as a map key
    #[error("Value of type {type_name} cannot be used as a map key")]
    UnhashableKey { type_name: String },

    /// An element of a uniform array has a different kind
    #[error("Array of {kind} has a {actual} element at index {index}")]
    NonUniformArray {
        kind: String,
        index: usize,
        actual: String,
    },

    /// A numeric literal that does not follow the number grammar
    #[error("Invalid numeric literal: '{literal}'")]
    InvalidNumber { literal: String },

    /// A value that has no structured-text form
    #[error("Value of type {type_name} cannot be encoded")]
    NotEncodable { type_name: String },
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValueError {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a key kind mismatch error
    pub fn key_kind_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::KeyKindMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an unhashable key error
    pub fn unhashable_key(type_name: impl Into<String>) -> Self {
        Self::UnhashableKey {
            type_name: type_name.into(),
        }
    }

    /// Create a non-uniform array error
    pub fn non_uniform_array(kind: impl Into<String>, index: usize, actual: impl Into<String>) -> Self {
        Self::NonUniformArray {
            kind: kind.into(),
            index,
            actual: actual.into(),
        }
    }

    /// Create an invalid number error
    pub fn invalid_number(literal: impl Into<String>) -> Self {
        Self::InvalidNumber {
            literal: literal.into(),
        }
    }

    /// Create a not-encodable error
    pub fn not_encodable(type_name: impl Into<String>) -> Self {
        Self::NotEncodable {
            type_name: type_name.into(),
        }
    }
}

/// Result type for value operations
pub type ValueResult<T> = Result<T, ValueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ValueError::type_mismatch("list", "string").to_string(),
            "Type mismatch: expected list, got string"
        );
        assert_eq!(
            ValueError::non_uniform_array("i32", 2, "string").to_string(),
            "Array of i32 has a string element at index 2"
        );
        assert_eq!(
            ValueError::invalid_number("1.2.3").to_string(),
            "Invalid numeric literal: '1.2.3'"
        );
    }
}
