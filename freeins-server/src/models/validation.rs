//! Validation error types

use thiserror::Error;

/// Rejected field value on a page or user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} exceeds maximum size of {max_bytes} bytes")]
    TooLarge { field: &'static str, max_bytes: usize },

    /// Doesn't match the required shape (slug, locale, email)
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Well-formed value outside the configured set
    #[error("unsupported {field}: '{value}'")]
    Unsupported { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_field_and_unit() {
        let err = ValidationError::TooLong {
            field: "title",
            max: 256,
        };
        assert_eq!(
            err.to_string(),
            "title exceeds maximum length of 256 characters"
        );

        let err = ValidationError::TooLarge {
            field: "content",
            max_bytes: 1024,
        };
        assert_eq!(
            err.to_string(),
            "content exceeds maximum size of 1024 bytes"
        );

        let err = ValidationError::Unsupported {
            field: "locale",
            value: "de".into(),
        };
        assert_eq!(err.to_string(), "unsupported locale: 'de'");
    }
}
