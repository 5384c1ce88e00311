//! Error type shared by every codec.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Failure of an encode or decode operation.
///
/// Every variant names the field that was rejected so callers can report
/// the offending input without re-parsing it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Malformed textual input: wrong length, disallowed character,
    /// unparsable move token, or a bit stream that ends mid-run.
    #[error("malformed {field}: {detail}")]
    Format { field: &'static str, detail: String },

    /// A structured argument has the wrong number or kind of entries, or
    /// required context is missing.
    #[error("wrong shape for {field}: expected {expected}, got {actual}")]
    Shape {
        field: &'static str,
        expected: String,
        actual: String,
    },

    /// A well-formed number outside its declared domain.
    #[error("{field} out of range: {detail}")]
    Range { field: &'static str, detail: String },
}

impl CodecError {
    pub(crate) fn format(field: &'static str, detail: impl Into<String>) -> Self {
        CodecError::Format {
            field,
            detail: detail.into(),
        }
    }

    pub(crate) fn shape(
        field: &'static str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        CodecError::Shape {
            field,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub(crate) fn range(field: &'static str, detail: impl Into<String>) -> Self {
        CodecError::Range {
            field,
            detail: detail.into(),
        }
    }

    /// Name of the rejected field.
    pub fn field(&self) -> &'static str {
        match self {
            CodecError::Format { field, .. }
            | CodecError::Shape { field, .. }
            | CodecError::Range { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let err = CodecError::format("position id", "expected 14 characters, got 10");
        assert_eq!(
            err.to_string(),
            "malformed position id: expected 14 characters, got 10"
        );
        assert_eq!(err.field(), "position id");
    }

    #[test]
    fn test_shape_display() {
        let err = CodecError::shape("position key", "10 entries", "3 entries");
        assert_eq!(
            err.to_string(),
            "wrong shape for position key: expected 10 entries, got 3 entries"
        );
    }
}
