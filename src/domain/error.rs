use thiserror::Error;

/// Failure while encoding or decoding a single wire field.
///
/// Every variant names the field it was produced for so that a framing bug can be
/// traced back to the exact position in the frame. Decode variants also carry the
/// byte offset relative to the start of the payload being decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("truncated input reading {field} at offset {offset}: need {needed} bytes but {available} remain")]
    TruncatedInput {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("invalid encoding in {field} at offset {offset}: {reason}")]
    InvalidEncoding {
        field: &'static str,
        offset: usize,
        reason: String,
    },
    #[error("negative length {length} for {field} at offset {offset}")]
    NegativeLength {
        field: &'static str,
        offset: usize,
        length: i64,
    },
    #[error("invalid argument for {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
    #[error("invalid frame length {length} (max {max} bytes)")]
    InvalidFrameLength { length: i64, max: usize },
}

impl CodecError {
    pub fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
        CodecError::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the field the error was raised for, if it is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CodecError::TruncatedInput { field, .. }
            | CodecError::InvalidEncoding { field, .. }
            | CodecError::NegativeLength { field, .. }
            | CodecError::InvalidArgument { field, .. } => Some(field),
            CodecError::InvalidFrameLength { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_input_message_names_field_and_lengths() {
        let err = CodecError::TruncatedInput {
            field: "create_topics_response.topics.name",
            offset: 12,
            needed: 6,
            available: 5,
        };

        assert_eq!(
            err.to_string(),
            "truncated input reading create_topics_response.topics.name at offset 12: need 6 bytes but 5 remain"
        );
        assert_eq!(err.field(), Some("create_topics_response.topics.name"));
    }

    #[test]
    fn test_frame_length_error_has_no_field() {
        let err = CodecError::InvalidFrameLength { length: -1, max: 1024 };
        assert_eq!(err.field(), None);
    }
}
