use crate::logging::codes;

/// Result type for descriptor decoding
pub type DecodeResult<T> = Result<T, DescriptorDecodeError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorDecodeError {
    #[error("Descriptor is empty")]
    Empty,

    #[error("Descriptor has no parameter list")]
    MissingParameterList,

    #[error("Descriptor ended unexpectedly at position {position}")]
    UnexpectedEnd { position: usize },

    #[error("Invalid type code '{code}' at position {position}")]
    InvalidTypeCode { code: char, position: usize },

    #[error("Class name starting at position {position} is not terminated by ';'")]
    UnterminatedClassName { position: usize },

    #[error("Unexpected characters after the return type at position {position}")]
    TrailingCharacters { position: usize },

    #[error("Descriptor length {length} exceeds limit {limit}")]
    TooLong { length: usize, limit: usize },

    #[error("Array type has more than {limit} dimensions")]
    TooManyDimensions { limit: usize },

    #[error("Type arguments nested deeper than {limit}")]
    NestingTooDeep { limit: usize },
}

impl DescriptorDecodeError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            DescriptorDecodeError::TooLong { .. }
            | DescriptorDecodeError::TooManyDimensions { .. }
            | DescriptorDecodeError::NestingTooDeep { .. } => {
                codes::descriptor::DESCRIPTOR_LIMIT_EXCEEDED
            }
            _ => codes::descriptor::INVALID_DESCRIPTOR,
        }
    }

    pub fn is_limit_violation(&self) -> bool {
        self.error_code() == codes::descriptor::DESCRIPTOR_LIMIT_EXCEEDED
    }
}
