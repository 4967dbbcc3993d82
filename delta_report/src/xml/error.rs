use crate::logging::codes;

/// Input that cannot be turned into a delta model
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedInputError {
    #[error("XML syntax error at byte {position}: {message}")]
    Xml { message: String, position: u64 },

    #[error("Document ended with {depth} unclosed element(s)")]
    Truncated { depth: usize },

    #[error("Document has no root element")]
    NoRootElement,

    #[error("Closing tag '{tag}' has no matching open element")]
    UnbalancedClose { tag: String },

    #[error("Element '{element}' is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    #[error("Invalid flags value '{value}': expected an integer")]
    InvalidFlags { value: String },

    #[error("Element nesting exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("Too many {what} (limit: {limit})")]
    LimitExceeded { what: String, limit: usize },
}

impl MalformedInputError {
    pub fn xml(message: impl Into<String>, position: u64) -> Self {
        Self::Xml {
            message: message.into(),
            position,
        }
    }

    pub fn missing_attribute(element: &str, attribute: &str) -> Self {
        Self::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        }
    }

    pub fn limit_exceeded(what: &str, limit: usize) -> Self {
        Self::LimitExceeded {
            what: what.to_string(),
            limit,
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            MalformedInputError::Xml { .. } => codes::malformed_input::XML_SYNTAX,
            MalformedInputError::Truncated { .. } => codes::malformed_input::TRUNCATED_DOCUMENT,
            MalformedInputError::NoRootElement => codes::malformed_input::NO_ROOT_ELEMENT,
            MalformedInputError::UnbalancedClose { .. } => {
                codes::malformed_input::UNBALANCED_CLOSE
            }
            MalformedInputError::MissingAttribute { .. } => {
                codes::malformed_input::MISSING_ATTRIBUTE
            }
            MalformedInputError::InvalidFlags { .. } => codes::malformed_input::INVALID_FLAGS,
            MalformedInputError::DepthLimitExceeded { .. } => {
                codes::malformed_input::DEPTH_LIMIT_EXCEEDED
            }
            MalformedInputError::LimitExceeded { .. } => codes::malformed_input::LIMIT_EXCEEDED,
        }
    }
}
