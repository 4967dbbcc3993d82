use crate::file_processor::FileProcessorError;
use crate::logging::codes;
use crate::messages::MessageCatalogError;
use crate::xml::MalformedInputError;

/// Invalid driver setup; always fatal for the run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("No input document location was given")]
    MissingInputLocation,

    #[error("Input document does not exist: {path}")]
    InputNotFound { path: String },

    #[error("Input location is a directory: {path}")]
    InputIsDirectory { path: String },

    #[error("Input document must have a .xml extension when no output is given: {path}")]
    InputExtension { path: String },

    #[error("Output document must have a .html extension: {path}")]
    OutputExtension { path: String },

    #[error("Output location is a directory: {path}")]
    OutputIsDirectory { path: String },

    #[error("Cannot create output directory '{path}': {message}")]
    OutputParentCreation { path: String, message: String },

    #[error(transparent)]
    MessageCatalog(#[from] MessageCatalogError),
}

impl ConfigurationError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ConfigurationError::MissingInputLocation => codes::configuration::MISSING_INPUT_LOCATION,
            ConfigurationError::InputNotFound { .. } => codes::configuration::INPUT_NOT_FOUND,
            ConfigurationError::InputIsDirectory { .. } => codes::configuration::INPUT_IS_DIRECTORY,
            ConfigurationError::InputExtension { .. } => codes::configuration::INPUT_EXTENSION,
            ConfigurationError::OutputExtension { .. } => codes::configuration::OUTPUT_EXTENSION,
            ConfigurationError::OutputIsDirectory { .. } => codes::configuration::OUTPUT_IS_DIRECTORY,
            ConfigurationError::OutputParentCreation { .. } => {
                codes::configuration::OUTPUT_PARENT_CREATION
            }
            ConfigurationError::MessageCatalog(_) => codes::configuration::MESSAGE_CATALOG,
        }
    }
}

/// Conversion errors surfaced to the caller
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Input read failed: {0}")]
    InputRead(#[from] FileProcessorError),

    /// Only returned in strict mode
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] MalformedInputError),

    /// Only returned in strict mode
    #[error("Output write failed: {0}")]
    OutputWrite(FileProcessorError),
}

impl PipelineError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            PipelineError::Configuration(error) => error.error_code(),
            PipelineError::InputRead(error) => error.error_code(),
            PipelineError::MalformedInput(error) => error.error_code(),
            PipelineError::OutputWrite(_) => codes::output::WRITE_FAILED,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, PipelineError::Configuration(_))
    }
}
