//! Reading the input document and writing the report, with compile-time size limits

mod processor;

pub use processor::{
    FileProcessor, FileProcessorError, InputDocument, InputMetadata, WriteSummary,
};
