//! Converts API compatibility delta reports (XML) into deterministic HTML reports
//!
//! Stages, leaf first: `descriptor` decodes compact signatures, `display`
//! turns one entry into a locator, `builder` folds XML events from `xml` into
//! a `model::DeltaReport`, `render` lays the report out with the `messages`
//! templates, and `pipeline` drives a whole file conversion.

// Internal modules
pub mod builder;
pub mod config;
pub mod descriptor;
pub mod display;
pub mod file_processor;
#[macro_use]
pub mod logging;
pub mod messages;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod xml;

// Re-export key types for library consumers
pub use messages::{MessageCatalog, MessageKey};
pub use model::{DeltaEntry, DeltaKind, DeltaReport, ElementKind};
pub use pipeline::{
    convert, convert_paths, convert_source, convert_with_diagnostics, ConfigurationError, ConversionConfig,
    ConversionOutcome, ConversionStats, PipelineError, RecoveryCause,
};
pub use render::{RenderOptions, RenderedReport};
pub use xml::MalformedInputError;
