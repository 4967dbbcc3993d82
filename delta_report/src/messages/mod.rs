//! Message templates for the generated report
//!
//! Defaults produce a standalone HTML5 document; a TOML file can replace any
//! subset of templates.

pub mod catalog;
pub mod template;

pub use catalog::{MessageCatalog, MessageCatalogError, MessageKey};
pub use template::{bind, MISSING_ARGUMENT};
