//! XML event source for delta documents
//!
//! The model builder only needs open/close/text callbacks; this module
//! supplies them from `quick_xml` with depth and size bounds applied.

pub mod error;
pub mod events;
pub mod reader;

pub use error::MalformedInputError;
pub use events::{Attributes, ParseEvent};
pub use reader::{read_events, EventReader};

/// Element and attribute vocabulary of the delta document
pub mod vocabulary {
    pub const DELTA: &str = "delta";
    pub const RESOLVER_ERRORS: &str = "resolver-errors";
    pub const RESOLVER_ERROR: &str = "resolver-error";
    pub const REPORT: &str = "report";
    pub const MESSAGE_ARGUMENTS: &str = "message-arguments";
    pub const MESSAGE_ARGUMENT: &str = "message-argument";

    pub const ATTR_FLAGS: &str = "flags";
    pub const ATTR_ELEMENT_TYPE: &str = "element_type";
    pub const ATTR_TYPE_NAME: &str = "type_name";
    pub const ATTR_KEY: &str = "key";
    pub const ATTR_KIND: &str = "kind";
    pub const ATTR_MESSAGE: &str = "message";
    pub const ATTR_VALUE: &str = "value";

    /// Component id attribute spellings, preferred first
    pub const ATTR_COMPONENT_ID: &[&str] = &["component-id", "componentId", "id"];
}
