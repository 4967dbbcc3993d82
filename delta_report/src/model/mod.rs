//! In-memory model of an API delta document
//!
//! Built once per conversion by the model builder and handed read-only to
//! the renderer.

pub mod entry;
pub mod flags;
pub mod report;

pub use entry::{DeltaEntry, DeltaKind, ElementKind};
pub use flags::DeltaFlag;
pub use report::{error_lookup_id, DeltaReport, BASELINE_COMPONENT_ID};
