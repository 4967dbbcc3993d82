//! Model builder: parse events to `DeltaReport`
//!
//! Also collects resolver errors found inside the `resolver-errors` section.

pub mod pending;
pub mod state;

pub use pending::PendingDelta;
pub use state::ModelBuilder;

use crate::logging::codes;
use crate::model::DeltaReport;
use crate::xml::{EventReader, MalformedInputError};
use crate::{log_error, log_success};

/// Parse an XML document and build its delta model
pub fn build_from_source(source: &[u8], debug: bool) -> Result<DeltaReport, MalformedInputError> {
    let result = ModelBuilder::new()
        .with_debug(debug)
        .build(EventReader::new(source));

    match &result {
        Ok(report) => {
            log_success!(codes::success::MODEL_BUILT, "Delta model built",
                "components" => report.component_count(),
                "entries" => report.entry_count(),
                "resolver_errors" => report.resolver_error_count());
        }
        Err(error) => {
            log_error!(error.error_code(), "Delta document could not be parsed",
                "error" => error);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BASELINE_COMPONENT_ID;
    use assert_matches::assert_matches;

    #[test]
    fn test_build_from_source() {
        let source = br#"<?xml version="1.0" encoding="UTF-8"?>
<deltas>
  <delta componentId="b" flags="14" key="f" type_name="p.T" kind="ADDED"/>
  <delta flags="3" key="org.gone" kind="REMOVED"/>
  <delta componentId="a" flags="23" key="m(I)V" type_name="p.U"/>
</deltas>"#;

        let report = build_from_source(source, false).unwrap();
        let ids: Vec<_> = report.components().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![BASELINE_COMPONENT_ID, "a", "b"]);
    }

    #[test]
    fn test_truncated_source_fails() {
        let source = br#"<deltas><delta flags="14" key="f">"#;
        assert_matches!(
            build_from_source(source, true),
            Err(MalformedInputError::Truncated { .. })
        );
    }
}
