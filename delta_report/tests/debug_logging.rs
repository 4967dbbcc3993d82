//! Rendering with a debug-level logger installed
//!
//! Lives in its own test binary because the logging service can only be
//! installed once per process.

use delta_report::logging::{self, LogLevel, LoggingService, MemoryLogger};
use delta_report::pipeline::convert_source;
use delta_report::render::RenderOptions;
use std::sync::Arc;

const DOCUMENT: &str = r#"<deltas>
  <delta componentId="a(1.0.0)" flags="23" element_type="METHOD_ELEMENT_TYPE" key="run(I)V" type_name="p/A" kind="ADDED"/>
  <delta componentId="a(1.0.0)" flags="23" element_type="METHOD_ELEMENT_TYPE" key="broken" type_name="p/A" kind="ADDED"/>
  <delta componentId="b" flags="14" element_type="FIELD_ELEMENT_TYPE" key="size" type_name="p/B" kind="REMOVED"/>
  <delta flags="57" element_type="API_COMPONENT_ELEMENT_TYPE" key="a" kind="CHANGED">
    <message-arguments>
      <message-argument value="2.0.0"/>
      <message-argument value="1.0.0"/>
    </message-arguments>
  </delta>
  <resolver-errors>
    <report componentId="a">
      <resolver-error message="Missing requirement: org.dep"/>
    </report>
  </resolver-errors>
</deltas>"#;

fn debug_messages(memory: &MemoryLogger) -> Vec<String> {
    memory
        .events()
        .into_iter()
        .filter(|event| event.level == LogLevel::Debug)
        .map(|event| event.message)
        .collect()
}

#[test]
fn debug_tracing_leaves_the_report_unchanged() {
    let memory = Arc::new(MemoryLogger::new());
    logging::install(LoggingService::new(LogLevel::Debug).with_sink(memory.clone())).unwrap();
    assert!(logging::enabled(LogLevel::Debug));

    let quiet = convert_source(DOCUMENT.as_bytes(), &RenderOptions::new()).unwrap();
    assert!(debug_messages(&memory).is_empty());
    assert!(!memory.is_empty());

    memory.clear();
    let traced = convert_source(DOCUMENT.as_bytes(), &RenderOptions::new().with_debug(true)).unwrap();

    assert_eq!(quiet.text, traced.text);
    assert_eq!(quiet.stats, traced.stats);

    let messages = debug_messages(&memory);
    assert!(messages.iter().any(|m| m == "Delta"));
    assert!(messages.iter().any(|m| m == "Resolver error"));
    assert!(messages.iter().any(|m| m == "Entry"));

    // The skipped method is reported the same way in both runs
    assert!(memory.contains(logging::codes::warnings::UNRENDERABLE_ENTRY));
}
