//! Streaming model builder
//!
//! Consumes open/close/text events and accumulates the delta model. The only
//! state carried between events is the resolver-section flag, the current
//! component id, the delta being assembled and the open argument list.

use super::pending::PendingDelta;
use crate::config::compile_time::model::*;
use crate::logging::codes;
use crate::model::{DeltaReport, BASELINE_COMPONENT_ID};
use crate::xml::vocabulary::*;
use crate::xml::{Attributes, MalformedInputError, ParseEvent};
use crate::{log_debug, log_warning};

pub struct ModelBuilder {
    report: DeltaReport,
    in_resolver_section: bool,
    current_component_id: String,
    pending: Option<PendingDelta>,
    pending_arguments: Option<Vec<String>>,
    debug: bool,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self {
            report: DeltaReport::new(),
            in_resolver_section: false,
            current_component_id: BASELINE_COMPONENT_ID.to_string(),
            pending: None,
            pending_arguments: None,
            debug: false,
        }
    }

    /// Emit trace events for every resolver error and delta read
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn in_resolver_section(&self) -> bool {
        self.in_resolver_section
    }

    pub fn current_component_id(&self) -> &str {
        &self.current_component_id
    }

    /// Apply one parse event
    pub fn handle_event(&mut self, event: ParseEvent) -> Result<(), MalformedInputError> {
        match event {
            ParseEvent::Open { tag, attributes } => self.open(&tag, &attributes),
            ParseEvent::Close { tag } => self.close(&tag),
            ParseEvent::Text(_) => Ok(()),
        }
    }

    /// Drive the builder over an event stream, failing on the first bad event
    pub fn build<I>(mut self, events: I) -> Result<DeltaReport, MalformedInputError>
    where
        I: IntoIterator<Item = Result<ParseEvent, MalformedInputError>>,
    {
        for event in events {
            self.handle_event(event?)?;
        }
        Ok(self.finish())
    }

    /// Completed model; a delta still open at this point is dropped
    pub fn finish(self) -> DeltaReport {
        self.report
    }

    fn open(&mut self, tag: &str, attributes: &Attributes) -> Result<(), MalformedInputError> {
        if self.in_resolver_section {
            return self.open_in_resolver_section(tag, attributes);
        }

        match tag {
            DELTA => self.open_delta(attributes),
            MESSAGE_ARGUMENTS => {
                match self.pending_arguments.as_mut() {
                    Some(arguments) => arguments.clear(),
                    None => self.pending_arguments = Some(Vec::new()),
                }
                Ok(())
            }
            MESSAGE_ARGUMENT => self.push_argument(attributes),
            RESOLVER_ERRORS => {
                self.in_resolver_section = true;
                if let Some(component_id) = attributes.get_any(ATTR_COMPONENT_ID) {
                    self.current_component_id = component_id.to_string();
                }
                if self.debug {
                    log_debug!("Reading resolver error section");
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn open_in_resolver_section(
        &mut self,
        tag: &str,
        attributes: &Attributes,
    ) -> Result<(), MalformedInputError> {
        match tag {
            REPORT => {
                self.current_component_id = attributes
                    .get_any(ATTR_COMPONENT_ID)
                    .unwrap_or(BASELINE_COMPONENT_ID)
                    .to_string();
                Ok(())
            }
            RESOLVER_ERROR => {
                let message = attributes.get(ATTR_MESSAGE).unwrap_or_default();

                let existing = self
                    .report
                    .resolver_errors_for(&self.current_component_id)
                    .len();
                if existing >= MAX_RESOLVER_ERRORS_PER_COMPONENT {
                    return Err(MalformedInputError::limit_exceeded(
                        "resolver errors for one component",
                        MAX_RESOLVER_ERRORS_PER_COMPONENT,
                    ));
                }

                if self.debug {
                    log_debug!("Resolver error",
                        "component" => self.current_component_id,
                        "message" => message);
                }

                self.report
                    .push_resolver_error(&self.current_component_id, message.to_string());
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn open_delta(&mut self, attributes: &Attributes) -> Result<(), MalformedInputError> {
        let pending = PendingDelta::from_attributes(attributes)?;

        if let Some(discarded) = self.pending.take() {
            log_warning!(code = codes::warnings::NESTED_DELTA,
                "Delta opened inside another delta; the outer delta is discarded",
                "discarded_key" => discarded.key(),
                "key" => pending.key());
        }

        if self.debug {
            log_debug!("Delta",
                "component" => pending.component_id(),
                "flags" => pending.flags(),
                "key" => pending.key());
        }

        self.current_component_id = pending.component_id().to_string();
        self.pending = Some(pending);
        Ok(())
    }

    fn push_argument(&mut self, attributes: &Attributes) -> Result<(), MalformedInputError> {
        if let Some(arguments) = self.pending_arguments.as_mut() {
            if arguments.len() >= MAX_MESSAGE_ARGUMENTS {
                return Err(MalformedInputError::limit_exceeded(
                    "message arguments",
                    MAX_MESSAGE_ARGUMENTS,
                ));
            }
            arguments.push(attributes.get(ATTR_VALUE).unwrap_or_default().to_string());
        }
        Ok(())
    }

    fn close(&mut self, tag: &str) -> Result<(), MalformedInputError> {
        match tag {
            RESOLVER_ERRORS => {
                self.in_resolver_section = false;
                Ok(())
            }
            DELTA if !self.in_resolver_section => self.close_delta(),
            MESSAGE_ARGUMENTS if !self.in_resolver_section => {
                if let (Some(pending), Some(arguments)) =
                    (self.pending.as_mut(), self.pending_arguments.as_ref())
                {
                    pending.set_arguments(arguments);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn close_delta(&mut self) -> Result<(), MalformedInputError> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        let (component_id, entry) = pending.finish();

        if self.report.has_component(&component_id) {
            if self.report.entries_for(&component_id).len() >= MAX_ENTRIES_PER_COMPONENT {
                return Err(MalformedInputError::limit_exceeded(
                    "deltas for one component",
                    MAX_ENTRIES_PER_COMPONENT,
                ));
            }
        } else if self.report.component_count() >= MAX_COMPONENTS {
            return Err(MalformedInputError::limit_exceeded(
                "components",
                MAX_COMPONENTS,
            ));
        }

        self.report.push_entry(&component_id, entry);
        Ok(())
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeltaKind, ElementKind};
    use assert_matches::assert_matches;

    fn run(events: Vec<ParseEvent>) -> Result<DeltaReport, MalformedInputError> {
        ModelBuilder::new().build(events.into_iter().map(Ok))
    }

    fn delta(pairs: &[(&str, &str)]) -> ParseEvent {
        ParseEvent::open(DELTA, pairs.iter().copied())
    }

    #[test]
    fn test_delta_is_grouped_by_component() {
        let report = run(vec![
            ParseEvent::open::<&str, &str>("deltas", []),
            delta(&[
                ("componentId", "org.example(1.0.0)"),
                ("flags", "23"),
                ("element_type", "CLASS_ELEMENT_TYPE"),
                ("type_name", "org/example/Widget"),
                ("key", "run()V"),
                ("kind", "ADDED"),
            ]),
            ParseEvent::close(DELTA),
            ParseEvent::close("deltas"),
        ])
        .unwrap();

        let entries = report.entries_for("org.example(1.0.0)");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].flags, 23);
        assert_eq!(entries[0].element_type, ElementKind::Class);
        assert_eq!(entries[0].type_name.as_deref(), Some("org.example.Widget"));
        assert_eq!(entries[0].kind, DeltaKind::Added);
    }

    #[test]
    fn test_delta_without_component_uses_baseline_sentinel() {
        let report = run(vec![
            delta(&[("flags", "3"), ("key", "org.removed"), ("kind", "REMOVED")]),
            ParseEvent::close(DELTA),
        ])
        .unwrap();

        assert_eq!(report.entries_for(BASELINE_COMPONENT_ID).len(), 1);
    }

    #[test]
    fn test_resolver_errors_use_report_component() {
        let report = run(vec![
            ParseEvent::open::<&str, &str>(RESOLVER_ERRORS, []),
            ParseEvent::open(REPORT, [("componentId", "foo")]),
            ParseEvent::open(RESOLVER_ERROR, [("message", "Missing bar")]),
            ParseEvent::close(RESOLVER_ERROR),
            ParseEvent::open(RESOLVER_ERROR, [("message", "Missing baz")]),
            ParseEvent::close(RESOLVER_ERROR),
            ParseEvent::close(REPORT),
            ParseEvent::close(RESOLVER_ERRORS),
        ])
        .unwrap();

        assert_eq!(report.resolver_errors_for("foo"), ["Missing bar", "Missing baz"]);
        assert_eq!(report.entry_count(), 0);
    }

    #[test]
    fn test_resolver_section_ignores_deltas_and_tracks_state() {
        let mut builder = ModelBuilder::new();
        builder
            .handle_event(ParseEvent::open(RESOLVER_ERRORS, [("component-id", "c")]))
            .unwrap();
        assert!(builder.in_resolver_section());
        assert_eq!(builder.current_component_id(), "c");

        builder
            .handle_event(delta(&[("flags", "not-a-number")]))
            .unwrap();
        builder.handle_event(ParseEvent::close(DELTA)).unwrap();
        builder.handle_event(ParseEvent::close(RESOLVER_ERRORS)).unwrap();
        assert!(!builder.in_resolver_section());

        assert_eq!(builder.finish().entry_count(), 0);
    }

    #[test]
    fn test_message_arguments_attach_to_their_delta_only() {
        let report = run(vec![
            delta(&[("flags", "57"), ("key", "org.example")]),
            ParseEvent::open::<&str, &str>(MESSAGE_ARGUMENTS, []),
            ParseEvent::open(MESSAGE_ARGUMENT, [("value", "2.0.0")]),
            ParseEvent::close(MESSAGE_ARGUMENT),
            ParseEvent::open(MESSAGE_ARGUMENT, [("value", "1.0.0")]),
            ParseEvent::close(MESSAGE_ARGUMENT),
            ParseEvent::close(MESSAGE_ARGUMENTS),
            ParseEvent::close(DELTA),
            delta(&[("flags", "3"), ("key", "org.other")]),
            ParseEvent::close(DELTA),
        ])
        .unwrap();

        let entries = report.entries_for(BASELINE_COMPONENT_ID);
        assert_eq!(
            entries[0].arguments,
            Some(vec!["2.0.0".to_string(), "1.0.0".to_string()])
        );
        assert_eq!(entries[1].arguments, None);
    }

    #[test]
    fn test_empty_argument_container_leaves_arguments_absent() {
        let report = run(vec![
            delta(&[("flags", "58"), ("key", "k")]),
            ParseEvent::open::<&str, &str>(MESSAGE_ARGUMENTS, []),
            ParseEvent::close(MESSAGE_ARGUMENTS),
            ParseEvent::close(DELTA),
        ])
        .unwrap();

        assert_eq!(report.entries_for(BASELINE_COMPONENT_ID)[0].arguments, None);
    }

    #[test]
    fn test_invalid_flags_are_fatal() {
        let result = run(vec![delta(&[("flags", "x"), ("key", "k")])]);
        assert_matches!(result, Err(MalformedInputError::InvalidFlags { .. }));
    }

    #[test]
    fn test_unknown_elements_are_ignored() {
        let report = run(vec![
            ParseEvent::open("future", [("anything", "goes")]),
            ParseEvent::text("ignored"),
            delta(&[("flags", "14"), ("key", "f"), ("type_name", "p.T"), ("extra", "1")]),
            ParseEvent::close(DELTA),
            ParseEvent::close("future"),
        ])
        .unwrap();

        assert_eq!(report.entry_count(), 1);
    }

    #[test]
    fn test_nested_delta_replaces_outer() {
        let report = run(vec![
            delta(&[("flags", "14"), ("key", "outer"), ("type_name", "p.T")]),
            delta(&[("flags", "14"), ("key", "inner"), ("type_name", "p.T")]),
            ParseEvent::close(DELTA),
            ParseEvent::close(DELTA),
        ])
        .unwrap();

        let entries = report.entries_for(BASELINE_COMPONENT_ID);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "inner");
    }

    #[test]
    fn test_event_errors_stop_the_build() {
        let events = vec![
            Ok(delta(&[("flags", "14"), ("key", "f")])),
            Err(MalformedInputError::Truncated { depth: 1 }),
        ];
        assert_matches!(
            ModelBuilder::new().build(events),
            Err(MalformedInputError::Truncated { depth: 1 })
        );
    }
}
