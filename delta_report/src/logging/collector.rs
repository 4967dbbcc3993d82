//! Errors and warnings raised while converting one input document
//!
//! Each [`collect_input`](super::collect_input) scope owns a fresh
//! [`InputRecord`] and hands it back when the conversion returns, so nothing
//! carries over from one conversion to the next. Callers that want a report
//! across several runs gather the records into their own
//! [`DiagnosticCollector`].

use super::codes;
use super::events::{LogEvent, LogLevel};
use crate::config::compile_time::logging::{MAX_ERROR_COLLECTION, MAX_LOG_EVENTS_PER_FILE};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct InputRecord {
    pub input: PathBuf,
    pub started: Instant,
    pub events: Vec<LogEvent>,
    /// Problems not kept because a limit was reached
    pub dropped: usize,
}

impl InputRecord {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            started: Instant::now(),
            events: Vec::new(),
            dropped: 0,
        }
    }

    /// Keep a problem event; anything less severe is ignored
    pub fn record(&mut self, event: &LogEvent) {
        if !event.is_problem() {
            return;
        }
        if self.events.len() < MAX_LOG_EVENTS_PER_FILE {
            self.events.push(event.clone());
        } else {
            self.dropped += 1;
        }
    }

    fn count(&self, level: LogLevel) -> usize {
        self.events.iter().filter(|e| e.level == level).count()
    }

    pub fn errors(&self) -> usize {
        self.count(LogLevel::Error)
    }

    pub fn warnings(&self) -> usize {
        self.count(LogLevel::Warning)
    }

    pub fn has_problems(&self) -> bool {
        !self.events.is_empty() || self.dropped > 0
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticSummary {
    pub inputs: usize,
    pub clean_inputs: usize,
    pub failed_inputs: usize,
    pub inputs_with_warnings: usize,
    pub errors: usize,
    pub warnings: usize,
    pub dropped: usize,
}

impl DiagnosticSummary {
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings > 0
    }
}

/// Records gathered by one caller, keyed by input
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    records: BTreeMap<PathBuf, InputRecord>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn kept(&self) -> usize {
        self.records.values().map(|r| r.events.len()).sum()
    }

    /// Add a finished record; converting the same input again replaces the old one
    ///
    /// Events beyond `MAX_ERROR_COLLECTION` across the collector are counted
    /// as dropped on the record being added.
    pub fn add(&mut self, mut record: InputRecord) {
        self.records.remove(&record.input);

        let room = MAX_ERROR_COLLECTION.saturating_sub(self.kept());
        if record.events.len() > room {
            record.dropped += record.events.len() - room;
            record.events.truncate(room);
        }
        self.records.insert(record.input.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn events(&self, input: &Path) -> &[LogEvent] {
        self.records
            .get(input)
            .map(|record| record.events.as_slice())
            .unwrap_or_default()
    }

    pub fn record_for(&self, input: &Path) -> Option<&InputRecord> {
        self.records.get(input)
    }

    pub fn summary(&self) -> DiagnosticSummary {
        let mut summary = DiagnosticSummary {
            inputs: self.records.len(),
            ..DiagnosticSummary::default()
        };

        for record in self.records.values() {
            let (errors, warnings) = (record.errors(), record.warnings());
            if errors > 0 {
                summary.failed_inputs += 1;
            } else if warnings > 0 {
                summary.inputs_with_warnings += 1;
            } else {
                summary.clean_inputs += 1;
            }
            summary.errors += errors;
            summary.warnings += warnings;
            summary.dropped += record.dropped;
        }
        summary
    }

    /// Problems grouped by input, each with its fields and a help line
    pub fn render(&self) -> String {
        let mut out = String::new();

        for (input, record) in &self.records {
            if !record.has_problems() {
                continue;
            }
            let _ = writeln!(
                out,
                "{}: {} error(s), {} warning(s)",
                input.display(),
                record.errors(),
                record.warnings()
            );

            for event in &record.events {
                let code = event.code.map(|c| c.as_str()).unwrap_or("-");
                let _ = writeln!(out, "  {}[{}]: {}", event.level, code, event.message);
                for (key, value) in &event.fields {
                    let _ = writeln!(out, "      {}: {}", key, value);
                }
                if let Some(help) = event.help() {
                    let _ = writeln!(out, "      help: {}", help);
                }
            }

            if record.dropped > 0 {
                let _ = writeln!(
                    out,
                    "  warning[{}]: {} more problem(s) not shown",
                    codes::warnings::EVENT_LIMIT_REACHED,
                    record.dropped
                );
            }
        }
        out
    }
}

impl Extend<InputRecord> for DiagnosticCollector {
    fn extend<I: IntoIterator<Item = InputRecord>>(&mut self, records: I) {
        for record in records {
            self.add(record);
        }
    }
}
