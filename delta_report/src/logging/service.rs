//! Sinks for log events and the service that fans events out to them

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use crate::config::compile_time::logging::LOG_BUFFER_SIZE;
use crate::config::runtime::LoggingPreferences;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleFormat {
    Plain,
    Json,
}

/// Writes to stderr; stdout is reserved for the conversion result
pub struct ConsoleLogger {
    format: ConsoleFormat,
}

impl ConsoleLogger {
    pub fn new(format: ConsoleFormat) -> Self {
        Self { format }
    }

    fn line(&self, event: &LogEvent) -> String {
        match self.format {
            ConsoleFormat::Plain => event.to_string(),
            ConsoleFormat::Json => event.to_json().unwrap_or_else(|_| event.to_string()),
        }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        eprintln!("{}", self.line(event));
    }
}

/// Keeps the most recent events; used by tests and embedders
pub struct MemoryLogger {
    events: Mutex<VecDeque<LogEvent>>,
    capacity: usize,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::with_capacity(LOG_BUFFER_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, code: Code) -> bool {
        self.lock().iter().any(|event| event.has_code(code))
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.lock();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event.clone());
    }
}

/// Filters by level, then hands each event to every sink
pub struct LoggingService {
    sinks: Vec<Arc<dyn Logger>>,
    threshold: LogLevel,
    tag_input: bool,
}

impl LoggingService {
    pub fn new(threshold: LogLevel) -> Self {
        Self {
            sinks: Vec::new(),
            threshold,
            tag_input: true,
        }
    }

    /// Console sink per preferences, or none when console output is off
    pub fn from_preferences(preferences: &LoggingPreferences) -> Self {
        let mut service = Self::new(config::effective_level(preferences))
            .with_input_tagging(preferences.include_file_context);

        if preferences.enable_console_logging {
            let format = if preferences.use_structured_logging {
                ConsoleFormat::Json
            } else {
                ConsoleFormat::Plain
            };
            service = service.with_sink(Arc::new(ConsoleLogger::new(format)));
        }
        service
    }

    pub fn with_sink(mut self, sink: Arc<dyn Logger>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn with_input_tagging(mut self, tag_input: bool) -> Self {
        self.tag_input = tag_input;
        self
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn tags_input(&self) -> bool {
        self.tag_input
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.threshold && !self.sinks.is_empty()
    }

    pub fn emit(&self, event: &LogEvent) {
        if self.enabled(event.level) {
            for sink in &self.sinks {
                sink.log(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_console_line_formats() {
        let event = LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "Missing")
            .with_field("path", "delta.xml");

        let plain = ConsoleLogger::new(ConsoleFormat::Plain).line(&event);
        assert_eq!(plain, "error[E010]: Missing (path=delta.xml)");

        let json = ConsoleLogger::new(ConsoleFormat::Json).line(&event);
        assert!(json.starts_with('{'));
        assert!(json.contains("\"code\":\"E010\""));
    }

    #[test]
    fn test_memory_logger_drops_oldest() {
        let logger = MemoryLogger::with_capacity(2);
        logger.log(&LogEvent::info("first"));
        logger.log(&LogEvent::warning(codes::warnings::NESTED_DELTA, "second"));
        logger.log(&LogEvent::error(codes::output::WRITE_FAILED, "third"));

        let messages: Vec<_> = logger.events().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, ["second", "third"]);
        assert!(logger.contains(codes::output::WRITE_FAILED));

        logger.clear();
        assert!(logger.is_empty());
    }

    #[test]
    fn test_service_filters_by_threshold() {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(LogLevel::Warning).with_sink(memory.clone());

        service.emit(&LogEvent::debug("parse event"));
        service.emit(&LogEvent::success(codes::success::REPORT_WRITTEN, "written"));
        service.emit(&LogEvent::warning(codes::warnings::UNRENDERABLE_ENTRY, "skipped"));

        assert_eq!(memory.len(), 1);
        assert!(memory.contains(codes::warnings::UNRENDERABLE_ENTRY));
        assert!(service.enabled(LogLevel::Error));
        assert!(!service.enabled(LogLevel::Info));
    }

    #[test]
    fn test_service_without_sinks_is_disabled() {
        let preferences = LoggingPreferences {
            use_structured_logging: false,
            enable_console_logging: false,
            min_log_level: LogLevel::Debug,
            include_file_context: false,
        };
        let service = LoggingService::from_preferences(&preferences);
        assert!(!service.enabled(LogLevel::Error));
        assert!(!service.tags_input());
    }
}
