//! Process-wide logging for conversions
//!
//! Code logs through the `log_*!` macros. Events raised inside
//! [`collect_input`] are tagged with the input document being converted, and
//! their errors and warnings land in an [`InputRecord`] that belongs to that
//! conversion alone and is returned when it finishes. Before [`init`] runs
//! nothing reaches the console, but records are still filled.

pub mod codes;
pub mod collector;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::config::runtime::LoggingPreferences;
use crate::log_success;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub use codes::Code;
pub use collector::{DiagnosticCollector, DiagnosticSummary, InputRecord};
pub use config::LoggingInitError;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleFormat, ConsoleLogger, Logger, LoggingService, MemoryLogger};

static SERVICE: OnceLock<LoggingService> = OnceLock::new();

thread_local! {
    static CURRENT_RECORD: RefCell<Option<InputRecord>> = const { RefCell::new(None) };
}

/// Set up console logging from preferences; callable once per process
pub fn init(preferences: &LoggingPreferences) -> Result<(), LoggingInitError> {
    config::check_limits()?;
    install(LoggingService::from_preferences(preferences))?;

    log_success!(codes::success::SYSTEM_INITIALIZATION_COMPLETED, "Logging initialized",
        "level" => config::effective_level(preferences),
        "structured" => preferences.use_structured_logging);
    Ok(())
}

/// Install a prepared service, e.g. one writing to a [`MemoryLogger`]
pub fn install(service: LoggingService) -> Result<(), LoggingInitError> {
    SERVICE
        .set(service)
        .map_err(|_| LoggingInitError::AlreadyInitialized)
}

pub fn is_initialized() -> bool {
    SERVICE.get().is_some()
}

/// Whether an event at `level` would reach any sink
pub fn enabled(level: LogLevel) -> bool {
    SERVICE.get().is_some_and(|service| service.enabled(level))
}

/// Puts the enclosing scope's record back, also when `f` unwinds
struct RestoreRecord(Option<InputRecord>);

impl Drop for RestoreRecord {
    fn drop(&mut self) {
        let previous = self.0.take();
        CURRENT_RECORD.with(|current| *current.borrow_mut() = previous);
    }
}

/// Run `f` with events attributed to `input`, returning what it logged
///
/// Scopes nest; the inner record is separate from the outer one.
pub fn collect_input<F, R>(input: &Path, f: F) -> (R, InputRecord)
where
    F: FnOnce() -> R,
{
    let previous = CURRENT_RECORD.with(|current| current.replace(Some(InputRecord::new(input))));
    let restore = RestoreRecord(previous);

    let value = f();
    let record = CURRENT_RECORD
        .with(|current| current.borrow_mut().take())
        .unwrap_or_else(|| InputRecord::new(input));
    drop(restore);

    (value, record)
}

/// [`collect_input`] for callers that only want the tagging
pub fn with_input<F, R>(input: &Path, f: F) -> R
where
    F: FnOnce() -> R,
{
    collect_input(input, f).0
}

pub fn current_input() -> Option<PathBuf> {
    CURRENT_RECORD.with(|current| current.borrow().as_ref().map(|r| r.input.clone()))
}

/// Route an event to the current record and the installed service
pub fn dispatch_event(mut event: LogEvent) {
    let input = CURRENT_RECORD.with(|current| {
        current.borrow_mut().as_mut().map(|record| {
            record.record(&event);
            record.input.clone()
        })
    });

    if let Some(input) = input {
        if SERVICE.get().map_or(true, LoggingService::tags_input) {
            event.input = Some(input);
        }
    }

    if let Some(service) = SERVICE.get() {
        service.emit(&event);
    }
}

/// Reaches stderr even when logging never initialized
pub fn safe_log_error(code: Code, message: &str) {
    let event = LogEvent::error(code, message);
    match SERVICE.get() {
        Some(service) if service.enabled(LogLevel::Error) => service.emit(&event),
        _ => eprintln!("{}", event),
    }
}
