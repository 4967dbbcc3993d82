//! Limits and levels that shape logging
//!
//! Buffer sizes and the level floor are fixed at build time; the threshold a
//! process runs with comes from [`LoggingPreferences`].

use super::codes::{self, Code};
use super::events::LogLevel;
use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingInitError {
    #[error("logging is already initialized")]
    AlreadyInitialized,

    #[error("{name} = {value} is outside {min}..={max}")]
    LimitOutOfRange {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("code {0} is registered more than once")]
    DuplicateCode(Code),
}

/// Least verbose threshold a build allows; preferences cannot go below it
pub fn level_floor() -> LogLevel {
    LogLevel::from_rank(SECURITY_MIN_LOG_LEVEL)
}

pub fn effective_level(preferences: &LoggingPreferences) -> LogLevel {
    preferences.min_log_level.max(level_floor())
}

fn check_range(
    name: &'static str,
    value: usize,
    min: usize,
    max: usize,
) -> Result<(), LoggingInitError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(LoggingInitError::LimitOutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

/// Reject builds whose generated limits would make logging misbehave
pub fn check_limits() -> Result<(), LoggingInitError> {
    check_range("logging.log_buffer_size", LOG_BUFFER_SIZE, 100, 100_000)?;
    check_range(
        "logging.max_log_events_per_file",
        MAX_LOG_EVENTS_PER_FILE,
        1,
        LOG_BUFFER_SIZE,
    )?;
    check_range(
        "logging.max_error_collection",
        MAX_ERROR_COLLECTION,
        MAX_LOG_EVENTS_PER_FILE,
        usize::MAX,
    )?;
    check_range(
        "logging.max_log_message_length",
        MAX_LOG_MESSAGE_LENGTH,
        80,
        usize::MAX,
    )?;

    match codes::duplicate_code() {
        Some(code) => Err(LoggingInitError::DuplicateCode(code)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_generated_limits_pass() {
        assert!(check_limits().is_ok());
    }

    #[test]
    fn test_range_error_names_the_limit() {
        let error = check_range("logging.log_buffer_size", 5, 100, 200).unwrap_err();
        assert_matches!(error, LoggingInitError::LimitOutOfRange { value: 5, .. });
        assert_eq!(
            error.to_string(),
            "logging.log_buffer_size = 5 is outside 100..=200"
        );
    }

    #[test]
    fn test_effective_level_respects_floor() {
        let preferences = LoggingPreferences {
            use_structured_logging: false,
            enable_console_logging: true,
            min_log_level: LogLevel::Error,
            include_file_context: true,
        };
        assert_eq!(effective_level(&preferences), level_floor().max(LogLevel::Error));
        assert!(effective_level(&preferences) >= level_floor());
    }
}
