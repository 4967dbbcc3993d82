//! Preferences read from `DELTA_REPORT_*` environment variables
//!
//! These are defaults only; the CLI overrides them with its flags.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub use crate::logging::LogLevel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterPreferences {
    /// Emit trace events while parsing and rendering (never changes the output)
    pub debug: bool,

    /// Surface malformed input and output write failures as errors
    pub strict: bool,

    /// Render descriptor types with their package names
    pub fully_qualified_signatures: bool,

    /// TOML file overriding message templates
    pub messages_file: Option<PathBuf>,
}

impl Default for ConverterPreferences {
    fn default() -> Self {
        Self {
            debug: env_flag(env_vars::DEBUG, false),
            strict: env_flag(env_vars::STRICT, false),
            fully_qualified_signatures: env_flag(env_vars::FULLY_QUALIFIED, false),
            messages_file: env_path(env_vars::MESSAGES_FILE),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// One JSON object per event instead of plain lines
    pub use_structured_logging: bool,

    /// Write events to stderr at all
    pub enable_console_logging: bool,

    pub min_log_level: LogLevel,

    /// Prefix events with the input document they belong to
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|value| LogLevel::parse(&value))
                .unwrap_or(LogLevel::Warning),
            include_file_context: env_flag(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub converter: ConverterPreferences,
    pub logging: LoggingPreferences,
}

/// `true`/`false` and `1`/`0`; anything else keeps the default
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_flag(&value))
        .unwrap_or(default)
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub mod env_vars {
    pub const DEBUG: &str = "DELTA_REPORT_DEBUG";
    pub const STRICT: &str = "DELTA_REPORT_STRICT";
    pub const FULLY_QUALIFIED: &str = "DELTA_REPORT_FULLY_QUALIFIED";
    pub const MESSAGES_FILE: &str = "DELTA_REPORT_MESSAGES_FILE";

    pub const LOGGING_USE_STRUCTURED: &str = "DELTA_REPORT_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "DELTA_REPORT_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "DELTA_REPORT_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "DELTA_REPORT_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_parsing() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_unset_variables_keep_defaults() {
        assert!(env_flag("DELTA_REPORT_TEST_UNSET_FLAG", true));
        assert!(!env_flag("DELTA_REPORT_TEST_UNSET_FLAG", false));
        assert_eq!(env_path("DELTA_REPORT_TEST_UNSET_PATH"), None);
    }

    #[test]
    fn test_env_var_names_share_prefix() {
        for name in [
            env_vars::DEBUG,
            env_vars::STRICT,
            env_vars::FULLY_QUALIFIED,
            env_vars::MESSAGES_FILE,
            env_vars::LOGGING_USE_STRUCTURED,
            env_vars::LOGGING_ENABLE_CONSOLE,
            env_vars::LOGGING_MIN_LEVEL,
            env_vars::LOGGING_INCLUDE_FILE_CONTEXT,
        ] {
            assert!(name.starts_with("DELTA_REPORT_"));
        }
    }
}
