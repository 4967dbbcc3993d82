//! One diagnostic emitted during a conversion

use super::codes::Code;
use crate::config::compile_time::logging::MAX_LOG_MESSAGE_LENGTH;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Ordered from most to least severe, so `level <= threshold` means "show it"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Accepts `error`, `warn`, `warning`, `info`, `debug` or a rank `0`..`3`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" | "0" => Some(LogLevel::Error),
            "warn" | "warning" | "1" => Some(LogLevel::Warning),
            "info" | "2" => Some(LogLevel::Info),
            "debug" | "3" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    /// Ranks above 3 saturate at `Debug`
    pub fn from_rank(rank: u8) -> Self {
        match rank {
            0 => LogLevel::Error,
            1 => LogLevel::Warning,
            2 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    /// Errors, warnings and milestones carry a code; plain info and debug lines do not
    pub code: Option<Code>,
    pub message: String,
    /// Input document being converted when the event was raised
    pub input: Option<PathBuf>,
    pub fields: BTreeMap<&'static str, String>,
}

impl LogEvent {
    pub fn new(level: LogLevel, code: Option<Code>, message: impl AsRef<str>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: clip(message.as_ref()),
            input: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn error(code: Code, message: impl AsRef<str>) -> Self {
        Self::new(LogLevel::Error, Some(code), message)
    }

    pub fn warning(code: Code, message: impl AsRef<str>) -> Self {
        Self::new(LogLevel::Warning, Some(code), message)
    }

    /// Info event marking a milestone
    pub fn success(code: Code, message: impl AsRef<str>) -> Self {
        Self::new(LogLevel::Info, Some(code), message)
    }

    pub fn info(message: impl AsRef<str>) -> Self {
        Self::new(LogLevel::Info, None, message)
    }

    pub fn debug(message: impl AsRef<str>) -> Self {
        Self::new(LogLevel::Debug, None, message)
    }

    pub fn with_field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.fields.insert(key, value.to_string());
        self
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Errors and warnings end up in the per-input diagnostics
    pub fn is_problem(&self) -> bool {
        self.level <= LogLevel::Warning
    }

    pub fn has_code(&self, code: Code) -> bool {
        self.code == Some(code)
    }

    pub fn help(&self) -> Option<&'static str> {
        self.code.and_then(Code::help)
    }

    /// One JSON object per event
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut value = serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339(),
            "level": self.level,
            "message": self.message,
        });

        if let Some(code) = self.code {
            value["code"] = code.as_str().into();
            value["category"] = code.category().as_str().into();
            if self.is_problem() {
                value["severity"] = code.severity().as_str().into();
                value["recoverable"] = code.recoverable().into();
            }
        }
        if let Some(input) = &self.input {
            value["input"] = input.display().to_string().into();
        }
        if !self.fields.is_empty() {
            value["fields"] = serde_json::to_value(&self.fields)?;
        }

        serde_json::to_string(&value)
    }
}

/// `input: level[code]: message (key=value, ...)`
impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(input) = &self.input {
            write!(f, "{}: ", input.display())?;
        }
        match self.code {
            Some(code) => write!(f, "{}[{}]: {}", self.level, code, self.message)?,
            None => write!(f, "{}: {}", self.level, self.message)?,
        }

        let mut fields = self.fields.iter();
        if let Some((key, value)) = fields.next() {
            write!(f, " ({}={}", key, value)?;
            for (key, value) in fields {
                write!(f, ", {}={}", key, value)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

fn clip(message: &str) -> String {
    if message.len() <= MAX_LOG_MESSAGE_LENGTH {
        return message.to_string();
    }
    let mut end = MAX_LOG_MESSAGE_LENGTH;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &message[..end])
}
