//! Bounded input reads and scoped output writes with logging

use crate::config::compile_time::input::MAX_FILE_SIZE;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("I/O error: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
        }
    }

    pub fn requires_halt(&self) -> bool {
        self.error_code().requires_halt()
    }

    pub fn severity(&self) -> &'static str {
        self.error_code().severity().as_str()
    }

    pub fn category(&self) -> &'static str {
        self.error_code().category().as_str()
    }

    fn from_io(path: &Path, action: &str, error: &std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path: path.display().to_string(),
            },
            std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => FileProcessorError::IoError {
                message: format!("Failed to {} '{}': {}", action, path.display(), error),
            },
        }
    }
}

/// Metadata of the input document
#[derive(Debug, Clone)]
pub struct InputMetadata {
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<std::time::SystemTime>,
}

impl InputMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Raw bytes of an input document plus how they were obtained
#[derive(Debug, Clone)]
pub struct InputDocument {
    pub bytes: Vec<u8>,
    pub metadata: InputMetadata,
    pub read_duration: Duration,
}

impl InputDocument {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Result of a completed output write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub bytes_written: u64,
    pub duration: Duration,
}

/// Reads delta documents and writes rendered reports
#[derive(Debug, Clone)]
pub struct FileProcessor {
    /// Whether to include sizes and timings in success events
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            enable_performance_logging: true,
        }
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    /// Get the compile-time maximum input size
    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read an input document, enforcing the compile-time size limit
    pub fn read_input(&self, path: &Path) -> Result<InputDocument, FileProcessorError> {
        let start_time = Instant::now();
        let file_path = path.display().to_string();

        log_debug!("Reading input document", "file" => &file_path);

        let metadata = self.input_metadata(path)?;

        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "Input document exceeds maximum size",
                "file" => &file_path,
                "size_bytes" => metadata.size,
                "max_size_bytes" => MAX_FILE_SIZE);
            return Err(error);
        }

        let bytes = fs::read(path).map_err(|e| {
            let error = FileProcessorError::from_io(path, "read", &e);
            log_error!(error.error_code(), "Failed to read input document",
                "file" => &file_path,
                "io_error" => e);
            error
        })?;

        // The file may have grown between the metadata check and the read
        if bytes.len() as u64 > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: bytes.len() as u64,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "Input document exceeds maximum size",
                "file" => &file_path,
                "size_bytes" => bytes.len());
            return Err(error);
        }

        let document = InputDocument {
            bytes,
            metadata,
            read_duration: start_time.elapsed(),
        };

        if self.enable_performance_logging {
            log_success!(codes::success::INPUT_READ, "Input document read",
                "file" => &file_path,
                "size_bytes" => document.metadata.size,
                "size_human" => document.metadata.human_readable_size(),
                "duration_ms" => format!("{:.2}", document.read_duration.as_secs_f64() * 1000.0));
        } else {
            log_success!(codes::success::INPUT_READ, "Input document read",
                "file" => &file_path);
        }

        Ok(document)
    }

    fn input_metadata(&self, path: &Path) -> Result<InputMetadata, FileProcessorError> {
        let file_path = path.display().to_string();

        if file_path.is_empty() {
            let error = FileProcessorError::InvalidPath { path: file_path };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        let metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(path, "read metadata for", &e);
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => &file_path,
                "io_error" => e);
            error
        })?;

        if !metadata.is_file() {
            let error = FileProcessorError::InvalidPath { path: file_path };
            log_error!(error.error_code(), "Path is not a file", "path" => path.display());
            return Err(error);
        }

        Ok(InputMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }

    /// Write `contents` to `path`, replacing any existing file
    ///
    /// The file handle is flushed and closed before returning on every path.
    pub fn write_output(
        &self,
        path: &Path,
        contents: &[u8],
    ) -> Result<WriteSummary, FileProcessorError> {
        let start_time = Instant::now();
        let file_path = path.display().to_string();

        log_debug!("Writing output document",
            "file" => &file_path,
            "size_bytes" => contents.len());

        let result = File::create(path)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                writer.write_all(contents)?;
                writer.flush()
            })
            .map_err(|e| {
                let error = FileProcessorError::from_io(path, "write", &e);
                log_error!(codes::output::WRITE_FAILED, "Failed to write output document",
                    "file" => &file_path,
                    "io_error" => e,
                    "error_code" => error.error_code());
                error
            });
        result?;

        let summary = WriteSummary {
            path: path.to_path_buf(),
            bytes_written: contents.len() as u64,
            duration: start_time.elapsed(),
        };

        if self.enable_performance_logging {
            log_success!(codes::success::REPORT_WRITTEN, "Output document written",
                "file" => &file_path,
                "size_bytes" => summary.bytes_written,
                "duration_ms" => format!("{:.2}", summary.duration.as_secs_f64() * 1000.0));
        } else {
            log_success!(codes::success::REPORT_WRITTEN, "Output document written",
                "file" => &file_path);
        }

        Ok(summary)
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}
