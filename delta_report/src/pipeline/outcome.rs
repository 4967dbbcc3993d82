use crate::file_processor::{FileProcessorError, WriteSummary};
use crate::render::RenderStats;
use crate::xml::MalformedInputError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Counts for one completed conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub components: usize,
    pub entries: usize,
    pub rendered_entries: usize,
    pub skipped_entries: usize,
    pub resolver_errors: usize,
    pub output_bytes: u64,
    pub duration: Duration,
}

impl ConversionStats {
    pub fn from_render(render: &RenderStats, write: &WriteSummary, duration: Duration) -> Self {
        Self {
            components: render.components,
            entries: render.entries,
            rendered_entries: render.rendered_entries,
            skipped_entries: render.skipped_entries,
            resolver_errors: render.resolver_errors,
            output_bytes: write.bytes_written,
            duration,
        }
    }
}

/// Failure that tolerant mode absorbed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryCause {
    /// Input could not be parsed; an empty document was written
    MalformedInput(MalformedInputError),
    /// The rendered report could not be written
    OutputWrite(FileProcessorError),
    /// Input could not be parsed and the empty fallback could not be written either
    FallbackWrite {
        input: MalformedInputError,
        write: FileProcessorError,
    },
}

impl RecoveryCause {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            RecoveryCause::MalformedInput(error) => error.error_code(),
            RecoveryCause::OutputWrite(error) => error.error_code(),
            RecoveryCause::FallbackWrite { write, .. } => write.error_code(),
        }
    }

    /// Whether an output document exists after the run
    pub fn output_written(&self) -> bool {
        matches!(self, RecoveryCause::MalformedInput(_))
    }
}

impl std::fmt::Display for RecoveryCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecoveryCause::MalformedInput(error) => {
                write!(f, "malformed input, wrote an empty report: {}", error)
            }
            RecoveryCause::OutputWrite(error) => write!(f, "report not written: {}", error),
            RecoveryCause::FallbackWrite { input, write } => write!(
                f,
                "malformed input ({}) and the empty report could not be written: {}",
                input, write
            ),
        }
    }
}

/// How a conversion ended when it did not fail outright
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Written {
        output: PathBuf,
        stats: ConversionStats,
    },
    Recovered {
        output: PathBuf,
        cause: RecoveryCause,
    },
}

impl ConversionOutcome {
    pub fn output(&self) -> &Path {
        match self {
            ConversionOutcome::Written { output, .. } | ConversionOutcome::Recovered { output, .. } => {
                output
            }
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, ConversionOutcome::Recovered { .. })
    }

    pub fn stats(&self) -> Option<&ConversionStats> {
        match self {
            ConversionOutcome::Written { stats, .. } => Some(stats),
            ConversionOutcome::Recovered { .. } => None,
        }
    }
}
