//! Conversion driver: delta XML document in, rendered report out
//!
//! Tolerant mode keeps the long-standing pipeline contract: a document that
//! cannot be parsed produces an empty report, and a failed write does not
//! fail the run. Both cases come back as `ConversionOutcome::Recovered` so
//! callers can tell them apart from a clean run. Strict mode returns them as
//! errors instead.

mod config;
mod error;
mod outcome;
mod paths;

pub use config::ConversionConfig;
pub use error::{ConfigurationError, PipelineError};
pub use outcome::{ConversionOutcome, ConversionStats, RecoveryCause};
pub use paths::{derive_output_path, resolve_paths, ConversionPaths};

use crate::builder::build_from_source;
use crate::file_processor::FileProcessor;
use crate::logging::{self, codes, InputRecord};
use crate::render::{render, RenderOptions, RenderedReport};
use crate::xml::MalformedInputError;
use crate::{log_debug, log_error, log_info, log_success, log_warning};
use std::path::Path;
use std::time::Instant;

/// Parse and render a document held in memory
pub fn convert_source(
    source: &[u8],
    options: &RenderOptions,
) -> Result<RenderedReport, MalformedInputError> {
    let report = build_from_source(source, options.debug)?;
    let rendered = render(&report, options);

    log_success!(codes::success::REPORT_RENDERED, "Report rendered",
        "components" => rendered.stats.components,
        "rendered_entries" => rendered.stats.rendered_entries,
        "skipped_entries" => rendered.stats.skipped_entries,
        "resolver_errors" => rendered.stats.resolver_errors);

    Ok(rendered)
}

/// Convert with default options
pub fn convert_paths(
    input: &Path,
    output: Option<&Path>,
) -> Result<ConversionOutcome, PipelineError> {
    let mut config = ConversionConfig::new(input);
    config.html_file = output.map(Path::to_path_buf);
    convert(&config)
}

/// Run one conversion
pub fn convert(config: &ConversionConfig) -> Result<ConversionOutcome, PipelineError> {
    convert_with_diagnostics(config).0
}

/// Run one conversion and hand back the errors and warnings it logged
///
/// The record is `None` when the configuration was rejected before any input
/// was opened.
pub fn convert_with_diagnostics(
    config: &ConversionConfig,
) -> (Result<ConversionOutcome, PipelineError>, Option<InputRecord>) {
    let start_time = Instant::now();

    let paths = match resolve_paths(config.xml_file.as_deref(), config.html_file.as_deref()) {
        Ok(paths) => paths,
        Err(error) => {
            log_error!(error.error_code(), "Invalid conversion configuration",
                "error" => &error);
            return (Err(error.into()), None);
        }
    };

    let (result, record) = logging::collect_input(&paths.input, || {
        run_conversion(config, &paths, start_time)
    });
    (result, Some(record))
}

fn run_conversion(
    config: &ConversionConfig,
    paths: &ConversionPaths,
    start_time: Instant,
) -> Result<ConversionOutcome, PipelineError> {
    log_info!("Converting delta report",
        "input" => paths.input.display(),
        "output" => paths.output.display(),
        "strict" => config.strict);

    let processor = FileProcessor::new();
    let document = processor.read_input(&paths.input)?;

    let options = config.render_options();
    let rendered = match convert_source(&document.bytes, &options) {
        Ok(rendered) => rendered,
        Err(error) => return recover_malformed(config, paths, &processor, error),
    };

    if config.debug {
        log_debug!("Output", "path" => paths.output.display());
    }

    match processor.write_output(&paths.output, rendered.text.as_bytes()) {
        Ok(summary) => {
            let stats = ConversionStats::from_render(&rendered.stats, &summary, start_time.elapsed());
            log_success!(codes::success::CONVERSION_COMPLETE, "Conversion complete",
                "output" => paths.output.display(),
                "components" => stats.components,
                "entries" => stats.entries,
                "rendered_entries" => stats.rendered_entries,
                "skipped_entries" => stats.skipped_entries,
                "resolver_errors" => stats.resolver_errors,
                "output_bytes" => stats.output_bytes,
                "duration_ms" => format!("{:.2}", stats.duration.as_secs_f64() * 1000.0));

            Ok(ConversionOutcome::Written {
                output: paths.output.clone(),
                stats,
            })
        }
        Err(error) if config.strict => Err(PipelineError::OutputWrite(error)),
        Err(error) => {
            log_warning!(code = codes::warnings::WRITE_FAILURE_RECOVERED,
                "Report could not be written",
                "output" => paths.output.display(),
                "error" => &error);
            Ok(ConversionOutcome::Recovered {
                output: paths.output.clone(),
                cause: RecoveryCause::OutputWrite(error),
            })
        }
    }
}

/// Empty report in place of one that could not be parsed
fn recover_malformed(
    config: &ConversionConfig,
    paths: &ConversionPaths,
    processor: &FileProcessor,
    error: MalformedInputError,
) -> Result<ConversionOutcome, PipelineError> {
    if config.strict {
        return Err(PipelineError::MalformedInput(error));
    }

    log_warning!(code = codes::warnings::MALFORMED_INPUT_RECOVERED,
        "Input could not be parsed, writing an empty report",
        "output" => paths.output.display(),
        "error" => &error,
        "error_code" => error.error_code());

    let cause = match processor.write_output(&paths.output, &[]) {
        Ok(_) => RecoveryCause::MalformedInput(error),
        Err(write) => {
            log_warning!(code = codes::warnings::WRITE_FAILURE_RECOVERED,
                "Empty report could not be written",
                "output" => paths.output.display(),
                "error" => &write);
            RecoveryCause::FallbackWrite { input: error, write }
        }
    };

    Ok(ConversionOutcome::Recovered {
        output: paths.output.clone(),
        cause,
    })
}
