//! delta-report CLI
//!
//! Converts one API delta XML report into an HTML report.

use clap::Parser;
use delta_report::config::runtime::{LogLevel, RuntimeConfig};
use delta_report::logging::{self, codes, DiagnosticCollector};
use delta_report::pipeline::{
    self, ConversionConfig, ConversionOutcome, PipelineError, RecoveryCause,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const EXIT_CONFIGURATION: u8 = 2;
const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Parser)]
#[command(name = "delta-report", version)]
#[command(about = "Convert an API delta XML report into an HTML report", long_about = None)]
struct Cli {
    /// Delta report to convert
    #[arg(long, value_name = "PATH")]
    xml_file: Option<PathBuf>,

    /// Report to write; defaults to the input path with a .html extension
    #[arg(long, value_name = "PATH")]
    html_file: Option<PathBuf>,

    /// Trace parsing and rendering (the report itself is unchanged)
    #[arg(long)]
    debug: bool,

    /// Fail on malformed input or write errors instead of recovering
    #[arg(long)]
    strict: bool,

    /// Keep package names in decoded signatures
    #[arg(long)]
    fully_qualified: bool,

    /// TOML file overriding message templates
    #[arg(long, value_name = "TOML")]
    messages: Option<PathBuf>,

    /// Emit log events as JSON lines
    #[arg(long)]
    structured_logs: bool,

    /// Minimum log level: error, warn, info, debug or 0..3
    #[arg(long, value_name = "LEVEL", value_parser = parse_level)]
    log_level: Option<LogLevel>,
}

fn parse_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::parse(value).ok_or_else(|| format!("unknown log level '{}'", value))
}

impl Cli {
    /// Environment defaults overridden by whatever was passed on the command line
    fn runtime_config(&self) -> RuntimeConfig {
        let mut runtime = RuntimeConfig::default();

        runtime.converter.debug |= self.debug;
        runtime.converter.strict |= self.strict;
        runtime.converter.fully_qualified_signatures |= self.fully_qualified;
        if let Some(messages) = &self.messages {
            runtime.converter.messages_file = Some(messages.clone());
        }

        runtime.logging.use_structured_logging |= self.structured_logs;
        if runtime.converter.debug {
            runtime.logging.min_log_level = LogLevel::Debug;
        }
        if let Some(level) = self.log_level {
            runtime.logging.min_log_level = level;
        }

        runtime
    }

    fn conversion_config(
        &self,
        runtime: &RuntimeConfig,
    ) -> Result<ConversionConfig, PipelineError> {
        let mut config = ConversionConfig::from_preferences(&runtime.converter)?;
        config.xml_file = self.xml_file.clone();
        config.html_file = self.html_file.clone();
        Ok(config)
    }
}

fn recovery_message(output: &Path, cause: &RecoveryCause) -> String {
    let state = if cause.output_written() {
        "empty report written"
    } else {
        "no report written"
    };
    format!(
        "warning[{}]: {} ({}): {}",
        cause.error_code(),
        output.display(),
        state,
        cause
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let runtime = cli.runtime_config();

    if let Err(e) = logging::init(&runtime.logging) {
        logging::safe_log_error(codes::system::INITIALIZATION_FAILURE, &e.to_string());
        return ExitCode::from(EXIT_FAILURE);
    }

    let (result, record) = match cli.conversion_config(&runtime) {
        Ok(config) => pipeline::convert_with_diagnostics(&config),
        Err(error) => (Err(error), None),
    };

    let exit_code = match result {
        Ok(ConversionOutcome::Written { output, stats }) => {
            println!(
                "Wrote {} ({} components, {} of {} entries, {} resolver errors)",
                output.display(),
                stats.components,
                stats.rendered_entries,
                stats.entries,
                stats.resolver_errors
            );
            ExitCode::SUCCESS
        }
        Ok(ConversionOutcome::Recovered { output, cause }) => {
            eprintln!("{}", recovery_message(&output, &cause));
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error[{}]: {}", error.error_code(), error);
            if error.is_configuration() {
                ExitCode::from(EXIT_CONFIGURATION)
            } else {
                ExitCode::from(EXIT_FAILURE)
            }
        }
    };

    let mut diagnostics = DiagnosticCollector::new();
    diagnostics.extend(record);
    let summary = diagnostics.summary();
    if summary.has_errors() || summary.has_warnings() {
        eprint!("{}", diagnostics.render());
    }

    exit_code
}
