//! Codes for every event the converter logs
//!
//! `ERR0xx` are failures of the converter itself, `E0xx` errors tied to one
//! conversion, `W0xx` conditions the converter recovered from and `I0xx`
//! progress milestones. Each code has one row in [`TABLE`].

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Registered metadata, if any
    pub fn info(self) -> Option<&'static CodeInfo> {
        TABLE.iter().find(|info| info.code == self)
    }

    pub fn category(self) -> Category {
        self.info().map_or(Category::Unknown, |info| info.category)
    }

    pub fn severity(self) -> Severity {
        self.info().map_or(Severity::Medium, |info| info.severity)
    }

    /// Whether a conversion hitting this code cannot go on
    pub fn requires_halt(self) -> bool {
        self.info().is_some_and(|info| info.halts)
    }

    pub fn recoverable(self) -> bool {
        !self.requires_halt()
    }

    pub fn summary(self) -> &'static str {
        self.info().map_or("Unregistered code", |info| info.summary)
    }

    pub fn help(self) -> Option<&'static str> {
        self.info().and_then(|info| info.help)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Which part of a conversion a code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    System,
    Configuration,
    FileAccess,
    MalformedInput,
    Descriptor,
    Output,
    Recovery,
    Progress,
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::System => "System",
            Category::Configuration => "Configuration",
            Category::FileAccess => "FileAccess",
            Category::MalformedInput => "MalformedInput",
            Category::Descriptor => "Descriptor",
            Category::Output => "Output",
            Category::Recovery => "Recovery",
            Category::Progress => "Progress",
            Category::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

#[derive(Debug)]
pub struct CodeInfo {
    pub code: Code,
    pub category: Category,
    pub severity: Severity,
    pub halts: bool,
    pub summary: &'static str,
    pub help: Option<&'static str>,
}

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Problems with the input or output locations handed to the converter
pub mod configuration {
    use super::Code;

    pub const MISSING_INPUT_LOCATION: Code = Code::new("E001");
    pub const INPUT_NOT_FOUND: Code = Code::new("E002");
    pub const INPUT_IS_DIRECTORY: Code = Code::new("E003");
    pub const INPUT_EXTENSION: Code = Code::new("E004");
    pub const OUTPUT_EXTENSION: Code = Code::new("E005");
    pub const OUTPUT_IS_DIRECTORY: Code = Code::new("E006");
    pub const OUTPUT_PARENT_CREATION: Code = Code::new("E007");
    pub const MESSAGE_CATALOG: Code = Code::new("E008");
}

pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E010");
    pub const FILE_TOO_LARGE: Code = Code::new("E011");
    pub const PERMISSION_DENIED: Code = Code::new("E012");
    pub const IO_ERROR: Code = Code::new("E013");
    pub const INVALID_PATH: Code = Code::new("E014");
}

pub mod malformed_input {
    use super::Code;

    pub const XML_SYNTAX: Code = Code::new("E020");
    pub const TRUNCATED_DOCUMENT: Code = Code::new("E021");
    pub const NO_ROOT_ELEMENT: Code = Code::new("E022");
    pub const UNBALANCED_CLOSE: Code = Code::new("E023");
    pub const MISSING_ATTRIBUTE: Code = Code::new("E024");
    pub const INVALID_FLAGS: Code = Code::new("E025");
    pub const DEPTH_LIMIT_EXCEEDED: Code = Code::new("E026");
    pub const LIMIT_EXCEEDED: Code = Code::new("E027");
}

pub mod descriptor {
    use super::Code;

    pub const INVALID_DESCRIPTOR: Code = Code::new("E030");
    pub const DESCRIPTOR_LIMIT_EXCEEDED: Code = Code::new("E031");
}

pub mod output {
    use super::Code;

    pub const WRITE_FAILED: Code = Code::new("E040");
}

pub mod warnings {
    use super::Code;

    pub const MALFORMED_INPUT_RECOVERED: Code = Code::new("W001");
    pub const WRITE_FAILURE_RECOVERED: Code = Code::new("W002");
    pub const UNRENDERABLE_ENTRY: Code = Code::new("W003");
    pub const NESTED_DELTA: Code = Code::new("W004");
    pub const EVENT_LIMIT_REACHED: Code = Code::new("W005");
}

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const INPUT_READ: Code = Code::new("I002");
    pub const MODEL_BUILT: Code = Code::new("I003");
    pub const REPORT_RENDERED: Code = Code::new("I004");
    pub const REPORT_WRITTEN: Code = Code::new("I005");
    pub const CONVERSION_COMPLETE: Code = Code::new("I006");
}

const fn row(
    code: Code,
    category: Category,
    severity: Severity,
    halts: bool,
    summary: &'static str,
    help: Option<&'static str>,
) -> CodeInfo {
    CodeInfo {
        code,
        category,
        severity,
        halts,
        summary,
        help,
    }
}

use Category as C;
use Severity as S;

#[rustfmt::skip]
pub static TABLE: &[CodeInfo] = &[
    row(system::INTERNAL_ERROR, C::System, S::Critical, true,
        "Internal converter error",
        Some("File a bug report with the input document attached")),
    row(system::INITIALIZATION_FAILURE, C::System, S::Critical, true,
        "Logging or configuration could not be initialized",
        Some("Check the DELTA_REPORT_* environment variables")),
    row(configuration::MISSING_INPUT_LOCATION, C::Configuration, S::High, true,
        "No input document location was given",
        Some("Pass the delta XML report with --xml-file")),
    row(configuration::INPUT_NOT_FOUND, C::Configuration, S::High, true,
        "Input document does not exist",
        Some("Check the input path")),
    row(configuration::INPUT_IS_DIRECTORY, C::Configuration, S::High, true,
        "Input location is a directory",
        Some("Point --xml-file at the report file itself")),
    row(configuration::INPUT_EXTENSION, C::Configuration, S::High, true,
        "Input has no .xml extension and no output path was given",
        Some("Rename the input or pass --html-file")),
    row(configuration::OUTPUT_EXTENSION, C::Configuration, S::High, true,
        "Output location has no .html extension",
        Some("Use an output path ending in .html")),
    row(configuration::OUTPUT_IS_DIRECTORY, C::Configuration, S::High, true,
        "Output location is an existing directory",
        Some("Choose a file path for the report")),
    row(configuration::OUTPUT_PARENT_CREATION, C::Configuration, S::High, true,
        "Output parent directory could not be created",
        Some("Check permissions on the output location")),
    row(configuration::MESSAGE_CATALOG, C::Configuration, S::High, true,
        "Message template file could not be loaded",
        Some("Check the TOML syntax and template names")),
    row(file_processing::FILE_NOT_FOUND, C::FileAccess, S::Medium, true,
        "File not found",
        None),
    row(file_processing::FILE_TOO_LARGE, C::FileAccess, S::Medium, true,
        "Input exceeds the maximum file size",
        Some("Rebuild with a larger input.max_file_size")),
    row(file_processing::PERMISSION_DENIED, C::FileAccess, S::Medium, true,
        "Permission denied",
        Some("Check file permissions")),
    row(file_processing::IO_ERROR, C::FileAccess, S::Medium, false,
        "I/O error while reading or writing",
        Some("Check disk space and file system health")),
    row(file_processing::INVALID_PATH, C::FileAccess, S::Medium, true,
        "Path is empty or not a regular file",
        None),
    row(malformed_input::XML_SYNTAX, C::MalformedInput, S::Medium, false,
        "Input is not well-formed XML",
        Some("Regenerate the delta report")),
    row(malformed_input::TRUNCATED_DOCUMENT, C::MalformedInput, S::Medium, false,
        "Input ends with unclosed elements",
        Some("Check that the report was written completely")),
    row(malformed_input::NO_ROOT_ELEMENT, C::MalformedInput, S::Low, false,
        "Input has no root element",
        None),
    row(malformed_input::UNBALANCED_CLOSE, C::MalformedInput, S::Medium, false,
        "Closing tag without a matching opening tag",
        Some("Regenerate the delta report")),
    row(malformed_input::MISSING_ATTRIBUTE, C::MalformedInput, S::Medium, false,
        "Delta is missing a required attribute",
        Some("Check the tool that produced the report")),
    row(malformed_input::INVALID_FLAGS, C::MalformedInput, S::Medium, false,
        "Delta flags are not an integer",
        Some("Check the tool that produced the report")),
    row(malformed_input::DEPTH_LIMIT_EXCEEDED, C::MalformedInput, S::Medium, false,
        "Element nesting exceeds input.max_element_depth",
        None),
    row(malformed_input::LIMIT_EXCEEDED, C::MalformedInput, S::Medium, false,
        "Input exceeds a model limit",
        None),
    row(descriptor::INVALID_DESCRIPTOR, C::Descriptor, S::Low, false,
        "Signature descriptor could not be decoded",
        None),
    row(descriptor::DESCRIPTOR_LIMIT_EXCEEDED, C::Descriptor, S::Low, false,
        "Signature descriptor exceeds a decoding limit",
        None),
    row(output::WRITE_FAILED, C::Output, S::High, false,
        "Report could not be written",
        Some("Check disk space and permissions on the output location")),
    row(warnings::MALFORMED_INPUT_RECOVERED, C::Recovery, S::Low, false,
        "Malformed input replaced by an empty report",
        Some("Run with --strict to fail instead")),
    row(warnings::WRITE_FAILURE_RECOVERED, C::Recovery, S::Medium, false,
        "Report write failure was tolerated",
        Some("Run with --strict to fail instead")),
    row(warnings::UNRENDERABLE_ENTRY, C::Recovery, S::Low, false,
        "Entry left out of the report",
        None),
    row(warnings::NESTED_DELTA, C::Recovery, S::Low, false,
        "Delta opened inside another delta; the outer one is dropped",
        None),
    row(warnings::EVENT_LIMIT_REACHED, C::Recovery, S::Low, false,
        "Further diagnostics for this input were dropped",
        None),
    row(success::SYSTEM_INITIALIZATION_COMPLETED, C::Progress, S::Low, false,
        "Logging initialized", None),
    row(success::INPUT_READ, C::Progress, S::Low, false, "Input read", None),
    row(success::MODEL_BUILT, C::Progress, S::Low, false, "Delta model built", None),
    row(success::REPORT_RENDERED, C::Progress, S::Low, false, "Report rendered", None),
    row(success::REPORT_WRITTEN, C::Progress, S::Low, false, "Report written", None),
    row(success::CONVERSION_COMPLETE, C::Progress, S::Low, false, "Conversion complete", None),
];

/// First code that appears twice in the table
pub fn duplicate_code() -> Option<Code> {
    TABLE.iter().enumerate().find_map(|(i, info)| {
        TABLE[..i]
            .iter()
            .any(|earlier| earlier.code == info.code)
            .then_some(info.code)
    })
}
