use super::error::ConfigurationError;
use std::path::{Path, PathBuf};

const INPUT_EXTENSION: &str = "xml";
const OUTPUT_EXTENSION: &str = "html";

/// Validated input and output locations for one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected))
}

/// `<stem>.xml` to `<stem>.html`; `None` unless the input ends in `.xml`
pub fn derive_output_path(input: &Path) -> Option<PathBuf> {
    has_extension(input, INPUT_EXTENSION).then(|| input.with_extension(OUTPUT_EXTENSION))
}

/// Validate the input and settle the output location
///
/// Creates the parent directories of an explicit output path when missing.
pub fn resolve_paths(
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<ConversionPaths, ConfigurationError> {
    let input = match input {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => return Err(ConfigurationError::MissingInputLocation),
    };
    let input_display = input.display().to_string();

    if !input.exists() {
        return Err(ConfigurationError::InputNotFound {
            path: input_display,
        });
    }
    if input.is_dir() {
        return Err(ConfigurationError::InputIsDirectory {
            path: input_display,
        });
    }

    let output = match output {
        None => derive_output_path(input).ok_or(ConfigurationError::InputExtension {
            path: input_display,
        })?,
        Some(output) => {
            let output_display = output.display().to_string();
            if !has_extension(output, OUTPUT_EXTENSION) {
                return Err(ConfigurationError::OutputExtension {
                    path: output_display,
                });
            }
            if output.is_dir() {
                return Err(ConfigurationError::OutputIsDirectory {
                    path: output_display,
                });
            }
            if !output.exists() {
                ensure_parent(output)?;
            }
            output.to_path_buf()
        }
    };

    Ok(ConversionPaths {
        input: input.to_path_buf(),
        output,
    })
}

fn ensure_parent(output: &Path) -> Result<(), ConfigurationError> {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent).map_err(|e| ConfigurationError::OutputParentCreation {
                path: parent.display().to_string(),
                message: e.to_string(),
            })
        }
        _ => Ok(()),
    }
}
