// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    input: InputLimits,
    model: ModelLimits,
    descriptor: DescriptorLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct InputLimits {
    max_file_size: u64,
    max_element_depth: usize,
    max_attribute_length: usize,
}

#[derive(serde::Deserialize)]
struct ModelLimits {
    max_components: usize,
    max_entries_per_component: usize,
    max_resolver_errors_per_component: usize,
    max_message_arguments: usize,
}

#[derive(serde::Deserialize)]
struct DescriptorLimits {
    max_descriptor_length: usize,
    max_array_dimensions: usize,
    max_type_argument_depth: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_error_collection: usize,
    log_buffer_size: usize,
    max_log_message_length: usize,
    max_log_events_per_file: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=DELTA_REPORT_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=DELTA_REPORT_CONFIG_DIR");

    let profile =
        env::var("DELTA_REPORT_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("DELTA_REPORT_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the delta_report directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;
    const ABSOLUTE_MAX_ELEMENT_DEPTH: usize = 4096;
    // Class file format ceiling
    const ABSOLUTE_MAX_ARRAY_DIMENSIONS: usize = 255;

    if config.input.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("LIMITS: max_file_size exceeds absolute maximum");
    }

    if config.input.max_element_depth == 0
        || config.input.max_element_depth > ABSOLUTE_MAX_ELEMENT_DEPTH
    {
        panic!("LIMITS: max_element_depth must be within 1..={ABSOLUTE_MAX_ELEMENT_DEPTH}");
    }

    if config.descriptor.max_array_dimensions > ABSOLUTE_MAX_ARRAY_DIMENSIONS {
        panic!("LIMITS: max_array_dimensions exceeds {ABSOLUTE_MAX_ARRAY_DIMENSIONS}");
    }

    if config.model.max_message_arguments == 0 {
        panic!("LIMITS: max_message_arguments must be at least 1");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("LIMITS: security_min_log_level too high (max: 2)");
    }

    if config.logging.max_log_events_per_file > config.logging.log_buffer_size {
        panic!("LIMITS: max_log_events_per_file exceeds log_buffer_size");
    }

    if profile == "production" && config.input.max_file_size > 100_000_000 {
        panic!("PRODUCTION: max_file_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod input {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const MAX_ELEMENT_DEPTH: usize = {};
        pub const MAX_ATTRIBUTE_LENGTH: usize = {};
    }}

    pub mod model {{
        pub const MAX_COMPONENTS: usize = {};
        pub const MAX_ENTRIES_PER_COMPONENT: usize = {};
        pub const MAX_RESOLVER_ERRORS_PER_COMPONENT: usize = {};
        pub const MAX_MESSAGE_ARGUMENTS: usize = {};
    }}

    pub mod descriptor {{
        pub const MAX_DESCRIPTOR_LENGTH: usize = {};
        pub const MAX_ARRAY_DIMENSIONS: usize = {};
        pub const MAX_TYPE_ARGUMENT_DEPTH: usize = {};
    }}

    pub mod logging {{
        pub const MAX_ERROR_COLLECTION: usize = {};
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_LOG_EVENTS_PER_FILE: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        // Input
        config.input.max_file_size,
        config.input.max_element_depth,
        config.input.max_attribute_length,
        // Model
        config.model.max_components,
        config.model.max_entries_per_component,
        config.model.max_resolver_errors_per_component,
        config.model.max_message_arguments,
        // Descriptor
        config.descriptor.max_descriptor_length,
        config.descriptor.max_array_dimensions,
        config.descriptor.max_type_argument_depth,
        // Logging
        config.logging.max_error_collection,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.max_log_events_per_file,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
