//! `log_*!` macros
//!
//! Each takes a code where the level needs one, a message, then any number of
//! `"field" => value` pairs whose values are formatted with `Display`.

#[doc(hidden)]
#[macro_export]
macro_rules! __dispatch_log_event {
    ($event:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::dispatch_event($event $(.with_field($key, &$value))*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__dispatch_log_event!(
            $crate::logging::LogEvent::error($code, $message) $(, $key => $value)*
        )
    };
}

#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__dispatch_log_event!(
            $crate::logging::LogEvent::warning($code, $message) $(, $key => $value)*
        )
    };
}

/// Milestone reached, logged at info level with its code
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__dispatch_log_event!(
            $crate::logging::LogEvent::success($code, $message) $(, $key => $value)*
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__dispatch_log_event!(
            $crate::logging::LogEvent::info($message) $(, $key => $value)*
        )
    };
}

/// Fields are only formatted when debug output is enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::enabled($crate::logging::LogLevel::Debug) {
            $crate::__dispatch_log_event!(
                $crate::logging::LogEvent::debug($message) $(, $key => $value)*
            )
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;

    #[test]
    fn test_macros_accept_display_values_without_init() {
        let path = std::path::PathBuf::from("/tmp/delta.xml");
        let entries: usize = 3;

        log_error!(codes::malformed_input::INVALID_FLAGS, "Invalid flags",
            "value" => "abc",
            "position" => 42
        );
        log_success!(codes::success::MODEL_BUILT, "Model built",
            "components" => 2,
            "entries" => entries,
        );
        log_info!("Reading input", "path" => path.display());
        log_info!("No fields");
        log_warning!(code = codes::warnings::NESTED_DELTA, "Nested delta", "key" => "foo");
        log_debug!("Parse event", "tag" => format!("<{}>", "delta"));
    }
}
