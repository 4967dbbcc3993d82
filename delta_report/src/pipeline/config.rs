use super::error::ConfigurationError;
use crate::config::runtime::ConverterPreferences;
use crate::messages::MessageCatalog;
use crate::render::RenderOptions;
use std::path::PathBuf;

/// Everything one conversion run needs
#[derive(Debug, Clone, Default)]
pub struct ConversionConfig {
    pub xml_file: Option<PathBuf>,
    pub html_file: Option<PathBuf>,
    /// Trace events only; never changes the output
    pub debug: bool,
    /// Return malformed input and write failures as errors
    pub strict: bool,
    pub fully_qualified: bool,
    pub messages: MessageCatalog,
}

impl ConversionConfig {
    pub fn new(xml_file: impl Into<PathBuf>) -> Self {
        Self {
            xml_file: Some(xml_file.into()),
            ..Self::default()
        }
    }

    /// Build from runtime preferences, loading the message override file if one is set
    pub fn from_preferences(prefs: &ConverterPreferences) -> Result<Self, ConfigurationError> {
        let messages = match &prefs.messages_file {
            Some(path) => MessageCatalog::from_toml_file(path)?,
            None => MessageCatalog::new(),
        };

        Ok(Self {
            xml_file: None,
            html_file: None,
            debug: prefs.debug,
            strict: prefs.strict,
            fully_qualified: prefs.fully_qualified_signatures,
            messages,
        })
    }

    pub fn with_xml_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.xml_file = Some(path.into());
        self
    }

    pub fn with_html_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.html_file = Some(path.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_fully_qualified(mut self, fully_qualified: bool) -> Self {
        self.fully_qualified = fully_qualified;
        self
    }

    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new()
            .with_messages(self.messages.clone())
            .with_fully_qualified(self.fully_qualified)
            .with_debug(self.debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{MessageCatalogError, MessageKey};
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_builder() {
        let config = ConversionConfig::new("in.xml")
            .with_html_file("out.html")
            .with_strict(true)
            .with_fully_qualified(true);

        assert_eq!(config.xml_file, Some(PathBuf::from("in.xml")));
        assert_eq!(config.html_file, Some(PathBuf::from("out.html")));
        assert!(config.strict);
        assert!(!config.debug);
        assert!(config.render_options().decode.fully_qualified);
    }

    #[test]
    fn test_from_preferences_loads_messages() {
        let dir = tempdir().unwrap();
        let messages = dir.path().join("messages.toml");
        fs::write(&messages, "changed_label = \"Modified\"\n").unwrap();

        let prefs = ConverterPreferences {
            debug: true,
            strict: false,
            fully_qualified_signatures: false,
            messages_file: Some(messages),
        };
        let config = ConversionConfig::from_preferences(&prefs).unwrap();
        assert!(config.debug);
        assert_eq!(config.messages.template(MessageKey::ChangedLabel), "Modified");
    }

    #[test]
    fn test_from_preferences_rejects_bad_messages() {
        let dir = tempdir().unwrap();
        let messages = dir.path().join("messages.toml");
        fs::write(&messages, "not_a_message = \"x\"\n").unwrap();

        let prefs = ConverterPreferences {
            debug: false,
            strict: false,
            fully_qualified_signatures: false,
            messages_file: Some(messages),
        };
        assert_matches!(
            ConversionConfig::from_preferences(&prefs),
            Err(ConfigurationError::MessageCatalog(MessageCatalogError::Parse { .. }))
        );
    }
}
