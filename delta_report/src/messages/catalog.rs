use super::template::bind;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Every template the renderer and display resolver use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Header,
    Footer,
    ComponentBegin,
    ComponentEnd,
    Entry,
    ResolverSummarySingle,
    ResolverSummaryMultiple,
    ResolverTableStart,
    ResolverTableEntry,
    ResolverTableEnd,
    MajorVersion,
    MinorVersion,
    AddedLabel,
    RemovedLabel,
    ChangedLabel,
}

impl MessageKey {
    pub fn all() -> &'static [MessageKey] {
        &[
            MessageKey::Header,
            MessageKey::Footer,
            MessageKey::ComponentBegin,
            MessageKey::ComponentEnd,
            MessageKey::Entry,
            MessageKey::ResolverSummarySingle,
            MessageKey::ResolverSummaryMultiple,
            MessageKey::ResolverTableStart,
            MessageKey::ResolverTableEntry,
            MessageKey::ResolverTableEnd,
            MessageKey::MajorVersion,
            MessageKey::MinorVersion,
            MessageKey::AddedLabel,
            MessageKey::RemovedLabel,
            MessageKey::ChangedLabel,
        ]
    }

    /// Name used in override files
    pub fn name(&self) -> &'static str {
        match self {
            MessageKey::Header => "header",
            MessageKey::Footer => "footer",
            MessageKey::ComponentBegin => "component_begin",
            MessageKey::ComponentEnd => "component_end",
            MessageKey::Entry => "entry",
            MessageKey::ResolverSummarySingle => "resolver_summary_single",
            MessageKey::ResolverSummaryMultiple => "resolver_summary_multiple",
            MessageKey::ResolverTableStart => "resolver_table_start",
            MessageKey::ResolverTableEntry => "resolver_table_entry",
            MessageKey::ResolverTableEnd => "resolver_table_end",
            MessageKey::MajorVersion => "major_version",
            MessageKey::MinorVersion => "minor_version",
            MessageKey::AddedLabel => "added_label",
            MessageKey::RemovedLabel => "removed_label",
            MessageKey::ChangedLabel => "changed_label",
        }
    }

    fn default_template(&self) -> &'static str {
        match self {
            MessageKey::Header => {
                "<!DOCTYPE html>\n\
                 <html lang=\"en\">\n\
                 <head>\n\
                 <meta charset=\"UTF-8\">\n\
                 <title>API Freeze Report</title>\n\
                 <style>\n\
                 body { font-family: sans-serif; }\n\
                 .component { margin-bottom: 1.5em; }\n\
                 .kind { font-weight: bold; }\n\
                 table.resolver-errors { border-collapse: collapse; }\n\
                 table.resolver-errors td { border: 1px solid #999; padding: 2px 6px; }\n\
                 </style>\n\
                 </head>\n\
                 <body>\n\
                 <h1>API Freeze Report</h1>\n"
            }
            MessageKey::Footer => "</body>\n</html>\n",
            MessageKey::ComponentBegin => "<div class=\"component\">\n<h2>{0}</h2>\n",
            MessageKey::ComponentEnd => "</div>\n",
            MessageKey::Entry => {
                "<div class=\"entry\"><span class=\"kind\">{0}</span> <code>{1}</code></div>\n"
            }
            MessageKey::ResolverSummarySingle => {
                "<p class=\"warning\">The component {0} has {1} resolver error. Results may be incomplete.</p>\n"
            }
            MessageKey::ResolverSummaryMultiple => {
                "<p class=\"warning\">The component {0} has {1} resolver errors. Results may be incomplete.</p>\n"
            }
            MessageKey::ResolverTableStart => {
                "<table class=\"resolver-errors\">\n<caption>Resolver errors for {0}</caption>\n"
            }
            MessageKey::ResolverTableEntry => "<tr><td>{0}</td></tr>\n",
            MessageKey::ResolverTableEnd => "</table>\n",
            MessageKey::MajorVersion => {
                "The major version should be incremented in version {0}, since API breakage occurred since version {1}"
            }
            MessageKey::MinorVersion => {
                "The minor version should be incremented in version {0}, since new APIs have been added since version {1}"
            }
            MessageKey::AddedLabel => "Added",
            MessageKey::RemovedLabel => "Removed",
            MessageKey::ChangedLabel => "Changed",
        }
    }
}

impl std::fmt::Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageCatalogError {
    #[error("Cannot read message file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Invalid message file '{path}': {message}")]
    Parse { path: String, message: String },
}

/// Override file layout: any subset of templates by snake_case name
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MessageOverrides {
    header: Option<String>,
    footer: Option<String>,
    component_begin: Option<String>,
    component_end: Option<String>,
    entry: Option<String>,
    resolver_summary_single: Option<String>,
    resolver_summary_multiple: Option<String>,
    resolver_table_start: Option<String>,
    resolver_table_entry: Option<String>,
    resolver_table_end: Option<String>,
    major_version: Option<String>,
    minor_version: Option<String>,
    added_label: Option<String>,
    removed_label: Option<String>,
    changed_label: Option<String>,
}

impl MessageOverrides {
    fn into_pairs(self) -> Vec<(MessageKey, Option<String>)> {
        vec![
            (MessageKey::Header, self.header),
            (MessageKey::Footer, self.footer),
            (MessageKey::ComponentBegin, self.component_begin),
            (MessageKey::ComponentEnd, self.component_end),
            (MessageKey::Entry, self.entry),
            (MessageKey::ResolverSummarySingle, self.resolver_summary_single),
            (MessageKey::ResolverSummaryMultiple, self.resolver_summary_multiple),
            (MessageKey::ResolverTableStart, self.resolver_table_start),
            (MessageKey::ResolverTableEntry, self.resolver_table_entry),
            (MessageKey::ResolverTableEnd, self.resolver_table_end),
            (MessageKey::MajorVersion, self.major_version),
            (MessageKey::MinorVersion, self.minor_version),
            (MessageKey::AddedLabel, self.added_label),
            (MessageKey::RemovedLabel, self.removed_label),
            (MessageKey::ChangedLabel, self.changed_label),
        ]
    }
}

/// Message templates keyed by `MessageKey`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    templates: HashMap<MessageKey, String>,
}

impl MessageCatalog {
    /// Built-in HTML templates
    pub fn new() -> Self {
        Self {
            templates: MessageKey::all()
                .iter()
                .map(|key| (*key, key.default_template().to_string()))
                .collect(),
        }
    }

    pub fn with_template(mut self, key: MessageKey, template: impl Into<String>) -> Self {
        self.templates.insert(key, template.into());
        self
    }

    /// Defaults overridden by the templates present in a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let overrides: MessageOverrides = toml::from_str(content)?;
        let mut catalog = Self::new();
        for (key, template) in overrides.into_pairs() {
            if let Some(template) = template {
                catalog.templates.insert(key, template);
            }
        }
        Ok(catalog)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, MessageCatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| MessageCatalogError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| MessageCatalogError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn template(&self, key: MessageKey) -> &str {
        self.templates
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_template())
    }

    /// Bind positional arguments into the template for `key`
    pub fn format<S: AsRef<str>>(&self, key: MessageKey, arguments: &[S]) -> String {
        bind(self.template(key), arguments)
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_defaults_cover_every_key() {
        let catalog = MessageCatalog::new();
        for key in MessageKey::all() {
            assert!(!catalog.template(*key).is_empty() || *key == MessageKey::ComponentEnd);
        }
        assert!(catalog.template(MessageKey::Header).starts_with("<!DOCTYPE html>"));
        assert!(catalog.template(MessageKey::Footer).ends_with("</html>\n"));
    }

    #[test]
    fn test_format_binds_arguments() {
        let catalog = MessageCatalog::new();
        assert_eq!(
            catalog.format(MessageKey::Entry, &["Added", "p.T#f"]),
            "<div class=\"entry\"><span class=\"kind\">Added</span> <code>p.T#f</code></div>\n"
        );
        assert_eq!(
            catalog.format(MessageKey::MajorVersion, &["2.0.0", "1.0.0"]),
            "The major version should be incremented in version 2.0.0, since API breakage occurred since version 1.0.0"
        );
    }

    #[test]
    fn test_partial_toml_override() {
        let catalog = MessageCatalog::from_toml_str(
            "added_label = \"New\"\nentry = \"{0}: {1}\\n\"\n",
        )
        .unwrap();

        assert_eq!(catalog.template(MessageKey::AddedLabel), "New");
        assert_eq!(catalog.format(MessageKey::Entry, &["New", "x"]), "New: x\n");
        assert_eq!(catalog.template(MessageKey::RemovedLabel), "Removed");
    }

    #[test]
    fn test_unknown_override_names_are_rejected() {
        assert!(MessageCatalog::from_toml_str("headr = \"x\"").is_err());
        assert!(MessageCatalog::from_toml_str("header = 3").is_err());
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "footer = \"<!-- end -->\"").unwrap();

        let catalog = MessageCatalog::from_toml_file(file.path()).unwrap();
        assert_eq!(catalog.template(MessageKey::Footer), "<!-- end -->");

        let missing = MessageCatalog::from_toml_file(Path::new("/nonexistent/messages.toml"));
        assert_matches!(missing, Err(MessageCatalogError::Read { .. }));
    }
}
