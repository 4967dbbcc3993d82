use super::stats::RenderStats;
use crate::descriptor::DecodeOptions;
use crate::display::{html_escape, DisplayResolver};
use crate::logging::codes;
use crate::messages::{MessageCatalog, MessageKey};
use crate::model::{error_lookup_id, DeltaEntry, DeltaReport};
use crate::{log_debug, log_warning};
use std::cmp::Ordering;

/// Everything that shapes the rendered text
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub messages: MessageCatalog,
    pub decode: DecodeOptions,
    /// Trace each rendered entry; never changes the output
    pub debug: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_fully_qualified(mut self, fully_qualified: bool) -> Self {
        self.decode.fully_qualified = fully_qualified;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Rendered document plus the counts behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub text: String,
    pub stats: RenderStats,
}

/// Entry order within a component: no type name first, then type name, then key
pub fn compare_entries(a: &DeltaEntry, b: &DeltaEntry) -> Ordering {
    match (&a.type_name, &b.type_name) {
        (None, None) => a.key.cmp(&b.key),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => left.cmp(right).then_with(|| a.key.cmp(&b.key)),
    }
}

pub struct ReportRenderer<'a> {
    options: &'a RenderOptions,
    resolver: DisplayResolver<'a>,
}

impl<'a> ReportRenderer<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            resolver: DisplayResolver::new(&options.messages, &options.decode),
        }
    }

    fn messages(&self) -> &'a MessageCatalog {
        &self.options.messages
    }

    pub fn render(&self, report: &DeltaReport) -> RenderedReport {
        let mut text = String::new();
        let mut stats = RenderStats::default();

        text.push_str(self.messages().template(MessageKey::Header));

        // DeltaReport keeps components in ordinal order
        for (component_id, entries) in report.components() {
            self.render_component(&mut text, &mut stats, report, component_id, entries);
        }

        text.push_str(self.messages().template(MessageKey::Footer));

        RenderedReport { text, stats }
    }

    fn render_component(
        &self,
        text: &mut String,
        stats: &mut RenderStats,
        report: &DeltaReport,
        component_id: &str,
        entries: &[DeltaEntry],
    ) {
        let messages = self.messages();
        let escaped_id = html_escape(component_id);
        let lookup_id = html_escape(error_lookup_id(component_id));
        let errors = report.resolver_errors_for(error_lookup_id(component_id));

        stats.components += 1;
        stats.entries += entries.len();

        text.push_str(&messages.format(MessageKey::ComponentBegin, &[escaped_id.as_str()]));

        let count = errors.len().to_string();
        match errors.len() {
            0 => {}
            1 => text.push_str(&messages.format(
                MessageKey::ResolverSummarySingle,
                &[lookup_id.as_str(), count.as_str()],
            )),
            _ => text.push_str(&messages.format(
                MessageKey::ResolverSummaryMultiple,
                &[lookup_id.as_str(), count.as_str()],
            )),
        }

        let mut sorted: Vec<&DeltaEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| compare_entries(a, b));

        for entry in sorted {
            match self.resolver.resolve(entry) {
                Ok(Some(locator)) => {
                    let label = self.resolver.kind_label(entry);
                    if self.options.debug {
                        log_debug!("Entry",
                            "component" => component_id,
                            "kind" => label,
                            "locator" => &locator);
                    }
                    text.push_str(&messages.format(MessageKey::Entry, &[label, locator.as_str()]));
                    stats.rendered_entries += 1;
                }
                Ok(None) => {
                    stats.skipped_entries += 1;
                    log_warning!(code = codes::warnings::UNRENDERABLE_ENTRY,
                        "Entry has no renderable locator",
                        "component" => component_id,
                        "flags" => entry.flags,
                        "key" => &entry.key);
                }
                Err(error) => {
                    stats.skipped_entries += 1;
                    log_warning!(code = codes::warnings::UNRENDERABLE_ENTRY,
                        "Entry descriptor could not be decoded",
                        "component" => component_id,
                        "key" => &entry.key,
                        "error" => error,
                        "error_code" => error.error_code());
                }
            }
        }

        text.push_str(&messages.format(MessageKey::ComponentEnd, &[escaped_id.as_str()]));

        if !errors.is_empty() {
            stats.resolver_errors += errors.len();
            stats.components_with_resolver_errors += 1;

            text.push_str(&messages.format(MessageKey::ResolverTableStart, &[lookup_id.as_str()]));
            for message in errors {
                text.push_str(&messages.format(
                    MessageKey::ResolverTableEntry,
                    &[html_escape(message)],
                ));
            }
            text.push_str(messages.template(MessageKey::ResolverTableEnd));
        }
    }
}

/// Render a report with the given options
pub fn render(report: &DeltaReport, options: &RenderOptions) -> RenderedReport {
    ReportRenderer::new(options).render(report)
}
