use super::entry::DeltaEntry;
use std::collections::BTreeMap;

/// Component id grouping deltas that have no owning component
pub const BASELINE_COMPONENT_ID: &str = "Added and removed bundles";

/// Id used to look up resolver errors for a component: everything before the first `(`
pub fn error_lookup_id(component_id: &str) -> &str {
    match component_id.find('(') {
        Some(index) => &component_id[..index],
        None => component_id,
    }
}

/// Completed model of one delta document
///
/// Entries keep parse order per component; ordering for output happens in the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaReport {
    entries: BTreeMap<String, Vec<DeltaEntry>>,
    resolver_errors: BTreeMap<String, Vec<String>>,
}

impl DeltaReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_entry(&mut self, component_id: &str, entry: DeltaEntry) {
        self.entries
            .entry(component_id.to_string())
            .or_default()
            .push(entry);
    }

    pub fn push_resolver_error(&mut self, component_id: &str, message: String) {
        self.resolver_errors
            .entry(component_id.to_string())
            .or_default()
            .push(message);
    }

    /// Components with entries, in ordinal id order
    pub fn components(&self) -> impl Iterator<Item = (&str, &[DeltaEntry])> {
        self.entries
            .iter()
            .map(|(id, entries)| (id.as_str(), entries.as_slice()))
    }

    pub fn entries_for(&self, component_id: &str) -> &[DeltaEntry] {
        self.entries
            .get(component_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_component(&self, component_id: &str) -> bool {
        self.entries.contains_key(component_id)
    }

    /// Resolver errors recorded under an error-lookup id
    pub fn resolver_errors_for(&self, lookup_id: &str) -> &[String] {
        self.resolver_errors
            .get(lookup_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn component_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn resolver_error_count(&self) -> usize {
        self.resolver_errors.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.resolver_errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeltaKind, ElementKind};

    fn entry(key: &str) -> DeltaEntry {
        DeltaEntry::new(14, ElementKind::Field, key, Some("p.T"), None, DeltaKind::Added)
    }

    #[test]
    fn test_error_lookup_id_strips_version() {
        assert_eq!(error_lookup_id("foo(1.1.2)"), "foo");
        assert_eq!(error_lookup_id("foo"), "foo");
        assert_eq!(error_lookup_id("a(b)(c)"), "a");
        assert_eq!(error_lookup_id("(1.0)"), "");
    }

    #[test]
    fn test_components_are_ordinal_and_entries_keep_order() {
        let mut report = DeltaReport::new();
        report.push_entry("b", entry("first"));
        report.push_entry("a", entry("x"));
        report.push_entry("b", entry("second"));
        report.push_entry("B", entry("upper"));

        let ids: Vec<_> = report.components().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["B", "a", "b"]);

        let keys: Vec<_> = report.entries_for("b").iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["first", "second"]);
        assert_eq!(report.entry_count(), 4);
        assert_eq!(report.component_count(), 3);
    }

    #[test]
    fn test_resolver_errors() {
        let mut report = DeltaReport::new();
        report.push_resolver_error("foo", "missing bar".to_string());
        report.push_resolver_error("foo", "missing baz".to_string());

        assert_eq!(report.resolver_errors_for("foo").len(), 2);
        assert!(report.resolver_errors_for("other").is_empty());
        assert_eq!(report.resolver_error_count(), 2);
        assert!(!report.has_component("foo"));
        assert!(!report.is_empty());
    }
}
