use serde::Serialize;

/// Counts gathered while rendering one report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    pub components: usize,
    pub entries: usize,
    pub rendered_entries: usize,
    pub skipped_entries: usize,
    pub resolver_errors: usize,
    pub components_with_resolver_errors: usize,
}

impl RenderStats {
    pub fn has_skipped_entries(&self) -> bool {
        self.skipped_entries > 0
    }
}

impl std::fmt::Display for RenderStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} components, {} of {} entries rendered, {} resolver errors",
            self.components, self.rendered_entries, self.entries, self.resolver_errors
        )
    }
}
