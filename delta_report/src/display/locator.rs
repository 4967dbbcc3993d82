use super::escape::html_escape;
use super::strategy::{select_strategy, RenderStrategy};
use crate::descriptor::{decode_with, split_member_key, DecodeOptions, DecodeResult};
use crate::messages::{MessageCatalog, MessageKey};
use crate::model::{DeltaEntry, DeltaFlag};

/// Resolves entry locators against one message catalog and decoding style
#[derive(Debug, Clone, Copy)]
pub struct DisplayResolver<'a> {
    catalog: &'a MessageCatalog,
    options: &'a DecodeOptions,
}

impl<'a> DisplayResolver<'a> {
    pub fn new(catalog: &'a MessageCatalog, options: &'a DecodeOptions) -> Self {
        Self { catalog, options }
    }

    /// Escaped locator text, `Ok(None)` when the entry has no line
    ///
    /// Descriptor failures are returned so the caller can report why an entry
    /// was dropped.
    pub fn resolve(&self, entry: &DeltaEntry) -> DecodeResult<Option<String>> {
        let type_name = entry.display_type_name().unwrap_or_default();

        let raw = match select_strategy(entry) {
            RenderStrategy::Unrenderable => return Ok(None),
            RenderStrategy::MethodSignature => match split_member_key(&entry.key) {
                Some((selector, descriptor)) => format!(
                    "{}#{}",
                    type_name,
                    decode_with(descriptor, selector, true, self.options)?
                ),
                None => return Ok(None),
            },
            RenderStrategy::ConstructorSignature => match split_member_key(&entry.key) {
                Some((_, descriptor)) => {
                    let name = entry.owning_type_simple_name().unwrap_or_default();
                    format!(
                        "{}#{}",
                        type_name,
                        decode_with(descriptor, name, false, self.options)?
                    )
                }
                None => return Ok(None),
            },
            RenderStrategy::VerbatimMember => format!("{}#{}", type_name, entry.key),
            RenderStrategy::TypeMember => format!("{}.{}", type_name, entry.key),
            RenderStrategy::TypeNameOnly => type_name.to_string(),
            RenderStrategy::TemplatedMessage => self.version_message(entry),
            RenderStrategy::BaselineKey => entry.key.clone(),
            RenderStrategy::Empty => String::new(),
        };

        Ok(Some(html_escape(raw)))
    }

    fn version_message(&self, entry: &DeltaEntry) -> String {
        let key = match entry.flag() {
            Some(DeltaFlag::MinorVersion) => MessageKey::MinorVersion,
            _ => MessageKey::MajorVersion,
        };
        let arguments = entry.arguments.as_deref().unwrap_or_default();
        self.catalog.format(key, arguments)
    }

    /// Label template for the entry's kind
    pub fn kind_label(&self, entry: &DeltaEntry) -> &'a str {
        use crate::model::DeltaKind;

        let key = match entry.kind {
            DeltaKind::Added => MessageKey::AddedLabel,
            DeltaKind::Removed => MessageKey::RemovedLabel,
            DeltaKind::Changed => MessageKey::ChangedLabel,
        };
        self.catalog.template(key)
    }
}

/// Escaped locator for an entry, `None` when it is unrenderable or its descriptor cannot be decoded
pub fn render_locator(
    entry: &DeltaEntry,
    catalog: &MessageCatalog,
    options: &DecodeOptions,
) -> Option<String> {
    DisplayResolver::new(catalog, options)
        .resolve(entry)
        .ok()
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DescriptorDecodeError;
    use crate::model::{DeltaKind, ElementKind};
    use assert_matches::assert_matches;

    fn locator(entry: &DeltaEntry) -> Option<String> {
        render_locator(entry, &MessageCatalog::new(), &DecodeOptions::default())
    }

    fn member(flag: DeltaFlag, element: ElementKind, key: &str) -> DeltaEntry {
        DeltaEntry::new(flag.code(), element, key, Some("org/example/Widget"), None, DeltaKind::Added)
    }

    #[test]
    fn test_method_signature() {
        let entry = member(DeltaFlag::Method, ElementKind::Method, "resize(II)Z");
        assert_eq!(
            locator(&entry).as_deref(),
            Some("org.example.Widget#boolean resize(int, int)")
        );
    }

    #[test]
    fn test_constructor_uses_owning_type_name() {
        let entry = member(
            DeltaFlag::Constructor,
            ElementKind::Constructor,
            "<init>(Ljava/lang/String;)V",
        );
        assert_eq!(
            locator(&entry).as_deref(),
            Some("org.example.Widget#Widget(String)")
        );
    }

    #[test]
    fn test_verbatim_and_type_member() {
        let field = member(DeltaFlag::Field, ElementKind::Field, "count");
        assert_eq!(locator(&field).as_deref(), Some("org.example.Widget#count"));

        let nested = member(DeltaFlag::TypeMember, ElementKind::Class, "Inner");
        assert_eq!(locator(&nested).as_deref(), Some("org.example.Widget.Inner"));

        let other = member(DeltaFlag::Superclass, ElementKind::Class, "ignored");
        assert_eq!(locator(&other).as_deref(), Some("org.example.Widget"));
    }

    #[test]
    fn test_unrenderable_and_decode_failure() {
        let no_parens = member(DeltaFlag::ApiMethod, ElementKind::Method, "resize");
        assert_eq!(locator(&no_parens), None);

        let broken = member(DeltaFlag::Method, ElementKind::Method, "resize(Q)V");
        assert_eq!(locator(&broken), None);

        let catalog = MessageCatalog::new();
        let options = DecodeOptions::default();
        let resolver = DisplayResolver::new(&catalog, &options);
        assert_matches!(
            resolver.resolve(&broken),
            Err(DescriptorDecodeError::InvalidTypeCode { code: 'Q', .. })
        );
        assert_matches!(resolver.resolve(&no_parens), Ok(None));
    }

    #[test]
    fn test_locators_are_escaped() {
        let entry = DeltaEntry::new(
            DeltaFlag::Field.code(),
            ElementKind::Field,
            "a<b>&c",
            Some("p.T"),
            None,
            DeltaKind::Changed,
        );
        assert_eq!(locator(&entry).as_deref(), Some("p.T#a&lt;b&gt;&amp;c"));
    }

    #[test]
    fn test_baseline_level_locators() {
        let bundle = DeltaEntry::new(
            DeltaFlag::ApiComponent.code(),
            ElementKind::ApiBaseline,
            "org.example.core",
            None,
            None,
            DeltaKind::Removed,
        );
        assert_eq!(locator(&bundle).as_deref(), Some("org.example.core"));

        let major = DeltaEntry::new(
            DeltaFlag::MajorVersion.code(),
            ElementKind::ApiComponent,
            "org.example.core",
            None,
            Some(vec!["2.0.0".to_string(), "1.4.0".to_string()]),
            DeltaKind::Changed,
        );
        assert_eq!(
            locator(&major).as_deref(),
            Some("The major version should be incremented in version 2.0.0, since API breakage occurred since version 1.4.0")
        );

        let minor_without_arguments = DeltaEntry::new(
            DeltaFlag::MinorVersion.code(),
            ElementKind::ApiComponent,
            "org.example.core",
            None,
            None,
            DeltaKind::Changed,
        );
        let text = locator(&minor_without_arguments).unwrap_or_default();
        assert!(text.contains("&lt;missing argument&gt;"));

        let other = DeltaEntry::new(23, ElementKind::Method, "m()V", None, None, DeltaKind::Added);
        assert_eq!(locator(&other).as_deref(), Some(""));
    }

    #[test]
    fn test_kind_labels() {
        let catalog = MessageCatalog::new().with_template(MessageKey::RemovedLabel, "Gone");
        let options = DecodeOptions::default();
        let resolver = DisplayResolver::new(&catalog, &options);

        let mut entry = member(DeltaFlag::Field, ElementKind::Field, "f");
        assert_eq!(resolver.kind_label(&entry), "Added");
        entry.kind = DeltaKind::Removed;
        assert_eq!(resolver.kind_label(&entry), "Gone");
        entry.kind = DeltaKind::Changed;
        assert_eq!(resolver.kind_label(&entry), "Changed");
    }
}
