use super::flags::DeltaFlag;

/// Kind label of a delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaKind {
    Added,
    Removed,
    Changed,
}

impl DeltaKind {
    /// Exact `ADDED` / `REMOVED` match; anything else, including absence, is Changed
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("ADDED") => DeltaKind::Added,
            Some("REMOVED") => DeltaKind::Removed,
            _ => DeltaKind::Changed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeltaKind::Added => "ADDED",
            DeltaKind::Removed => "REMOVED",
            DeltaKind::Changed => "CHANGED",
        }
    }
}

/// Element type scoping the deprecation family of flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Annotation,
    ApiComponent,
    ApiBaseline,
    Class,
    Constructor,
    Enum,
    Field,
    Interface,
    Method,
    TypeParameter,
    Unknown,
}

impl ElementKind {
    /// Lookup of the analyzer's `*_ELEMENT_TYPE` attribute values
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("ANNOTATION_ELEMENT_TYPE") => ElementKind::Annotation,
            Some("API_COMPONENT_ELEMENT_TYPE") => ElementKind::ApiComponent,
            Some("API_BASELINE_ELEMENT_TYPE") => ElementKind::ApiBaseline,
            Some("CLASS_ELEMENT_TYPE") => ElementKind::Class,
            Some("CONSTRUCTOR_ELEMENT_TYPE") => ElementKind::Constructor,
            Some("ENUM_ELEMENT_TYPE") => ElementKind::Enum,
            Some("FIELD_ELEMENT_TYPE") => ElementKind::Field,
            Some("INTERFACE_ELEMENT_TYPE") => ElementKind::Interface,
            Some("METHOD_ELEMENT_TYPE") => ElementKind::Method,
            Some("TYPE_PARAMETER_ELEMENT_TYPE") => ElementKind::TypeParameter,
            _ => ElementKind::Unknown,
        }
    }

    /// Numeric value used by the analyzer, `-1` when unknown
    pub fn code(&self) -> i32 {
        match self {
            ElementKind::Annotation => 1,
            ElementKind::ApiComponent => 2,
            ElementKind::ApiBaseline => 3,
            ElementKind::Class => 4,
            ElementKind::Constructor => 5,
            ElementKind::Enum => 6,
            ElementKind::Field => 7,
            ElementKind::Interface => 8,
            ElementKind::Method => 9,
            ElementKind::TypeParameter => 10,
            ElementKind::Unknown => -1,
        }
    }

    pub fn is_type_like(&self) -> bool {
        matches!(
            self,
            ElementKind::Annotation | ElementKind::Interface | ElementKind::Enum | ElementKind::Class
        )
    }
}

/// One recorded API difference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaEntry {
    pub flags: i32,
    pub element_type: ElementKind,
    pub key: String,
    pub type_name: Option<String>,
    pub arguments: Option<Vec<String>>,
    pub kind: DeltaKind,
}

impl DeltaEntry {
    /// Build an entry, normalizing `/` separators
    ///
    /// An empty type name is kept: it orders after the entries with no type
    /// name but renders as if it were absent.
    pub fn new(
        flags: i32,
        element_type: ElementKind,
        key: &str,
        type_name: Option<&str>,
        arguments: Option<Vec<String>>,
        kind: DeltaKind,
    ) -> Self {
        Self {
            flags,
            element_type,
            key: key.replace('/', "."),
            type_name: type_name.map(|name| name.replace('/', ".")),
            arguments,
            kind,
        }
    }

    pub fn flag(&self) -> Option<DeltaFlag> {
        DeltaFlag::from_code(self.flags)
    }

    /// Non-empty type name
    pub fn display_type_name(&self) -> Option<&str> {
        self.type_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Whether the entry describes the baseline itself rather than a type member
    pub fn is_baseline_level(&self) -> bool {
        self.display_type_name().is_none()
    }

    /// Simple name of the owning type, used for constructor signatures
    pub fn owning_type_simple_name(&self) -> Option<&str> {
        self.display_type_name()
            .map(|name| name.rsplit(['.', '$']).next().unwrap_or(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_attribute() {
        assert_eq!(DeltaKind::from_attribute(Some("ADDED")), DeltaKind::Added);
        assert_eq!(DeltaKind::from_attribute(Some("REMOVED")), DeltaKind::Removed);
        assert_eq!(DeltaKind::from_attribute(Some("CHANGED")), DeltaKind::Changed);
        assert_eq!(DeltaKind::from_attribute(Some("added")), DeltaKind::Changed);
        assert_eq!(DeltaKind::from_attribute(None), DeltaKind::Changed);
    }

    #[test]
    fn test_element_kind_lookup() {
        assert_eq!(
            ElementKind::from_attribute(Some("CLASS_ELEMENT_TYPE")),
            ElementKind::Class
        );
        assert_eq!(ElementKind::from_attribute(Some("METHOD_ELEMENT_TYPE")).code(), 9);
        assert_eq!(ElementKind::from_attribute(Some("BOGUS")), ElementKind::Unknown);
        assert_eq!(ElementKind::from_attribute(None).code(), -1);
        assert!(ElementKind::Enum.is_type_like());
        assert!(!ElementKind::Field.is_type_like());
    }

    #[test]
    fn test_entry_normalizes_separators() {
        let entry = DeltaEntry::new(
            23,
            ElementKind::Method,
            "run(Ljava/lang/String;)V",
            Some("org/example/Widget$Inner"),
            None,
            DeltaKind::Added,
        );

        assert_eq!(entry.key, "run(Ljava.lang.String;)V");
        assert_eq!(entry.type_name.as_deref(), Some("org.example.Widget$Inner"));
        assert_eq!(entry.owning_type_simple_name(), Some("Inner"));
        assert_eq!(entry.flag(), Some(DeltaFlag::Method));
    }

    #[test]
    fn test_empty_type_name_is_baseline_level() {
        let entry = DeltaEntry::new(3, ElementKind::ApiBaseline, "org.example", Some(""), None, DeltaKind::Removed);
        assert!(entry.is_baseline_level());
        assert_eq!(entry.type_name.as_deref(), Some(""));
        assert_eq!(entry.display_type_name(), None);
        assert_eq!(entry.owning_type_simple_name(), None);
    }
}
