use crate::model::{DeltaEntry, DeltaKind, ElementKind, BASELINE_COMPONENT_ID};
use crate::xml::vocabulary::*;
use crate::xml::{Attributes, MalformedInputError};

/// Fields of the `delta` element currently open
///
/// Created when the element opens and consumed into a `DeltaEntry` when it
/// closes; message arguments seen in between attach to this value only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelta {
    component_id: String,
    flags: i32,
    element_type: ElementKind,
    key: String,
    type_name: Option<String>,
    kind: DeltaKind,
    arguments: Option<Vec<String>>,
}

impl PendingDelta {
    /// Read the delta attributes; `flags` and `key` are required
    pub fn from_attributes(attributes: &Attributes) -> Result<Self, MalformedInputError> {
        let raw_flags = attributes
            .get(ATTR_FLAGS)
            .ok_or_else(|| MalformedInputError::missing_attribute(DELTA, ATTR_FLAGS))?;
        let flags = raw_flags
            .parse::<i32>()
            .map_err(|_| MalformedInputError::InvalidFlags {
                value: raw_flags.to_string(),
            })?;

        let key = attributes
            .get(ATTR_KEY)
            .ok_or_else(|| MalformedInputError::missing_attribute(DELTA, ATTR_KEY))?;

        let component_id = attributes
            .get_any(ATTR_COMPONENT_ID)
            .unwrap_or(BASELINE_COMPONENT_ID);

        Ok(Self {
            component_id: component_id.to_string(),
            flags,
            element_type: ElementKind::from_attribute(attributes.get(ATTR_ELEMENT_TYPE)),
            key: key.to_string(),
            type_name: attributes.get(ATTR_TYPE_NAME).map(str::to_string),
            kind: DeltaKind::from_attribute(attributes.get(ATTR_KIND)),
            arguments: None,
        })
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    pub fn flags(&self) -> i32 {
        self.flags
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Attach a non-empty argument list; an empty one leaves arguments absent
    pub fn set_arguments(&mut self, arguments: &[String]) {
        if !arguments.is_empty() {
            self.arguments = Some(arguments.to_vec());
        }
    }

    pub fn finish(self) -> (String, DeltaEntry) {
        let entry = DeltaEntry::new(
            self.flags,
            self.element_type,
            &self.key,
            self.type_name.as_deref(),
            self.arguments,
            self.kind,
        );
        (self.component_id, entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_required_attributes() {
        let missing_flags = Attributes::from_pairs([("key", "a")]);
        assert_matches!(
            PendingDelta::from_attributes(&missing_flags),
            Err(MalformedInputError::MissingAttribute { attribute, .. }) if attribute == "flags"
        );

        let missing_key = Attributes::from_pairs([("flags", "14")]);
        assert_matches!(
            PendingDelta::from_attributes(&missing_key),
            Err(MalformedInputError::MissingAttribute { attribute, .. }) if attribute == "key"
        );

        let bad_flags = Attributes::from_pairs([("flags", "fourteen"), ("key", "a")]);
        assert_matches!(
            PendingDelta::from_attributes(&bad_flags),
            Err(MalformedInputError::InvalidFlags { value }) if value == "fourteen"
        );
    }

    #[test]
    fn test_defaults_for_optional_attributes() {
        let attributes = Attributes::from_pairs([("flags", "3"), ("key", "org.example")]);
        let pending = PendingDelta::from_attributes(&attributes).unwrap();

        assert_eq!(pending.component_id(), BASELINE_COMPONENT_ID);
        let (_, entry) = pending.finish();
        assert_eq!(entry.kind, DeltaKind::Changed);
        assert_eq!(entry.element_type, ElementKind::Unknown);
        assert!(entry.type_name.is_none());
        assert!(entry.arguments.is_none());
    }

    #[test]
    fn test_arguments_only_attach_when_non_empty() {
        let attributes = Attributes::from_pairs([
            ("flags", "57"),
            ("key", "k"),
            ("componentId", "org.example(1.0.0)"),
        ]);
        let mut pending = PendingDelta::from_attributes(&attributes).unwrap();
        pending.set_arguments(&[]);
        assert_eq!(pending.clone().finish().1.arguments, None);

        pending.set_arguments(&["2.0.0".to_string(), "1.0.0".to_string()]);
        let (component, entry) = pending.finish();
        assert_eq!(component, "org.example(1.0.0)");
        assert_eq!(entry.arguments, Some(vec!["2.0.0".to_string(), "1.0.0".to_string()]));
    }
}
