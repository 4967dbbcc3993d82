/// Attributes of an open element, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pairs: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, name: String, value: String) {
        self.pairs.push((name, value));
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First value for any of `names`, tried in order
    pub fn get_any(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.get(name))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Structured parse event consumed by the model builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    Open { tag: String, attributes: Attributes },
    Close { tag: String },
    Text(String),
}

impl ParseEvent {
    pub fn open<K, V>(tag: &str, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        ParseEvent::Open {
            tag: tag.to_string(),
            attributes: Attributes::from_pairs(attributes),
        }
    }

    pub fn close(tag: &str) -> Self {
        ParseEvent::Close {
            tag: tag.to_string(),
        }
    }

    pub fn text(text: &str) -> Self {
        ParseEvent::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_lookup() {
        let attributes = Attributes::from_pairs([("key", "a"), ("flags", "23"), ("key", "b")]);

        assert_eq!(attributes.get("key"), Some("a"));
        assert_eq!(attributes.get("missing"), None);
        assert_eq!(attributes.get_any(&["nope", "flags"]), Some("23"));
        assert_eq!(attributes.len(), 3);
    }

    #[test]
    fn test_event_constructors() {
        let event = ParseEvent::open("delta", [("flags", "1")]);
        match event {
            ParseEvent::Open { tag, attributes } => {
                assert_eq!(tag, "delta");
                assert_eq!(attributes.get("flags"), Some("1"));
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(ParseEvent::close("delta"), ParseEvent::Close { tag: "delta".into() });
    }
}
