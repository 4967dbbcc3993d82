//! Streaming event source backed by `quick_xml`
//!
//! Translates tokenizer events into `ParseEvent`s, tracks element depth and
//! turns every abnormal end of input into a `MalformedInputError`.

use super::error::MalformedInputError;
use super::events::{Attributes, ParseEvent};
use crate::config::compile_time::input::{MAX_ATTRIBUTE_LENGTH, MAX_ELEMENT_DEPTH};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::VecDeque;

/// Iterator of parse events over an in-memory XML document
pub struct EventReader<'a> {
    reader: Reader<&'a [u8]>,
    buffer: Vec<u8>,
    queued: VecDeque<ParseEvent>,
    depth: usize,
    seen_root: bool,
    finished: bool,
    max_depth: usize,
}

impl<'a> EventReader<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(true);

        Self {
            reader,
            buffer: Vec::new(),
            queued: VecDeque::new(),
            depth: 0,
            seen_root: false,
            finished: false,
            max_depth: MAX_ELEMENT_DEPTH,
        }
    }

    /// Override the element depth ceiling (never above the compile-time limit)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_ELEMENT_DEPTH);
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    fn byte_position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    fn fail(&mut self, error: MalformedInputError) -> Option<Result<ParseEvent, MalformedInputError>> {
        self.finished = true;
        Some(Err(error))
    }

    fn open_element(&mut self, start: &BytesStart<'_>) -> Result<ParseEvent, MalformedInputError> {
        if self.depth >= self.max_depth {
            return Err(MalformedInputError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        let tag = decode_name(start.name().as_ref(), self.byte_position())?;
        let attributes = self.read_attributes(start)?;

        self.depth += 1;
        self.seen_root = true;

        Ok(ParseEvent::Open { tag, attributes })
    }

    fn read_attributes(&self, start: &BytesStart<'_>) -> Result<Attributes, MalformedInputError> {
        let mut attributes = Attributes::new();

        for attribute in start.attributes() {
            let attribute = attribute
                .map_err(|e| MalformedInputError::xml(e.to_string(), self.byte_position()))?;
            let name = decode_name(attribute.key.as_ref(), self.byte_position())?;
            let value = attribute
                .unescape_value()
                .map_err(|e| MalformedInputError::xml(e.to_string(), self.byte_position()))?;

            if value.len() > MAX_ATTRIBUTE_LENGTH {
                return Err(MalformedInputError::limit_exceeded(
                    "characters in attribute value",
                    MAX_ATTRIBUTE_LENGTH,
                ));
            }

            attributes.push(name, value.into_owned());
        }

        Ok(attributes)
    }

    fn close_element(&mut self, name: &[u8]) -> Result<ParseEvent, MalformedInputError> {
        let tag = decode_name(name, self.byte_position())?;
        if self.depth == 0 {
            return Err(MalformedInputError::UnbalancedClose { tag });
        }
        self.depth -= 1;
        Ok(ParseEvent::Close { tag })
    }

    fn end_of_input(&mut self) -> Option<Result<ParseEvent, MalformedInputError>> {
        if self.depth > 0 {
            let depth = self.depth;
            return self.fail(MalformedInputError::Truncated { depth });
        }
        if !self.seen_root {
            return self.fail(MalformedInputError::NoRootElement);
        }
        self.finished = true;
        None
    }
}

impl Iterator for EventReader<'_> {
    type Item = Result<ParseEvent, MalformedInputError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.queued.pop_front() {
            return Some(Ok(event));
        }

        loop {
            if self.finished {
                return None;
            }

            self.buffer.clear();
            let event = match self.reader.read_event_into(&mut self.buffer) {
                Ok(event) => event.into_owned(),
                Err(e) => {
                    let position = self.byte_position();
                    return self.fail(MalformedInputError::xml(e.to_string(), position));
                }
            };

            let translated = match event {
                Event::Start(start) => self.open_element(&start),
                Event::Empty(start) => match self.open_element(&start) {
                    Ok(open) => {
                        let name = start.name().as_ref().to_vec();
                        match self.close_element(&name) {
                            Ok(close) => {
                                self.queued.push_back(close);
                                Ok(open)
                            }
                            Err(e) => Err(e),
                        }
                    }
                    Err(e) => Err(e),
                },
                Event::End(end) => self.close_element(end.name().as_ref()),
                Event::Text(text) => {
                    if self.depth == 0 {
                        continue;
                    }
                    text.unescape()
                        .map(|t| ParseEvent::Text(t.into_owned()))
                        .map_err(|e| MalformedInputError::xml(e.to_string(), self.byte_position()))
                }
                Event::CData(data) => {
                    if self.depth == 0 {
                        continue;
                    }
                    Ok(ParseEvent::Text(
                        String::from_utf8_lossy(&data.into_inner()).into_owned(),
                    ))
                }
                Event::Eof => return self.end_of_input(),
                // Declarations, comments, processing instructions and doctypes
                _ => continue,
            };

            return match translated {
                Ok(event) => Some(Ok(event)),
                Err(e) => self.fail(e),
            };
        }
    }
}

fn decode_name(name: &[u8], position: u64) -> Result<String, MalformedInputError> {
    std::str::from_utf8(name)
        .map(str::to_string)
        .map_err(|e| MalformedInputError::xml(format!("invalid UTF-8 in name: {}", e), position))
}

/// Read every event of a document, stopping at the first error
pub fn read_events(source: &[u8]) -> Result<Vec<ParseEvent>, MalformedInputError> {
    EventReader::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_start_end_and_empty_elements() {
        let events = read_events(br#"<deltas><delta flags="23" key="a"/></deltas>"#).unwrap();

        assert_eq!(events.len(), 4);
        assert_matches!(&events[0], ParseEvent::Open { tag, .. } if tag == "deltas");
        assert_matches!(&events[1], ParseEvent::Open { tag, attributes }
            if tag == "delta" && attributes.get("flags") == Some("23"));
        assert_eq!(events[2], ParseEvent::close("delta"));
        assert_eq!(events[3], ParseEvent::close("deltas"));
    }

    #[test]
    fn test_attribute_values_are_unescaped() {
        let events = read_events(br#"<r><e message="a &lt;b&gt; &amp; c"/></r>"#).unwrap();
        assert_matches!(&events[1], ParseEvent::Open { attributes, .. }
            if attributes.get("message") == Some("a <b> & c"));
    }

    #[test]
    fn test_text_and_prolog() {
        let source = b"<?xml version=\"1.0\"?>\n<!-- comment -->\n<r>hello</r>";
        let events = read_events(source).unwrap();
        assert_eq!(
            events,
            vec![
                ParseEvent::open::<&str, &str>("r", []),
                ParseEvent::text("hello"),
                ParseEvent::close("r"),
            ]
        );
    }

    #[test]
    fn test_truncated_document() {
        let result = read_events(b"<deltas><delta flags=\"1\">");
        assert_matches!(result, Err(MalformedInputError::Truncated { depth: 2 }));
    }

    #[test]
    fn test_empty_document_has_no_root() {
        assert_matches!(read_events(b""), Err(MalformedInputError::NoRootElement));
        assert_matches!(
            read_events(b"<?xml version=\"1.0\"?>"),
            Err(MalformedInputError::NoRootElement)
        );
    }

    #[test]
    fn test_syntax_errors_are_reported() {
        assert_matches!(read_events(b"<a></b>"), Err(MalformedInputError::Xml { .. }));
        assert_matches!(read_events(b"<a b=\"1></a>"), Err(_));
    }

    #[test]
    fn test_syntax_error_carries_byte_offset() {
        let offset = match read_events(b"<a></b>") {
            Err(MalformedInputError::Xml { position, .. }) => position,
            other => panic!("unexpected result {:?}", other),
        };
        assert!(offset > 0 && offset <= 7, "offset {}", offset);

        // Iterator adapters still resolve to the trait methods
        let failed_at = EventReader::new(b"<a></b>").position(|event| event.is_err());
        assert_eq!(failed_at, Some(1));
    }

    #[test]
    fn test_depth_limit() {
        let result: Result<Vec<_>, _> = EventReader::new(b"<a><b><c/></b></a>")
            .with_max_depth(2)
            .collect();
        assert_matches!(result, Err(MalformedInputError::DepthLimitExceeded { limit: 2 }));
    }

    #[test]
    fn test_reader_stops_after_error() {
        let mut reader = EventReader::new(b"<a>");
        assert_matches!(reader.next(), Some(Ok(ParseEvent::Open { .. })));
        assert_matches!(reader.next(), Some(Err(MalformedInputError::Truncated { depth: 1 })));
        assert!(reader.next().is_none());
    }
}
