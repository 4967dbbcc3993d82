//! Recursive-descent decoder for method and field descriptors
//!
//! Handles the plain bytecode forms (`(ILjava/lang/String;)[I`) as well as
//! generic signatures with formal type parameters, type variables, type
//! arguments, wildcards and throws clauses.

use super::error::{DecodeResult, DescriptorDecodeError};
use crate::config::compile_time::descriptor::*;

/// Rendering options for decoded types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Keep package names on class types
    pub fully_qualified: bool,
}

impl DecodeOptions {
    pub fn fully_qualified() -> Self {
        Self {
            fully_qualified: true,
        }
    }
}

pub struct DescriptorDecoder<'o> {
    chars: Vec<char>,
    position: usize,
    options: &'o DecodeOptions,
    type_argument_depth: usize,
}

impl<'o> DescriptorDecoder<'o> {
    pub fn new(descriptor: &str, options: &'o DecodeOptions) -> DecodeResult<Self> {
        if descriptor.is_empty() {
            return Err(DescriptorDecodeError::Empty);
        }
        if descriptor.len() > MAX_DESCRIPTOR_LENGTH {
            return Err(DescriptorDecodeError::TooLong {
                length: descriptor.len(),
                limit: MAX_DESCRIPTOR_LENGTH,
            });
        }

        Ok(Self {
            chars: descriptor.chars().collect(),
            position: 0,
            options,
            type_argument_depth: 0,
        })
    }

    /// Decode a method descriptor into `(return type, parameter types)`
    pub fn method(mut self) -> DecodeResult<(String, Vec<String>)> {
        if self.peek() == Some('<') {
            self.skip_formal_type_parameters()?;
        }

        if self.peek() != Some('(') {
            return Err(DescriptorDecodeError::MissingParameterList);
        }
        self.position += 1;

        let mut parameters = Vec::new();
        loop {
            match self.peek() {
                Some(')') => {
                    self.position += 1;
                    break;
                }
                Some(_) => parameters.push(self.value_type()?),
                None => return Err(self.unexpected_end()),
            }
        }

        let return_type = self.return_type()?;

        while self.peek() == Some('^') {
            self.position += 1;
            self.value_type()?;
        }

        self.expect_end()?;
        Ok((return_type, parameters))
    }

    /// Decode a single field type
    pub fn field(mut self) -> DecodeResult<String> {
        let rendered = self.value_type()?;
        self.expect_end()?;
        Ok(rendered)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn next(&mut self) -> DecodeResult<char> {
        let c = self.peek().ok_or_else(|| self.unexpected_end())?;
        self.position += 1;
        Ok(c)
    }

    fn unexpected_end(&self) -> DescriptorDecodeError {
        DescriptorDecodeError::UnexpectedEnd {
            position: self.position,
        }
    }

    fn expect_end(&self) -> DecodeResult<()> {
        if self.position < self.chars.len() {
            return Err(DescriptorDecodeError::TrailingCharacters {
                position: self.position,
            });
        }
        Ok(())
    }

    fn return_type(&mut self) -> DecodeResult<String> {
        if self.peek() == Some('V') {
            self.position += 1;
            return Ok("void".to_string());
        }
        self.value_type()
    }

    fn value_type(&mut self) -> DecodeResult<String> {
        let mut dimensions = 0usize;
        while self.peek() == Some('[') {
            dimensions += 1;
            if dimensions > MAX_ARRAY_DIMENSIONS {
                return Err(DescriptorDecodeError::TooManyDimensions {
                    limit: MAX_ARRAY_DIMENSIONS,
                });
            }
            self.position += 1;
        }

        let start = self.position;
        let code = self.next()?;
        let mut rendered = match code {
            'B' => "byte".to_string(),
            'C' => "char".to_string(),
            'D' => "double".to_string(),
            'F' => "float".to_string(),
            'I' => "int".to_string(),
            'J' => "long".to_string(),
            'S' => "short".to_string(),
            'Z' => "boolean".to_string(),
            'L' => self.class_type(start)?,
            'T' => self.type_variable(start)?,
            other => {
                return Err(DescriptorDecodeError::InvalidTypeCode {
                    code: other,
                    position: start,
                })
            }
        };

        for _ in 0..dimensions {
            rendered.push_str("[]");
        }
        Ok(rendered)
    }

    fn class_type(&mut self, start: usize) -> DecodeResult<String> {
        let mut rendered = String::new();
        let mut first_segment = true;

        loop {
            let name = self.read_identifier(start, &['<', ';'])?;
            if first_segment {
                rendered.push_str(&self.render_class_name(&name));
            } else {
                rendered.push('.');
                rendered.push_str(&name.replace('$', "."));
            }
            first_segment = false;

            if self.peek() == Some('<') {
                rendered.push_str(&self.type_arguments()?);
            }

            match self.peek() {
                Some(';') => {
                    self.position += 1;
                    return Ok(rendered);
                }
                Some('.') => self.position += 1,
                Some(other) => {
                    return Err(DescriptorDecodeError::InvalidTypeCode {
                        code: other,
                        position: self.position,
                    })
                }
                None => return Err(DescriptorDecodeError::UnterminatedClassName { position: start }),
            }
        }
    }

    fn type_variable(&mut self, start: usize) -> DecodeResult<String> {
        let name = self.read_identifier(start, &[';'])?;
        self.position += 1;
        Ok(name)
    }

    /// Read up to (not including) one of `terminators`; a `.` after type arguments ends a segment
    fn read_identifier(&mut self, start: usize, terminators: &[char]) -> DecodeResult<String> {
        let begin = self.position;
        while let Some(c) = self.peek() {
            if terminators.contains(&c) {
                break;
            }
            self.position += 1;
        }

        if self.peek().is_none() {
            return Err(DescriptorDecodeError::UnterminatedClassName { position: start });
        }
        if self.position == begin {
            return Err(self.peek().map_or_else(
                || self.unexpected_end(),
                |code| DescriptorDecodeError::InvalidTypeCode {
                    code,
                    position: self.position,
                },
            ));
        }

        Ok(self.chars[begin..self.position].iter().collect())
    }

    fn render_class_name(&self, name: &str) -> String {
        let dotted = name.replace('/', ".");
        let visible = if self.options.fully_qualified {
            dotted.as_str()
        } else {
            dotted.rsplit('.').next().unwrap_or(dotted.as_str())
        };
        visible.replace('$', ".")
    }

    fn type_arguments(&mut self) -> DecodeResult<String> {
        self.type_argument_depth += 1;
        if self.type_argument_depth > MAX_TYPE_ARGUMENT_DEPTH {
            return Err(DescriptorDecodeError::NestingTooDeep {
                limit: MAX_TYPE_ARGUMENT_DEPTH,
            });
        }

        // consume '<'
        self.position += 1;
        let mut arguments = Vec::new();
        loop {
            match self.peek() {
                Some('>') => {
                    self.position += 1;
                    break;
                }
                Some('*') => {
                    self.position += 1;
                    arguments.push("?".to_string());
                }
                Some('+') => {
                    self.position += 1;
                    arguments.push(format!("? extends {}", self.value_type()?));
                }
                Some('-') => {
                    self.position += 1;
                    arguments.push(format!("? super {}", self.value_type()?));
                }
                Some(_) => arguments.push(self.value_type()?),
                None => return Err(self.unexpected_end()),
            }
        }

        self.type_argument_depth -= 1;
        Ok(format!("<{}>", arguments.join(", ")))
    }

    /// Skip `<T:Ljava/lang/Object;U::Ljava/lang/Comparable<TU;>;>`
    fn skip_formal_type_parameters(&mut self) -> DecodeResult<()> {
        let mut depth = 0usize;
        loop {
            match self.next()? {
                '<' => {
                    depth += 1;
                    if depth > MAX_TYPE_ARGUMENT_DEPTH {
                        return Err(DescriptorDecodeError::NestingTooDeep {
                            limit: MAX_TYPE_ARGUMENT_DEPTH,
                        });
                    }
                }
                '>' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }
}

/// Render a method or constructor descriptor as a readable signature
///
/// Methods render as `ReturnType selector(P1, P2)`, constructors as
/// `selector(P1, P2)`.
pub fn decode_with(
    descriptor: &str,
    selector: &str,
    is_method: bool,
    options: &DecodeOptions,
) -> DecodeResult<String> {
    let (return_type, parameters) = DescriptorDecoder::new(descriptor, options)?.method()?;
    let parameters = parameters.join(", ");

    if is_method {
        Ok(format!("{} {}({})", return_type, selector, parameters))
    } else {
        Ok(format!("{}({})", selector, parameters))
    }
}

/// `decode_with` using simple type names
pub fn decode(descriptor: &str, selector: &str, is_method: bool) -> DecodeResult<String> {
    decode_with(descriptor, selector, is_method, &DecodeOptions::default())
}

/// Render a single field type descriptor such as `[Ljava/lang/String;`
pub fn decode_type(descriptor: &str, options: &DecodeOptions) -> DecodeResult<String> {
    DescriptorDecoder::new(descriptor, options)?.field()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_primitive_parameters_and_array_return() {
        let rendered = decode("(IJ)[Ljava.lang.String;", "split", true).unwrap();
        assert_eq!(rendered, "String[] split(int, long)");

        let int_pos = rendered.find("int").unwrap();
        let long_pos = rendered.find("long").unwrap();
        assert!(int_pos < long_pos);
        assert!(!rendered.contains(';'));
        assert!(!rendered.contains("[L"));
        assert!(!rendered.contains("[I"));
    }

    #[test]
    fn test_all_primitives() {
        assert_eq!(
            decode("(BCDFIJSZ)V", "m", true).unwrap(),
            "void m(byte, char, double, float, int, long, short, boolean)"
        );
    }

    #[test]
    fn test_object_types_simple_and_qualified() {
        let descriptor = "(Ljava/util/List;Lorg.example.Outer$Inner;)Ljava/lang/Object;";
        assert_eq!(
            decode(descriptor, "convert", true).unwrap(),
            "Object convert(List, Outer.Inner)"
        );
        assert_eq!(
            decode_with(descriptor, "convert", true, &DecodeOptions::fully_qualified()).unwrap(),
            "java.lang.Object convert(java.util.List, org.example.Outer.Inner)"
        );
    }

    #[test]
    fn test_multi_dimensional_and_varargs_arrays() {
        assert_eq!(
            decode("([[I[Ljava/lang/String;)V", "main", true).unwrap(),
            "void main(int[][], String[])"
        );
    }

    #[test]
    fn test_constructor_has_no_return_type() {
        assert_eq!(
            decode("(Ljava/lang/String;I)V", "Widget", false).unwrap(),
            "Widget(String, int)"
        );
        assert_eq!(decode("()V", "Widget", false).unwrap(), "Widget()");
    }

    #[test]
    fn test_generic_signatures() {
        assert_eq!(
            decode(
                "<T:Ljava/lang/Object;>(Ljava/util/Map<TT;+Ljava/lang/Number;>;Ljava/util/List<*>;)TT;",
                "pick",
                true
            )
            .unwrap(),
            "T pick(Map<T, ? extends Number>, List<?>)"
        );
        assert_eq!(
            decode("(Ljava/util/Comparator<-TE;>;)V", "sort", true).unwrap(),
            "void sort(Comparator<? super E>)"
        );
        assert_eq!(
            decode("()Ljava/util/Map<TK;TV;>.Entry<TK;TV;>;", "first", true).unwrap(),
            "Map<K, V>.Entry<K, V> first()"
        );
    }

    #[test]
    fn test_throws_clause_is_ignored() {
        assert_eq!(
            decode("()V^Ljava/io/IOException;", "close", true).unwrap(),
            "void close()"
        );
    }

    #[test]
    fn test_invalid_descriptors() {
        assert_matches!(decode("", "m", true), Err(DescriptorDecodeError::Empty));
        assert_matches!(
            decode("IV", "m", true),
            Err(DescriptorDecodeError::MissingParameterList)
        );
        assert_matches!(
            decode("(I", "m", true),
            Err(DescriptorDecodeError::UnexpectedEnd { .. })
        );
        assert_matches!(
            decode("(Q)V", "m", true),
            Err(DescriptorDecodeError::InvalidTypeCode { code: 'Q', position: 1 })
        );
        assert_matches!(
            decode("(Ljava/lang/String)V", "m", true),
            Err(DescriptorDecodeError::UnterminatedClassName { position: 1 })
        );
        assert_matches!(
            decode("()VI", "m", true),
            Err(DescriptorDecodeError::TrailingCharacters { position: 3 })
        );
        assert_matches!(decode("()", "m", true), Err(DescriptorDecodeError::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_limits() {
        let too_long = format!("({})V", "I".repeat(MAX_DESCRIPTOR_LENGTH));
        assert_matches!(
            decode(&too_long, "m", true),
            Err(DescriptorDecodeError::TooLong { .. })
        );

        let deep_array = format!("({}I)V", "[".repeat(MAX_ARRAY_DIMENSIONS + 1));
        assert_matches!(
            decode(&deep_array, "m", true),
            Err(DescriptorDecodeError::TooManyDimensions { .. })
        );

        let nested = format!(
            "({}I{})V",
            "Ljava/util/List<".repeat(MAX_TYPE_ARGUMENT_DEPTH + 1),
            ">;".repeat(MAX_TYPE_ARGUMENT_DEPTH + 1)
        );
        assert_matches!(
            decode(&nested, "m", true),
            Err(DescriptorDecodeError::NestingTooDeep { .. })
        );
    }

    #[test]
    fn test_field_type() {
        assert_eq!(
            decode_type("[Ljava/lang/String;", &DecodeOptions::default()).unwrap(),
            "String[]"
        );
        assert_matches!(
            decode_type("V", &DecodeOptions::default()),
            Err(DescriptorDecodeError::InvalidTypeCode { code: 'V', .. })
        );
    }
}
