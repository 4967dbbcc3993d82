/// Placeholder text for a `{n}` with no matching argument
pub const MISSING_ARGUMENT: &str = "<missing argument>";

/// Substitute `{n}` placeholders with positional arguments
///
/// Braces that do not enclose a decimal index are copied through unchanged.
pub fn bind<S: AsRef<str>>(template: &str, arguments: &[S]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let index = after_open
            .find('}')
            .map(|close| (close, &after_open[..close]))
            .filter(|(_, digits)| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()));

        match index {
            Some((close, digits)) => {
                let argument = digits
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| arguments.get(i))
                    .map(AsRef::as_ref)
                    .unwrap_or(MISSING_ARGUMENT);
                output.push_str(argument);
                rest = &after_open[close + 1..];
            }
            None => {
                output.push('{');
                rest = after_open;
            }
        }
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        assert_eq!(bind("{1} before {0}", &["a", "b"]), "b before a");
        assert_eq!(bind("{0}{0}", &["x"]), "xx");
    }

    #[test]
    fn test_missing_arguments() {
        let none: [&str; 0] = [];
        assert_eq!(bind("version {0}", &none), "version <missing argument>");
        assert_eq!(bind("{0} {1}", &["only"]), "only <missing argument>");
    }

    #[test]
    fn test_literal_braces() {
        assert_eq!(bind("a { b } {x} {", &["z"]), "a { b } {x} {");
        assert_eq!(bind("css { color: red }", &["z"]), "css { color: red }");
        assert_eq!(bind("{}", &["z"]), "{}");
    }
}
