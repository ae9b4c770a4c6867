//! Line classification
//!
//! Decides whether an input line is a command, a unit conversion or plain
//! arithmetic. Conversion lines look like
//!
//! ```text
//! [Category:] <expression> <from> -> <to>
//! ```
//!
//! where the arrow may also be written `→` or ` to `.

use unitcalc_core::ParseError;

/// Arrow spellings, tried in this order when two start at the same offset
const ARROWS: [&str; 3] = ["->", "→", " to "];

/// Interactive commands, introduced by ':'
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// List every category, or just the named one
    Units(Option<String>),
    Quit,
}

/// A classified input line. Slices borrow from the line.
#[derive(Debug, Clone, PartialEq)]
pub enum Request<'a> {
    Empty,
    Command(Command),
    Arithmetic(Span<'a>),
    Conversion {
        category: Option<&'a str>,
        expression: Span<'a>,
        from: &'a str,
        to: &'a str,
    },
}

/// Part of the line, remembering the character offset it starts at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Span<'a> {
    fn new(line: &'a str, start: usize, end: usize) -> Self {
        Span {
            text: &line[start..end],
            offset: char_offset(line, start),
        }
    }
}

/// Character offset of byte index `byte` in `line`
fn char_offset(line: &str, byte: usize) -> usize {
    line[..byte].chars().count()
}

fn describe(text: &str) -> String {
    if text.is_empty() {
        "end of input".to_string()
    } else {
        format!("'{}'", text)
    }
}

fn is_unit_symbol(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_alphabetic)
}

/// Classify one input line
pub fn classify(line: &str) -> Result<Request<'_>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Request::Empty);
    }

    if trimmed.starts_with(':') {
        let start = line.len() - line.trim_start().len();
        return parse_command(line, start).map(Request::Command);
    }

    match find_arrow(line) {
        Some((at, arrow)) => parse_conversion(line, at, arrow.len()),
        None => Ok(Request::Arithmetic(Span::new(line, 0, line.len()))),
    }
}

/// Earliest arrow in the line, as (byte index, spelling)
fn find_arrow(line: &str) -> Option<(usize, &'static str)> {
    ARROWS
        .iter()
        .filter_map(|arrow| line.find(arrow).map(|at| (at, *arrow)))
        .min_by_key(|(at, _)| *at)
}

/// Whitespace separated words of `line[from..]` with their byte index in `line`
fn words_with_offsets(line: &str, from: usize) -> impl Iterator<Item = (usize, &str)> {
    line[from..]
        .split_whitespace()
        .map(move |word| (word.as_ptr() as usize - line.as_ptr() as usize, word))
}

fn parse_command(line: &str, start: usize) -> Result<Command, ParseError> {
    let mut words = words_with_offsets(line, start + 1);
    let name = words.next().map_or("", |(_, word)| word);
    let arg = words.next().map(|(_, word)| word);

    let command = match (name, arg) {
        ("help" | "h" | "?", None) => Command::Help,
        ("units" | "u", arg) => Command::Units(arg.map(str::to_string)),
        ("quit" | "q" | "exit", None) => Command::Quit,
        _ => {
            return Err(ParseError::new(
                char_offset(line, start),
                "command (:help, :units [type], :quit)",
                describe(line[start..].trim_end()),
            ))
        }
    };

    if let Some((at, extra)) = words.next() {
        return Err(ParseError::new(char_offset(line, at), "end of command", describe(extra)));
    }

    Ok(command)
}

fn parse_conversion(line: &str, arrow_at: usize, arrow_len: usize) -> Result<Request<'_>, ParseError> {
    // Optional "Category:" prefix
    let (category, body_start) = match line[..arrow_at].find(':') {
        Some(colon) => {
            let name = line[..colon].trim();
            if !is_unit_symbol(name) {
                let at = line.len() - line.trim_start().len();
                return Err(ParseError::new(char_offset(line, at), "unit type name before ':'", describe(name)));
            }
            (Some(name), colon + 1)
        }
        None => (None, 0),
    };

    // Source unit: trailing run of letters left of the arrow
    let left = line[body_start..arrow_at].trim_end();
    let left_end = body_start + left.len();
    let unit_len: usize = left
        .chars()
        .rev()
        .take_while(|c| c.is_alphabetic())
        .map(char::len_utf8)
        .sum();
    if unit_len == 0 {
        let found = left.chars().last().map(String::from).unwrap_or_default();
        let at = if found.is_empty() { left_end } else { left_end - found.len() };
        return Err(ParseError::new(char_offset(line, at), "source unit before arrow", describe(&found)));
    }
    let from = &line[left_end - unit_len..left_end];
    let expression = Span::new(line, body_start, left_end - unit_len);

    // Target unit: the whole right-hand side
    let right_start = arrow_at + arrow_len;
    let right = line[right_start..].trim();
    if !is_unit_symbol(right) {
        let lead = line[right_start..].len() - line[right_start..].trim_start().len();
        return Err(ParseError::new(
            char_offset(line, right_start + lead),
            "target unit after arrow",
            describe(right),
        ));
    }

    Ok(Request::Conversion {
        category,
        expression,
        from,
        to: right,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversion(line: &str) -> (Option<&str>, &str, &str, &str) {
        match classify(line).unwrap() {
            Request::Conversion { category, expression, from, to } => (category, expression.text.trim(), from, to),
            other => panic!("expected conversion, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(classify("").unwrap(), Request::Empty);
        assert_eq!(classify("  \t ").unwrap(), Request::Empty);
    }

    #[test]
    fn test_arithmetic() {
        let request = classify("2 + 3 * 4").unwrap();
        assert_eq!(request, Request::Arithmetic(Span { text: "2 + 3 * 4", offset: 0 }));
    }

    #[test]
    fn test_simple_conversion() {
        assert_eq!(conversion("100 C -> F"), (None, "100", "C", "F"));
        assert_eq!(conversion("1 m → ft"), (None, "1", "m", "ft"));
        assert_eq!(conversion("5 km to mi"), (None, "5", "km", "mi"));
    }

    #[test]
    fn test_unit_attached_to_number() {
        assert_eq!(conversion("32F->C"), (None, "32", "F", "C"));
    }

    #[test]
    fn test_category_prefix() {
        assert_eq!(conversion("Temp: 32 F -> C"), (Some("Temp"), "32", "F", "C"));
        assert_eq!(conversion("Length:1 m -> ft"), (Some("Length"), "1", "m", "ft"));
    }

    #[test]
    fn test_expression_in_conversion() {
        assert_eq!(conversion("(2 + 3) * 10 m -> ft"), (None, "(2 + 3) * 10", "m", "ft"));
        assert_eq!(conversion("sqrt(16) km -> mi"), (None, "sqrt(16)", "km", "mi"));
    }

    #[test]
    fn test_expression_offset() {
        match classify("Temp: 32 F -> C").unwrap() {
            Request::Conversion { expression, .. } => {
                assert_eq!(expression.offset, 5);
                assert_eq!(expression.text, " 32 ");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_source_unit() {
        let err = classify("32 -> C").unwrap_err();
        assert_eq!(err.position, 1);
        assert_eq!(err.expected, "source unit before arrow");
        assert_eq!(err.found, "'2'");

        let err = classify("-> C").unwrap_err();
        assert_eq!(err.position, 0);
        assert_eq!(err.found, "end of input");
    }

    #[test]
    fn test_missing_target_unit() {
        let err = classify("32 F -> ").unwrap_err();
        assert_eq!(err.position, 8);
        assert_eq!(err.found, "end of input");

        let err = classify("32 F -> C F").unwrap_err();
        assert_eq!(err.position, 8);
        assert_eq!(err.found, "'C F'");
    }

    #[test]
    fn test_bad_category_prefix() {
        let err = classify("  3: 32 F -> C").unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.found, "'3'");
    }

    #[test]
    fn test_positions_count_characters() {
        let err = classify("1 m → 2").unwrap_err();
        assert_eq!(err.position, 6);
    }

    #[test]
    fn test_commands() {
        assert_eq!(classify(":help").unwrap(), Request::Command(Command::Help));
        assert_eq!(classify("  :q").unwrap(), Request::Command(Command::Quit));
        assert_eq!(classify(":units").unwrap(), Request::Command(Command::Units(None)));
        assert_eq!(
            classify(":units Temp").unwrap(),
            Request::Command(Command::Units(Some("Temp".to_string())))
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = classify(":frobnicate").unwrap_err();
        assert_eq!(err.position, 0);
        assert_eq!(err.found, "':frobnicate'");

        let err = classify(":units Temp Length").unwrap_err();
        assert_eq!(err.position, 12);
        assert_eq!(err.expected, "end of command");
    }

    #[test]
    fn test_extra_command_word_position() {
        let err = classify(":units a b b").unwrap_err();
        assert_eq!(err.position, 9);
        assert_eq!(err.found, "'b'");

        let err = classify(" :u Temp →  Temp").unwrap_err();
        assert_eq!(err.position, 9);
        assert_eq!(err.found, "'→'");
    }

    #[test]
    fn test_earliest_arrow_wins() {
        // " to " appears after "->", so the line splits at "->"
        assert_eq!(conversion("1 m -> ft"), (None, "1", "m", "ft"));
        let err = classify("1 m -> ft to in").unwrap_err();
        assert_eq!(err.expected, "target unit after arrow");
    }
}
