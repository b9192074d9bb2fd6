//! Replacement templates
//!
//! Templates use backslash references rather than the regex crate's `$`
//! syntax: `\1`..`\99` and `\g<n>` refer to numbered groups, `\g<name>` to
//! named groups, and `\n`, `\t` etc. are the usual escapes. A `$` is always
//! literal.

use regex::{Captures, Regex};

use crate::error::{ToolkitError, ToolkitResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Group(usize),
    Named(String),
}

/// A parsed replacement template, validated against one regex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementTemplate {
    pieces: Vec<Piece>,
}

impl ReplacementTemplate {
    /// Parse `template` and check every group reference exists in `regex`
    pub fn parse(template: &str, regex: &Regex) -> ToolkitResult<Self> {
        let chars: Vec<char> = template.chars().collect();
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c != '\\' {
                literal.push(c);
                i += 1;
                continue;
            }

            let start = i;
            let Some(&next) = chars.get(i + 1) else {
                return Err(pattern_error(format!(
                    "bad escape (end of pattern) at position {}",
                    start
                )));
            };
            i += 2;

            let reference = match next {
                'g' => {
                    let (name, end) = read_group_name(&chars, i, start)?;
                    i = end;
                    Some(resolve_group(&name, regex, start)?)
                }
                '0' => {
                    let (value, end) = read_octal(&chars, i, 2);
                    i = end;
                    literal.push(octal_char(value, start)?);
                    None
                }
                '1'..='9' => {
                    let mut index = next.to_digit(10).unwrap_or(0) as usize;
                    if let Some(second) = chars.get(i).and_then(|c| c.to_digit(10)) {
                        let third = chars.get(i + 1).and_then(|c| c.to_digit(8));
                        if next <= '7' && second < 8 && third.is_some() {
                            let (value, end) = read_octal(&chars, i - 1, 3);
                            i = end;
                            literal.push(octal_char(value, start)?);
                            continue;
                        }
                        index = index * 10 + second as usize;
                        i += 1;
                    }
                    Some(check_index(index, regex, start)?)
                }
                'n' => {
                    literal.push('\n');
                    None
                }
                't' => {
                    literal.push('\t');
                    None
                }
                'r' => {
                    literal.push('\r');
                    None
                }
                'f' => {
                    literal.push('\u{0c}');
                    None
                }
                'v' => {
                    literal.push('\u{0b}');
                    None
                }
                'a' => {
                    literal.push('\u{07}');
                    None
                }
                'b' => {
                    literal.push('\u{08}');
                    None
                }
                '\\' => {
                    literal.push('\\');
                    None
                }
                other if other.is_ascii_alphabetic() => {
                    return Err(pattern_error(format!(
                        "bad escape \\{} at position {}",
                        other, start
                    )));
                }
                other => {
                    literal.push('\\');
                    literal.push(other);
                    None
                }
            };

            if let Some(piece) = reference {
                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(piece);
            }
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Self { pieces })
    }

    /// Build the replacement for one match; unmatched groups expand to nothing
    pub fn expand(&self, caps: &Captures<'_>) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Group(index) => {
                    if let Some(m) = caps.get(*index) {
                        out.push_str(m.as_str());
                    }
                }
                Piece::Named(name) => {
                    if let Some(m) = caps.name(name) {
                        out.push_str(m.as_str());
                    }
                }
            }
        }
        out
    }

    /// Replace every match of `regex` in `text`
    ///
    /// An empty match is allowed right after a non-empty one (`x*` over
    /// `abxd` gives `-a-b--d-`), but two matches may not both be empty at the
    /// same position. `Regex::replace_all` skips the first kind, so the scan
    /// is done here.
    pub fn replace_all(&self, regex: &Regex, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        let mut pos = 0;
        let mut must_advance = false;

        while pos <= text.len() {
            let Some(mut caps) = regex.captures_at(text, pos) else {
                break;
            };
            let Some(mut whole) = caps.get(0) else {
                break;
            };

            if must_advance && whole.start() == pos && whole.end() == pos {
                let Some(next) = next_char_boundary(text, pos) else {
                    break;
                };
                let Some(later) = regex.captures_at(text, next) else {
                    break;
                };
                let Some(later_whole) = later.get(0) else {
                    break;
                };
                caps = later;
                whole = later_whole;
            }

            out.push_str(&text[copied..whole.start()]);
            out.push_str(&self.expand(&caps));
            copied = whole.end();
            must_advance = whole.start() == whole.end();
            pos = whole.end();
        }

        out.push_str(&text[copied..]);
        out
    }
}

fn next_char_boundary(text: &str, pos: usize) -> Option<usize> {
    text[pos..].chars().next().map(|c| pos + c.len_utf8())
}

fn pattern_error(message: String) -> ToolkitError {
    ToolkitError::Pattern(message)
}

fn read_group_name(chars: &[char], from: usize, start: usize) -> ToolkitResult<(String, usize)> {
    if chars.get(from) != Some(&'<') {
        return Err(pattern_error(format!("missing < at position {}", start)));
    }

    let mut name = String::new();
    let mut i = from + 1;
    loop {
        match chars.get(i) {
            Some('>') => break,
            Some(&c) => name.push(c),
            None => {
                return Err(pattern_error(format!(
                    "missing >, unterminated name at position {}",
                    start
                )))
            }
        }
        i += 1;
    }

    if name.is_empty() {
        return Err(pattern_error(format!("missing group name at position {}", start)));
    }
    Ok((name, i + 1))
}

fn resolve_group(name: &str, regex: &Regex, start: usize) -> ToolkitResult<Piece> {
    if name.chars().all(|c| c.is_ascii_digit()) {
        let index = name
            .parse::<usize>()
            .map_err(|_| pattern_error(format!("invalid group reference {} at position {}", name, start)))?;
        return check_index(index, regex, start);
    }

    let valid_identifier = name
        .chars()
        .next()
        .map_or(false, |c| c.is_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    if !valid_identifier {
        return Err(pattern_error(format!(
            "bad character in group name '{}' at position {}",
            name, start
        )));
    }

    if regex.capture_names().flatten().any(|n| n == name) {
        Ok(Piece::Named(name.to_string()))
    } else {
        Err(pattern_error(format!("unknown group name '{}'", name)))
    }
}

fn check_index(index: usize, regex: &Regex, start: usize) -> ToolkitResult<Piece> {
    if index < regex.captures_len() {
        Ok(Piece::Group(index))
    } else {
        Err(pattern_error(format!(
            "invalid group reference {} at position {}",
            index, start
        )))
    }
}

/// Read up to `max` octal digits starting at `from`
fn read_octal(chars: &[char], from: usize, max: usize) -> (u32, usize) {
    let mut value = 0;
    let mut i = from;
    while i < chars.len() && i - from < max {
        match chars[i].to_digit(8) {
            Some(digit) => value = value * 8 + digit,
            None => break,
        }
        i += 1;
    }
    (value, i)
}

fn octal_char(value: u32, start: usize) -> ToolkitResult<char> {
    if value > 0o377 {
        return Err(pattern_error(format!(
            "octal escape value \\{:o} outside of range 0-0o377 at position {}",
            value, start
        )));
    }
    char::from_u32(value)
        .ok_or_else(|| pattern_error(format!("invalid octal escape at position {}", start)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replace(pattern: &str, template: &str, text: &str) -> ToolkitResult<String> {
        let regex = Regex::new(pattern).unwrap();
        let template = ReplacementTemplate::parse(template, &regex)?;
        Ok(template.replace_all(&regex, text))
    }

    #[test]
    fn test_numbered_reference() {
        assert_eq!(
            replace("(?i)^(.*)[.]png$", "\\1.png", "Photo.PNG").unwrap(),
            "Photo.png"
        );
    }

    #[test]
    fn test_two_digit_and_g_references() {
        let pattern = "(a)(b)(c)(d)(e)(f)(g)(h)(i)(j)(k)";
        assert_eq!(replace(pattern, "\\11-\\g<1>", "abcdefghijk").unwrap(), "k-a");
        assert_eq!(replace("(x)", "\\g<0>\\g<0>", "x").unwrap(), "xx");
    }

    #[test]
    fn test_named_reference() {
        assert_eq!(
            replace("(?P<stem>.*)[.]jpeg$", "\\g<stem>.jpg", "clip/frame.jpeg").unwrap(),
            "clip/frame.jpg"
        );
    }

    #[test]
    fn test_dollar_is_literal() {
        assert_eq!(replace("price", "$1", "price").unwrap(), "$1");
    }

    #[test]
    fn test_escapes() {
        assert_eq!(replace("-", "\\t", "a-b").unwrap(), "a\tb");
        assert_eq!(replace("-", "\\\\", "a-b").unwrap(), "a\\b");
        assert_eq!(replace("-", "\\&", "a-b").unwrap(), "a\\&b");
    }

    #[test]
    fn test_replaces_every_match() {
        assert_eq!(replace(" ", "_", "a b c").unwrap(), "a_b_c");
    }

    #[test]
    fn test_empty_matches() {
        assert_eq!(replace("x*", "-", "abxd").unwrap(), "-a-b--d-");
        assert_eq!(replace(".*", "-", "ab").unwrap(), "--");
        assert_eq!(replace("", "/", "ab").unwrap(), "/a/b/");
        assert_eq!(replace("x*", "-", "").unwrap(), "-");
    }

    #[test]
    fn test_empty_match_after_multibyte_char() {
        assert_eq!(replace("x*", "|", "éx").unwrap(), "|é||");
    }

    #[test]
    fn test_unmatched_group_is_empty() {
        assert_eq!(replace("(a)|(b)", "[\\2]", "a").unwrap(), "[]");
    }

    #[test]
    fn test_invalid_group_reference() {
        let err = replace("(a)", "\\2", "a").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Regex error: invalid group reference 2 at position 0"
        );
    }

    #[test]
    fn test_unknown_group_name() {
        let err = replace("(?P<x>a)", "\\g<y>", "a").unwrap_err();
        assert!(err.to_string().contains("unknown group name 'y'"));
    }

    #[test]
    fn test_bad_escapes() {
        assert!(replace("a", "\\q", "a")
            .unwrap_err()
            .to_string()
            .contains("bad escape \\q"));
        assert!(replace("a", "trailing\\", "a")
            .unwrap_err()
            .to_string()
            .contains("end of pattern"));
        assert!(replace("a", "\\g1", "a").is_err());
        assert!(replace("a", "\\g<1", "a").is_err());
    }

    #[test]
    fn test_non_matching_text_is_unchanged() {
        assert_eq!(
            replace("(?i)^(.*)[.]png$", "\\1.png", "notes.txt").unwrap(),
            "notes.txt"
        );
    }
}
