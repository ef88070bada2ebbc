//! Character-level helpers shared by the header finder and the field
//! classifier. Everything here works on a single line of text.

/// Tracks whether the scan is inside a string, rune or raw (backtick)
/// literal so that delimiters inside tags and strings are ignored.
#[derive(Default)]
struct Literal {
    open: Option<char>,
    escaped: bool,
}

impl Literal {
    /// Feeds one char; returns true when the char belongs to a literal.
    fn consume(&mut self, ch: char) -> bool {
        match self.open {
            Some(open) => {
                if self.escaped {
                    self.escaped = false;
                } else if ch == '\\' && open != '`' {
                    self.escaped = true;
                } else if ch == open {
                    self.open = None;
                }
                true
            }
            None if matches!(ch, '"' | '\'' | '`') => {
                self.open = Some(ch);
                true
            }
            None => false,
        }
    }
}

/// Cuts `line` at the first `//` or `/*` that is not inside a literal.
pub(crate) fn strip_line_comment(line: &str) -> &str {
    let mut literal = Literal::default();
    let mut previous_slash = false;

    for (index, ch) in line.char_indices() {
        if literal.consume(ch) {
            previous_slash = false;
            continue;
        }
        match ch {
            '/' | '*' if previous_slash => return &line[..index - 1],
            '/' => previous_slash = true,
            _ => previous_slash = false,
        }
    }

    line
}

pub(crate) struct BraceScan {
    pub depth: usize,
    /// Byte index of the `}` that brought the depth down to zero.
    pub closed_at: Option<usize>,
}

/// Applies every `{` and `}` outside literals to `depth`, stopping at the
/// brace that closes the outermost block.
pub(crate) fn scan_braces(text: &str, mut depth: usize) -> BraceScan {
    let mut literal = Literal::default();

    for (index, ch) in text.char_indices() {
        if literal.consume(ch) {
            continue;
        }
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return BraceScan {
                        depth,
                        closed_at: Some(index),
                    };
                }
            }
            _ => {}
        }
    }

    BraceScan {
        depth,
        closed_at: None,
    }
}

/// Splits a record body fragment on `;` separators that sit outside nested
/// blocks and literals.
pub(crate) fn split_fields(text: &str) -> Vec<&str> {
    let mut literal = Literal::default();
    let mut depth = 0usize;
    let mut start = 0;
    let mut segments = Vec::new();

    for (index, ch) in text.char_indices() {
        if literal.consume(ch) {
            continue;
        }
        match ch {
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                segments.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    segments.push(&text[start..]);

    segments
}

/// Drops a trailing struct tag (`` `json:"id"` ``) preceded by whitespace.
pub(crate) fn strip_tag(text: &str) -> &str {
    let text = text.trim();
    let Some(body) = text.strip_suffix('`') else {
        return text;
    };
    match body.rfind('`') {
        Some(open) if text[..open].ends_with(char::is_whitespace) => text[..open].trim_end(),
        _ => text,
    }
}

/// Splits a leading Go identifier off `text`.
pub(crate) fn split_identifier(text: &str) -> Option<(&str, &str)> {
    let first = text.chars().next()?;
    if !(first.is_alphabetic() || first == '_') {
        return None;
    }
    let end = text
        .char_indices()
        .find(|(_, ch)| !(ch.is_alphanumeric() || *ch == '_'))
        .map_or(text.len(), |(index, _)| index);
    Some(text.split_at(end))
}

pub(crate) fn is_identifier(text: &str) -> bool {
    matches!(split_identifier(text), Some((_, rest)) if rest.is_empty())
}
