//! Recognises the line that introduces a named record type.

use crate::scanner::{split_identifier, strip_line_comment};
use structlens_span::column_of;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Header<'a> {
    pub name: &'a str,
    /// Char column of the name within the raw line.
    pub name_column: usize,
    /// Byte index of the opening `{` when it sits on the header line.
    pub brace: Option<usize>,
}

/// Matches `type Name struct {`, `type Name[T any] struct {` and, inside a
/// `type ( ... )` group, `Name struct {`. The brace is optional; a comment
/// line never matches.
pub(crate) fn match_header(line: &str, in_group: bool) -> Option<Header<'_>> {
    let code = strip_line_comment(line);
    let trimmed = code.trim_start();
    let indent = code.len() - trimmed.len();

    let after_keyword = match strip_keyword(trimmed, "type") {
        Some(rest) => rest.trim_start(),
        None if in_group => trimmed,
        None => return None,
    };
    let name_offset = indent + trimmed.len() - after_keyword.len();
    let (name, rest) = split_identifier(after_keyword)?;

    let rest = skip_type_parameters(rest)?;
    let rest = strip_keyword(rest.trim_start(), "struct")?.trim_start();
    if !(rest.is_empty() || rest.starts_with('{')) {
        return None;
    }

    let brace = rest
        .starts_with('{')
        .then(|| code.len() - rest.len());

    Some(Header {
        name,
        name_column: column_of(line, name_offset),
        brace,
    })
}

/// True for the `type (` line that opens a grouped declaration.
pub(crate) fn opens_type_group(line: &str) -> bool {
    strip_keyword(strip_line_comment(line).trim(), "type").is_some_and(|rest| rest.trim() == "(")
}

/// Strips `keyword` when it is followed by a non-identifier char or the end
/// of the text.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(ch) if ch.is_alphanumeric() || ch == '_' => None,
        _ => Some(rest),
    }
}

/// Skips a generic parameter list such as `[K comparable, V any]`.
fn skip_type_parameters(text: &str) -> Option<&str> {
    if !text.starts_with('[') {
        return Some(text);
    }
    let mut depth = 0usize;
    for (index, ch) in text.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[index + 1..]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_header() {
        let header = match_header("type BadLayout struct {", false).unwrap();
        assert_eq!(header.name, "BadLayout");
        assert_eq!(header.name_column, 5);
        assert_eq!(header.brace, Some(22));
    }

    #[test]
    fn test_header_without_brace() {
        let header = match_header("\ttype Split struct", false).unwrap();
        assert_eq!(header.name, "Split");
        assert_eq!(header.name_column, 6);
        assert_eq!(header.brace, None);
    }

    #[test]
    fn test_generic_header() {
        let header = match_header("type Pair[K comparable, V any] struct{", false).unwrap();
        assert_eq!(header.name, "Pair");
        assert!(header.brace.is_some());
    }

    #[test]
    fn test_grouped_header() {
        assert!(match_header("\tNode struct {", false).is_none());
        let header = match_header("\tNode struct {", true).unwrap();
        assert_eq!(header.name, "Node");
        assert_eq!(header.name_column, 1);
    }

    #[test]
    fn test_rejects_non_struct_lines() {
        assert!(match_header("type ID int", false).is_none());
        assert!(match_header("type Alias = struct{}", false).is_none());
        assert!(match_header("type Weird structure", false).is_none());
        assert!(match_header("// type Commented struct {", false).is_none());
        assert!(match_header("typed Foo struct {", false).is_none());
        assert!(match_header("type Reader interface {", false).is_none());
    }

    #[test]
    fn test_type_group_opener() {
        assert!(opens_type_group("type ("));
        assert!(opens_type_group("type(  // grouped"));
        assert!(!opens_type_group("type T struct {"));
    }
}
