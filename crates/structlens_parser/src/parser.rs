//! Line-oriented state machine that collects record declarations.
//!
//! Phase one looks for declaration headers; phase two walks the body of each
//! header with a brace-depth counter, feeding top-level lines to the field
//! classifier. Nothing here fails: lines that do not fit a known shape are
//! skipped and an unterminated body is clamped to the end of the document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use structlens_span::{Position, Span, column_of};
use tracing::{debug, trace};

use crate::declaration::{Field, RecordDeclaration};
use crate::field::{FieldShape, classify};
use crate::header::{Header, match_header, opens_type_group};
use crate::scanner::{scan_braces, split_fields, strip_line_comment};

/// How `a, b, c T` field lines are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MultiNamePolicy {
    /// Only the first name becomes a field. The remaining names take no
    /// storage, so records using this form are under-counted.
    #[default]
    FirstName,
    /// One field per name, each taking its own storage.
    Expand,
}

impl FromStr for MultiNamePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-name" | "first_name" | "first" => Ok(Self::FirstName),
            "expand" | "all" => Ok(Self::Expand),
            _ => Err(format!("Unknown multi-name field policy: {}", s)),
        }
    }
}

impl fmt::Display for MultiNamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstName => write!(f, "first-name"),
            Self::Expand => write!(f, "expand"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub multi_name_fields: MultiNamePolicy,
}

#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Returns every top-level record declaration in source order.
    pub fn parse(&self, source: &str) -> Vec<RecordDeclaration> {
        let lines: Vec<&str> = source
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        let mut declarations = Vec::new();
        let mut in_group = false;
        let mut index = 0;

        while index < lines.len() {
            let line = lines[index];

            if in_group && strip_line_comment(line).trim_start().starts_with(')') {
                in_group = false;
            } else if opens_type_group(line) {
                in_group = true;
            } else if let Some(header) = match_header(line, in_group) {
                match self.parse_declaration(&lines, index, &header) {
                    Some(declaration) => {
                        index = declaration.span.end.line;
                        declarations.push(declaration);
                    }
                    None => trace!(
                        record = header.name,
                        line = index + 1,
                        "no opening brace before end of input"
                    ),
                }
            }

            index += 1;
        }

        debug!(count = declarations.len(), "parsed record declarations");
        declarations
    }

    fn parse_declaration(
        &self,
        lines: &[&str],
        header_line: usize,
        header: &Header<'_>,
    ) -> Option<RecordDeclaration> {
        let (brace_line, brace) = match header.brace {
            Some(brace) => (header_line, brace),
            None => find_opening_brace(lines, header_line + 1)?,
        };

        let mut body = Body::new(self.options);
        let end_line = if body.feed(brace_line, lines[brace_line], brace + 1) {
            Some(brace_line)
        } else {
            (brace_line + 1..lines.len()).find(|&index| body.feed(index, lines[index], 0))
        };

        let end_line = end_line.unwrap_or_else(|| {
            debug!(record = header.name, "record body is not closed, clamping to end of input");
            lines.len() - 1
        });

        Some(RecordDeclaration {
            name: header.name.to_string(),
            name_span: Span::on_line(header_line, header.name_column, header.name.chars().count()),
            fields: body.fields,
            span: Span::new(
                Position::new(header_line, 0),
                Position::new(end_line, lines[end_line].chars().count()),
            ),
        })
    }
}

fn find_opening_brace(lines: &[&str], from: usize) -> Option<(usize, usize)> {
    lines
        .iter()
        .enumerate()
        .skip(from)
        .find_map(|(index, line)| strip_line_comment(line).find('{').map(|brace| (index, brace)))
}

/// Accumulates the fields of one record body.
struct Body {
    options: ParseOptions,
    depth: usize,
    in_block_comment: bool,
    fields: Vec<Field>,
}

impl Body {
    fn new(options: ParseOptions) -> Self {
        Self {
            options,
            depth: 1,
            in_block_comment: false,
            fields: Vec::new(),
        }
    }

    /// Feeds `line` starting at byte `from`. Returns true once the record's
    /// closing brace has been consumed.
    fn feed(&mut self, line_index: usize, line: &str, from: usize) -> bool {
        let text = &line[from..];
        let trimmed = text.trim();

        if self.in_block_comment {
            if trimmed.contains("*/") {
                self.in_block_comment = false;
            }
            return false;
        }
        if trimmed.starts_with("/*") {
            self.in_block_comment = !trimmed.contains("*/");
            return false;
        }

        let code = strip_line_comment(text);
        if code.trim().is_empty() {
            return false;
        }
        if self.depth == 1 && code.trim_start().starts_with('}') {
            return true;
        }

        let scan = scan_braces(code, self.depth);
        if self.depth == 1 {
            let visible = scan.closed_at.map_or(code, |close| &code[..close]);
            let mut cursor = from;
            for segment in split_fields(visible) {
                self.record(line_index, line, segment, &mut cursor);
            }
        }
        self.depth = scan.depth;

        scan.closed_at.is_some()
    }

    fn record(&mut self, line_index: usize, line: &str, segment: &str, cursor: &mut usize) {
        let Some(shape) = classify(segment) else {
            if !segment.trim().is_empty() {
                trace!(line = line_index + 1, text = segment.trim(), "skipping unrecognised field line");
            }
            return;
        };

        match shape {
            FieldShape::Named {
                names,
                type_expression,
            } => {
                let type_expression = collapse_open_block(type_expression);
                let take = match self.options.multi_name_fields {
                    MultiNamePolicy::FirstName => 1,
                    MultiNamePolicy::Expand => names.len(),
                };
                for name in names.into_iter().take(take) {
                    self.push(line_index, line, name, type_expression.clone(), cursor);
                }
            }
            FieldShape::Embedded {
                name,
                type_expression,
            } => self.push(line_index, line, name, type_expression.to_string(), cursor),
        }
    }

    fn push(
        &mut self,
        line_index: usize,
        line: &str,
        name: &str,
        type_expression: String,
        cursor: &mut usize,
    ) {
        let found = line[*cursor..]
            .find(name)
            .map(|offset| *cursor + offset)
            .or_else(|| line.find(name));
        let column = found.map_or(0, |byte| {
            *cursor = byte + name.len();
            column_of(line, byte)
        });

        self.fields.push(Field {
            name: name.to_string(),
            type_expression,
            location: Span::on_line(line_index, column, name.chars().count()),
        });
    }
}

/// A field whose type opens an anonymous block (`Inner struct {`) keeps the
/// text up to the brace; the block's lines are consumed as opaque text.
fn collapse_open_block(type_expression: &str) -> String {
    if scan_braces(type_expression, 0).depth == 0 {
        return type_expression.to_string();
    }
    match type_expression.find('{') {
        Some(brace) => format!("{}{{...}}", &type_expression[..=brace]),
        None => type_expression.to_string(),
    }
}
