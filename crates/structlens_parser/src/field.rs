//! Field-line classifier.
//!
//! A body line is matched against three shapes in priority order: a named
//! field, a multi-name field sharing one type, and an embedded type. Lines
//! matching none of them are left to the caller to skip.

use crate::scanner::{is_identifier, split_identifier, strip_tag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FieldShape<'a> {
    /// `name type` or `a, b, c type`.
    Named {
        names: Vec<&'a str>,
        type_expression: &'a str,
    },
    /// `Type`, `*Type`, `pkg.Type` or `*pkg.Type`.
    Embedded {
        name: &'a str,
        type_expression: &'a str,
    },
}

/// Classifies one comment-free field segment.
pub(crate) fn classify(segment: &str) -> Option<FieldShape<'_>> {
    let text = strip_tag(segment);
    if text.is_empty() {
        return None;
    }

    named(text).or_else(|| embedded(text))
}

fn named(text: &str) -> Option<FieldShape<'_>> {
    let (first, mut rest) = split_identifier(text)?;
    let mut names = vec![first];

    while let Some(after_comma) = rest.trim_start().strip_prefix(',') {
        let (name, remainder) = split_identifier(after_comma.trim_start())?;
        names.push(name);
        rest = remainder;
    }

    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let type_expression = rest.trim();
    if type_expression.is_empty() || type_expression.starts_with(',') {
        return None;
    }

    Some(FieldShape::Named {
        names,
        type_expression,
    })
}

fn embedded(text: &str) -> Option<FieldShape<'_>> {
    let path = text.strip_prefix('*').unwrap_or(text);
    let name = match path.split_once('.') {
        Some((package, name)) if is_identifier(package) => name,
        Some(_) => return None,
        None => path,
    };
    is_identifier(name).then_some(FieldShape::Embedded {
        name,
        type_expression: text,
    })
}
