//! Size and alignment of Go type expressions for a fixed word size.
//!
//! Only the top-level shape of an expression matters: pointers, slices, maps,
//! channels, interfaces and functions have fixed footprints regardless of
//! what they refer to, arrays recurse into their element type, and named
//! types the table does not know are treated as opaque word-sized values.

use std::collections::HashMap;

use serde::Serialize;

use crate::word_size::WordSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TypeInfo {
    pub size: usize,
    pub alignment: usize,
}

impl TypeInfo {
    pub const fn new(size: usize, alignment: usize) -> Self {
        Self {
            size,
            alignment: if alignment == 0 { 1 } else { alignment },
        }
    }

    /// Size and alignment both equal to `bytes`.
    pub const fn natural(bytes: usize) -> Self {
        Self::new(bytes, bytes)
    }

    /// `words` machine words aligned to one word.
    pub const fn words(word_size: WordSize, words: usize) -> Self {
        Self::new(words * word_size.bytes(), word_size.bytes())
    }
}

/// Largest object Go will allocate. Array types beyond it are not sized.
pub(crate) const MAX_OBJECT_SIZE: usize = usize::MAX >> 1;

pub(crate) type ScalarTable = HashMap<&'static str, TypeInfo>;

pub(crate) fn scalar_table(word_size: WordSize) -> ScalarTable {
    let word = TypeInfo::words(word_size, 1);
    HashMap::from([
        ("bool", TypeInfo::natural(1)),
        ("int8", TypeInfo::natural(1)),
        ("uint8", TypeInfo::natural(1)),
        ("byte", TypeInfo::natural(1)),
        ("int16", TypeInfo::natural(2)),
        ("uint16", TypeInfo::natural(2)),
        ("int32", TypeInfo::natural(4)),
        ("uint32", TypeInfo::natural(4)),
        ("rune", TypeInfo::natural(4)),
        ("int64", TypeInfo::natural(8)),
        ("uint64", TypeInfo::natural(8)),
        ("float32", TypeInfo::natural(4)),
        ("float64", TypeInfo::natural(8)),
        // complex numbers align like their float components
        ("complex64", TypeInfo::new(8, 4)),
        ("complex128", TypeInfo::new(16, 8)),
        ("int", word),
        ("uint", word),
        ("uintptr", word),
        ("unsafe.Pointer", word),
        ("string", TypeInfo::words(word_size, 2)),
        ("any", TypeInfo::words(word_size, 2)),
        ("error", TypeInfo::words(word_size, 2)),
    ])
}

pub(crate) fn resolve(type_expression: &str, word_size: WordSize, scalars: &ScalarTable) -> TypeInfo {
    let expression = type_expression.trim();
    let word = TypeInfo::words(word_size, 1);

    if expression.starts_with('*') {
        return word;
    }

    if let Some(rest) = expression.strip_prefix('[') {
        let Some((length, element)) = rest.split_once(']') else {
            return word;
        };
        if length.trim().is_empty() {
            return TypeInfo::words(word_size, 3);
        }
        let Some(length) = parse_array_length(length) else {
            return word;
        };
        let element = resolve(element, word_size, scalars);
        return length
            .checked_mul(element.size)
            .filter(|size| *size <= MAX_OBJECT_SIZE)
            .map_or(word, |size| TypeInfo::new(size, element.alignment));
    }

    if expression.starts_with("map[") || is_channel(expression) {
        return word;
    }

    if is_interface(expression) {
        return TypeInfo::words(word_size, 2);
    }

    if is_function(expression) {
        return word;
    }

    scalars.get(expression).copied().unwrap_or(word)
}

fn is_channel(expression: &str) -> bool {
    if expression.starts_with("<-") {
        return expression[2..].trim_start().starts_with("chan");
    }
    expression
        .strip_prefix("chan")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|next| next.is_whitespace() || next == '<' || next == '(')
}

fn is_interface(expression: &str) -> bool {
    expression
        .strip_prefix("interface")
        .is_some_and(|rest| rest.trim_start().starts_with('{'))
}

fn is_function(expression: &str) -> bool {
    expression
        .strip_prefix("func")
        .is_some_and(|rest| rest.trim_start().starts_with('('))
}

/// Integer literal array length: decimal, `0x`, `0o`, `0b` or legacy octal,
/// with optional `_` separators. Anything else (constants, expressions) is
/// not a literal and yields `None`.
fn parse_array_length(text: &str) -> Option<usize> {
    let digits: String = text.trim().chars().filter(|ch| *ch != '_').collect();
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        return None;
    }

    let (radix, body) = match digits.get(..2) {
        Some("0x" | "0X") => (16, &digits[2..]),
        Some("0o" | "0O") => (8, &digits[2..]),
        Some("0b" | "0B") => (2, &digits[2..]),
        _ if digits.len() > 1 && digits.starts_with('0') => (8, &digits[1..]),
        _ => (10, digits.as_str()),
    };

    usize::from_str_radix(body, radix).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(expression: &str, word_size: WordSize) -> TypeInfo {
        resolve(expression, word_size, &scalar_table(word_size))
    }

    #[test]
    fn test_fixed_width_scalars() {
        for word_size in [WordSize::Four, WordSize::Eight] {
            assert_eq!(info("bool", word_size), TypeInfo::new(1, 1));
            assert_eq!(info("byte", word_size), TypeInfo::new(1, 1));
            assert_eq!(info("uint16", word_size), TypeInfo::new(2, 2));
            assert_eq!(info("rune", word_size), TypeInfo::new(4, 4));
            assert_eq!(info("float32", word_size), TypeInfo::new(4, 4));
            assert_eq!(info("int64", word_size), TypeInfo::new(8, 8));
            assert_eq!(info("complex64", word_size), TypeInfo::new(8, 4));
            assert_eq!(info("complex128", word_size), TypeInfo::new(16, 8));
        }
    }

    #[test]
    fn test_word_dependent_types() {
        assert_eq!(info("int", WordSize::Eight), TypeInfo::new(8, 8));
        assert_eq!(info("uintptr", WordSize::Four), TypeInfo::new(4, 4));
        assert_eq!(info("string", WordSize::Eight), TypeInfo::new(16, 8));
        assert_eq!(info("string", WordSize::Four), TypeInfo::new(8, 4));
        assert_eq!(info("[]string", WordSize::Eight), TypeInfo::new(24, 8));
        assert_eq!(info("[]int32", WordSize::Four), TypeInfo::new(12, 4));
    }

    #[test]
    fn test_reference_types() {
        let word = TypeInfo::new(8, 8);
        assert_eq!(info("*[]byte", WordSize::Eight), word);
        assert_eq!(info("**Node", WordSize::Eight), word);
        assert_eq!(info("map[string]interface{}", WordSize::Eight), word);
        assert_eq!(info("chan int", WordSize::Eight), word);
        assert_eq!(info("chan<- error", WordSize::Eight), word);
        assert_eq!(info("<-chan struct{}", WordSize::Eight), word);
        assert_eq!(info("func() error", WordSize::Eight), word);
        assert_eq!(info("func (int) bool", WordSize::Eight), word);
    }

    #[test]
    fn test_interfaces() {
        let pair = TypeInfo::new(16, 8);
        assert_eq!(info("interface{}", WordSize::Eight), pair);
        assert_eq!(info("interface { Read() }", WordSize::Eight), pair);
        assert_eq!(info("any", WordSize::Eight), pair);
        assert_eq!(info("error", WordSize::Four), TypeInfo::new(8, 4));
    }

    #[test]
    fn test_arrays() {
        assert_eq!(info("[3]int32", WordSize::Eight), TypeInfo::new(12, 4));
        assert_eq!(info("[10]int32", WordSize::Eight), TypeInfo::new(40, 4));
        assert_eq!(info("[3][3]int", WordSize::Eight), TypeInfo::new(72, 8));
        assert_eq!(info("[3][3]int", WordSize::Four), TypeInfo::new(36, 4));
        assert_eq!(info("[0]uint64", WordSize::Eight), TypeInfo::new(0, 8));
        assert_eq!(info("[0x10]byte", WordSize::Eight), TypeInfo::new(16, 1));
        assert_eq!(info("[1_000]byte", WordSize::Eight), TypeInfo::new(1000, 1));
        assert_eq!(info("[4]string", WordSize::Eight), TypeInfo::new(64, 8));
    }

    #[test]
    fn test_unresolvable_types_fall_back_to_a_word() {
        let word = TypeInfo::new(8, 8);
        assert_eq!(info("Address", WordSize::Eight), word);
        assert_eq!(info("time.Time", WordSize::Eight), word);
        assert_eq!(info("[N]int32", WordSize::Eight), word);
        assert_eq!(info("[-1]int32", WordSize::Eight), word);
        assert_eq!(info("[2", WordSize::Eight), word);
        assert_eq!(info("[99999999999999999999]byte", WordSize::Eight), word);
        assert_eq!(info("[0xFFFFFFFFFFFFFFFF]byte", WordSize::Eight), word);
        assert_eq!(info("[0x8000000000000000]byte", WordSize::Eight), word);
        assert_eq!(info("[0x4000000000000000]int16", WordSize::Eight), word);
        assert_eq!(info("struct {...}", WordSize::Eight), word);
        assert_eq!(info("channel", WordSize::Eight), word);
        assert_eq!(info("interfaces.Thing", WordSize::Eight), word);
        assert_eq!(info("", WordSize::Four), TypeInfo::new(4, 4));
    }

    #[test]
    fn test_array_length_literals() {
        assert_eq!(parse_array_length("42"), Some(42));
        assert_eq!(parse_array_length(" 0b101 "), Some(5));
        assert_eq!(parse_array_length("0o17"), Some(15));
        assert_eq!(parse_array_length("017"), Some(15));
        assert_eq!(parse_array_length("0"), Some(0));
        assert_eq!(parse_array_length("+3"), None);
        assert_eq!(parse_array_length("size"), None);
        assert_eq!(parse_array_length("2*N"), None);
    }
}
