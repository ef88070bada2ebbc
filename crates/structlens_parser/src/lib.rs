//! Best-effort recovery of Go `struct` declarations from raw source text.
//!
//! The parser never fails. Constructs it does not understand are skipped, so
//! the worst outcome for malformed input is a missing field or declaration.

pub mod declaration;
mod field;
mod header;
pub mod parser;
mod scanner;

pub use declaration::{Field, RecordDeclaration};
pub use parser::{MultiNamePolicy, ParseOptions, Parser};

/// Parses `source` with the default options.
pub fn parse(source: &str) -> Vec<RecordDeclaration> {
    Parser::default().parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use structlens_span::{Position, Span};

    const SAMPLE: &str = "\
package main

// Example of poorly aligned struct
type BadLayout struct {
	A bool    // 1 byte
	B int64   // 8 bytes

	// C is a flag
	C bool
}

type Tagged struct {
	ID   uint64 `json:\"id\"`
	Name string `json:\"name,omitempty\"` // display name
}
";

    fn field_names(record: &RecordDeclaration) -> Vec<&str> {
        record.fields.iter().map(|field| field.name.as_str()).collect()
    }

    #[test]
    fn test_parses_declarations_in_order() {
        let records = parse(SAMPLE);
        assert_eq!(records.len(), 2);

        let bad = &records[0];
        assert_eq!(bad.name, "BadLayout");
        assert_eq!(bad.name_span, Span::on_line(3, 5, 9));
        assert_eq!(field_names(bad), ["A", "B", "C"]);
        assert_eq!(bad.fields[1].type_expression, "int64");
        assert_eq!(bad.fields[1].location, Span::on_line(5, 1, 1));
        assert_eq!(bad.span, Span::new(Position::new(3, 0), Position::new(9, 1)));

        let tagged = &records[1];
        assert_eq!(field_names(tagged), ["ID", "Name"]);
        assert_eq!(tagged.fields[0].type_expression, "uint64");
        assert_eq!(tagged.fields[1].type_expression, "string");
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse(SAMPLE), parse(SAMPLE));
    }

    #[test]
    fn test_multi_name_field_keeps_first_name() {
        let records = parse("type Point struct {\n\tp, q float64\n}\n");
        let fields = &records[0].fields;
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "p");
        assert_eq!(fields[0].type_expression, "float64");
    }

    #[test]
    fn test_embedded_pointer_field() {
        let records = parse("type Derived struct {\n\t*pkg.Base\n\tName string\n}\n");
        let base = &records[0].fields[0];
        assert_eq!(base.name, "Base");
        assert_eq!(base.type_expression, "*pkg.Base");
        assert_eq!(base.location, Span::on_line(1, 6, 4));
    }

    #[test]
    fn test_unterminated_declaration_is_clamped() {
        let source = "type Broken struct {\n\tA int32\n\tB string\n\n\tC";
        let records = parse(source);
        assert_eq!(records.len(), 1);
        assert_eq!(field_names(&records[0]), ["A", "B", "C"]);
        assert_eq!(records[0].span.end, Position::new(4, 2));
    }

    #[test]
    fn test_header_without_brace_is_discarded() {
        assert!(parse("type Dangling struct\n// nothing follows").is_empty());
    }

    #[test]
    fn test_brace_on_following_line() {
        let records = parse("type Late struct\n{\n\tX int\n}\n");
        assert_eq!(records.len(), 1);
        assert_eq!(field_names(&records[0]), ["X"]);
        assert_eq!(records[0].span.end.line, 3);
    }

    #[test]
    fn test_single_line_declarations() {
        let records = parse("type Empty struct{}\ntype P struct { X, Y int; Label string }\n");
        assert_eq!(records.len(), 2);
        assert!(records[0].fields.is_empty());
        assert_eq!(records[0].span.end.line, 0);
        assert_eq!(field_names(&records[1]), ["X", "Label"]);
        assert_eq!(records[1].fields[0].location, Span::on_line(1, 16, 1));
    }

    #[test]
    fn test_block_comments_are_skipped() {
        let source = "\
type Commented struct {
	/* Hidden int
	   Also hidden */
	Visible int
	/* one line */
	Other bool
}";
        let records = parse(source);
        assert_eq!(field_names(&records[0]), ["Visible", "Other"]);
    }

    #[test]
    fn test_grouped_and_generic_declarations() {
        let source = "\
type (
	First struct {
		A int
	}
	Second struct {
		B []byte
	}
)

type Pair[K comparable, V any] struct {
	Key   K
	Value V
}";
        let records = parse(source);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Pair"]);
        assert_eq!(records[1].fields[0].type_expression, "[]byte");
        assert_eq!(field_names(&records[2]), ["Key", "Value"]);
    }

    #[test]
    fn test_unrecognised_lines_are_skipped() {
        let source = "type Odd struct {\n\tList[int]\n\tOk int\n\ta, 9 int\n}\n";
        let records = parse(source);
        assert_eq!(field_names(&records[0]), ["Ok"]);
    }

    #[test]
    fn test_windows_line_endings() {
        let records = parse("type W struct {\r\n\tA int8\r\n}\r\n");
        assert_eq!(records[0].fields[0].type_expression, "int8");
        assert_eq!(records[0].span.end, Position::new(2, 1));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("package main\n\nfunc main() {}\n").is_empty());
    }
}
