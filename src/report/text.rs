//! Plain-text renderings of a layout.

use std::fmt::Write;

use structlens_layout::{FieldLayout, RecordLayout};
use structlens_parser::Field;

use crate::analysis::RecordAnalysis;

/// One line per field, with explicit lines for padding holes.
///
/// ```text
/// [00-00] A (1 bytes)
/// [01] padding (7 bytes)
/// [08-15] B (8 bytes)
/// ```
pub fn memory_layout_text(layout: &RecordLayout) -> String {
    let mut text = String::new();
    let mut cursor = 0;

    for field in &layout.fields {
        if field.padding_before > 0 {
            let _ = writeln!(text, "[{cursor:02}] padding ({} bytes)", field.padding_before);
        }
        if field.size == 0 {
            let _ = writeln!(text, "[{:02}] {} (0 bytes)", field.offset, field.field_name);
        } else {
            let _ = writeln!(
                text,
                "[{:02}-{:02}] {} ({} bytes)",
                field.offset,
                field.end() - 1,
                field.field_name,
                field.size
            );
        }
        cursor = field.end();
    }

    let trailing = layout.trailing_padding();
    if trailing > 0 {
        let _ = writeln!(text, "[{cursor:02}] final padding ({trailing} bytes)");
    }
    text
}

/// Short label shown after a field name, e.g. `1B` or `8B (+7B padding)`.
pub fn field_annotation(field: &FieldLayout) -> String {
    if field.padding_before > 0 {
        format!("{}B (+{}B padding)", field.size, field.padding_before)
    } else {
        format!("{}B", field.size)
    }
}

pub fn record_annotation(layout: &RecordLayout) -> String {
    format!("{} bytes total", layout.total_size)
}

pub fn field_tooltip(field: &FieldLayout) -> String {
    let mut tooltip = format!(
        "Size: {} bytes\nAlignment: {} bytes\nOffset: {} bytes",
        field.size, field.alignment, field.offset
    );
    if field.padding_before > 0 {
        let _ = write!(tooltip, "\nPadding before: {} bytes", field.padding_before);
    }
    tooltip
}

/// Markdown hover for a single field.
pub fn field_hover(record: &RecordAnalysis, field: &Field, layout: &FieldLayout) -> String {
    let mut hover = format!("**{}** `{}`\n\n", field.name, field.type_expression);
    let _ = writeln!(hover, "• **Size:** {} bytes", layout.size);
    let _ = writeln!(hover, "• **Alignment:** {} bytes", layout.alignment);
    let _ = writeln!(hover, "• **Offset:** {} bytes", layout.offset);
    if layout.padding_before > 0 {
        let _ = writeln!(hover, "• **Padding before:** {} bytes", layout.padding_before);
    }
    let _ = write!(
        hover,
        "\n---\n*Struct {} total size: {} bytes*",
        record.name(),
        record.layout.total_size
    );
    hover
}

/// Markdown hover for a record name: totals followed by the memory layout.
pub fn record_hover(record: &RecordAnalysis) -> String {
    let layout = &record.layout;
    let mut hover = format!("**struct {}**\n\n", record.name());
    let _ = writeln!(hover, "• **Total size:** {} bytes", layout.total_size);
    let _ = writeln!(hover, "• **Alignment:** {} bytes", layout.record_alignment);
    let _ = writeln!(hover, "• **Fields:** {}\n", layout.fields.len());
    if record.optimality.is_optimizable {
        let _ = writeln!(
            hover,
            "• **Optimal size:** {} bytes (order: {})\n",
            record.optimality.optimal_size,
            record.optimality.suggested_order.join(", ")
        );
    }
    let _ = write!(
        hover,
        "**Memory Layout:**\n```text\n{}```",
        memory_layout_text(layout)
    );
    hover
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;

    const PADDED: &str = "type Padded struct {\n\tA bool\n\tB int64\n\tC bool\n}\n";

    #[test]
    fn test_memory_layout_text() {
        let analysis = Analyzer::default().analyze(PADDED);
        let text = memory_layout_text(&analysis.records[0].layout);
        assert_eq!(
            text,
            "[00-00] A (1 bytes)\n\
             [01] padding (7 bytes)\n\
             [08-15] B (8 bytes)\n\
             [16-16] C (1 bytes)\n\
             [17] final padding (7 bytes)\n"
        );
    }

    #[test]
    fn test_memory_layout_text_zero_sized_field() {
        let analysis = Analyzer::default().analyze("type Z struct {\n\tm [0]int64\n\tb bool\n}\n");
        let text = memory_layout_text(&analysis.records[0].layout);
        assert_eq!(
            text,
            "[00] m (0 bytes)\n[00-00] b (1 bytes)\n[01] final padding (7 bytes)\n"
        );
    }

    #[test]
    fn test_field_labels() {
        let analysis = Analyzer::default().analyze(PADDED);
        let record = &analysis.records[0];
        let a = &record.layout.fields[0];
        let b = &record.layout.fields[1];

        assert_eq!(field_annotation(a), "1B");
        assert_eq!(field_annotation(b), "8B (+7B padding)");
        assert_eq!(record_annotation(&record.layout), "24 bytes total");
        assert_eq!(
            field_tooltip(a),
            "Size: 1 bytes\nAlignment: 1 bytes\nOffset: 0 bytes"
        );
        assert_eq!(
            field_tooltip(b),
            "Size: 8 bytes\nAlignment: 8 bytes\nOffset: 8 bytes\nPadding before: 7 bytes"
        );
    }

    #[test]
    fn test_hovers() {
        let analysis = Analyzer::default().analyze(PADDED);
        let record = &analysis.records[0];
        let (field, layout) = record.field_layouts().nth(1).unwrap();

        let hover = field_hover(record, field, layout);
        assert!(hover.starts_with("**B** `int64`\n\n"));
        assert!(hover.contains("• **Padding before:** 7 bytes\n"));
        assert!(hover.ends_with("*Struct Padded total size: 24 bytes*"));

        let hover = record_hover(record);
        assert!(hover.starts_with("**struct Padded**\n\n• **Total size:** 24 bytes\n"));
        assert!(hover.contains("• **Fields:** 3\n"));
        assert!(hover.contains("• **Optimal size:** 16 bytes (order: B, A, C)"));
        assert!(hover.contains("[17] final padding (7 bytes)\n```"));
    }
}
