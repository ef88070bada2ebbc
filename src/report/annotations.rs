use serde::Serialize;
use structlens_config::AnalyzerConfig;
use structlens_span::Position;

use super::text::{field_annotation, field_tooltip, memory_layout_text, record_annotation};
use crate::analysis::DocumentAnalysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Record,
    Field,
}

/// A label anchored right after a record or field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub position: Position,
    pub label: String,
    pub tooltip: String,
}

/// Inline annotations for every record and field, in document order within
/// each record. Empty when `show_inline_annotations` is off.
pub fn annotations(analysis: &DocumentAnalysis, config: &AnalyzerConfig) -> Vec<Annotation> {
    if !config.show_inline_annotations {
        return Vec::new();
    }

    let mut annotations = Vec::new();
    for record in &analysis.records {
        annotations.push(Annotation {
            kind: AnnotationKind::Record,
            position: record.declaration.name_span.end,
            label: record_annotation(&record.layout),
            tooltip: memory_layout_text(&record.layout),
        });

        annotations.extend(record.field_layouts().map(|(field, layout)| Annotation {
            kind: AnnotationKind::Field,
            position: field.location.end,
            label: field_annotation(layout),
            tooltip: field_tooltip(layout),
        }));
    }
    annotations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;

    const SOURCE: &str = "type Pair struct {\n\tflag bool\n\tcount int64\n}\n";

    #[test]
    fn test_annotations_follow_names() {
        let config = AnalyzerConfig::default();
        let analysis = Analyzer::new(&config).analyze(SOURCE);
        let annotations = annotations(&analysis, &config);

        let labels: Vec<_> = annotations
            .iter()
            .map(|a| (a.kind, a.position, a.label.as_str()))
            .collect();
        assert_eq!(
            labels,
            [
                (AnnotationKind::Record, Position::new(0, 9), "16 bytes total"),
                (AnnotationKind::Field, Position::new(1, 5), "1B"),
                (AnnotationKind::Field, Position::new(2, 6), "8B (+7B padding)"),
            ]
        );
        assert!(annotations[2].tooltip.ends_with("Padding before: 7 bytes"));
    }

    #[test]
    fn test_annotations_disabled() {
        let config = AnalyzerConfig {
            show_inline_annotations: false,
            ..AnalyzerConfig::default()
        };
        let analysis = Analyzer::new(&config).analyze(SOURCE);
        assert!(annotations(&analysis, &config).is_empty());
    }
}
