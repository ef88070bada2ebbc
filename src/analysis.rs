//! Per-document analysis: parse once, lay out every record, and answer
//! position queries against the result.

use serde::Serialize;
use structlens_config::AnalyzerConfig;
use structlens_layout::{FieldLayout, LayoutEngine, OptimalityReport, RecordLayout};
use structlens_parser::{Field, Parser, RecordDeclaration};
use structlens_span::Position;
use tracing::debug;

/// Parser and layout engine configured for one target.
#[derive(Debug, Clone)]
pub struct Analyzer {
    parser: Parser,
    engine: LayoutEngine,
}

impl Analyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            parser: Parser::new(config.parse_options()),
            engine: LayoutEngine::new(config.word_size()),
        }
    }

    pub fn analyze(&self, source: &str) -> DocumentAnalysis {
        let records: Vec<RecordAnalysis> = self
            .parser
            .parse(source)
            .into_iter()
            .map(|declaration| {
                let layout = self.engine.compute_layout(&declaration);
                let optimality = OptimalityReport::for_layout(&layout);
                RecordAnalysis {
                    declaration,
                    layout,
                    optimality,
                }
            })
            .collect();

        debug!(
            records = records.len(),
            word_size = %self.engine.word_size(),
            "analyzed document"
        );
        DocumentAnalysis { records }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

/// Everything known about one struct declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordAnalysis {
    pub declaration: RecordDeclaration,
    pub layout: RecordLayout,
    pub optimality: OptimalityReport,
}

impl RecordAnalysis {
    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    /// Pairs each declared field with its computed placement.
    ///
    /// Pairing is by index: a record may repeat a field name (e.g. two `_`
    /// fields), so names are not a reliable key.
    pub fn field_layouts(&self) -> impl Iterator<Item = (&Field, &FieldLayout)> {
        self.declaration.fields.iter().zip(&self.layout.fields)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentAnalysis {
    pub records: Vec<RecordAnalysis>,
}

/// What sits under a cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget<'a> {
    Field {
        record: &'a RecordAnalysis,
        field: &'a Field,
        layout: &'a FieldLayout,
    },
    Record(&'a RecordAnalysis),
}

impl DocumentAnalysis {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, name: &str) -> Option<&RecordAnalysis> {
        self.records.iter().find(|record| record.name() == name)
    }

    /// First record whose declaration span contains `position`.
    pub fn record_at(&self, position: Position) -> Option<&RecordAnalysis> {
        self.records
            .iter()
            .find(|record| record.declaration.span.contains(position))
    }

    /// The field whose name covers `position`, or failing that the record
    /// whose name covers it.
    pub fn hover_at(&self, position: Position) -> Option<HoverTarget<'_>> {
        for record in &self.records {
            if !record.declaration.span.contains(position) {
                continue;
            }
            if let Some((field, layout)) = record
                .field_layouts()
                .find(|(field, _)| field.location.contains(position))
            {
                return Some(HoverTarget::Field {
                    record,
                    field,
                    layout,
                });
            }
            if record.declaration.name_span.contains(position) {
                return Some(HoverTarget::Record(record));
            }
        }
        None
    }

    pub fn optimizable(&self) -> impl Iterator<Item = &RecordAnalysis> {
        self.records
            .iter()
            .filter(|record| record.optimality.is_optimizable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use structlens_config::TargetArch;

    const SOURCE: &str = "\
package main

type Padded struct {
	A bool
	B int64
	C bool
}

type Tight struct {
	B int64
	A bool
	C bool
}
";

    #[test]
    fn test_analyze_lays_out_every_record() {
        let analysis = Analyzer::default().analyze(SOURCE);
        assert_eq!(analysis.records.len(), 2);

        let padded = analysis.record("Padded").unwrap();
        assert_eq!(padded.layout.total_size, 24);
        assert!(padded.optimality.is_optimizable);
        assert_eq!(padded.optimality.optimal_size, 16);

        let tight = analysis.record("Tight").unwrap();
        assert_eq!(tight.layout.total_size, 16);
        assert!(!tight.optimality.is_optimizable);

        let names: Vec<_> = analysis.optimizable().map(RecordAnalysis::name).collect();
        assert_eq!(names, ["Padded"]);
    }

    #[test]
    fn test_word_size_follows_architecture() {
        let config = AnalyzerConfig {
            architecture: TargetArch::i386(),
            ..AnalyzerConfig::default()
        };
        let analysis = Analyzer::new(&config).analyze("type P struct {\n\tp *int\n\tb bool\n}\n");
        assert_eq!(analysis.records[0].layout.total_size, 8);
    }

    #[test]
    fn test_field_layouts_pair_by_index() {
        let analysis = Analyzer::default().analyze("type U struct {\n\t_ int32\n\t_ int8\n}\n");
        let pairs: Vec<_> = analysis.records[0]
            .field_layouts()
            .map(|(field, layout)| (field.type_expression.as_str(), layout.offset))
            .collect();
        assert_eq!(pairs, [("int32", 0), ("int8", 4)]);
    }

    #[test]
    fn test_record_at() {
        let analysis = Analyzer::default().analyze(SOURCE);
        assert_eq!(analysis.record_at(Position::new(4, 0)).unwrap().name(), "Padded");
        assert_eq!(analysis.record_at(Position::new(12, 1)).unwrap().name(), "Tight");
        assert!(analysis.record_at(Position::new(7, 0)).is_none());
    }

    #[test]
    fn test_hover_at_field_and_record() {
        let analysis = Analyzer::default().analyze(SOURCE);

        match analysis.hover_at(Position::new(4, 1)) {
            Some(HoverTarget::Field { field, layout, .. }) => {
                assert_eq!(field.name, "B");
                assert_eq!(layout.offset, 8);
            }
            other => panic!("expected field hover, got {other:?}"),
        }

        match analysis.hover_at(Position::new(2, 7)) {
            Some(HoverTarget::Record(record)) => assert_eq!(record.name(), "Padded"),
            other => panic!("expected record hover, got {other:?}"),
        }

        // Type text and keywords are not hover targets.
        assert!(analysis.hover_at(Position::new(4, 4)).is_none());
        assert!(analysis.hover_at(Position::new(2, 0)).is_none());
    }
}
