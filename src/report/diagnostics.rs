use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use serde::Serialize;
use structlens_config::AnalyzerConfig;
use structlens_span::{Position, Span};

use crate::analysis::{DocumentAnalysis, RecordAnalysis};

pub const OPTIMIZATION_CODE: &str = "struct-layout-optimization";
pub const DIAGNOSTIC_SOURCE: &str = "structlens";

/// A record whose size a different field order would reduce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutWarning {
    pub record_name: String,
    /// Span of the record name.
    pub span: Span,
    pub code: &'static str,
    pub source: &'static str,
    pub message: String,
    pub current_size: usize,
    pub optimal_size: usize,
    pub suggested_order: Vec<String>,
}

impl LayoutWarning {
    fn for_record(record: &RecordAnalysis) -> Self {
        let report = &record.optimality;
        Self {
            record_name: record.name().to_string(),
            span: record.declaration.name_span,
            code: OPTIMIZATION_CODE,
            source: DIAGNOSTIC_SOURCE,
            message: format!(
                "Struct layout can be optimized: {} bytes → {} bytes (saves {} bytes)",
                report.current_size,
                report.optimal_size,
                report.savings()
            ),
            current_size: report.current_size,
            optimal_size: report.optimal_size,
            suggested_order: report.suggested_order.clone(),
        }
    }

    pub fn savings(&self) -> usize {
        self.current_size.saturating_sub(self.optimal_size)
    }
}

pub fn optimization_warnings(
    analysis: &DocumentAnalysis,
    config: &AnalyzerConfig,
) -> Vec<LayoutWarning> {
    if !config.enable_optimization_warnings {
        return Vec::new();
    }
    analysis
        .optimizable()
        .map(LayoutWarning::for_record)
        .collect()
}

/// Renders `warnings` as source-annotated reports against `source`.
pub fn render_warnings(
    path: &str,
    source: &str,
    warnings: &[LayoutWarning],
    color: bool,
) -> std::io::Result<String> {
    let mut out = Vec::new();
    for warning in warnings {
        let range = char_range(source, warning.span);
        Report::build(ReportKind::Warning, path, range.start)
            .with_code(warning.code)
            .with_message(&warning.message)
            .with_label(
                Label::new((path, range))
                    .with_message(format!(
                        "reorder as: {}",
                        warning.suggested_order.join(", ")
                    ))
                    .with_color(Color::Yellow),
            )
            .with_config(Config::default().with_color(color))
            .finish()
            .write((path, Source::from(source)), &mut out)?;
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Char offsets of `span` within `source`, the unit ariadne counts in.
fn char_range(source: &str, span: Span) -> Range<usize> {
    char_offset(source, span.start)..char_offset(source, span.end)
}

fn char_offset(source: &str, position: Position) -> usize {
    let preceding: usize = source
        .split('\n')
        .take(position.line)
        .map(|line| line.chars().count() + 1)
        .sum();
    preceding + position.column
}
