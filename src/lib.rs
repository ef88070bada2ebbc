//! Go struct layout analysis.
//!
//! Parses struct declarations out of Go source text, computes field offsets
//! and padding for a target word size, and reports records whose size a
//! different field order would reduce.

pub mod analysis;
pub mod report;
pub mod sources;

pub use analysis::{Analyzer, DocumentAnalysis, HoverTarget, RecordAnalysis};
pub use structlens_config::{AnalyzerConfig, ConfigError, TargetArch};
pub use structlens_layout::{FieldLayout, OptimalityReport, RecordLayout, TypeInfo, WordSize};
pub use structlens_parser::{Field, MultiNamePolicy, RecordDeclaration};
pub use structlens_span::{Position, Span};
