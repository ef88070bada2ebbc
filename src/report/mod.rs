//! Human-readable output built from a [`DocumentAnalysis`](crate::DocumentAnalysis).
//!
//! The analysis crates produce numbers only; every string shown to a user is
//! assembled here.

pub mod annotations;
pub mod diagnostics;
pub mod text;

pub use annotations::{Annotation, AnnotationKind, annotations};
pub use diagnostics::{LayoutWarning, optimization_warnings, render_warnings};
pub use text::{
    field_annotation, field_hover, field_tooltip, memory_layout_text, record_annotation,
    record_hover,
};

use crate::analysis::HoverTarget;

/// Hover text for whatever [`DocumentAnalysis::hover_at`](crate::DocumentAnalysis::hover_at) found.
pub fn hover_text(target: HoverTarget<'_>) -> String {
    match target {
        HoverTarget::Field {
            record,
            field,
            layout,
        } => field_hover(record, field, layout),
        HoverTarget::Record(record) => record_hover(record),
    }
}
