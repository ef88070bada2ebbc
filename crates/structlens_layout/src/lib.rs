//! Go struct layout engine.
//!
//! Reproduces the sequential packing rule of the Go compiler for a 4- or
//! 8-byte word size: every field is placed at the next offset that satisfies
//! its alignment, in declaration order, and the record is padded to a
//! multiple of its largest field alignment. [`OptimalityReport`] tells whether
//! a different field order would make the record smaller.

mod engine;
pub mod optimizer;
pub mod record;
pub mod type_info;
mod word_size;

pub use engine::LayoutEngine;
pub use optimizer::{OptimalityReport, optimal_layout, optimal_order};
pub use record::{FieldLayout, RecordLayout};
pub use type_info::TypeInfo;
pub use word_size::WordSize;

use structlens_parser::RecordDeclaration;

/// Lays out `declaration` for `word_size`.
///
/// Builds a fresh [`LayoutEngine`]; callers laying out many records should
/// keep one engine around instead.
pub fn compute_layout(declaration: &RecordDeclaration, word_size: WordSize) -> RecordLayout {
    LayoutEngine::new(word_size).compute_layout(declaration)
}
