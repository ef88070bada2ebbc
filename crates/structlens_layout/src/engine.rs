use structlens_parser::RecordDeclaration;
use tracing::trace;

use crate::optimizer::OptimalityReport;
use crate::record::{RecordLayout, Slot, pack};
use crate::type_info::{ScalarTable, TypeInfo, resolve, scalar_table};
use crate::word_size::WordSize;

/// Computes record layouts for one word size.
///
/// The scalar table is built once in [`LayoutEngine::new`] and only read
/// afterwards, so an engine can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    word_size: WordSize,
    scalars: ScalarTable,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(WordSize::default())
    }
}

impl LayoutEngine {
    pub fn new(word_size: WordSize) -> Self {
        Self {
            word_size,
            scalars: scalar_table(word_size),
        }
    }

    pub fn word_size(&self) -> WordSize {
        self.word_size
    }

    /// Size and alignment of a type expression. Never fails: anything the
    /// engine cannot size is treated as a word-sized opaque value.
    pub fn resolve(&self, type_expression: &str) -> TypeInfo {
        resolve(type_expression, self.word_size, &self.scalars)
    }

    /// Lays out `declaration` in its declared field order.
    pub fn compute_layout(&self, declaration: &RecordDeclaration) -> RecordLayout {
        let slots = declaration.fields.iter().map(|field| {
            let info = self.resolve(&field.type_expression);
            trace!(
                record = %declaration.name,
                field = %field.name,
                type_expression = %field.type_expression,
                size = info.size,
                alignment = info.alignment,
                "resolved field type"
            );
            Slot {
                name: field.name.clone(),
                type_expression: field.type_expression.clone(),
                info,
            }
        });
        pack(&declaration.name, slots)
    }

    /// Current versus best achievable size for `declaration`.
    pub fn optimality(&self, declaration: &RecordDeclaration) -> OptimalityReport {
        OptimalityReport::for_layout(&self.compute_layout(declaration))
    }
}
