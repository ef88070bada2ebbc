//! Field reordering that minimises record size.
//!
//! Fields are placed by descending alignment, ties broken by descending size.
//! With power-of-two alignments and sizes that are multiples of their
//! alignment (true for every type the engine produces) this order never
//! leaves inter-field padding, so only the unavoidable trailing padding
//! remains.

use serde::Serialize;

use crate::record::{FieldLayout, RecordLayout, Slot, pack};
use crate::type_info::TypeInfo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimalityReport {
    pub current_size: usize,
    pub optimal_size: usize,
    pub is_optimizable: bool,
    /// Field names in the order that achieves `optimal_size`.
    pub suggested_order: Vec<String>,
}

impl OptimalityReport {
    pub fn for_layout(layout: &RecordLayout) -> Self {
        let optimal = optimal_layout(layout);
        Self {
            current_size: layout.total_size,
            optimal_size: optimal.total_size,
            is_optimizable: optimal.total_size < layout.total_size,
            suggested_order: optimal
                .fields
                .into_iter()
                .map(|field| field.field_name)
                .collect(),
        }
    }

    /// Bytes saved by adopting the suggested order.
    pub fn savings(&self) -> usize {
        self.current_size.saturating_sub(self.optimal_size)
    }
}

/// The fields of `layout` in size-minimising order. Equal keys keep their
/// declared order.
pub fn optimal_order(layout: &RecordLayout) -> Vec<&FieldLayout> {
    let mut fields: Vec<_> = layout.fields.iter().collect();
    fields.sort_by(|a, b| {
        b.alignment
            .cmp(&a.alignment)
            .then_with(|| b.size.cmp(&a.size))
    });
    fields
}

/// Repacks `layout` in [`optimal_order`]. The input is left untouched.
pub fn optimal_layout(layout: &RecordLayout) -> RecordLayout {
    let slots = optimal_order(layout).into_iter().map(|field| Slot {
        name: field.field_name.clone(),
        type_expression: field.type_expression.clone(),
        info: TypeInfo::new(field.size, field.alignment),
    });
    pack(&layout.record_name, slots)
}
