//! Sequential struct packing.

use serde::Serialize;

use crate::type_info::TypeInfo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldLayout {
    pub field_name: String,
    pub type_expression: String,
    pub size: usize,
    pub alignment: usize,
    /// Byte offset from the start of the record.
    pub offset: usize,
    /// Padding inserted right before this field to satisfy its alignment.
    pub padding_before: usize,
}

impl FieldLayout {
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordLayout {
    pub record_name: String,
    /// Same order as the declaration (or the reordering that produced it).
    pub fields: Vec<FieldLayout>,
    pub total_size: usize,
    pub record_alignment: usize,
}

impl RecordLayout {
    /// Offset just past the last field, before trailing padding.
    pub fn end_offset(&self) -> usize {
        self.fields.last().map_or(0, FieldLayout::end)
    }

    pub fn trailing_padding(&self) -> usize {
        self.total_size.saturating_sub(self.end_offset())
    }

    /// Inter-field plus trailing padding.
    pub fn total_padding(&self) -> usize {
        self.fields
            .iter()
            .fold(self.trailing_padding(), |sum, field| sum.saturating_add(field.padding_before))
    }

    /// Bytes occupied by field data alone.
    pub fn data_size(&self) -> usize {
        self.fields
            .iter()
            .fold(0, |sum: usize, field| sum.saturating_add(field.size))
    }

    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.fields.iter().find(|field| field.field_name == name)
    }
}

/// A field about to be placed: name, type text and resolved footprint.
pub(crate) struct Slot {
    pub name: String,
    pub type_expression: String,
    pub info: TypeInfo,
}

/// Bytes needed to move `offset` up to the next multiple of `alignment`.
pub(crate) fn padding_for(offset: usize, alignment: usize) -> usize {
    (alignment - offset % alignment) % alignment
}

/// Places every slot at the next offset satisfying its alignment, keeping
/// the given order, then rounds the total up to the largest alignment seen.
///
/// Offsets saturate at `usize::MAX` instead of wrapping.
pub(crate) fn pack<I>(record_name: &str, slots: I) -> RecordLayout
where
    I: IntoIterator<Item = Slot>,
{
    let mut offset = 0;
    let mut max_alignment = 1;
    let mut fields = Vec::new();

    for slot in slots {
        let TypeInfo { size, alignment } = slot.info;
        max_alignment = max_alignment.max(alignment);

        let padding = padding_for(offset, alignment);
        offset = offset.saturating_add(padding);

        fields.push(FieldLayout {
            field_name: slot.name,
            type_expression: slot.type_expression,
            size,
            alignment,
            offset,
            padding_before: padding,
        });

        offset = offset.saturating_add(size);
    }

    RecordLayout {
        record_name: record_name.to_string(),
        fields,
        total_size: offset.saturating_add(padding_for(offset, max_alignment)),
        record_alignment: max_alignment,
    }
}
