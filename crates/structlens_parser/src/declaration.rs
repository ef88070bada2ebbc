use serde::Serialize;
use structlens_span::Span;

/// One field as written in a record body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    /// Raw type text, e.g. `map[string][]int` or `*pkg.Base`.
    pub type_expression: String,
    /// Covers the field name on its line.
    pub location: Span,
}

/// A named `struct` declaration and its fields in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDeclaration {
    pub name: String,
    pub name_span: Span,
    pub fields: Vec<Field>,
    /// From column 0 of the header line to the end of the closing-brace line.
    pub span: Span,
}

impl RecordDeclaration {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}
