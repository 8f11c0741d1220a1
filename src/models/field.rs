/// Form key suffix under which a field's text is submitted (`[0].Value`, `list[x].Value`).
pub const VALUE_PROPERTY: &str = "Value";

/// A single submitted form field: the name it was bound under and its text.
///
/// Only ever built from a value the form actually carried, so `value` is
/// always present. An empty string is a real, submitted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub field_name: String,
    pub value: String,
}

impl Model {
    pub fn new(field_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            value: value.into(),
        }
    }
}
