use std::fmt;

use crate::models::VALUE_PROPERTY;

/// Declared type of a binding target. Binder providers dispatch on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    Text,
    /// The single-field [`crate::models::Model`].
    Field,
    List,
    Dictionary,
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelType::Text => write!(f, "text"),
            ModelType::Field => write!(f, "field"),
            ModelType::List => write!(f, "list"),
            ModelType::Dictionary => write!(f, "dictionary"),
        }
    }
}

/// Static description of what is being bound: its declared type, its
/// properties (for `Field`) and its element type (for `List`/`Dictionary`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMetadata {
    pub model_type: ModelType,
    pub properties: Vec<PropertyMetadata>,
    pub element: Option<Box<ModelMetadata>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMetadata {
    pub name: &'static str,
    pub metadata: ModelMetadata,
}

impl ModelMetadata {
    fn leaf(model_type: ModelType) -> Self {
        Self { model_type, properties: Vec::new(), element: None }
    }

    pub fn text() -> Self {
        Self::leaf(ModelType::Text)
    }

    /// Metadata of `Model`: one text property named `Value`.
    pub fn field() -> Self {
        Self {
            model_type: ModelType::Field,
            properties: vec![PropertyMetadata { name: VALUE_PROPERTY, metadata: Self::text() }],
            element: None,
        }
    }

    pub fn list_of(element: ModelMetadata) -> Self {
        Self { element: Some(Box::new(element)), ..Self::leaf(ModelType::List) }
    }

    /// String-keyed dictionary of `element`.
    pub fn dictionary_of(element: ModelMetadata) -> Self {
        Self { element: Some(Box::new(element)), ..Self::leaf(ModelType::Dictionary) }
    }

    pub fn property(&self, name: &str) -> Option<&ModelMetadata> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.metadata)
    }

    pub fn element(&self) -> Option<&ModelMetadata> {
        self.element.as_deref()
    }
}

/// `prefix.property`, or just `property` at the top level.
pub fn property_model_name(prefix: &str, property: &str) -> String {
    if prefix.is_empty() {
        property.to_string()
    } else {
        format!("{prefix}.{property}")
    }
}

/// `prefix[index]`.
pub fn index_model_name(prefix: &str, index: &str) -> String {
    format!("{prefix}[{index}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_metadata_exposes_value_property() {
        let meta = ModelMetadata::field();
        assert_eq!(meta.model_type, ModelType::Field);
        assert_eq!(meta.property("Value").map(|m| m.model_type), Some(ModelType::Text));
        assert!(meta.property("FieldName").is_none());
    }

    #[test]
    fn model_names() {
        assert_eq!(property_model_name("", "Value"), "Value");
        assert_eq!(property_model_name("list[0]", "Value"), "list[0].Value");
        assert_eq!(index_model_name("", "3"), "[3]");
        assert_eq!(index_model_name("dictionary", "x"), "dictionary[x]");
    }
}
