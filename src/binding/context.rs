use std::collections::BTreeMap;

use crate::models::Model;

use super::metadata::ModelMetadata;
use super::value_provider::ValueProvider;

/// What a binder sees for one bind attempt.
pub struct BindingContext<'a> {
    /// Name reported back to the caller (`"[0]"`, `"x"`, or a parameter name).
    pub field_name: String,
    /// Full form key prefix of the value being bound (`"list[0]"`).
    pub model_name: String,
    pub metadata: &'a ModelMetadata,
    pub values: &'a dyn ValueProvider,
}

impl<'a> BindingContext<'a> {
    pub fn new(
        field_name: impl Into<String>,
        model_name: impl Into<String>,
        metadata: &'a ModelMetadata,
        values: &'a dyn ValueProvider,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            model_name: model_name.into(),
            metadata,
            values,
        }
    }

    /// Child scope over the same values, for a property or element.
    pub fn nested<'b>(
        &'b self,
        metadata: &'b ModelMetadata,
        field_name: impl Into<String>,
        model_name: impl Into<String>,
    ) -> BindingContext<'b> {
        BindingContext {
            field_name: field_name.into(),
            model_name: model_name.into(),
            metadata,
            values: self.values,
        }
    }
}

/// A value produced by a binder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    Text(String),
    Field(Model),
    List(Vec<BoundValue>),
    Dictionary(BTreeMap<String, BoundValue>),
}

impl BoundValue {
    pub fn into_field(self) -> Option<Model> {
        match self {
            BoundValue::Field(m) => Some(m),
            _ => None,
        }
    }
}

/// Outcome of one bind attempt. `NotSet` is not an error: the caller omits the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingResult {
    NotSet,
    Success(BoundValue),
}

impl BindingResult {
    pub fn into_value(self) -> Option<BoundValue> {
        match self {
            BindingResult::Success(v) => Some(v),
            BindingResult::NotSet => None,
        }
    }
}
