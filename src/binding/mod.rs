//! Form binding: turns submitted form values into typed models.
//!
//! A [`BinderRegistry`] holds an ordered list of [`ModelBinderProvider`]s.
//! Each provider looks at the declared [`ModelType`] of a target and either
//! supplies a [`ModelBinder`] or declines, leaving the choice to the next
//! provider. Binders read raw strings through a [`ValueProvider`].

use std::collections::BTreeMap;
use std::fmt;

use crate::models::Model;

pub mod binders;
pub mod context;
pub mod field_binder;
pub mod metadata;
pub mod registry;
pub mod value_provider;

pub use self::context::{BindingContext, BindingResult, BoundValue};
pub use self::field_binder::{FieldModelBinder, FieldModelBinderProvider};
pub use self::metadata::{ModelMetadata, ModelType};
pub use self::registry::BinderRegistry;
pub use self::value_provider::{CompositeValueProvider, FormValueProvider, ValueProvider};

/// Binds one target from the values in a [`BindingContext`].
pub trait ModelBinder: Send + Sync + fmt::Debug {
    fn bind(&self, ctx: &BindingContext<'_>) -> BindingResult;
}

/// Picks a binder for a declared type, or returns `Ok(None)` to decline.
pub trait ModelBinderProvider: Send + Sync + fmt::Debug {
    fn binder_for(
        &self,
        metadata: &ModelMetadata,
        registry: &BinderRegistry,
    ) -> Result<Option<Box<dyn ModelBinder>>, BindingError>;
}

/// Misconfigured binding metadata or registry. These are programming
/// errors, not bad input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    NoBinder(ModelType),
    MissingProperty { model_type: ModelType, property: &'static str },
    MissingElement(ModelType),
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::NoBinder(t) => write!(f, "No model binder registered for {t}"),
            BindingError::MissingProperty { model_type, property } => {
                write!(f, "Metadata for {model_type} has no '{property}' property")
            }
            BindingError::MissingElement(t) => write!(f, "Metadata for {t} has no element type"),
        }
    }
}

impl std::error::Error for BindingError {}

/// Binds parameter `name` as a list of fields. Unset fields are left out.
pub fn bind_field_list(
    registry: &BinderRegistry,
    name: &str,
    values: &dyn ValueProvider,
) -> Result<Vec<Model>, BindingError> {
    let metadata = ModelMetadata::list_of(ModelMetadata::field());
    let list = match registry.bind_parameter(name, &metadata, values)? {
        BindingResult::Success(BoundValue::List(items)) => {
            items.into_iter().filter_map(BoundValue::into_field).collect()
        }
        _ => Vec::new(),
    };
    Ok(list)
}

/// Binds parameter `name` as a key-to-field dictionary. Unset fields are left out.
pub fn bind_field_map(
    registry: &BinderRegistry,
    name: &str,
    values: &dyn ValueProvider,
) -> Result<BTreeMap<String, Model>, BindingError> {
    let metadata = ModelMetadata::dictionary_of(ModelMetadata::field());
    let map = match registry.bind_parameter(name, &metadata, values)? {
        BindingResult::Success(BoundValue::Dictionary(entries)) => entries
            .into_iter()
            .filter_map(|(key, value)| value.into_field().map(|model| (key, model)))
            .collect(),
        _ => BTreeMap::new(),
    };
    Ok(map)
}
