//! Binds a [`Model`] from its submitted `Value`, naming it after the field it
//! was bound under.

use crate::models::{Model, VALUE_PROPERTY};

use super::context::{BindingContext, BindingResult, BoundValue};
use super::metadata::{ModelMetadata, ModelType, property_model_name};
use super::registry::BinderRegistry;
use super::{BindingError, ModelBinder, ModelBinderProvider};

/// Wraps the binder for the `Value` property: when it yields a string the
/// result is `Model { field_name: ctx.field_name, value }`, otherwise nothing.
#[derive(Debug)]
pub struct FieldModelBinder {
    value_binder: Box<dyn ModelBinder>,
    value_metadata: ModelMetadata,
}

impl FieldModelBinder {
    pub fn new(value_binder: Box<dyn ModelBinder>, value_metadata: ModelMetadata) -> Self {
        Self { value_binder, value_metadata }
    }
}

impl ModelBinder for FieldModelBinder {
    fn bind(&self, ctx: &BindingContext<'_>) -> BindingResult {
        let model_name = property_model_name(&ctx.model_name, VALUE_PROPERTY);
        let value_ctx = ctx.nested(&self.value_metadata, VALUE_PROPERTY, model_name);

        let value = match self.value_binder.bind(&value_ctx) {
            BindingResult::Success(BoundValue::Text(value)) => value,
            _ => {
                log::trace!("No value set for '{}'", value_ctx.model_name);
                return BindingResult::NotSet;
            }
        };

        log::debug!("Bound field '{}' from '{}'", ctx.field_name, value_ctx.model_name);
        BindingResult::Success(BoundValue::Field(Model {
            field_name: ctx.field_name.clone(),
            value,
        }))
    }
}

/// Selects [`FieldModelBinder`] when the declared type is exactly `Field`;
/// declines for everything else.
#[derive(Debug, Default)]
pub struct FieldModelBinderProvider;

impl ModelBinderProvider for FieldModelBinderProvider {
    fn binder_for(
        &self,
        metadata: &ModelMetadata,
        registry: &BinderRegistry,
    ) -> Result<Option<Box<dyn ModelBinder>>, BindingError> {
        if metadata.model_type != ModelType::Field {
            return Ok(None);
        }

        let value_metadata = metadata
            .property(VALUE_PROPERTY)
            .ok_or(BindingError::MissingProperty {
                model_type: metadata.model_type,
                property: VALUE_PROPERTY,
            })?;
        let value_binder = registry.create_binder(value_metadata)?;

        Ok(Some(Box::new(FieldModelBinder::new(value_binder, value_metadata.clone()))))
    }
}
