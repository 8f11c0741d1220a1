use super::binders::{CollectionBinderProvider, DictionaryBinderProvider, SimpleTypeBinderProvider};
use super::context::{BindingContext, BindingResult};
use super::field_binder::FieldModelBinderProvider;
use super::metadata::ModelMetadata;
use super::value_provider::ValueProvider;
use super::{BindingError, ModelBinder, ModelBinderProvider};

/// Ordered list of binder providers. The first provider that accepts a
/// declared type supplies its binder.
#[derive(Debug, Default)]
pub struct BinderRegistry {
    providers: Vec<Box<dyn ModelBinderProvider>>,
}

impl BinderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text, list and dictionary binding, with the field binder ahead of them.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.push(Box::new(SimpleTypeBinderProvider));
        registry.push(Box::new(CollectionBinderProvider));
        registry.push(Box::new(DictionaryBinderProvider));
        registry.insert(0, Box::new(FieldModelBinderProvider));
        registry
    }

    pub fn push(&mut self, provider: Box<dyn ModelBinderProvider>) {
        self.providers.push(provider);
    }

    /// Panics if `index > len`, like `Vec::insert`.
    pub fn insert(&mut self, index: usize, provider: Box<dyn ModelBinderProvider>) {
        self.providers.insert(index, provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn create_binder(&self, metadata: &ModelMetadata) -> Result<Box<dyn ModelBinder>, BindingError> {
        for provider in &self.providers {
            if let Some(binder) = provider.binder_for(metadata, self)? {
                return Ok(binder);
            }
        }
        Err(BindingError::NoBinder(metadata.model_type))
    }

    /// Binds an action parameter. Uses the parameter name as prefix when the
    /// values carry it (`list[0].Value`), otherwise the empty prefix (`[0].Value`).
    pub fn bind_parameter(
        &self,
        name: &str,
        metadata: &ModelMetadata,
        values: &dyn ValueProvider,
    ) -> Result<BindingResult, BindingError> {
        let binder = self.create_binder(metadata)?;
        let prefix = if values.contains_prefix(name) { name } else { "" };
        let ctx = BindingContext::new(name, prefix, metadata, values);
        Ok(binder.bind(&ctx))
    }
}
