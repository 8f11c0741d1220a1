//! Default binders for text, lists and string-keyed dictionaries.

use std::collections::BTreeMap;

use super::context::{BindingContext, BindingResult, BoundValue};
use super::metadata::{ModelMetadata, ModelType, index_model_name, property_model_name};
use super::registry::BinderRegistry;
use super::{BindingError, ModelBinder, ModelBinderProvider};

/// Key listing explicit collection indices (`list.index=0&list.index=5`).
pub const INDEX_KEY: &str = "index";

/// Binds text straight from the value under the model name.
#[derive(Debug, Default)]
pub struct SimpleTypeBinder;

impl ModelBinder for SimpleTypeBinder {
    fn bind(&self, ctx: &BindingContext<'_>) -> BindingResult {
        match ctx.values.get_value(&ctx.model_name) {
            Some(value) => BindingResult::Success(BoundValue::Text(value.to_string())),
            None => BindingResult::NotSet,
        }
    }
}

#[derive(Debug, Default)]
pub struct SimpleTypeBinderProvider;

impl ModelBinderProvider for SimpleTypeBinderProvider {
    fn binder_for(
        &self,
        metadata: &ModelMetadata,
        _registry: &BinderRegistry,
    ) -> Result<Option<Box<dyn ModelBinder>>, BindingError> {
        Ok(match metadata.model_type {
            ModelType::Text => Some(Box::new(SimpleTypeBinder)),
            _ => None,
        })
    }
}

/// Binds `prefix[i]` elements in index order. Elements that bind to nothing are skipped.
#[derive(Debug)]
pub struct CollectionBinder {
    element_binder: Box<dyn ModelBinder>,
    element_metadata: ModelMetadata,
}

impl CollectionBinder {
    pub fn new(element_binder: Box<dyn ModelBinder>, element_metadata: ModelMetadata) -> Self {
        Self { element_binder, element_metadata }
    }

    fn bind_element(&self, ctx: &BindingContext<'_>, index: &str) -> Option<BoundValue> {
        let model_name = index_model_name(&ctx.model_name, index);
        let element_ctx = ctx.nested(&self.element_metadata, format!("[{index}]"), model_name);
        let value = self.element_binder.bind(&element_ctx).into_value();
        if value.is_none() {
            log::debug!("Skipping '{}': nothing bound", element_ctx.model_name);
        }
        value
    }
}

impl ModelBinder for CollectionBinder {
    fn bind(&self, ctx: &BindingContext<'_>) -> BindingResult {
        if !ctx.values.contains_prefix(&ctx.model_name) {
            return BindingResult::NotSet;
        }

        let explicit = ctx.values.get_values(&property_model_name(&ctx.model_name, INDEX_KEY));
        let mut items = Vec::new();

        if explicit.is_empty() {
            // Sequential indices stop at the first gap.
            for index in 0usize.. {
                let index = index.to_string();
                if !ctx.values.contains_prefix(&index_model_name(&ctx.model_name, &index)) {
                    break;
                }
                items.extend(self.bind_element(ctx, &index));
            }
        } else {
            for index in explicit {
                items.extend(self.bind_element(ctx, index));
            }
        }

        log::debug!("Bound {} element(s) for '{}'", items.len(), ctx.field_name);
        BindingResult::Success(BoundValue::List(items))
    }
}

#[derive(Debug, Default)]
pub struct CollectionBinderProvider;

impl ModelBinderProvider for CollectionBinderProvider {
    fn binder_for(
        &self,
        metadata: &ModelMetadata,
        registry: &BinderRegistry,
    ) -> Result<Option<Box<dyn ModelBinder>>, BindingError> {
        if metadata.model_type != ModelType::List {
            return Ok(None);
        }
        let element = metadata.element().ok_or(BindingError::MissingElement(metadata.model_type))?;
        let element_binder = registry.create_binder(element)?;
        Ok(Some(Box::new(CollectionBinder::new(element_binder, element.clone()))))
    }
}

/// Binds `prefix[key]` entries, one per distinct key; the key doubles as field name.
#[derive(Debug)]
pub struct DictionaryBinder {
    element_binder: Box<dyn ModelBinder>,
    element_metadata: ModelMetadata,
}

impl DictionaryBinder {
    pub fn new(element_binder: Box<dyn ModelBinder>, element_metadata: ModelMetadata) -> Self {
        Self { element_binder, element_metadata }
    }
}

impl ModelBinder for DictionaryBinder {
    fn bind(&self, ctx: &BindingContext<'_>) -> BindingResult {
        if !ctx.values.contains_prefix(&ctx.model_name) {
            return BindingResult::NotSet;
        }

        let mut entries = BTreeMap::new();
        for key in ctx.values.child_keys(&ctx.model_name) {
            if key.is_empty() {
                continue;
            }
            let model_name = index_model_name(&ctx.model_name, &key);
            let entry_ctx = ctx.nested(&self.element_metadata, key.as_str(), model_name);
            match self.element_binder.bind(&entry_ctx) {
                BindingResult::Success(value) => {
                    entries.insert(key, value);
                }
                BindingResult::NotSet => {
                    log::debug!("Skipping '{}': nothing bound", entry_ctx.model_name);
                }
            }
        }

        log::debug!("Bound {} entries for '{}'", entries.len(), ctx.field_name);
        BindingResult::Success(BoundValue::Dictionary(entries))
    }
}

#[derive(Debug, Default)]
pub struct DictionaryBinderProvider;

impl ModelBinderProvider for DictionaryBinderProvider {
    fn binder_for(
        &self,
        metadata: &ModelMetadata,
        registry: &BinderRegistry,
    ) -> Result<Option<Box<dyn ModelBinder>>, BindingError> {
        if metadata.model_type != ModelType::Dictionary {
            return Ok(None);
        }
        let element = metadata.element().ok_or(BindingError::MissingElement(metadata.model_type))?;
        let element_binder = registry.create_binder(element)?;
        Ok(Some(Box::new(DictionaryBinder::new(element_binder, element.clone()))))
    }
}
