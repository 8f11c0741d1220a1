//! Binding tests: the field transform and its list/dictionary containers,
//! driven through the public registry API the handlers use.

use std::collections::BTreeMap;

use fieldname::binding::{
    self, BinderRegistry, BindingContext, BindingResult, BoundValue, FieldModelBinderProvider,
    FormValueProvider, ModelBinderProvider, ModelMetadata,
};
use fieldname::models::Model;

fn form(pairs: &[(&str, &str)]) -> FormValueProvider {
    FormValueProvider::new(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
}

#[test]
fn test_any_value_is_wrapped_under_its_field_name() {
    let registry = BinderRegistry::with_defaults();
    let binder = registry.create_binder(&ModelMetadata::field()).expect("field binder");
    let meta = ModelMetadata::field();

    for (name, value) in [("[0]", "a"), ("x", ""), ("[7]", "  spaced  "), ("key", "ünïcødé")] {
        let values = form(&[("item.Value", value)]);
        let ctx = BindingContext::new(name, "item", &meta, &values);
        assert_eq!(
            binder.bind(&ctx),
            BindingResult::Success(BoundValue::Field(Model::new(name, value))),
            "{name}"
        );
    }
}

#[test]
fn test_list_scenario_keeps_empty_but_set_value() {
    let registry = BinderRegistry::with_defaults();
    let values = form(&[("[0].Value", "a"), ("[1].Value", ""), ("[2].Value", "b")]);

    let list = binding::bind_field_list(&registry, "list", &values).expect("bind");
    assert_eq!(
        list,
        vec![Model::new("[0]", "a"), Model::new("[1]", ""), Model::new("[2]", "b")]
    );
}

#[test]
fn test_mapping_scenario() {
    let registry = BinderRegistry::with_defaults();
    let values = form(&[("[x].Value", "v1"), ("[y].Value", "v2")]);

    let map = binding::bind_field_map(&registry, "dictionary", &values).expect("bind");
    let expected: BTreeMap<String, Model> = [
        ("x".to_string(), Model::new("x", "v1")),
        ("y".to_string(), Model::new("y", "v2")),
    ]
    .into_iter()
    .collect();
    assert_eq!(map, expected);
}

#[test]
fn test_output_size_counts_only_fields_with_values() {
    let registry = BinderRegistry::with_defaults();

    // Every subset of three explicitly indexed slots carrying a value.
    for mask in 0u8..8 {
        let mut pairs: Vec<(String, String)> = (0..3)
            .map(|i| ("list.index".to_string(), i.to_string()))
            .collect();
        for i in 0..3 {
            if mask & (1 << i) != 0 {
                pairs.push((format!("list[{i}].Value"), format!("v{i}")));
            }
        }
        let values = FormValueProvider::new(pairs);

        let list = binding::bind_field_list(&registry, "list", &values).expect("bind");
        assert_eq!(list.len(), mask.count_ones() as usize, "mask {mask:03b}");
    }
}

#[test]
fn test_missing_value_yields_no_entry() {
    let registry = BinderRegistry::with_defaults();

    let values = form(&[("[a].Value", "1"), ("[b].Hint", "declared")]);
    let map = binding::bind_field_map(&registry, "dictionary", &values).expect("bind");
    assert_eq!(map.len(), 1);
    assert!(!map.contains_key("b"));

    let values = form(&[("index", "0"), ("index", "1"), ("[0].Hint", "declared"), ("[1].Value", "v")]);
    let list = binding::bind_field_list(&registry, "list", &values).expect("bind");
    assert_eq!(list, vec![Model::new("[1]", "v")]);
}

#[test]
fn test_binding_twice_gives_equal_but_separate_models() {
    let registry = BinderRegistry::with_defaults();
    let values = form(&[("[0].Value", "same")]);

    let first = binding::bind_field_list(&registry, "list", &values).expect("bind");
    let mut second = binding::bind_field_list(&registry, "list", &values).expect("bind");
    assert_eq!(first, second);

    second[0].value.push_str(" changed");
    assert_eq!(first[0].value, "same");
}

#[test]
fn test_field_provider_only_accepts_field_type() {
    let registry = BinderRegistry::with_defaults();
    let declined = [
        ModelMetadata::text(),
        ModelMetadata::list_of(ModelMetadata::field()),
        ModelMetadata::list_of(ModelMetadata::text()),
        ModelMetadata::dictionary_of(ModelMetadata::field()),
    ];
    for meta in &declined {
        let binder = FieldModelBinderProvider.binder_for(meta, &registry).expect("no error");
        assert!(binder.is_none(), "{:?}", meta.model_type);
        // The rest of the registry still handles it.
        assert!(registry.create_binder(meta).is_ok());
    }
}

#[test]
fn test_registry_without_field_provider_cannot_bind_fields() {
    let mut registry = BinderRegistry::new();
    registry.push(Box::new(binding::binders::SimpleTypeBinderProvider));
    registry.push(Box::new(binding::binders::CollectionBinderProvider));

    let values = form(&[("[0].Value", "a")]);
    let err = binding::bind_field_list(&registry, "list", &values).unwrap_err();
    assert_eq!(err.to_string(), "No model binder registered for field");
}

#[test]
fn test_prefixed_and_bare_keys_bind_the_same() {
    let registry = BinderRegistry::with_defaults();
    let bare = binding::bind_field_list(&registry, "list", &form(&[("[0].Value", "v")])).expect("bind");
    let prefixed =
        binding::bind_field_list(&registry, "list", &form(&[("list[0].Value", "v")])).expect("bind");
    assert_eq!(bare, prefixed);
}

#[test]
fn test_bound_field_names_are_never_empty() {
    let registry = BinderRegistry::with_defaults();
    let bodies = [
        "%5B%5D.Value=v",
        "dictionary%5B%5D.Value=v&dictionary%5Bk%5D.Value=w",
        "%5B%5D.Value=v&%5B0%5D.Value=a",
        "%5B0%5D.Value=",
    ];

    for body in bodies {
        let values = FormValueProvider::from_urlencoded(body).expect("decode");
        let map = binding::bind_field_map(&registry, "dictionary", &values).expect("bind");
        let list = binding::bind_field_list(&registry, "list", &values).expect("bind");
        for model in map.values().chain(list.iter()) {
            assert!(!model.field_name.is_empty(), "{body}: {model:?}");
        }
        assert!(!map.contains_key(""), "{body}");
    }
}

#[test]
fn test_dictionary_keys_differing_only_in_case_bind_once() {
    let registry = BinderRegistry::with_defaults();
    let values = FormValueProvider::from_urlencoded("%5Bx%5D.Value=lower&%5BX%5D.Value=upper")
        .expect("decode");

    let map = binding::bind_field_map(&registry, "dictionary", &values).expect("bind");
    assert_eq!(map.len(), 1);
    assert_eq!(map["x"], Model::new("x", "lower"));
}
