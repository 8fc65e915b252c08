//! Tests for style key derivation — determinism, order-independence,
//! and theme discrimination.

use std::collections::HashMap;

use serde_json::{Value, json};
use veneer::{derive_key, derive_theme_key};

fn props(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

// =========================================================================
// Determinism and order-independence
// =========================================================================

#[test]
fn identical_bags_produce_identical_keys() {
    let bag = props(&[("checked", json!(true)), ("label", json!("A"))]);
    let k1 = derive_key("Checkbox", "flat", &bag).unwrap();
    let k2 = derive_key("Checkbox", "flat", &bag).unwrap();
    assert_eq!(k1, k2);
}

#[test]
fn insertion_order_never_affects_the_key() {
    let forward = props(&[("checked", json!(true)), ("label", json!("A"))]);
    let reversed = props(&[("label", json!("A")), ("checked", json!(true))]);

    assert_eq!(
        derive_key("Checkbox", "flat", &forward).unwrap(),
        derive_key("Checkbox", "flat", &reversed).unwrap()
    );
}

#[test]
fn differing_prop_value_changes_the_key() {
    let checked = props(&[("checked", json!(true)), ("label", json!("A"))]);
    let unchecked = props(&[("checked", json!(false)), ("label", json!("A"))]);

    assert_ne!(
        derive_key("Checkbox", "flat", &checked).unwrap(),
        derive_key("Checkbox", "flat", &unchecked).unwrap()
    );
}

#[test]
fn component_and_variant_discriminate() {
    let bag = props(&[("label", json!("A"))]);
    let k1 = derive_key("Checkbox", "flat", &bag).unwrap();
    let k2 = derive_key("Radio", "flat", &bag).unwrap();
    let k3 = derive_key("Checkbox", "retro", &bag).unwrap();

    assert_ne!(k1, k2);
    assert_ne!(k1, k3);
}

#[test]
fn prop_names_containing_delimiters_stay_distinct() {
    let tricky = props(&[("a:1|b", json!(2))]);
    let plain = props(&[("a", json!(1)), ("b", json!(2))]);

    assert_ne!(
        derive_key("Card", "flat", &tricky).unwrap(),
        derive_key("Card", "flat", &plain).unwrap()
    );
}

#[test]
fn empty_and_missing_props_still_key_cleanly() {
    let empty = props(&[]);
    let one = props(&[("label", json!("A"))]);

    assert_ne!(
        derive_key("Checkbox", "flat", &empty).unwrap(),
        derive_key("Checkbox", "flat", &one).unwrap()
    );
}

// =========================================================================
// Theme-qualified keys
// =========================================================================

#[test]
fn same_triple_differs_across_themes() {
    let bag = props(&[("checked", json!(true))]);
    let light = derive_theme_key("flat", "light", "Checkbox", "solid", &bag).unwrap();
    let dark = derive_theme_key("flat", "dark", "Checkbox", "solid", &bag).unwrap();
    let neu = derive_theme_key("neumorphic", "light", "Checkbox", "solid", &bag).unwrap();

    assert_ne!(light, dark);
    assert_ne!(light, neu);
}

#[test]
fn theme_key_embeds_the_base_key() {
    let bag = props(&[("checked", json!(true))]);
    let base = derive_key("Checkbox", "solid", &bag).unwrap();
    let themed = derive_theme_key("flat", "light", "Checkbox", "solid", &bag).unwrap();

    assert!(themed.as_str().ends_with(base.as_str()));
}
