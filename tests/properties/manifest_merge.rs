//! Property tests for manifest synthesis.

use std::path::Path;

use proptest::prelude::*;
use serde_json::{Map, Value};

use extforge::domain::services::{merge_fields, synthesize};
use extforge::domain::value_objects::PackageMetadata;

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("name".to_string()),
        Just("description".to_string()),
        Just("version".to_string()),
        proptest::string::string_regex("[a-z_]{1,12}").unwrap(),
    ]
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        proptest::string::string_regex("[ -~]{0,16}")
            .unwrap()
            .prop_map(Value::from),
    ]
}

fn fields() -> impl Strategy<Value = Map<String, Value>> {
    proptest::collection::vec((key(), scalar()), 0..8)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every static field survives the merge unchanged.
    #[test]
    fn property_static_fields_win(dynamic in fields(), static_fields in fields()) {
        let merged = merge_fields(dynamic.clone(), static_fields.clone());

        for (key, value) in &static_fields {
            prop_assert_eq!(merged.get(key), Some(value));
        }
        for (key, value) in &dynamic {
            if !static_fields.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
        let expected_len = dynamic
            .keys()
            .chain(static_fields.keys())
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        prop_assert_eq!(merged.len(), expected_len);
    }

    /// PROPERTY: merging the result again with the same inputs changes nothing.
    #[test]
    fn property_merge_is_idempotent(dynamic in fields(), static_fields in fields()) {
        let once = merge_fields(dynamic.clone(), static_fields.clone());
        let twice = merge_fields(dynamic, merge_fields(once.clone(), static_fields));
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: synthesis never panics and accepts exactly JSON objects.
    #[test]
    fn property_synthesize_accepts_only_objects(content in "[ -~]{0,64}") {
        let metadata = PackageMetadata::new(Some("d".into()), Some("1.0".into()));
        let result = synthesize(&content, Path::new("src/manifest.json"), &metadata);

        let is_object = serde_json::from_str::<Value>(&content)
            .map(|v| v.is_object())
            .unwrap_or(false);
        prop_assert_eq!(result.is_ok(), is_object);
    }
}

#[test]
fn collision_example_from_the_manifest_contract() {
    let dynamic: Map<String, Value> = serde_json::from_str(
        r#"{"description":"d","version":"1.0","name":"Y"}"#,
    )
    .unwrap();
    let static_fields: Map<String, Value> = serde_json::from_str(r#"{"name":"X"}"#).unwrap();

    let merged = merge_fields(dynamic, static_fields);

    assert_eq!(merged["name"], "X");
    assert_eq!(merged["description"], "d");
    assert_eq!(merged["version"], "1.0");
}
