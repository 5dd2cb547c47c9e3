//! Property tests for asset rule resolution.

use std::path::PathBuf;

use proptest::prelude::*;

use extforge::domain::entities::{AssetRule, AssetTransformTable, BINARY_EXTENSIONS};
use extforge::domain::value_objects::TransformKind;

fn dir_segments() -> impl Strategy<Value = Vec<String>> {
    let segment = proptest::string::string_regex("[A-Za-z0-9_-]{1,10}").unwrap();
    proptest::collection::vec(segment, 0..4)
}

fn stem() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap()
}

fn path_with(dirs: &[String], file: &str) -> PathBuf {
    dirs.iter().map(String::as_str).chain(std::iter::once(file)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a narrower rule declared first beats a broader one.
    #[test]
    fn property_first_match_wins(dirs in dir_segments(), stem in stem()) {
        let table = AssetTransformTable::new(vec![
            AssetRule::new("*.module.css", TransformKind::BinaryFileCopy, vec![]).unwrap(),
            AssetRule::new("*.css", TransformKind::Style, vec![]).unwrap(),
        ]);

        let narrow = path_with(&dirs, &format!("{}.module.css", stem));
        let broad = path_with(&dirs, &format!("{}.css", stem));

        prop_assert_eq!(table.classify(&narrow), Some(TransformKind::BinaryFileCopy));
        prop_assert_eq!(table.classify(&broad), Some(TransformKind::Style));
    }

    /// PROPERTY: swapping the order lets the broad rule shadow the narrow one.
    #[test]
    fn property_order_decides(dirs in dir_segments(), stem in stem()) {
        let table = AssetTransformTable::new(vec![
            AssetRule::new("*.css", TransformKind::Style, vec![]).unwrap(),
            AssetRule::new("*.module.css", TransformKind::BinaryFileCopy, vec![]).unwrap(),
        ]);

        let narrow = path_with(&dirs, &format!("{}.module.css", stem));
        prop_assert_eq!(table.classify(&narrow), Some(TransformKind::Style));
    }

    /// PROPERTY: default rules route every binary extension to a verbatim copy,
    /// and nothing under node_modules is handled.
    #[test]
    fn property_default_rules(
        dirs in dir_segments(),
        stem in stem(),
        ext in proptest::sample::select(BINARY_EXTENSIONS.to_vec()),
    ) {
        let table = AssetTransformTable::defaults().unwrap();
        let file = format!("{}.{}", stem, ext);

        let mut vendored = vec!["node_modules".to_string()];
        vendored.extend(dirs.iter().cloned());

        prop_assume!(!dirs.iter().any(|d| d == "node_modules"));
        prop_assert_eq!(
            table.classify(&path_with(&dirs, &file)),
            Some(TransformKind::BinaryFileCopy)
        );
        prop_assert_eq!(table.classify(&path_with(&vendored, &file)), None);
    }
}
