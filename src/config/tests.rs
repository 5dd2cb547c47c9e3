//! Tests for the config module

use super::*;
use crate::domain::value_objects::{RuntimeContext, TransformKind};
use crate::error::ExtforgeError;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_default_matches_stock_layout() {
    let config = ProjectConfig::default();

    assert_eq!(config.output_dir, PathBuf::from("build"));
    assert_eq!(config.manifest, PathBuf::from("src/manifest.json"));
    assert_eq!(config.assets.len(), 2);
    assert_eq!(config.targets.len(), 5);
    assert_eq!(config.pages.len(), 4);
    assert_eq!(config.rules.len(), 4);
    assert_eq!(config.env.expose, vec!["NODE_ENV"]);
    assert_eq!(config.env.secrets_extension, "js");
    assert!(config.bundler.command.is_none());
}

#[test]
fn test_empty_toml_equals_defaults() {
    let config: ProjectConfig = toml::from_str("").unwrap();
    assert_eq!(config, ProjectConfig::default());
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
output_dir = "dist"
assets = ["icons/icon.png"]

[[targets]]
name = "popup"
entry = "src/popup.js"
context = "popup"

[[targets]]
name = "content"
entry = "src/content.js"
context = "content-script"

[[pages]]
template = "src/popup.html"
filename = "popup.html"
chunks = ["popup"]

[[rules]]
test = "*.js"
transform = "script"

[env]
expose = ["NODE_ENV", "API_URL"]

[bundler]
command = ["esbuild", "{entry}", "--bundle"]
"#;

    let config: ProjectConfig = toml::from_str(toml).unwrap();

    assert_eq!(config.output_dir, PathBuf::from("dist"));
    assert_eq!(config.targets.len(), 2);
    assert_eq!(config.targets[1].context, RuntimeContext::ContentScript);
    assert_eq!(config.rules[0].transform, TransformKind::Script);
    assert!(config.rules[0].exclude.is_empty());
    assert_eq!(config.env.expose, vec!["NODE_ENV", "API_URL"]);
    assert_eq!(config.env.secrets_extension, "js");
    assert_eq!(
        config.bundler.command,
        Some(vec!["esbuild".into(), "{entry}".into(), "--bundle".into()])
    );
}

#[test]
fn test_unknown_context_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILENAME);
    fs::write(
        &path,
        "[[targets]]\nname = \"x\"\nentry = \"x.js\"\ncontext = \"sidebar\"\n",
    )
    .unwrap();

    let err = ProjectConfig::load_with_warnings(&path).unwrap_err();
    assert!(matches!(err, ExtforgeError::ConfigParse { .. }));
    assert!(err.is_configuration_error());
}

// === TDD: unknown keys are warnings ===

#[test]
fn test_unknown_key_warns_with_suggestion() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILENAME);
    fs::write(&path, "output_dri = \"dist\"\n\n[env]\nexpose = []\n").unwrap();

    let (config, warnings) = load_with_warnings(&path).unwrap();

    assert_eq!(config.output_dir, PathBuf::from("build"));
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "output_dri");
    assert_eq!(warnings[0].line, Some(1));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("output_dir"));
    assert!(warnings[0].to_string().contains("did you mean 'output_dir'?"));
}

#[test]
fn test_nested_unknown_key_reports_leaf() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILENAME);
    fs::write(&path, "[env]\nexpos = [\"API\"]\n").unwrap();

    let (_, warnings) = load_with_warnings(&path).unwrap();

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "expos");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("expose"));
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let (config, warnings) = load_for_project(dir.path()).unwrap();

    assert!(warnings.is_empty());
    assert_eq!(config.targets.len(), 5);
}

#[test]
fn test_out_dir_env_override() {
    let config = with_env_overrides_from(ProjectConfig::default(), |name| {
        (name == OUT_DIR_VAR).then(|| "out/ext".to_string())
    });
    assert_eq!(config.output_dir, PathBuf::from("out/ext"));

    let config = with_env_overrides_from(ProjectConfig::default(), |_| Some("  ".to_string()));
    assert_eq!(config.output_dir, PathBuf::from("build"));
}

// === TDD: compiled build config ===

#[test]
fn test_build_config_from_defaults() {
    let dir = tempdir().unwrap();
    let build = BuildConfig::from_project(dir.path(), ProjectConfig::default()).unwrap();

    assert_eq!(build.output_dir, dir.path().join("build"));
    assert_eq!(
        build.registry.names(),
        vec!["popup", "devtools", "background", "contentScript", "pageScript"]
    );
    assert_eq!(
        build.rules.classify(Path::new("src/assets/img/icon-34.png")),
        Some(TransformKind::BinaryFileCopy)
    );
    assert_eq!(build.pages.len(), 4);
}

#[test]
fn test_default_rules_agree_with_domain_defaults() {
    let dir = tempdir().unwrap();
    let build = BuildConfig::from_project(dir.path(), ProjectConfig::default()).unwrap();
    let domain = crate::domain::entities::AssetTransformTable::defaults().unwrap();

    for path in [
        "a.css",
        "b/c.woff2",
        "index.html",
        "x.jsx",
        "node_modules/lib/index.js",
        "README.md",
    ] {
        assert_eq!(
            build.rules.classify(Path::new(path)),
            domain.classify(Path::new(path)),
            "{}",
            path
        );
    }
}

#[test]
fn test_build_config_rejects_duplicate_targets() {
    let mut config = ProjectConfig::default();
    config.targets.push(config.targets[0].clone());

    let err = BuildConfig::from_project(Path::new("/p"), config).unwrap_err();
    assert!(matches!(err, ExtforgeError::DuplicateTarget { .. }));
}

#[test]
fn test_build_config_rejects_unknown_chunk() {
    let mut config = ProjectConfig::default();
    config.pages.push(PageConfig {
        template: PathBuf::from("src/options.html"),
        filename: "options.html".into(),
        chunks: vec!["options".into()],
    });

    let err = BuildConfig::from_project(Path::new("/p"), config).unwrap_err();
    assert!(matches!(err, ExtforgeError::UnknownChunk { .. }));
}

#[test]
fn test_build_config_rejects_page_output_outside_output_dir() {
    let mut config = ProjectConfig::default();
    config.pages.push(PageConfig {
        template: PathBuf::from("src/pages/Popup/index.html"),
        filename: "../victim.html".into(),
        chunks: vec!["popup".into()],
    });

    let err = BuildConfig::from_project(Path::new("/p"), config).unwrap_err();
    assert!(err.is_configuration_error());
    assert!(matches!(err, ExtforgeError::InvalidPageFilename { .. }));
}

#[test]
fn test_build_config_rejects_malformed_rule() {
    let mut config = ProjectConfig::default();
    config.rules.insert(
        0,
        RuleConfig {
            test: "!*.css".into(),
            transform: TransformKind::Style,
            exclude: vec![],
        },
    );

    let err = BuildConfig::from_project(Path::new("/p"), config).unwrap_err();
    assert!(matches!(err, ExtforgeError::InvalidMatcher { .. }));
}

#[test]
fn test_out_dir_flag_is_relative_to_project() {
    let build = BuildConfig::from_project(Path::new("/p"), ProjectConfig::default())
        .unwrap()
        .with_output_dir(Path::new("dist"));
    assert_eq!(build.output_dir, PathBuf::from("/p/dist"));
}
