//! Stock extension project on disk, for application-layer tests

use std::fs;
use std::path::Path;

use crate::application::build::BuildContext;
use crate::config::{BuildConfig, ProjectConfig};
use crate::domain::value_objects::{BuildMode, EnvironmentConfig, PackageMetadata};

pub const STATIC_MANIFEST: &str = r#"{
  "name": "Recoil Dev Tools",
  "manifest_version": 2,
  "background": { "page": "background.html" },
  "devtools_page": "devtools.html",
  "browser_action": { "default_popup": "popup.html" }
}"#;

pub const PAGE_TEMPLATE: &str = "<!DOCTYPE html>\n<html>\n<body>\n<div id=\"app\"></div>\n</body>\n</html>\n";

/// Write the default layout: five entries, four templates, two icons and
/// the static manifest.
pub fn write_project(root: &Path) {
    let files: &[(&str, &[u8])] = &[
        ("src/pages/Popup/PopupScript.js", b"renderPopup();\n"),
        ("src/pages/Devtools/DevtoolsScript.js", b"createPanel();\n"),
        ("src/pages/Background/Background.js", b"listen();\n"),
        ("src/pages/Content/ContentScript.js", b"inject();\n"),
        ("src/pages/Page/PageScript.js", b"hook();\n"),
        ("src/pages/Popup/index.html", PAGE_TEMPLATE.as_bytes()),
        ("src/pages/Popup/Devpanel.html", PAGE_TEMPLATE.as_bytes()),
        ("src/pages/Devtools/index.html", PAGE_TEMPLATE.as_bytes()),
        ("src/pages/Background/index.html", PAGE_TEMPLATE.as_bytes()),
        ("src/assets/img/icon-34.png", &[0x89, b'P', b'N', b'G', 34]),
        ("src/assets/img/icon-128.png", &[0x89, b'P', b'N', b'G', 128]),
        ("src/manifest.json", STATIC_MANIFEST.as_bytes()),
    ];
    for (rel, content) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// Context over the default config, without touching process env
pub fn context(root: &Path, mode: BuildMode) -> BuildContext {
    let config = BuildConfig::from_project(root, ProjectConfig::default()).unwrap();
    BuildContext::new(
        config,
        EnvironmentConfig::for_mode(mode),
        PackageMetadata::new(Some("Debug Recoil".into()), Some("0.1.0".into())),
    )
}
