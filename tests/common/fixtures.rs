//! Reusable test content

#![allow(dead_code)]

pub const STATIC_MANIFEST: &str = r#"{
  "name": "Recoil Dev Tools",
  "manifest_version": 2,
  "background": { "page": "background.html" },
  "devtools_page": "devtools.html",
  "browser_action": { "default_popup": "popup.html" }
}"#;

pub const PACKAGE_JSON: &str = r#"{
  "name": "recoil-devtools",
  "description": "Developer tools for Recoil",
  "version": "0.1.2"
}"#;

pub const PAGE_TEMPLATE: &str =
    "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"></head>\n<body>\n<div id=\"app\"></div>\n</body>\n</html>\n";

/// Project-relative sources of the default layout
pub const PROJECT_FILES: &[(&str, &str)] = &[
    ("src/pages/Popup/PopupScript.js", "renderPopup();\n"),
    ("src/pages/Devtools/DevtoolsScript.js", "createPanel();\n"),
    ("src/pages/Background/Background.js", "listen();\n"),
    ("src/pages/Content/ContentScript.js", "inject();\n"),
    ("src/pages/Page/PageScript.js", "hook();\n"),
    ("src/pages/Popup/index.html", PAGE_TEMPLATE),
    ("src/pages/Popup/Devpanel.html", PAGE_TEMPLATE),
    ("src/pages/Devtools/index.html", PAGE_TEMPLATE),
    ("src/pages/Background/index.html", PAGE_TEMPLATE),
    ("src/manifest.json", STATIC_MANIFEST),
    ("package.json", PACKAGE_JSON),
];

/// Icons are binary and written separately
pub const ICONS: &[(&str, &[u8])] = &[
    ("src/assets/img/icon-34.png", &[0x89, b'P', b'N', b'G', 0, 34]),
    ("src/assets/img/icon-128.png", &[0x89, b'P', b'N', b'G', 0, 128]),
];

/// Everything a default build writes, sorted
pub const EXPECTED_OUTPUT: &[&str] = &[
    ".extforge.lock",
    "background.bundle.js",
    "background.html",
    "contentScript.bundle.js",
    "devpanel.html",
    "devtools.bundle.js",
    "devtools.html",
    "icon-128.png",
    "icon-34.png",
    "manifest.json",
    "pageScript.bundle.js",
    "popup.bundle.js",
    "popup.html",
];
