//! Page Templater
//!
//! Binds an HTML shell to the bundles of its declared chunks. Only script
//! tags are injected; the rest of the template passes through untouched.

use crate::domain::entities::{PageTemplate, TargetRegistry};
use crate::error::ExtforgeResult;

/// Bundle files for a page, in registry order.
///
/// Only the page's own chunks are returned, so a popup shell can never pick
/// up the background bundle.
pub fn chunk_files(page: &PageTemplate, registry: &TargetRegistry) -> ExtforgeResult<Vec<String>> {
    page.validate(registry)?;

    Ok(registry
        .iter()
        .filter(|target| page.includes(target.name()))
        .map(|target| target.bundle_filename())
        .collect())
}

pub fn script_tag(file: &str) -> String {
    format!("<script src=\"{}\"></script>", escape_attr(file))
}

/// Inject script tags before the last `</body>`, or append them when the
/// template has no body close tag.
pub fn render(template: &str, scripts: &[String]) -> String {
    let tags: String = scripts.iter().map(|s| script_tag(s)).collect();

    // ASCII lowercasing keeps byte offsets intact
    match template.to_ascii_lowercase().rfind("</body>") {
        Some(idx) => {
            let mut out = String::with_capacity(template.len() + tags.len());
            out.push_str(&template[..idx]);
            out.push_str(&tags);
            out.push_str(&template[idx..]);
            out
        }
        None => format!("{}{}", template, tags),
    }
}

/// Render a page against the registry
pub fn render_page(
    page: &PageTemplate,
    template: &str,
    registry: &TargetRegistry,
) -> ExtforgeResult<String> {
    let scripts = chunk_files(page, registry)?;
    Ok(render(template, &scripts))
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
