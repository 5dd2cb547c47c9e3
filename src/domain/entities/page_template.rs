//! PageTemplate entity - an HTML shell bound to a set of chunks

use std::path::{Path, PathBuf};

use super::build_target::{file_name_problem, TargetRegistry};
use crate::error::{ExtforgeError, ExtforgeResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTemplate {
    template_path: PathBuf,
    output_filename: String,
    included_chunks: Vec<String>,
}

impl PageTemplate {
    pub fn new(
        template_path: impl Into<PathBuf>,
        output_filename: impl Into<String>,
        included_chunks: Vec<String>,
    ) -> Self {
        Self {
            template_path: template_path.into(),
            output_filename: output_filename.into(),
            included_chunks,
        }
    }

    /// Template source, relative to the project root
    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    pub fn output_filename(&self) -> &str {
        &self.output_filename
    }

    pub fn included_chunks(&self) -> &[String] {
        &self.included_chunks
    }

    pub fn includes(&self, chunk: &str) -> bool {
        self.included_chunks.iter().any(|c| c == chunk)
    }

    /// The output name must be a plain file name and every included chunk
    /// must name a registered target
    pub fn validate(&self, registry: &TargetRegistry) -> ExtforgeResult<()> {
        if let Some(reason) = file_name_problem(&self.output_filename) {
            return Err(ExtforgeError::InvalidPageFilename {
                filename: self.output_filename.clone(),
                reason: reason.to_string(),
            });
        }
        for chunk in &self.included_chunks {
            if !registry.contains(chunk) {
                return Err(ExtforgeError::UnknownChunk {
                    page: self.output_filename.clone(),
                    chunk: chunk.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Pages of the original extension layout
pub fn default_pages() -> Vec<PageTemplate> {
    let chunk = |name: &str| vec![name.to_string()];
    vec![
        PageTemplate::new("src/pages/Popup/index.html", "popup.html", chunk("popup")),
        PageTemplate::new(
            "src/pages/Popup/Devpanel.html",
            "devpanel.html",
            chunk("popup"),
        ),
        PageTemplate::new(
            "src/pages/Devtools/index.html",
            "devtools.html",
            chunk("devtools"),
        ),
        PageTemplate::new(
            "src/pages/Background/index.html",
            "background.html",
            chunk("background"),
        ),
    ]
}

/// Validate a page list: known chunks and unique output names
pub fn validate_pages(pages: &[PageTemplate], registry: &TargetRegistry) -> ExtforgeResult<()> {
    for (idx, page) in pages.iter().enumerate() {
        page.validate(registry)?;
        if pages[..idx]
            .iter()
            .any(|p| p.output_filename() == page.output_filename())
        {
            return Err(ExtforgeError::DuplicatePage {
                filename: page.output_filename().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pages_are_valid_against_default_registry() {
        let registry = TargetRegistry::defaults();
        assert!(validate_pages(&default_pages(), &registry).is_ok());
    }

    #[test]
    fn popup_and_devpanel_share_the_popup_chunk() {
        let pages = default_pages();
        let sharing: Vec<_> = pages
            .iter()
            .filter(|p| p.includes("popup"))
            .map(|p| p.output_filename())
            .collect();
        assert_eq!(sharing, vec!["popup.html", "devpanel.html"]);
    }

    #[test]
    fn unknown_chunk_is_a_configuration_error() {
        let registry = TargetRegistry::defaults();
        let page = PageTemplate::new("options.html", "options.html", vec!["options".into()]);

        let err = page.validate(&registry).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(matches!(err, ExtforgeError::UnknownChunk { chunk, .. } if chunk == "options"));
    }

    #[test]
    fn duplicate_output_filename_is_rejected() {
        let registry = TargetRegistry::defaults();
        let pages = vec![
            PageTemplate::new("a.html", "popup.html", vec!["popup".into()]),
            PageTemplate::new("b.html", "popup.html", vec!["devtools".into()]),
        ];

        let err = validate_pages(&pages, &registry).unwrap_err();
        assert!(matches!(err, ExtforgeError::DuplicatePage { .. }));
    }

    #[test]
    fn output_filename_must_stay_in_the_output_dir() {
        let registry = TargetRegistry::defaults();

        for filename in ["../victim.html", "/abs.html", "nested/popup.html", "..", ""] {
            let pages = vec![PageTemplate::new(
                "src/pages/Popup/index.html",
                filename,
                vec!["popup".into()],
            )];
            let err = validate_pages(&pages, &registry).unwrap_err();
            assert!(err.is_configuration_error(), "{filename:?}");
            assert!(
                matches!(&err, ExtforgeError::InvalidPageFilename { filename: f, .. } if f == filename),
                "{filename:?}: {err}"
            );
        }
    }
}
