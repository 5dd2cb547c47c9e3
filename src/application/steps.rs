//! Pipeline steps
//!
//! Each step reads sources through the `FileSystem` port and returns the
//! artifact set extended with its own outputs. None of them writes to the
//! output directory.

use std::path::{Path, PathBuf};

use crate::application::build::BuildContext;
use crate::domain::entities::{validate_pages, Artifact, ArtifactKind, ArtifactSet};
use crate::domain::ports::{BuildEvent, BuildEventSink, BundleRequest, Bundler, FileSystem, FsError};
use crate::domain::services::{manifest, templater, MANIFEST_FILENAME};
use crate::domain::value_objects::TransformKind;
use crate::error::{ExtforgeError, ExtforgeResult};

/// Check every source before anything is mutated: entries, templates,
/// static assets and the static manifest must exist, entries must be
/// scripts and templates must be markup. Pages are re-checked since the
/// config fields are public and may have changed after load.
pub fn validate_sources(ctx: &BuildContext, fs: &impl FileSystem) -> ExtforgeResult<()> {
    validate_pages(&ctx.config.pages, &ctx.config.registry)?;

    for target in ctx.config.registry.iter() {
        require(ctx, fs, target.entry_path(), "entry")?;
        expect_kind(ctx, target.entry_path(), TransformKind::Script)?;
    }

    for page in &ctx.config.pages {
        require(ctx, fs, page.template_path(), "template")?;
        expect_kind(ctx, page.template_path(), TransformKind::Markup)?;
    }

    for asset in &ctx.config.assets {
        require(ctx, fs, asset, "asset")?;
        asset_output_name(ctx, asset)?;
    }

    require(ctx, fs, &ctx.config.manifest, "manifest")
}

/// Compile every registered target into `<name>.bundle.js`
pub fn bundle_targets<FS, B>(
    ctx: &BuildContext,
    fs: &FS,
    bundler: &B,
    sink: &dyn BuildEventSink,
    mut artifacts: ArtifactSet,
) -> ExtforgeResult<ArtifactSet>
where
    FS: FileSystem,
    B: Bundler + ?Sized,
{
    let secrets = match ctx.env.secrets_override() {
        Some(path) => {
            sink.on_event(BuildEvent::SecretsResolved {
                path: path.to_path_buf(),
            });
            Some(read_text(fs, path, "secrets")?)
        }
        None => None,
    };

    for target in ctx.config.registry.iter() {
        let entry_path = ctx.source_path(target.entry_path());
        let source = read_text(fs, &entry_path, "entry")?;

        let bundle = bundler.bundle(&BundleRequest {
            target,
            entry_path: &entry_path,
            source: &source,
            env: &ctx.env,
            secrets: secrets.as_deref(),
        })?;

        let file = target.bundle_filename();
        sink.on_event(BuildEvent::TargetBundled {
            target: target.name().to_string(),
            file: file.clone(),
            bytes: bundle.len(),
        });
        artifacts.insert(Artifact::new(
            file,
            bundle,
            ArtifactKind::Bundle {
                target: target.name().to_string(),
            },
        ))?;
    }

    Ok(artifacts)
}

/// Copy each configured asset verbatim into the output root
pub fn copy_static_assets(
    ctx: &BuildContext,
    fs: &impl FileSystem,
    sink: &dyn BuildEventSink,
    mut artifacts: ArtifactSet,
) -> ExtforgeResult<ArtifactSet> {
    for asset in &ctx.config.assets {
        let source = ctx.source_path(asset);
        let content = fs
            .read_bytes(&source)
            .map_err(|e| source_error(e, &source, "asset"))?;
        let name = asset_output_name(ctx, asset)?;

        if sink.wants_detailed_events() {
            sink.on_event(BuildEvent::AssetCopied { path: name.clone() });
        }
        artifacts.insert(Artifact::new(name, content, ArtifactKind::Asset))?;
    }
    Ok(artifacts)
}

/// Merge the static manifest with package metadata into `manifest.json`
pub fn synthesize_manifest(
    ctx: &BuildContext,
    fs: &impl FileSystem,
    sink: &dyn BuildEventSink,
    artifacts: ArtifactSet,
) -> ExtforgeResult<ArtifactSet> {
    let source = ctx.source_path(&ctx.config.manifest);
    let content = fs.read(&source).map_err(|e| match e {
        FsError::InvalidUtf8(path) => ExtforgeError::Manifest {
            path,
            message: "not valid UTF-8".to_string(),
        },
        other => source_error(other, &source, "manifest"),
    })?;

    let text = manifest::synthesize(&content, &source, &ctx.metadata)?;
    sink.on_event(BuildEvent::ManifestSynthesized {
        path: PathBuf::from(MANIFEST_FILENAME),
    });
    artifacts.with(Artifact::new(MANIFEST_FILENAME, text, ArtifactKind::Manifest))
}

/// Inject each page's chunk bundles into its template
pub fn render_pages(
    ctx: &BuildContext,
    fs: &impl FileSystem,
    sink: &dyn BuildEventSink,
    mut artifacts: ArtifactSet,
) -> ExtforgeResult<ArtifactSet> {
    for page in &ctx.config.pages {
        let template_path = ctx.source_path(page.template_path());
        let template = read_text(fs, &template_path, "template")?;

        let scripts = templater::chunk_files(page, &ctx.config.registry)?;
        if let Some(missing) = scripts.iter().find(|file| !artifacts.contains(file.as_str())) {
            return Err(ExtforgeError::Transform {
                path: template_path,
                message: format!("bundle {} has not been produced", missing),
            });
        }

        let html = templater::render(&template, &scripts);
        sink.on_event(BuildEvent::PageRendered {
            filename: page.output_filename().to_string(),
            chunks: page.included_chunks().to_vec(),
        });
        artifacts.insert(Artifact::new(page.output_filename(), html, ArtifactKind::Page))?;
    }
    Ok(artifacts)
}

fn require(ctx: &BuildContext, fs: &impl FileSystem, rel: &Path, role: &str) -> ExtforgeResult<()> {
    if fs.exists(&ctx.source_path(rel)) {
        Ok(())
    } else {
        Err(ExtforgeError::MissingSource {
            role: role.to_string(),
            path: rel.to_path_buf(),
        })
    }
}

fn expect_kind(ctx: &BuildContext, rel: &Path, expected: TransformKind) -> ExtforgeResult<()> {
    let path = ctx.source_path(rel);
    let message = match ctx.config.rules.classify_in(ctx.project_root(), &path) {
        Some(kind) if kind == expected => return Ok(()),
        Some(kind) => format!("classified as {}, expected {}", kind, expected),
        None => format!("no asset rule handles this file, expected {}", expected),
    };
    Err(ExtforgeError::Transform { path, message })
}

fn asset_output_name(ctx: &BuildContext, rel: &Path) -> ExtforgeResult<PathBuf> {
    rel.file_name()
        .map(PathBuf::from)
        .ok_or_else(|| ExtforgeError::Transform {
            path: ctx.source_path(rel),
            message: "asset path has no file name".to_string(),
        })
}

fn read_text(fs: &impl FileSystem, path: &Path, role: &str) -> ExtforgeResult<String> {
    fs.read(path).map_err(|e| source_error(e, path, role))
}

fn source_error(err: FsError, path: &Path, role: &str) -> ExtforgeError {
    match err {
        FsError::NotFound(_) => ExtforgeError::MissingSource {
            role: role.to_string(),
            path: path.to_path_buf(),
        },
        FsError::InvalidUtf8(_) => ExtforgeError::Transform {
            path: path.to_path_buf(),
            message: "source is not valid UTF-8".to_string(),
        },
        other => other.into(),
    }
}
