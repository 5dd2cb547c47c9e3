//! Build Use Case
//!
//! Orchestrates one pipeline run:
//! 1. Validate sources (no mutation)
//! 2. Clean the outputs recorded by the previous build
//! 3. Bundle, copy assets, synthesize the manifest, render pages
//! 4. Write every artifact and save the new lock
//!
//! Steps in (3) only extend an in-memory `ArtifactSet`; nothing reaches the
//! output directory before (4), so a failed build never publishes partial
//! output.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::clean::{CleanOptions, CleanUseCase};
use crate::application::steps;
use crate::domain::entities::{ArtifactSet, Lockfile, LOCKFILE_NAME};
use crate::domain::ports::{
    BuildEvent, BuildEventSink, BuildStage, Bundler, FileSystem, LockfileRepository,
    NoopEventSink,
};
use crate::error::ExtforgeResult;

use super::context::BuildContext;
use super::result::{BuildResult, BundleSummary};

/// Build use case - parameterized by its ports
pub struct BuildUseCase<FS, B, LR>
where
    FS: FileSystem,
    B: Bundler,
    LR: LockfileRepository,
{
    fs: FS,
    bundler: B,
    lockfile_repo: LR,
}

impl<FS, B, LR> BuildUseCase<FS, B, LR>
where
    FS: FileSystem,
    B: Bundler,
    LR: LockfileRepository,
{
    pub fn new(fs: FS, bundler: B, lockfile_repo: LR) -> Self {
        Self {
            fs,
            bundler,
            lockfile_repo,
        }
    }

    /// Run the pipeline silently
    pub fn execute(&self, ctx: &BuildContext) -> ExtforgeResult<BuildResult> {
        self.execute_with_events(ctx, Arc::new(NoopEventSink))
    }

    /// Run the pipeline, reporting progress to `event_sink`
    pub fn execute_with_events(
        &self,
        ctx: &BuildContext,
        event_sink: Arc<dyn BuildEventSink>,
    ) -> ExtforgeResult<BuildResult> {
        let sink = event_sink.as_ref();
        let mut result = BuildResult::new(ctx.mode());

        sink.on_event(BuildEvent::Started {
            project: ctx.project_root().to_path_buf(),
            output_dir: ctx.output_dir().to_path_buf(),
            mode: ctx.mode(),
            target_count: ctx.config.registry.len(),
        });
        for warning in &ctx.warnings {
            warn(sink, &mut result, warning.clone());
        }

        stage(sink, BuildStage::Validate);
        steps::validate_sources(ctx, &self.fs)?;

        stage(sink, BuildStage::Clean);
        let cleaned = CleanUseCase::new(&self.lockfile_repo, &self.fs)
            .execute(ctx.output_dir(), &CleanOptions::new())?;
        for warning in &cleaned.warnings {
            warn(sink, &mut result, warning.clone());
        }
        sink.on_event(BuildEvent::Cleaned {
            removed: cleaned.deleted.len(),
            skipped: cleaned.skipped.len(),
        });
        result.clean = cleaned;

        let artifacts = self.produce(ctx, sink)?;

        stage(sink, BuildStage::Write);
        result.written = self.write_all(ctx, sink, &artifacts)?;
        self.lockfile_repo.save(
            &Lockfile::from_artifacts(artifacts.iter()),
            &ctx.output_dir().join(LOCKFILE_NAME),
        )?;

        result.bundles = summarize(ctx, &artifacts);
        sink.on_event(BuildEvent::Completed {
            written: result.written.len(),
        });
        Ok(result)
    }

    /// Steps 2-5, all in memory
    fn produce(&self, ctx: &BuildContext, sink: &dyn BuildEventSink) -> ExtforgeResult<ArtifactSet> {
        stage(sink, BuildStage::Bundle);
        let artifacts =
            steps::bundle_targets(ctx, &self.fs, &self.bundler, sink, ArtifactSet::new())?;

        stage(sink, BuildStage::CopyAssets);
        let artifacts = steps::copy_static_assets(ctx, &self.fs, sink, artifacts)?;

        stage(sink, BuildStage::Manifest);
        let artifacts = steps::synthesize_manifest(ctx, &self.fs, sink, artifacts)?;

        stage(sink, BuildStage::Templates);
        steps::render_pages(ctx, &self.fs, sink, artifacts)
    }

    fn write_all(
        &self,
        ctx: &BuildContext,
        sink: &dyn BuildEventSink,
        artifacts: &ArtifactSet,
    ) -> ExtforgeResult<Vec<PathBuf>> {
        self.fs.create_dir_all(ctx.output_dir())?;

        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in artifacts.iter() {
            self.fs
                .write(&ctx.output_dir().join(artifact.path()), artifact.content())?;
            if sink.wants_detailed_events() {
                sink.on_event(BuildEvent::FileWritten {
                    path: artifact.path().to_path_buf(),
                });
            }
            written.push(artifact.path().to_path_buf());
        }
        Ok(written)
    }
}

fn stage(sink: &dyn BuildEventSink, stage: BuildStage) {
    sink.on_event(BuildEvent::StageStarted { stage });
}

fn warn(sink: &dyn BuildEventSink, result: &mut BuildResult, message: String) {
    sink.on_event(BuildEvent::Warning {
        message: message.clone(),
    });
    result.warnings.push(message);
}

/// Registry order, one entry per emitted bundle
fn summarize(ctx: &BuildContext, artifacts: &ArtifactSet) -> Vec<BundleSummary> {
    ctx.config
        .registry
        .iter()
        .filter_map(|target| {
            let file = PathBuf::from(target.bundle_filename());
            artifacts.get(&file).map(|artifact| BundleSummary {
                target: target.name().to_string(),
                hash: artifact.hash(),
                hot_reloadable: target.hot_reloadable(ctx.mode()),
                file,
            })
        })
        .collect()
}
