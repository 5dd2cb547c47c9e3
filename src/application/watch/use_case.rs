//! Watch Use Case implementation

use std::collections::{BTreeSet, HashMap};
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::build::{BuildContext, BuildResult, BuildUseCase};
use crate::domain::entities::LOCKFILE_NAME;
use crate::domain::value_objects::ContentHash;
use crate::error::{ExtforgeError, ExtforgeResult};
use crate::infrastructure::bundler::bundler_for;
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::repositories::TomlLockfileRepository;

use super::event::{WatchEvent, WatchOptions, WatcherState};

/// Directories whose changes never trigger a rebuild
const IGNORED_DIRS: &[&str] = &["node_modules", ".git"];

/// Changed bundles of one rebuild, split by reload policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReloadPlan {
    /// Swappable in place
    pub hot: Vec<String>,
    /// Need a full extension reload
    pub reload: Vec<String>,
}

impl ReloadPlan {
    pub fn is_empty(&self) -> bool {
        self.hot.is_empty() && self.reload.is_empty()
    }
}

/// Compare bundle hashes against the previous build
pub fn plan_reload(previous: &HashMap<String, ContentHash>, result: &BuildResult) -> ReloadPlan {
    let mut plan = ReloadPlan::default();
    for bundle in &result.bundles {
        if previous.get(&bundle.target) == Some(&bundle.hash) {
            continue;
        }
        if bundle.hot_reloadable {
            plan.hot.push(bundle.target.clone());
        } else {
            plan.reload.push(bundle.target.clone());
        }
    }
    plan
}

/// Paths to register with the watcher.
///
/// The project root itself is watched non-recursively (config, package
/// metadata, secrets). Each top-level directory holding a source is watched
/// recursively, even when the output directory sits inside it; `is_relevant`
/// drops the output events.
pub fn watch_roots(ctx: &BuildContext) -> Vec<(PathBuf, RecursiveMode)> {
    let config = &ctx.config;
    let sources = config
        .registry
        .iter()
        .map(|t| t.entry_path())
        .chain(config.pages.iter().map(|p| p.template_path()))
        .chain(config.assets.iter().map(PathBuf::as_path))
        .chain(std::iter::once(config.manifest.as_path()));

    let mut dirs = BTreeSet::new();
    for rel in sources {
        let mut components = rel.components();
        if let (Some(Component::Normal(first)), Some(_)) = (components.next(), components.next()) {
            dirs.insert(ctx.project_root().join(first));
        }
    }

    let mut roots = vec![(ctx.project_root().to_path_buf(), RecursiveMode::NonRecursive)];
    roots.extend(
        dirs.into_iter()
            .filter(|dir| dir.as_path() != ctx.output_dir())
            .map(|dir| (dir, RecursiveMode::Recursive)),
    );
    roots
}

/// Whether a change to `path` should trigger a rebuild
pub fn is_relevant(path: &Path, output_dir: &Path) -> bool {
    if path.starts_with(output_dir) {
        return false;
    }
    if path.file_name().is_some_and(|name| name == LOCKFILE_NAME) {
        return false;
    }
    !path.components().any(|c| match c {
        Component::Normal(name) => IGNORED_DIRS.iter().any(|dir| name == *dir),
        _ => false,
    })
}

/// Watch Use Case
///
/// Rebuilds the whole extension on every debounced batch of source
/// changes. This is the main entry point for `extforge watch`.
pub struct WatchUseCase {
    options: WatchOptions,
}

impl WatchUseCase {
    pub fn new(options: WatchOptions) -> Self {
        Self { options }
    }

    /// Start watching (blocking)
    ///
    /// Blocks until `running` is cleared. Only setup failures are returned;
    /// failed rebuilds are reported as `WatchEvent::Error`.
    pub fn start<F>(&self, running: Arc<AtomicBool>, on_event: F) -> ExtforgeResult<()>
    where
        F: Fn(WatchEvent),
    {
        let ctx = self.load_context()?;
        let roots = watch_roots(&ctx);
        let output_dir = ctx.output_dir().to_path_buf();

        on_event(WatchEvent::WatchStarted {
            project: ctx.project_root().display().to_string(),
            watching: roots.iter().map(|(p, _)| p.display().to_string()).collect(),
        });

        let mut hashes = HashMap::new();
        self.rebuild(&mut hashes, &on_event);

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            },
            Config::default(),
        )
        .map_err(watch_error)?;

        for (path, mode) in &roots {
            watcher.watch(path, *mode).map_err(watch_error)?;
        }

        // notify may replay events for files that existed at registration
        let cooldown_end = Instant::now() + Duration::from_millis(500);
        while running.load(Ordering::SeqCst) && Instant::now() < cooldown_end {
            let _ = rx.recv_timeout(Duration::from_millis(50));
        }

        let mut state = WatcherState::new();
        while running.load(Ordering::SeqCst) {
            if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
                if is_relevant(&path, &output_dir) {
                    state.add_change(path);
                }
            }

            if state.should_rebuild() {
                let root = &self.options.project_root;
                let paths = state
                    .take_changes()
                    .iter()
                    .map(|p| p.strip_prefix(root).unwrap_or(p).display().to_string())
                    .collect();
                on_event(WatchEvent::FilesChanged { paths });
                self.rebuild(&mut hashes, &on_event);
            }
        }

        on_event(WatchEvent::Shutdown);
        Ok(())
    }

    fn load_context(&self) -> ExtforgeResult<BuildContext> {
        BuildContext::load(
            &self.options.project_root,
            self.options.mode,
            self.options.output_dir.as_deref(),
            &LocalFs::new(),
        )
    }

    /// Reload the context from disk and run one full build
    fn build_once(&self) -> ExtforgeResult<BuildResult> {
        let ctx = self.load_context()?;
        let bundler = bundler_for(&ctx.config.bundler, ctx.project_root())?;
        BuildUseCase::new(LocalFs::new(), bundler, TomlLockfileRepository::new()).execute(&ctx)
    }

    fn rebuild(&self, hashes: &mut HashMap<String, ContentHash>, on_event: &impl Fn(WatchEvent)) {
        on_event(WatchEvent::RebuildStarted);

        match self.build_once() {
            Ok(result) => {
                for message in &result.warnings {
                    on_event(WatchEvent::Warning {
                        message: message.clone(),
                    });
                }
                let plan = plan_reload(hashes, &result);
                *hashes = result
                    .bundles
                    .iter()
                    .map(|b| (b.target.clone(), b.hash.clone()))
                    .collect();
                on_event(WatchEvent::RebuildComplete {
                    written: result.written.len(),
                    hot: plan.hot,
                    reload: plan.reload,
                });
            }
            Err(e) => on_event(WatchEvent::Error {
                message: e.to_string(),
            }),
        }
    }
}

fn watch_error(err: notify::Error) -> ExtforgeError {
    ExtforgeError::Io(std::io::Error::other(err.to_string()))
}
