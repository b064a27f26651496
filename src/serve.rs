//! File watching for preview rebuilds.
//!
//! Uses `notify-debouncer-full` to watch the config file, document
//! templates, and the bundler's asset manifest for changes.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use notify::event::ModifyKind;
use notify::{EventKind, RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{DebounceEventResult, Debouncer, RecommendedCache, new_debouncer};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum WatchError {
    #[error("notify error: {0}")]
    Notify(#[from] notify::Error),
}

// =============================================================================
// Watch events
// =============================================================================

/// What changed, at the granularity rebuilds care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    /// The config file itself.
    Config,
    /// A document template.
    Template(PathBuf),
    /// The bundler's asset manifest.
    Manifest,
}

/// Events sent from the file watcher.
#[derive(Debug)]
pub enum WatchEvent {
    /// Files changed, rebuild needed.
    FilesChanged(Vec<ChangeKind>),
    /// Watcher error occurred.
    Error(String),
}

// =============================================================================
// Path classification
// =============================================================================

/// Paths the preview server watches.
#[derive(Debug, Clone)]
pub struct WatchPaths {
    /// The config file in use.
    pub config_path: PathBuf,
    /// Directories containing document templates.
    pub template_dirs: Vec<PathBuf>,
    /// The asset manifest consulted for production previews.
    pub manifest_path: PathBuf,
}

/// Classifies changed paths into rebuild-relevant kinds.
#[derive(Clone)]
pub struct PathClassifier {
    paths: WatchPaths,
}

impl PathClassifier {
    /// Create a new path classifier.
    pub fn new(paths: WatchPaths) -> Self {
        Self { paths }
    }

    /// Classify a changed path; `None` means the change is irrelevant.
    pub fn classify(&self, path: &Path) -> Option<ChangeKind> {
        // Skip hidden files and directories
        if path
            .components()
            .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
        {
            return None;
        }

        if path == self.paths.config_path {
            return Some(ChangeKind::Config);
        }

        if path == self.paths.manifest_path {
            return Some(ChangeKind::Manifest);
        }

        for dir in &self.paths.template_dirs {
            if path.starts_with(dir) {
                if path.extension().is_some_and(|e| e == "html") {
                    return Some(ChangeKind::Template(path.to_path_buf()));
                }
                // Other files next to templates - ignore
                return None;
            }
        }

        None // Unknown path, ignore
    }
}

// =============================================================================
// File watcher
// =============================================================================

/// A debounced file watcher for preview mode.
pub struct FileWatcher {
    _debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
    rx: Receiver<WatchEvent>,
}

impl FileWatcher {
    /// Create a new file watcher.
    pub fn new(paths: &WatchPaths, classifier: PathClassifier) -> Result<Self, WatchError> {
        // Create channel for events
        let (tx, rx) = mpsc::channel();

        // Callback to convert notify events to our WatchEvent type
        let callback = move |result: DebounceEventResult| match result {
            Ok(events) => {
                let changes: Vec<ChangeKind> = events
                    .iter()
                    .filter_map(|event| {
                        // Only process events for actual file changes
                        if !is_relevant_event(&event.kind) {
                            return None;
                        }
                        // Classify the first path (usually there's only one)
                        event.paths.first().and_then(|p| classifier.classify(p))
                    })
                    .collect();

                if !changes.is_empty() {
                    let _ = tx.send(WatchEvent::FilesChanged(changes));
                }
            }
            Err(errors) => {
                for e in errors {
                    let _ = tx.send(WatchEvent::Error(e.to_string()));
                }
            }
        };

        let mut debouncer = new_debouncer(Duration::from_millis(250), None, callback)
            .map_err(WatchError::Notify)?;

        // Watch template directories recursively
        for dir in &paths.template_dirs {
            if dir.exists() {
                debouncer.watch(dir, RecursiveMode::Recursive)?;
            }
        }

        // Watch the config file's parent directory (to catch config changes)
        if let Some(parent) = paths.config_path.parent()
            && parent.exists()
        {
            debouncer.watch(parent, RecursiveMode::NonRecursive)?;
        }

        // Watch the manifest's parent directory (the bundler rewrites the
        // manifest in place on its own rebuilds)
        if let Some(parent) = paths.manifest_path.parent()
            && parent.exists()
        {
            debouncer.watch(parent, RecursiveMode::NonRecursive)?;
        }

        Ok(Self {
            _debouncer: debouncer,
            rx,
        })
    }

    /// Receive the next watch event (blocking).
    pub fn recv(&self) -> Option<WatchEvent> {
        self.rx.recv().ok()
    }
}

/// Check if an event kind is relevant for rebuilds.
fn is_relevant_event(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_)
            | EventKind::Remove(_)
            | EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Name(_))
    )
}
