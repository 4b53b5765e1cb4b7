//! # Tree Editor
//!
//! The editing context: the current tree snapshot plus every piece of state
//! an apply touches (live path refs, dirty paths, the pending-operations
//! log, flush scheduling, error policy and, with the `history` feature, the
//! undo/redo stacks).
//!
//! Editors are independent of each other and single-threaded.

use crate::config::EditorConfig;
use crate::dirty_paths::{get_dirty_paths, DirtyPaths};
use crate::errors::{DefaultErrorHandler, EditorError, EditorResult, ErrorHandler, ErrorKind, Resolution};
use crate::flush::{ChangeHandler, FlushState, Scheduler};
use crate::path_ref::{PathRef, PathRefs};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;
use trunk_tree::{Element, IdGenerator, Operation, Path, Root};

#[cfg(feature = "history")]
use crate::history::History;

static EDITOR_COUNT: AtomicU64 = AtomicU64::new(0);

pub struct TreeEditor {
    pub(crate) root: Arc<Root>,
    pub(crate) config: EditorConfig,
    pub(crate) operations: Vec<Operation>,
    pub(crate) dirty: DirtyPaths,
    pub(crate) refs: PathRefs,
    pub(crate) flush: FlushState,
    pub(crate) error_handler: Box<dyn ErrorHandler>,
    pub(crate) ids: IdGenerator,

    #[cfg(feature = "history")]
    pub(crate) history: History,
}

impl TreeEditor {
    pub fn new(children: impl IntoIterator<Item = Element>) -> Self {
        Self::with_config(EditorConfig::default(), children)
    }

    pub fn with_config(config: EditorConfig, children: impl IntoIterator<Item = Element>) -> Self {
        let mut ids = IdGenerator::new(&format!(
            "trunk-editor-{}",
            EDITOR_COUNT.fetch_add(1, Ordering::Relaxed)
        ));
        let id = config.id.clone().unwrap_or_else(|| ids.new_id());

        Self::from_parts(Root::new(id, children), config, ids)
    }

    /// Wrap an existing tree. The config's `id` is ignored in favor of the
    /// root's own id.
    pub fn from_root(root: Root, config: EditorConfig) -> Self {
        let ids = IdGenerator::new(&root.id);
        Self::from_parts(root, config, ids)
    }

    fn from_parts(root: Root, config: EditorConfig, ids: IdGenerator) -> Self {
        Self {
            #[cfg(feature = "history")]
            history: History::with_max_levels(config.max_undo_levels),
            root: Arc::new(root),
            config,
            operations: Vec::new(),
            dirty: DirtyPaths::new(),
            refs: PathRefs::new(),
            flush: FlushState::default(),
            error_handler: Box::new(DefaultErrorHandler),
            ids,
        }
    }

    pub fn id(&self) -> &str {
        &self.root.id
    }

    /// The current snapshot. Holders of an older snapshot keep seeing it
    /// unchanged after later applies.
    pub fn root(&self) -> &Arc<Root> {
        &self.root
    }

    pub fn children(&self) -> &[Arc<Element>] {
        &self.root.children
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Operations applied since the last flush.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Mint a fresh element id scoped to this editor.
    pub fn new_id(&mut self) -> String {
        self.ids.new_id()
    }

    pub fn set_on_change(&mut self, on_change: impl FnMut(&crate::ChangeEvent<'_>) + 'static) {
        self.flush.on_change = Some(Box::new(on_change) as ChangeHandler);
    }

    /// Hook called once whenever a flush becomes pending outside a batch.
    /// The host is expected to call [`TreeEditor::flush`] soon after.
    pub fn set_scheduler(&mut self, scheduler: impl FnMut() + 'static) {
        self.flush.scheduler = Some(Box::new(scheduler) as Scheduler);
    }

    pub fn set_error_handler(&mut self, handler: impl ErrorHandler + 'static) {
        self.error_handler = Box::new(handler);
    }

    /// Route an error through the error policy. `Ok(())` means the caller
    /// should carry on with a neutral result.
    pub(crate) fn report(&self, error: EditorError) -> EditorResult<()> {
        if error.kind == ErrorKind::Invariant || self.config.strict {
            return Err(error);
        }

        match self.error_handler.handle(&error) {
            Resolution::Recover => {
                warn!(key = error.key, kind = %error.kind, message = %error.message, "Recovered editor error");
                Ok(())
            }
            Resolution::Raise => Err(error),
        }
    }

    // Path refs

    /// Start tracking `path` across every following apply.
    pub fn path_ref(&mut self, path: Path) -> PathRef {
        self.refs.track(path)
    }

    pub fn path_ref_current(&self, path_ref: &PathRef) -> Option<&Path> {
        self.refs.current(path_ref)
    }

    /// Stop tracking and return the last known path.
    pub fn unref(&mut self, path_ref: PathRef) -> Option<Path> {
        self.refs.release(path_ref)
    }

    pub fn path_refs(&self) -> &PathRefs {
        &self.refs
    }

    pub(crate) fn track_all(&mut self, paths: Vec<Path>) -> Vec<PathRef> {
        paths.into_iter().map(|path| self.refs.track(path)).collect()
    }

    // Dirty paths

    pub fn get_dirty_paths(&self, op: &Operation) -> Vec<Path> {
        get_dirty_paths(op)
    }

    pub fn dirty_paths(&self) -> &[Path] {
        self.dirty.as_slice()
    }

    pub fn clear_dirty_paths(&mut self) {
        self.dirty.clear();
    }
}

impl fmt::Debug for TreeEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeEditor")
            .field("root", &self.root)
            .field("config", &self.config)
            .field("operations", &self.operations)
            .field("dirty", &self.dirty)
            .field("refs", &self.refs)
            .finish_non_exhaustive()
    }
}
