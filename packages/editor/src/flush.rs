//! Batched change notification.
//!
//! Every apply appends to the editor's operation log and marks a flush
//! pending. The first apply after a flush asks the host's scheduler to run
//! one, unless a batch is open, in which case closing the outermost batch
//! flushes instead. A flush hands the change handler the last operation and
//! the whole log, then clears the log.

use crate::TreeEditor;
use std::ops::{Deref, DerefMut};
use tracing::debug;
use trunk_tree::Operation;

pub(crate) type ChangeHandler = Box<dyn FnMut(&ChangeEvent<'_>)>;
pub(crate) type Scheduler = Box<dyn FnMut()>;

/// What a change handler sees on flush
#[derive(Debug, Clone, Copy)]
pub struct ChangeEvent<'a> {
    /// The last operation applied before the flush
    pub operation: &'a Operation,

    /// Every operation applied since the previous flush, oldest first
    pub operations: &'a [Operation],
}

#[derive(Default)]
pub(crate) struct FlushState {
    pub(crate) pending: bool,
    pub(crate) depth: usize,
    pub(crate) on_change: Option<ChangeHandler>,
    pub(crate) scheduler: Option<Scheduler>,
}

impl TreeEditor {
    pub(crate) fn schedule_flush(&mut self) {
        if self.flush.pending {
            return;
        }

        self.flush.pending = true;

        if self.flush.depth == 0 {
            if let Some(scheduler) = self.flush.scheduler.as_mut() {
                scheduler();
            }
        }
    }

    pub fn is_flush_pending(&self) -> bool {
        self.flush.pending
    }

    /// Deliver pending changes. Returns `false` when nothing was pending.
    pub fn flush(&mut self) -> bool {
        if !self.flush.pending {
            return false;
        }

        self.flush.pending = false;
        let operations = std::mem::take(&mut self.operations);

        if let Some(operation) = operations.last() {
            debug!(operations = operations.len(), "Flushing changes");

            if let Some(on_change) = self.flush.on_change.as_mut() {
                on_change(&ChangeEvent {
                    operation,
                    operations: &operations,
                });
            }
        }

        true
    }

    /// Open a batch. Applies made through the guard flush once, when the
    /// outermost guard is dropped.
    pub fn begin_batch(&mut self) -> BatchGuard<'_> {
        self.flush.depth += 1;
        BatchGuard { editor: self }
    }

    /// Closure form of [`TreeEditor::begin_batch`].
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut TreeEditor) -> R) -> R {
        let mut guard = self.begin_batch();
        f(&mut guard)
    }
}

/// An open batch. Derefs to the editor.
pub struct BatchGuard<'e> {
    editor: &'e mut TreeEditor,
}

impl Deref for BatchGuard<'_> {
    type Target = TreeEditor;

    fn deref(&self) -> &TreeEditor {
        self.editor
    }
}

impl DerefMut for BatchGuard<'_> {
    fn deref_mut(&mut self) -> &mut TreeEditor {
        self.editor
    }
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        self.editor.flush.depth = self.editor.flush.depth.saturating_sub(1);

        if self.editor.flush.depth == 0 {
            self.editor.flush();
        }
    }
}
