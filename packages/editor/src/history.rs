//! # Undo/Redo History
//!
//! Records applied operations in batches so they can be undone and redone
//! together.
//!
//! ## Design
//!
//! - Every saved apply either opens a new batch or merges into the newest one
//! - An apply merges by default while the operation log has unflushed entries,
//!   so everything between two flushes undoes as one step
//! - Undo applies the inverses of the newest batch in reverse order
//! - Redo reapplies the batch as recorded
//! - A saved apply clears the redo stack
//! - Undo and redo never record themselves

use crate::config::DEFAULT_MAX_UNDO_LEVELS;
use crate::errors::EditorResult;
use crate::TreeEditor;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use trunk_tree::Operation;

/// Operations undone or redone together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    /// Applied batches (most recent last)
    pub undos: Vec<Batch>,

    /// Undone batches (most recent last)
    pub redos: Vec<Batch>,

    /// Maximum number of undo batches (0 = unlimited)
    #[serde(skip, default = "default_max_levels")]
    max_levels: usize,

    #[serde(skip)]
    saving: Option<bool>,

    #[serde(skip)]
    merging: Option<bool>,
}

fn default_max_levels() -> usize {
    DEFAULT_MAX_UNDO_LEVELS
}

impl Default for History {
    fn default() -> Self {
        Self::with_max_levels(DEFAULT_MAX_UNDO_LEVELS)
    }
}

impl History {
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undos: Vec::new(),
            redos: Vec::new(),
            max_levels,
            saving: None,
            merging: None,
        }
    }

    /// Whether `value` has the JSON shape of a history.
    pub fn is_history(value: &Value) -> bool {
        let is_batches = |key: &str| {
            value.get(key).and_then(Value::as_array).is_some_and(|batches| {
                batches
                    .iter()
                    .all(|batch| batch.get("operations").is_some_and(Operation::is_operation_list))
            })
        };

        is_batches("undos") && is_batches("redos")
    }

    pub(crate) fn record(&mut self, op: &Operation, has_pending: bool) {
        if !self.saving.unwrap_or(true) {
            return;
        }

        let merge = self
            .merging
            .unwrap_or(!self.undos.is_empty() && has_pending);

        match self.undos.last_mut() {
            Some(batch) if merge => batch.operations.push(op.clone()),
            _ => {
                self.undos.push(Batch {
                    operations: vec![op.clone()],
                });

                while self.max_levels > 0 && self.undos.len() > self.max_levels {
                    self.undos.remove(0);
                }
            }
        }

        self.redos.clear();
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    pub fn can_undo(&self) -> bool {
        !self.undos.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redos.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undos.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redos.len()
    }

    pub fn clear(&mut self) {
        self.undos.clear();
        self.redos.clear();
    }
}

impl TreeEditor {
    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Undo the most recent batch. Returns `false` when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> EditorResult<bool> {
        let Some(batch) = self.history.undos.last().cloned() else {
            return Ok(false);
        };

        debug!(operations = batch.operations.len(), "Undoing batch");

        self.without_saving(|editor| -> EditorResult<()> {
            for op in batch.operations.iter().rev() {
                editor.apply(op.inverse())?;
            }
            Ok(())
        })?;

        self.history.undos.pop();
        self.history.redos.push(batch);
        Ok(true)
    }

    /// Redo the most recently undone batch. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> EditorResult<bool> {
        let Some(batch) = self.history.redos.last().cloned() else {
            return Ok(false);
        };

        debug!(operations = batch.operations.len(), "Redoing batch");

        self.without_saving(|editor| -> EditorResult<()> {
            for op in &batch.operations {
                editor.apply(op.clone())?;
            }
            Ok(())
        })?;

        self.history.redos.pop();
        self.history.undos.push(batch);
        Ok(true)
    }

    /// Run `f` with history recording turned off.
    pub fn without_saving<R>(&mut self, f: impl FnOnce(&mut TreeEditor) -> R) -> R {
        let previous = self.history.saving.replace(false);
        let result = f(self);
        self.history.saving = previous;
        result
    }

    /// Run `f` with every saved apply opening its own batch.
    pub fn without_merging<R>(&mut self, f: impl FnOnce(&mut TreeEditor) -> R) -> R {
        let previous = self.history.merging.replace(false);
        let result = f(self);
        self.history.merging = previous;
        result
    }

    pub fn is_saving(&self) -> bool {
        self.history.saving.unwrap_or(true)
    }

    /// `None` means merging follows the pending operation log.
    pub fn is_merging(&self) -> Option<bool> {
        self.history.merging
    }
}
