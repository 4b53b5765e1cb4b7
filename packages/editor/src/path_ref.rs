//! # Path References
//!
//! A [`PathRef`] keeps a path current while operations are applied. The
//! editor owns the table of live paths; the handle only names an entry in
//! it. Every apply transforms every live entry, and drops the entries whose
//! node was removed.

use std::collections::BTreeMap;
use trunk_tree::{Operation, Path};

/// Handle to a tracked path.
///
/// Not `Clone`: releasing it with [`TreeEditor::unref`](crate::TreeEditor::unref)
/// consumes it.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a path ref stays live until it is released"]
pub struct PathRef {
    id: u64,
}

impl PathRef {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// The live set of tracked paths
#[derive(Debug, Default)]
pub struct PathRefs {
    live: BTreeMap<u64, Path>,
    next_id: u64,
}

impl PathRefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn track(&mut self, path: Path) -> PathRef {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id, path);
        PathRef { id }
    }

    /// Current value, `None` once the node was removed.
    pub fn current(&self, path_ref: &PathRef) -> Option<&Path> {
        self.live.get(&path_ref.id)
    }

    pub(crate) fn set(&mut self, path_ref: &PathRef, path: Path) {
        if let Some(current) = self.live.get_mut(&path_ref.id) {
            *current = path;
        }
    }

    pub(crate) fn release(&mut self, path_ref: PathRef) -> Option<Path> {
        self.live.remove(&path_ref.id)
    }

    /// Transform every live path across `op`. Returns how many refs were
    /// invalidated.
    pub(crate) fn transform(&mut self, op: &Operation) -> usize {
        let before = self.live.len();

        self.live.retain(|_, path| match path.transform(op) {
            Some(next) => {
                *path = next;
                true
            }
            None => false,
        });

        before - self.live.len()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Current paths of every live ref, oldest first.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.live.values()
    }
}
