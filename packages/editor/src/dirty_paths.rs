//! Paths invalidated by recent operations.
//!
//! The set survives across applies: structural operations carry every
//! earlier entry through [`Path::transform`] (dropping removed ones), then
//! the paths touched by the new operation are added. Entries are unique by
//! [`Path::key`].

use std::collections::HashSet;
use trunk_tree::traversal::{nodes, NodesOptions};
use trunk_tree::{Operation, Path};

/// Paths touched by `op`, in pre-image terms for its ancestors and
/// post-image terms for the node it lands on.
pub fn get_dirty_paths(op: &Operation) -> Vec<Path> {
    match op {
        Operation::InsertNode { node, path } => {
            let mut dirty = path.levels();
            dirty.extend(nodes(node, NodesOptions::default()).map(|(_, p)| path.concat(&p)));
            dirty
        }

        Operation::MoveNode { path, new_path } => {
            if path == new_path {
                return Vec::new();
            }

            let old_ancestors: Vec<Path> = path
                .ancestors()
                .iter()
                .filter_map(|ancestor| ancestor.transform(op))
                .collect();
            let new_ancestors: Vec<Path> = new_path
                .ancestors()
                .iter()
                .filter_map(|ancestor| ancestor.transform(op))
                .collect();

            let landed = match (new_ancestors.last(), new_path.last_index()) {
                (Some(parent), Some(index)) => Some(parent.child(index)),
                _ => None,
            };

            old_ancestors
                .into_iter()
                .chain(new_ancestors)
                .chain(landed)
                .collect()
        }

        Operation::RemoveNode { path, .. } => path.ancestors(),

        Operation::SetNode { path, .. } => path.levels(),
    }
}

/// Deduplicated, insertion-ordered set of dirty paths
#[derive(Debug, Clone, Default)]
pub struct DirtyPaths {
    paths: Vec<Path>,
    keys: HashSet<String>,
}

impl DirtyPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `path` unless an equal path is already present.
    pub fn add(&mut self, path: Path) -> bool {
        if !self.keys.insert(path.key()) {
            return false;
        }

        self.paths.push(path);
        true
    }

    /// Carry the set across `op` and add the paths it touches.
    pub fn update(&mut self, op: &Operation) {
        if op.is_structural() {
            let previous = std::mem::take(&mut self.paths);
            self.keys.clear();

            for path in previous.iter().filter_map(|path| path.transform(op)) {
                self.add(path);
            }
        }

        for path in get_dirty_paths(op) {
            self.add(path);
        }
    }

    pub fn as_slice(&self) -> &[Path] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.keys.contains(&path.key())
    }

    pub fn clear(&mut self) {
        self.paths.clear();
        self.keys.clear();
    }
}
