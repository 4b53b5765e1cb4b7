//! # Apply Engine
//!
//! The single gate for changing a tree. An apply first builds the next
//! snapshot from the current one; only when that succeeds does it record
//! history, carry path refs and dirty paths across the operation, commit the
//! snapshot, log the operation and schedule a flush. A failed apply leaves
//! every piece of editor state untouched.
//!
//! Snapshots share structure: the draft copies only the nodes on the path(s)
//! it edits, everything else stays shared with the previous root.

use crate::errors::{EditorError, EditorResult};
use crate::TreeEditor;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, instrument};
use trunk_tree::{Operation, Path, Properties, Root};

impl TreeEditor {
    /// Apply one primitive operation.
    #[instrument(level = "debug", skip(self, op), fields(kind = op.kind(), path = %op.path()))]
    pub fn apply(&mut self, op: Operation) -> EditorResult<()> {
        if let Err(e) = op.validate() {
            return self.report(e.into());
        }

        let next = match transform_root(&self.root, &op) {
            Ok(next) => next,
            Err(error) => return self.report(error),
        };

        #[cfg(feature = "history")]
        self.history.record(&op, !self.operations.is_empty());

        let invalidated = self.refs.transform(&op);
        if invalidated > 0 {
            debug!(invalidated, "Path refs invalidated");
        }

        self.dirty.update(&op);
        self.root = next;
        self.operations.push(op);
        self.schedule_flush();

        Ok(())
    }
}

/// Build the snapshot that results from applying `op` to `root`.
pub(crate) fn transform_root(root: &Arc<Root>, op: &Operation) -> EditorResult<Arc<Root>> {
    let mut next = Arc::clone(root);
    let draft = Arc::make_mut(&mut next);

    match op {
        Operation::InsertNode { node, path } => {
            let (index, parent) = split(path)?;
            let siblings = draft.children_mut(&parent).ok_or_else(|| {
                EditorError::structural("apply.insert_node.parent", "Cannot find the parent to insert into")
                    .with_data(path_data(path))
            })?;

            if index > siblings.len() {
                return Err(EditorError::invariant(
                    "apply.insert_node.index",
                    format!("Cannot insert at index {index} of {} children", siblings.len()),
                )
                .with_data(path_data(path)));
            }

            siblings.insert(index, Arc::new(node.clone()));
        }

        Operation::MoveNode { path, new_path } => {
            let (index, parent) = split(path)?;
            let moved = draft
                .children_mut(&parent)
                .filter(|siblings| index < siblings.len())
                .map(|siblings| siblings.remove(index))
                .ok_or_else(|| {
                    EditorError::structural("apply.move_node.node", "Cannot find the node to move")
                        .with_data(path_data(path))
                })?;

            // Where the node lands once it is out of its old slot.
            let target = path.transform(op).unwrap_or_else(|| new_path.clone());
            let (new_index, new_parent) = split(&target)?;
            let siblings = draft.children_mut(&new_parent).ok_or_else(|| {
                EditorError::structural("apply.move_node.newParent", "Cannot find the parent to move into")
                    .with_data(json!({ "path": path, "newPath": new_path }))
            })?;

            if new_index > siblings.len() {
                return Err(EditorError::invariant(
                    "apply.move_node.index",
                    format!("Cannot move to index {new_index} of {} children", siblings.len()),
                )
                .with_data(json!({ "path": path, "newPath": new_path })));
            }

            siblings.insert(new_index, moved);
        }

        Operation::RemoveNode { path, .. } => {
            let (index, parent) = split(path)?;
            draft
                .children_mut(&parent)
                .filter(|siblings| index < siblings.len())
                .map(|siblings| siblings.remove(index))
                .ok_or_else(|| {
                    EditorError::structural("apply.remove_node.node", "Cannot find the node to remove")
                        .with_data(path_data(path))
                })?;
        }

        Operation::SetNode {
            path,
            properties,
            new_properties,
        } => {
            if path.is_root() {
                return Err(EditorError::invariant(
                    "apply.set_node.root",
                    "Cannot set properties on the root",
                ));
            }

            let element = draft.element_mut(path).ok_or_else(|| {
                EditorError::structural("apply.set_node.node", "Cannot find the node to update")
                    .with_data(path_data(path))
            })?;

            patch(element, properties, new_properties)?;
        }
    }

    Ok(next)
}

/// Write `new_properties` (a `null` deletes) and drop keys only named in
/// `properties`.
fn patch(
    element: &mut trunk_tree::Element,
    properties: &Properties,
    new_properties: &Properties,
) -> EditorResult<()> {
    for (key, value) in new_properties {
        let value = match value {
            Value::Null => None,
            value => Some(value.clone()),
        };
        element.set_property(key, value)?;
    }

    for key in properties.keys() {
        if !new_properties.contains_key(key) {
            element.set_property(key, None)?;
        }
    }

    Ok(())
}

fn split(path: &Path) -> EditorResult<(usize, Path)> {
    match path.split_last() {
        Some((index, parent)) => Ok((*index, Path::from(parent))),
        None => Err(EditorError::invariant("apply.root", "Cannot address the root here")),
    }
}

fn path_data(path: &Path) -> Value {
    json!({ "path": path })
}
