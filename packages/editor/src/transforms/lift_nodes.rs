use super::NodeOptions;
use crate::errors::{EditorError, EditorResult};
use crate::TreeEditor;
use std::ops::ControlFlow;
use trunk_tree::traversal;
use trunk_tree::Path;

impl TreeEditor {
    /// Move every targeted node up one level, next to its current parent.
    ///
    /// An only child replaces its parent, which is removed once empty. A
    /// first child lands right before its parent; any other child lands
    /// right after it. Siblings that follow an interior child stay where
    /// they are.
    pub fn lift_nodes(&mut self, options: NodeOptions<'_>) -> EditorResult<()> {
        let Some(at) = options.at else {
            return Ok(());
        };

        let targets = self.targets(&at, options.matcher, "liftNodes")?;
        let refs = self.track_all(targets);

        self.drain_refs(refs, |editor, path| {
            let Some(path) = path else {
                editor.report(EditorError::structural(
                    "liftNodes.path.unref",
                    "A node to lift was removed before it could be lifted",
                ))?;
                return Ok(ControlFlow::Continue(()));
            };

            if path.len() < 2 {
                return Err(EditorError::invariant(
                    "liftNodes.depth",
                    format!("Cannot lift the node at {path}: it is already a child of the root"),
                ));
            }

            let (Some(parent_path), Some(index)) = (path.parent(), path.last_index()) else {
                return Ok(ControlFlow::Continue(()));
            };

            let Some(length) = traversal::get(&*editor.root, &parent_path).map(|parent| parent.children().len())
            else {
                editor.report(EditorError::structural(
                    "liftNodes.parent",
                    format!("Cannot find the parent of {path}"),
                ))?;
                return Ok(ControlFlow::Continue(()));
            };

            let after_parent = || {
                parent_path.next().ok_or_else(|| {
                    EditorError::exhausted("liftNodes.next", "Ran out of sibling paths to lift into")
                })
            };

            if length == 1 {
                let to = after_parent()?;
                editor.move_nodes(NodeOptions::at(path), to)?;
                editor.remove_nodes(NodeOptions::at(parent_path.clone()))?;
            } else if index == 0 {
                editor.move_nodes(NodeOptions::at(path), parent_path.clone())?;
            } else {
                let to: Path = after_parent()?;
                editor.move_nodes(NodeOptions::at(path), to)?;
            }

            Ok(ControlFlow::Continue(()))
        })
    }
}
