use super::NodeOptions;
use crate::errors::{EditorError, EditorResult};
use crate::TreeEditor;
use trunk_tree::{Element, Location, Operation, Path};

impl TreeEditor {
    /// Insert `nodes` as consecutive siblings starting at `at` (default
    /// `[0]`). With a matcher, the first matching node's path is the
    /// insertion point; when nothing matches, `at` is kept.
    pub fn insert_nodes(&mut self, nodes: Vec<Element>, options: NodeOptions<'_>) -> EditorResult<()> {
        if nodes.is_empty() {
            return Ok(());
        }

        let mut at = options.at.unwrap_or_else(|| Location::Path(Path::from([0])));

        if let Some(matcher) = options.matcher {
            if let Some(path) = self.matched_paths(&at, Some(matcher)).into_iter().next() {
                at = Location::Path(path);
            }
        }

        let path = at.start().clone();
        let (Some(parent), Some(mut index)) = (path.parent(), path.last_index()) else {
            return self.report(EditorError::structural(
                "insertNodes.parent",
                "Cannot insert nodes at the root",
            ));
        };

        let count = nodes.len();
        for (position, node) in nodes.into_iter().enumerate() {
            self.apply(Operation::InsertNode {
                node,
                path: parent.child(index),
            })?;

            if position + 1 < count {
                index = match index.checked_add(1) {
                    Some(next) => next,
                    None => {
                        return Err(EditorError::exhausted(
                            "insertNodes.next",
                            "Ran out of sibling paths to insert into",
                        ))
                    }
                };
            }
        }

        Ok(())
    }

    /// Insert a single node at `at`.
    pub fn insert_node(&mut self, node: Element, options: NodeOptions<'_>) -> EditorResult<()> {
        self.insert_nodes(vec![node], options)
    }
}
