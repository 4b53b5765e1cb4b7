use super::{child_of, NodeOptions};
use crate::errors::{EditorError, EditorResult};
use crate::TreeEditor;
use std::ops::ControlFlow;
use trunk_tree::traversal;
use trunk_tree::Location;

impl TreeEditor {
    /// Lift the children of every targeted node out from under it, leaving
    /// the emptied node to be removed by the last lift. Targets are handled
    /// deepest-last-first so earlier unwraps never shift later ones.
    pub fn unwrap_nodes(&mut self, options: NodeOptions<'_>) -> EditorResult<()> {
        let Some(at) = options.at else {
            return Ok(());
        };

        let mut targets = self.targets(&at, options.matcher, "unwrapNodes")?;
        targets.reverse();
        let refs = self.track_all(targets);

        self.drain_refs(refs, |editor, path| {
            let Some(path) = path else {
                return Ok(ControlFlow::Continue(()));
            };

            let Some(node) = traversal::descendant(&*editor.root, &path) else {
                editor.report(EditorError::structural(
                    "unwrapNodes.node",
                    format!("Cannot find the node to unwrap at {path}"),
                ))?;
                return Ok(ControlFlow::Continue(()));
            };

            if node.is_leaf() {
                return Ok(ControlFlow::Continue(()));
            }

            let first = path.child(0);
            let last = path.child(node.children.len() - 1);
            let is_child = child_of(&path);

            editor.lift_nodes(NodeOptions::at(Location::span(first, last)).matching(&is_child))?;

            Ok(ControlFlow::Continue(()))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{NodeOptions, TreeEditor};
    use trunk_tree::{path, Element, NodeRef, Path};

    fn ids(editor: &TreeEditor) -> Vec<&str> {
        editor.children().iter().map(|child| child.id.as_str()).collect()
    }

    #[test]
    fn test_unwrap_promotes_children_in_order() {
        let mut editor = TreeEditor::new(vec![
            Element::new("a", "block"),
            Element::new("w", "group").with_children(vec![
                Element::new("x", "block"),
                Element::new("y", "block"),
                Element::new("z", "block"),
            ]),
            Element::new("b", "block"),
        ]);

        editor.unwrap_nodes(NodeOptions::at(path![1])).unwrap();

        assert_eq!(ids(&editor), vec!["a", "x", "y", "z", "b"]);
        assert!(editor.path_refs().is_empty());
    }

    #[test]
    fn test_unwrap_every_matched_group() {
        let mut editor = TreeEditor::new(vec![
            Element::new("g1", "group").with_children(vec![Element::new("x", "block")]),
            Element::new("b", "block"),
            Element::new("g2", "group").with_children(vec![
                Element::new("y", "block"),
                Element::new("z", "block"),
            ]),
        ]);
        let is_group = |node: NodeRef<'_>, _: &Path| node.kind() == Some("group");

        editor
            .unwrap_nodes(NodeOptions::at(path![]).matching(&is_group))
            .unwrap();

        assert_eq!(ids(&editor), vec!["x", "b", "y", "z"]);
    }
}
