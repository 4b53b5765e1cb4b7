use super::NodeOptions;
use crate::errors::{EditorError, EditorResult};
use crate::TreeEditor;
use std::ops::ControlFlow;
use trunk_tree::traversal;
use trunk_tree::{Operation, Path};

impl TreeEditor {
    /// Remove every targeted node. Targets nested inside an earlier target
    /// go with it.
    pub fn remove_nodes(&mut self, options: NodeOptions<'_>) -> EditorResult<()> {
        let Some(at) = options.at else {
            return Ok(());
        };

        let targets = self.targets(&at, options.matcher, "removeNodes")?;
        let refs = self.track_all(targets);

        self.drain_refs(refs, |editor, path| {
            let Some(path) = path else {
                return Ok(ControlFlow::Continue(()));
            };

            editor.remove_at(path)?;
            Ok(ControlFlow::Continue(()))
        })
    }

    fn remove_at(&mut self, path: Path) -> EditorResult<()> {
        let Some(node) = traversal::descendant(&*self.root, &path) else {
            return self.report(
                EditorError::structural("removeNodes.node", format!("Cannot find a node to remove at {path}"))
                    .with_data(serde_json::json!({ "path": path })),
            );
        };

        let node = node.clone();
        self.apply(Operation::RemoveNode { node, path })
    }
}

#[cfg(test)]
mod tests {
    use crate::{ErrorKind, NodeOptions, Resolution, TreeEditor};
    use trunk_tree::{path, Element, Location, NodeRef, Path};

    fn editor() -> TreeEditor {
        TreeEditor::new(vec![
            Element::new("a", "block").with_children(vec![Element::new("a0", "line")]),
            Element::new("b", "block"),
            Element::new("c", "block"),
        ])
    }

    #[test]
    fn test_removes_a_single_path() {
        let mut editor = editor();
        editor.remove_nodes(NodeOptions::at(path![1])).unwrap();

        let ids: Vec<_> = editor.children().iter().map(|child| child.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_removes_every_element_in_a_span() {
        let mut editor = editor();
        editor
            .remove_nodes(NodeOptions::at(Location::span(path![0], path![1])))
            .unwrap();

        let ids: Vec<_> = editor.children().iter().map(|child| child.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
        assert!(editor.path_refs().is_empty());
    }

    #[test]
    fn test_matcher_filters_targets() {
        let mut editor = editor();
        let is_leaf_block = |node: NodeRef<'_>, path: &Path| path.len() == 1 && node.is_leaf();

        editor
            .remove_nodes(NodeOptions::at(Location::span(path![0], path![2])).matching(&is_leaf_block))
            .unwrap();

        assert_eq!(editor.children().len(), 1);
        assert_eq!(editor.children()[0].id, "a");
    }

    #[test]
    fn test_missing_path_is_a_recovered_no_op() {
        let mut editor = editor();
        editor.remove_nodes(NodeOptions::at(path![7])).unwrap();

        assert_eq!(editor.children().len(), 3);
        assert!(editor.operations().is_empty());
    }

    #[test]
    fn test_unresolved_target_goes_through_the_error_policy() {
        let mut editor = editor();
        let error = editor.remove_at(path![5]).unwrap_err();

        assert_eq!(error.kind, ErrorKind::Structural);
        assert_eq!(error.key, "removeNodes.node");

        editor.set_error_handler(|_: &crate::EditorError| Resolution::Recover);
        editor.remove_at(path![5]).unwrap();
        assert!(editor.operations().is_empty());
    }
}
