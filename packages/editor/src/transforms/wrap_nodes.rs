use super::{child_of, NodeOptions};
use crate::errors::{EditorError, EditorResult};
use crate::TreeEditor;
use trunk_tree::{Element, Location};

impl TreeEditor {
    /// Wrap the targeted nodes in a copy of `element`.
    ///
    /// The wrapper goes under the deepest node containing every target,
    /// right after the last one, and the run of that node's children from
    /// the first target to the last moves into it.
    pub fn wrap_nodes(&mut self, element: Element, options: NodeOptions<'_>) -> EditorResult<()> {
        let Some(at) = options.at else {
            return Ok(());
        };

        let targets = self.targets(&at, options.matcher, "wrapNodes")?;
        let (Some(first), Some(last)) = (targets.first(), targets.last()) else {
            return Ok(());
        };

        let common = if first == last {
            first.parent()
        } else {
            Some(first.common(last))
        };
        let Some(common) = common else {
            return self.report(EditorError::structural(
                "wrapNodes.commonPath",
                "Cannot find a common ancestor to wrap under",
            ));
        };

        let depth = common.len() + 1;
        let start = first.truncate(depth);
        let end = last.truncate(depth);
        let Some(wrapper_path) = end.next() else {
            return Err(EditorError::exhausted(
                "wrapNodes.wrapperPath",
                "Ran out of sibling paths for the wrapper",
            ));
        };

        self.insert_nodes(vec![element.shell()], NodeOptions::at(wrapper_path.clone()))?;

        let is_child = child_of(&common);
        self.move_nodes(
            NodeOptions::at(Location::span(start, end)).matching(&is_child),
            wrapper_path.child(0),
        )
    }
}
