use super::NodeOptions;
use crate::errors::{EditorError, EditorResult};
use crate::TreeEditor;
use std::ops::ControlFlow;
use trunk_tree::{Operation, Path};

impl TreeEditor {
    /// Move every targeted node to `to`, keeping their document order. A
    /// target nested inside an earlier target travels with it.
    pub fn move_nodes(&mut self, options: NodeOptions<'_>, to: Path) -> EditorResult<()> {
        let Some(at) = options.at else {
            return Ok(());
        };

        let mut targets: Vec<Path> = Vec::new();
        for path in self.targets(&at, options.matcher, "moveNodes")? {
            if !targets.iter().any(|target| target.is_ancestor(&path)) {
                targets.push(path);
            }
        }

        let to_ref = self.path_ref(to);
        let refs = self.track_all(targets);

        let result = self.drain_refs(refs, |editor, path| {
            let Some(path) = path else {
                return Ok(ControlFlow::Continue(()));
            };

            let Some(new_path) = editor.path_ref_current(&to_ref).cloned() else {
                editor.report(EditorError::structural(
                    "moveNodes.to",
                    "The destination of the move no longer exists",
                ))?;
                return Ok(ControlFlow::Break(()));
            };

            editor.apply(Operation::MoveNode {
                path: path.clone(),
                new_path: new_path.clone(),
            })?;

            // A forward sibling move shifts the destination back by one;
            // keep the next node landing after this one.
            if new_path.is_sibling(&path) && new_path.is_after(&path) {
                if let Some(current) = editor.path_ref_current(&to_ref) {
                    let Some(next) = current.next() else {
                        return Err(EditorError::exhausted(
                            "moveNodes.next",
                            "Ran out of sibling paths to move into",
                        ));
                    };
                    editor.refs.set(&to_ref, next);
                }
            }

            Ok(ControlFlow::Continue(()))
        });

        self.unref(to_ref);
        result
    }
}
