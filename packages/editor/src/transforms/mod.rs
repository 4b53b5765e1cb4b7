//! # Node Transforms
//!
//! Multi-step edits built from primitive operations. Each transform finds
//! its targets in the current snapshot, holds them as [`PathRef`]s so they
//! stay correct while earlier steps shift the tree, then applies one
//! operation per step through [`TreeEditor::apply`].
//!
//! Targets default by location: a path matches exactly its own node, a span
//! matches every element inside it except the ancestors of its start.

mod insert_nodes;
mod lift_nodes;
mod move_nodes;
mod remove_nodes;
mod set_nodes;
mod unset_nodes;
mod unwrap_nodes;
mod wrap_nodes;

pub use set_nodes::{Compare, Merge, SetNodesOptions};

use crate::errors::{EditorError, EditorResult};
use crate::path_ref::PathRef;
use crate::queries::{bounds, Matcher};
use crate::TreeEditor;
use std::ops::ControlFlow;
use trunk_tree::traversal::{self, NodesOptions};
use trunk_tree::{Location, NodeRef, Path};

/// Where a transform applies and which nodes it targets
#[derive(Clone, Default)]
pub struct NodeOptions<'m> {
    pub at: Option<Location>,
    pub matcher: Option<Matcher<'m>>,
}

impl<'m> NodeOptions<'m> {
    pub fn at(at: impl Into<Location>) -> Self {
        Self {
            at: Some(at.into()),
            matcher: None,
        }
    }

    pub fn matching(mut self, matcher: Matcher<'m>) -> Self {
        self.matcher = Some(matcher);
        self
    }
}

/// Matcher accepting the direct children of `parent`.
pub fn child_of(parent: &Path) -> impl Fn(NodeRef<'_>, &Path) -> bool + '_ {
    move |_, path| path.is_child(parent)
}

fn matches_location(at: &Location, node: NodeRef<'_>, path: &Path) -> bool {
    match at {
        Location::Path(target) => path == target,
        Location::Span(from, _) => node.is_element() && !path.is_ancestor(from),
    }
}

impl TreeEditor {
    /// Paths of the nodes within `at` that `matcher` (or the location's
    /// default) accepts, in document order. The root is never a target.
    pub(crate) fn matched_paths(&self, at: &Location, matcher: Option<Matcher<'_>>) -> Vec<Path> {
        let (from, to) = bounds(at);

        traversal::nodes(&*self.root, NodesOptions::between(from, to))
            .filter(|(node, path)| {
                !path.is_root()
                    && match matcher {
                        Some(matcher) => matcher(*node, path),
                        None => matches_location(at, *node, path),
                    }
            })
            .map(|(_, path)| path)
            .collect()
    }

    /// Like [`TreeEditor::matched_paths`], reporting a missing node when a
    /// bare path is the target.
    pub(crate) fn targets(
        &self,
        at: &Location,
        matcher: Option<Matcher<'_>>,
        transform: &'static str,
    ) -> EditorResult<Vec<Path>> {
        if let (Location::Path(path), None) = (at, matcher) {
            if !self.has_path(path) {
                self.report(
                    EditorError::lookup("node", format!("{transform}: cannot find a node at {path}"))
                        .with_data(serde_json::json!({ "path": path })),
                )?;
                return Ok(Vec::new());
            }
        }

        Ok(self.matched_paths(at, matcher))
    }

    /// Release each ref in turn and hand its current path to `step`. Refs
    /// left over after an error or a break are released too.
    pub(crate) fn drain_refs(
        &mut self,
        refs: Vec<PathRef>,
        mut step: impl FnMut(&mut TreeEditor, Option<Path>) -> EditorResult<ControlFlow<()>>,
    ) -> EditorResult<()> {
        let mut refs = refs.into_iter();

        while let Some(path_ref) = refs.next() {
            let path = self.unref(path_ref);

            let outcome = step(self, path);
            if !matches!(outcome, Ok(ControlFlow::Continue(()))) {
                for rest in refs {
                    self.unref(rest);
                }
                return outcome.map(|_| ());
            }
        }

        Ok(())
    }
}
