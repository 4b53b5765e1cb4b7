//! Editor-level queries.
//!
//! Thin wrappers over [`trunk_tree::traversal`] that take a [`Location`],
//! resolve it against the current snapshot, and route lookup misses through
//! the error policy. A recovered miss comes back as `Ok(None)` (or an empty
//! result).

use crate::errors::{EditorError, EditorResult};
use crate::TreeEditor;
use std::ops::ControlFlow;
use trunk_tree::traversal::{self, NodeEntry, NodesOptions};
use trunk_tree::{Location, NodeRef, Path, TraversalOrder};

/// Node predicate used by queries and transforms
pub type Matcher<'m> = &'m dyn Fn(NodeRef<'_>, &Path) -> bool;

/// Where to look, what to match and in which direction
#[derive(Clone, Default)]
pub struct Query<'m> {
    pub at: Option<Location>,
    pub matcher: Option<Matcher<'m>>,
    pub reverse: bool,
}

impl<'m> Query<'m> {
    pub fn at(at: impl Into<Location>) -> Self {
        Self {
            at: Some(at.into()),
            ..Self::default()
        }
    }

    pub fn matching(mut self, matcher: Matcher<'m>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    fn matches(&self, node: NodeRef<'_>, path: &Path) -> bool {
        self.matcher.map_or(true, |matcher| matcher(node, path))
    }
}

/// Traversal bounds covering `at`.
pub(crate) fn bounds(at: &Location) -> (Path, Path) {
    (at.start().clone(), at.end().clone())
}

impl TreeEditor {
    /// Every node within `at` (the whole tree when absent) that matches.
    pub fn nodes<'a>(&'a self, query: Query<'a>) -> impl Iterator<Item = NodeEntry<'a>> + 'a {
        let (from, to) = query.at.as_ref().map(bounds).unwrap_or_default();
        let options = NodesOptions {
            from: Some(from),
            to: Some(to),
            reverse: query.reverse,
            pass: None,
        };

        traversal::nodes(&**self.root(), options).filter(move |(node, path)| query.matches(*node, path))
    }

    pub fn find_node<'a>(&'a self, query: Query<'a>) -> Option<NodeEntry<'a>> {
        self.nodes(query).next()
    }

    pub fn has_path(&self, path: &Path) -> bool {
        traversal::has(&*self.root, path)
    }

    /// Resolve a location to one path: the span's common ancestor, cut to
    /// `depth` when given.
    pub fn path(&self, at: impl Into<Location>, depth: Option<usize>) -> Path {
        let path = match at.into() {
            Location::Path(path) => path,
            Location::Span(from, to) => from.common(&to),
        };

        match depth {
            Some(depth) => path.truncate(depth),
            None => path,
        }
    }

    pub fn node(&self, at: impl Into<Location>) -> EditorResult<Option<NodeEntry<'_>>> {
        let path = self.path(at, None);

        match traversal::get(&*self.root, &path) {
            Some(node) => Ok(Some((node, path))),
            None => {
                self.report(
                    EditorError::lookup("node", format!("Cannot find a node at {path}"))
                        .with_data(serde_json::json!({ "path": path })),
                )?;
                Ok(None)
            }
        }
    }

    pub fn parent(&self, at: impl Into<Location>) -> EditorResult<Option<NodeEntry<'_>>> {
        let path = self.path(at, None);

        let found = path
            .parent()
            .and_then(|parent| Some((traversal::get(&*self.root, &parent)?, parent)));

        if found.is_none() {
            self.report(EditorError::lookup("parent", format!("Cannot find the parent of {path}")))?;
        }

        Ok(found)
    }

    /// Leftmost leaf at or below `at`.
    pub fn first(&self, at: impl Into<Location>) -> EditorResult<Option<NodeEntry<'_>>> {
        let path = self.path(at, None);
        let found = traversal::first(&*self.root, &path);

        if found.is_none() {
            self.report(EditorError::lookup("first", format!("Cannot find a node at {path}")))?;
        }

        Ok(found)
    }

    /// Rightmost leaf at or below `at`.
    pub fn last(&self, at: impl Into<Location>) -> EditorResult<Option<NodeEntry<'_>>> {
        let path = self.path(at, None);
        let found = traversal::last(&*self.root, &path);

        if found.is_none() {
            self.report(EditorError::lookup("last", format!("Cannot find a node at {path}")))?;
        }

        Ok(found)
    }

    /// Matching nodes from the root down to `at`.
    pub fn levels<'a>(&'a self, query: Query<'a>) -> Vec<NodeEntry<'a>> {
        let Some(at) = query.at.as_ref() else {
            return Vec::new();
        };

        let path = self.path(at.clone(), None);
        traversal::levels(&*self.root, &path, query.reverse)
            .into_iter()
            .filter(|(node, path)| query.matches(*node, path))
            .collect()
    }

    /// Closest matching ancestor of `at`.
    pub fn above<'a>(&'a self, query: Query<'a>) -> Option<NodeEntry<'a>> {
        let at = query.at.as_ref()?;
        let path = self.path(at.clone(), None);

        traversal::levels(&*self.root, &path, true)
            .into_iter()
            .find(|(node, candidate)| *candidate != path && query.matches(*node, candidate))
    }

    /// First matching node after `at` in document order. Without a matcher,
    /// the next sibling of a path, or any node after a span.
    pub fn next<'a>(&'a self, query: Query<'a>) -> EditorResult<Option<NodeEntry<'a>>> {
        self.step(query, false)
    }

    /// First matching node before `at` in document order.
    pub fn previous<'a>(&'a self, query: Query<'a>) -> EditorResult<Option<NodeEntry<'a>>> {
        self.step(query, true)
    }

    fn step<'a>(&'a self, query: Query<'a>, reverse: bool) -> EditorResult<Option<NodeEntry<'a>>> {
        let Some(at) = query.at.as_ref() else {
            return Ok(None);
        };

        let start = if reverse { at.start() } else { at.end() }.clone();
        if at.is_path() && start.is_root() {
            let key = if reverse { "previous.root" } else { "next.root" };
            self.report(EditorError::lookup(key, "The root has no siblings"))?;
            return Ok(None);
        }

        let options = NodesOptions {
            from: Some(start.clone()),
            reverse,
            ..NodesOptions::default()
        };

        let found = traversal::nodes(&*self.root, options)
            .filter(|(_, path)| !path.is_common(&start) && !start.is_common(path))
            .find(|(node, path)| match query.matcher {
                Some(matcher) => matcher(*node, path),
                None if at.is_path() => path.is_sibling(&start),
                None => true,
            });

        Ok(found)
    }

    /// Adjacent sibling of `target`, falling back to the nearest node at the
    /// same depth under a neighboring parent.
    pub fn sibling(&self, target: &Path, reverse: bool) -> Option<NodeEntry<'_>> {
        let adjacent = if reverse { target.previous() } else { target.next() };
        if let Some(candidate) = adjacent {
            if let Some(node) = traversal::get(&*self.root, &candidate) {
                return Some((node, candidate));
            }
        }

        let levels = traversal::paths_by_level(&*self.root, Some(target.len()));
        let row = levels.get(target.len())?;
        let position = row.iter().position(|path| path == target)?;
        let index = if reverse { position.checked_sub(1)? } else { position + 1 };
        let path = row.get(index)?.clone();

        Some((traversal::get(&*self.root, &path)?, path))
    }

    pub fn paths_by_level(&self, max_depth: Option<usize>) -> Vec<Vec<Path>> {
        traversal::paths_by_level(&*self.root, max_depth)
    }

    /// Visit the current snapshot depth-first. Breaking stops the walk.
    pub fn traverse<'a>(
        &'a self,
        order: TraversalOrder,
        consumer: impl FnMut(NodeRef<'a>, &Path) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        trunk_tree::traverse(&*self.root, order, consumer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trunk_tree::{path, Element};

    fn editor() -> TreeEditor {
        TreeEditor::new(vec![
            Element::new("a", "block").with_children(vec![
                Element::new("a0", "line"),
                Element::new("a1", "line"),
            ]),
            Element::new("b", "block").with_children(vec![Element::new("b0", "line")]),
        ])
    }

    fn ids(entries: &[NodeEntry<'_>]) -> Vec<String> {
        entries.iter().map(|(node, _)| node.id().to_string()).collect()
    }

    #[test]
    fn test_path_of_a_span_is_the_common_ancestor() {
        let editor = editor();
        assert_eq!(editor.path(Location::span(path![0, 0], path![0, 1]), None), path![0]);
        assert_eq!(editor.path(path![1, 0], Some(1)), path![1]);
    }

    #[test]
    fn test_missing_lookups_recover_to_none() {
        let editor = editor();
        assert!(editor.node(path![4]).unwrap().is_none());
        assert!(editor.parent(path![]).unwrap().is_none());
        assert_eq!(editor.first(path![0]).unwrap().map(|(_, p)| p), Some(path![0, 0]));
        assert_eq!(editor.last(path![]).unwrap().map(|(_, p)| p), Some(path![1, 0]));
    }

    #[test]
    fn test_next_and_previous_siblings() {
        let editor = editor();

        let next = editor.next(Query::at(path![0])).unwrap();
        assert_eq!(next.map(|(_, p)| p), Some(path![1]));

        let none = editor.next(Query::at(path![0, 1])).unwrap();
        assert!(none.is_none());

        let previous = editor.previous(Query::at(path![1, 0])).unwrap();
        assert!(previous.is_none());

        let is_line = |node: NodeRef<'_>, _: &Path| node.kind() == Some("line");
        let previous_line = editor.previous(Query::at(path![1, 0]).matching(&is_line)).unwrap();
        assert_eq!(previous_line.map(|(_, p)| p), Some(path![0, 1]));

        assert!(editor.next(Query::at(path![])).unwrap().is_none());
    }

    #[test]
    fn test_levels_and_above() {
        let editor = editor();
        let levels = editor.levels(Query::at(path![1, 0]));
        assert_eq!(ids(&levels), vec![editor.id().to_string(), "b".to_string(), "b0".to_string()]);

        let is_block = |node: NodeRef<'_>, _: &Path| node.kind() == Some("block");
        let above = editor.above(Query::at(path![1, 0]).matching(&is_block));
        assert_eq!(above.map(|(_, p)| p), Some(path![1]));
    }

    #[test]
    fn test_sibling_crosses_parents() {
        let editor = editor();
        assert_eq!(editor.sibling(&path![0, 0], false).map(|(_, p)| p), Some(path![0, 1]));
        assert_eq!(editor.sibling(&path![0, 1], false).map(|(_, p)| p), Some(path![1, 0]));
        assert_eq!(editor.sibling(&path![1, 0], true).map(|(_, p)| p), Some(path![0, 1]));
        assert!(editor.sibling(&path![1, 0], false).is_none());
    }

    #[test]
    fn test_nodes_within_a_span() {
        let editor = editor();
        let found: Vec<_> = editor
            .nodes(Query::at(Location::span(path![0, 1], path![1])))
            .map(|(_, p)| p)
            .collect();

        assert_eq!(found, vec![path![], path![0], path![0, 1], path![1], path![1, 0]]);
    }
}
