//! # Tree Read Model
//!
//! Lookups and traversals over a borrowed tree. Nothing here mutates; every
//! function takes the node to start from (usually the [`Root`](crate::Root))
//! and returns views borrowing from it.
//!
//! [`nodes`] is the one traversal everything else is built on: a depth-first
//! walk in document order (or reverse document order) that can start at an
//! arbitrary `from` path, stop past a `to` path, and skip subtrees.

use crate::node::{Element, NodeRef};
use crate::path::Path;
use std::collections::VecDeque;

/// A node together with its path from the traversal root
pub type NodeEntry<'a> = (NodeRef<'a>, Path);

/// Predicate that vetoes descending into a node's subtree when it returns
/// `true`. The node itself is still yielded.
pub type PassFn<'p> = &'p dyn Fn(NodeRef<'_>, &Path) -> bool;

/// Bounds and direction of a [`nodes`] traversal
#[derive(Clone, Default)]
pub struct NodesOptions<'p> {
    /// Where to start. The root and every ancestor of `from` are yielded
    /// first, then `from` itself and everything after it.
    pub from: Option<Path>,

    /// Stop once the cursor moves past this path.
    pub to: Option<Path>,

    pub reverse: bool,

    pub pass: Option<PassFn<'p>>,
}

impl<'p> NodesOptions<'p> {
    pub fn between(from: Path, to: Path) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn with_pass(mut self, pass: PassFn<'p>) -> Self {
        self.pass = Some(pass);
        self
    }
}

/// Depth-first cursor over a tree.
///
/// Each step either yields the node under the cursor (on first arrival),
/// descends into its children, moves to the adjacent sibling, or climbs back
/// to the parent. A node reached by climbing has already been yielded and
/// its children already walked.
pub struct Nodes<'a, 'p> {
    root: NodeRef<'a>,
    from: Path,
    to: Option<Path>,
    reverse: bool,
    pass: Option<PassFn<'p>>,
    cursor: Option<Path>,
    ascended: bool,
}

impl<'a, 'p> Nodes<'a, 'p> {
    fn past_end(&self, path: &Path) -> bool {
        match &self.to {
            Some(to) if self.reverse => path.is_before(to),
            Some(to) => path.is_after(to),
            None => false,
        }
    }

    /// Move the cursor away from `path`, whose node is `node` (`None` when
    /// the cursor points past the end of a children list).
    fn advance(&mut self, path: Path, node: Option<NodeRef<'a>>, fresh: bool) {
        if let Some(node) = node.filter(|node| fresh && !node.is_leaf()) {
            let vetoed = self.pass.is_some_and(|pass| pass(node, &path));

            if !vetoed {
                let index = if path.is_ancestor(&self.from) {
                    self.from[path.len()]
                } else if self.reverse {
                    node.children().len() - 1
                } else {
                    0
                };

                self.cursor = Some(path.child(index));
                self.ascended = false;
                return;
            }
        }

        if path.is_root() {
            self.cursor = None;
            return;
        }

        if !self.reverse {
            if let Some(next) = path.next().filter(|next| has(self.root, next)) {
                self.cursor = Some(next);
                self.ascended = false;
                return;
            }
        } else if let Some(previous) = path.previous() {
            self.cursor = Some(previous);
            self.ascended = false;
            return;
        }

        self.cursor = path.parent();
        self.ascended = true;
    }
}

impl<'a, 'p> Iterator for Nodes<'a, 'p> {
    type Item = NodeEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let path = self.cursor.take()?;

            if self.past_end(&path) {
                return None;
            }

            let node = get(self.root, &path);
            let fresh = node.is_some() && !self.ascended;
            let entry = node.filter(|_| fresh).map(|node| (node, path.clone()));

            self.advance(path, node, fresh);

            if entry.is_some() {
                return entry;
            }
        }
    }
}

/// Bounded depth-first traversal, see [`NodesOptions`].
pub fn nodes<'a, 'p>(root: impl Into<NodeRef<'a>>, options: NodesOptions<'p>) -> Nodes<'a, 'p> {
    Nodes {
        root: root.into(),
        from: options.from.unwrap_or_default(),
        to: options.to,
        reverse: options.reverse,
        pass: options.pass,
        cursor: Some(Path::root()),
        ascended: false,
    }
}

/// Every node except the traversal root.
pub fn descendants<'a, 'p>(
    root: impl Into<NodeRef<'a>>,
    options: NodesOptions<'p>,
) -> impl Iterator<Item = NodeEntry<'a>> + 'p
where
    'a: 'p,
{
    nodes(root, options).filter(|(_, path)| !path.is_root())
}

/// Every element node, in traversal order.
pub fn elements<'a, 'p>(
    root: impl Into<NodeRef<'a>>,
    options: NodesOptions<'p>,
) -> impl Iterator<Item = (&'a Element, Path)> + 'p
where
    'a: 'p,
{
    nodes(root, options).filter_map(|(node, path)| Some((node.as_element()?, path)))
}

pub fn get<'a>(root: impl Into<NodeRef<'a>>, path: &Path) -> Option<NodeRef<'a>> {
    let mut node = root.into();

    for &index in path.iter() {
        node = NodeRef::Element(node.child(index)?);
    }

    Some(node)
}

pub fn has<'a>(root: impl Into<NodeRef<'a>>, path: &Path) -> bool {
    get(root, path).is_some()
}

/// The element at `path`; `None` for the root path.
pub fn descendant<'a>(root: impl Into<NodeRef<'a>>, path: &Path) -> Option<&'a Element> {
    get(root, path)?.as_element()
}

pub fn child<'a>(node: impl Into<NodeRef<'a>>, index: usize) -> Option<&'a Element> {
    node.into().child(index)
}

pub fn parent<'a>(root: impl Into<NodeRef<'a>>, path: &Path) -> Option<NodeRef<'a>> {
    get(root, &path.parent()?)
}

/// The deepest leftmost leaf at or below `path`.
pub fn first<'a>(root: impl Into<NodeRef<'a>>, path: &Path) -> Option<NodeEntry<'a>> {
    let mut node = get(root, path)?;
    let mut path = path.clone();

    while let Some(child) = node.child(0) {
        node = NodeRef::Element(child);
        path = path.child(0);
    }

    Some((node, path))
}

/// The deepest rightmost leaf at or below `path`.
pub fn last<'a>(root: impl Into<NodeRef<'a>>, path: &Path) -> Option<NodeEntry<'a>> {
    let mut node = get(root, path)?;
    let mut path = path.clone();

    while let Some(index) = node.children().len().checked_sub(1) {
        node = NodeRef::Element(&node.children()[index]);
        path = path.child(index);
    }

    Some((node, path))
}

/// The deepest node containing both paths.
pub fn common<'a>(root: impl Into<NodeRef<'a>>, path: &Path, another: &Path) -> Option<NodeEntry<'a>> {
    let common = path.common(another);
    Some((get(root, &common)?, common))
}

/// Nodes from the root down to `path`, stopping at the first unresolved
/// level.
pub fn levels<'a>(root: impl Into<NodeRef<'a>>, path: &Path, reverse: bool) -> Vec<NodeEntry<'a>> {
    let root = root.into();
    let mut entries: Vec<_> = path
        .levels()
        .into_iter()
        .map_while(|level| Some((get(root, &level)?, level)))
        .collect();

    if reverse {
        entries.reverse();
    }

    entries
}

/// Nodes strictly above `path`, skipping unresolved levels.
pub fn ancestors<'a>(root: impl Into<NodeRef<'a>>, path: &Path, reverse: bool) -> Vec<NodeEntry<'a>> {
    let root = root.into();
    let mut entries: Vec<_> = path
        .ancestors()
        .into_iter()
        .filter_map(|level| Some((get(root, &level)?, level)))
        .collect();

    if reverse {
        entries.reverse();
    }

    entries
}

/// Direct children of the node at `path`; empty when it does not resolve.
pub fn children<'a>(root: impl Into<NodeRef<'a>>, path: &Path, reverse: bool) -> Vec<NodeEntry<'a>> {
    let siblings = get(root, path).map(|node| node.children()).unwrap_or_default();
    let mut entries: Vec<_> = siblings
        .iter()
        .enumerate()
        .map(|(index, child)| (NodeRef::Element(child.as_ref()), path.child(index)))
        .collect();

    if reverse {
        entries.reverse();
    }

    entries
}

/// Breadth-first grouping of every path by depth, down to `max_depth`
/// inclusive.
pub fn paths_by_level<'a>(root: impl Into<NodeRef<'a>>, max_depth: Option<usize>) -> Vec<Vec<Path>> {
    let mut levels: Vec<Vec<Path>> = Vec::new();
    let mut queue = VecDeque::from([(root.into(), Path::root())]);

    while let Some((node, path)) = queue.pop_front() {
        let depth = path.len();

        if max_depth.is_some_and(|max_depth| depth > max_depth) {
            break;
        }

        if levels.len() <= depth {
            levels.resize_with(depth + 1, Vec::new);
        }

        for (index, child) in node.children().iter().enumerate() {
            queue.push_back((NodeRef::Element(child.as_ref()), path.child(index)));
        }

        levels[depth].push(path);
    }

    levels
}

pub fn last_child<'a>(entry: &NodeEntry<'a>) -> Option<NodeEntry<'a>> {
    let (node, path) = entry;
    let index = node.children().len().checked_sub(1)?;
    Some((NodeRef::Element(&node.children()[index]), path.child(index)))
}

pub fn last_child_path(entry: &NodeEntry<'_>) -> Option<Path> {
    last_child(entry).map(|(_, path)| path)
}

/// Whether `child_path` addresses the last child of `parent`.
pub fn is_last_child(parent: &NodeEntry<'_>, child_path: &Path) -> bool {
    last_child_path(parent).as_ref() == Some(child_path)
}
