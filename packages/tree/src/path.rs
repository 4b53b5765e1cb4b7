//! # Tree Paths
//!
//! A [`Path`] addresses a node by the child index taken at every depth,
//! starting from the root. `[]` is the root itself, `[0]` its first child,
//! `[0, 2]` the third child of that node, and so on.
//!
//! ## Document order
//!
//! Paths compare lexicographically over their shared length, so an ancestor
//! compares *equal* to its descendants. `is_before` / `is_after` are derived
//! from that comparison and treat a prefix as neither before nor after.
//!
//! ## Transforming
//!
//! [`Path::transform`] answers "where does the node that lived at this path
//! live after `op` was applied?". Every live reference, every dirty path and
//! every inverted move goes through it, so its behavior is pinned by an
//! exhaustive case table in `tests/path_transform.rs`.

use crate::operation::Operation;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Build a [`Path`] from a list of indices.
///
/// ```rust
/// use trunk_tree::{path, Path};
///
/// assert_eq!(path![0, 2], Path::new(vec![0, 2]));
/// assert!(path![].is_root());
/// ```
#[macro_export]
macro_rules! path {
    ($($index:expr),* $(,)?) => {
        $crate::Path::new(vec![$($index),*])
    };
}

/// Index sequence from the root to a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<usize>);

impl Path {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// The empty path, addressing the root node.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }

    /// Index of the node inside its parent, `None` for the root.
    pub fn last_index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Path of the child at `index` below this path.
    pub fn child(&self, index: usize) -> Path {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    /// Append `suffix` to this path.
    pub fn concat(&self, suffix: &[usize]) -> Path {
        let mut indices = Vec::with_capacity(self.0.len() + suffix.len());
        indices.extend_from_slice(&self.0);
        indices.extend_from_slice(suffix);
        Self(indices)
    }

    /// The first `depth` entries of this path (the whole path if shorter).
    pub fn truncate(&self, depth: usize) -> Path {
        Self(self.0[..depth.min(self.0.len())].to_vec())
    }

    /// Canonical string key (`"0,1,2"`), used to deduplicate path sets.
    pub fn key(&self) -> String {
        self.0
            .iter()
            .map(|index| index.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Compare over the shared length only.
    pub fn compare(&self, another: &Path) -> Ordering {
        self.0
            .iter()
            .zip(another.0.iter())
            .map(|(a, b)| a.cmp(b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    pub fn is_before(&self, another: &Path) -> bool {
        self.compare(another) == Ordering::Less
    }

    pub fn is_after(&self, another: &Path) -> bool {
        self.compare(another) == Ordering::Greater
    }

    /// Strict prefix of `another`.
    pub fn is_ancestor(&self, another: &Path) -> bool {
        self.len() < another.len() && self.compare(another) == Ordering::Equal
    }

    /// `another` is a strict prefix of this path.
    pub fn is_descendant(&self, another: &Path) -> bool {
        self.len() > another.len() && self.compare(another) == Ordering::Equal
    }

    /// This path is the direct parent of `another`.
    pub fn is_parent(&self, another: &Path) -> bool {
        self.len() + 1 == another.len() && self.compare(another) == Ordering::Equal
    }

    /// This path is a direct child of `another`.
    pub fn is_child(&self, another: &Path) -> bool {
        self.len() == another.len() + 1 && self.compare(another) == Ordering::Equal
    }

    /// Prefix of, or equal to, `another`.
    pub fn is_common(&self, another: &Path) -> bool {
        self.len() <= another.len() && self.compare(another) == Ordering::Equal
    }

    /// Same parent, different index.
    pub fn is_sibling(&self, another: &Path) -> bool {
        if self.is_root() || self.len() != another.len() {
            return false;
        }

        let depth = self.len() - 1;
        self.0[..depth] == another.0[..depth] && self.0[depth] != another.0[depth]
    }

    /// `another` shares this path's parent prefix and has a greater final
    /// index at this path's depth.
    pub fn ends_before(&self, another: &Path) -> bool {
        self.ends_with(another, Ordering::Less)
    }

    /// `another` shares this path's parent prefix and has a smaller final
    /// index at this path's depth.
    pub fn ends_after(&self, another: &Path) -> bool {
        self.ends_with(another, Ordering::Greater)
    }

    /// This path is a prefix of, or equal to, `another`.
    pub fn ends_at(&self, another: &Path) -> bool {
        another.len() >= self.len() && self.0[..] == another.0[..self.len()]
    }

    fn ends_with(&self, another: &Path, ordering: Ordering) -> bool {
        let Some(depth) = self.len().checked_sub(1) else {
            return false;
        };

        another.len() > depth
            && self.0[..depth] == another.0[..depth]
            && self.0[depth].cmp(&another.0[depth]) == ordering
    }

    /// Every prefix from the root down to this path, inclusive.
    pub fn levels(&self) -> Vec<Path> {
        (0..=self.len()).map(|depth| self.truncate(depth)).collect()
    }

    /// Every strict prefix, root first.
    pub fn ancestors(&self) -> Vec<Path> {
        (0..self.len()).map(|depth| self.truncate(depth)).collect()
    }

    pub fn parent(&self) -> Option<Path> {
        if self.is_root() {
            return None;
        }

        Some(self.truncate(self.len() - 1))
    }

    pub fn next(&self) -> Option<Path> {
        let last = self.last_index()?;
        let mut next = self.clone();
        *next.0.last_mut()? = last + 1;
        Some(next)
    }

    pub fn previous(&self) -> Option<Path> {
        let last = self.last_index()?.checked_sub(1)?;
        let mut previous = self.clone();
        *previous.0.last_mut()? = last;
        Some(previous)
    }

    pub fn has_previous(&self) -> bool {
        self.last_index().is_some_and(|index| index > 0)
    }

    /// Longest shared prefix.
    pub fn common(&self, another: &Path) -> Path {
        self.0
            .iter()
            .zip(another.0.iter())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| *a)
            .collect()
    }

    /// The part of this path below `ancestor`, if `ancestor` is a prefix of it.
    pub fn relative(&self, ancestor: &Path) -> Option<Path> {
        if !ancestor.is_common(self) {
            return None;
        }

        Some(Self(self.0[ancestor.len()..].to_vec()))
    }

    /// Translate this path across `op`. Returns `None` when the node it
    /// addresses was removed by the operation.
    pub fn transform(&self, op: &Operation) -> Option<Path> {
        let mut p = self.clone();

        if p.is_root() {
            return Some(p);
        }

        match op {
            Operation::InsertNode { path: at, .. } => {
                if at.is_root() {
                    return Some(p);
                }

                if at == &p || at.ends_before(&p) || at.is_ancestor(&p) {
                    p.0[at.len() - 1] += 1;
                }
            }

            Operation::RemoveNode { path: at, .. } => {
                if at == &p || at.is_ancestor(&p) {
                    return None;
                }

                if at.ends_before(&p) {
                    p.0[at.len() - 1] -= 1;
                }
            }

            Operation::MoveNode { path: from, new_path: to } => {
                if from == to || from.is_root() || to.is_root() {
                    return Some(p);
                }

                // The moved subtree itself: re-root under the destination.
                if from.is_ancestor(&p) || from == &p {
                    let mut moved = to.clone();

                    if from.ends_before(to) && from.len() < to.len() {
                        moved.0[from.len() - 1] -= 1;
                    }

                    moved.0.extend_from_slice(&p.0[from.len()..]);
                    return Some(moved);
                }

                if from.is_sibling(to) && (to.is_ancestor(&p) || to == &p) {
                    if from.ends_before(&p) {
                        p.0[from.len() - 1] -= 1;
                    } else {
                        p.0[from.len() - 1] += 1;
                    }
                } else if to.ends_before(&p) || to == &p || to.is_ancestor(&p) {
                    if from.ends_before(&p) {
                        p.0[from.len() - 1] -= 1;
                    }

                    p.0[to.len() - 1] += 1;
                } else if from.ends_before(&p) {
                    if to == &p {
                        p.0[to.len() - 1] += 1;
                    }

                    p.0[from.len() - 1] -= 1;
                }
            }

            Operation::SetNode { .. } => {}
        }

        Some(p)
    }
}

impl Deref for Path {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for Path {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Path {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl FromIterator<usize> for Path {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_ignores_extra_depth() {
        assert_eq!(path![0, 1].compare(&path![0, 1, 4]), Ordering::Equal);
        assert_eq!(path![0, 1].compare(&path![0, 2]), Ordering::Less);
        assert_eq!(path![1].compare(&path![0, 9]), Ordering::Greater);
        assert!(path![0].is_before(&path![1, 0]));
        assert!(!path![0].is_before(&path![0, 3]));
    }

    #[test]
    fn test_ancestry_relations() {
        assert!(path![0].is_ancestor(&path![0, 1]));
        assert!(path![].is_ancestor(&path![3]));
        assert!(!path![0, 1].is_ancestor(&path![0, 1]));

        assert!(path![0].is_parent(&path![0, 1]));
        assert!(!path![0].is_parent(&path![0, 1, 2]));
        assert!(path![0, 1].is_child(&path![0]));
        assert!(path![0, 1, 2].is_descendant(&path![0]));

        assert!(path![0, 1].is_common(&path![0, 1]));
        assert!(path![0].is_common(&path![0, 1]));
        assert!(!path![0, 1].is_common(&path![0]));
    }

    #[test]
    fn test_siblings() {
        assert!(path![0, 1].is_sibling(&path![0, 3]));
        assert!(!path![0, 1].is_sibling(&path![0, 1]));
        assert!(!path![0, 1].is_sibling(&path![1, 1]));
        assert!(!path![].is_sibling(&path![]));
    }

    #[test]
    fn test_ends_relations() {
        assert!(path![0, 1].ends_before(&path![0, 2]));
        assert!(path![0, 1].ends_before(&path![0, 2, 5]));
        assert!(!path![0, 1].ends_before(&path![1, 2]));
        assert!(!path![0, 1].ends_before(&path![0]));
        assert!(path![0, 3].ends_after(&path![0, 2, 7]));
        assert!(path![0, 1].ends_at(&path![0, 1, 3]));
        assert!(!path![0, 1].ends_at(&path![0]));
    }

    #[test]
    fn test_levels_and_ancestors() {
        assert_eq!(path![1, 2].levels(), vec![path![], path![1], path![1, 2]]);
        assert_eq!(path![1, 2].ancestors(), vec![path![], path![1]]);
        assert_eq!(path![].levels(), vec![path![]]);
        assert!(path![].ancestors().is_empty());
    }

    #[test]
    fn test_siblings_navigation() {
        assert_eq!(path![0, 1].next(), Some(path![0, 2]));
        assert_eq!(path![0, 1].previous(), Some(path![0, 0]));
        assert_eq!(path![0, 0].previous(), None);
        assert_eq!(path![].next(), None);
        assert_eq!(path![].previous(), None);
        assert_eq!(path![].parent(), None);
        assert!(path![2].has_previous());
        assert!(!path![0].has_previous());
    }

    #[test]
    fn test_common_and_relative() {
        assert_eq!(path![0, 1, 2].common(&path![0, 1, 5]), path![0, 1]);
        assert_eq!(path![3].common(&path![4]), path![]);
        assert_eq!(path![0, 1, 2].relative(&path![0]), Some(path![1, 2]));
        assert_eq!(path![0, 1].relative(&path![0, 1]), Some(path![]));
        assert_eq!(path![0, 1].relative(&path![1]), None);
    }

    #[test]
    fn test_key_and_display() {
        assert_eq!(path![0, 12, 3].key(), "0,12,3");
        assert_eq!(path![].key(), "");
        assert_eq!(path![4, 2].to_string(), "[4,2]");
    }

    #[test]
    fn test_path_serializes_as_plain_array() {
        let json = serde_json::to_string(&path![1, 0]).unwrap();
        assert_eq!(json, "[1,0]");
    }
}
