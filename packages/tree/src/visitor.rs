use crate::node::NodeRef;
use crate::path::Path;
use std::ops::ControlFlow;

/// Visitor pattern for walking a tree immutably
///
/// `enter` runs before a node's children are walked and `leave` after. Both
/// default to doing nothing. Returning `ControlFlow::Break` from either stops
/// the whole walk.
pub trait Visitor<'a>: Sized {
    fn visit_node(&mut self, node: NodeRef<'a>, path: &Path) -> ControlFlow<()> {
        walk_node(self, node, path)
    }

    fn enter(&mut self, _node: NodeRef<'a>, _path: &Path) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn leave(&mut self, _node: NodeRef<'a>, _path: &Path) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Default walk: enter, children in order, leave
pub fn walk_node<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: NodeRef<'a>,
    path: &Path,
) -> ControlFlow<()> {
    visitor.enter(node, path)?;

    for (index, child) in node.children().iter().enumerate() {
        let child_path = path.child(index);
        visitor.visit_node(NodeRef::Element(child.as_ref()), &child_path)?;
    }

    visitor.leave(node, path)
}

/// When a closure passed to [`traverse`] sees each node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Parents before their children
    #[default]
    PreOrder,
    /// Children before their parents
    PostOrder,
}

struct OrderedVisitor<F> {
    order: TraversalOrder,
    consumer: F,
}

impl<'a, F> Visitor<'a> for OrderedVisitor<F>
where
    F: FnMut(NodeRef<'a>, &Path) -> ControlFlow<()>,
{
    fn enter(&mut self, node: NodeRef<'a>, path: &Path) -> ControlFlow<()> {
        match self.order {
            TraversalOrder::PreOrder => (self.consumer)(node, path),
            TraversalOrder::PostOrder => ControlFlow::Continue(()),
        }
    }

    fn leave(&mut self, node: NodeRef<'a>, path: &Path) -> ControlFlow<()> {
        match self.order {
            TraversalOrder::PreOrder => ControlFlow::Continue(()),
            TraversalOrder::PostOrder => (self.consumer)(node, path),
        }
    }
}

/// Walk every node below and including `root`, calling `consumer` in the
/// given order until it breaks.
pub fn traverse<'a, F>(root: impl Into<NodeRef<'a>>, order: TraversalOrder, consumer: F) -> ControlFlow<()>
where
    F: FnMut(NodeRef<'a>, &Path) -> ControlFlow<()>,
{
    let mut visitor = OrderedVisitor { order, consumer };
    visitor.visit_node(root.into(), &Path::root())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Element, Root};

    fn tree() -> Root {
        Root::new(
            "root",
            vec![
                Element::new("a", "block").with_children(vec![Element::new("a0", "line")]),
                Element::new("b", "block"),
            ],
        )
    }

    #[test]
    fn test_pre_and_post_order() {
        let root = tree();

        let mut seen = Vec::new();
        let _ = traverse(&root, TraversalOrder::PreOrder, |node, _| {
            seen.push(node.id());
            ControlFlow::Continue(())
        });
        assert_eq!(seen, vec!["root", "a", "a0", "b"]);

        let mut seen = Vec::new();
        let _ = traverse(&root, TraversalOrder::PostOrder, |node, path| {
            seen.push((node.id(), path.clone()));
            ControlFlow::Continue(())
        });
        let ids: Vec<_> = seen.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec!["a0", "a", "b", "root"]);
        assert_eq!(seen[0].1, crate::path![0, 0]);
    }

    #[test]
    fn test_break_stops_the_walk() {
        let root = tree();
        let mut seen = Vec::new();

        let flow = traverse(&root, TraversalOrder::PreOrder, |node, _| {
            seen.push(node.id());
            if node.id() == "a" {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        assert!(flow.is_break());
        assert_eq!(seen, vec!["root", "a"]);
    }

    #[test]
    fn test_custom_visitor_counts_leaves() {
        struct Leaves(usize);

        impl<'a> Visitor<'a> for Leaves {
            fn enter(&mut self, node: NodeRef<'a>, _path: &Path) -> ControlFlow<()> {
                if node.is_leaf() {
                    self.0 += 1;
                }
                ControlFlow::Continue(())
            }
        }

        let root = tree();
        let mut leaves = Leaves(0);
        let _ = leaves.visit_node(root.as_node(), &Path::root());
        assert_eq!(leaves.0, 2);
    }
}
