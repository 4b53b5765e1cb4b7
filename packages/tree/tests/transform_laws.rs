use proptest::prelude::*;
use trunk_tree::{Element, Operation, Path, Properties};

fn arb_path() -> impl Strategy<Value = Path> {
    prop::collection::vec(0usize..4, 1..4).prop_map(Path::new)
}

fn arb_sibling_move() -> impl Strategy<Value = Operation> {
    (prop::collection::vec(0usize..3, 0..3), 0usize..5, 0usize..5)
        .prop_filter("distinct indices", |(_, from, to)| from != to)
        .prop_map(|(parent, from, to)| {
            let parent = Path::new(parent);
            Operation::MoveNode {
                path: parent.child(from),
                new_path: parent.child(to),
            }
        })
}

fn node() -> Element {
    Element::new("n", "block")
}

fn assert_round_trip(p: &Path, op: &Operation) -> Result<(), TestCaseError> {
    if let Some(moved) = p.transform(op) {
        prop_assert_eq!(moved.transform(&op.inverse()), Some(p.clone()));
    }
    Ok(())
}

proptest! {
    #[test]
    fn insert_round_trips(p in arb_path(), at in arb_path()) {
        assert_round_trip(&p, &Operation::InsertNode { node: node(), path: at })?;
    }

    #[test]
    fn remove_round_trips(p in arb_path(), at in arb_path()) {
        assert_round_trip(&p, &Operation::RemoveNode { node: node(), path: at })?;
    }

    #[test]
    fn set_round_trips(p in arb_path(), at in arb_path()) {
        let op = Operation::SetNode {
            path: at,
            properties: Properties::new(),
            new_properties: Properties::new(),
        };
        assert_round_trip(&p, &op)?;
    }

    #[test]
    fn sibling_move_round_trips(p in arb_path(), op in arb_sibling_move()) {
        assert_round_trip(&p, &op)?;
    }

    #[test]
    fn insert_shifts_only_equal_following_or_nested(p in arb_path(), at in arb_path()) {
        let op = Operation::InsertNode { node: node(), path: at.clone() };
        let moved = p.transform(&op).expect("insert never deletes");

        if at == p || at.ends_before(&p) || at.is_ancestor(&p) {
            let depth = at.len() - 1;
            prop_assert_eq!(moved[depth], p[depth] + 1);
            prop_assert_eq!(moved.len(), p.len());
        } else {
            prop_assert_eq!(moved, p);
        }
    }

    #[test]
    fn remove_deletes_exactly_the_subtree(p in arb_path(), at in arb_path()) {
        let op = Operation::RemoveNode { node: node(), path: at.clone() };
        let deleted = at == p || at.is_ancestor(&p);
        prop_assert_eq!(p.transform(&op).is_none(), deleted);
    }
}
