use trunk_tree::{path, Element, Operation, Path, Properties};

fn insert(at: Path) -> Operation {
    Operation::InsertNode {
        node: Element::new("new", "block"),
        path: at,
    }
}

fn remove(at: Path) -> Operation {
    Operation::RemoveNode {
        node: Element::new("old", "block"),
        path: at,
    }
}

fn mv(from: Path, to: Path) -> Operation {
    Operation::MoveNode {
        path: from,
        new_path: to,
    }
}

fn check(op: &Operation, cases: &[(Path, Option<Path>)]) {
    for (input, expected) in cases {
        assert_eq!(
            &input.transform(op),
            expected,
            "transform {} across {:?}",
            input,
            op
        );
    }
}

#[test]
fn test_insert_shifts_equal_following_and_nested_paths() {
    check(
        &insert(path![0, 1]),
        &[
            (path![0, 0], Some(path![0, 0])),
            (path![0, 1], Some(path![0, 2])),
            (path![0, 1, 3], Some(path![0, 2, 3])),
            (path![0, 2], Some(path![0, 3])),
            (path![0, 2, 0], Some(path![0, 3, 0])),
            (path![0], Some(path![0])),
            (path![1, 0], Some(path![1, 0])),
            (path![], Some(path![])),
        ],
    );
}

#[test]
fn test_insert_at_top_level() {
    check(
        &insert(path![1]),
        &[
            (path![0, 5], Some(path![0, 5])),
            (path![1], Some(path![2])),
            (path![2, 5], Some(path![3, 5])),
        ],
    );
}

#[test]
fn test_remove_deletes_the_subtree_and_pulls_followers_back() {
    check(
        &remove(path![0, 1]),
        &[
            (path![0, 1], None),
            (path![0, 1, 2], None),
            (path![0, 0], Some(path![0, 0])),
            (path![0, 2], Some(path![0, 1])),
            (path![0, 2, 4], Some(path![0, 1, 4])),
            (path![0], Some(path![0])),
            (path![1], Some(path![1])),
            (path![], Some(path![])),
        ],
    );
}

#[test]
fn test_set_is_identity() {
    let op = Operation::SetNode {
        path: path![0],
        properties: Properties::new(),
        new_properties: Properties::new(),
    };

    check(&op, &[(path![0], Some(path![0])), (path![3, 1], Some(path![3, 1]))]);
}

#[test]
fn test_forward_sibling_move() {
    // [a, b, c, d] -> [b, c, a, d]
    check(
        &mv(path![0], path![2]),
        &[
            (path![0], Some(path![2])),
            (path![0, 3], Some(path![2, 3])),
            (path![1], Some(path![0])),
            (path![2], Some(path![1])),
            (path![2, 0], Some(path![1, 0])),
            (path![3], Some(path![3])),
        ],
    );
}

#[test]
fn test_backward_sibling_move() {
    // [a, b, c, d] -> [c, a, b, d]
    check(
        &mv(path![2], path![0]),
        &[
            (path![2], Some(path![0])),
            (path![0], Some(path![1])),
            (path![1], Some(path![2])),
            (path![3], Some(path![3])),
        ],
    );
}

#[test]
fn test_move_into_a_later_sibling() {
    // [a, b, c[x]] -> [b, c[a, x]]
    check(
        &mv(path![0], path![2, 0]),
        &[
            (path![0], Some(path![1, 0])),
            (path![1], Some(path![0])),
            (path![2], Some(path![1])),
            (path![2, 0], Some(path![1, 1])),
        ],
    );
}

#[test]
fn test_move_out_of_a_parent_to_the_front() {
    // [a, b[b0, b1]] -> [b0, a, b[b1]]
    check(
        &mv(path![1, 0], path![0]),
        &[
            (path![1, 0], Some(path![0])),
            (path![0], Some(path![1])),
            (path![1], Some(path![2])),
            (path![1, 1], Some(path![2, 0])),
        ],
    );
}

#[test]
fn test_move_out_of_a_parent_to_the_end() {
    // [a[a0, a1, a2], b] -> [a[a0, a2], b, a1]
    check(
        &mv(path![0, 1], path![2]),
        &[
            (path![0, 1], Some(path![2])),
            (path![0, 2], Some(path![0, 1])),
            (path![0, 0], Some(path![0, 0])),
            (path![0], Some(path![0])),
            (path![1], Some(path![1])),
        ],
    );
}

#[test]
fn test_noop_and_root_moves_leave_paths_alone() {
    check(&mv(path![1], path![1]), &[(path![1], Some(path![1])), (path![2], Some(path![2]))]);
    check(&mv(path![], path![1]), &[(path![1], Some(path![1]))]);
}
