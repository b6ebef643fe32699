
use std::collections::BTreeSet;

use self::quick::Op;
use crate::{Cursor, Tree, TreeError};

/// Walks forwards with `next` and backwards with `prev`, checking both against `model`.
fn walks_match(tree: &Tree<i8>, model: &BTreeSet<i8>) -> bool {
    let mut forward = Vec::new();
    let mut cursor = tree.begin();
    while cursor != tree.end() {
        forward.push(*tree.get(cursor).unwrap());
        cursor = tree.next(cursor);
    }

    let mut backward = Vec::new();
    let mut cursor = tree.end();
    while cursor != tree.begin() {
        cursor = tree.prev(cursor);
        backward.push(*tree.get(cursor).unwrap());
    }
    backward.reverse();

    forward.iter().eq(model.iter()) && backward == forward
}

/// Applies `ops` to a tree and a `BTreeSet`, checking every cursor a removal hands back.
#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut model = BTreeSet::new();

    for op in ops {
        match op {
            Op::Insert(k) => match tree.try_insert(k) {
                Ok(cursor) => {
                    assert!(model.insert(k));
                    assert_eq!(tree.get(cursor), Some(&k));
                }
                Err(err) => {
                    assert_eq!(err, TreeError::DuplicateKey);
                    assert!(model.contains(&k));
                }
            },
            Op::Remove(k) => {
                let cursor = tree.find(&k);
                if cursor == tree.end() {
                    assert!(!model.contains(&k));
                    continue;
                }
                let next = tree.remove(cursor);
                assert!(model.remove(&k));
                assert_eq!(tree.get(next), model.range(k..).next());
            }
            Op::RemoveNth(n) => {
                if model.is_empty() {
                    continue;
                }
                let n = n % model.len();
                let mut cursor: Cursor = tree.begin();
                for _ in 0..n {
                    cursor = tree.next(cursor);
                }
                let (k, next) = tree.take(cursor);
                assert!(model.remove(&k));
                assert_eq!(tree.get(next), model.range(k..).next());
            }
            Op::Walk => {
                if !walks_match(&tree, &model) {
                    return false;
                }
            }
        }
        tree.assert_invariants();
        assert_eq!(tree.len(), model.len());
        assert_eq!(tree.is_empty(), model.is_empty());
    }

    walks_match(&tree, &model)
}

/// Every inserted key is found at the cursor `insert` returned until it is removed.
#[quickcheck]
fn find_round_trip(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    let mut cursors = Vec::new();
    for x in xs {
        if let Ok(cursor) = tree.try_insert(x) {
            cursors.push((x, cursor));
        }
    }
    for delete in &deletes {
        let cursor = tree.find(delete);
        if cursor != tree.end() {
            tree.remove(cursor);
        }
    }

    cursors.iter().all(|&(x, cursor)| {
        if deletes.contains(&x) {
            tree.find(&x) == tree.end() && tree.get(cursor).is_none()
        } else {
            tree.find(&x) == cursor
        }
    })
}
