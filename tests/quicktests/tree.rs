use cursor_bst::Tree;

use std::collections::{BTreeSet, HashSet};

/// Builds a tree from `xs`, skipping repeated keys.
fn build(xs: &[i16]) -> Tree<i16> {
    let mut tree = Tree::new();
    for x in xs {
        let _ = tree.try_insert(*x);
    }
    tree
}

#[quickcheck]
fn in_order_walk_is_sorted(xs: Vec<i16>) -> bool {
    let tree = build(&xs);
    let expected: BTreeSet<_> = xs.iter().copied().collect();

    tree.len() == expected.len() && tree.iter().eq(expected.iter())
}

#[quickcheck]
fn contains(xs: Vec<i16>) -> bool {
    let tree = build(&xs);
    xs.iter().all(|x| tree.get(tree.find(x)) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i16>, nots: Vec<i16>) -> bool {
    let tree = build(&xs);
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x) == tree.end())
}

#[quickcheck]
fn with_deletions(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
    let mut tree = build(&xs);
    for delete in &deletes {
        let cursor = tree.find(delete);
        if cursor != tree.end() {
            tree.remove(cursor);
        }
    }

    let still_present: BTreeSet<_> = xs.iter().filter(|x| !deletes.contains(x)).collect();

    deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
        && tree.iter().eq(still_present.into_iter())
}

#[quickcheck]
fn removal_returns_successor(xs: Vec<i16>, which: usize) -> bool {
    let mut tree = build(&xs);
    if tree.is_empty() {
        return tree.begin() == tree.end();
    }

    let sorted: Vec<_> = tree.iter().copied().collect();
    let index = which % sorted.len();
    let next = tree.remove(tree.find(&sorted[index]));

    tree.get(next) == sorted.get(index + 1)
}

#[quickcheck]
fn prev_undoes_next(xs: Vec<i16>) -> bool {
    let tree = build(&xs);
    let mut cursor = tree.begin();
    while cursor != tree.end() {
        let next = tree.next(cursor);
        if tree.prev(next) != cursor {
            return false;
        }
        cursor = next;
    }
    true
}

#[quickcheck]
fn draining_leaves_an_empty_tree(xs: Vec<i16>) -> bool {
    let mut tree = build(&xs);
    let mut cursor = tree.begin();
    while cursor != tree.end() {
        cursor = tree.remove(cursor);
    }

    tree.is_empty() && tree.len() == 0 && tree.begin() == tree.end()
}

#[test]
fn removal_topologies() {
    let mut tree = Tree::new();
    let cursors: Vec<_> = [286, 220, 300, 332, 270, 254, 137, 100]
        .into_iter()
        .map(|x| tree.insert(x))
        .collect();

    // 332 is a leaf and the largest element.
    assert_eq!(tree.remove(cursors[3]), tree.end());
    // 270 has a single child, 254.
    let next = tree.remove(cursors[4]);
    assert_eq!(tree.get(next), Some(&286));
    // 220 has two children, 137 and 254.
    let next = tree.remove(cursors[1]);
    assert_eq!(tree.get(next), Some(&254));

    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        [100, 137, 254, 286, 300]
    );
}
