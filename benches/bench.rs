use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cursor_bst::Tree;

/// Returns how many nodes are needed to fill a binary tree with `num_levels` levels.
fn num_nodes_in_full_tree(num_levels: u32) -> i32 {
    2i32.pow(num_levels) - 1
}

/// Inserts keys so that, without any self-balancing, the tree ends up full. The middle key of
/// every range goes in before either half.
fn fill_balanced(tree: &mut Tree<i32>, xs: &[i32]) {
    if xs.is_empty() {
        return;
    }
    let mid = xs.len() / 2;
    tree.insert(xs[mid]);
    fill_balanced(tree, &xs[..mid]);
    fill_balanced(tree, &xs[mid + 1..]);
}

fn balanced_tree(num_levels: u32) -> Tree<i32> {
    let xs: Vec<_> = (0..num_nodes_in_full_tree(num_levels)).collect();
    let mut tree = Tree::with_capacity(xs.len());
    fill_balanced(&mut tree, &xs);
    tree
}

/// Ascending inserts: every node only has a right child.
fn degenerate_tree(num_levels: u32) -> Tree<i32> {
    (0..num_nodes_in_full_tree(num_levels)).collect()
}

/// Helper to bench a function on a tree.
/// It creates a group for the given name and closure and runs it against balanced and
/// degenerate trees of various sizes before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut Tree<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11] {
        let largest_element_in_tree = num_nodes_in_full_tree(num_levels) - 1;
        let shapes = [
            ("balanced", balanced_tree(num_levels)),
            ("degenerate", degenerate_tree(num_levels)),
        ];
        for (shape, tree) in shapes {
            let id = BenchmarkId::new(shape, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree));
                        time += instant.elapsed();
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, i| {
        let _cursor = black_box(tree.find(&i));
    });
    bench_helper(c, "remove", |tree, i| {
        let at = tree.find(&i);
        tree.remove(at);
    });
    bench_helper(c, "insert", |tree, i| {
        tree.insert(i + 1);
    });
    bench_helper(c, "find-miss", |tree, i| {
        let _cursor = black_box(tree.find(&(i + 1)));
    });
    bench_helper(c, "walk", |tree, _| {
        let mut cursor = tree.begin();
        while cursor != tree.end() {
            cursor = black_box(tree.next(cursor));
        }
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
