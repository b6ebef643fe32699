//! This crate provides an ordered container built on an unbalanced Binary Search Tree (BST)
//! that is navigated with cursors, in the style of a C++ `std::set`.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree stores records in `Node`s. Every `Node` has at most two children and,
//! here, a link back to its parent. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! Visiting the left subtree, then the node, then the right subtree therefore yields the
//! elements in sorted order. The parent links let a [`Cursor`] take that walk one step at a
//! time, in either direction, without holding a borrow of the [`Tree`].
//!
//! "Less" and "greater" come from a [`Comparator`]: [`NaturalOrder`] for `T: Ord`, or any
//! `Fn(&T, &T) -> Ordering` closure.
//!
//! No self-balancing is done, so searches take `O(height)` and the height depends entirely on
//! insertion order.
//!
//! ## Cursors
//!
//! [`Tree::begin`] points at the smallest element and [`Tree::end`] one past the largest.
//! [`Tree::next`] and [`Tree::prev`] move between them, [`Tree::get`] reads the element and
//! [`Tree::remove`] deletes it, returning a cursor to its successor.
//!
//! ```
//! use cursor_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for word in ["pear", "apple", "fig", "kiwi"] {
//!     tree.insert(word);
//! }
//!
//! // Drop every word shorter than four letters while walking the tree.
//! let mut cursor = tree.begin();
//! while cursor != tree.end() {
//!     let short = tree.get(cursor).map_or(false, |word| word.len() < 4);
//!     cursor = if short { tree.remove(cursor) } else { tree.next(cursor) };
//! }
//!
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["apple", "kiwi", "pear"]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;

mod arena;
mod compare;
mod cursor;
mod error;
mod iter;
mod node;
mod tree;

#[cfg(test)]
mod test;

pub use compare::{Comparator, NaturalOrder};
pub use cursor::Cursor;
pub use error::TreeError;
pub use iter::Iter;
pub use tree::Tree;
