use std::fmt;
use std::iter::FusedIterator;

use crate::compare::NaturalOrder;
use crate::cursor::Position;
use crate::node::Side;
use crate::tree::Tree;

/// An in-order iterator over the elements of a [`Tree`], created by [`Tree::iter`] or
/// [`Tree::range`].
pub struct Iter<'a, T, C = NaturalOrder> {
    tree: &'a Tree<T, C>,
    /// Next element to yield from the front.
    front: Position,
    /// One past the next element to yield from the back.
    back: Position,
    // Only known when iterating the whole tree.
    remaining: Option<usize>,
}

impl<'a, T, C> Iter<'a, T, C> {
    pub(crate) fn new(
        tree: &'a Tree<T, C>,
        front: Position,
        back: Position,
        remaining: Option<usize>,
    ) -> Self {
        Self {
            tree,
            front,
            back,
            remaining,
        }
    }

    fn yielded(&mut self) {
        self.remaining = self.remaining.map(|n| n.saturating_sub(1));
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let Position::Node(handle) = self.front else {
            return None;
        };
        // Only fails from the end position, which was ruled out above.
        self.front = self.tree.step(self.front, Side::Right).ok()?;
        self.yielded();
        Some(&self.tree.node(handle).value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.front == self.back {
            return (0, Some(0));
        }
        match self.remaining {
            Some(n) => (n, Some(n)),
            None => (0, Some(self.tree.len())),
        }
    }
}

impl<'a, T, C> DoubleEndedIterator for Iter<'a, T, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let Position::Node(handle) = self.tree.step(self.back, Side::Left).ok()? else {
            return None;
        };
        self.back = Position::Node(handle);
        self.yielded();
        Some(&self.tree.node(handle).value)
    }
}

impl<'a, T, C> FusedIterator for Iter<'a, T, C> {}

impl<'a, T, C> Clone for Iter<'a, T, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T: fmt::Debug, C> fmt::Debug for Iter<'a, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
