use std::sync::atomic::{AtomicU64, Ordering};

use crate::arena::Handle;

/// Identifies the tree a [`Cursor`] was produced by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct TreeId(u64);

impl TreeId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        TreeId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Position {
    /// One past the largest element. Also the parent position of the root.
    End,
    Node(Handle),
}

/// A position inside a [`Tree`](crate::Tree): either an element or the end of the tree.
///
/// Cursors are plain values. They borrow nothing and own nothing, so the tree can be mutated
/// while they are held. A cursor stays valid until the element it points at is removed;
/// inserting elements or removing other elements does not affect it. Using a cursor whose
/// element was removed is reported as [`TreeError::StaleCursor`](crate::TreeError::StaleCursor).
///
/// Two cursors are equal when they point at the same position of the same tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub(crate) tree: TreeId,
    pub(crate) position: Position,
}

impl Cursor {
    pub(crate) const fn new(tree: TreeId, position: Position) -> Self {
        Cursor { tree, position }
    }

    /// Returns `true` if this cursor is the end position of its tree.
    pub fn is_end(&self) -> bool {
        self.position == Position::End
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_ids_are_unique() {
        let a = TreeId::next();
        let b = TreeId::next();
        assert_ne!(a, b);
        assert_ne!(Cursor::new(a, Position::End), Cursor::new(b, Position::End));
        assert!(Cursor::new(a, Position::End).is_end());
    }
}
