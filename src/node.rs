use crate::arena::Handle;

/// Which child slot of a parent a node hangs from.
///
/// The root is treated as the `Left` child of the tree's end position, so every live node has
/// a side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left = 0,
    Right = 1,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    /// `None` only for the root.
    pub(crate) parent: Option<Handle>,
    children: [Option<Handle>; 2],
}

impl<T> Node<T> {
    pub(crate) const fn new(value: T, parent: Option<Handle>) -> Self {
        Node {
            value,
            parent,
            children: [None, None],
        }
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        self.children[side as usize]
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        self.children[side as usize] = child;
    }

    pub(crate) const fn left(&self) -> Option<Handle> {
        self.child(Side::Left)
    }

    pub(crate) const fn right(&self) -> Option<Handle> {
        self.child(Side::Right)
    }
}
