//! An unbalanced binary search tree addressed through cursors.
//!
//! # Examples
//!
//! ```
//! use cursor_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for x in [286, 220, 300, 332, 270, 254, 137, 100] {
//!     tree.insert(x);
//! }
//!
//! // Removing an element hands back a cursor to its in-order successor.
//! let at = tree.find(&220);
//! let next = tree.remove(at);
//! assert_eq!(tree.get(next), Some(&254));
//!
//! // Walking from `begin()` to `end()` visits everything in order.
//! let mut cursor = tree.begin();
//! let mut seen = Vec::new();
//! while cursor != tree.end() {
//!     seen.push(*tree.get(cursor).unwrap());
//!     cursor = tree.next(cursor);
//! }
//! assert_eq!(seen, [100, 137, 254, 270, 286, 300, 332]);
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace, warn};

use crate::arena::{Arena, Handle};
use crate::compare::{Comparator, NaturalOrder};
use crate::cursor::{Cursor, Position, TreeId};
use crate::error::TreeError;
use crate::iter::Iter;
use crate::node::{Node, Side};

/// An ordered container of unique elements, sorted by a [`Comparator`].
///
/// No rebalancing is ever performed: the shape of the tree depends only on insertion order, so
/// inserting already sorted elements degrades every operation to `O(n)`.
pub struct Tree<T, C = NaturalOrder> {
    nodes: Arena<Node<T>>,
    // This is the left child of the end position. `None` means the tree is empty.
    root: Option<Handle>,
    comparator: C,
    id: TreeId,
}

/// Where a descent from the root ended up.
enum Search {
    /// A node comparing equal to the key.
    Found(Handle),
    /// The empty child slot the key would occupy.
    Vacant { parent: Option<Handle>, side: Side },
}

/// Unwraps the result of a `try_*` method, panicking with the method name on misuse.
fn expect<U>(result: Result<U, TreeError>, method: &str) -> U {
    result.unwrap_or_else(|err| panic!("`Tree::{}()` - {}", method, err))
}

impl<T: Ord> Tree<T> {
    /// Generate a new, empty `Tree` ordered by `T`'s [`Ord`] implementation.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Generate a new, empty `Tree` with room for at least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<T: Ord> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> Tree<T, C> {
    /// Generate a new, empty `Tree` ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            comparator,
            id: TreeId::next(),
        }
    }

    /// Generate a new, empty `Tree` ordered by `comparator` with room for at least `capacity`
    /// elements.
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            ..Self::with_comparator(comparator)
        }
    }

    /// Returns the comparator ordering this tree.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// The number of elements in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of elements the tree can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Reserves room for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    /// The number of nodes on the longest path from the root to a leaf. An empty tree has height
    /// 0.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(Handle, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(handle);
            stack.extend(
                [node.left(), node.right()]
                    .into_iter()
                    .flatten()
                    .map(|child| (child, depth + 1)),
            );
        }
        height
    }

    /// A cursor to the smallest element, or [`end`](Self::end) if the tree is empty.
    pub fn begin(&self) -> Cursor {
        let position = match self.root {
            Some(root) => Position::Node(self.descend(root, Side::Left)),
            None => Position::End,
        };
        self.cursor(position)
    }

    /// The cursor one past the largest element.
    ///
    /// It compares equal to [`begin`](Self::begin) on an empty tree, can be stepped backwards to
    /// reach the largest element, and holds no element.
    pub fn end(&self) -> Cursor {
        self.cursor(Position::End)
    }

    /// Returns the element at `cursor`, or `None` for [`end`](Self::end) and for cursors that are
    /// stale or belong to another tree.
    pub fn get(&self, cursor: Cursor) -> Option<&T> {
        self.try_get(cursor).ok()
    }

    /// Returns the element at `cursor`.
    ///
    /// # Errors
    ///
    /// [`TreeError::EndCursor`] for `end()`, [`TreeError::StaleCursor`] if the element was
    /// removed and [`TreeError::ForeignCursor`] if `cursor` came from another tree.
    pub fn try_get(&self, cursor: Cursor) -> Result<&T, TreeError> {
        match self.check(cursor)? {
            Position::Node(handle) => Ok(&self.node(handle).value),
            Position::End => Err(TreeError::EndCursor),
        }
    }

    /// The smallest element.
    pub fn first(&self) -> Option<&T> {
        self.root
            .map(|root| &self.node(self.descend(root, Side::Left)).value)
    }

    /// The largest element.
    pub fn last(&self) -> Option<&T> {
        self.root
            .map(|root| &self.node(self.descend(root, Side::Right)).value)
    }

    /// Moves `cursor` to the next element in order. Stepping from the largest element yields
    /// [`end`](Self::end).
    ///
    /// ## Panics
    ///
    /// When `cursor` is `end()`, stale, or from another tree. See [`try_next`](Self::try_next).
    pub fn next(&self, cursor: Cursor) -> Cursor {
        expect(self.try_next(cursor), "next")
    }

    /// Moves `cursor` to the next element in order.
    ///
    /// # Errors
    ///
    /// [`TreeError::PastEnd`] when `cursor` is `end()`, otherwise as for
    /// [`try_get`](Self::try_get).
    pub fn try_next(&self, cursor: Cursor) -> Result<Cursor, TreeError> {
        let position = self.check(cursor)?;
        self.step(position, Side::Right).map(|p| self.cursor(p))
    }

    /// Moves `cursor` to the previous element in order. Stepping back from
    /// [`end`](Self::end) yields the largest element.
    ///
    /// ## Panics
    ///
    /// When `cursor` is [`begin`](Self::begin), stale, or from another tree.
    pub fn prev(&self, cursor: Cursor) -> Cursor {
        expect(self.try_prev(cursor), "prev")
    }

    /// Moves `cursor` to the previous element in order.
    ///
    /// # Errors
    ///
    /// [`TreeError::BeforeBegin`] when `cursor` is `begin()` (including `end()` of an empty
    /// tree), otherwise as for [`try_get`](Self::try_get).
    pub fn try_prev(&self, cursor: Cursor) -> Result<Cursor, TreeError> {
        let position = self.check(cursor)?;
        self.step(position, Side::Left).map(|p| self.cursor(p))
    }

    /// Removes the element at `cursor` and returns a cursor to its in-order successor
    /// ([`end`](Self::end) if it was the largest).
    ///
    /// Cursors to other elements stay valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_bst::Tree;
    ///
    /// let mut tree: Tree<i32> = [2, 1, 3].into_iter().collect();
    ///
    /// let next = tree.remove(tree.find(&2));
    /// assert_eq!(tree.get(next), Some(&3));
    ///
    /// let next = tree.remove(next);
    /// assert_eq!(next, tree.end());
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// ## Panics
    ///
    /// When `cursor` is `end()`, stale, or from another tree.
    pub fn remove(&mut self, cursor: Cursor) -> Cursor {
        expect(self.try_remove(cursor), "remove")
    }

    /// Fallible version of [`remove`](Self::remove).
    ///
    /// # Errors
    ///
    /// As for [`try_take`](Self::try_take).
    pub fn try_remove(&mut self, cursor: Cursor) -> Result<Cursor, TreeError> {
        self.try_take(cursor).map(|(_, next)| next)
    }

    /// Like [`remove`](Self::remove) but also hands back the removed element.
    ///
    /// ## Panics
    ///
    /// When `cursor` is `end()`, stale, or from another tree.
    pub fn take(&mut self, cursor: Cursor) -> (T, Cursor) {
        expect(self.try_take(cursor), "take")
    }

    /// Removes the element at `cursor`, returning it together with a cursor to its successor.
    ///
    /// # Errors
    ///
    /// [`TreeError::EndCursor`] for `end()`, [`TreeError::StaleCursor`] if the element was
    /// already removed and [`TreeError::ForeignCursor`] if `cursor` came from another tree. The
    /// tree is left untouched on error.
    pub fn try_take(&mut self, cursor: Cursor) -> Result<(T, Cursor), TreeError> {
        let handle = match self.check(cursor)? {
            Position::Node(handle) => handle,
            Position::End => return Err(TreeError::EndCursor),
        };
        let successor = self.step(Position::Node(handle), Side::Right)?;

        let (parent, left, right) = {
            let node = self.node(handle);
            (node.parent, node.left(), node.right())
        };
        let side = self.side_of(handle);

        match (left, right) {
            (Some(left), Some(right)) => {
                // The successor is the leftmost node of the right subtree, so it has no left
                // child and everything in `left` sorts before it.
                let successor = self.descend(right, Side::Left);
                self.attach(parent, side, Some(right));
                self.attach(Some(successor), Side::Left, Some(left));
                trace!(?side, "removed node with two children");
            }
            (Some(child), None) | (None, Some(child)) => {
                self.attach(parent, side, Some(child));
                trace!(?side, "removed node with one child");
            }
            (None, None) => {
                self.attach(parent, side, None);
                trace!(?side, "removed leaf");
            }
        }

        let value = self.nodes.take(handle).value;
        Ok((value, self.cursor(successor)))
    }

    /// Removes every element. Cursors into the tree become stale.
    pub fn clear(&mut self) {
        let count = self.len();
        // Free leftmost-first, each node after both of its subtrees. `None` stands for the end
        // position, from which the next pass restarts at the root.
        let mut current: Option<Handle> = None;
        while let Some(root) = self.root {
            let node = self.descend(current.unwrap_or(root), Side::Left);
            match self.node(node).right() {
                Some(right) => current = Some(right),
                None => {
                    let parent = self.node(node).parent;
                    let side = self.side_of(node);
                    self.attach(parent, side, None);
                    self.nodes.free(node);
                    current = parent;
                }
            }
        }
        debug!(count, "cleared tree");
    }

    /// Calls `f` on every element from `from` up to, but not including, `to`, in order.
    ///
    /// The walk stops at the first `Err` returned by `f`, which is passed on.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_bst::Tree;
    ///
    /// let tree: Tree<i32> = (1..=5).collect();
    ///
    /// let mut sum = 0;
    /// let result = tree.for_each(tree.begin(), tree.end(), |&x| {
    ///     if x > 3 {
    ///         return Err(x);
    ///     }
    ///     sum += x;
    ///     Ok(())
    /// });
    ///
    /// assert_eq!(result, Err(4));
    /// assert_eq!(sum, 6);
    /// ```
    ///
    /// ## Panics
    ///
    /// As for [`range`](Self::range).
    pub fn for_each<E, F>(&self, from: Cursor, to: Cursor, f: F) -> Result<(), E>
    where
        F: FnMut(&T) -> Result<(), E>,
    {
        self.range(from, to).try_for_each(f)
    }

    /// Iterates over every element in order.
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter::new(self, self.begin().position, Position::End, Some(self.len()))
    }

    /// Iterates over the elements from `from` up to, but not including, `to`.
    ///
    /// `from` must not come after `to`. If it does, iteration stops at the end of the tree.
    ///
    /// ## Panics
    ///
    /// When either cursor is stale or from another tree, or when `from` is `end()` but `to` is
    /// not.
    pub fn range(&self, from: Cursor, to: Cursor) -> Iter<'_, T, C> {
        let front = expect(self.check(from), "range");
        let back = expect(self.check(to), "range");
        if front == Position::End && back != Position::End {
            panic!("`Tree::range()` - {}", TreeError::PastEnd);
        }
        Iter::new(self, front, back, None)
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        self.nodes.get_mut(handle)
    }

    fn cursor(&self, position: Position) -> Cursor {
        Cursor::new(self.id, position)
    }

    /// Resolves `cursor` against this tree.
    fn check(&self, cursor: Cursor) -> Result<Position, TreeError> {
        if cursor.tree != self.id {
            return Err(TreeError::ForeignCursor);
        }
        match cursor.position {
            Position::Node(handle) if !self.nodes.contains(handle) => Err(TreeError::StaleCursor),
            position => Ok(position),
        }
    }

    /// One in-order step from `position`: forwards for `Side::Right`, backwards for `Side::Left`.
    pub(crate) fn step(&self, position: Position, toward: Side) -> Result<Position, TreeError> {
        let handle = match (position, toward) {
            (Position::Node(handle), _) => handle,
            (Position::End, Side::Right) => return Err(TreeError::PastEnd),
            (Position::End, Side::Left) => {
                return self
                    .root
                    .map(|root| Position::Node(self.descend(root, Side::Right)))
                    .ok_or(TreeError::BeforeBegin);
            }
        };

        if let Some(child) = self.node(handle).child(toward) {
            return Ok(Position::Node(self.descend(child, toward.opposite())));
        }
        match (self.ascend(handle, toward), toward) {
            (Some(ancestor), _) => Ok(Position::Node(ancestor)),
            (None, Side::Right) => Ok(Position::End),
            (None, Side::Left) => Err(TreeError::BeforeBegin),
        }
    }

    /// Follows `side` children from `handle` as far as they go.
    fn descend(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.node(handle).child(side) {
            handle = child;
        }
        handle
    }

    /// Climbs while `handle` is the `side` child of its parent and returns the parent it finally
    /// hangs off the other side of. `None` means the climb passed the root.
    fn ascend(&self, mut handle: Handle, side: Side) -> Option<Handle> {
        loop {
            let parent = self.node(handle).parent?;
            if self.node(parent).child(side) != Some(handle) {
                return Some(parent);
            }
            handle = parent;
        }
    }

    fn side_of(&self, handle: Handle) -> Side {
        match self.node(handle).parent {
            Some(parent) if self.node(parent).right() == Some(handle) => Side::Right,
            _ => Side::Left,
        }
    }

    /// Points `parent`'s `side` slot at `child` and `child` back at `parent`. A `parent` of
    /// `None` is the end position, whose only child is the root.
    fn attach(&mut self, parent: Option<Handle>, side: Side, child: Option<Handle>) {
        match parent {
            Some(parent) => self.node_mut(parent).set_child(side, child),
            None => {
                debug_assert_eq!(side, Side::Left, "the root hangs off the left of the end position");
                self.root = child;
            }
        }
        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }
    }
}

impl<T, C: Comparator<T>> Tree<T, C> {
    /// Inserts `value` and returns a cursor to it.
    ///
    /// Elements must be unique under the comparator. Inserting a duplicate panics in debug
    /// builds; in release builds, and when node storage cannot grow, nothing is inserted and
    /// [`end`](Self::end) is returned. Use [`try_insert`](Self::try_insert) to handle those
    /// cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let at = tree.insert(7);
    ///
    /// assert_eq!(tree.get(at), Some(&7));
    /// assert_eq!(tree.find(&7), at);
    /// ```
    pub fn insert(&mut self, value: T) -> Cursor {
        match self.try_insert(value) {
            Ok(cursor) => cursor,
            Err(TreeError::DuplicateKey) => {
                if cfg!(debug_assertions) {
                    panic!("`Tree::insert()` - {}", TreeError::DuplicateKey);
                }
                self.end()
            }
            Err(err) => {
                warn!(error = %err, "insert failed");
                self.end()
            }
        }
    }

    /// Inserts `value` and returns a cursor to it.
    ///
    /// # Errors
    ///
    /// [`TreeError::DuplicateKey`] if an equal element is already stored, or
    /// [`TreeError::AllocFailed`] / [`TreeError::CapacityExceeded`] if no node could be
    /// allocated. `value` is dropped and the tree is left untouched on error.
    pub fn try_insert(&mut self, value: T) -> Result<Cursor, TreeError> {
        let (parent, side) = match self.search(&value) {
            Search::Found(_) => return Err(TreeError::DuplicateKey),
            Search::Vacant { parent, side } => (parent, side),
        };

        let handle = self.nodes.try_alloc(Node::new(value, parent))?;
        self.attach(parent, side, Some(handle));
        trace!(?side, len = self.len(), "inserted node");

        Ok(self.cursor(Position::Node(handle)))
    }

    /// Returns a cursor to the element comparing equal to `key`, or [`end`](Self::end) if there
    /// is none.
    pub fn find(&self, key: &T) -> Cursor {
        match self.search(key) {
            Search::Found(handle) => self.cursor(Position::Node(handle)),
            Search::Vacant { .. } => self.end(),
        }
    }

    /// Returns `true` if an element comparing equal to `key` is stored.
    pub fn contains(&self, key: &T) -> bool {
        matches!(self.search(key), Search::Found(_))
    }

    fn search(&self, key: &T) -> Search {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(handle) = current {
            side = match self.comparator.compare(key, &self.node(handle).value) {
                Ordering::Equal => return Search::Found(handle),
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            parent = Some(handle);
            current = self.node(handle).child(side);
        }

        Search::Vacant { parent, side }
    }

    /// Checks ordering, parent/child links, reachability and the element count.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut reached = 0;
        if let Some(root) = self.root {
            assert_eq!(self.node(root).parent, None, "root has a parent");
            let mut stack = vec![root];
            while let Some(handle) = stack.pop() {
                reached += 1;
                let node = self.node(handle);
                for (side, expected) in [(Side::Left, Ordering::Less), (Side::Right, Ordering::Greater)] {
                    if let Some(child) = node.child(side) {
                        assert_eq!(self.node(child).parent, Some(handle), "broken parent link");
                        assert_eq!(
                            self.comparator.compare(&self.node(child).value, &node.value),
                            expected,
                            "child on the wrong side"
                        );
                        stack.push(child);
                    }
                }
            }
        }
        assert_eq!(reached, self.len(), "unreachable nodes");

        let mut walked = 0;
        let mut previous: Option<&T> = None;
        for value in self.iter() {
            if let Some(previous) = previous {
                assert_eq!(self.comparator.compare(previous, value), Ordering::Less, "out of order");
            }
            previous = Some(value);
            walked += 1;
        }
        assert_eq!(walked, self.len(), "in-order walk missed nodes");
    }
}

impl<T: Clone, C: Clone> Clone for Tree<T, C> {
    /// The clone is a separate tree: cursors into `self` are foreign to it.
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            comparator: self.comparator.clone(),
            id: TreeId::next(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Tree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Comparator<T>> Extend<T> for Tree<T, C> {
    /// Inserts every element, keeping the first of any run of equal elements.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            match self.try_insert(value) {
                Ok(_) | Err(TreeError::DuplicateKey) => {}
                Err(err) => warn!(error = %err, "extend failed to insert"),
            }
        }
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T, C> IntoIterator for &'a Tree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
