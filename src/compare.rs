use std::cmp::Ordering;

/// A three-way comparison used to order the elements of a [`Tree`](crate::Tree).
///
/// It must describe a strict total order and must give the same answer for the same pair of
/// elements for as long as they are stored. Any state the ordering depends on (the "context")
/// lives inside the implementor, e.g. captured by a closure.
///
/// Closures of type `Fn(&T, &T) -> Ordering` implement this trait.
///
/// # Examples
///
/// ```
/// use cursor_bst::Tree;
///
/// // Order by distance from a pivot captured by the comparator.
/// let pivot = 10;
/// let mut tree = Tree::with_comparator(move |a: &i32, b: &i32| {
///     (a - pivot).abs().cmp(&(b - pivot).abs()).then(a.cmp(b))
/// });
/// tree.extend([0, 9, 13, 10]);
///
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [10, 9, 13, 0]);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Compares `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders elements by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
