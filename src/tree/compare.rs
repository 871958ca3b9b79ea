//! Caller-supplied key ordering.

use std::cmp::Ordering;

/// A total order over keys.
///
/// The tree never inspects keys beyond calls to [`compare`](Self::compare),
/// so keys may be handles to externally owned data compared by the caller.
/// Any `Fn(&K, &K) -> Ordering` is a comparator; [`NaturalOrder`] adapts
/// [`Ord`].
///
/// A comparator that is not a total order (or that changes its answers
/// between calls on the same tree) leaves the tree unordered. Use
/// [`Tree::validate`](super::Tree::validate) to detect this.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use tree234::tree::{Comparator, NaturalOrder};
///
/// let descending = |left: &i32, right: &i32| right.cmp(left);
/// assert_eq!(descending.compare(&1, &2), Ordering::Greater);
/// assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
/// ```
pub trait Comparator<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, left: &K, right: &K) -> Ordering;
}

impl<K, F> Comparator<K> for F
where
    K: ?Sized,
    F: Fn(&K, &K) -> Ordering + ?Sized,
{
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        self(left, right)
    }
}

/// The comparator given by the key type's [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.cmp(right)
    }
}

/// Binary search over the sorted keys of one node.
///
/// Returns `Ok(slot)` on an exact match, otherwise `Err(child)` naming the
/// child whose key range brackets `key`.
#[inline]
pub(crate) fn locate<K, C>(keys: &[K], key: &K, comparator: &C) -> Result<usize, usize>
where
    C: Comparator<K> + ?Sized,
{
    keys.binary_search_by(|probe| comparator.compare(probe, key))
}
