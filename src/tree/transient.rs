//! Destructive updates through a uniquely owned handle.
//!
//! A [`TransientTree`] runs exactly the same insertion and deletion routines
//! as [`Tree`], so both produce identical shapes for identical input. The
//! difference lies in ownership: nodes held only by the transient are
//! rewritten in their existing allocations, and a node emptied by a merge or
//! split is released on the spot. Nodes still reachable from a persistent
//! snapshot are copied before they are touched, so no destructive step can
//! alter or free what another handle can see.

use super::compare::{Comparator, NaturalOrder};
use super::node::Tree;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

/// A mutable 2-3-4 tree for batches of in-place updates.
///
/// # Design
///
/// - `PhantomData<Rc<()>>` ensures `!Send` and `!Sync`, even with the `arc`
///   feature enabled
/// - `Clone` is intentionally not implemented: a transient has exactly one
///   owner
///
/// # Examples
///
/// ```rust
/// use tree234::tree::{NaturalOrder, TransientTree, Tree};
///
/// let snapshot: Tree<i32, &str> = [(1, "a"), (2, "b")].into_iter().collect();
///
/// let mut transient = snapshot.clone().transient();
/// assert_eq!(transient.insert(3, "c", &NaturalOrder), None);
/// assert_eq!(transient.delete(&1, &NaturalOrder), Some("a"));
///
/// let updated = transient.persistent();
/// assert_eq!(updated.size(), 2);
/// assert_eq!(snapshot.size(), 2);
/// assert_eq!(snapshot.search(&1, &NaturalOrder), Some(&"a")); // Snapshot unchanged
/// ```
pub struct TransientTree<K, V> {
    tree: Tree<K, V>,
    /// Marker to ensure `!Send` and `!Sync`.
    _marker: PhantomData<Rc<()>>,
}

static_assertions::assert_not_impl_any!(TransientTree<i32, i32>: Send, Sync, Clone);
static_assertions::assert_not_impl_any!(TransientTree<String, Vec<u8>>: Send, Sync, Clone);

#[cfg(feature = "arc")]
mod arc_send_sync_verification {
    use super::{Tree, TransientTree};
    use std::sync::Arc;

    static_assertions::assert_impl_all!(Tree<i32, String>: Send, Sync);
    static_assertions::assert_impl_all!(Tree<Arc<str>, Arc<i32>>: Send, Sync);
    static_assertions::assert_not_impl_any!(TransientTree<Arc<i32>, Arc<i32>>: Send, Sync);
}

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(Tree<i32, i32>: Send, Sync);

// =============================================================================
// Conversions
// =============================================================================

impl<K, V> Tree<K, V> {
    /// Turns this handle into a [`TransientTree`].
    ///
    /// Nodes this handle owns alone become mutable in place; nodes shared
    /// with other snapshots stay protected by copy-on-write.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn transient(self) -> TransientTree<K, V> {
        TransientTree {
            tree: self,
            _marker: PhantomData,
        }
    }
}

impl<K, V> TransientTree<K, V> {
    /// Creates an empty transient tree.
    #[must_use]
    pub const fn new() -> Self {
        Tree::new().transient()
    }

    /// Freezes the transient into a persistent [`Tree`].
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn persistent(self) -> Tree<K, V> {
        self.tree
    }

    /// Borrows the current contents as a persistent tree for reading.
    #[inline]
    #[must_use]
    pub const fn as_tree(&self) -> &Tree<K, V> {
        &self.tree
    }

    /// Returns `true` if the tree holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Counts the entries.
    ///
    /// # Complexity
    ///
    /// O(N)
    #[must_use]
    pub fn size(&self) -> usize {
        self.tree.size()
    }

    /// Number of node levels.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn search<C>(&self, key: &K, comparator: &C) -> Option<&V>
    where
        C: Comparator<K> + ?Sized,
    {
        self.tree.search(key, comparator)
    }
}

impl<K, V> Default for TransientTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Destructive Updates
// =============================================================================

impl<K: Clone, V: Clone> TransientTree<K, V> {
    /// Inserts or overwrites an entry, returning the previous value.
    ///
    /// # Complexity
    ///
    /// O(log N)
    pub fn insert<C>(&mut self, key: K, value: V, comparator: &C) -> Option<V>
    where
        C: Comparator<K> + ?Sized,
    {
        self.tree.root.insert_root(key, value, comparator)
    }

    /// Removes the entry matching `key`, returning its value.
    ///
    /// # Complexity
    ///
    /// O(log N)
    pub fn delete<C>(&mut self, key: &K, comparator: &C) -> Option<V>
    where
        C: Comparator<K> + ?Sized,
    {
        self.tree
            .root
            .remove_root(key, comparator)
            .map(|(_, value)| value)
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tree234::tree::{NaturalOrder, TransientTree};
    ///
    /// let mut transient = TransientTree::new();
    /// for key in [3, 1, 2] {
    ///     transient.insert(key, key * 10, &NaturalOrder);
    /// }
    /// assert_eq!(transient.delete_min(), Some((1, 10)));
    /// assert_eq!(transient.delete_min(), Some((2, 20)));
    /// assert_eq!(transient.delete_min(), Some((3, 30)));
    /// assert_eq!(transient.delete_min(), None);
    /// ```
    pub fn delete_min(&mut self) -> Option<(K, V)> {
        self.tree.root.remove_first_root()
    }

    /// Removes and returns the entry with the largest key.
    pub fn delete_max(&mut self) -> Option<(K, V)> {
        self.tree.root.remove_last_root()
    }

    /// Replaces every value with `function(key, value)`, visiting entries in
    /// ascending key order. Keys and shape are unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tree234::tree::{NaturalOrder, TransientTree};
    ///
    /// let mut transient = TransientTree::new();
    /// transient.insert("x", 1, &NaturalOrder);
    /// transient.insert("y", 2, &NaturalOrder);
    /// transient.map_in_place(|_, value| value * 100);
    /// assert_eq!(transient.search(&"y", &NaturalOrder), Some(&200));
    /// ```
    pub fn map_in_place<F>(&mut self, mut function: F)
    where
        F: FnMut(&K, &V) -> V,
    {
        self.tree.root.map_values_in_place(&mut function);
    }
}

impl<K: Clone + Ord, V: Clone> Extend<(K, V)> for TransientTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value, &NaturalOrder);
        }
    }
}

impl<K: Clone + Ord, V: Clone> FromIterator<(K, V)> for TransientTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut transient = Self::new();
        transient.extend(iter);
        transient
    }
}

impl<K: Clone + Ord, V: Clone> FromIterator<(K, V)> for Tree<K, V> {
    /// Collects entries ordered by [`NaturalOrder`]; a later entry overwrites
    /// an earlier one with the same key.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().collect::<TransientTree<K, V>>().persistent()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for TransientTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TransientTree")
            .field("entries", &self.tree)
            .finish()
    }
}
