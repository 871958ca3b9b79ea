//! Lookups: exact, extremal, arbitrary witness and neighbour searches.

use super::compare::{Comparator, locate};
use super::node::{Link, Tree};
use std::cmp::Ordering;

impl<K, V> Tree<K, V> {
    /// Returns the value stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tree234::tree::{NaturalOrder, Tree};
    ///
    /// let tree = Tree::new()
    ///     .insert("b", 2, &NaturalOrder)
    ///     .insert("a", 1, &NaturalOrder);
    /// assert_eq!(tree.search(&"a", &NaturalOrder), Some(&1));
    /// assert_eq!(tree.search(&"z", &NaturalOrder), None);
    /// ```
    #[must_use]
    pub fn search<C>(&self, key: &K, comparator: &C) -> Option<&V>
    where
        C: Comparator<K> + ?Sized,
    {
        self.search_entry(key, comparator).map(|(_, value)| value)
    }

    /// Returns the stored key and value matching `key`.
    ///
    /// The stored key is returned because a comparator may equate keys that
    /// are not bit-identical.
    #[must_use]
    pub fn search_entry<C>(&self, key: &K, comparator: &C) -> Option<(&K, &V)>
    where
        C: Comparator<K> + ?Sized,
    {
        let mut link = &self.root;
        while let Some(node) = link.view() {
            match locate(node.keys, key, comparator) {
                Ok(slot) => return Some(node.entry(slot)),
                Err(child) => link = &node.children[child],
            }
        }
        None
    }

    /// Returns `true` if an entry matches `key`.
    #[must_use]
    pub fn contains_key<C>(&self, key: &K, comparator: &C) -> bool
    where
        C: Comparator<K> + ?Sized,
    {
        self.search_entry(key, comparator).is_some()
    }

    /// Returns some entry of the tree without searching.
    ///
    /// The witness is always the middle entry of the root: the only entry of
    /// a 2-node, the second entry of a 3-node or a 4-node. Callers must not
    /// rely on any distribution beyond "an element that is present".
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn search_any(&self) -> Option<(&K, &V)> {
        self.root
            .view()
            .map(|node| node.entry(node.keys.len() / 2))
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tree234::tree::{NaturalOrder, Tree};
    ///
    /// let tree: Tree<i32, ()> = [3, 1, 2].into_iter().map(|key| (key, ())).collect();
    /// assert_eq!(tree.search_min(), Some((&1, &())));
    /// assert_eq!(tree.search_max(), Some((&3, &())));
    /// ```
    #[must_use]
    pub fn search_min(&self) -> Option<(&K, &V)> {
        let mut node = self.root.view()?;
        while let Some(child) = node.children[0].view() {
            node = child;
        }
        Some(node.entry(0))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn search_max(&self) -> Option<(&K, &V)> {
        let mut node = self.root.view()?;
        while let Some(child) = node.children[node.keys.len()].view() {
            node = child;
        }
        Some(node.entry(node.keys.len() - 1))
    }

    /// Returns the entry with the greatest key strictly less than `bound`.
    ///
    /// `bound` need not be present in the tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tree234::tree::{NaturalOrder, Tree};
    ///
    /// let tree: Tree<i32, ()> = [1, 3, 5, 7].into_iter().map(|key| (key, ())).collect();
    /// assert_eq!(tree.search_lt(&5, &NaturalOrder).map(|(key, _)| *key), Some(3));
    /// assert_eq!(tree.search_lt(&4, &NaturalOrder).map(|(key, _)| *key), Some(3));
    /// assert_eq!(tree.search_lt(&1, &NaturalOrder), None);
    /// ```
    #[must_use]
    pub fn search_lt<C>(&self, bound: &K, comparator: &C) -> Option<(&K, &V)>
    where
        C: Comparator<K> + ?Sized,
    {
        predecessor(&self.root, bound, comparator)
    }

    /// Returns the entry with the least key strictly greater than `bound`.
    ///
    /// `bound` need not be present in the tree.
    #[must_use]
    pub fn search_gt<C>(&self, bound: &K, comparator: &C) -> Option<(&K, &V)>
    where
        C: Comparator<K> + ?Sized,
    {
        successor(&self.root, bound, comparator)
    }

    /// Returns the entry with the least key greater than or equal to `bound`.
    #[must_use]
    pub fn search_geq<C>(&self, bound: &K, comparator: &C) -> Option<(&K, &V)>
    where
        C: Comparator<K> + ?Sized,
    {
        ceiling(&self.root, bound, comparator)
    }
}

// The neighbour searches descend toward `bound` and, unwinding, prefer the
// subtree's answer over the node's own bracketing key: anything found in the
// bracketed child lies strictly between that key and `bound`.

fn predecessor<'a, K, V, C>(
    link: &'a Link<K, V>,
    bound: &K,
    comparator: &C,
) -> Option<(&'a K, &'a V)>
where
    C: Comparator<K> + ?Sized,
{
    let node = link.view()?;
    let child = node
        .keys
        .partition_point(|key| comparator.compare(key, bound) == Ordering::Less);
    predecessor(&node.children[child], bound, comparator)
        .or_else(|| child.checked_sub(1).map(|slot| node.entry(slot)))
}

fn successor<'a, K, V, C>(
    link: &'a Link<K, V>,
    bound: &K,
    comparator: &C,
) -> Option<(&'a K, &'a V)>
where
    C: Comparator<K> + ?Sized,
{
    let node = link.view()?;
    let child = node
        .keys
        .partition_point(|key| comparator.compare(key, bound) != Ordering::Greater);
    successor(&node.children[child], bound, comparator)
        .or_else(|| (child < node.keys.len()).then(|| node.entry(child)))
}

fn ceiling<'a, K, V, C>(
    link: &'a Link<K, V>,
    bound: &K,
    comparator: &C,
) -> Option<(&'a K, &'a V)>
where
    C: Comparator<K> + ?Sized,
{
    let node = link.view()?;
    match locate(node.keys, bound, comparator) {
        Ok(slot) => Some(node.entry(slot)),
        Err(child) => ceiling(&node.children[child], bound, comparator)
            .or_else(|| (child < node.keys.len()).then(|| node.entry(child))),
    }
}
