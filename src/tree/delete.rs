//! Deletion with bottom-up fix-up.
//!
//! Removing an entry from a 2-node leaf empties it and leaves that subtree
//! one level shorter than its siblings. The subtree reports this as
//! `reduced`, and the parent repairs it by rotating an entry through itself
//! from an adjacent sibling with a spare entry, or else by merging the short
//! subtree with an adjacent 2-node sibling around the separating entry. A
//! parent that gives up its last entry to a merge is itself reduced, and the
//! signal keeps climbing. Only the root can absorb it, by collapsing onto its
//! single remaining child.
//!
//! As with insertion, the same routines serve persistent and transient
//! deletion; copy-on-write decides whether a path node is copied or reused.

use super::compare::{Comparator, locate};
use super::node::{Link, NodeMut, Parts, Tree};
use std::mem;

/// An entry removed from a subtree.
struct Removal<K, V> {
    key: K,
    value: V,
    /// The subtree lost one level of height.
    reduced: bool,
}

impl<K, V> Removal<K, V> {
    fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: Clone, V: Clone> Link<K, V> {
    /// Removes the entry matching `key`.
    ///
    /// A missing key leaves the tree untouched: no node is copied.
    pub(crate) fn remove_root<C>(&mut self, key: &K, comparator: &C) -> Option<(K, V)>
    where
        C: Comparator<K> + ?Sized,
    {
        if !self.contains(key, comparator) {
            return None;
        }
        let removal = self.remove_below(key, comparator)?;
        self.note_collapse(removal.reduced);
        Some(removal.into_entry())
    }

    /// Removes the entry with the smallest key.
    pub(crate) fn remove_first_root(&mut self) -> Option<(K, V)> {
        let removal = self.remove_first()?;
        self.note_collapse(removal.reduced);
        Some(removal.into_entry())
    }

    /// Removes the entry with the largest key.
    pub(crate) fn remove_last_root(&mut self) -> Option<(K, V)> {
        let removal = self.remove_last()?;
        self.note_collapse(removal.reduced);
        Some(removal.into_entry())
    }

    #[cfg(feature = "tracing")]
    fn note_collapse(&self, reduced: bool) {
        if reduced {
            tracing::trace!(depth = self.depth(), "root lost a level");
        }
    }

    #[cfg(not(feature = "tracing"))]
    #[allow(clippy::unused_self)]
    const fn note_collapse(&self, _reduced: bool) {}

    fn contains<C>(&self, key: &K, comparator: &C) -> bool
    where
        C: Comparator<K> + ?Sized,
    {
        let mut link = self;
        while let Some(node) = link.view() {
            match locate(node.keys, key, comparator) {
                Ok(_) => return true,
                Err(child) => link = &node.children[child],
            }
        }
        false
    }

    fn remove_below<C>(&mut self, key: &K, comparator: &C) -> Option<Removal<K, V>>
    where
        C: Comparator<K> + ?Sized,
    {
        let node = self.view()?;
        let leaf = node.is_leaf();
        match locate(node.keys, key, comparator) {
            Ok(slot) if leaf => Some(self.remove_from_leaf(slot)),
            Ok(slot) => {
                // Replace the entry with its in-order successor, the minimum
                // of the subtree to its right.
                let node = self.expect_view_mut();
                let successor = node.children[slot + 1].remove_first()?;
                let key = mem::replace(&mut node.keys[slot], successor.key);
                let value = mem::replace(&mut node.values[slot], successor.value);
                let reduced = successor.reduced && self.repair(slot + 1);
                Some(Removal {
                    key,
                    value,
                    reduced,
                })
            }
            Err(_) if leaf => None,
            Err(child) => {
                let mut removal =
                    self.expect_view_mut().children[child].remove_below(key, comparator)?;
                removal.reduced = removal.reduced && self.repair(child);
                Some(removal)
            }
        }
    }

    fn remove_first(&mut self) -> Option<Removal<K, V>> {
        let node = self.view()?;
        if node.is_leaf() {
            return Some(self.remove_from_leaf(0));
        }
        let mut removal = self.expect_view_mut().children[0].remove_first()?;
        removal.reduced = removal.reduced && self.repair(0);
        Some(removal)
    }

    fn remove_last(&mut self) -> Option<Removal<K, V>> {
        let node = self.view()?;
        let last = node.keys.len();
        if node.is_leaf() {
            return Some(self.remove_from_leaf(last - 1));
        }
        let mut removal = self.expect_view_mut().children[last].remove_last()?;
        removal.reduced = removal.reduced && self.repair(last);
        Some(removal)
    }

    fn remove_from_leaf(&mut self, slot: usize) -> Removal<K, V> {
        let mut parts = self.take_parts();
        let (key, value, _) = parts.remove_entry(slot);
        let reduced = parts.keys.is_empty();
        if !reduced {
            *self = parts.into_link();
        }
        Removal {
            key,
            value,
            reduced,
        }
    }

    /// Restores balance after `children[child]` lost a level.
    ///
    /// Returns `true` when this node merged away its last entry and was
    /// replaced by its only child, making this subtree reduced in turn.
    fn repair(&mut self, child: usize) -> bool {
        // A rotation keeps the parent's arity, so the parent is rewritten in
        // its own allocation.
        let mut node = self.expect_view_mut();
        let last = node.keys.len();
        if child > 0 && node.children[child - 1].arity() > 2 {
            node.rotate_from_left(child);
            return false;
        }
        if child < last && node.children[child + 1].arity() > 2 {
            node.rotate_from_right(child);
            return false;
        }

        let mut parts = self.take_parts();
        if child > 0 {
            parts.merge_into_left(child);
        } else {
            parts.merge_into_right(child);
        }
        if parts.keys.is_empty() {
            *self = parts.take_child(0);
            true
        } else {
            *self = parts.into_link();
            false
        }
    }
}

// In the fix-up helpers `short` is the reduced child. Its siblings are one
// level taller, so the separator pulled down from the parent together with
// one sibling subtree rebuilds a node of the siblings' height.
impl<K: Clone, V: Clone> NodeMut<'_, K, V> {
    /// Moves the left sibling's last entry up and the separator down.
    fn rotate_from_left(&mut self, short: usize) {
        let mut sibling = self.children[short - 1].take_parts();
        let (lent_key, lent_value, lent_child) = sibling.remove_entry(sibling.keys.len() - 1);
        let key = mem::replace(&mut self.keys[short - 1], lent_key);
        let value = mem::replace(&mut self.values[short - 1], lent_value);
        let reduced = mem::take(&mut self.children[short]);
        self.children[short] = Link::two(key, value, lent_child, reduced);
        self.children[short - 1] = sibling.into_link();
    }

    /// Moves the right sibling's first entry up and the separator down.
    fn rotate_from_right(&mut self, short: usize) {
        let mut sibling = self.children[short + 1].take_parts();
        let lent_key = sibling.keys.remove(0);
        let lent_value = sibling.values.remove(0);
        let lent_child = sibling.children.remove(0);
        let key = mem::replace(&mut self.keys[short], lent_key);
        let value = mem::replace(&mut self.values[short], lent_value);
        let reduced = mem::take(&mut self.children[short]);
        self.children[short] = Link::two(key, value, reduced, lent_child);
        self.children[short + 1] = sibling.into_link();
    }
}

impl<K: Clone, V: Clone> Parts<K, V> {
    /// Merges the short child into its 2-node left sibling.
    fn merge_into_left(&mut self, short: usize) {
        let (key, value, reduced) = self.remove_entry(short - 1);
        let mut sibling = self.children[short - 1].take_parts();
        let (sibling_key, sibling_value, sibling_right) = sibling.remove_entry(0);
        let sibling_left = sibling.take_child(0);
        self.children[short - 1] = Link::three(
            [sibling_key, key],
            [sibling_value, value],
            [sibling_left, sibling_right, reduced],
        );
    }

    /// Merges the short child into its 2-node right sibling.
    fn merge_into_right(&mut self, short: usize) {
        let (key, value, right) = self.remove_entry(short);
        let mut sibling = Parts::from_link(right);
        let (sibling_key, sibling_value, sibling_right) = sibling.remove_entry(0);
        let sibling_left = sibling.take_child(0);
        let reduced = self.take_child(short);
        self.children[short] = Link::three(
            [key, sibling_key],
            [value, sibling_value],
            [reduced, sibling_left, sibling_right],
        );
    }

    fn from_link(mut link: Link<K, V>) -> Self {
        link.take_parts()
    }
}

impl<K: Clone, V: Clone> Tree<K, V> {
    /// Returns a new tree without the entry for `key`, and the removed value.
    ///
    /// Deleting a missing key returns a tree that shares its root with
    /// `self`, and `None`.
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
    /// let tree: Tree<i32, &str> = Tree::new()
    ///     .insert(1, "one", &NaturalOrder)
    ///     .insert(2, "two", &NaturalOrder);
    ///
    /// let (removed, value) = tree.delete(&1, &NaturalOrder);
    /// assert_eq!(value, Some("one"));
    /// assert_eq!(removed.search(&1, &NaturalOrder), None);
    /// assert_eq!(tree.search(&1, &NaturalOrder), Some(&"one")); // Original unchanged
    ///
    /// let (unchanged, value) = tree.delete(&9, &NaturalOrder);
    /// assert_eq!(value, None);
    /// assert!(unchanged.ptr_eq(&tree));
    /// ```
    #[must_use]
    pub fn delete<C>(&self, key: &K, comparator: &C) -> (Self, Option<V>)
    where
        C: Comparator<K> + ?Sized,
    {
        let mut root = self.root.clone();
        let removed = root.remove_root(key, comparator);
        (Self { root }, removed.map(|(_, value)| value))
    }

    /// Returns a new tree without its smallest entry, and that entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tree234::tree::Tree;
    ///
    /// let tree: Tree<i32, char> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    /// let (rest, first) = tree.delete_min();
    /// assert_eq!(first, Some((1, 'a')));
    /// assert_eq!(rest.size(), 2);
    /// ```
    #[must_use]
    pub fn delete_min(&self) -> (Self, Option<(K, V)>) {
        let mut root = self.root.clone();
        let removed = root.remove_first_root();
        (Self { root }, removed)
    }

    /// Returns a new tree without its largest entry, and that entry.
    #[must_use]
    pub fn delete_max(&self) -> (Self, Option<(K, V)>) {
        let mut root = self.root.clone();
        let removed = root.remove_last_root();
        (Self { root }, removed)
    }
}

#[cfg(test)]
mod tests {
    use super::super::NaturalOrder;
    use super::*;
    use rstest::rstest;

    fn tree_of(keys: &[i32]) -> Tree<i32, i32> {
        keys.iter()
            .fold(Tree::new(), |tree, key| tree.insert(*key, key * 10, &NaturalOrder))
    }

    fn keys(tree: &Tree<i32, i32>) -> Vec<i32> {
        tree.iter().map(|(key, _)| *key).collect()
    }

    fn root_keys(tree: &Tree<i32, i32>) -> Vec<i32> {
        tree.root.view().map(|node| node.keys.to_vec()).unwrap_or_default()
    }

    #[rstest]
    fn test_delete_from_leaf() {
        let tree = tree_of(&[1, 2, 3]);
        let (tree, value) = tree.delete(&2, &NaturalOrder);
        assert_eq!(value, Some(20));
        assert_eq!(keys(&tree), vec![1, 3]);
        assert_eq!(tree.arity(), 3);
    }

    #[rstest]
    fn test_delete_last_entry_empties_tree() {
        let (tree, value) = Tree::singleton(1, 10).delete(&1, &NaturalOrder);
        assert_eq!(value, Some(10));
        assert!(tree.is_empty());
    }

    #[rstest]
    fn test_delete_internal_entry_uses_successor() {
        // Root [2] over [1] and [3, 4].
        let tree = tree_of(&[1, 2, 3, 4]);
        let (tree, value) = tree.delete(&2, &NaturalOrder);
        assert_eq!(value, Some(20));
        assert_eq!(root_keys(&tree), vec![3]);
        assert_eq!(keys(&tree), vec![1, 3, 4]);
        assert!(tree.validate(&NaturalOrder).is_ok());
    }

    #[rstest]
    fn test_rotate_from_right_sibling() {
        // Root [2] over [1] and [3, 4]: deleting 1 borrows 3 through the root.
        let (tree, _) = tree_of(&[1, 2, 3, 4]).delete(&1, &NaturalOrder);
        assert_eq!(root_keys(&tree), vec![3]);
        assert_eq!(tree.depth(), 2);
        assert_eq!(keys(&tree), vec![2, 3, 4]);
    }

    #[rstest]
    fn test_rotate_from_left_sibling() {
        // Root [3] over [1, 2] and [4]: deleting 4 borrows 2 through the root.
        let tree = tree_of(&[2, 3, 4, 1]);
        assert_eq!(root_keys(&tree), vec![3]);
        let (tree, _) = tree.delete(&4, &NaturalOrder);
        assert_eq!(root_keys(&tree), vec![2]);
        assert_eq!(keys(&tree), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_merge_collapses_root() {
        // Root [2] over [1] and [3]: deleting 3 merges everything into one leaf.
        let tree = tree_of(&[1, 2, 3, 4]).delete(&4, &NaturalOrder).0;
        assert_eq!(tree.depth(), 2);
        let (tree, value) = tree.delete(&3, &NaturalOrder);
        assert_eq!(value, Some(30));
        assert_eq!(tree.depth(), 1);
        assert_eq!(root_keys(&tree), vec![1, 2]);
    }

    #[rstest]
    fn test_delete_missing_key_shares_root() {
        let tree = tree_of(&[1, 2, 3, 4, 5, 6, 7]);
        let (unchanged, value) = tree.delete(&42, &NaturalOrder);
        assert_eq!(value, None);
        assert!(unchanged.ptr_eq(&tree));
    }

    #[rstest]
    fn test_delete_min_and_max_drain_in_order() {
        let mut tree = tree_of(&(0..40).collect::<Vec<_>>());
        let mut drained = Vec::new();
        while let (rest, Some((key, _))) = tree.delete_min() {
            drained.push(key);
            assert!(rest.validate(&NaturalOrder).is_ok());
            tree = rest;
        }
        assert_eq!(drained, (0..40).collect::<Vec<_>>());

        let mut tree = tree_of(&(0..40).collect::<Vec<_>>());
        let mut drained = Vec::new();
        while let (rest, Some((key, _))) = tree.delete_max() {
            drained.push(key);
            assert!(rest.validate(&NaturalOrder).is_ok());
            tree = rest;
        }
        assert_eq!(drained, (0..40).rev().collect::<Vec<_>>());
    }

    #[rstest]
    fn test_delete_min_on_empty_tree() {
        let tree: Tree<i32, i32> = Tree::new();
        assert!(tree.delete_min().1.is_none());
        assert!(tree.delete_max().1.is_none());
    }

    #[rstest]
    fn test_delete_every_key_in_every_position() {
        let all: Vec<i32> = (0..60).collect();
        let tree = tree_of(&all);
        for key in &all {
            let (removed, value) = tree.delete(key, &NaturalOrder);
            assert_eq!(value, Some(key * 10));
            assert!(removed.validate(&NaturalOrder).is_ok());
            let expected: Vec<i32> = all.iter().copied().filter(|other| other != key).collect();
            assert_eq!(keys(&removed), expected);
        }
        assert_eq!(keys(&tree), all);
    }
}
