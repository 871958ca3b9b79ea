//! Top-down 2-3-4 insertion.
//!
//! A 4-node is split before it is entered, so the node receiving a new key
//! always has room for it and no split ever propagates upward. The root is
//! split first when full; that is the only way the tree grows taller.
//!
//! The routines work on `&mut Link` and obtain mutable nodes through
//! copy-on-write. Run against a freshly cloned root they copy exactly the
//! nodes on the search path (persistent insert); run against a uniquely
//! owned root they rewrite those nodes in place (transient insert).

use super::ReferenceCounter;
use super::compare::{Comparator, locate};
use super::error::contract_violation;
use super::node::{Link, Node, Tree};
use std::cmp::Ordering;
use std::mem;

impl<K: Clone, V: Clone> Link<K, V> {
    /// Inserts or overwrites an entry, returning the previous value.
    pub(crate) fn insert_root<C>(&mut self, key: K, value: V, comparator: &C) -> Option<V>
    where
        C: Comparator<K> + ?Sized,
    {
        if matches!(self, Self::Four(_)) {
            let (left, middle_key, middle_value, right) = mem::take(self).split();
            *self = Self::two(middle_key, middle_value, left, right);
            #[cfg(feature = "tracing")]
            tracing::trace!(depth = self.depth(), "split full root");
        }
        self.insert_below(key, value, comparator)
    }

    /// Inserts into a subtree whose root is not a 4-node.
    fn insert_below<C>(&mut self, key: K, value: V, comparator: &C) -> Option<V>
    where
        C: Comparator<K> + ?Sized,
    {
        let Some(node) = self.view() else {
            *self = Self::leaf(key, value);
            return None;
        };
        let child = match locate(node.keys, &key, comparator) {
            Ok(slot) => {
                let node = self.expect_view_mut();
                return Some(mem::replace(&mut node.values[slot], value));
            }
            Err(child) => child,
        };

        if node.is_leaf() {
            let mut parts = self.take_parts();
            parts.insert_entry(child, key, value, Self::Empty);
            *self = parts.into_link();
            return None;
        }

        if matches!(node.children[child], Self::Four(_)) {
            let mut parts = self.take_parts();
            let (mut left, middle_key, mut middle_value, mut right) =
                parts.take_child(child).split();
            let previous = match comparator.compare(&key, &middle_key) {
                Ordering::Less => left.insert_below(key, value, comparator),
                Ordering::Greater => right.insert_below(key, value, comparator),
                Ordering::Equal => Some(mem::replace(&mut middle_value, value)),
            };
            parts.children[child] = left;
            parts.insert_entry(child, middle_key, middle_value, right);
            *self = parts.into_link();
            return previous;
        }

        self.expect_view_mut().children[child].insert_below(key, value, comparator)
    }

    /// Splits a 4-node into two 2-nodes around its middle entry.
    fn split(self) -> (Self, K, V, Self) {
        let node = match self {
            Self::Four(node) => node,
            other => contract_violation(format_args!(
                "only a 4-node can be split, found arity {}",
                other.arity()
            )),
        };
        let Node {
            keys: [key0, key1, key2],
            values: [value0, value1, value2],
            children: [child0, child1, child2, child3],
        } = ReferenceCounter::unwrap_or_clone(node);
        (
            Self::two(key0, value0, child0, child1),
            key1,
            value1,
            Self::two(key2, value2, child2, child3),
        )
    }
}

impl<K: Clone, V: Clone> Tree<K, V> {
    /// Returns a new tree with `key` mapped to `value`.
    ///
    /// An existing entry for `key` has its value replaced; keys are never
    /// duplicated. The returned tree shares every subtree off the search
    /// path with `self`, which is left unchanged.
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
    /// let first = Tree::new().insert(1, "one", &NaturalOrder);
    /// let second = first.insert(1, "ONE", &NaturalOrder);
    ///
    /// assert_eq!(first.search(&1, &NaturalOrder), Some(&"one")); // Original unchanged
    /// assert_eq!(second.search(&1, &NaturalOrder), Some(&"ONE"));
    /// assert_eq!(second.size(), 1);
    /// ```
    #[must_use]
    pub fn insert<C>(&self, key: K, value: V, comparator: &C) -> Self
    where
        C: Comparator<K> + ?Sized,
    {
        let mut root = self.root.clone();
        root.insert_root(key, value, comparator);
        Self { root }
    }
}
