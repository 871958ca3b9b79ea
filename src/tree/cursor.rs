//! Explicit-stack in-order traversal.
//!
//! A [`Cursor`] keeps one frame per node level between the root and the
//! current entry, so it never needs parent pointers and never recurses. The
//! top frame names the current entry; every frame below it names the entry
//! its node yields once the subtree currently being walked is exhausted.

use super::compare::{Comparator, locate};
use super::error::contract_violation;
use super::node::{Link, NodeRef, Tree};
use smallvec::SmallVec;
use std::fmt;
use std::iter::FusedIterator;

/// Frames kept inline before the stack spills to the heap. A tree of depth
/// 16 holds at least 65 535 entries.
const INLINE_FRAMES: usize = 16;

struct Frame<'a, K, V> {
    node: NodeRef<'a, K, V>,
    slot: usize,
}

impl<K, V> Clone for Frame<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            node: self.node,
            slot: self.slot,
        }
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// An in-order position within a [`Tree`].
///
/// A cursor borrows the tree it walks; the borrow checker rules out any
/// update to that tree while the cursor is alive. Persistent updates never
/// disturb a cursor anyway, since they produce a new tree.
///
/// # Examples
///
/// ```rust
/// use tree234::tree::{Cursor, NaturalOrder, Tree};
///
/// let tree: Tree<i32, char> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
/// let mut cursor = Cursor::new(&tree);
/// assert_eq!(cursor.get(), Some((&1, &'a')));
/// cursor.advance();
/// assert_eq!(cursor.get(), Some((&2, &'b')));
///
/// let cursor = Cursor::seek(&tree, &3, &NaturalOrder);
/// assert_eq!(cursor.get(), Some((&3, &'c')));
/// ```
pub struct Cursor<'a, K, V> {
    stack: SmallVec<[Frame<'a, K, V>; INLINE_FRAMES]>,
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, K, V> Cursor<'a, K, V> {
    /// Positions a cursor on the smallest entry of `tree`.
    ///
    /// On an empty tree the cursor starts out exhausted.
    #[must_use]
    pub fn new(tree: &'a Tree<K, V>) -> Self {
        let mut cursor = Self::with_capacity(tree);
        cursor.descend_leftmost(&tree.root);
        cursor
    }

    /// Positions a cursor on the first entry whose key is not less than
    /// `key`.
    ///
    /// The cursor is exhausted when every key in the tree is smaller.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn seek<C>(tree: &'a Tree<K, V>, key: &K, comparator: &C) -> Self
    where
        C: Comparator<K> + ?Sized,
    {
        let mut cursor = Self::with_capacity(tree);
        let mut link = &tree.root;
        while let Some(node) = link.view() {
            match locate(node.keys, key, comparator) {
                Ok(slot) => {
                    cursor.stack.push(Frame { node, slot });
                    return cursor;
                }
                Err(child) => {
                    cursor.stack.push(Frame { node, slot: child });
                    link = &node.children[child];
                }
            }
        }
        cursor.settle();
        cursor
    }

    fn with_capacity(tree: &Tree<K, V>) -> Self {
        Self {
            stack: SmallVec::with_capacity(Tree::cursor_capacity(tree)),
        }
    }

    /// The entry under the cursor, or `None` once exhausted.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        self.stack.last().map(|frame| frame.node.entry(frame.slot))
    }

    /// Returns `true` when no entry remains.
    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.stack.is_empty()
    }

    /// Moves to the in-order successor of the current entry.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already exhausted.
    pub fn advance(&mut self) {
        let Some(frame) = self.stack.last_mut() else {
            contract_violation(format_args!("cannot advance an exhausted cursor"));
        };
        frame.slot += 1;
        let node = frame.node;
        let child = &node.children[frame.slot];
        if child.is_empty() {
            self.settle();
        } else {
            self.descend_leftmost(child);
        }
    }

    /// Number of frames currently on the stack.
    ///
    /// Never exceeds [`Tree::cursor_capacity`] of the tree being walked.
    #[inline]
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    fn descend_leftmost(&mut self, mut link: &'a Link<K, V>) {
        while let Some(node) = link.view() {
            self.stack.push(Frame { node, slot: 0 });
            link = &node.children[0];
        }
    }

    /// Drops frames whose node has no entries left to yield.
    fn settle(&mut self) {
        while self
            .stack
            .last()
            .is_some_and(|frame| frame.slot >= frame.node.keys.len())
        {
            self.stack.pop();
        }
    }
}

impl<K, V> Tree<K, V> {
    /// Largest number of frames a [`Cursor`] over this tree can hold.
    ///
    /// Equal to [`depth`](Self::depth): a cursor keeps at most one frame per
    /// level.
    #[inline]
    #[must_use]
    pub fn cursor_capacity(&self) -> usize {
        self.depth()
    }

    /// Returns an iterator over all entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tree234::tree::Tree;
    ///
    /// let tree: Tree<i32, i32> = [(2, 20), (1, 10), (3, 30)].into_iter().collect();
    /// let keys: Vec<i32> = tree.iter().map(|(key, _)| *key).collect();
    /// assert_eq!(keys, vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            cursor: Cursor::new(self),
        }
    }

    /// Returns an iterator over the entries whose key is not less than
    /// `key`, in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tree234::tree::{NaturalOrder, Tree};
    ///
    /// let tree: Tree<i32, ()> = (0..10).map(|key| (key * 2, ())).collect();
    /// let keys: Vec<i32> = tree.iter_from(&7, &NaturalOrder).map(|(key, _)| *key).collect();
    /// assert_eq!(keys, vec![8, 10, 12, 14, 16, 18]);
    /// ```
    #[must_use]
    pub fn iter_from<C>(&self, key: &K, comparator: &C) -> Iter<'_, K, V>
    where
        C: Comparator<K> + ?Sized,
    {
        Iter {
            cursor: Cursor::seek(self, key, comparator),
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the entries of a [`Tree`] in ascending key order.
pub struct Iter<'a, K, V> {
    cursor: Cursor<'a, K, V>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor.get()?;
        self.cursor.advance();
        Some(entry)
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

/// Trees are equal when they hold equal entries in the same order; their
/// shapes may differ.
impl<K: PartialEq, V: PartialEq> PartialEq for Tree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for Tree<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Tree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}
