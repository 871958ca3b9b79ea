//! Node model: the tagged `Empty | Two | Three | Four` representation.
//!
//! A node's arity is carried by the enum variant of the link that points at
//! it, never recovered from the node itself. Code that does not care about
//! arity goes through [`NodeRef`] (shared slices) or [`NodeMut`]
//! (copy-on-write slices); code that changes arity unpacks a node into
//! [`Parts`] and re-tags it with [`Parts::into_link`].

use super::ReferenceCounter;
use super::error::contract_violation;
use arrayvec::ArrayVec;
use std::mem;

// =============================================================================
// Node Definition
// =============================================================================

/// A node holding `N` sorted entries and `C` (always `N + 1`) children.
#[derive(Clone)]
pub(crate) struct Node<K, V, const N: usize, const C: usize> {
    pub(crate) keys: [K; N],
    pub(crate) values: [V; N],
    pub(crate) children: [Link<K, V>; C],
}

pub(crate) type Node2<K, V> = Node<K, V, 1, 2>;
pub(crate) type Node3<K, V> = Node<K, V, 2, 3>;
pub(crate) type Node4<K, V> = Node<K, V, 3, 4>;

/// A possibly empty subtree.
///
/// `Empty` is a unit variant, so the empty subtree costs no allocation and
/// every leaf slot in the tree shares it.
#[derive(Default)]
pub(crate) enum Link<K, V> {
    #[default]
    Empty,
    Two(ReferenceCounter<Node2<K, V>>),
    Three(ReferenceCounter<Node3<K, V>>),
    Four(ReferenceCounter<Node4<K, V>>),
}

impl<K, V> Clone for Link<K, V> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Two(node) => Self::Two(node.clone()),
            Self::Three(node) => Self::Three(node.clone()),
            Self::Four(node) => Self::Four(node.clone()),
        }
    }
}

// =============================================================================
// Views
// =============================================================================

/// Shared, arity-erased view of one node.
pub(crate) struct NodeRef<'a, K, V> {
    pub(crate) keys: &'a [K],
    pub(crate) values: &'a [V],
    pub(crate) children: &'a [Link<K, V>],
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    const fn of<const N: usize, const C: usize>(node: &'a Node<K, V, N, C>) -> Self {
        Self {
            keys: &node.keys,
            values: &node.values,
            children: &node.children,
        }
    }

    /// All children of a node are empty or none are.
    #[inline]
    pub(crate) const fn is_leaf(&self) -> bool {
        self.children[0].is_empty()
    }

    #[inline]
    pub(crate) const fn entry(&self, slot: usize) -> (&'a K, &'a V) {
        (&self.keys[slot], &self.values[slot])
    }
}

/// Mutable, arity-erased view of one node.
pub(crate) struct NodeMut<'a, K, V> {
    pub(crate) keys: &'a mut [K],
    pub(crate) values: &'a mut [V],
    pub(crate) children: &'a mut [Link<K, V>],
}

impl<'a, K, V> NodeMut<'a, K, V> {
    const fn of<const N: usize, const C: usize>(node: &'a mut Node<K, V, N, C>) -> Self {
        let Node {
            keys,
            values,
            children,
        } = node;
        Self {
            keys,
            values,
            children,
        }
    }
}

// =============================================================================
// Parts: owned, arity-erased node contents
// =============================================================================

/// The contents of one node, moved out of its allocation.
///
/// Used wherever a node gains or loses an entry. Between operations a
/// `Parts` may briefly hold zero keys and a single child (a merged-away
/// parent), but [`into_link`](Self::into_link) accepts only 1 to 3 keys.
pub(crate) struct Parts<K, V> {
    pub(crate) keys: ArrayVec<K, 3>,
    pub(crate) values: ArrayVec<V, 3>,
    pub(crate) children: ArrayVec<Link<K, V>, 4>,
}

impl<K, V> Parts<K, V> {
    fn from_node<const N: usize, const C: usize>(node: Node<K, V, N, C>) -> Self {
        Self {
            keys: node.keys.into_iter().collect(),
            values: node.values.into_iter().collect(),
            children: node.children.into_iter().collect(),
        }
    }

    /// Re-tags the contents as a 2-, 3- or 4-node.
    pub(crate) fn into_link(self) -> Link<K, V> {
        match (self.keys.len(), self.children.len()) {
            (1, 2) => Link::Two(ReferenceCounter::new(self.into_node())),
            (2, 3) => Link::Three(ReferenceCounter::new(self.into_node())),
            (3, 4) => Link::Four(ReferenceCounter::new(self.into_node())),
            (keys, children) => contract_violation(format_args!(
                "cannot build a node from {keys} keys and {children} children"
            )),
        }
    }

    fn into_node<const N: usize, const C: usize>(self) -> Node<K, V, N, C> {
        Node {
            keys: exact(self.keys),
            values: exact(self.values),
            children: exact(self.children),
        }
    }

    /// Inserts an entry at `slot` together with the child to its right.
    pub(crate) fn insert_entry(&mut self, slot: usize, key: K, value: V, right: Link<K, V>) {
        self.keys.insert(slot, key);
        self.values.insert(slot, value);
        self.children.insert(slot + 1, right);
    }

    /// Removes the entry at `slot` together with the child to its right.
    pub(crate) fn remove_entry(&mut self, slot: usize) -> (K, V, Link<K, V>) {
        (
            self.keys.remove(slot),
            self.values.remove(slot),
            self.children.remove(slot + 1),
        )
    }

    /// Moves a child out, leaving `Empty` in its place.
    pub(crate) fn take_child(&mut self, index: usize) -> Link<K, V> {
        mem::take(&mut self.children[index])
    }
}

/// Converts a buffer whose length is known to be `M` into an array.
fn exact<T, const CAP: usize, const M: usize>(items: ArrayVec<T, CAP>) -> [T; M] {
    let length = items.len();
    let mut items = items.into_iter();
    std::array::from_fn(|_| {
        items.next().unwrap_or_else(|| {
            contract_violation(format_args!("expected {M} node slots, found {length}"))
        })
    })
}

// =============================================================================
// Link Operations
// =============================================================================

impl<K, V> Link<K, V> {
    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Number of children: 0 for `Empty`, otherwise 2, 3 or 4.
    #[inline]
    pub(crate) const fn arity(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Two(_) => 2,
            Self::Three(_) => 3,
            Self::Four(_) => 4,
        }
    }

    #[inline]
    pub(crate) fn view(&self) -> Option<NodeRef<'_, K, V>> {
        match self {
            Self::Empty => None,
            Self::Two(node) => Some(NodeRef::of(node)),
            Self::Three(node) => Some(NodeRef::of(node)),
            Self::Four(node) => Some(NodeRef::of(node)),
        }
    }

    /// A 2-node holding one entry between two subtrees.
    pub(crate) fn two(key: K, value: V, left: Self, right: Self) -> Self {
        Self::Two(ReferenceCounter::new(Node {
            keys: [key],
            values: [value],
            children: [left, right],
        }))
    }

    /// A 3-node holding two entries between three subtrees.
    pub(crate) fn three(keys: [K; 2], values: [V; 2], children: [Self; 3]) -> Self {
        Self::Three(ReferenceCounter::new(Node {
            keys,
            values,
            children,
        }))
    }

    /// A 2-node with two empty children.
    pub(crate) fn leaf(key: K, value: V) -> Self {
        Self::two(key, value, Self::Empty, Self::Empty)
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Two(left), Self::Two(right)) => ReferenceCounter::ptr_eq(left, right),
            (Self::Three(left), Self::Three(right)) => ReferenceCounter::ptr_eq(left, right),
            (Self::Four(left), Self::Four(right)) => ReferenceCounter::ptr_eq(left, right),
            _ => false,
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.view().map_or(0, |node| {
            node.keys.len() + node.children.iter().map(Self::size).sum::<usize>()
        })
    }

    /// Number of node levels; all leaves sit at the same depth so the
    /// leftmost spine is enough.
    pub(crate) fn depth(&self) -> usize {
        let mut depth = 0;
        let mut link = self;
        while let Some(node) = link.view() {
            depth += 1;
            link = &node.children[0];
        }
        depth
    }
}

impl<K: Clone, V: Clone> Link<K, V> {
    /// Mutable view of the node, copying it first if it is shared.
    ///
    /// A uniquely owned node is modified in its existing allocation.
    #[inline]
    pub(crate) fn view_mut(&mut self) -> Option<NodeMut<'_, K, V>> {
        match self {
            Self::Empty => None,
            Self::Two(node) => Some(NodeMut::of(ReferenceCounter::make_mut(node))),
            Self::Three(node) => Some(NodeMut::of(ReferenceCounter::make_mut(node))),
            Self::Four(node) => Some(NodeMut::of(ReferenceCounter::make_mut(node))),
        }
    }

    pub(crate) fn expect_view_mut(&mut self) -> NodeMut<'_, K, V> {
        self.view_mut()
            .unwrap_or_else(|| contract_violation(format_args!("expected a node, found Empty")))
    }

    /// Moves the node's contents out, leaving `Empty` behind.
    ///
    /// The old allocation is released at once when this link was its only
    /// owner; a shared node is copied and stays intact for its other owners.
    pub(crate) fn take_parts(&mut self) -> Parts<K, V> {
        match mem::take(self) {
            Self::Empty => {
                contract_violation(format_args!("cannot unpack an empty subtree"))
            }
            Self::Two(node) => Parts::from_node(ReferenceCounter::unwrap_or_clone(node)),
            Self::Three(node) => Parts::from_node(ReferenceCounter::unwrap_or_clone(node)),
            Self::Four(node) => Parts::from_node(ReferenceCounter::unwrap_or_clone(node)),
        }
    }
}

/// Addresses of every node reachable from `link`, in pre-order.
#[cfg(test)]
pub(crate) fn node_addresses<K, V>(link: &Link<K, V>) -> Vec<*const ()> {
    let address = match link {
        Link::Empty => return Vec::new(),
        Link::Two(node) => ReferenceCounter::as_ptr(node).cast::<()>(),
        Link::Three(node) => ReferenceCounter::as_ptr(node).cast::<()>(),
        Link::Four(node) => ReferenceCounter::as_ptr(node).cast::<()>(),
    };
    let mut addresses = vec![address];
    if let Some(node) = link.view() {
        for child in node.children {
            addresses.extend(node_addresses(child));
        }
    }
    addresses
}

// =============================================================================
// Tree Definition
// =============================================================================

/// A persistent ordered map stored as a 2-3-4 tree.
///
/// `Tree` is an opaque handle to an immutable snapshot. Cloning it is O(1)
/// and any number of snapshots may share nodes. Keys are ordered solely by
/// the [`Comparator`](super::Comparator) passed to each ordered operation;
/// a tree must always be used with the same comparator.
///
/// # Time Complexity
///
/// | Operation                         | Complexity   |
/// |-----------------------------------|--------------|
/// | `new` / `is_empty` / `arity`      | O(1)         |
/// | `search` / `search_lt` / `search_gt` | O(log N)  |
/// | `search_any`                      | O(1)         |
/// | `insert` / `delete`               | O(log N)     |
/// | `depth`                           | O(log N)     |
/// | `size`                            | O(N)         |
/// | `map`                             | O(N)         |
///
/// # Examples
///
/// ```rust
/// use tree234::tree::{NaturalOrder, Tree};
///
/// let tree = Tree::singleton(42, "answer");
/// assert!(tree.is_singleton());
/// assert_eq!(tree.search(&42, &NaturalOrder), Some(&"answer"));
/// assert_eq!(tree.search(&7, &NaturalOrder), None);
/// ```
pub struct Tree<K, V> {
    pub(crate) root: Link<K, V>,
}

impl<K, V> Clone for Tree<K, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<K, V> Default for Tree<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Tree<K, V> {
    /// Creates an empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tree234::tree::Tree;
    ///
    /// let tree: Tree<i32, i32> = Tree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.depth(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { root: Link::Empty }
    }

    /// Creates a tree holding a single entry.
    #[inline]
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        Self {
            root: Link::leaf(key, value),
        }
    }

    /// Returns `true` if the tree holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Returns `true` if the tree holds exactly one entry.
    #[inline]
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        matches!(&self.root, Link::Two(node) if node.children[0].is_empty())
    }

    /// Arity of the root node: 0 when empty, otherwise 2, 3 or 4.
    #[inline]
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.root.arity()
    }

    /// Counts the entries by walking the whole tree.
    ///
    /// # Complexity
    ///
    /// O(N)
    #[must_use]
    pub fn size(&self) -> usize {
        self.root.size()
    }

    /// Number of node levels between the root and the leaves.
    ///
    /// An empty tree has depth 0 and a singleton depth 1.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Returns `true` if both handles point at the same root node.
    ///
    /// Two empty trees are always pointer-equal.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.root.ptr_eq(&other.root)
    }
}
