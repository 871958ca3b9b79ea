//! 2-3-4 tree engine.
//!
//! This module provides [`Tree`], an ordered map of opaque keys and values
//! stored in a balanced multiway search tree (an order-4 B-tree). Every node
//! holds one, two or three sorted entries and is tagged explicitly as a
//! 2-node, 3-node or 4-node:
//!
//! - [`Tree`]: persistent handle; updates return a new tree that shares every
//!   untouched subtree with its input
//! - [`TransientTree`]: uniquely owned handle; updates rewrite nodes in place
//! - [`Cursor`]: explicit-stack in-order cursor, seekable to a starting key
//! - [`Iter`]: [`Iterator`] adapter over a [`Cursor`]
//! - [`Comparator`]: caller-supplied total order over keys
//!
//! # Structural Sharing
//!
//! Persistent updates copy only the nodes on the path to the modification
//! point. Any number of versions can be alive at once; each is an immutable
//! snapshot.
//!
//! ```rust
//! use tree234::tree::{NaturalOrder, Tree};
//!
//! let before: Tree<i32, &str> = Tree::new()
//!     .insert(2, "two", &NaturalOrder)
//!     .insert(1, "one", &NaturalOrder);
//! let after = before.insert(3, "three", &NaturalOrder);
//!
//! assert_eq!(before.size(), 2); // Snapshot unchanged
//! assert_eq!(after.size(), 3);
//! ```
//!
//! # Transient Updates
//!
//! ```rust
//! use tree234::tree::{NaturalOrder, Tree};
//!
//! let mut transient = Tree::new().transient();
//! for key in 0..100 {
//!     transient.insert(key, key * 2, &NaturalOrder);
//! }
//! assert_eq!(transient.delete_min(), Some((0, 0)));
//!
//! let tree = transient.persistent();
//! assert_eq!(tree.search(&50, &NaturalOrder), Some(&100));
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type used for tree nodes.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`, which lets
/// persistent trees cross threads.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod compare;
mod cursor;
mod delete;
mod error;
mod insert;
mod map;
mod node;
mod search;
#[cfg(feature = "serde")]
mod serialization;
mod transient;
mod validate;

pub use compare::Comparator;
pub use compare::NaturalOrder;
pub use cursor::Cursor;
pub use cursor::Iter;
pub use error::InvariantViolation;
pub use node::Tree;
pub use transient::TransientTree;

// =============================================================================
// Tests
// =============================================================================
