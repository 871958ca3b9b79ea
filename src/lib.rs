//! # tree234
//!
//! An in-memory 2-3-4 tree engine: the ordered storage core behind the
//! sets and maps of a constraint solver.
//!
//! ## Overview
//!
//! Keys and values are opaque to the engine. Ordering comes solely from a
//! caller-supplied [`Comparator`](tree::Comparator), so the same tree type
//! serves any key domain. The engine provides:
//!
//! - **Search**: exact, minimum, maximum, predecessor, successor, first
//!   key not below a bound, and an O(1) arbitrary witness
//! - **Persistent Updates**: insert and delete that share every untouched
//!   subtree with the input tree
//! - **Destructive Updates**: the same operations applied in place through
//!   a uniquely owned [`TransientTree`](tree::TransientTree)
//! - **Cursors**: explicit-stack in-order traversal, seekable to a key
//! - **Bulk Transforms**: value mapping in persistent and in-place forms
//!
//! ## Feature Flags
//!
//! - `arc`: share nodes through `Arc` so persistent trees are `Send + Sync`
//! - `serde`: serialize trees as ordered maps
//! - `tracing`: emit `tracing` events on structural changes of the root
//!
//! ## Example
//!
//! ```rust
//! use tree234::prelude::*;
//!
//! let tree = [10, 20, 5, 15, 25, 1, 30]
//!     .into_iter()
//!     .fold(Tree::new(), |tree, key| tree.insert(key, key * 10, &NaturalOrder));
//! let (without, removed) = tree.delete(&20, &NaturalOrder);
//!
//! assert_eq!(removed, Some(200));
//! assert_eq!(tree.size(), 7); // Input unchanged
//! let keys: Vec<i32> = without.iter().map(|(key, _)| *key).collect();
//! assert_eq!(keys, vec![1, 5, 10, 15, 25, 30]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use tree234::prelude::*;
/// ```
pub mod prelude {
    pub use crate::tree::*;
}

pub mod tree;
