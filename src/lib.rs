//! An ordered map based on a binary search tree whose nodes link back to their parents.
//!
//! The tree is ordered by a comparator from the [`compare`](https://docs.rs/compare) crate and
//! maps unique keys to values. Cursors step through the entries in order by following parent
//! links. The tree is only rebalanced on request, by [`Tree::balance`](struct.Tree.html#method.balance).
//!
//! # Examples
//!
//! ```
//! let mut tree = bst::Tree::new();
//!
//! tree.insert(5, 'a');
//! tree.insert(3, 'b');
//! tree.insert(8, 'c');
//! tree.insert(1, 'd');
//! tree.insert(4, 'e');
//!
//! assert!(tree.erase(&3).is_ok());
//! assert!(tree.find(&3).is_end());
//!
//! let mut cursor = tree.begin();
//! let mut keys = vec![];
//! while let Some(key) = cursor.key() {
//!     keys.push(*key);
//!     cursor.move_next();
//! }
//! assert_eq!(keys, [1, 4, 5, 8]);
//! ```

mod balance;
mod error;
mod node;
pub mod tree;

#[cfg(feature = "quickcheck")]
mod arbitrary;

#[cfg(feature = "ordered_iter")]
mod ordered;

pub use error::Error;
pub use node::{Cursor, CursorMut};
pub use tree::Tree;
