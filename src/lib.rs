//! Ordered maps over binary search trees, and a course schedule index built on them.
//!
//! Two interchangeable backends implement [`OrderedMap`]:
//! [`BstMap`], a plain unbalanced binary search tree, and
//! [`AvlTreeMap`], a height-balanced AVL tree.
//!
//! ```
//! use schedule_tree::{AvlTreeMap, BstMap};
//!
//! let mut bst = BstMap::new();
//! let mut avl = AvlTreeMap::new();
//! for key in ["A", "B", "C", "D", "E"] {
//!     bst.insert(key, ());
//!     avl.insert(key, ());
//! }
//! assert_eq!(bst.height(), 4);
//! assert_eq!(avl.height(), 2);
//! ```

pub mod avl;
pub mod bst;
mod map;
pub mod schedule;

pub use avl::AvlTreeMap;
pub use bst::BstMap;
pub use map::OrderedMap;
pub use schedule::{Backend, Schedule, ScheduleError, ScheduleItem};

#[cfg(test)]
mod proptests;
