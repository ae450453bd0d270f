//! Plumbing commands (low-level object operations)
//!
//! ## Commands
//!
//! - `hash-object`: Compute a blob's object ID and optionally store it
//! - `cat-file`: Print an object's content or kind
//! - `ls-tree`: List the entries of a tree

pub mod cat_file;
pub mod hash_object;
pub mod ls_tree;
