//! Data structures and algorithms
//!
//! - `checkout`: Materializing trees into a directory
//! - `core`: Shared utilities (author identity, event hook)
//! - `index`: Staging index data structure and its file format
//! - `log`: Commit history traversal
//! - `objects`: Object kinds (blob, tree, commit) and the framing codec

pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod objects;
