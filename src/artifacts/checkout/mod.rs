//! Writing stored trees back to the filesystem
//!
//! - `materializer`: expands a tree into a destination directory
//!
//! Checkout only writes. It never deletes files absent from the tree and
//! never touches refs or the staging index.

pub mod materializer;
