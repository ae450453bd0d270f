//! A minimal content-addressable object store with git-style framing
//!
//! Files are stored as blobs, snapshotted into flat trees through a staging
//! index, and linked into a first-parent commit history. Stored trees can be
//! written back into a directory.
//!
//! - `areas`: stateful repository parts (object store, staging index, refs,
//!   workspace, repository handle)
//! - `artifacts`: object codecs, the staging index format, history walking
//!   and materialization
//! - `commands`: the printing command layer used by the `plumb` binary
//! - `errors`: the shared error taxonomy

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use areas::repository::{Repository, RepositoryLayout};
pub use errors::{Error, Result};
