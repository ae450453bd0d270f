//! Command implementations
//!
//! Commands are split the way git splits them:
//!
//! - `plumbing`: Low-level commands for direct object access (hash-object, cat-file, ls-tree)
//! - `porcelain`: User-facing workflows (init, add, commit, log, checkout)
//!
//! This is the only layer that prints. Everything is written to the
//! repository's writer so tests can capture it.

pub mod plumbing;
pub mod porcelain;
mod revision;
