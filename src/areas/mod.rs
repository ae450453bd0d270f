//! Core repository components
//!
//! This module contains the stateful building blocks of a repository:
//!
//! - `database`: Content-addressed object store for blobs, trees, and commits
//! - `index`: Staging index persistence with mutual exclusion
//! - `refs`: Minimal ref resolution (HEAD and branch tips)
//! - `repository`: Repository handle and on-disk layout
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
