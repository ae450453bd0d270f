//! Shared utilities
//!
//! - `author`: author identity rendered into commit headers
//! - `events`: optional structured event hook

pub mod author;
pub mod events;
