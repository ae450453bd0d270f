//! Staging index file format
//!
//! The staging index maps working-tree paths to the blob IDs that will be
//! captured by the next commit. It is persisted as one snapshot file.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "SIDX" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length, ordered by path):
//!   - Path length (4 bytes)
//!   - Path (UTF-8)
//!   - Blob ID (20 raw bytes)
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```
//!
//! All integers are big-endian.

pub mod checksum;
pub mod index_header;
pub mod staging_index;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying staging index files
pub const SIGNATURE: &str = "SIDX";

/// Staging index file format version
pub const VERSION: u32 = 1;

/// Upper bound on a single staged path, in bytes
pub const MAX_PATH_LENGTH: usize = 64 * 1024;
