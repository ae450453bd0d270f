//! Object types and their codecs
//!
//! All content is stored as objects identified by SHA-1 digests. There are
//! exactly three kinds:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Ordered listing of names, modes and object IDs
//! - **Commit**: Snapshot metadata (tree, parents, author, message)
//!
//! All objects share the frame `<type> <size>\0<content>` (see `frame`).

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod frame;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 digest in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a raw SHA-1 digest
pub const OBJECT_ID_BYTES: usize = 20;
