//! Porcelain commands (user-facing workflows)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for the next commit
//! - `commit`: Snapshot the staging index into a commit
//! - `log`: Show first-parent history
//! - `checkout`: Write a commit's tree into a directory

pub mod add;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
