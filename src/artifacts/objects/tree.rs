//! Tree object
//!
//! Trees are ordered lists of named references to blobs and other trees.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entry order is preserved exactly as constructed; nothing is sorted.
//!
//! ## Tree Building
//!
//! `Tree::build` snapshots the staging index into a single flat tree: every
//! staged path becomes one `100644` entry whose name is the full path string.
//! Path separators are not decomposed into nested trees.

use crate::artifacts::index::staging_index::StagingIndex;
use crate::artifacts::objects::OBJECT_ID_BYTES;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: String,
    pub oid: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, new)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a flat tree from the staging index, in the index's iteration order
    pub fn build(index: &StagingIndex) -> Self {
        let entries = index
            .iter()
            .map(|(path, oid)| TreeEntry::new(EntryMode::File, path.to_string(), *oid))
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> impl Iterator<Item = TreeEntry> {
        self.entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes> {
        let mut body = Vec::new();

        for entry in &self.entries {
            if entry.name.is_empty() || entry.name.contains('\0') {
                return Err(Error::invalid_argument(format!(
                    "tree entry name must be non-empty and NUL-free: {:?}",
                    entry.name
                )));
            }

            body.extend_from_slice(entry.mode.as_str().as_bytes());
            body.push(b' ');
            body.extend_from_slice(entry.name.as_bytes());
            body.push(0);
            body.extend_from_slice(entry.oid.as_bytes());
        }

        Ok(Bytes::from(body))
    }
}

impl Unpackable for Tree {
    fn deserialize(body: Bytes) -> Result<Self> {
        let mut entries = Vec::new();
        let mut rest = &body[..];

        while !rest.is_empty() {
            let nul = rest
                .iter()
                .position(|&b| b == 0)
                .ok_or_else(|| Error::corrupt("tree entry is missing its NUL terminator"))?;

            let header = std::str::from_utf8(&rest[..nul])
                .map_err(|_| Error::corrupt("tree entry header is not valid UTF-8"))?;
            let (mode, name) = header
                .split_once(' ')
                .ok_or_else(|| Error::corrupt(format!("tree entry {header:?} has no mode")))?;

            let oid_bytes = rest.get(nul + 1..nul + 1 + OBJECT_ID_BYTES).ok_or_else(|| {
                Error::corrupt(format!(
                    "tree entry {name:?} truncated: expected {OBJECT_ID_BYTES} digest bytes, found {}",
                    rest.len() - nul - 1
                ))
            })?;

            entries.push(TreeEntry::new(
                EntryMode::parse(mode)?,
                name.to_string(),
                ObjectId::try_from_slice(oid_bytes)?,
            ));

            rest = &rest[nul + 1 + OBJECT_ID_BYTES..];
        }

        Ok(Self { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}
