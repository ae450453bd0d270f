use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, MAX_PATH_LENGTH};
use crate::artifacts::objects::OBJECT_ID_BYTES;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use byteorder::{ByteOrder, WriteBytesExt};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

/// Staged path → blob ID table
///
/// Paths are exact-string keys. Iteration is ordered by path, which keeps
/// tree snapshots reproducible for the same staged content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingIndex {
    entries: BTreeMap<String, ObjectId>,
}

impl StagingIndex {
    /// Stage `oid` at `path`, returning the ID it replaced
    pub fn insert(&mut self, path: String, oid: ObjectId) -> Option<ObjectId> {
        self.entries.insert(path, oid)
    }

    pub fn get(&self, path: &str) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectId)> {
        self.entries.iter().map(|(path, oid)| (path.as_str(), oid))
    }

    /// Write the full snapshot: header, entries, trailing checksum
    pub fn write_to<W: Write>(&self, writer: W) -> std::io::Result<W> {
        let mut writer = Checksum::new(writer);

        let entries_count = u32::try_from(self.entries.len())
            .map_err(|_| std::io::Error::other("too many staged paths"))?;
        writer.write(&IndexHeader::with_count(entries_count).serialize()?)?;

        for (path, oid) in &self.entries {
            let path_length = u32::try_from(path.len())
                .ok()
                .filter(|&len| len > 0 && len as usize <= MAX_PATH_LENGTH)
                .ok_or_else(|| {
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("staged path length is out of range: {path:?}"),
                    )
                })?;

            let mut entry = Vec::with_capacity(4 + path.len() + OBJECT_ID_BYTES);
            entry.write_u32::<byteorder::NetworkEndian>(path_length)?;
            entry.extend_from_slice(path.as_bytes());
            entry.extend_from_slice(oid.as_bytes());
            writer.write(&entry)?;
        }

        writer.write_checksum()?;
        Ok(writer.into_inner())
    }

    /// Decode a snapshot; `source` names where the bytes come from in I/O errors
    pub fn read_from<R: Read>(reader: R, source: &Path) -> Result<Self> {
        let mut reader = Checksum::new(reader);

        let header = IndexHeader::deserialize(&reader.read(HEADER_SIZE, source)?)?;
        let mut entries = BTreeMap::new();

        for _ in 0..header.entries_count {
            let path_length = byteorder::NetworkEndian::read_u32(&reader.read(4, source)?) as usize;
            if path_length == 0 || path_length > MAX_PATH_LENGTH {
                return Err(Error::corrupt(format!(
                    "staged path length {path_length} is out of range"
                )));
            }

            let path = String::from_utf8(reader.read(path_length, source)?.to_vec())
                .map_err(|_| Error::corrupt("staged path is not valid UTF-8"))?;
            let oid = ObjectId::try_from_slice(&reader.read(OBJECT_ID_BYTES, source)?)?;

            if entries.insert(path.clone(), oid).is_some() {
                return Err(Error::corrupt(format!("staged path {path:?} appears twice")));
            }
        }

        reader.verify(source)?;

        Ok(Self { entries })
    }
}

impl FromIterator<(String, ObjectId)> for StagingIndex {
    fn from_iter<I: IntoIterator<Item = (String, ObjectId)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
