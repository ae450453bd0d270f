use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::errors::{Error, Result};
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::Write;

#[derive(Debug, Clone, new)]
pub struct IndexHeader {
    pub(crate) marker: String,
    pub(crate) version: u32,
    pub(crate) entries_count: u32,
}

impl IndexHeader {
    pub(crate) fn with_count(entries_count: u32) -> Self {
        IndexHeader::new(String::from(SIGNATURE), VERSION, entries_count)
    }

    pub(crate) fn serialize(&self) -> std::io::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(self.marker.as_bytes())?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.version)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.entries_count)?;

        Ok(Bytes::from(bytes))
    }

    /// Parse and validate signature and version
    pub(crate) fn deserialize(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::corrupt("staging index header is truncated"));
        }

        let marker = String::from_utf8(bytes[0..4].to_vec())
            .map_err(|_| Error::corrupt("invalid staging index signature"))?;
        if marker != SIGNATURE {
            return Err(Error::corrupt(format!(
                "invalid staging index signature {marker:?}"
            )));
        }

        let version = byteorder::NetworkEndian::read_u32(&bytes[4..8]);
        if version != VERSION {
            return Err(Error::corrupt(format!(
                "unsupported staging index version {version}"
            )));
        }

        let entries_count = byteorder::NetworkEndian::read_u32(&bytes[8..12]);

        Ok(IndexHeader::new(marker, version, entries_count))
    }
}
