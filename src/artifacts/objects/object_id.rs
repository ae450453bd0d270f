//! Object identifier (SHA-1 digest)
//!
//! Object IDs are 20-byte digests, rendered as 40 lowercase hexadecimal
//! characters. They are computed over an object's framed bytes and uniquely
//! identify every stored blob, tree and commit.
//!
//! ## Storage
//!
//! Objects are stored in `objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_BYTES, OBJECT_ID_LENGTH};
use crate::errors::{Error, Result};
use std::path::PathBuf;
use std::str::FromStr;

/// Object identifier (SHA-1 digest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_BYTES]);

impl ObjectId {
    /// Parse and validate an object ID from its 40-character hex form
    ///
    /// # Returns
    ///
    /// `InvalidArgument` if the length or any character is wrong
    pub fn try_parse(id: &str) -> Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(Error::invalid_argument(format!(
                "object ID must be {OBJECT_ID_LENGTH} hex characters, got {}: {id:?}",
                id.len()
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::invalid_argument(format!(
                "object ID has non-hex characters: {id:?}"
            )));
        }

        let mut bytes = [0u8; OBJECT_ID_BYTES];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&id[i * 2..i * 2 + 2], 16)
                .map_err(|_| Error::invalid_argument(format!("invalid hex digit in {id:?}")))?;
        }

        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; OBJECT_ID_BYTES]) -> Self {
        Self(bytes)
    }

    /// Build an object ID from a raw slice, as found inside tree entries
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; OBJECT_ID_BYTES] = bytes.try_into().map_err(|_| {
            Error::corrupt(format!(
                "object ID must be {OBJECT_ID_BYTES} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; OBJECT_ID_BYTES] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|byte| format!("{byte:02x}")).collect()
    }

    /// Convert to the fan-out storage path
    ///
    /// The first byte becomes the directory, the remaining 19 bytes the file
    /// name: `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let hex = self.to_hex();
        let (dir, file) = hex.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 hex characters
    pub fn to_short_oid(&self) -> String {
        self.to_hex()[..7].to_string()
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
