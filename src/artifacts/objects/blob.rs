//! Blob object
//!
//! Blobs store file content. They carry only the raw bytes; names and modes
//! live in the trees that point at them.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`, the body is the content verbatim.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    data: Bytes,
}

impl Blob {
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl Packable for Blob {
    fn serialize(&self) -> Result<Bytes> {
        Ok(self.data.clone())
    }
}

impl Unpackable for Blob {
    fn deserialize(body: Bytes) -> Result<Self> {
        Ok(Self::new(body))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}
