//! Object framing, hashing and compression
//!
//! Every stored object is framed as `<kind> <decimal length>\0<body>`. The
//! object ID is the SHA-1 of the framed bytes and the framed bytes are
//! zlib-compressed before they hit the disk.

use crate::artifacts::objects::OBJECT_ID_BYTES;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

/// Prefix `body` with its kind and length header
pub fn frame(kind: ObjectType, body: &[u8]) -> Bytes {
    let header = format!("{} {}\0", kind.as_str(), body.len());

    let mut framed = Vec::with_capacity(header.len() + body.len());
    framed.extend_from_slice(header.as_bytes());
    framed.extend_from_slice(body);

    Bytes::from(framed)
}

/// Split framed bytes back into the kind tag and the body
///
/// The first space ends the kind, the first NUL ends the length. Either
/// delimiter missing, the NUL preceding the space, or a declared length that
/// disagrees with the remaining byte count is `Corrupt`.
pub fn unframe(framed: &Bytes) -> Result<(ObjectType, Bytes)> {
    let space = framed
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| Error::corrupt("object header has no kind delimiter"))?;
    let nul = framed
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::corrupt("object header has no length delimiter"))?;

    if nul < space {
        return Err(Error::corrupt("object header delimiters out of order"));
    }

    let kind = std::str::from_utf8(&framed[..space])
        .map_err(|_| Error::corrupt("object kind is not ASCII"))?;
    let kind = ObjectType::try_from(kind)?;

    let declared = std::str::from_utf8(&framed[space + 1..nul])
        .ok()
        .filter(|len| !len.is_empty() && len.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|len| len.parse::<usize>().ok())
        .ok_or_else(|| Error::corrupt("object length is not a decimal number"))?;

    let body = framed.slice(nul + 1..);
    if declared != body.len() {
        return Err(Error::corrupt(format!(
            "object declares {declared} bytes but carries {}",
            body.len()
        )));
    }

    Ok((kind, body))
}

/// SHA-1 over the framed bytes
pub fn hash(framed: &[u8]) -> ObjectId {
    let mut hasher = Sha1::new();
    hasher.update(framed);

    let mut digest = [0u8; OBJECT_ID_BYTES];
    digest.copy_from_slice(&hasher.finalize());
    ObjectId::from_bytes(digest)
}

pub fn compress(framed: &[u8]) -> Result<Bytes> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder
        .write_all(framed)
        .and_then(|_| encoder.finish())
        .map(Bytes::from)
        .map_err(|e| Error::corrupt(format!("unable to compress object content: {e}")))
}

pub fn decompress(data: &[u8]) -> Result<Bytes> {
    let mut decoder = flate2::read::ZlibDecoder::new(data);
    let mut framed = Vec::new();
    decoder
        .read_to_end(&mut framed)
        .map_err(|e| Error::corrupt(format!("invalid compressed stream: {e}")))?;

    Ok(Bytes::from(framed))
}
