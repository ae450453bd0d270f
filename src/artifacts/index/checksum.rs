use crate::artifacts::index::CHECKSUM_SIZE;
use crate::errors::{Error, Result};
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

/// Running SHA-1 over everything read from or written to the inner stream
#[derive(Debug)]
pub struct Checksum<T> {
    inner: T,
    digest: Sha1,
}

impl<T> Checksum<T> {
    pub(crate) fn new(inner: T) -> Self {
        Checksum {
            inner,
            digest: Sha1::new(),
        }
    }

    pub(crate) fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read> Checksum<T> {
    pub(crate) fn read(&mut self, size: usize, source: &Path) -> Result<Bytes> {
        let mut buffer = vec![0; size];
        self.inner
            .read_exact(&mut buffer)
            .map_err(|e| read_failure(e, source, "unexpected end of staging index"))?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    /// Compare the trailing checksum and make sure nothing follows it
    pub(crate) fn verify(&mut self, source: &Path) -> Result<()> {
        let mut expected = [0u8; CHECKSUM_SIZE];
        self.inner
            .read_exact(&mut expected)
            .map_err(|e| read_failure(e, source, "staging index is missing its checksum"))?;

        if expected != self.digest.clone().finalize().as_slice() {
            return Err(Error::corrupt("staging index checksum does not match"));
        }

        let mut trailing = [0u8; 1];
        match self.inner.read(&mut trailing) {
            Ok(0) => Ok(()),
            Ok(_) => Err(Error::corrupt("unexpected bytes after staging index checksum")),
            Err(e) => Err(Error::io("read staging index", source, e)),
        }
    }
}

/// A short read means the snapshot is truncated; anything else is the filesystem
fn read_failure(error: std::io::Error, source: &Path, truncated: &str) -> Error {
    match error.kind() {
        ErrorKind::UnexpectedEof => Error::corrupt(truncated),
        _ => Error::io("read staging index", source, error),
    }
}

impl<T: Write> Checksum<T> {
    pub(crate) fn write(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.inner.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub(crate) fn write_checksum(&mut self) -> std::io::Result<()> {
        let checksum = self.digest.clone().finalize();
        self.inner.write_all(checksum.as_slice())
    }
}
