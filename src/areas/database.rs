use crate::artifacts::core::events::{Event, EventSink};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::frame;
use crate::artifacts::objects::object::GitObject;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, IoContext, Result};
use bytes::Bytes;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Content-addressed object store
///
/// Objects live at `<root>/<xx>/<yyyy...>`, zlib-compressed. Writes are
/// idempotent and installed atomically via a temporary file and a rename.
pub struct Database {
    path: Box<Path>,
    events: Arc<dyn EventSink>,
}

impl Database {
    pub fn new(path: Box<Path>, events: Arc<dyn EventSink>) -> Self {
        Database { path, events }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Object ID `put` would return, without touching the disk
    pub fn hash(&self, object: &GitObject) -> Result<ObjectId> {
        object.object_id()
    }

    pub fn put(&self, object: &GitObject) -> Result<ObjectId> {
        let kind = object.object_type();
        let framed = object.framed()?;
        let object_id = frame::hash(&framed);
        let object_path = self.object_path(&object_id);

        // write the object to disk unless it already exists
        if object_path.exists() {
            self.events.emit(&Event::ObjectReused {
                oid: object_id,
                kind,
            });
            return Ok(object_id);
        }

        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::invalid_argument(format!("invalid object path {object_path:?}")))?;
        std::fs::create_dir_all(object_dir).io_context("create object directory", object_dir)?;

        self.write_object(&object_path, &frame::compress(&framed)?)?;
        self.events.emit(&Event::ObjectWritten {
            oid: object_id,
            kind,
        });

        Ok(object_id)
    }

    pub fn get(&self, object_id: &ObjectId) -> Result<GitObject> {
        let (kind, body) = self.read_framed(object_id)?;
        GitObject::deserialize(kind, body)
            .map_err(|e| with_object_context(e, object_id))
    }

    pub fn get_blob(&self, object_id: &ObjectId) -> Result<Blob> {
        match self.get(object_id)? {
            GitObject::Blob(blob) => Ok(blob),
            other => Err(kind_mismatch(object_id, ObjectType::Blob, other.object_type())),
        }
    }

    pub fn get_tree(&self, object_id: &ObjectId) -> Result<Tree> {
        match self.get(object_id)? {
            GitObject::Tree(tree) => Ok(tree),
            other => Err(kind_mismatch(object_id, ObjectType::Tree, other.object_type())),
        }
    }

    pub fn get_commit(&self, object_id: &ObjectId) -> Result<Commit> {
        match self.get(object_id)? {
            GitObject::Commit(commit) => Ok(commit),
            other => Err(kind_mismatch(object_id, ObjectType::Commit, other.object_type())),
        }
    }

    /// Kind tag of a stored object, without decoding its body
    pub fn object_type(&self, object_id: &ObjectId) -> Result<ObjectType> {
        Ok(self.read_framed(object_id)?.0)
    }

    fn read_framed(&self, object_id: &ObjectId) -> Result<(ObjectType, Bytes)> {
        let object_path = self.object_path(object_id);

        let compressed = match std::fs::read(&object_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::not_found(format!("object {object_id}")));
            }
            Err(e) => return Err(Error::io("read object file", object_path, e)),
        };

        frame::decompress(&compressed)
            .and_then(|framed| frame::unframe(&framed))
            .map_err(|e| with_object_context(e, object_id))
    }

    fn write_object(&self, object_path: &Path, compressed: &[u8]) -> Result<()> {
        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::invalid_argument(format!("invalid object path {object_path:?}")))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .io_context("create temporary object file", &temp_object_path)?;

        let written = file
            .write_all(compressed)
            .and_then(|_| file.sync_all())
            .io_context("write temporary object file", &temp_object_path)
            .and_then(|_| {
                // rename the temp file to the object file to make it atomic
                std::fs::rename(&temp_object_path, object_path)
                    .io_context("install object file", object_path)
            });

        if written.is_err() {
            let _ = std::fs::remove_file(&temp_object_path);
        }

        written
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

fn with_object_context(error: Error, object_id: &ObjectId) -> Error {
    match error {
        Error::Corrupt(reason) => Error::corrupt(format!("object {object_id}: {reason}")),
        other => other,
    }
}

fn kind_mismatch(object_id: &ObjectId, expected: ObjectType, found: ObjectType) -> Error {
    Error::corrupt(format!("object {object_id} is a {found}, expected a {expected}"))
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("path", &self.path).finish()
    }
}
