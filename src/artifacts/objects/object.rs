use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::frame;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Result;
use bytes::Bytes;

/// Produce the unframed body of an object
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

/// Rebuild an object from its unframed body
pub trait Unpackable {
    fn deserialize(body: Bytes) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;
}

/// One of the three stored object kinds
///
/// The set is closed: every dispatch point matches exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitObject {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl GitObject {
    pub fn object_type(&self) -> ObjectType {
        match self {
            GitObject::Blob(blob) => blob.object_type(),
            GitObject::Tree(tree) => tree.object_type(),
            GitObject::Commit(commit) => commit.object_type(),
        }
    }

    pub fn serialize(&self) -> Result<Bytes> {
        match self {
            GitObject::Blob(blob) => blob.serialize(),
            GitObject::Tree(tree) => tree.serialize(),
            GitObject::Commit(commit) => commit.serialize(),
        }
    }

    pub fn deserialize(kind: ObjectType, body: Bytes) -> Result<Self> {
        match kind {
            ObjectType::Blob => Ok(GitObject::Blob(Blob::deserialize(body)?)),
            ObjectType::Tree => Ok(GitObject::Tree(Tree::deserialize(body)?)),
            ObjectType::Commit => Ok(GitObject::Commit(Commit::deserialize(body)?)),
        }
    }

    /// Header plus body, the exact bytes that are hashed and compressed
    pub fn framed(&self) -> Result<Bytes> {
        Ok(frame::frame(self.object_type(), &self.serialize()?))
    }

    pub fn object_id(&self) -> Result<ObjectId> {
        Ok(frame::hash(&self.framed()?))
    }
}

impl From<Blob> for GitObject {
    fn from(blob: Blob) -> Self {
        GitObject::Blob(blob)
    }
}

impl From<Tree> for GitObject {
    fn from(tree: Tree) -> Self {
        GitObject::Tree(tree)
    }
}

impl From<Commit> for GitObject {
    fn from(commit: Commit) -> Self {
        GitObject::Commit(commit)
    }
}
