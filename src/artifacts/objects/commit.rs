//! Commit object
//!
//! Commits are named snapshots: one tree, an ordered list of parents, an
//! opaque author string and a raw message.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>      (zero or more)
//! author <author>
//!
//! <commit message bytes, verbatim>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;

const HEADER_SEPARATOR: &[u8] = b"\n\n";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Commit {
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Parent commit IDs (empty for the root commit)
    parents: Vec<ObjectId>,
    author: String,
    message: Bytes,
}

impl Commit {
    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First parent, the only one history traversal follows
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn message(&self) -> &Bytes {
        &self.message
    }

    /// First line of the message, lossily decoded
    pub fn short_message(&self) -> String {
        let first_line = self
            .message
            .split(|&b| b == b'\n')
            .next()
            .unwrap_or_default();
        String::from_utf8_lossy(first_line).into_owned()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Result<Bytes> {
        if self.author.contains('\n') {
            return Err(Error::invalid_argument(format!(
                "commit author must be a single line: {:?}",
                self.author
            )));
        }

        let mut header = vec![format!("tree {}", self.tree_oid)];
        for parent in &self.parents {
            header.push(format!("parent {parent}"));
        }
        header.push(format!("author {}", self.author));

        let mut body = header.join("\n").into_bytes();
        body.extend_from_slice(HEADER_SEPARATOR);
        body.extend_from_slice(&self.message);

        Ok(Bytes::from(body))
    }
}

impl Unpackable for Commit {
    fn deserialize(body: Bytes) -> Result<Self> {
        let (header, message) = match body
            .windows(HEADER_SEPARATOR.len())
            .position(|window| window == HEADER_SEPARATOR)
        {
            Some(split) => (
                body.slice(..split),
                body.slice(split + HEADER_SEPARATOR.len()..),
            ),
            None => (body.clone(), Bytes::new()),
        };

        let header = std::str::from_utf8(&header)
            .map_err(|_| Error::corrupt("commit header is not valid UTF-8"))?;

        let mut tree_oid = None;
        let mut parents = Vec::new();
        let mut author = String::new();

        for line in header.split('\n') {
            let Some((key, value)) = line.split_once(' ') else {
                continue;
            };

            match key {
                "tree" => {
                    if tree_oid.is_some() {
                        return Err(Error::corrupt("commit has more than one tree line"));
                    }
                    tree_oid = Some(parse_header_oid(key, value)?);
                }
                "parent" => parents.push(parse_header_oid(key, value)?),
                "author" => author = value.to_string(),
                _ => {}
            }
        }

        let tree_oid = tree_oid.ok_or_else(|| Error::corrupt("commit has no tree line"))?;

        Ok(Self::new(tree_oid, parents, author, message))
    }
}

fn parse_header_oid(key: &str, value: &str) -> Result<ObjectId> {
    ObjectId::try_parse(value)
        .map_err(|_| Error::corrupt(format!("commit {key} line holds a malformed ID: {value:?}")))
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn oid(fill: u8) -> ObjectId {
        ObjectId::from_bytes([fill; 20])
    }

    #[test]
    fn fields_survive_with_two_parents_and_multiline_message() {
        let commit = Commit::new(
            oid(1),
            vec![oid(2), oid(3)],
            "Jane Doe <jane@example.com> 1700000000 +0100".to_string(),
            Bytes::from_static(b"subject\n\nbody line one\nbody line two\n\n\ntrailing"),
        );

        let decoded = Commit::deserialize(commit.serialize().unwrap()).unwrap();
        assert_eq!(decoded.tree_oid(), &oid(1));
        assert_eq!(decoded.parents(), &[oid(2), oid(3)]);
        assert_eq!(decoded.author(), commit.author());
        assert_eq!(decoded.message(), commit.message());
    }

    #[test]
    fn serialized_layout() {
        let commit = Commit::new(
            oid(0x11),
            vec![oid(0x22)],
            "me".to_string(),
            Bytes::from_static(b"msg"),
        );

        let expected = format!(
            "tree {}\nparent {}\nauthor me\n\nmsg",
            "11".repeat(20),
            "22".repeat(20)
        );
        assert_eq!(&commit.serialize().unwrap()[..], expected.as_bytes());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let body = format!(
            "tree {}\ncommitter someone\nauthor me\n\nmsg",
            "ab".repeat(20)
        );
        let commit = Commit::deserialize(Bytes::from(body)).unwrap();
        assert_eq!(commit.author(), "me");
        assert!(commit.parents().is_empty());
    }

    #[test]
    fn missing_tree_is_corrupt() {
        let err = Commit::deserialize(Bytes::from_static(b"author me\n\nmsg")).unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn malformed_parent_is_corrupt() {
        let body = format!("tree {}\nparent nope\nauthor me\n\nmsg", "ab".repeat(20));
        assert!(Commit::deserialize(Bytes::from(body)).unwrap_err().is_corrupt());
    }

    #[test]
    fn short_message_takes_first_line() {
        let commit = Commit::new(
            oid(1),
            Vec::new(),
            String::new(),
            Bytes::from_static(b"first\nsecond"),
        );
        assert_eq!(commit.short_message(), "first");
    }
}
