use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use std::collections::HashSet;

/// First-parent history, newest first
///
/// Yields the start commit, then follows `parents[0]` until a root commit.
/// A link that cannot be fetched or decoded ends the walk with that error;
/// the iterator is fused afterwards. Revisiting a commit is reported as
/// corruption instead of looping forever.
#[derive(Debug, Clone)]
pub struct RevList<'d> {
    database: &'d Database,
    next_oid: Option<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<'d> RevList<'d> {
    pub fn new(database: &'d Database, start: ObjectId) -> Self {
        RevList {
            database,
            next_oid: Some(start),
            visited: HashSet::new(),
        }
    }
}

impl Iterator for RevList<'_> {
    type Item = Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.next_oid.take()?;

        if !self.visited.insert(commit_oid) {
            return Some(Err(Error::corrupt(format!(
                "commit {commit_oid} appears twice in its own history"
            ))));
        }

        match self.database.get_commit(&commit_oid) {
            Ok(commit) => {
                self.next_oid = commit.parent().copied();
                Some(Ok((commit_oid, commit)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

impl std::iter::FusedIterator for RevList<'_> {}
