use crate::areas::refs::{HEAD_REF_NAME, RefResolver};
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;

impl Repository {
    /// Resolve `HEAD` or a full object ID
    pub(crate) fn resolve_revision(&self, revision: &str) -> anyhow::Result<ObjectId> {
        if revision == HEAD_REF_NAME {
            return self.refs().resolve_current_tip()?.ok_or_else(|| {
                anyhow::anyhow!("HEAD does not point at a commit yet")
            });
        }

        Ok(ObjectId::try_parse(revision)?)
    }

    /// Resolve a revision to a tree, peeling commits to their tree
    pub(crate) fn resolve_tree(&self, revision: &str) -> anyhow::Result<(ObjectId, Tree)> {
        let oid = self.resolve_revision(revision)?;

        let tree_oid = match self.database().object_type(&oid)? {
            ObjectType::Commit => *self.database().get_commit(&oid)?.tree_oid(),
            ObjectType::Tree => oid,
            ObjectType::Blob => anyhow::bail!("{revision} is a blob, not a tree or commit"),
        };

        Ok((tree_oid, self.database().get_tree(&tree_oid)?))
    }
}
