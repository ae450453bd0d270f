use crate::areas::repository::Repository;
use crate::artifacts::objects::object::GitObject;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// Print the object's content
    Pretty,
    /// Print the object's kind
    Type,
}

impl Repository {
    pub fn cat_file(&self, revision: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let oid = self.resolve_revision(revision)?;

        if mode == CatFileMode::Type {
            let kind = self.database().object_type(&oid)?;
            writeln!(self.writer(), "{kind}")?;
            return Ok(());
        }

        match self.database().get(&oid)? {
            GitObject::Blob(blob) => self.writer().write_all(blob.data())?,
            GitObject::Tree(tree) => self.write_tree_entries(&tree)?,
            GitObject::Commit(commit) => {
                let body = GitObject::Commit(commit).serialize()?;
                self.writer().write_all(&body)?;
            }
        }

        Ok(())
    }

    /// One line per entry: `<mode> <kind> <id>\t<name>`
    pub(crate) fn write_tree_entries(&self, tree: &Tree) -> anyhow::Result<()> {
        for entry in tree.entries() {
            let kind = if entry.mode.is_tree() {
                ObjectType::Tree
            } else {
                ObjectType::Blob
            };

            writeln!(
                self.writer(),
                "{} {} {}\t{}",
                entry.mode,
                kind,
                entry.oid,
                entry.name
            )?;
        }

        Ok(())
    }
}
