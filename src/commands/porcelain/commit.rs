use crate::areas::refs::{HeadTarget, RefResolver};
use crate::areas::repository::Repository;
use crate::artifacts::core::author::Author;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;
use std::io::Write;

impl Repository {
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        let message = message.trim();
        if message.is_empty() {
            anyhow::bail!("Aborting commit due to empty commit message");
        }

        let index = self.index().load()?;
        let tree = Tree::build(&index);
        let tree_id = self.database().put(&tree.into())?;

        let parent = self.refs().resolve_current_tip()?;
        let is_root = match parent {
            Some(_) => "",
            None => " (root-commit)",
        };

        let author = Author::load_from_env()?;
        let commit = Commit::new(
            tree_id,
            parent.into_iter().collect(),
            author.to_string(),
            Bytes::from(format!("{message}\n")),
        );
        let short_message = commit.short_message();
        let commit_id = self.database().put(&commit.into())?;
        self.refs().update_current_tip(commit_id)?;

        let head = match self.refs().head_target()? {
            HeadTarget::Branch(name) => name,
            HeadTarget::Detached(_) => "detached HEAD".to_string(),
        };

        writeln!(
            self.writer(),
            "[{}{} {}] {}",
            head,
            is_root,
            commit_id.to_short_oid(),
            short_message
        )?;

        Ok(())
    }
}
