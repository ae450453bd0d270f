use crate::areas::repository::Repository;
use crate::artifacts::checkout::materializer::Materializer;
use std::io::Write;
use std::path::{Path, PathBuf};

impl Repository {
    /// Write the tree of `target` into the worktree, or into `into` when given
    ///
    /// Refs and the staging index are left as they are.
    pub fn checkout(&self, target: &str, into: Option<&Path>) -> anyhow::Result<()> {
        let (tree_oid, tree) = self.resolve_tree(target)?;

        let destination = match into {
            Some(dir) if dir.is_absolute() => dir.to_path_buf(),
            Some(dir) => self.path().join(dir),
            None => PathBuf::from(self.path()),
        };

        Materializer::new(self.database(), self.events()).materialize(&tree, &destination)?;

        writeln!(
            self.writer(),
            "Checked out tree {} into {}",
            tree_oid.to_short_oid(),
            destination.display()
        )?;

        Ok(())
    }
}
