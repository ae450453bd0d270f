use crate::areas::repository::Repository;

impl Repository {
    pub fn ls_tree(&self, tree_ish: &str) -> anyhow::Result<()> {
        let (_, tree) = self.resolve_tree(tree_ish)?;

        self.write_tree_entries(&tree)
    }
}
