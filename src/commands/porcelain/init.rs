use crate::areas::repository::Repository;
use crate::artifacts::index::staging_index::StagingIndex;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .git/objects directory")?;

        self.refs()
            .init()
            .context("Failed to create initial HEAD reference")?;

        // create the index file if it does not exist
        if !self.index().path().exists() {
            self.index()
                .save(&StagingIndex::default())
                .context("Failed to create .git/index file")?;
        }

        writeln!(
            self.writer(),
            "Initialized empty repository in {}",
            self.layout().git_dir().display()
        )?;

        Ok(())
    }
}
