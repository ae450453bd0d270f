use crate::areas::repository::Repository;
use std::path::Path;

impl Repository {
    pub fn add(&self, paths: &[String]) -> anyhow::Result<()> {
        // Iterate over each provided file path and expand it if it's a directory
        let files = paths
            .iter()
            .map(|path| self.workspace().list_files(Some(Path::new(path))))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten();

        let mut staged = Vec::new();
        for file in files {
            let blob = self.workspace().parse_blob(&file)?;
            let blob_id = self.database().put(&blob.into())?;

            staged.push((self.workspace().index_path(&file)?, blob_id));
        }

        self.index().upsert_many(staged)?;

        Ok(())
    }
}
