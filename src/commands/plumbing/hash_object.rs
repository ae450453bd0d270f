use crate::areas::repository::Repository;
use crate::artifacts::objects::object::GitObject;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn hash_object(&self, object_path: &str, write: bool) -> anyhow::Result<()> {
        let object: GitObject = self.workspace().parse_blob(Path::new(object_path))?.into();

        // write (if requested) as a compressed object file, otherwise only hash
        let object_id = if write {
            self.database().put(&object)?
        } else {
            self.database().hash(&object)?
        };

        writeln!(self.writer(), "{object_id}")?;

        Ok(())
    }
}
