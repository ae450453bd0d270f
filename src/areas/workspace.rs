use crate::artifacts::objects::blob::Blob;
use crate::errors::{Error, IoContext, Result};
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 1] = [".git"];

/// Working directory the user edits
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse_blob(&self, path: &Path) -> Result<Blob> {
        Ok(Blob::new(self.read_file(path)?))
    }

    /// Regular files under `root` (or the whole worktree), relative to the worktree
    ///
    /// The metadata directory is skipped. Results are sorted so staging order
    /// never depends on directory iteration order.
    pub fn list_files(&self, root: Option<&Path>) -> Result<Vec<PathBuf>> {
        let root = match root {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => self.path.join(p),
            None => self.path.to_path_buf(),
        };

        let metadata = std::fs::metadata(&root).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::not_found(format!("path {}", root.display())),
            _ => Error::io("stat", &root, e),
        })?;

        if !metadata.is_dir() {
            return Ok(vec![self.relative_path(&root)?]);
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&root)
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(&entry.file_name().to_string_lossy()));
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root.as_path()).to_path_buf();
                match e.into_io_error() {
                    Some(source) => Error::io("walk", &path, source),
                    None => Error::invalid_argument(format!("filesystem loop at {}", path.display())),
                }
            })?;

            if entry.file_type().is_file() {
                files.push(self.relative_path(entry.path())?);
            }
        }
        files.sort();

        Ok(files)
    }

    pub fn read_file(&self, file_path: &Path) -> Result<Bytes> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read(&file_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                Error::not_found(format!("path {}", file_path.display()))
            }
            _ => Error::io("read", &file_path, e),
        })?;

        Ok(Bytes::from(content))
    }

    /// Path string recorded in the staging index: relative, `/`-separated
    pub fn index_path(&self, file_path: &Path) -> Result<String> {
        let mut parts = Vec::new();
        for component in file_path.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_str().ok_or_else(|| {
                    Error::invalid_argument(format!("path is not UTF-8: {}", file_path.display()))
                })?),
                Component::CurDir => {}
                _ => {
                    return Err(Error::invalid_argument(format!(
                        "path escapes the worktree: {}",
                        file_path.display()
                    )));
                }
            }
        }

        if parts.is_empty() {
            return Err(Error::invalid_argument("path must name a file"));
        }

        Ok(parts.join("/"))
    }

    fn relative_path(&self, path: &Path) -> Result<PathBuf> {
        let canonical_root = self.path.canonicalize().io_context("resolve", &self.path)?;
        let canonical = path.canonicalize().io_context("resolve", path)?;

        canonical
            .strip_prefix(&canonical_root)
            .map(PathBuf::from)
            .map_err(|_| {
                Error::invalid_argument(format!("{} is outside the worktree", path.display()))
            })
    }

    fn is_ignored(name: &str) -> bool {
        IGNORED_PATHS.contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_files_sorted_and_skips_metadata_directory() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("b.txt").write_str("b").unwrap();
        dir.child("a/c.txt").write_str("c").unwrap();
        dir.child(".git/HEAD").write_str("ref: refs/heads/master").unwrap();
        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());

        let files = workspace.list_files(None).unwrap();

        assert_eq!(files, vec![PathBuf::from("a/c.txt"), PathBuf::from("b.txt")]);
    }

    #[test]
    fn index_paths_use_forward_slashes() {
        let workspace = Workspace::new(PathBuf::from("/tmp").into_boxed_path());

        assert_eq!(workspace.index_path(Path::new("a/b/c.txt")).unwrap(), "a/b/c.txt");
        assert_eq!(workspace.index_path(Path::new("./a.txt")).unwrap(), "a.txt");
        assert!(workspace.index_path(Path::new("../a.txt")).is_err());
        assert!(workspace.index_path(Path::new("")).is_err());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = assert_fs::TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());

        assert!(workspace.read_file(Path::new("nope")).unwrap_err().is_not_found());
    }
}
