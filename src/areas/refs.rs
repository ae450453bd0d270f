//! References (HEAD and branch tips)
//!
//! Only the minimal contract the core needs is implemented: resolve the
//! commit the current branch points at, and advance it.
//!
//! ## File Format
//!
//! Reference files contain either:
//! - A 40-character hex object ID (direct reference)
//! - `ref: <path>` for symbolic references (e.g. `HEAD`)

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, IoContext, Result};
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex};

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";

/// Longest chain of symbolic references followed before giving up
const MAX_SYMREF_DEPTH: usize = 5;

static SYMREF_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^ref: (.+)$").expect("symbolic ref pattern is valid")
});

/// Collaborator that knows which commit is the current tip
pub trait RefResolver {
    fn resolve_current_tip(&self) -> Result<Option<ObjectId>>;

    fn update_current_tip(&self, oid: ObjectId) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SymRefOrOid {
    SymRef(String),
    Oid(ObjectId),
}

/// Where HEAD currently points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadTarget {
    /// HEAD follows `refs/heads/<branch>`
    Branch(String),
    /// HEAD holds a commit ID directly
    Detached(ObjectId),
}

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.git`)
    path: Box<Path>,
    /// Serializes tip updates between threads of this process
    #[new(default)]
    guard: Mutex<()>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    /// Create `refs/heads` and point HEAD at the default branch unless HEAD exists
    pub fn init(&self) -> Result<()> {
        let heads_path = self.heads_path();
        std::fs::create_dir_all(&heads_path).io_context("create refs directory", &heads_path)?;

        let head_path = self.head_path();
        if !head_path.exists() {
            std::fs::write(&head_path, format!("ref: refs/heads/{DEFAULT_BRANCH}\n"))
                .io_context("write HEAD", &head_path)?;
        }

        Ok(())
    }

    pub fn head_target(&self) -> Result<HeadTarget> {
        match self.read_ref_file(&self.head_path())? {
            Some(SymRefOrOid::SymRef(target)) => {
                let branch = target.strip_prefix("refs/heads/").unwrap_or(&target);
                Ok(HeadTarget::Branch(branch.to_string()))
            }
            Some(SymRefOrOid::Oid(oid)) => Ok(HeadTarget::Detached(oid)),
            None => Err(Error::not_found("HEAD is empty")),
        }
    }

    /// Follow HEAD through symbolic refs to the file holding the tip
    fn resolve_head_path(&self) -> Result<PathBuf> {
        let mut path = self.head_path();

        for _ in 0..MAX_SYMREF_DEPTH {
            match self.read_ref_file(&path)? {
                Some(SymRefOrOid::SymRef(target)) => path = self.ref_path(&target)?,
                Some(SymRefOrOid::Oid(_)) | None => return Ok(path),
            }
        }

        Err(Error::corrupt(format!(
            "symbolic references nest deeper than {MAX_SYMREF_DEPTH} levels"
        )))
    }

    fn ref_path(&self, target: &str) -> Result<PathBuf> {
        let relative = Path::new(target);
        let escapes = relative.components().any(|component| {
            !matches!(component, std::path::Component::Normal(_))
        });
        if escapes {
            return Err(Error::corrupt(format!("symbolic ref escapes repository: {target:?}")));
        }

        Ok(self.path.join(relative))
    }

    fn read_ref_file(&self, path: &Path) -> Result<Option<SymRefOrOid>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if path == self.head_path() {
                    return Err(Error::not_found(format!("{} (not a repository?)", path.display())));
                }
                return Ok(None);
            }
            Err(e) => return Err(Error::io("read ref", path, e)),
        };
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        if let Some(symref_match) = SYMREF_REGEX.captures(content) {
            return Ok(Some(SymRefOrOid::SymRef(symref_match[1].to_string())));
        }

        ObjectId::try_parse(content)
            .map(|oid| Some(SymRefOrOid::Oid(oid)))
            .map_err(|_| Error::corrupt(format!("ref {} holds {content:?}", path.display())))
    }
}

impl RefResolver for Refs {
    fn resolve_current_tip(&self) -> Result<Option<ObjectId>> {
        match self.read_ref_file(&self.resolve_head_path()?)? {
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            Some(SymRefOrOid::SymRef(_)) | None => Ok(None),
        }
    }

    fn update_current_tip(&self, oid: ObjectId) -> Result<()> {
        let path = self.resolve_head_path()?;

        let parent = path
            .parent()
            .ok_or_else(|| Error::invalid_argument(format!("invalid ref path {path:?}")))?;
        std::fs::create_dir_all(parent).io_context("create ref directory", parent)?;

        let _in_process = self
            .guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let lock_path = sibling_path(&path, ".lock");
        let mut lock_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .io_context("open ref lock", &lock_path)?;
        let _lock = file_guard::lock(&mut lock_file, Lock::Exclusive, 0, 1)
            .io_context("lock ref", &lock_path)?;

        let temp_path = sibling_path(&path, ".tmp");
        let written = std::fs::File::create(&temp_path)
            .and_then(|mut file| {
                file.write_all(format!("{oid}\n").as_bytes())?;
                file.sync_all()
            })
            .io_context("write temporary ref", &temp_path)
            .and_then(|_| std::fs::rename(&temp_path, &path).io_context("install ref", &path));

        if written.is_err() {
            let _ = std::fs::remove_file(&temp_path);
        }
        written?;
        tracing::debug!(reference = %path.display(), %oid, "ref updated");

        Ok(())
    }
}

/// `path` with `suffix` appended to its file name
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs_in(dir: &Path) -> Refs {
        let refs = Refs::new(dir.to_path_buf().into_boxed_path());
        refs.init().unwrap();
        refs
    }

    #[test]
    fn fresh_repository_has_no_tip() {
        let dir = assert_fs::TempDir::new().unwrap();
        let refs = refs_in(dir.path());

        assert_eq!(refs.resolve_current_tip().unwrap(), None);
        assert_eq!(
            refs.head_target().unwrap(),
            HeadTarget::Branch(DEFAULT_BRANCH.to_string())
        );
    }

    #[test]
    fn updating_the_tip_writes_through_head_to_the_branch() {
        let dir = assert_fs::TempDir::new().unwrap();
        let refs = refs_in(dir.path());
        let first = ObjectId::from_bytes([1; 20]);
        let second = ObjectId::from_bytes([2; 20]);

        refs.update_current_tip(first).unwrap();
        refs.update_current_tip(second).unwrap();

        assert_eq!(refs.resolve_current_tip().unwrap(), Some(second));
        let branch = std::fs::read_to_string(refs.heads_path().join(DEFAULT_BRANCH)).unwrap();
        assert_eq!(branch, format!("{second}\n"));
    }

    #[test]
    fn detached_head_resolves_directly() {
        let dir = assert_fs::TempDir::new().unwrap();
        let refs = refs_in(dir.path());
        let oid = ObjectId::from_bytes([7; 20]);
        std::fs::write(refs.head_path(), oid.to_string()).unwrap();

        assert_eq!(refs.resolve_current_tip().unwrap(), Some(oid));
        assert_eq!(refs.head_target().unwrap(), HeadTarget::Detached(oid));
    }

    #[test]
    fn missing_head_is_not_found() {
        let dir = assert_fs::TempDir::new().unwrap();
        let refs = Refs::new(dir.path().to_path_buf().into_boxed_path());

        assert!(refs.resolve_current_tip().unwrap_err().is_not_found());
    }

    #[test]
    fn garbage_in_branch_file_is_corrupt() {
        let dir = assert_fs::TempDir::new().unwrap();
        let refs = refs_in(dir.path());
        std::fs::write(refs.heads_path().join(DEFAULT_BRANCH), "not an id").unwrap();

        assert!(refs.resolve_current_tip().unwrap_err().is_corrupt());
    }

    #[test]
    fn readers_never_see_a_missing_tip_while_it_moves() {
        let dir = assert_fs::TempDir::new().unwrap();
        let refs = refs_in(dir.path());
        let ids = [ObjectId::from_bytes([1; 20]), ObjectId::from_bytes([2; 20])];
        refs.update_current_tip(ids[0]).unwrap();

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for round in 0..200 {
                    refs.update_current_tip(ids[round % 2]).unwrap();
                }
            });

            for _ in 0..200 {
                let tip = refs.resolve_current_tip().unwrap();
                assert!(tip.is_some_and(|oid| ids.contains(&oid)), "saw {tip:?}");
            }
        });

        assert!(!refs.heads_path().join("master.tmp").exists());
    }
}
