use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::events::{EventSink, TracingSink};
use crate::errors::{IoContext, Result};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the metadata directory inside a worktree
pub const METADATA_DIR: &str = ".git";

/// Where every piece of repository state lives on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLayout {
    worktree: PathBuf,
    git_dir: PathBuf,
}

impl RepositoryLayout {
    pub fn from_worktree(worktree: impl Into<PathBuf>) -> Self {
        let worktree = worktree.into();
        let git_dir = worktree.join(METADATA_DIR);

        RepositoryLayout { worktree, git_dir }
    }

    pub fn worktree(&self) -> &Path {
        &self.worktree
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn objects_path(&self) -> PathBuf {
        self.git_dir.join("objects")
    }

    pub fn index_path(&self) -> PathBuf {
        self.git_dir.join("index")
    }

    pub fn index_lock_path(&self) -> PathBuf {
        self.git_dir.join("index.lock")
    }

    pub fn refs_path(&self) -> PathBuf {
        self.git_dir.join("refs")
    }
}

/// Explicit handle onto one repository
///
/// Commands print through `writer()`; the areas themselves never print.
pub struct Repository {
    layout: RepositoryLayout,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    index: Index,
    refs: Refs,
    workspace: Workspace,
    events: Arc<dyn EventSink>,
}

impl Repository {
    pub fn new(path: impl AsRef<Path>, writer: Box<dyn std::io::Write>) -> Result<Self> {
        Self::with_events(path, writer, Arc::new(TracingSink))
    }

    pub fn with_events(
        path: impl AsRef<Path>,
        writer: Box<dyn std::io::Write>,
        events: Arc<dyn EventSink>,
    ) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            std::fs::create_dir_all(path).io_context("create worktree", path)?;
        }
        let path = path.canonicalize().io_context("resolve worktree", path)?;

        Ok(Self::open(
            RepositoryLayout::from_worktree(path),
            writer,
            events,
        ))
    }

    /// Build a handle from an explicit layout without touching the disk
    pub fn open(
        layout: RepositoryLayout,
        writer: Box<dyn std::io::Write>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let database = Database::new(layout.objects_path().into_boxed_path(), events.clone());
        let index = Index::new(
            layout.index_path().into_boxed_path(),
            layout.index_lock_path().into_boxed_path(),
            events.clone(),
        );
        let refs = Refs::new(layout.git_dir().to_path_buf().into_boxed_path());
        let workspace = Workspace::new(layout.worktree().to_path_buf().into_boxed_path());

        Repository {
            layout,
            writer: RefCell::new(writer),
            database,
            index,
            refs,
            workspace,
            events,
        }
    }

    pub fn path(&self) -> &Path {
        self.layout.worktree()
    }

    pub fn layout(&self) -> &RepositoryLayout {
        &self.layout
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn events(&self) -> &dyn EventSink {
        self.events.as_ref()
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}
