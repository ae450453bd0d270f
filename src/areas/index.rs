//! Staging index persistence
//!
//! The staging index is a single snapshot file replaced wholesale on every
//! save. Reads are unsynchronized snapshots; every mutation runs inside a
//! critical section made of an in-process mutex and an exclusive advisory
//! lock on a sibling lock file, so concurrent `upsert` calls never lose an
//! update.
//!
//! Saves write a temporary file next to the index and rename it into place,
//! so readers observe either the old or the new snapshot, never a torn one.

use crate::artifacts::core::events::{Event, EventSink};
use crate::artifacts::index::staging_index::StagingIndex;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, IoContext, Result};
use file_guard::Lock;
use std::io::BufWriter;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub struct Index {
    /// Path to the index file (typically `.git/index`)
    path: Box<Path>,
    /// Path to the lock file guarding mutations (typically `.git/index.lock`)
    lock_path: Box<Path>,
    /// Serializes mutations between threads of this process
    guard: Mutex<()>,
    events: Arc<dyn EventSink>,
}

impl Index {
    pub fn new(path: Box<Path>, lock_path: Box<Path>, events: Arc<dyn EventSink>) -> Self {
        Index {
            path,
            lock_path,
            guard: Mutex::new(()),
            events,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted snapshot, or an empty index if none exists yet
    pub fn load(&self) -> Result<StagingIndex> {
        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StagingIndex::default());
            }
            Err(e) => return Err(Error::io("open staging index", self.path.to_path_buf(), e)),
        };

        let metadata = file
            .metadata()
            .io_context("stat staging index", &self.path)?;
        if metadata.len() == 0 {
            return Ok(StagingIndex::default());
        }

        StagingIndex::read_from(std::io::BufReader::new(file), &self.path)
    }

    /// Replace the persisted snapshot with `index`
    pub fn save(&self, index: &StagingIndex) -> Result<()> {
        self.with_lock(|| self.write_snapshot(index))
    }

    /// Stage `oid` at `path`, replacing any previous entry for that path
    pub fn upsert(&self, path: &str, oid: ObjectId) -> Result<()> {
        self.upsert_many([(path.to_string(), oid)])
    }

    /// Stage several paths inside one load-mutate-save cycle
    pub fn upsert_many(&self, entries: impl IntoIterator<Item = (String, ObjectId)>) -> Result<()> {
        let entries = entries.into_iter().collect::<Vec<_>>();
        if entries.iter().any(|(path, _)| path.is_empty()) {
            return Err(Error::invalid_argument("staged path must not be empty"));
        }

        self.with_lock(|| {
            let mut index = self.load()?;
            for (path, oid) in &entries {
                index.insert(path.clone(), *oid);
            }

            self.write_snapshot(&index)
        })?;

        for (path, oid) in &entries {
            self.events.emit(&Event::IndexUpdated {
                path: path.as_str(),
                oid: *oid,
            });
        }

        Ok(())
    }

    /// Run `f` while holding the index's exclusive critical section
    fn with_lock<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let _in_process = self
            .guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut lock_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)
            .io_context("open index lock", &self.lock_path)?;
        let _lock = file_guard::lock(&mut lock_file, Lock::Exclusive, 0, 1)
            .io_context("lock index", &self.lock_path)?;
        tracing::trace!(lock = %self.lock_path.display(), "index lock acquired");

        f()
    }

    fn write_snapshot(&self, index: &StagingIndex) -> Result<()> {
        let temp_path = self.path.with_extension("tmp");

        let file = std::fs::File::create(&temp_path)
            .io_context("create temporary staging index", &temp_path)?;
        let written = index
            .write_to(BufWriter::new(file))
            .and_then(|writer| writer.into_inner().map_err(|e| e.into_error()))
            .and_then(|file| file.sync_all())
            .io_context("write temporary staging index", &temp_path)
            .and_then(|_| {
                std::fs::rename(&temp_path, &self.path)
                    .io_context("install staging index", &self.path)
            });

        if written.is_err() {
            let _ = std::fs::remove_file(&temp_path);
        }
        written?;

        self.events.emit(&Event::IndexSaved {
            entries: index.len(),
        });

        Ok(())
    }
}

impl std::fmt::Debug for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Index")
            .field("path", &self.path)
            .field("lock_path", &self.lock_path)
            .finish()
    }
}
