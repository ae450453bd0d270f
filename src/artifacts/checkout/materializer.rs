use crate::areas::database::Database;
use crate::artifacts::core::events::{Event, EventSink};
use crate::artifacts::objects::object::GitObject;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, IoContext, Result};
use std::path::{Path, PathBuf};

/// Deepest tree nesting followed before the tree is treated as corrupt
pub const MAX_DEPTH: usize = 256;

/// Writes the contents of a tree into a directory
///
/// Blobs overwrite whatever file sits at their destination; trees become
/// directories and are expanded in turn. Nothing outside the destination
/// root is ever touched: entry names must be relative, `/`-separated and
/// free of `.`/`..` segments.
pub struct Materializer<'d> {
    database: &'d Database,
    events: &'d dyn EventSink,
}

impl<'d> Materializer<'d> {
    pub fn new(database: &'d Database, events: &'d dyn EventSink) -> Self {
        Materializer { database, events }
    }

    pub fn materialize(&self, tree: &Tree, root: &Path) -> Result<()> {
        std::fs::create_dir_all(root).io_context("create directory", root)?;

        let mut pending: Vec<(Tree, PathBuf, usize)> = vec![(tree.clone(), root.to_path_buf(), 0)];

        while let Some((tree, dir, depth)) = pending.pop() {
            for entry in tree.entries() {
                let destination = dir.join(safe_relative_path(&entry.name)?);

                match self.database.get(&entry.oid)? {
                    GitObject::Blob(blob) => {
                        if let Some(parent) = destination.parent() {
                            std::fs::create_dir_all(parent).io_context("create directory", parent)?;
                        }
                        std::fs::write(&destination, blob.data())
                            .io_context("write file", &destination)?;

                        self.events.emit(&Event::FileMaterialized {
                            path: &destination,
                            oid: entry.oid,
                        });
                    }
                    GitObject::Tree(subtree) => {
                        if depth + 1 > MAX_DEPTH {
                            return Err(Error::corrupt(format!(
                                "tree {} nests deeper than {MAX_DEPTH} levels",
                                entry.oid
                            )));
                        }
                        std::fs::create_dir_all(&destination)
                            .io_context("create directory", &destination)?;

                        self.events.emit(&Event::DirectoryMaterialized {
                            path: &destination,
                            oid: entry.oid,
                        });
                        pending.push((subtree, destination, depth + 1));
                    }
                    GitObject::Commit(_) => {
                        return Err(Error::corrupt(format!(
                            "tree entry {:?} points at commit {}",
                            entry.name, entry.oid
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Turn an entry name into a relative path that cannot escape its root
fn safe_relative_path(name: &str) -> Result<PathBuf> {
    let unsafe_segment = name
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..");

    if unsafe_segment || Path::new(name).is_absolute() {
        return Err(Error::corrupt(format!("unsafe tree entry name {name:?}")));
    }

    Ok(name.split('/').collect())
}
