//! Structured notifications emitted by the store, the index and checkout
//!
//! Sinks only observe: nothing in the core branches on whether an event was
//! consumed.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'e> {
    /// A new object file was installed in the store
    ObjectWritten { oid: ObjectId, kind: ObjectType },
    /// `put` found the object already present and wrote nothing
    ObjectReused { oid: ObjectId, kind: ObjectType },
    /// The staging index snapshot was replaced
    IndexSaved { entries: usize },
    /// A single path was staged
    IndexUpdated { path: &'e str, oid: ObjectId },
    FileMaterialized { path: &'e Path, oid: ObjectId },
    DirectoryMaterialized { path: &'e Path, oid: ObjectId },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: &Event<'_>);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &Event<'_>) {}
}

/// Forwards events to `tracing` at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &Event<'_>) {
        match event {
            Event::ObjectWritten { oid, kind } => {
                tracing::debug!(%oid, %kind, "object written")
            }
            Event::ObjectReused { oid, kind } => {
                tracing::debug!(%oid, %kind, "object already stored")
            }
            Event::IndexSaved { entries } => tracing::debug!(entries, "index saved"),
            Event::IndexUpdated { path, oid } => tracing::debug!(path, %oid, "index updated"),
            Event::FileMaterialized { path, oid } => {
                tracing::debug!(path = %path.display(), %oid, "file materialized")
            }
            Event::DirectoryMaterialized { path, oid } => {
                tracing::debug!(path = %path.display(), %oid, "directory materialized")
            }
        }
    }
}
