use crate::errors::{Error, Result};

/// Mode tag of a tree entry
///
/// Only the file/directory distinction is modeled; executable bits and
/// symlinks are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntryMode {
    #[default]
    File,
    Directory,
}

impl EntryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::File => "100644",
            EntryMode::Directory => "040000",
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }

    pub fn parse(mode: &str) -> Result<Self> {
        match mode {
            "100644" => Ok(EntryMode::File),
            "040000" => Ok(EntryMode::Directory),
            _ => Err(Error::corrupt(format!("unsupported entry mode {mode:?}"))),
        }
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
