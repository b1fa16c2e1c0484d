//! Archive entries

use bytes::Bytes;

/// Entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One member of an archive, as handed to the tree builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Member name exactly as stored in the archive
    pub path: String,
    pub kind: EntryKind,
    /// `None` for directories and for members the container holds no data for
    pub content: Option<Bytes>,
}

impl ArchiveEntry {
    pub fn file(path: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            content: Some(content.into()),
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            content: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}
