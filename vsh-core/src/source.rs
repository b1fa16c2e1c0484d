//! Archive source trait

use crate::{entry::ArchiveEntry, error::VshResult};

/// Anything that can hand over a sequence of `(path, kind, content)` triples.
///
/// Implementations report `InvalidArchive` only when the container itself
/// cannot be read; odd individual members are passed through and left to the
/// tree builder to tolerate.
pub trait ArchiveSource {
    /// Short identifier used in log output
    fn id(&self) -> &str;

    fn entries(&mut self) -> VshResult<Vec<ArchiveEntry>>;
}

/// Entries held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: Vec<ArchiveEntry>,
}

impl MemorySource {
    pub fn new(entries: Vec<ArchiveEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: ArchiveEntry) {
        self.entries.push(entry);
    }
}

impl FromIterator<ArchiveEntry> for MemorySource {
    fn from_iter<I: IntoIterator<Item = ArchiveEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl ArchiveSource for MemorySource {
    fn id(&self) -> &str {
        "memory"
    }

    fn entries(&mut self) -> VshResult<Vec<ArchiveEntry>> {
        Ok(self.entries.clone())
    }
}
