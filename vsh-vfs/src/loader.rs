//! Builds the node tree from archive entries
//!
//! Intermediate directories are created on demand with get-or-create
//! semantics. The final segment of each entry replaces whatever was at that
//! path before, except that a directory entry never wipes an existing
//! directory's children.

use bytes::Bytes;
use vsh_core::{ArchiveEntry, ArchiveSource, EntryKind, VshResult};

use crate::node::Node;

/// Counters collected while building a tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub directories: usize,
    pub files: usize,
    pub skipped: usize,
}

/// Why an entry did not make it into the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    /// The archive's own `.` member
    CurrentDirMarker,
    /// Nothing left after normalization
    Empty,
    /// Contains a `..` segment
    Traversal,
}

fn entry_segments(path: &str) -> Result<Vec<&str>, Skip> {
    if matches!(path, "" | "." | "./") {
        return Err(Skip::CurrentDirMarker);
    }
    let mut segments = Vec::new();
    for segment in path.trim_matches('/').split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(Skip::Traversal),
            name => segments.push(name),
        }
    }
    if segments.is_empty() {
        return Err(Skip::Empty);
    }
    Ok(segments)
}

/// Text content is kept; anything that is not valid UTF-8 is stored empty.
fn decode_content(path: &str, content: Option<Bytes>) -> Bytes {
    match content {
        Some(bytes) if std::str::from_utf8(&bytes).is_ok() => bytes,
        Some(bytes) => {
            tracing::debug!(path, len = bytes.len(), "non-text content stored as empty");
            Bytes::new()
        }
        None => Bytes::new(),
    }
}

/// Incremental tree builder
#[derive(Debug)]
pub struct TreeBuilder {
    root: Node,
    stats: LoadStats,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            root: Node::root(),
            stats: LoadStats::default(),
        }
    }

    /// Apply one entry. Returns `false` when the entry was skipped.
    pub fn insert(&mut self, entry: ArchiveEntry) -> bool {
        let segments = match entry_segments(&entry.path) {
            Ok(segments) => segments,
            Err(Skip::CurrentDirMarker) => {
                self.stats.skipped += 1;
                return false;
            }
            Err(reason) => {
                tracing::warn!(path = %entry.path, ?reason, "skipping malformed archive entry");
                self.stats.skipped += 1;
                return false;
            }
        };
        let Some((name, parents)) = segments.split_last() else {
            self.stats.skipped += 1;
            return false;
        };

        let mut current = &mut self.root;
        for part in parents {
            let Some(children) = current.children_mut() else {
                self.stats.skipped += 1;
                return false;
            };
            let slot = children
                .entry((*part).to_string())
                .or_insert_with(|| Node::directory(*part));
            if !slot.is_directory() {
                tracing::warn!(path = %entry.path, file = *part, "file replaced by directory");
                *slot = Node::directory(*part);
            }
            current = slot;
        }

        let Some(children) = current.children_mut() else {
            self.stats.skipped += 1;
            return false;
        };
        match entry.kind {
            EntryKind::Directory => {
                self.stats.directories += 1;
                if let Some(previous) = children.insert((*name).to_string(), Node::directory(*name)) {
                    tracing::debug!(path = %entry.path, replaced = ?previous.entry_kind(), "entry overwritten");
                }
            }
            EntryKind::File => {
                self.stats.files += 1;
                let content = decode_content(&entry.path, entry.content);
                if let Some(previous) = children.insert((*name).to_string(), Node::file(*name, content)) {
                    tracing::debug!(path = %entry.path, replaced = ?previous.entry_kind(), "entry overwritten");
                }
            }
        }
        tracing::trace!(path = %entry.path, kind = ?entry.kind, "loaded entry");
        true
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    pub fn finish(self) -> Node {
        self.root
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a root node from an ordered sequence of entries.
pub fn build<I>(entries: I) -> Node
where
    I: IntoIterator<Item = ArchiveEntry>,
{
    let mut builder = TreeBuilder::new();
    for entry in entries {
        builder.insert(entry);
    }
    let stats = builder.stats();
    let root = builder.finish();
    let (dirs, files) = root.count();
    tracing::info!(
        directories = dirs,
        files,
        skipped = stats.skipped,
        "virtual filesystem built"
    );
    root
}

/// Read every entry from `source` and build the tree.
pub fn load<S>(source: &mut S) -> VshResult<Node>
where
    S: ArchiveSource + ?Sized,
{
    let entries = source.entries()?;
    tracing::debug!(source = source.id(), entries = entries.len(), "archive read");
    Ok(build(entries))
}
