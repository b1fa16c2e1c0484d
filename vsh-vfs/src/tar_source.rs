//! Tar archive source

use bytes::Bytes;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use vsh_core::{ArchiveEntry, ArchiveSource, EntryKind, VshError, VshResult};

/// Reads entries from a tar container
pub struct TarSource<R> {
    id: String,
    reader: Option<R>,
}

impl TarSource<BufReader<File>> {
    /// Open a tar file on disk. A missing or empty file is an invalid archive.
    pub fn open(path: impl AsRef<Path>) -> VshResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            VshError::InvalidArchive(format!("{}: {}", path.display(), e))
        })?;
        let len = file
            .metadata()
            .map_err(|e| VshError::InvalidArchive(format!("{}: {}", path.display(), e)))?
            .len();
        if len == 0 {
            return Err(VshError::InvalidArchive(format!(
                "{}: empty file",
                path.display()
            )));
        }
        Ok(Self {
            id: path.display().to_string(),
            reader: Some(BufReader::new(file)),
        })
    }
}

impl<R: Read> TarSource<R> {
    pub fn from_reader(id: impl Into<String>, reader: R) -> Self {
        Self {
            id: id.into(),
            reader: Some(reader),
        }
    }
}

fn invalid(id: &str, err: std::io::Error) -> VshError {
    VshError::InvalidArchive(format!("{id}: {err}"))
}

impl<R: Read> ArchiveSource for TarSource<R> {
    fn id(&self) -> &str {
        &self.id
    }

    /// Consumes the underlying reader; a second call yields an error.
    fn entries(&mut self) -> VshResult<Vec<ArchiveEntry>> {
        let reader = self
            .reader
            .take()
            .ok_or_else(|| VshError::InvalidArchive(format!("{}: already read", self.id)))?;
        let mut archive = tar::Archive::new(reader);
        let mut entries = Vec::new();

        for member in archive.entries().map_err(|e| invalid(&self.id, e))? {
            let mut member = member.map_err(|e| invalid(&self.id, e))?;
            let path = member
                .path()
                .map_err(|e| invalid(&self.id, e))?
                .to_string_lossy()
                .into_owned();
            let entry_type = member.header().entry_type();

            if entry_type.is_dir() {
                entries.push(ArchiveEntry::directory(path));
                continue;
            }

            let content = if entry_type.is_file() {
                let mut buf = Vec::new();
                match member.read_to_end(&mut buf) {
                    Ok(_) => Some(Bytes::from(buf)),
                    Err(e) => {
                        tracing::warn!(path = %path, error = %e, "unreadable member content");
                        None
                    }
                }
            } else {
                tracing::debug!(path = %path, ?entry_type, "special member loaded as empty file");
                None
            };
            entries.push(ArchiveEntry {
                path,
                kind: EntryKind::File,
                content,
            });
        }

        Ok(entries)
    }
}
