//! Virtual Shell Core
//!
//! Paths, archive entries, the archive source trait and the shared error type.

pub mod entry;
pub mod error;
pub mod path;
pub mod source;

pub use entry::{ArchiveEntry, EntryKind};
pub use error::{VshError, VshResult};
pub use path::VirtualPath;
pub use source::{ArchiveSource, MemorySource};
