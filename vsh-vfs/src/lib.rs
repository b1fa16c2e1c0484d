//! In-memory virtual filesystem for the virtual shell
//!
//! The tree is built once from an archive and then driven by path-based
//! operations: resolve, list, change directory, move and tree rendering.
//!
//! ```text
//! archive ──► TarSource ──► loader::build ──► Vfs { root, current }
//! ```

pub mod loader;
pub mod node;
pub mod render;
pub mod tar_source;
pub mod vfs;

pub use loader::{build, load, LoadStats, TreeBuilder};
pub use node::Node;
pub use render::TreeView;
pub use tar_source::TarSource;
pub use vfs::{Resolved, Vfs, SYSTEM_NAME};
