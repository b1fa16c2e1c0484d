//! The virtual filesystem and its current-directory state
//!
//! Nodes hold no parent references. `..` is resolved by popping the path
//! walked so far and re-walking it from the root, so the tree stays a plain
//! owned hierarchy.

use std::path::Path;
use vsh_core::path::{components, is_absolute, split_last, Component};
use vsh_core::{ArchiveEntry, ArchiveSource, VirtualPath, VshError, VshResult};

use crate::loader;
use crate::node::{Node, ROOT_NAME};
use crate::render::TreeView;
use crate::tar_source::TarSource;

/// Identity reported by `uname`, independent of the host
pub const SYSTEM_NAME: &str = "VirtualShell Emulator 1.0";

/// A node found by path resolution, together with its normalized location
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    pub path: VirtualPath,
    pub node: &'a Node,
}

/// In-memory filesystem built once from an archive
#[derive(Debug, Clone)]
pub struct Vfs {
    root: Node,
    current: VirtualPath,
}

impl Vfs {
    /// Wrap an already built tree. The current directory starts at `/`.
    pub fn with_root(mut root: Node) -> Self {
        debug_assert!(root.is_directory(), "root must be a directory");
        root.set_name(ROOT_NAME);
        Self {
            root,
            current: VirtualPath::root(),
        }
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ArchiveEntry>,
    {
        Self::with_root(loader::build(entries))
    }

    pub fn from_source<S>(source: &mut S) -> VshResult<Self>
    where
        S: ArchiveSource + ?Sized,
    {
        Ok(Self::with_root(loader::load(source)?))
    }

    /// Load a tar archive from disk.
    pub fn open(archive: impl AsRef<Path>) -> VshResult<Self> {
        let mut source = TarSource::open(archive)?;
        Self::from_source(&mut source)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn current_path(&self) -> &VirtualPath {
        &self.current
    }

    pub fn system_name(&self) -> &'static str {
        SYSTEM_NAME
    }

    fn node_at(&self, path: &VirtualPath) -> Option<&Node> {
        path.segments
            .iter()
            .try_fold(&self.root, |node, segment| node.child(segment))
    }

    fn node_at_mut(&mut self, path: &VirtualPath) -> Option<&mut Node> {
        let mut node = &mut self.root;
        for segment in &path.segments {
            node = node.children_mut()?.get_mut(segment)?;
        }
        Some(node)
    }

    /// Resolve an absolute or relative path.
    ///
    /// Fails with `NotFound` at the first missing segment and with
    /// `NotADirectory` when a file is followed by further segments.
    pub fn resolve(&self, path: &str) -> VshResult<Resolved<'_>> {
        let (mut trail, mut node) = if is_absolute(path) {
            (VirtualPath::root(), &self.root)
        } else {
            let node = self
                .node_at(&self.current)
                .ok_or_else(|| VshError::NotFound(self.current.to_path_string()))?;
            (self.current.clone(), node)
        };

        for component in components(path) {
            if !node.is_directory() {
                return Err(VshError::NotADirectory(trail.to_path_string()));
            }
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if trail.pop().is_some() {
                        node = self
                            .node_at(&trail)
                            .ok_or_else(|| VshError::NotFound(trail.to_path_string()))?;
                    }
                }
                Component::Normal(name) => {
                    node = node
                        .child(name)
                        .ok_or_else(|| VshError::NotFound(trail.join(name).to_path_string()))?;
                    trail.push(name);
                }
            }
        }

        Ok(Resolved { path: trail, node })
    }

    /// Sorted child names of a directory.
    pub fn list(&self, path: &str) -> VshResult<Vec<String>> {
        let resolved = self.resolve(path)?;
        resolved
            .node
            .child_names()
            .ok_or_else(|| VshError::NotADirectory(resolved.path.to_path_string()))
    }

    /// Make `path` the current directory. Leaves it unchanged on failure.
    pub fn change_directory(&mut self, path: &str) -> VshResult<()> {
        let Resolved { path: target, node } = self.resolve(path)?;
        if !node.is_directory() {
            return Err(VshError::NotADirectory(target.to_path_string()));
        }
        tracing::debug!(from = %self.current, to = %target, "change directory");
        self.current = target;
        Ok(())
    }

    /// Work out the directory and name `src` ends up under.
    ///
    /// Returns `(directory, name, replaces_file)`.
    fn move_target(&self, dest: &str, source_name: &str) -> VshResult<(VirtualPath, String, bool)> {
        match self.resolve(dest) {
            Ok(Resolved { path, node }) if node.is_directory() => {
                Ok((path, source_name.to_string(), false))
            }
            Ok(Resolved { path, .. }) => {
                let (Some(parent), Some(name)) = (path.parent(), path.name()) else {
                    return Err(VshError::InvalidPath(dest.to_string()));
                };
                Ok((parent, name.to_string(), true))
            }
            Err(VshError::NotFound(_)) => {
                let (dir, name) = split_last(dest);
                let parent = self.resolve(dir)?;
                if !parent.node.is_directory() {
                    return Err(VshError::NotADirectory(parent.path.to_path_string()));
                }
                if matches!(name, "" | "." | "..") {
                    return Err(VshError::InvalidPath(dest.to_string()));
                }
                Ok((parent.path, name.to_string(), false))
            }
            Err(e) => Err(e),
        }
    }

    /// Move or rename `src` to `dest`.
    ///
    /// An existing directory at `dest` receives the source under its own
    /// name; an existing file at `dest` is replaced; otherwise `dest`'s
    /// parent must be a directory and the source takes `dest`'s final name.
    /// Nothing changes unless the whole move succeeds.
    pub fn move_node(&mut self, src: &str, dest: &str) -> VshResult<()> {
        let source = self.resolve(src)?.path;
        let (Some(source_parent), Some(source_name)) =
            (source.parent(), source.name().map(str::to_string))
        else {
            return Err(VshError::InvalidPath(format!("cannot move '{}'", source)));
        };

        let (target_dir, target_name, replaces_file) = self.move_target(dest, &source_name)?;

        if replaces_file && target_dir == source_parent && target_name == source_name {
            tracing::debug!(path = %source, "move onto itself");
            return Ok(());
        }
        if target_dir.starts_with(&source) {
            return Err(VshError::InvalidPath(format!(
                "cannot move '{}' into itself",
                source
            )));
        }
        if !replaces_file {
            let taken = self
                .node_at(&target_dir)
                .and_then(|dir| dir.child(&target_name))
                .is_some();
            if taken {
                return Err(VshError::AlreadyExists(
                    target_dir.join(&target_name).to_path_string(),
                ));
            }
        }

        let mut node = self
            .node_at_mut(&source_parent)
            .and_then(Node::children_mut)
            .and_then(|children| children.remove(&source_name))
            .ok_or_else(|| VshError::NotFound(source.to_path_string()))?;
        node.set_name(target_name.clone());

        match self.node_at_mut(&target_dir).and_then(Node::children_mut) {
            Some(children) => {
                children.insert(target_name.clone(), node);
            }
            None => {
                node.set_name(source_name.clone());
                if let Some(children) = self.node_at_mut(&source_parent).and_then(Node::children_mut) {
                    children.insert(source_name, node);
                }
                return Err(VshError::NotFound(target_dir.to_path_string()));
            }
        }

        tracing::debug!(
            from = %source,
            to = %target_dir.join(&target_name),
            replaced = replaces_file,
            "moved"
        );
        Ok(())
    }

    /// Render the subtree at `path`, or at the current directory.
    pub fn tree(&self, path: Option<&str>) -> VshResult<TreeView<'_>> {
        let Resolved { path, node } = self.resolve(path.unwrap_or(""))?;
        Ok(TreeView::new(path.to_path_string(), node))
    }
}
