//! Tree nodes

use bytes::Bytes;
use std::collections::BTreeMap;
use vsh_core::EntryKind;

/// Name carried by the root node
pub const ROOT_NAME: &str = "/";

/// What a node holds
#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    /// Children keyed by name, kept sorted so listings need no extra pass
    Directory(BTreeMap<String, Node>),
    File(Bytes),
}

/// A directory or a file. Every node is owned by exactly one parent map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    kind: NodeKind,
}

impl Node {
    pub fn root() -> Self {
        Self::directory(ROOT_NAME)
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory(BTreeMap::new()),
        }
    }

    pub fn file(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File(content.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn entry_kind(&self) -> EntryKind {
        match self.kind {
            NodeKind::Directory(_) => EntryKind::Directory,
            NodeKind::File(_) => EntryKind::File,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File(_))
    }

    /// File content; `None` for directories
    pub fn content(&self) -> Option<&Bytes> {
        match &self.kind {
            NodeKind::File(content) => Some(content),
            NodeKind::Directory(_) => None,
        }
    }

    pub fn children(&self) -> Option<&BTreeMap<String, Node>> {
        match &self.kind {
            NodeKind::Directory(children) => Some(children),
            NodeKind::File(_) => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut BTreeMap<String, Node>> {
        match &mut self.kind {
            NodeKind::Directory(children) => Some(children),
            NodeKind::File(_) => None,
        }
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children().and_then(|children| children.get(name))
    }

    /// Child names in lexicographic order; `None` for files
    pub fn child_names(&self) -> Option<Vec<String>> {
        self.children().map(|children| children.keys().cloned().collect())
    }

    /// Count directories and files below this node, excluding the node itself.
    pub fn count(&self) -> (usize, usize) {
        let mut dirs = 0;
        let mut files = 0;
        if let Some(children) = self.children() {
            for child in children.values() {
                if child.is_directory() {
                    dirs += 1;
                    let (d, f) = child.count();
                    dirs += d;
                    files += f;
                } else {
                    files += 1;
                }
            }
        }
        (dirs, files)
    }
}
