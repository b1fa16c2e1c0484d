//! Virtual path abstraction
//!
//! [`VirtualPath`] is always absolute and normalized. User input is kept as a
//! plain `&str` and broken into [`Component`]s only when it is resolved
//! against a tree, because `..` can only be interpreted there.

use std::fmt;

/// Normalized absolute path inside the virtual filesystem
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VirtualPath {
    /// Path segments below the root
    pub segments: Vec<String>,
}

impl VirtualPath {
    /// Lexically normalize `path` as if it were absolute.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self::root().join(path)
    }

    pub fn root() -> Self {
        Self { segments: Vec::new() }
    }

    pub fn join(&self, name: impl AsRef<str>) -> Self {
        let mut segments = self.segments.clone();
        for component in components(name.as_ref()) {
            match component {
                Component::ParentDir => {
                    segments.pop();
                }
                Component::CurDir => {}
                Component::Normal(part) => segments.push(part.to_string()),
            }
        }
        Self { segments }
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.segments.push(name.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }

    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            let mut segments = self.segments.clone();
            segments.pop();
            Some(Self { segments })
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when `self` is `other` or lies somewhere below it.
    pub fn starts_with(&self, other: &VirtualPath) -> bool {
        self.segments.len() >= other.segments.len()
            && self.segments.iter().zip(&other.segments).all(|(a, b)| a == b)
    }

    pub fn to_path_string(&self) -> String {
        if self.segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", self.segments.join("/"))
        }
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path_string())
    }
}

/// One piece of a user-supplied path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component<'a> {
    /// `.`
    CurDir,
    /// `..`
    ParentDir,
    Normal(&'a str),
}

impl<'a> Component<'a> {
    fn parse(segment: &'a str) -> Self {
        match segment {
            "." => Component::CurDir,
            ".." => Component::ParentDir,
            name => Component::Normal(name),
        }
    }
}

/// Break a path into components, dropping empty segments (`//`, trailing `/`).
pub fn components(path: &str) -> impl Iterator<Item = Component<'_>> {
    path.split('/').filter(|s| !s.is_empty()).map(Component::parse)
}

pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}

/// Split a path into its directory part and final name, ignoring trailing
/// slashes. A bare name yields an empty directory part, which resolves to the
/// current directory.
pub fn split_last(path: &str) -> (&str, &str) {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return (if path.is_empty() { "" } else { "/" }, "");
    }
    match trimmed.rsplit_once('/') {
        Some(("", name)) => ("/", name),
        Some((dir, name)) => (dir, name),
        None => ("", trimmed),
    }
}
