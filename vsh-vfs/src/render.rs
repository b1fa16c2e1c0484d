//! Hierarchical tree rendering

use std::collections::BTreeMap;
use std::fmt;

use crate::node::Node;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Read-only view of a subtree, rendered via [`fmt::Display`].
///
/// The first line is the label (the subtree's absolute path); each
/// descendant follows on its own line, depth first, siblings in name order.
#[derive(Debug, Clone)]
pub struct TreeView<'a> {
    label: String,
    node: &'a Node,
}

impl<'a> TreeView<'a> {
    pub fn new(label: impl Into<String>, node: &'a Node) -> Self {
        Self {
            label: label.into(),
            node,
        }
    }
}

fn write_children(
    f: &mut fmt::Formatter<'_>,
    children: &BTreeMap<String, Node>,
    prefix: &mut String,
) -> fmt::Result {
    let last = children.len().saturating_sub(1);
    for (idx, (name, child)) in children.iter().enumerate() {
        let is_last = idx == last;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        write!(f, "\n{prefix}{connector}{name}")?;

        if let Some(grandchildren) = child.children() {
            let len = prefix.len();
            prefix.push_str(if is_last { BLANK } else { PIPE });
            write_children(f, grandchildren, prefix)?;
            prefix.truncate(len);
        }
    }
    Ok(())
}

impl fmt::Display for TreeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)?;
        if let Some(children) = self.node.children() {
            write_children(f, children, &mut String::new())?;
        }
        Ok(())
    }
}
