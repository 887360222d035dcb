//! Status tree reporter.
//!
//! Every boolean computed while evaluating a policy is recorded as a
//! [`StatusNode`]. Leaves and combinators use [`add_status_node`] and
//! [`add_branch`] to evaluate, record and return in one expression, so a
//! verdict cannot be produced without its audit trail.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "🟢";
pub const STATUS_FAIL: &str = "🔴";
pub const STATUS_SKIPPED: &str = "⚪";

/// A labeled boolean outcome with ordered children.
///
/// A node's own value does not depend on its children; children only carry
/// the detail of how the value was reached.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusNode {
    pub ok: bool,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StatusNode>,
}

impl StatusNode {
    pub fn new(ok: bool, label: impl Into<String>) -> Self {
        Self {
            ok,
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Create a node whose value is the result of evaluating `f` into it.
    pub fn evaluate(label: impl Into<String>, f: impl FnOnce(&mut StatusNode) -> bool) -> Self {
        let mut node = Self::new(false, label);
        node.ok = f(&mut node);
        node
    }

    /// Label prefixed with the status glyph.
    pub fn text(&self) -> String {
        let glyph = if self.ok { STATUS_SUCCESS } else { STATUS_FAIL };
        format!("{} {}", glyph, self.label)
    }

    pub fn children(&self) -> &[StatusNode] {
        &self.children
    }

    pub fn last_child(&self) -> Option<&StatusNode> {
        self.children.last()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(StatusNode::size).sum::<usize>()
    }

    /// Depth of this subtree; a node without children has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(StatusNode::depth).max().unwrap_or(0)
    }

    fn fmt_children(&self, f: &mut fmt::Formatter<'_>, prefix: &str) -> fmt::Result {
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            let (branch, indent) = if i + 1 == count {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            writeln!(f, "{}{}{}", prefix, branch, child.text())?;
            child.fmt_children(f, &format!("{}{}", prefix, indent))?;
        }
        Ok(())
    }
}

impl fmt::Display for StatusNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.text())?;
        self.fmt_children(f, "")
    }
}

/// Append a leaf outcome to `parent` and return `ok` unchanged.
pub fn add_status_node(ok: bool, label: impl Into<String>, parent: &mut StatusNode) -> bool {
    parent.children.push(StatusNode::new(ok, label));
    ok
}

/// Append a node valued by evaluating `f` into it, and return that value.
pub fn add_branch(
    label: impl Into<String>,
    parent: &mut StatusNode,
    f: impl FnOnce(&mut StatusNode) -> bool,
) -> bool {
    let node = StatusNode::evaluate(label, f);
    let ok = node.ok;
    parent.children.push(node);
    ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_status_node_passes_value_through() {
        let mut root = StatusNode::new(true, "root");

        assert!(add_status_node(true, "first", &mut root));
        assert!(!add_status_node(false, "second", &mut root));

        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].text(), "🟢 first");
        assert_eq!(root.last_child().unwrap().text(), "🔴 second");
    }

    #[test]
    fn test_branch_value_independent_of_children() {
        let mut root = StatusNode::new(true, "root");

        let ok = add_branch("branch", &mut root, |branch| {
            add_status_node(false, "inner", branch);
            true
        });

        assert!(ok);
        let branch = &root.children()[0];
        assert!(branch.ok);
        assert!(!branch.children()[0].ok);
        assert_eq!(root.size(), 3);
        assert_eq!(root.depth(), 3);
    }

    #[test]
    fn test_render_tree() {
        let mut root = StatusNode::new(true, "Condition");
        add_branch("All of:", &mut root, |all| {
            add_status_node(true, "a", all);
            add_branch("Any of:", all, |any| {
                add_status_node(false, "b", any);
                add_status_node(true, "c", any)
            });
            true
        });
        add_status_node(false, "d", &mut root);

        let expected = "\
🟢 Condition
├── 🟢 All of:
│   ├── 🟢 a
│   └── 🟢 Any of:
│       ├── 🔴 b
│       └── 🟢 c
└── 🔴 d
";
        assert_eq!(root.to_string(), expected);
    }
}
