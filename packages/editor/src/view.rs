//! Render-facing views derived from the tree. Rebuilt on demand, never
//! authoritative.

use pagecraft_common::Component;
use serde::Serialize;

/// A component annotated for nested tree rendering
///
/// `component` carries the node's own record with `children` left empty;
/// the nested views live in `children`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    #[serde(flatten)]
    pub component: Component,
    pub depth: usize,
    pub is_expanded: bool,
    /// True when every ancestor is expanded
    pub is_visible: bool,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn id(&self) -> &str {
        &self.component.id
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this view, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }
}

/// One row of a flattened, indentation-ready tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleNode {
    #[serde(flatten)]
    pub component: Component,
    pub depth: usize,
    pub is_expanded: bool,
    pub child_count: usize,
}

impl VisibleNode {
    pub fn id(&self) -> &str {
        &self.component.id
    }

    pub fn has_children(&self) -> bool {
        self.child_count > 0
    }
}
