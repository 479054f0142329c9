//! # Component Entity Model
//!
//! The plain record every part of the editor agrees on. A page is an ordered
//! list of root [`Component`]s, each owning its children.
//!
//! There is no type hierarchy: a component is polymorphic over its
//! `component_type` tag, and capabilities such as "may contain children" are
//! looked up in the component registry rather than encoded here.
//!
//! Maps are ordered so that two structurally identical trees always compare
//! equal and serialize to the same JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Scalar value stored in a component's props
///
/// Integers and floats are kept apart so `2` is saved back as `2`, not `2.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Number(f64),
    String(String),
}

impl PropValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Int(n) => Some(*n as f64),
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(b) => write!(f, "{}", b),
            PropValue::Int(n) => write!(f, "{}", n),
            PropValue::Number(n) => write!(f, "{}", n),
            PropValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::String(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::String(s)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Int(n.into())
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        PropValue::Int(n)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

/// Component-specific content/behavior data
pub type Props = BTreeMap<String, PropValue>;

/// Presentation data (box model, color, typography, layout)
pub type Style = BTreeMap<String, String>;

/// A single node in the page's UI tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Globally unique, assigned at creation
    #[serde(default)]
    pub id: String,

    /// Kind tag used for registry lookup and rendering
    #[serde(rename = "type")]
    pub component_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub props: Props,

    #[serde(default)]
    pub style: Style,

    /// Ordered children (render and traversal order)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Component>,

    /// Weak back-reference to the owning node, kept in sync by the tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Derived presentation classes, written by the style precompiler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Component {
    pub fn new(id: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            name: None,
            props: Props::new(),
            style: Style::new(),
            children: Vec::new(),
            parent_id: None,
            class_name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    /// Label shown in tree views: the name if set, otherwise the type
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.component_type)
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Component::subtree_len).sum::<usize>()
    }

    /// Ids of this node and all descendants, pre-order
    pub fn subtree_ids(&self) -> Vec<String> {
        let mut ids = Vec::with_capacity(self.subtree_len());
        collect_ids(self, &mut ids);
        ids
    }

    /// Find a node by id in this subtree
    pub fn find(&self, id: &str) -> Option<&Component> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }
}

fn collect_ids(component: &Component, ids: &mut Vec<String>) {
    ids.push(component.id.clone());
    for child in &component.children {
        collect_ids(child, ids);
    }
}

/// Count every node in a forest
pub fn count_nodes(components: &[Component]) -> usize {
    components.iter().map(Component::subtree_len).sum()
}

/// Find a node by id anywhere in a forest
pub fn find_component<'a>(components: &'a [Component], id: &str) -> Option<&'a Component> {
    components.iter().find_map(|c| c.find(id))
}

/// Partial update for a component's editable fields
///
/// `props` and `style` are merged key by key. A style entry whose value is
/// the empty string removes that key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl ComponentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props
            .get_or_insert_with(Props::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style
            .get_or_insert_with(Style::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.props.is_none() && self.style.is_none()
    }

    /// Merge this patch into the editable fields of a record
    pub fn apply_to(&self, name: &mut Option<String>, props: &mut Props, style: &mut Style) {
        if let Some(new_name) = &self.name {
            *name = Some(new_name.clone());
        }

        if let Some(patch_props) = &self.props {
            for (key, value) in patch_props {
                props.insert(key.clone(), value.clone());
            }
        }

        if let Some(patch_style) = &self.style {
            for (key, value) in patch_style {
                if value.is_empty() {
                    style.remove(key);
                } else {
                    style.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

/// Where a moved node lands relative to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovePosition {
    /// New sibling immediately before the target
    Before,
    /// New sibling immediately after the target
    After,
    /// Last child of the target
    Inside,
}

impl fmt::Display for MovePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovePosition::Before => write!(f, "before"),
            MovePosition::After => write!(f, "after"),
            MovePosition::Inside => write!(f, "inside"),
        }
    }
}
