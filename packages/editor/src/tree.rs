//! # Tree Manager
//!
//! Single source of truth for the structure of one page's component tree.
//!
//! ## Representation
//!
//! ```text
//! nodes:    id → record (children stripped)
//! parents:  id → parent id        (absent for roots)
//! children: id → ordered child ids
//! roots:    ordered root ids
//! expanded: id → bool             (UI state, never structural)
//! ```
//!
//! Lookups go through the maps, never a tree walk. Nested [`Component`]
//! values only exist at the edges: they are indexed on the way in and
//! materialized on the way out (`to_flat_array`, `get`, views).
//!
//! ## Operation semantics
//!
//! Every operation runs a `check_*` pass first and only then commits. A
//! failed check returns a [`TreeError`] and leaves the manager exactly as it
//! was, so callers never need to roll anything back.
//!
//! - **Insert**: new subtree under a container parent (or at root)
//! - **Update**: merge name/props/style, identity and structure untouched
//! - **Delete**: removes the node and its whole subtree
//! - **Move**: relocates a subtree; refused if the target lies inside it

use crate::errors::TreeError;
use crate::view::{TreeNode, VisibleNode};
use pagecraft_common::{Component, ComponentPatch, MovePosition};
use pagecraft_registry::ComponentRegistry;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Result of deleting a node
#[derive(Debug, Clone, PartialEq)]
pub struct Deletion {
    /// Tree after the deletion
    pub components: Vec<Component>,

    /// The deleted node and all its descendants (pre-order)
    pub removed_ids: Vec<String>,
}

/// Index-based component tree
#[derive(Debug, Clone, Default)]
pub struct TreeManager {
    nodes: HashMap<String, Component>,
    parents: HashMap<String, String>,
    children: HashMap<String, Vec<String>>,
    roots: Vec<String>,
    expanded: HashMap<String, bool>,
}

impl TreeManager {
    /// Create an empty tree
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a tree from nested or flat components
    ///
    /// Nested children are attached to their containing node. A top-level
    /// component whose `parent_id` names another loaded node is attached to
    /// it (in input order); an unresolved `parent_id` leaves it at the root.
    /// Carried expansion entries for ids not in the tree are dropped.
    pub fn new(
        components: Vec<Component>,
        expanded: Option<HashMap<String, bool>>,
    ) -> Result<Self, TreeError> {
        let mut tree = Self::empty();

        let mut top_level = Vec::with_capacity(components.len());
        for component in components {
            let parent_hint = component.parent_id.clone();
            let id = tree.index_subtree(component, None)?;
            top_level.push((id, parent_hint));
        }

        for (id, parent_hint) in top_level {
            match parent_hint {
                Some(parent) if tree.nodes.contains_key(&parent) => {
                    if parent == id || tree.is_ancestor(&id, &parent) {
                        return Err(TreeError::Cycle {
                            drag_id: id,
                            target_id: parent,
                        });
                    }
                    tree.children.entry(parent.clone()).or_default().push(id.clone());
                    tree.parents.insert(id, parent);
                }
                _ => tree.roots.push(id),
            }
        }

        if let Some(expanded) = expanded {
            tree.expanded = expanded
                .into_iter()
                .filter(|(id, _)| tree.nodes.contains_key(id))
                .collect();
        }

        trace!("Built tree with {} nodes, {} roots", tree.len(), tree.roots.len());
        Ok(tree)
    }

    /// Index a nested component and its descendants. The top node is not
    /// added to any sibling list; `parent` only sets its back-reference.
    fn index_subtree(
        &mut self,
        mut component: Component,
        parent: Option<&str>,
    ) -> Result<String, TreeError> {
        if self.nodes.contains_key(&component.id) {
            return Err(TreeError::DuplicateId(component.id));
        }

        let id = component.id.clone();
        let children = std::mem::take(&mut component.children);
        component.parent_id = None;
        self.nodes.insert(id.clone(), component);

        match parent {
            Some(parent) => {
                self.parents.insert(id.clone(), parent.to_string());
            }
            None => {
                self.parents.remove(&id);
            }
        }

        let mut child_ids = Vec::with_capacity(children.len());
        for child in children {
            child_ids.push(self.index_subtree(child, Some(&id))?);
        }
        if !child_ids.is_empty() {
            self.children.insert(id.clone(), child_ids);
        }

        Ok(id)
    }

    // ---------------------------------------------------------------------
    // Validation
    // ---------------------------------------------------------------------

    fn can_have_children(
        registry: &dyn ComponentRegistry,
        component_type: &str,
    ) -> Result<bool, TreeError> {
        registry
            .get_config(component_type)
            .map(|config| config.can_have_children)
            .ok_or_else(|| TreeError::UnknownComponentType(component_type.to_string()))
    }

    fn check_subtree<'a>(
        &self,
        registry: &dyn ComponentRegistry,
        component: &'a Component,
        seen: &mut HashSet<&'a str>,
    ) -> Result<(), TreeError> {
        let is_container = Self::can_have_children(registry, &component.component_type)?;

        if self.nodes.contains_key(&component.id) || !seen.insert(component.id.as_str()) {
            return Err(TreeError::DuplicateId(component.id.clone()));
        }

        if !component.children.is_empty() && !is_container {
            return Err(TreeError::NotContainer(component.id.clone()));
        }

        for child in &component.children {
            self.check_subtree(registry, child, seen)?;
        }
        Ok(())
    }

    /// Validate an insert without applying it
    pub fn check_insert(
        &self,
        registry: &dyn ComponentRegistry,
        component: &Component,
        parent_id: Option<&str>,
    ) -> Result<(), TreeError> {
        self.check_subtree(registry, component, &mut HashSet::new())?;

        if let Some(parent_id) = parent_id {
            let parent = self
                .nodes
                .get(parent_id)
                .ok_or_else(|| TreeError::NotFound(parent_id.to_string()))?;

            if !Self::can_have_children(registry, &parent.component_type)? {
                return Err(TreeError::NotContainer(parent_id.to_string()));
            }
        }

        Ok(())
    }

    /// Validate an update without applying it
    pub fn check_update(&self, id: &str) -> Result<(), TreeError> {
        self.require(id).map(|_| ())
    }

    /// Validate a delete without applying it
    pub fn check_delete(&self, id: &str) -> Result<(), TreeError> {
        self.require(id).map(|_| ())
    }

    /// Validate a move without applying it
    pub fn check_move(
        &self,
        registry: &dyn ComponentRegistry,
        drag_id: &str,
        target_id: &str,
        position: MovePosition,
    ) -> Result<(), TreeError> {
        self.require(drag_id)?;
        let target = self.require(target_id)?;

        // Moving a node into its own subtree is the one thing a move must never do
        if drag_id == target_id || self.is_ancestor(drag_id, target_id) {
            return Err(TreeError::Cycle {
                drag_id: drag_id.to_string(),
                target_id: target_id.to_string(),
            });
        }

        let new_parent = match position {
            MovePosition::Inside => Some(target),
            MovePosition::Before | MovePosition::After => self
                .parents
                .get(target_id)
                .and_then(|parent_id| self.nodes.get(parent_id)),
        };

        if let Some(parent) = new_parent {
            if !Self::can_have_children(registry, &parent.component_type)? {
                return Err(TreeError::NotContainer(parent.id.clone()));
            }
        }

        Ok(())
    }

    /// Check every node's type is registered and only containers have children
    pub fn validate(&self, registry: &dyn ComponentRegistry) -> Result<(), TreeError> {
        for id in self.ids() {
            let node = &self.nodes[&id];
            let is_container = Self::can_have_children(registry, &node.component_type)?;
            if !is_container && !self.children_of(&id).is_empty() {
                return Err(TreeError::NotContainer(id));
            }
        }
        Ok(())
    }

    fn require(&self, id: &str) -> Result<&Component, TreeError> {
        self.nodes
            .get(id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()))
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Insert a new subtree under `parent_id` (or at root) at `index`
    ///
    /// The index defaults to append and is clamped to the sibling count.
    pub fn insert(
        &mut self,
        registry: &dyn ComponentRegistry,
        component: Component,
        parent_id: Option<&str>,
        index: Option<usize>,
    ) -> Result<Vec<Component>, TreeError> {
        self.check_insert(registry, &component, parent_id)?;

        let id = self.index_subtree(component, parent_id)?;
        let siblings = self.siblings_mut(parent_id);
        let at = index.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(at, id.clone());

        debug!("Inserted {} under {:?} at {}", id, parent_id, at);
        Ok(self.to_flat_array())
    }

    /// Merge a patch into a node's name, props and style
    pub fn update(&mut self, id: &str, patch: &ComponentPatch) -> Result<Vec<Component>, TreeError> {
        self.check_update(id)?;

        if let Some(node) = self.nodes.get_mut(id) {
            let old_style = patch.style.as_ref().map(|_| node.style.clone());
            patch.apply_to(&mut node.name, &mut node.props, &mut node.style);

            // The class name is derived from the style
            if old_style.is_some_and(|old| old != node.style) {
                node.class_name = None;
            }
        }

        debug!("Updated {}", id);
        Ok(self.to_flat_array())
    }

    /// Remove a node and its entire subtree
    pub fn delete(&mut self, id: &str) -> Result<Deletion, TreeError> {
        self.check_delete(id)?;

        let parent = self.parents.get(id).cloned();
        self.siblings_mut(parent.as_deref()).retain(|sibling| sibling != id);
        if let Some(parent) = &parent {
            if self.children.get(parent).is_some_and(|c| c.is_empty()) {
                self.children.remove(parent);
            }
        }

        let removed_ids = self.subtree_ids(id);
        for removed in &removed_ids {
            self.nodes.remove(removed);
            self.parents.remove(removed);
            self.children.remove(removed);
            self.expanded.remove(removed);
        }

        debug!("Deleted {} ({} nodes)", id, removed_ids.len());
        Ok(Deletion {
            components: self.to_flat_array(),
            removed_ids,
        })
    }

    /// Relocate `drag_id` (with its subtree) relative to `target_id`
    pub fn move_node(
        &mut self,
        registry: &dyn ComponentRegistry,
        drag_id: &str,
        target_id: &str,
        position: MovePosition,
    ) -> Result<Vec<Component>, TreeError> {
        self.check_move(registry, drag_id, target_id, position)?;

        // Detach from the old location first so the node is never listed twice
        let old_parent = self.parents.remove(drag_id);
        self.siblings_mut(old_parent.as_deref())
            .retain(|sibling| sibling != drag_id);
        if let Some(old_parent) = &old_parent {
            if self.children.get(old_parent).is_some_and(|c| c.is_empty()) {
                self.children.remove(old_parent);
            }
        }

        let new_parent = match position {
            MovePosition::Inside => Some(target_id.to_string()),
            MovePosition::Before | MovePosition::After => self.parents.get(target_id).cloned(),
        };

        let siblings = self.siblings_mut(new_parent.as_deref());
        let at = match position {
            MovePosition::Inside => siblings.len(),
            MovePosition::Before | MovePosition::After => {
                let target_index = siblings
                    .iter()
                    .position(|sibling| sibling == target_id)
                    .unwrap_or(siblings.len());
                if position == MovePosition::After {
                    (target_index + 1).min(siblings.len())
                } else {
                    target_index
                }
            }
        };
        siblings.insert(at, drag_id.to_string());

        if let Some(parent) = &new_parent {
            self.parents.insert(drag_id.to_string(), parent.clone());
        }

        debug!("Moved {} {} {}", drag_id, position, target_id);
        Ok(self.to_flat_array())
    }

    fn siblings_mut(&mut self, parent_id: Option<&str>) -> &mut Vec<String> {
        match parent_id {
            Some(parent_id) => self.children.entry(parent_id.to_string()).or_default(),
            None => &mut self.roots,
        }
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Ordered root ids
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Ordered child ids of a node (empty for leaves and unknown ids)
    pub fn children_of(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.parents.get(id).map(String::as_str)
    }

    /// Whether `ancestor` lies strictly above `id`
    pub fn is_ancestor(&self, ancestor: &str, id: &str) -> bool {
        let mut current = self.parents.get(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parents.get(parent);
        }
        false
    }

    /// Distance from the root level (roots have depth 0)
    pub fn depth(&self, id: &str) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        let mut depth = 0;
        let mut current = self.parents.get(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parents.get(parent);
        }
        Some(depth)
    }

    /// Ids from the root down to `id`, inclusive
    pub fn path(&self, id: &str) -> Option<Vec<String>> {
        if !self.contains(id) {
            return None;
        }
        let mut path = vec![id.to_string()];
        let mut current = self.parents.get(id);
        while let Some(parent) = current {
            path.push(parent.clone());
            current = self.parents.get(parent);
        }
        path.reverse();
        Some(path)
    }

    /// All ids in pre-order (document order)
    pub fn ids(&self) -> Vec<String> {
        let mut ids = Vec::with_capacity(self.len());
        for root in &self.roots {
            self.collect_subtree(root, &mut ids);
        }
        ids
    }

    /// A node and its descendants in pre-order
    pub fn subtree_ids(&self, id: &str) -> Vec<String> {
        let mut ids = Vec::new();
        if self.contains(id) {
            self.collect_subtree(id, &mut ids);
        }
        ids
    }

    fn collect_subtree(&self, id: &str, ids: &mut Vec<String>) {
        ids.push(id.to_string());
        for child in self.children_of(id) {
            self.collect_subtree(child, ids);
        }
    }

    /// A node's own record, without children
    pub fn record(&self, id: &str) -> Option<Component> {
        self.nodes.get(id).map(|node| self.shallow(node))
    }

    /// A node with its subtree materialized
    pub fn get(&self, id: &str) -> Option<Component> {
        self.contains(id).then(|| self.materialize(id))
    }

    fn shallow(&self, node: &Component) -> Component {
        let mut record = node.clone();
        record.parent_id = self.parents.get(&node.id).cloned();
        record
    }

    fn materialize(&self, id: &str) -> Component {
        let mut component = self.shallow(&self.nodes[id]);
        component.children = self
            .children_of(id)
            .iter()
            .map(|child| self.materialize(child))
            .collect();
        component
    }

    /// The canonical serializable form: ordered roots with nested children
    pub fn to_flat_array(&self) -> Vec<Component> {
        self.roots.iter().map(|id| self.materialize(id)).collect()
    }

    // ---------------------------------------------------------------------
    // Derived views
    // ---------------------------------------------------------------------

    /// Top-level nodes with children materialized
    pub fn root_nodes(&self) -> Vec<TreeNode> {
        self.roots
            .iter()
            .map(|id| self.build_node(id, 0, true))
            .collect()
    }

    fn build_node(&self, id: &str, depth: usize, is_visible: bool) -> TreeNode {
        let is_expanded = self.is_expanded(id);
        TreeNode {
            component: self.shallow(&self.nodes[id]),
            depth,
            is_expanded,
            is_visible,
            children: self
                .children_of(id)
                .iter()
                .map(|child| self.build_node(child, depth + 1, is_visible && is_expanded))
                .collect(),
        }
    }

    /// Pre-order nodes whose ancestors are all expanded
    pub fn visible_nodes(&self) -> Vec<VisibleNode> {
        let mut visible = Vec::new();
        for root in &self.roots {
            self.collect_visible(root, 0, &mut visible);
        }
        visible
    }

    fn collect_visible(&self, id: &str, depth: usize, visible: &mut Vec<VisibleNode>) {
        let is_expanded = self.is_expanded(id);
        let child_count = self.children_of(id).len();
        visible.push(VisibleNode {
            component: self.shallow(&self.nodes[id]),
            depth,
            is_expanded,
            child_count,
        });

        if is_expanded {
            for child in self.children_of(id) {
                self.collect_visible(child, depth + 1, visible);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Expansion (UI state)
    // ---------------------------------------------------------------------

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.get(id).copied().unwrap_or(false)
    }

    /// Flip a node's expansion flag, returning the new value
    pub fn toggle_expanded(&mut self, id: &str) -> Result<bool, TreeError> {
        self.require(id)?;
        let expanded = !self.is_expanded(id);
        self.expanded.insert(id.to_string(), expanded);
        Ok(expanded)
    }

    pub fn set_expanded(&mut self, id: &str, expanded: bool) -> Result<(), TreeError> {
        self.require(id)?;
        self.expanded.insert(id.to_string(), expanded);
        Ok(())
    }

    /// Expand every ancestor of `id` so it shows up in `visible_nodes`
    pub fn expand_to(&mut self, id: &str) -> Result<(), TreeError> {
        self.require(id)?;
        let mut current = self.parents.get(id).cloned();
        while let Some(parent) = current {
            current = self.parents.get(&parent).cloned();
            self.expanded.insert(parent, true);
        }
        Ok(())
    }

    pub fn expand_all(&mut self) {
        self.expanded = self.children.keys().map(|id| (id.clone(), true)).collect();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Expansion map to carry into a rebuilt instance
    pub fn expanded_state(&self) -> HashMap<String, bool> {
        self.expanded.clone()
    }
}
