//! # Tree Mutations
//!
//! The four structural edits, as serializable values.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation is one user-level edit
//! 2. **Validated**: `validate` runs the same checks `apply` does, without applying
//! 3. **Atomic**: A rejected mutation leaves the tree untouched
//!
//! ## Mutation Semantics
//!
//! ### Insert
//! - Adds a new subtree under a container parent, or at the root level
//! - Index defaults to append, clamped to the sibling count
//!
//! ### Update
//! - Merges name/props/style; identity, type, children and parent never change
//!
//! ### Delete
//! - Removes the node and all descendants
//! - The removed ids are reported so selection can be cleared
//!
//! ### Move
//! - Relocates a node with its subtree before/after a sibling or inside a container
//! - Fails if the target is the node itself or one of its descendants

use crate::errors::TreeError;
use crate::tree::TreeManager;
use pagecraft_common::{Component, ComponentPatch, MovePosition};
use pagecraft_registry::ComponentRegistry;
use serde::{Deserialize, Serialize};

/// Structural edits on a component tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Mutation {
    /// Insert a new component (and its children)
    Insert {
        component: Component,
        #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
        parent_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },

    /// Merge a patch into a component's editable fields
    Update { id: String, patch: ComponentPatch },

    /// Remove a component and its subtree
    Delete { id: String },

    /// Move a component relative to a target
    Move {
        #[serde(rename = "dragId")]
        drag_id: String,
        #[serde(rename = "targetId")]
        target_id: String,
        position: MovePosition,
    },
}

impl Mutation {
    /// Validate without applying
    pub fn validate(
        &self,
        tree: &TreeManager,
        registry: &dyn ComponentRegistry,
    ) -> Result<(), TreeError> {
        match self {
            Mutation::Insert {
                component,
                parent_id,
                ..
            } => tree.check_insert(registry, component, parent_id.as_deref()),
            Mutation::Update { id, .. } => tree.check_update(id),
            Mutation::Delete { id } => tree.check_delete(id),
            Mutation::Move {
                drag_id,
                target_id,
                position,
            } => tree.check_move(registry, drag_id, target_id, *position),
        }
    }

    /// Apply to a tree with validation
    pub fn apply(
        &self,
        tree: &mut TreeManager,
        registry: &dyn ComponentRegistry,
    ) -> Result<MutationResult, TreeError> {
        match self {
            Mutation::Insert {
                component,
                parent_id,
                index,
            } => {
                let components =
                    tree.insert(registry, component.clone(), parent_id.as_deref(), *index)?;
                Ok(MutationResult {
                    inserted_id: Some(component.id.clone()),
                    ..MutationResult::new(components)
                })
            }

            Mutation::Update { id, patch } => {
                let components = tree.update(id, patch)?;
                Ok(MutationResult::new(components))
            }

            Mutation::Delete { id } => {
                let deletion = tree.delete(id)?;
                Ok(MutationResult {
                    removed_ids: deletion.removed_ids,
                    ..MutationResult::new(deletion.components)
                })
            }

            Mutation::Move {
                drag_id,
                target_id,
                position,
            } => {
                let components = tree.move_node(registry, drag_id, target_id, *position)?;
                Ok(MutationResult::new(components))
            }
        }
    }

    /// Get a debug name for this mutation
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::Insert { .. } => "insert",
            Mutation::Update { .. } => "update",
            Mutation::Delete { .. } => "delete",
            Mutation::Move { .. } => "move",
        }
    }

    /// Human-readable history label
    pub fn label(&self) -> String {
        match self {
            Mutation::Insert { component, .. } => format!("Insert {}", component.component_type),
            Mutation::Update { .. } => "Edit properties".to_string(),
            Mutation::Delete { .. } => "Delete component".to_string(),
            Mutation::Move { .. } => "Move component".to_string(),
        }
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// The full tree after the mutation
    pub components: Vec<Component>,

    /// Ids removed by the mutation (deletes only)
    pub removed_ids: Vec<String>,

    /// Id of the inserted root (inserts only)
    pub inserted_id: Option<String>,
}

impl MutationResult {
    fn new(components: Vec<Component>) -> Self {
        Self {
            components,
            removed_ids: Vec::new(),
            inserted_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_registry::StaticRegistry;

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::Move {
            drag_id: "a".to_string(),
            target_id: "b".to_string(),
            position: MovePosition::After,
        };

        let json = serde_json::to_string(&mutation).unwrap();
        assert_eq!(
            json,
            r#"{"op":"move","dragId":"a","targetId":"b","position":"after"}"#
        );

        let deserialized: Mutation = serde_json::from_str(&json).unwrap();
        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_parse_insert_without_parent() {
        let json = r#"{ "op": "insert", "component": { "id": "", "type": "text" } }"#;
        let mutation: Mutation = serde_json::from_str(json).unwrap();

        assert!(matches!(
            mutation,
            Mutation::Insert { parent_id: None, index: None, .. }
        ));
        assert_eq!(mutation.label(), "Insert text");
    }

    #[test]
    fn test_validation_rejects_missing_ids() {
        let registry = StaticRegistry::builtin();
        let tree = TreeManager::empty();

        let mutation = Mutation::Update {
            id: "".to_string(),
            patch: ComponentPatch::new().name("x"),
        };

        assert_eq!(
            mutation.validate(&tree, &registry),
            Err(TreeError::NotFound("".to_string()))
        );
    }

    #[test]
    fn test_apply_delete_reports_removed_ids() {
        let registry = StaticRegistry::builtin();
        let mut tree = TreeManager::new(
            vec![Component::new("c", "container").with_child(Component::new("t", "text"))],
            None,
        )
        .unwrap();

        let result = Mutation::Delete { id: "c".to_string() }
            .apply(&mut tree, &registry)
            .unwrap();

        assert!(result.components.is_empty());
        assert_eq!(result.removed_ids, vec!["c", "t"]);
    }

    #[test]
    fn test_apply_insert_reports_inserted_id() {
        let registry = StaticRegistry::builtin();
        let mut tree = TreeManager::empty();

        let result = Mutation::Insert {
            component: Component::new("hero", "card"),
            parent_id: None,
            index: None,
        }
        .apply(&mut tree, &registry)
        .unwrap();

        assert_eq!(result.inserted_id.as_deref(), Some("hero"));
        assert!(result.removed_ids.is_empty());
    }
}
