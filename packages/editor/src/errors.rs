//! Error types for the editor

use pagecraft_registry::RegistryError;
use thiserror::Error;

/// Structural failures. Every one of them is raised before the tree is
/// touched, so an error always means "unchanged state".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Node not found: {0}")]
    NotFound(String),

    #[error("Node cannot contain children: {0}")]
    NotContainer(String),

    #[error("Moving {drag_id} onto {target_id} would create a cycle")]
    Cycle { drag_id: String, target_id: String },

    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("No page is loaded")]
    NoPageLoaded,
}
