//! Error types for the registry

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),

    #[error("Invalid registry JSON: {0}")]
    Json(#[from] serde_json::Error),
}
