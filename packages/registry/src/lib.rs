//! # Pagecraft Registry
//!
//! Component type configurations: default content, containment capability
//! and the property-editing schema for each type tag.
//!
//! ```rust,ignore
//! use pagecraft_registry::{ComponentRegistry, StaticRegistry};
//!
//! let registry = StaticRegistry::builtin();
//! assert!(registry.can_have_children("card")?);
//! let button = registry.instantiate("button")?;
//! ```

mod builtin;
mod config;
mod errors;
mod registry;

pub use builtin::builtin_configs;
pub use config::{ComponentConfig, FieldKind, FieldTarget, PropertyField};
pub use errors::RegistryError;
pub use registry::{ComponentRegistry, StaticRegistry};
