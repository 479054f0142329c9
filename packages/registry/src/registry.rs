//! # Component Registry
//!
//! Lookup from a component type tag to its configuration. The tree engine
//! consults it for containment rules; the property panel reads the schema.
//!
//! The registry is a read-only dependency handed to whoever needs it, so
//! tests can swap in a small fake with only the types they care about.

use crate::config::ComponentConfig;
use crate::errors::RegistryError;
use pagecraft_common::Component;
use std::collections::HashMap;

/// Read-only access to component type configurations
pub trait ComponentRegistry: Send + Sync {
    /// Look up a type's configuration
    fn get_config(&self, component_type: &str) -> Option<&ComponentConfig>;

    /// All registered configurations, in registration order
    fn configs(&self) -> Vec<&ComponentConfig>;

    /// Look up a type, failing if it is not registered
    fn require(&self, component_type: &str) -> Result<&ComponentConfig, RegistryError> {
        self.get_config(component_type)
            .ok_or_else(|| RegistryError::UnknownComponentType(component_type.to_string()))
    }

    /// Whether instances of a type may contain children
    fn can_have_children(&self, component_type: &str) -> Result<bool, RegistryError> {
        Ok(self.require(component_type)?.can_have_children)
    }

    /// Create a component of the given type filled with its defaults
    ///
    /// The returned component has an empty id; ids are assigned on insert.
    fn instantiate(&self, component_type: &str) -> Result<Component, RegistryError> {
        let config = self.require(component_type)?;
        let mut component = Component::new(String::new(), config.component_type.clone());
        component.name = Some(config.display_name.clone());
        component.props = config.default_props.clone();
        component.style = config.default_style.clone();
        Ok(component)
    }
}

/// In-memory registry preserving registration order
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    configs: Vec<ComponentConfig>,
    index: HashMap<String, usize>,
}

impl StaticRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from configurations (later duplicates replace earlier ones)
    pub fn from_configs(configs: impl IntoIterator<Item = ComponentConfig>) -> Self {
        let mut registry = Self::new();
        registry.extend(configs);
        registry
    }

    /// Parse a JSON array of configurations
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let configs: Vec<ComponentConfig> = serde_json::from_str(json)?;
        Ok(Self::from_configs(configs))
    }

    /// Register a type, replacing any existing configuration for it
    pub fn register(&mut self, config: ComponentConfig) {
        match self.index.get(&config.component_type) {
            Some(&position) => {
                tracing::debug!("Replacing component type '{}'", config.component_type);
                self.configs[position] = config;
            }
            None => {
                self.index
                    .insert(config.component_type.clone(), self.configs.len());
                self.configs.push(config);
            }
        }
    }

    /// Register several types
    pub fn extend(&mut self, configs: impl IntoIterator<Item = ComponentConfig>) {
        for config in configs {
            self.register(config);
        }
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Consume the registry, keeping registration order
    pub fn into_configs(self) -> Vec<ComponentConfig> {
        self.configs
    }
}

impl ComponentRegistry for StaticRegistry {
    fn get_config(&self, component_type: &str) -> Option<&ComponentConfig> {
        self.index
            .get(component_type)
            .map(|&position| &self.configs[position])
    }

    fn configs(&self) -> Vec<&ComponentConfig> {
        self.configs.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_common::PropValue;

    fn sample() -> StaticRegistry {
        StaticRegistry::from_configs([
            ComponentConfig::new("box", "Box").container(),
            ComponentConfig::new("label", "Label").prop("text", "Label"),
        ])
    }

    #[test]
    fn test_lookup() {
        let registry = sample();
        assert_eq!(registry.len(), 2);
        assert!(registry.can_have_children("box").unwrap());
        assert!(!registry.can_have_children("label").unwrap());
        assert!(registry.get_config("missing").is_none());
    }

    #[test]
    fn test_unknown_type_is_typed_error() {
        let registry = sample();
        let err = registry.can_have_children("missing").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownComponentType(t) if t == "missing"));
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = sample();
        registry.register(ComponentConfig::new("box", "Panel"));

        let types: Vec<_> = registry.configs().iter().map(|c| c.display_name.clone()).collect();
        assert_eq!(types, vec!["Panel", "Label"]);
        assert!(!registry.can_have_children("box").unwrap());
    }

    #[test]
    fn test_instantiate_applies_defaults() {
        let registry = sample();
        let component = registry.instantiate("label").unwrap();

        assert!(component.id.is_empty());
        assert_eq!(component.name.as_deref(), Some("Label"));
        assert_eq!(component.props["text"], PropValue::from("Label"));
        assert!(component.children.is_empty());
    }
}
