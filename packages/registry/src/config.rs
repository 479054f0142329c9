use pagecraft_common::{Props, Style};
use serde::{Deserialize, Serialize};

/// Configuration for one component type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentConfig {
    /// Type tag (e.g., "button", "container")
    #[serde(rename = "type")]
    pub component_type: String,

    /// Label used as the default component name
    pub display_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,

    /// Palette grouping ("basic", "layout", "form", ...)
    #[serde(default = "default_category")]
    pub category: String,

    /// Whether instances may contain children
    #[serde(default)]
    pub can_have_children: bool,

    #[serde(default)]
    pub default_props: Props,

    #[serde(default)]
    pub default_style: Style,

    /// Property panel schema
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyField>,
}

fn default_category() -> String {
    "basic".to_string()
}

impl ComponentConfig {
    pub fn new(component_type: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            display_name: display_name.into(),
            description: String::new(),
            icon: String::new(),
            category: default_category(),
            can_have_children: false,
            default_props: Props::new(),
            default_style: Style::new(),
            properties: Vec::new(),
        }
    }

    pub fn container(mut self) -> Self {
        self.can_have_children = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<pagecraft_common::PropValue>) -> Self {
        self.default_props.insert(key.into(), value.into());
        self
    }

    pub fn style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_style.insert(key.into(), value.into());
        self
    }

    pub fn field(mut self, field: PropertyField) -> Self {
        self.properties.push(field);
        self
    }
}

/// Which record of the component a field edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldTarget {
    Prop,
    Style,
}

/// Editor widget for a property field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    TextArea,
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    Boolean,
    Select { options: Vec<String> },
    Color,
}

/// One editable field in the property panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyField {
    pub key: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default = "default_target")]
    pub target: FieldTarget,
}

fn default_target() -> FieldTarget {
    FieldTarget::Prop
}

impl PropertyField {
    pub fn prop(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            target: FieldTarget::Prop,
        }
    }

    pub fn style(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            target: FieldTarget::Style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "type": "badge",
            "displayName": "Badge",
            "canHaveChildren": false,
            "defaultProps": { "text": "New" },
            "defaultStyle": { "padding": "2px 6px" },
            "properties": [
                { "key": "text", "label": "Text", "kind": "text" },
                { "key": "tone", "label": "Tone", "kind": "select", "options": ["info", "warn"] },
                { "key": "color", "label": "Color", "kind": "color", "target": "style" }
            ]
        }"#;

        let config: ComponentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.component_type, "badge");
        assert_eq!(config.category, "basic");
        assert!(!config.can_have_children);
        assert_eq!(config.properties.len(), 3);
        assert_eq!(
            config.properties[1].kind,
            FieldKind::Select {
                options: vec!["info".to_string(), "warn".to_string()]
            }
        );
        assert_eq!(config.properties[2].target, FieldTarget::Style);
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config: ComponentConfig =
            serde_json::from_str(r#"{ "type": "box", "displayName": "Box" }"#).unwrap();
        assert!(config.default_props.is_empty());
        assert!(config.properties.is_empty());
        assert!(!config.can_have_children);
    }
}
