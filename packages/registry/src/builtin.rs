//! Built-in component types available in every editor.

use crate::config::{ComponentConfig, FieldKind, PropertyField};
use crate::registry::StaticRegistry;

fn text_field(key: &str, label: &str) -> PropertyField {
    PropertyField::prop(key, label, FieldKind::Text)
}

fn color_field(key: &str, label: &str) -> PropertyField {
    PropertyField::style(key, label, FieldKind::Color)
}

fn select_field(key: &str, label: &str, options: &[&str]) -> PropertyField {
    PropertyField::prop(
        key,
        label,
        FieldKind::Select {
            options: options.iter().map(|o| o.to_string()).collect(),
        },
    )
}

fn spacing_fields() -> [PropertyField; 2] {
    [
        PropertyField::style("padding", "Padding", FieldKind::Text),
        PropertyField::style("margin", "Margin", FieldKind::Text),
    ]
}

/// Configurations for the built-in component types
pub fn builtin_configs() -> Vec<ComponentConfig> {
    let [padding, margin] = spacing_fields();

    vec![
        ComponentConfig::new("text", "Text")
            .description("A paragraph of text")
            .icon("type")
            .prop("text", "Text")
            .style("font-size", "16px")
            .field(PropertyField::prop("text", "Content", FieldKind::TextArea))
            .field(color_field("color", "Color"))
            .field(PropertyField::style("font-size", "Font size", FieldKind::Text)),
        ComponentConfig::new("heading", "Heading")
            .description("A section heading")
            .icon("heading")
            .prop("text", "Heading")
            .prop("level", 2)
            .style("font-weight", "bold")
            .field(text_field("text", "Content"))
            .field(PropertyField::prop(
                "level",
                "Level",
                FieldKind::Number {
                    min: Some(1.0),
                    max: Some(6.0),
                    step: Some(1.0),
                },
            ))
            .field(color_field("color", "Color")),
        ComponentConfig::new("button", "Button")
            .description("A clickable button")
            .icon("square")
            .prop("label", "Button")
            .prop("variant", "primary")
            .prop("disabled", false)
            .style("padding", "8px 16px")
            .style("border-radius", "4px")
            .field(text_field("label", "Label"))
            .field(select_field("variant", "Variant", &["primary", "secondary", "ghost"]))
            .field(PropertyField::prop("disabled", "Disabled", FieldKind::Boolean))
            .field(color_field("background-color", "Background")),
        ComponentConfig::new("image", "Image")
            .description("An image")
            .icon("image")
            .category("media")
            .prop("src", "")
            .prop("alt", "")
            .style("max-width", "100%")
            .field(text_field("src", "Source"))
            .field(text_field("alt", "Alt text")),
        ComponentConfig::new("link", "Link")
            .description("A hyperlink")
            .icon("link")
            .prop("text", "Link")
            .prop("href", "#")
            .prop("newTab", false)
            .field(text_field("text", "Text"))
            .field(text_field("href", "URL"))
            .field(PropertyField::prop("newTab", "Open in new tab", FieldKind::Boolean)),
        ComponentConfig::new("input", "Input")
            .description("A form input")
            .icon("text-cursor")
            .category("form")
            .prop("placeholder", "")
            .prop("inputType", "text")
            .prop("required", false)
            .field(text_field("placeholder", "Placeholder"))
            .field(select_field("inputType", "Type", &["text", "email", "password", "number"]))
            .field(PropertyField::prop("required", "Required", FieldKind::Boolean)),
        ComponentConfig::new("divider", "Divider")
            .description("A horizontal rule")
            .icon("minus")
            .style("border-top", "1px solid #e5e7eb")
            .style("margin", "16px 0"),
        ComponentConfig::new("spacer", "Spacer")
            .description("Empty vertical space")
            .icon("move-vertical")
            .category("layout")
            .style("height", "24px")
            .field(PropertyField::style("height", "Height", FieldKind::Text)),
        ComponentConfig::new("container", "Container")
            .description("A box that groups other components")
            .icon("box")
            .category("layout")
            .container()
            .style("display", "flex")
            .style("flex-direction", "column")
            .style("padding", "16px")
            .field(padding.clone())
            .field(margin.clone())
            .field(PropertyField::style(
                "flex-direction",
                "Direction",
                FieldKind::Select {
                    options: vec!["row".to_string(), "column".to_string()],
                },
            ))
            .field(color_field("background-color", "Background")),
        ComponentConfig::new("list", "List")
            .description("An ordered or unordered list")
            .icon("list")
            .category("layout")
            .container()
            .prop("ordered", false)
            .field(PropertyField::prop("ordered", "Ordered", FieldKind::Boolean)),
        ComponentConfig::new("card", "Card")
            .description("A padded surface with a border")
            .icon("credit-card")
            .category("layout")
            .container()
            .style("padding", "16px")
            .style("border", "1px solid #e5e7eb")
            .style("border-radius", "8px")
            .field(padding)
            .field(margin)
            .field(color_field("background-color", "Background")),
        ComponentConfig::new("grid", "Grid")
            .description("A grid of columns")
            .icon("grid")
            .category("layout")
            .container()
            .prop("columns", 2)
            .style("display", "grid")
            .style("gap", "16px")
            .field(PropertyField::prop(
                "columns",
                "Columns",
                FieldKind::Number {
                    min: Some(1.0),
                    max: Some(12.0),
                    step: Some(1.0),
                },
            )),
    ]
}

impl StaticRegistry {
    /// Registry holding the built-in component types
    pub fn builtin() -> Self {
        Self::from_configs(builtin_configs())
    }
}
