//! Browser bindings for the editor session.
//!
//! Everything crosses the boundary as JSON strings. Errors are returned as
//! their display text, which wasm-bindgen throws as a JS string.

use pagecraft_common::{Component, ComponentPatch, MovePosition, Page, Style};
use pagecraft_compiler_css::compile_style;
use pagecraft_editor::{DeviceProfile, EditorSession, Mutation};
use pagecraft_registry::StaticRegistry;
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

type BindingResult<T> = Result<T, String>;

fn describe(err: impl Display) -> String {
    err.to_string()
}

fn to_json(value: &impl Serialize) -> BindingResult<String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn from_json<T: serde::de::DeserializeOwned>(json: &str) -> BindingResult<T> {
    serde_json::from_str(json).map_err(|e| format!("Parse error: {}", e))
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Compile a JSON style map to its class string
#[wasm_bindgen(js_name = compileStyle)]
pub fn compile_style_js(style_json: &str) -> BindingResult<String> {
    let style: Style = from_json(style_json)?;
    Ok(compile_style(&style))
}

#[wasm_bindgen]
pub struct Editor {
    session: EditorSession,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Editor {
    /// Editor over the built-in component types
    #[wasm_bindgen(constructor)]
    pub fn new() -> Editor {
        Editor {
            session: EditorSession::new(Arc::new(StaticRegistry::builtin())),
        }
    }

    /// Editor over the built-in types extended with a JSON registry
    #[wasm_bindgen(js_name = withRegistry)]
    pub fn with_registry(registry_json: &str) -> BindingResult<Editor> {
        let custom = StaticRegistry::from_json(registry_json).map_err(describe)?;
        let mut registry = StaticRegistry::builtin();
        registry.extend(custom.into_configs());
        Ok(Editor {
            session: EditorSession::new(Arc::new(registry)),
        })
    }

    /// Load a page record (or a bare component array)
    #[wasm_bindgen(js_name = loadPage)]
    pub fn load_page(&mut self, page_json: &str) -> BindingResult<()> {
        let page = Page::from_json(page_json).map_err(describe)?;
        self.session.open(page).map_err(describe)
    }

    #[wasm_bindgen(js_name = closePage)]
    pub fn close_page(&mut self) {
        self.session.close_page();
    }

    /// Insert a component (JSON) and return its id
    #[wasm_bindgen(js_name = insertComponent)]
    pub fn insert_component(
        &mut self,
        component_json: &str,
        parent_id: Option<String>,
        index: Option<u32>,
    ) -> BindingResult<String> {
        let component: Component = from_json(component_json)?;
        self.session
            .insert_component(component, parent_id.as_deref(), index.map(|i| i as usize))
            .map_err(describe)
    }

    /// Insert a registry default and return its id
    #[wasm_bindgen(js_name = addComponent)]
    pub fn add_component(
        &mut self,
        component_type: &str,
        parent_id: Option<String>,
        index: Option<u32>,
    ) -> BindingResult<String> {
        self.session
            .add_component(component_type, parent_id.as_deref(), index.map(|i| i as usize))
            .map_err(describe)
    }

    #[wasm_bindgen(js_name = updateComponent)]
    pub fn update_component(&mut self, id: &str, patch_json: &str) -> BindingResult<()> {
        let patch: ComponentPatch = from_json(patch_json)?;
        self.session.update_component(id, patch).map_err(describe)
    }

    /// Delete a component; returns the removed ids as JSON
    #[wasm_bindgen(js_name = deleteComponent)]
    pub fn delete_component(&mut self, id: &str) -> BindingResult<String> {
        let removed = self.session.delete_component(id).map_err(describe)?;
        to_json(&removed)
    }

    /// Move a component; `position` is "before", "after" or "inside"
    #[wasm_bindgen(js_name = moveComponent)]
    pub fn move_component(
        &mut self,
        drag_id: &str,
        target_id: &str,
        position: &str,
    ) -> BindingResult<()> {
        let position: MovePosition = from_json(&format!("\"{}\"", position))?;
        self.session
            .move_component(drag_id, target_id, position)
            .map_err(describe)
    }

    /// Apply a serialized mutation (`{"op": ...}`)
    #[wasm_bindgen(js_name = applyMutation)]
    pub fn apply_mutation(&mut self, mutation_json: &str) -> BindingResult<()> {
        let mutation: Mutation = from_json(mutation_json)?;
        self.session.apply(mutation).map(|_| ()).map_err(describe)
    }

    /// Replace the whole tree with a JSON component array
    #[wasm_bindgen(js_name = setComponents)]
    pub fn set_components(&mut self, components_json: &str) -> BindingResult<bool> {
        let components: Vec<Component> = from_json(components_json)?;
        self.session.set_components(components).map_err(describe)
    }

    pub fn select(&mut self, id: Option<String>) -> BindingResult<()> {
        self.session.select(id.as_deref()).map_err(describe)
    }

    #[wasm_bindgen(js_name = setHovered)]
    pub fn set_hovered(&mut self, id: Option<String>) -> BindingResult<()> {
        self.session.set_hovered(id.as_deref()).map_err(describe)
    }

    #[wasm_bindgen(getter)]
    pub fn selected(&self) -> Option<String> {
        self.session.selected().map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn hovered(&self) -> Option<String> {
        self.session.hovered().map(str::to_string)
    }

    pub fn undo(&mut self) -> BindingResult<bool> {
        self.session.undo().map_err(describe)
    }

    pub fn redo(&mut self) -> BindingResult<bool> {
        self.session.redo().map_err(describe)
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    #[wasm_bindgen(js_name = undoLabel)]
    pub fn undo_label(&self) -> Option<String> {
        self.session.undo_label().map(str::to_string)
    }

    #[wasm_bindgen(js_name = redoLabel)]
    pub fn redo_label(&self) -> Option<String> {
        self.session.redo_label().map(str::to_string)
    }

    #[wasm_bindgen(js_name = beginBatch)]
    pub fn begin_batch(&mut self, label: &str) -> BindingResult<()> {
        self.session.begin_batch(label).map_err(describe)
    }

    #[wasm_bindgen(js_name = endBatch)]
    pub fn end_batch(&mut self) -> BindingResult<bool> {
        self.session.end_batch().map_err(describe)
    }

    #[wasm_bindgen(js_name = rootNodes)]
    pub fn root_nodes(&self) -> BindingResult<String> {
        to_json(&self.session.root_nodes().map_err(describe)?)
    }

    #[wasm_bindgen(js_name = visibleNodes)]
    pub fn visible_nodes(&self) -> BindingResult<String> {
        to_json(&self.session.visible_nodes().map_err(describe)?)
    }

    #[wasm_bindgen(js_name = getComponent)]
    pub fn get_component(&self, id: &str) -> BindingResult<String> {
        to_json(&self.session.get_component(id).map_err(describe)?)
    }

    #[wasm_bindgen(js_name = getPath)]
    pub fn get_path(&self, id: &str) -> BindingResult<String> {
        to_json(&self.session.path(id).map_err(describe)?)
    }

    #[wasm_bindgen(js_name = toggleExpanded)]
    pub fn toggle_expanded(&mut self, id: &str) -> BindingResult<bool> {
        self.session.toggle_expanded(id).map_err(describe)
    }

    #[wasm_bindgen(js_name = expandAll)]
    pub fn expand_all(&mut self) -> BindingResult<()> {
        self.session.expand_all().map_err(describe)
    }

    #[wasm_bindgen(js_name = collapseAll)]
    pub fn collapse_all(&mut self) -> BindingResult<()> {
        self.session.collapse_all().map_err(describe)
    }

    #[wasm_bindgen(js_name = precompileStyles)]
    pub fn precompile_styles(&mut self) -> BindingResult<bool> {
        self.session.precompile_styles().map_err(describe)
    }

    /// The whole tree as its serialized JSON array
    pub fn components(&self) -> BindingResult<String> {
        to_json(&self.session.components().map_err(describe)?)
    }

    #[wasm_bindgen(js_name = setPreviewMode)]
    pub fn set_preview_mode(&mut self, preview_mode: bool) {
        self.session.set_preview_mode(preview_mode);
    }

    #[wasm_bindgen(js_name = togglePreviewMode)]
    pub fn toggle_preview_mode(&mut self) -> bool {
        self.session.toggle_preview_mode()
    }

    /// `device` is "mobile", "tablet", "desktop" or "WIDTHxHEIGHT"
    #[wasm_bindgen(js_name = setDevice)]
    pub fn set_device(&mut self, device: &str) -> BindingResult<()> {
        let device: DeviceProfile = device.parse()?;
        self.session.set_device(device);
        Ok(())
    }

    #[wasm_bindgen(js_name = setDragging)]
    pub fn set_dragging(&mut self, is_dragging: bool) {
        self.session.set_dragging(is_dragging);
    }

    /// Preview, device and drag flags as JSON
    #[wasm_bindgen(js_name = uiState)]
    pub fn ui_state(&self) -> BindingResult<String> {
        to_json(self.session.ui())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{ "id": "home", "name": "Home", "components": [
        { "id": "box", "type": "container", "style": { "display": "flex" }, "children": [
            { "id": "t", "type": "text", "props": { "text": "Hi" } }
        ] }
    ] }"#;

    fn editor() -> Editor {
        let mut editor = Editor::new();
        editor.load_page(PAGE).unwrap();
        editor
    }

    #[test]
    fn test_compile_style() {
        let classes = compile_style_js(r#"{ "padding": "16px", "display": "flex" }"#).unwrap();
        assert_eq!(classes, "flex p-[16px]");
    }

    #[test]
    fn test_edit_round_trip() {
        let mut editor = editor();

        let id = editor
            .insert_component(r#"{ "type": "button" }"#, Some("box".to_string()), Some(0))
            .unwrap();
        assert!(!id.is_empty());

        let path: Vec<String> = serde_json::from_str(&editor.get_path(&id).unwrap()).unwrap();
        assert_eq!(path, vec!["box".to_string(), id.clone()]);

        editor.move_component(&id, "box", "after").unwrap();
        let roots: serde_json::Value = serde_json::from_str(&editor.components().unwrap()).unwrap();
        assert_eq!(roots.as_array().map(|a| a.len()), Some(2));

        assert!(editor.undo().unwrap());
        assert!(editor.undo().unwrap());
        assert!(!editor.undo().unwrap());
        assert!(editor.can_redo());
    }

    #[test]
    fn test_errors_are_messages() {
        let mut editor = editor();

        let err = editor.move_component("box", "t", "inside").unwrap_err();
        assert!(err.contains("cycle"));

        let err = editor.move_component("t", "box", "sideways").unwrap_err();
        assert!(err.starts_with("Parse error"));

        let err = Editor::new().components().unwrap_err();
        assert_eq!(err, "No page is loaded");
    }

    #[test]
    fn test_tree_views_serialize_camel_case() {
        let mut editor = editor();
        editor.toggle_expanded("box").unwrap();

        let visible: serde_json::Value =
            serde_json::from_str(&editor.visible_nodes().unwrap()).unwrap();
        assert_eq!(visible[0]["id"], "box");
        assert_eq!(visible[0]["isExpanded"], true);
        assert_eq!(visible[1]["depth"], 1);

        let roots: serde_json::Value = serde_json::from_str(&editor.root_nodes().unwrap()).unwrap();
        assert_eq!(roots[0]["children"][0]["id"], "t");
        assert_eq!(roots[0]["children"][0]["isVisible"], true);
    }

    #[test]
    fn test_precompile_and_ui_flags() {
        let mut editor = editor();
        assert!(editor.precompile_styles().unwrap());

        let component: serde_json::Value =
            serde_json::from_str(&editor.get_component("box").unwrap()).unwrap();
        assert_eq!(component["className"], "flex");

        editor.set_device("tablet").unwrap();
        editor.set_dragging(true);
        let ui: serde_json::Value = serde_json::from_str(&editor.ui_state().unwrap()).unwrap();
        assert_eq!(ui["device"], "tablet");
        assert_eq!(ui["isDragging"], true);
        assert!(editor.set_device("watch").is_err());
    }

    #[test]
    fn test_custom_registry() {
        let mut editor =
            Editor::with_registry(r#"[{ "type": "hero", "displayName": "Hero", "canHaveChildren": true }]"#)
                .unwrap();
        editor.load_page("[]").unwrap();

        let hero = editor.add_component("hero", None, None).unwrap();
        editor.add_component("text", Some(hero), None).unwrap();
        assert_eq!(editor.undo_label().as_deref(), Some("Insert text"));
    }
}
