//! Session-level behavior: selection, hover, history bounds, precompilation

use pagecraft_common::{Component, ComponentPatch, Page, PageRef};
use pagecraft_editor::{DeviceProfile, EditorError, EditorSession, SessionConfig, SessionState, TreeError};
use pagecraft_registry::StaticRegistry;
use std::sync::Arc;

fn page() -> Vec<Component> {
    vec![Component::new("card", "card")
        .with_style("padding", "16px")
        .with_child(Component::new("title", "heading").with_style("fontSize", "24px"))
        .with_child(Component::new("body", "text"))]
}

fn session() -> EditorSession {
    let mut session = EditorSession::new(Arc::new(StaticRegistry::builtin()));
    session.load_page(PageRef::new("home", "Home"), page()).unwrap();
    session
}

#[test]
fn test_select_and_clear_on_delete() {
    let mut session = session();

    session.select(Some("title")).unwrap();
    session.set_hovered(Some("body")).unwrap();
    assert_eq!(session.selected(), Some("title"));
    assert_eq!(session.selected_component().map(|c| c.component_type), Some("heading".to_string()));

    // Deleting an ancestor clears both
    session.delete_component("card").unwrap();
    assert_eq!(session.selected(), None);
    assert_eq!(session.hovered(), None);
}

#[test]
fn test_select_unknown_id_is_rejected() {
    let mut session = session();
    session.select(Some("title")).unwrap();

    let err = session.select(Some("ghost")).unwrap_err();
    assert!(matches!(err, EditorError::Tree(TreeError::NotFound(id)) if id == "ghost"));
    assert_eq!(session.selected(), Some("title"));

    session.select(None).unwrap();
    assert_eq!(session.selected(), None);
}

#[test]
fn test_hover_unknown_id_clears() {
    let mut session = session();
    session.set_hovered(Some("body")).unwrap();
    session.set_hovered(Some("ghost")).unwrap();
    assert_eq!(session.hovered(), None);
}

#[test]
fn test_selection_cleared_when_undo_removes_node() {
    let mut session = session();
    let id = session.add_component("button", Some("card"), None).unwrap();
    session.select(Some(&id)).unwrap();

    session.undo().unwrap();
    assert_eq!(session.selected(), None);
}

#[test]
fn test_history_limit_drops_oldest() {
    let config = SessionConfig::default().with_history_limit(3);
    let mut session = EditorSession::with_config(Arc::new(StaticRegistry::builtin()), config);
    session.load_page(PageRef::new("p", "P"), Vec::new()).unwrap();

    for _ in 0..5 {
        session.add_component("text", None, None).unwrap();
    }

    assert_eq!(session.history().len(), 3);
    assert!(session.undo().unwrap());
    assert!(session.undo().unwrap());
    assert!(!session.undo().unwrap());
    assert_eq!(session.components().unwrap().len(), 3);
}

#[test]
fn test_load_resets_history_and_selection() {
    let mut session = session();
    session.add_component("text", None, None).unwrap();
    session.select(Some("card")).unwrap();

    let mut other = Page::new("about", "About");
    other.components = vec![Component::new("x", "text")];
    session.open(other).unwrap();

    assert_eq!(session.page().map(|p| p.id.as_str()), Some("about"));
    assert!(!session.can_undo());
    assert_eq!(session.selected(), None);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_close_page_returns_to_idle() {
    let mut session = session();
    session.close_page();

    assert_eq!(session.state(), SessionState::Idle);
    assert!(matches!(session.components(), Err(EditorError::NoPageLoaded)));
    assert!(matches!(session.select(None), Err(EditorError::NoPageLoaded)));
    assert!(matches!(session.precompile_styles(), Err(EditorError::NoPageLoaded)));
}

#[test]
fn test_toggle_expanded_is_not_history() {
    let mut session = session();

    assert!(session.toggle_expanded("card").unwrap());
    assert!(!session.toggle_expanded("card").unwrap());
    assert!(!session.can_undo());

    assert!(matches!(
        session.toggle_expanded("ghost"),
        Err(EditorError::Tree(TreeError::NotFound(_)))
    ));
}

#[test]
fn test_visible_nodes_follow_expansion() {
    let mut session = session();
    assert_eq!(session.visible_nodes().unwrap().len(), 1);

    session.expand_all().unwrap();
    let visible = session.visible_nodes().unwrap();
    let ids: Vec<&str> = visible.iter().map(|n| n.id()).collect();
    assert_eq!(ids, vec!["card", "title", "body"]);
    assert_eq!(visible[1].depth, 1);

    session.collapse_all().unwrap();
    assert_eq!(session.visible_nodes().unwrap().len(), 1);
}

#[test]
fn test_precompile_is_one_undoable_step() {
    let mut session = session();

    assert!(session.precompile_styles().unwrap());
    let card = session.get_component("card").unwrap();
    assert_eq!(card.class_name.as_deref(), Some("p-[16px]"));
    assert_eq!(card.children[0].class_name.as_deref(), Some("text-[24px]"));
    assert_eq!(card.children[1].class_name, None);
    assert_eq!(session.undo_label(), Some("Precompile styles"));

    // Nothing changed since, so a second pass adds no entry
    assert!(!session.precompile_styles().unwrap());
    assert_eq!(session.history().len(), 2);

    session.undo().unwrap();
    assert_eq!(session.get_component("card").unwrap().class_name, None);
}

#[test]
fn test_precompile_tracks_style_edits() {
    let mut session = session();
    session.precompile_styles().unwrap();

    session
        .update_component("body", ComponentPatch::new().style("display", "flex"))
        .unwrap();
    assert!(session.precompile_styles().unwrap());

    let body = session.get_component("body").unwrap();
    assert_eq!(body.class_name.as_deref(), Some("flex"));
}

#[test]
fn test_style_edit_drops_stale_class_name() {
    let mut session = session();
    session.precompile_styles().unwrap();

    session
        .update_component("title", ComponentPatch::new().style("fontSize", "32px"))
        .unwrap();

    let title = session.get_component("title").unwrap();
    assert_eq!(title.style["fontSize"], "32px");
    assert_eq!(title.class_name, None);
    let page = session.to_page().unwrap();
    assert_eq!(page.components[0].children[0].class_name, None);

    // Untouched nodes keep theirs
    assert_eq!(session.get_component("card").unwrap().class_name.as_deref(), Some("p-[16px]"));

    assert!(session.precompile_styles().unwrap());
    let title = session.get_component("title").unwrap();
    assert_eq!(title.class_name.as_deref(), Some("text-[32px]"));
}

#[test]
fn test_device_from_config() {
    let config = SessionConfig::default().with_default_device(DeviceProfile::Tablet);
    let mut session = EditorSession::with_config(Arc::new(StaticRegistry::builtin()), config);

    assert_eq!(session.ui().device, DeviceProfile::Tablet);
    session.set_device(DeviceProfile::Custom(1280, 800));
    assert_eq!(session.ui().device.dimensions(), (1280, 800));
}

#[test]
fn test_to_page_round_trip() {
    let mut session = session();
    session.add_component("divider", None, None).unwrap();

    let page = session.to_page().unwrap();
    assert_eq!(page.id, "home");
    assert_eq!(page.components.len(), 2);

    let json = serde_json::to_string(&page).unwrap();
    let reloaded = Page::from_json(&json).unwrap();
    assert_eq!(reloaded, page);
}
