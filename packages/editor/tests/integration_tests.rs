//! End-to-end editing scenarios

use pagecraft_common::{count_nodes, Component, MovePosition, PageRef};
use pagecraft_editor::{EditorError, EditorSession, TreeError, TreeManager};
use pagecraft_registry::{ComponentConfig, ComponentRegistry, StaticRegistry};
use std::sync::Arc;

fn loaded_session() -> EditorSession {
    let mut session = EditorSession::new(Arc::new(StaticRegistry::builtin()));
    session
        .load_page(PageRef::new("home", "Home"), Vec::new())
        .unwrap();
    session
}

fn root_ids(tree: &TreeManager) -> Vec<&str> {
    tree.roots().iter().map(String::as_str).collect()
}

#[test]
fn test_insert_nested_then_delete_container() {
    let mut session = loaded_session();

    let c1 = session.add_component("container", None, None).unwrap();
    session.add_component("text", Some(&c1), None).unwrap();

    let roots = session.root_nodes().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].id(), c1);
    assert_eq!(roots[0].children.len(), 1);

    let removed = session.delete_component(&c1).unwrap();
    assert_eq!(removed.len(), 2);
    assert!(session.root_nodes().unwrap().is_empty());
}

#[test]
fn test_reorder_roots_before_and_after() {
    let registry = StaticRegistry::builtin();
    let mut tree = TreeManager::new(
        vec![
            Component::new("A", "text"),
            Component::new("B", "text"),
            Component::new("C", "text"),
        ],
        None,
    )
    .unwrap();

    tree.move_node(&registry, "B", "A", MovePosition::Before).unwrap();
    assert_eq!(root_ids(&tree), vec!["B", "A", "C"]);

    tree.move_node(&registry, "B", "C", MovePosition::After).unwrap();
    assert_eq!(root_ids(&tree), vec!["A", "C", "B"]);
}

#[test]
fn test_move_into_own_child_is_rejected() {
    let registry = StaticRegistry::builtin();
    let mut tree = TreeManager::new(
        vec![Component::new("P", "container").with_child(Component::new("X", "container"))],
        None,
    )
    .unwrap();
    let before = tree.to_flat_array();

    let err = tree
        .move_node(&registry, "P", "X", MovePosition::Inside)
        .unwrap_err();

    assert_eq!(
        err,
        TreeError::Cycle {
            drag_id: "P".to_string(),
            target_id: "X".to_string(),
        }
    );
    assert_eq!(tree.to_flat_array(), before);
    assert_eq!(tree.children_of("P"), ["X".to_string()]);
    assert!(tree.children_of("X").is_empty());
}

#[test]
fn test_undo_three_redo_two() {
    let mut session = loaded_session();

    let mut states = Vec::new();
    for _ in 0..5 {
        session.add_component("text", None, None).unwrap();
        states.push(session.components().unwrap());
    }

    for _ in 0..3 {
        assert!(session.undo().unwrap());
    }
    assert_eq!(session.components().unwrap().len(), 2);

    for _ in 0..2 {
        assert!(session.redo().unwrap());
    }
    let components = session.components().unwrap();
    assert_eq!(components.len(), 4);
    assert_eq!(components, states[3]);
}

#[test]
fn test_insert_into_leaf_type_is_rejected() {
    let mut registry = StaticRegistry::builtin();
    registry.register(ComponentConfig::new("leaf", "Leaf"));
    assert!(!registry.can_have_children("leaf").unwrap());

    let mut session = EditorSession::new(Arc::new(registry));
    session
        .load_page(PageRef::new("p", "P"), Vec::new())
        .unwrap();

    let leaf = session.add_component("leaf", None, None).unwrap();
    let before = count_nodes(&session.components().unwrap());

    let err = session.add_component("leaf", Some(&leaf), None).unwrap_err();
    assert!(matches!(err, EditorError::Tree(TreeError::NotContainer(id)) if id == leaf));
    assert_eq!(count_nodes(&session.components().unwrap()), before);
}

#[test]
fn test_expansion_survives_rebuild_with_carried_state() {
    let registry = StaticRegistry::builtin();
    let mut tree = TreeManager::new(
        vec![Component::new("box", "container").with_child(Component::new("t", "text"))],
        None,
    )
    .unwrap();

    assert!(tree.toggle_expanded("box").unwrap());

    // Structural edit elsewhere, rebuilt from the flat array
    let mut components = tree.to_flat_array();
    components.push(Component::new("sibling", "text"));
    let rebuilt = TreeManager::new(components, Some(tree.expanded_state())).unwrap();
    rebuilt.validate(&registry).unwrap();

    assert!(rebuilt.is_expanded("box"));
    assert_eq!(rebuilt.visible_nodes().len(), 3);
}

#[test]
fn test_session_set_components_carries_expansion() {
    let mut session = loaded_session();
    let container = session.add_component("container", None, None).unwrap();
    session.add_component("text", Some(&container), None).unwrap();
    session.toggle_expanded(&container).unwrap();

    let mut components = session.components().unwrap();
    components.push(Component::new("other", "divider"));
    assert!(session.set_components(components).unwrap());

    assert!(session.tree().unwrap().is_expanded(&container));
    assert_eq!(session.visible_nodes().unwrap().len(), 3);
}

#[test]
fn test_load_flat_page() {
    let json = r#"[
        { "id": "root", "type": "container" },
        { "id": "child", "type": "text", "parentId": "root" },
        { "id": "orphan", "type": "text", "parentId": "missing" }
    ]"#;
    let components: Vec<Component> = serde_json::from_str(json).unwrap();

    let mut session = EditorSession::new(Arc::new(StaticRegistry::builtin()));
    session
        .load_page(PageRef::new("flat", "Flat"), components)
        .unwrap();

    assert_eq!(session.path("child").unwrap(), vec!["root", "child"]);
    assert_eq!(session.root_nodes().unwrap().len(), 2);
    assert!(!session.can_undo());
}

#[test]
fn test_load_rejects_invalid_pages() {
    let mut session = EditorSession::new(Arc::new(StaticRegistry::builtin()));

    let duplicate = vec![Component::new("a", "text"), Component::new("a", "text")];
    assert!(matches!(
        session.load_page(PageRef::new("p", "P"), duplicate),
        Err(EditorError::Tree(TreeError::DuplicateId(_)))
    ));

    let unknown = vec![Component::new("a", "carousel")];
    assert!(matches!(
        session.load_page(PageRef::new("p", "P"), unknown),
        Err(EditorError::Tree(TreeError::UnknownComponentType(_)))
    ));

    let leaf_parent = vec![Component::new("a", "text").with_child(Component::new("b", "text"))];
    assert!(matches!(
        session.load_page(PageRef::new("p", "P"), leaf_parent),
        Err(EditorError::Tree(TreeError::NotContainer(_)))
    ));
}
