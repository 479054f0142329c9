//! # Editor Session
//!
//! Owns the one authoritative [`TreeManager`] for the open page and
//! everything that hangs off it: history, selection, hover, UI flags and
//! the style precompiler.
//!
//! ```text
//! Idle ──load_page──▶ Loaded (history = [initial], cursor = 0)
//!                       │  insert/update/delete/move → push snapshot
//!                       │  undo/redo                 → move cursor, rebuild tree
//!                       │  load_page                 → reset history
//!                       └──close_page──▶ Idle
//! ```
//!
//! Every edit either commits fully or returns an error with the session
//! unchanged. Selection and hover are re-checked against the tree after
//! each commit and cleared if their node is gone.

use crate::config::SessionConfig;
use crate::errors::{EditorError, TreeError};
use crate::history::History;
use crate::mutations::{Mutation, MutationResult};
use crate::tree::TreeManager;
use crate::ui_state::{DeviceProfile, UiState};
use crate::view::{TreeNode, VisibleNode};
use pagecraft_common::{Component, ComponentPatch, IDGenerator, MovePosition, Page, PageRef};
use pagecraft_compiler_css::StylePrecompiler;
use pagecraft_registry::ComponentRegistry;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Session-level lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No page loaded
    Idle,

    /// A tree is present and editable
    Loaded,
}

struct OpenPage {
    page: PageRef,
    tree: TreeManager,
}

/// Editor state for one open page
pub struct EditorSession {
    registry: Arc<dyn ComponentRegistry>,
    config: SessionConfig,
    open: Option<OpenPage>,
    history: History,
    selected: Option<String>,
    hovered: Option<String>,
    ui: UiState,
    ids: IDGenerator,
    precompiler: StylePrecompiler,
}

impl EditorSession {
    pub fn new(registry: Arc<dyn ComponentRegistry>) -> Self {
        Self::with_config(registry, SessionConfig::default())
    }

    pub fn with_config(registry: Arc<dyn ComponentRegistry>, config: SessionConfig) -> Self {
        Self {
            registry,
            history: History::with_max_entries(config.history_limit),
            ui: UiState::new(config.default_device),
            config,
            open: None,
            selected: None,
            hovered: None,
            ids: IDGenerator::new(""),
            precompiler: StylePrecompiler::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        match self.open {
            Some(_) => SessionState::Loaded,
            None => SessionState::Idle,
        }
    }

    pub fn registry(&self) -> &Arc<dyn ComponentRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // ---------------------------------------------------------------------
    // Page lifecycle
    // ---------------------------------------------------------------------

    /// Load a page, replacing whatever was open
    ///
    /// History is reset to a single snapshot of the loaded tree. On error
    /// the previously open page stays open.
    #[instrument(skip(self, page, components), fields(page = %page.id, components = components.len()))]
    pub fn load_page(
        &mut self,
        page: PageRef,
        components: Vec<Component>,
    ) -> Result<(), EditorError> {
        let tree = TreeManager::new(components, None)?;
        tree.validate(self.registry.as_ref())?;

        self.history.reset(tree.to_flat_array());
        self.ids = IDGenerator::new(&page.id);
        self.precompiler.clear_cache();
        self.selected = None;
        self.hovered = None;

        debug!("Loaded page with {} nodes", tree.len());
        self.open = Some(OpenPage { page, tree });
        Ok(())
    }

    /// Load a page record
    pub fn open(&mut self, page: Page) -> Result<(), EditorError> {
        let page_ref = page.page_ref();
        self.load_page(page_ref, page.components)
    }

    /// Close the current page and return to `Idle`
    pub fn close_page(&mut self) {
        self.open = None;
        self.history.clear();
        self.precompiler.clear_cache();
        self.selected = None;
        self.hovered = None;
    }

    pub fn page(&self) -> Option<&PageRef> {
        self.open.as_ref().map(|open| &open.page)
    }

    /// Current page as a persistable record
    pub fn to_page(&self) -> Result<Page, EditorError> {
        let open = self.open.as_ref().ok_or(EditorError::NoPageLoaded)?;
        Ok(Page {
            id: open.page.id.clone(),
            name: open.page.name.clone(),
            components: open.tree.to_flat_array(),
        })
    }

    pub fn tree(&self) -> Result<&TreeManager, EditorError> {
        self.open
            .as_ref()
            .map(|open| &open.tree)
            .ok_or(EditorError::NoPageLoaded)
    }

    fn tree_mut(&mut self) -> Result<&mut TreeManager, EditorError> {
        self.open
            .as_mut()
            .map(|open| &mut open.tree)
            .ok_or(EditorError::NoPageLoaded)
    }

    // ---------------------------------------------------------------------
    // Edits
    // ---------------------------------------------------------------------

    /// Insert a component (with its children), returning its id
    ///
    /// Every node in the subtree gets a fresh id, and unnamed nodes take the
    /// display name of their type.
    pub fn insert_component(
        &mut self,
        mut component: Component,
        parent_id: Option<&str>,
        index: Option<usize>,
    ) -> Result<String, EditorError> {
        self.prepare_insert(&mut component, IdPolicy::Fresh)?;
        let id = component.id.clone();

        self.commit(&Mutation::Insert {
            component,
            parent_id: parent_id.map(str::to_string),
            index,
        })?;
        Ok(id)
    }

    /// Insert a registry default of `component_type`
    pub fn add_component(
        &mut self,
        component_type: &str,
        parent_id: Option<&str>,
        index: Option<usize>,
    ) -> Result<String, EditorError> {
        let component = self.registry.instantiate(component_type)?;
        self.insert_component(component, parent_id, index)
    }

    pub fn update_component(&mut self, id: &str, patch: ComponentPatch) -> Result<(), EditorError> {
        self.commit(&Mutation::Update {
            id: id.to_string(),
            patch,
        })
        .map(|_| ())
    }

    /// Delete a component and its subtree, returning the removed ids
    pub fn delete_component(&mut self, id: &str) -> Result<Vec<String>, EditorError> {
        self.commit(&Mutation::Delete { id: id.to_string() })
            .map(|result| result.removed_ids)
    }

    pub fn move_component(
        &mut self,
        drag_id: &str,
        target_id: &str,
        position: MovePosition,
    ) -> Result<(), EditorError> {
        self.commit(&Mutation::Move {
            drag_id: drag_id.to_string(),
            target_id: target_id.to_string(),
            position,
        })
        .map(|_| ())
    }

    /// Apply a serialized mutation
    ///
    /// Inserted nodes keep their id when it is non-empty and unused, so later
    /// mutations in the same script can refer to them. Other ids are replaced
    /// and unnamed nodes are named as in `insert_component`.
    pub fn apply(&mut self, mut mutation: Mutation) -> Result<MutationResult, EditorError> {
        if let Mutation::Insert { component, .. } = &mut mutation {
            self.prepare_insert(component, IdPolicy::KeepUnique)?;
        }
        self.commit(&mutation)
    }

    /// Replace the whole tree, keeping expansion for surviving ids
    ///
    /// Returns whether a history entry was added.
    pub fn set_components(&mut self, components: Vec<Component>) -> Result<bool, EditorError> {
        self.replace_tree(components, "Replace components")
    }

    #[instrument(skip(self, mutation), fields(op = mutation.name()))]
    fn commit(&mut self, mutation: &Mutation) -> Result<MutationResult, EditorError> {
        let registry = self.registry.clone();
        let expand_inserted = self.config.expand_inserted;
        let tree = self.tree_mut()?;

        let result = mutation.apply(tree, registry.as_ref())?;

        if expand_inserted {
            if let Mutation::Insert { component, .. } = mutation {
                tree.expand_to(&component.id)?;
            }
        }

        self.history
            .push(result.components.clone(), Some(mutation.label()));
        self.revalidate_selection();
        Ok(result)
    }

    fn replace_tree(&mut self, components: Vec<Component>, label: &str) -> Result<bool, EditorError> {
        let expanded = self.tree()?.expanded_state();
        let tree = TreeManager::new(components, Some(expanded))?;
        tree.validate(self.registry.as_ref())?;

        let snapshot = tree.to_flat_array();
        if let Some(open) = &mut self.open {
            open.tree = tree;
        }

        let pushed = self.history.push(snapshot, Some(label.to_string()));
        self.revalidate_selection();
        Ok(pushed)
    }

    /// Give every node in `component` a usable id
    fn prepare_insert(&mut self, component: &mut Component, policy: IdPolicy) -> Result<(), EditorError> {
        let open = self.open.as_ref().ok_or(EditorError::NoPageLoaded)?;
        let mut prepare = PrepareInsert {
            tree: &open.tree,
            registry: self.registry.as_ref(),
            ids: &mut self.ids,
            used: HashSet::new(),
            policy,
        };
        prepare.visit(component);
        Ok(())
    }

    fn revalidate_selection(&mut self) {
        let Some(open) = &self.open else {
            self.selected = None;
            self.hovered = None;
            return;
        };

        if self.selected.as_deref().is_some_and(|id| !open.tree.contains(id)) {
            self.selected = None;
        }
        if self.hovered.as_deref().is_some_and(|id| !open.tree.contains(id)) {
            self.hovered = None;
        }
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    /// Step back one history entry. Returns false if there was nothing to undo.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        self.tree()?;
        if self.history.is_batching() {
            self.history.end_batch();
        }

        match self.history.undo() {
            Some(snapshot) => {
                self.restore((*snapshot).clone())?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Step forward one history entry. Returns false if there was nothing to redo.
    #[instrument(skip(self))]
    pub fn redo(&mut self) -> Result<bool, EditorError> {
        self.tree()?;
        if self.history.is_batching() {
            self.history.end_batch();
        }

        match self.history.redo() {
            Some(snapshot) => {
                self.restore((*snapshot).clone())?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Rebuild the tree from a snapshot. Expansion is not carried.
    fn restore(&mut self, snapshot: Vec<Component>) -> Result<(), EditorError> {
        let tree = TreeManager::new(snapshot, None)?;
        debug!("Restored snapshot at cursor {}", self.history.cursor());
        if let Some(open) = &mut self.open {
            open.tree = tree;
        }
        self.revalidate_selection();
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.open.is_some() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.open.is_some() && self.history.can_redo()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }

    /// Group the following edits into one undo step
    pub fn begin_batch(&mut self, label: impl Into<String>) -> Result<(), EditorError> {
        self.tree()?;
        self.history.begin_batch(Some(label.into()));
        Ok(())
    }

    /// Close the current batch; returns whether a history entry was added
    pub fn end_batch(&mut self) -> Result<bool, EditorError> {
        self.tree()?;
        Ok(self.history.end_batch())
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    /// Select a node, or clear the selection with `None`
    pub fn select(&mut self, id: Option<&str>) -> Result<(), EditorError> {
        let tree = self.tree()?;
        if let Some(id) = id {
            if !tree.contains(id) {
                return Err(TreeError::NotFound(id.to_string()).into());
            }
        }
        self.selected = id.map(str::to_string);
        Ok(())
    }

    /// Set the hovered node. Unknown ids clear the hover.
    pub fn set_hovered(&mut self, id: Option<&str>) -> Result<(), EditorError> {
        let tree = self.tree()?;
        self.hovered = id.filter(|id| tree.contains(id)).map(str::to_string);
        Ok(())
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_component(&self) -> Option<Component> {
        let id = self.selected.as_deref()?;
        self.open.as_ref()?.tree.get(id)
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    pub fn root_nodes(&self) -> Result<Vec<TreeNode>, EditorError> {
        Ok(self.tree()?.root_nodes())
    }

    pub fn visible_nodes(&self) -> Result<Vec<VisibleNode>, EditorError> {
        Ok(self.tree()?.visible_nodes())
    }

    pub fn get_component(&self, id: &str) -> Result<Component, EditorError> {
        self.tree()?
            .get(id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()).into())
    }

    /// Ids from the root down to `id`
    pub fn path(&self, id: &str) -> Result<Vec<String>, EditorError> {
        self.tree()?
            .path(id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()).into())
    }

    /// The whole tree in its nested serialized form
    pub fn components(&self) -> Result<Vec<Component>, EditorError> {
        Ok(self.tree()?.to_flat_array())
    }

    /// Flip a node's expansion. Not recorded in history.
    pub fn toggle_expanded(&mut self, id: &str) -> Result<bool, EditorError> {
        Ok(self.tree_mut()?.toggle_expanded(id)?)
    }

    pub fn expand_all(&mut self) -> Result<(), EditorError> {
        self.tree_mut()?.expand_all();
        Ok(())
    }

    pub fn collapse_all(&mut self) -> Result<(), EditorError> {
        self.tree_mut()?.collapse_all();
        Ok(())
    }

    // ---------------------------------------------------------------------
    // UI flags
    // ---------------------------------------------------------------------

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn set_preview_mode(&mut self, preview_mode: bool) {
        self.ui.preview_mode = preview_mode;
    }

    pub fn toggle_preview_mode(&mut self) -> bool {
        self.ui.preview_mode = !self.ui.preview_mode;
        self.ui.preview_mode
    }

    pub fn set_device(&mut self, device: DeviceProfile) {
        self.ui.device = device;
    }

    pub fn set_dragging(&mut self, is_dragging: bool) {
        self.ui.is_dragging = is_dragging;
    }

    // ---------------------------------------------------------------------
    // Style precompilation
    // ---------------------------------------------------------------------

    /// Attach class names to every node as one undoable step
    ///
    /// Returns false when every class name was already current.
    #[instrument(skip(self))]
    pub fn precompile_styles(&mut self) -> Result<bool, EditorError> {
        let mut components = self.tree()?.to_flat_array();
        self.precompiler.precompile_in_place(&mut components);
        self.replace_tree(components, "Precompile styles")
    }
}

/// How caller-supplied ids are treated on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdPolicy {
    /// Every node gets a generated id
    Fresh,
    /// Keep ids that are non-empty and not taken
    KeepUnique,
}

struct PrepareInsert<'a> {
    tree: &'a TreeManager,
    registry: &'a dyn ComponentRegistry,
    ids: &'a mut IDGenerator,
    used: HashSet<String>,
    policy: IdPolicy,
}

impl PrepareInsert<'_> {
    fn visit(&mut self, component: &mut Component) {
        let keep = self.policy == IdPolicy::KeepUnique
            && !component.id.is_empty()
            && !self.tree.contains(&component.id)
            && !self.used.contains(&component.id);

        if !keep {
            let (tree, used) = (self.tree, &self.used);
            component.id = self.ids.new_unique_id(|id| tree.contains(id) || used.contains(id));
        }
        self.used.insert(component.id.clone());

        // Unknown types are left for the tree to reject
        if component.name.is_none() {
            if let Some(config) = self.registry.get_config(&component.component_type) {
                component.name = Some(config.display_name.clone());
            }
        }

        for child in &mut component.children {
            self.visit(child);
        }
    }
}
