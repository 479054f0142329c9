//! # Pagecraft Editor
//!
//! Component tree engine and editor session for the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ registry: type → defaults + containment     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ tree: index-based structure + invariants    │
//! │  - insert / update / delete / move          │
//! │  - root/visible views, expansion side map   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: history, selection, UI flags       │
//! │  - snapshot per committed edit              │
//! │  - style precompilation as an edit          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Tree is source of truth**: views and snapshots are derived
//! 2. **Validate, then commit**: a failed operation changes nothing
//! 3. **Registry is injected**: no global lookup tables
//! 4. **UI state stays aside**: expansion lives in a side map, not on nodes
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::EditorSession;
//! use pagecraft_registry::StaticRegistry;
//!
//! let mut session = EditorSession::new(Arc::new(StaticRegistry::builtin()));
//! session.load_page(PageRef::new("home", "Home"), components)?;
//!
//! let card = session.add_component("card", None, None)?;
//! session.add_component("text", Some(&card), None)?;
//!
//! session.undo()?;
//! let roots = session.root_nodes()?;
//! ```

mod config;
mod errors;
mod history;
mod mutations;
mod session;
mod tree;
mod ui_state;
mod view;

pub use config::SessionConfig;
pub use errors::{EditorError, TreeError};
pub use history::{History, HistoryEntry, Snapshot};
pub use mutations::{Mutation, MutationResult};
pub use session::{EditorSession, SessionState};
pub use tree::{Deletion, TreeManager};
pub use ui_state::{DeviceProfile, UiState};
pub use view::{TreeNode, VisibleNode};
