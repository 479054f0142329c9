pub mod apply;
pub mod init;
pub mod precompile;
pub mod registry;
pub mod tree;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use precompile::{precompile, PrecompileArgs};
pub use registry::{registry, RegistryArgs};
pub use tree::{tree, TreeArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use pagecraft_common::Page;
use pagecraft_editor::EditorSession;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolve a user-supplied path against the working directory
pub(crate) fn resolve(cwd: &str, path: &str) -> PathBuf {
    PathBuf::from(cwd).join(path)
}

/// Load the config and open `page` in a fresh session
pub(crate) fn open_session(cwd: &str, page: &str) -> Result<EditorSession> {
    let config = Config::load(cwd)?;
    let registry = config.load_registry(cwd)?;

    let path = resolve(cwd, page);
    let page = Page::load(&path).with_context(|| format!("Cannot load {}", path.display()))?;

    let mut session = EditorSession::with_config(Arc::new(registry), config.session_config());
    session
        .open(page)
        .with_context(|| format!("Invalid page {}", path.display()))?;
    Ok(session)
}

/// Write the session's page to `out`, or print it when `out` is None
pub(crate) fn write_page(session: &EditorSession, out: Option<&Path>) -> Result<()> {
    let page = session.to_page()?;
    match out {
        Some(path) => page
            .save(path)
            .with_context(|| format!("Cannot write {}", path.display())),
        None => {
            println!("{}", serde_json::to_string_pretty(&page)?);
            Ok(())
        }
    }
}
