//! Page records: the persisted form of one page's component tree.

use crate::component::Component;
use crate::result::CommonResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reference to the page an editor session has open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRef {
    pub id: String,

    #[serde(default)]
    pub name: String,
}

impl PageRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A page and its ordered root components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub components: Vec<Component>,
}

impl Page {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            components: Vec::new(),
        }
    }

    pub fn page_ref(&self) -> PageRef {
        PageRef::new(self.id.clone(), self.name.clone())
    }

    /// Parse a page from JSON text
    ///
    /// A bare component array is accepted too; the page then gets an id
    /// of "untitled".
    pub fn from_json(json: &str) -> CommonResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_array() {
            let components: Vec<Component> = serde_json::from_value(value)?;
            return Ok(Self {
                id: "untitled".to_string(),
                name: "Untitled".to_string(),
                components,
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Load a page from a JSON file
    pub fn load(path: &Path) -> CommonResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Write the page to a JSON file (pretty-printed)
    pub fn save(&self, path: &Path) -> CommonResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
