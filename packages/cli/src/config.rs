use anyhow::Context;
use pagecraft_editor::{DeviceProfile, SessionConfig};
use pagecraft_registry::StaticRegistry;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Maximum undo levels kept while applying edits
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// JSON file with extra component types, relative to the config
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,

    /// Device profile new sessions start on
    #[serde(default)]
    pub default_device: DeviceProfile,
}

fn default_history_limit() -> usize {
    100
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            debug!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_history_limit(self.history_limit)
            .with_default_device(self.default_device)
    }

    /// Built-in registry, extended with the configured custom types
    pub fn load_registry(&self, cwd: &str) -> anyhow::Result<StaticRegistry> {
        let mut registry = StaticRegistry::builtin();

        if let Some(path) = &self.registry {
            let path = PathBuf::from(cwd).join(path);
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Cannot read registry {}", path.display()))?;
            let custom = StaticRegistry::from_json(&content)
                .with_context(|| format!("Invalid registry {}", path.display()))?;
            registry.extend(custom.into_configs());
        }

        Ok(registry)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            registry: None,
            default_device: DeviceProfile::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_registry::ComponentRegistry;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "historyLimit": 20,
            "registry": "components.json",
            "defaultDevice": "mobile"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.registry, Some("components.json".to_string()));
        assert_eq!(config.default_device, DeviceProfile::Mobile);

        let session = config.session_config();
        assert_eq!(session.history_limit, 20);
        assert_eq!(session.default_device, DeviceProfile::Mobile);
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.default_device, DeviceProfile::Desktop);
    }

    #[test]
    fn test_load_custom_registry() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("components.json"),
            r#"[{ "type": "hero", "displayName": "Hero", "canHaveChildren": true }]"#,
        )
        .unwrap();

        let config = Config {
            registry: Some("components.json".to_string()),
            ..Config::default()
        };
        let cwd = dir.path().display().to_string();
        let registry = config.load_registry(&cwd).unwrap();

        assert!(registry.can_have_children("hero").unwrap());
        assert!(registry.get_config("text").is_some());
    }

    #[test]
    fn test_missing_registry_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            registry: Some("missing.json".to_string()),
            ..Config::default()
        };

        assert!(config.load_registry(&dir.path().display().to_string()).is_err());
    }
}
