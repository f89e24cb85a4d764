use blockmail_editor::DEFAULT_HISTORY_LIMIT;
use blockmail_linter::RuleRegistry;
use blockmail_model::AssetCatalog;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "blockmail.config.json";

/// Blockmail configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Where rendered files go
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Pretty-print rendered HTML
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Asset id → public URL
    #[serde(default)]
    pub assets: AssetCatalog,

    /// Rule ids skipped by `lint` and `fix`
    #[serde(default)]
    pub disabled_rules: Vec<String>,

    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_pretty() -> bool {
    true
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid {}: {}", config_path.display(), e))?;
            debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn get_out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }

    /// Default rules minus the disabled ones
    pub fn registry(&self) -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        for rule_id in &self.disabled_rules {
            if !registry.disable(rule_id) {
                tracing::warn!(rule_id = %rule_id, "Unknown rule in disabledRules");
            }
        }
        registry
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            pretty: default_pretty(),
            assets: AssetCatalog::default(),
            disabled_rules: vec![],
            history_limit: default_history_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "outDir": "build/email",
            "pretty": false,
            "assets": { "logo": "https://cdn.example.com/logo.png" },
            "disabledRules": ["heading-hierarchy"],
            "historyLimit": 20
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.out_dir, "build/email");
        assert!(!config.pretty);
        assert_eq!(config.assets.url_for("asset:logo"), "https://cdn.example.com/logo.png");
        assert_eq!(config.disabled_rules, vec!["heading-hierarchy"]);
        assert_eq!(config.history_limit, 20);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.out_dir, "dist");
        assert!(config.pretty);
        assert!(config.assets.is_empty());
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "outDir": "out" }"#).unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.out_dir, "out");
        assert!(config.pretty);
        assert_eq!(config.get_out_dir(dir.path()), dir.path().join("out"));
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ outDir: ").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn test_registry_skips_disabled_rules() {
        let config = Config {
            disabled_rules: vec!["image-alt-text".to_string(), "no-such-rule".to_string()],
            ..Config::default()
        };
        let registry = config.registry();
        assert!(registry.get("image-alt-text").is_none());
        assert!(registry.get("footer-position").is_some());
    }
}
