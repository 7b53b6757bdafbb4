//! Firewall configuration.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Configuration naming the rule sources of a firewall.
///
/// ```yaml
/// name: edge
/// rule_files:
///   - rules/web.csv
///   - rules/dns.csv.gz
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FirewallConfig {
    /// Name used in logs and statistics
    #[serde(default = "default_name")]
    pub name: String,
    /// CSV rule files, optionally gzip-compressed (`.gz`)
    #[serde(default)]
    pub rule_files: Vec<PathBuf>,
}

fn default_name() -> String {
    "default".to_string()
}

impl FirewallConfig {
    /// Create a new FirewallConfig.
    pub fn new(name: impl Into<String>, rule_files: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            rule_files,
        }
    }

    /// Parse a configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// Relative rule file paths are resolved against the config file's directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&yaml)?;

        if let Some(base) = path.parent() {
            for file in &mut config.rule_files {
                if file.is_relative() {
                    *file = base.join(&*file);
                }
            }
        }

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config("name must not be empty".to_string()));
        }
        if self.rule_files.is_empty() {
            return Err(Error::Config("no rule_files configured".to_string()));
        }
        Ok(())
    }
}

impl Default for FirewallConfig {
    fn default() -> Self {
        Self::new(default_name(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml() {
        let config = FirewallConfig::from_yaml(
            "name: edge\nrule_files:\n  - a.csv\n  - b.csv.gz\n",
        )
        .unwrap();
        assert_eq!(config.name, "edge");
        assert_eq!(
            config.rule_files,
            vec![PathBuf::from("a.csv"), PathBuf::from("b.csv.gz")]
        );
    }

    #[test]
    fn test_default_name() {
        let config = FirewallConfig::from_yaml("rule_files: [rules.csv]\n").unwrap();
        assert_eq!(config.name, "default");
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            FirewallConfig::from_yaml("name: edge\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            FirewallConfig::from_yaml("name: ''\nrule_files: [a.csv]\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            FirewallConfig::from_yaml("rule_files: 12: x"),
            Err(Error::Yaml(_))
        ));
    }

    #[test]
    fn test_from_path_resolves_relative_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("firewall.yml");
        fs::write(&path, "name: local\nrule_files: [rules.csv, /abs/rules.csv]\n").unwrap();

        let config = FirewallConfig::from_path(&path).unwrap();
        assert_eq!(config.rule_files[0], dir.path().join("rules.csv"));
        assert_eq!(config.rule_files[1], PathBuf::from("/abs/rules.csv"));
    }
}
