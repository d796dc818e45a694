use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ellipsis::PossessiveTable;
use crate::tree::{LOCAL_DOMAIN_LABELS, RESTRICTOR_BARRIER_LABELS, RESTRICTOR_LABELS};

fn labels(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn default_local_domain_labels() -> Vec<String> {
    labels(LOCAL_DOMAIN_LABELS)
}

fn default_restrictor_labels() -> Vec<String> {
    labels(RESTRICTOR_LABELS)
}

fn default_restrictor_barrier_labels() -> Vec<String> {
    labels(RESTRICTOR_BARRIER_LABELS)
}

/// Constituent labels the binding rules key on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    #[serde(default = "default_local_domain_labels")]
    pub local_domain_labels: Vec<String>,
    #[serde(default = "default_restrictor_labels")]
    pub restrictor_labels: Vec<String>,
    #[serde(default = "default_restrictor_barrier_labels")]
    pub restrictor_barrier_labels: Vec<String>,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            local_domain_labels: default_local_domain_labels(),
            restrictor_labels: default_restrictor_labels(),
            restrictor_barrier_labels: default_restrictor_barrier_labels(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BonsaiConfig {
    #[serde(default)]
    pub binding: BindingConfig,
    #[serde(default)]
    pub ellipsis: PossessiveTable,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("bonsai.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<BonsaiConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: BonsaiConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &BonsaiConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bonsai.toml");

        let mut config = BonsaiConfig::default();
        config.ellipsis.entries.insert("Ann".to_string(), "her".to_string());
        write_config(&path, &config, false).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.ellipsis.possessive_for("Ann"), "her");
    }

    #[test]
    fn test_write_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bonsai.toml");
        write_config(&path, &BonsaiConfig::default(), false).unwrap();

        assert!(write_config(&path, &BonsaiConfig::default(), false).is_err());
        assert!(write_config(&path, &BonsaiConfig::default(), true).is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: BonsaiConfig = toml::from_str(
            r#"
            [binding]
            local_domain_labels = ["TP", "CP", "DP"]

            [ellipsis]
            default = "its"
            "#,
        )
        .unwrap();

        assert_eq!(config.binding.local_domain_labels, vec!["TP", "CP", "DP"]);
        assert_eq!(config.binding.restrictor_labels, vec!["CP", "RelCP"]);
        assert_eq!(config.ellipsis.default, "its");
        assert!(config.ellipsis.entries.is_empty());
    }
}
