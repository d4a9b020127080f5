//! CLI configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gradebook_core::DEFAULT_WEIGHT;

/// Top-level gradebook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradebookConfig {
    /// Threshold (percent) used by low-performer reports when none is given.
    #[serde(default = "default_threshold")]
    pub low_performer_threshold: f64,
    /// Weight used by the menu when the weight prompt is left blank.
    #[serde(default = "default_weight")]
    pub default_weight: f64,
    /// Roster file or directory preloaded by `shell` and `report`.
    #[serde(default)]
    pub roster: Option<PathBuf>,
}

fn default_threshold() -> f64 {
    60.0
}
fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            low_performer_threshold: default_threshold(),
            default_weight: default_weight(),
            roster: None,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `gradebook.toml` in the current directory
/// 2. `~/.config/gradebook/config.toml`
///
/// Environment variable override: `GRADEBOOK_THRESHOLD`.
pub fn load_config_from(path: Option<&Path>) -> Result<GradebookConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradebook.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<GradebookConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradebookConfig::default(),
    };

    if let Ok(raw) = std::env::var("GRADEBOOK_THRESHOLD") {
        match raw.trim().parse::<f64>() {
            Ok(threshold) => config.low_performer_threshold = threshold,
            Err(_) => tracing::warn!("ignoring GRADEBOOK_THRESHOLD={raw:?}: not a number"),
        }
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GradebookConfig::default();
        assert_eq!(config.low_performer_threshold, 60.0);
        assert_eq!(config.default_weight, 1.0);
        assert!(config.roster.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let config: GradebookConfig = toml::from_str(
            r#"
low_performer_threshold = 75.0
roster = "rosters/fall.toml"
"#,
        )
        .unwrap();
        assert_eq!(config.low_performer_threshold, 75.0);
        assert_eq!(config.default_weight, 1.0);
        assert_eq!(config.roster, Some(PathBuf::from("rosters/fall.toml")));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("no/such/gradebook.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "default_weight = 2.5\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_weight, 2.5);
    }

    #[test]
    fn threshold_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradebook.toml");
        std::fs::write(&path, "low_performer_threshold = 50.0\n").unwrap();

        std::env::set_var("GRADEBOOK_THRESHOLD", "82.5");
        let config = load_config_from(Some(&path));
        std::env::remove_var("GRADEBOOK_THRESHOLD");

        assert_eq!(config.unwrap().low_performer_threshold, 82.5);
    }

    #[test]
    fn malformed_config_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "low_performer_threshold = \"high\"\n").unwrap();

        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("broken.toml"));
    }
}
