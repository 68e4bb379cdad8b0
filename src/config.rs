use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::Goal;

/// Optional `config.json`. Every field falls back to its default when missing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Symbol printed in front of amounts.
    pub(crate) currency: String,
    /// Database location; defaults to the platform data directory.
    pub(crate) data_file: Option<PathBuf>,
    pub(crate) goals: Vec<Goal>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "R$".to_string(),
            data_file: None,
            goals: Goal::defaults(),
        }
    }
}

impl Config {
    /// Read the config at `path`; a missing file means defaults.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Reading config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("Parsing config JSON in {}", path.display()))?;
        for goal in &config.goals {
            goal.validate()
                .with_context(|| format!("Invalid goal in {}", path.display()))?;
        }
        Ok(config)
    }
}

/// Where the database, log and config live for this user.
pub(crate) struct AppDirs {
    pub(crate) data_dir: PathBuf,
    pub(crate) config_file: PathBuf,
}

impl AppDirs {
    pub(crate) fn locate() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "roxbudget", "RoxBudget")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let data_dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(Self {
            data_dir,
            config_file: proj_dirs.config_dir().join("config.json"),
        })
    }

    pub(crate) fn db_path(&self, config: &Config) -> PathBuf {
        config
            .data_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("roxbudget.db"))
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join("roxbudget.log")
    }
}
