use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, YamlVaultError};

/// Project-level configuration, loaded from `.yamlvault.toml`.
///
/// Every field has a sensible default so yamlvault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Explicit path to an `ansible.cfg`, skipping discovery entirely.
    #[serde(default)]
    pub ansible_cfg: Option<String>,

    /// Directories searched (in order) for an `ansible.cfg` when no
    /// explicit path is set. Relative entries resolve against the
    /// directory the settings were loaded from.
    #[serde(default = "default_search_dirs")]
    pub search_dirs: Vec<String>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_search_dirs() -> Vec<String> {
    vec![".".to_string()]
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            ansible_cfg: None,
            search_dirs: default_search_dirs(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".yamlvault.toml";

    /// Load settings from `<base_dir>/.yamlvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let config_path = base_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            YamlVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// The explicit `ansible.cfg` path, if configured, resolved against
    /// `base_dir`.
    pub fn ansible_cfg_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.ansible_cfg
            .as_deref()
            .map(|p| resolve_against(base_dir, p))
    }

    /// The ordered candidate directories for config discovery, resolved
    /// against `base_dir`.
    pub fn candidate_dirs(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.search_dirs
            .iter()
            .map(|d| resolve_against(base_dir, d))
            .collect()
    }
}

fn resolve_against(base_dir: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
