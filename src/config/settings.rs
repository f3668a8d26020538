//! Application settings and paths.
//!
//! Settings come from an explicit `--config` file, else from the XDG config
//! directory if a `settings.json` exists there, else from built-in defaults.

use crate::error::{ConfigError, ConfigResult};
use crate::types::DEFAULT_DISCOVERY_PORTS;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/tandem)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Resolve paths using XDG directories.
    ///
    /// Nothing is created on disk; a missing settings file simply means
    /// defaults apply.
    pub fn resolve() -> ConfigResult<Self> {
        let project =
            ProjectDirs::from("com", "tandem", "tandem").ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the per-target output tree.
    pub scans_root: PathBuf,
    /// Port-discovery executable.
    pub port_scanner: String,
    /// Service-fingerprinting executable.
    pub service_scanner: String,
    /// Ports handed to the discovery tool.
    pub discovery_ports: String,
    /// Where the compiled report is written.
    pub report_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scans_root: PathBuf::from("scans"),
            port_scanner: "naabu".to_string(),
            service_scanner: "nmap".to_string(),
            discovery_ports: DEFAULT_DISCOVERY_PORTS.to_string(),
            report_file: PathBuf::from("compiled_nmap_results.txt"),
        }
    }
}

impl Settings {
    /// Load settings, preferring an explicit file over the XDG location.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        // Without a home directory there is no XDG location to consult.
        let Ok(paths) = Paths::resolve() else {
            return Ok(Self::default());
        };

        let file = paths.settings_file();
        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }
}
