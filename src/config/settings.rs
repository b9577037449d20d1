use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::KdfParams;
use crate::errors::{CookieDeckError, Result};
use crate::share::transport::SHARE_BASE_URL;

/// Project-level configuration, loaded from `.cookiedeck.toml`.
///
/// Every field has a sensible default so CookieDeck works
/// out-of-the-box without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to project root) where the jar, store, and
    /// audit database live.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Base URL for generated share links.
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,

    /// Maximum number of history entries kept (default: 30).
    #[serde(default = "default_history_max_entries")]
    pub history_max_entries: usize,

    /// Maximum cookies recorded per history entry (default: 30).
    #[serde(default = "default_history_max_cookies")]
    pub history_max_cookies: usize,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_kdf_memory_kib")]
    pub kdf_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_kdf_parallelism")]
    pub kdf_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    ".cookiedeck".to_string()
}

fn default_share_base_url() -> String {
    SHARE_BASE_URL.to_string()
}

fn default_history_max_entries() -> usize {
    30
}

fn default_history_max_cookies() -> usize {
    30
}

fn default_kdf_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_kdf_iterations() -> u32 {
    3
}

fn default_kdf_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            share_base_url: default_share_base_url(),
            history_max_entries: default_history_max_entries(),
            history_max_cookies: default_history_max_cookies(),
            kdf_memory_kib: default_kdf_memory_kib(),
            kdf_iterations: default_kdf_iterations(),
            kdf_parallelism: default_kdf_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".cookiedeck.toml";

    /// Load settings from `<project_dir>/.cookiedeck.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            CookieDeckError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// KDF params assembled from the config fields.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            memory_kib: self.kdf_memory_kib,
            iterations: self.kdf_iterations,
            parallelism: self.kdf_parallelism,
        }
    }

    /// Path to the cookie jar file: `<project_dir>/<data_dir>/cookies.json`
    pub fn jar_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir).join("cookies.json")
    }

    /// Path to the key/value store: `<project_dir>/<data_dir>/store.json`
    pub fn store_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir).join("store.json")
    }

    /// Directory holding all CookieDeck state for the project.
    pub fn data_dir_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.data_dir, ".cookiedeck");
        assert_eq!(settings.history_max_entries, 30);
        assert_eq!(settings.kdf_memory_kib, 65_536);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".cookiedeck.toml"),
            "history_max_entries = 5\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.history_max_entries, 5);
        assert_eq!(settings.history_max_cookies, 30);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".cookiedeck.toml"), "history_max_entries = \"many\"").unwrap();
        assert!(Settings::load(dir.path()).is_err());
    }

    #[test]
    fn paths_are_rooted_in_the_data_dir() {
        let settings = Settings::default();
        let base = Path::new("/proj");
        assert_eq!(settings.jar_path(base), Path::new("/proj/.cookiedeck/cookies.json"));
        assert_eq!(settings.store_path(base), Path::new("/proj/.cookiedeck/store.json"));
    }
}
