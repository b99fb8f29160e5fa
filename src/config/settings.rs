use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CachetteError, Result};
use crate::vault::WriteMode;

/// User configuration, loaded from `.cachette.toml`.
///
/// Every field has a sensible default so Cachette works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Colorize listed entries even without `-S`.
    #[serde(default)]
    pub style: bool,

    /// How the cache file is rewritten (`in-place` or `atomic`).
    #[serde(default)]
    pub write_mode: WriteMode,

    /// Width of the right-aligned key column when listing.
    #[serde(default = "default_key_width")]
    pub key_width: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_key_width() -> usize {
    30
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: false,
            write_mode: WriteMode::default(),
            key_width: default_key_width(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for.
    const FILE_NAME: &'static str = ".cachette.toml";

    /// Load settings from `<dir>/.cachette.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            CachetteError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
