//! Configuration for the wav CLI.
//!
//! Configuration is stored in ~/.giztoy/wav/config.yaml

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use giztoy_wav::BitDepth;
use serde::{Deserialize, Serialize};

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".giztoy";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

const APP_NAME: &str = "wav";

/// Conversion defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Output bit depth used when `--bit-depth` is not given.
    #[serde(default = "default_bit_depth")]
    pub bit_depth: BitDepth,

    /// Frames per buffer used when `--buffer-size` is not given.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Path to the config file (not serialized).
    #[serde(skip)]
    config_path: PathBuf,
}

fn default_bit_depth() -> BitDepth {
    BitDepth::Sixteen
}

fn default_buffer_size() -> usize {
    512
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bit_depth: default_bit_depth(),
            buffer_size: default_buffer_size(),
            config_path: PathBuf::new(),
        }
    }
}

impl Config {
    /// Gets the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| {
            home.join(DEFAULT_BASE_DIR)
                .join(APP_NAME)
                .join(DEFAULT_CONFIG_FILE)
        })
    }

    /// Returns the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Returns true if the config file exists on disk.
    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Saves the configuration to disk, creating its directory.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&self.config_path, content)
            .with_context(|| format!("failed to write {}", self.config_path.display()))?;
        Ok(())
    }
}

/// Resolves the config path from `--config` or the default location.
fn resolve_path(custom_path: Option<&str>) -> anyhow::Result<PathBuf> {
    match custom_path {
        Some(p) => Ok(PathBuf::from(p)),
        None => Config::default_config_path()
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path")),
    }
}

/// Loads the configuration. A missing file yields the defaults.
pub fn load_config(custom_path: Option<&str>) -> anyhow::Result<Config> {
    let config_path = resolve_path(custom_path)?;

    let mut cfg = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        serde_yaml::from_str::<Config>(&content)
            .with_context(|| format!("invalid config {}", config_path.display()))?
    } else {
        Config::default()
    };

    if cfg.buffer_size == 0 {
        anyhow::bail!("buffer_size must be positive");
    }

    cfg.config_path = config_path;
    Ok(cfg)
}
