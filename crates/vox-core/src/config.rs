use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::registry::CdnEntry;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per candidate (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.25,
            max_delay_secs: 10,
        }
    }
}

/// Clip cache tuning (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Days a cached clip stays fresh before it is re-fetched.
    pub ttl_days: u32,
    /// Override for the clip body directory (default: XDG cache dir).
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_days: 30,
            dir: None,
        }
    }
}

/// Global configuration loaded from `~/.config/vox/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoxConfig {
    /// CDN registry entries, validated into a `CdnRegistry` at startup.
    /// Empty means local-only mode.
    #[serde(default, rename = "cdn")]
    pub cdns: Vec<CdnEntry>,
    /// Clip cache settings; built-in defaults when the section is missing.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Directory holding local-mode clips (default: `~/.local/share/vox/voices`).
    #[serde(default)]
    pub local_voices_dir: Option<PathBuf>,
    /// Path to the voice manifest JSON (default: `manifest.json` next to the config).
    #[serde(default)]
    pub manifest_path: Option<PathBuf>,
}

impl VoxConfig {
    /// Directory for local-mode clips, resolving the XDG default when unset.
    pub fn voices_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.local_voices_dir {
            return Ok(dir.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("vox")?;
        Ok(xdg_dirs.get_data_home().join("voices"))
    }

    /// Path to the voice manifest, defaulting to `manifest.json` in the config dir.
    pub fn manifest_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.manifest_path {
            return Ok(path.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("vox")?;
        Ok(xdg_dirs.get_config_home().join("manifest.json"))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vox")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VoxConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VoxConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: VoxConfig = toml::from_str(&data)?;
    Ok(cfg)
}
