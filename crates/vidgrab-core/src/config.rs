use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MIB: u64 = 1024 * 1024;

/// Content-length thresholds used to infer a coarse quality label.
///
/// A resource is given the highest label whose threshold it strictly exceeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityBuckets {
    pub uhd_4k_bytes: u64,
    pub p1080_bytes: u64,
    pub p720_bytes: u64,
    pub p480_bytes: u64,
    pub p360_bytes: u64,
}

impl Default for QualityBuckets {
    fn default() -> Self {
        Self {
            uhd_4k_bytes: 500 * MIB,
            p1080_bytes: 200 * MIB,
            p720_bytes: 80 * MIB,
            p480_bytes: 30 * MIB,
            p360_bytes: 10 * MIB,
        }
    }
}

/// Size thresholds applied by the classification rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Known content length below this is never a full media resource.
    pub min_media_bytes: u64,
    /// Higher floor for direct files recognized by extension only.
    pub min_direct_file_bytes: u64,
    /// Page-hook blobs must be larger than this to be reported.
    pub min_blob_bytes: u64,
    /// Files smaller than this on Doodstream ad hosts are ad clips.
    pub doodstream_ad_max_bytes: u64,
    pub quality_buckets: QualityBuckets,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_media_bytes: 100_000,
            min_direct_file_bytes: MIB,
            min_blob_bytes: 100_000,
            doodstream_ad_max_bytes: 5 * MIB,
            quality_buckets: QualityBuckets::default(),
        }
    }
}

/// Timing bounds for the pending-exchange correlator (seconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelatorConfig {
    /// A completion event within this age emits the provisional descriptor.
    pub fallback_window_secs: f64,
    /// Pending exchanges older than this are discarded by the sweep.
    pub stale_after_secs: f64,
    /// Interval of the periodic sweep.
    pub sweep_interval_secs: f64,
}

impl Default for CorrelatorConfig {
    fn default() -> Self {
        Self {
            fallback_window_secs: 5.0,
            stale_after_secs: 30.0,
            sweep_interval_secs: 10.0,
        }
    }
}

impl CorrelatorConfig {
    pub fn fallback_window(&self) -> Duration {
        secs(self.fallback_window_secs)
    }

    pub fn stale_after(&self) -> Duration {
        secs(self.stale_after_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        // A zero interval would spin the sweeper.
        secs(self.sweep_interval_secs).max(Duration::from_millis(10))
    }
}

/// Manifest fetch limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
    /// Bodies larger than this are not playlists; the fetch is aborted.
    pub max_body_bytes: u64,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            timeout_secs: 20,
            max_body_bytes: 4 * MIB,
        }
    }
}

/// Global configuration loaded from `~/.config/vidgrab/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub classifier: ClassifierConfig,
    pub correlator: CorrelatorConfig,
    pub manifest: ManifestConfig,
}

fn secs(value: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::from_secs_f64(value)
    } else {
        Duration::ZERO
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vidgrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<EngineConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        let default_cfg = EngineConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir: {}", parent.display()))?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: EngineConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
