//! Application configuration

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use xf_core::EngineConfig;
use xf_data::LoadConfig;
use xf_views::ViewStyle;

/// Everything the session runner can be configured with
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub load: LoadConfig,
    pub style: ViewStyle,
    pub frame: FrameConfig,
}

/// Simulated frame clock used when replaying a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Length of one frame in milliseconds
    pub frame_ms: u64,

    /// Upper bound on frames spent settling after one step
    pub max_settle_frames: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            max_settle_frames: 600,
        }
    }
}

impl FrameConfig {
    pub fn frame_secs(&self) -> f32 {
        self.frame_ms as f32 / 1000.0
    }
}

impl AppConfig {
    /// Read a JSON config; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config
            .engine
            .validate()
            .with_context(|| format!("invalid engine settings in {}", path.display()))?;
        Ok(config)
    }
}
