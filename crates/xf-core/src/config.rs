//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings that shape the engine's axis scales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pixel height of every dimension axis; brush extents are measured in it
    pub axis_height: f64,

    /// Fraction of the salary extent added above and below the data
    pub salary_padding_ratio: f64,

    /// Tick count used when rounding the salary axis
    pub salary_ticks: usize,

    /// Tick count used when rounding the year axis
    pub year_ticks: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            axis_height: 400.0,
            salary_padding_ratio: 0.05,
            salary_ticks: 10,
            year_ticks: 4,
        }
    }
}

impl EngineConfig {
    /// Reject settings that would flip or collapse the axes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.axis_height.is_finite() && self.axis_height > 0.0) {
            return Err(ConfigError::InvalidAxisHeight(self.axis_height));
        }
        if !(self.salary_padding_ratio.is_finite() && self.salary_padding_ratio >= 0.0) {
            return Err(ConfigError::InvalidPaddingRatio(self.salary_padding_ratio));
        }
        Ok(())
    }
}
