use thiserror::Error;

use crate::dimension::Dimension;

/// Reasons an interaction is rejected.
///
/// A rejected interaction leaves the filter state untouched and publishes
/// nothing to the views.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("inverted range on {dimension}: {min} > {max}")]
    InvertedRange {
        dimension: Dimension,
        min: f64,
        max: f64,
    },

    #[error("non-finite bound on {0}")]
    NonFiniteBound(Dimension),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

/// Engine settings that cannot produce usable axes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("axis_height must be a positive number, got {0}")]
    InvalidAxisHeight(f64),

    #[error("salary_padding_ratio must be finite and non-negative, got {0}")]
    InvalidPaddingRatio(f64),
}
