//! Dataset loading options

use serde::{Deserialize, Serialize};

use super::null_handling::NullConfig;

/// How the salary CSV is read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Missing-value handling
    pub null: NullConfig,

    /// Drop rows with missing or unparsable fields instead of failing the load
    pub skip_invalid_rows: bool,

    /// Field delimiter
    pub delimiter: char,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            null: NullConfig::default(),
            skip_invalid_rows: true,
            delimiter: ',',
        }
    }
}

impl LoadConfig {
    /// Delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b','
        }
    }
}
