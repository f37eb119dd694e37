//! Missing-value markers for dataset cells

use serde::{Deserialize, Serialize};

/// Which raw cell values count as missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NullConfig {
    /// Markers treated as missing
    pub markers: Vec<String>,

    /// Whether to trim whitespace before checking
    pub trim_whitespace: bool,

    /// Case sensitive matching
    pub case_sensitive: bool,
}

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            markers: ["", "-", "N/A", "NA", "null", "None", "NaN"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            trim_whitespace: true,
            case_sensitive: false,
        }
    }
}

impl NullConfig {
    /// Check if a cell should be treated as missing
    pub fn is_null(&self, value: &str) -> bool {
        let value = if self.trim_whitespace { value.trim() } else { value };

        self.markers.iter().any(|marker| {
            if self.case_sensitive {
                value == marker
            } else {
                value.eq_ignore_ascii_case(marker)
            }
        })
    }

    /// The cell with nulls mapped to `None`
    pub fn cell<'a>(&self, value: &'a str) -> Option<&'a str> {
        if self.is_null(value) {
            None
        } else if self.trim_whitespace {
            Some(value.trim())
        } else {
            Some(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_markers() {
        let config = NullConfig::default();
        assert!(config.is_null(""));
        assert!(config.is_null("  n/a "));
        assert!(config.is_null("NULL"));
        assert!(!config.is_null("0"));
        assert_eq!(config.cell(" 2022 "), Some("2022"));
        assert_eq!(config.cell("nan"), None);
    }

    #[test]
    fn test_case_sensitive_markers() {
        let config = NullConfig {
            markers: vec!["NULL".to_string()],
            trim_whitespace: false,
            case_sensitive: true,
        };
        assert!(config.is_null("NULL"));
        assert!(!config.is_null("null"));
        assert!(!config.is_null(" NULL"));
        assert_eq!(config.cell(" 7"), Some(" 7"));
    }
}
