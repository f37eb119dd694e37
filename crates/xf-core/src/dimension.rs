use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Numeric dimension that can carry a brush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    WorkYear,
    SalaryInUsd,
    RemoteRatio,
}

impl Dimension {
    /// All dimensions, in axis order
    pub const ALL: [Dimension; 3] = [Self::WorkYear, Self::SalaryInUsd, Self::RemoteRatio];

    /// Column name in the dataset
    pub fn name(self) -> &'static str {
        match self {
            Self::WorkYear => "work_year",
            Self::SalaryInUsd => "salary_in_usd",
            Self::RemoteRatio => "remote_ratio",
        }
    }

    /// Axis title
    pub fn label(self) -> &'static str {
        match self {
            Self::WorkYear => "Year",
            Self::SalaryInUsd => "Salary (USD)",
            Self::RemoteRatio => "Remote Ratio (%)",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The record's value on this dimension
    pub fn value(self, record: &Record) -> f64 {
        match self {
            Self::WorkYear => f64::from(record.work_year),
            Self::SalaryInUsd => record.salary_in_usd,
            Self::RemoteRatio => record.remote_ratio,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
