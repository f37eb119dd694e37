//! Fixed categorical domains used for grouping and highlighting

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::record::Record;

/// A closed, ordered categorical field of a [`Record`].
///
/// `DOMAIN` fixes both the set of keys and their display order, so grouped
/// output always has the same rows in the same order.
pub trait Category: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every value of the category, in display order
    const DOMAIN: &'static [Self];

    /// Read this category from a record
    fn of(record: &Record) -> Self;

    /// Short code as it appears in the dataset
    fn code(self) -> &'static str;

    /// Human readable label
    fn label(self) -> &'static str;

    /// Position in [`Category::DOMAIN`]
    fn index(self) -> usize;
}

/// Seniority of the employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "EN")]
    Entry,
    #[serde(rename = "MI")]
    Mid,
    #[serde(rename = "SE")]
    Senior,
    #[serde(rename = "EX")]
    Executive,
}

impl Category for ExperienceLevel {
    const DOMAIN: &'static [Self] = &[Self::Entry, Self::Mid, Self::Senior, Self::Executive];

    fn of(record: &Record) -> Self {
        record.experience_level
    }

    fn code(self) -> &'static str {
        match self {
            Self::Entry => "EN",
            Self::Mid => "MI",
            Self::Senior => "SE",
            Self::Executive => "EX",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Entry => "Entry",
            Self::Mid => "Mid",
            Self::Senior => "Senior",
            Self::Executive => "Executive",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Size bucket of the employing company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CompanySize {
    #[serde(rename = "S")]
    Small,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
}

impl Category for CompanySize {
    const DOMAIN: &'static [Self] = &[Self::Small, Self::Medium, Self::Large];

    fn of(record: &Record) -> Self {
        record.company_size
    }

    fn code(self) -> &'static str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Look a category up by its dataset code
fn parse_code<C: Category>(code: &str) -> Result<C, FilterError> {
    let trimmed = code.trim();
    C::DOMAIN
        .iter()
        .copied()
        .find(|c| c.code() == trimmed)
        .ok_or_else(|| FilterError::UnknownCategory(code.to_string()))
}

impl FromStr for ExperienceLevel {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s)
    }
}

impl FromStr for CompanySize {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s)
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
