//! Selection state: per-dimension ranges plus one optional category

use serde::{Deserialize, Serialize};

use crate::category::ExperienceLevel;
use crate::dimension::Dimension;
use crate::error::FilterError;
use crate::record::Record;

/// Closed interval on one numeric dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionRange {
    min: f64,
    max: f64,
}

impl DimensionRange {
    /// Validate an ascending, finite pair; `min == max` is an exact-value filter
    pub fn new(dimension: Dimension, min: f64, max: f64) -> Result<Self, FilterError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(FilterError::NonFiniteBound(dimension));
        }
        if min > max {
            return Err(FilterError::InvertedRange { dimension, min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Current selection across all views
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    ranges: [Option<DimensionRange>; 3],
    selected: Option<ExperienceLevel>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the range on `dimension`. On error the state is unchanged.
    pub fn set_range(&mut self, dimension: Dimension, min: f64, max: f64) -> Result<(), FilterError> {
        let range = DimensionRange::new(dimension, min, max)?;
        self.ranges[dimension.index()] = Some(range);
        Ok(())
    }

    pub fn clear_range(&mut self, dimension: Dimension) {
        self.ranges[dimension.index()] = None;
    }

    /// Select `level`, or clear the selection if it is already selected
    pub fn toggle_category(&mut self, level: ExperienceLevel) {
        self.selected = match self.selected {
            Some(current) if current == level => None,
            _ => Some(level),
        };
    }

    pub fn range(&self, dimension: Dimension) -> Option<DimensionRange> {
        self.ranges[dimension.index()]
    }

    pub fn active_ranges(&self) -> impl Iterator<Item = (Dimension, DimensionRange)> + '_ {
        Dimension::ALL
            .iter()
            .filter_map(move |&d| self.ranges[d.index()].map(|r| (d, r)))
    }

    pub fn has_ranges(&self) -> bool {
        self.ranges.iter().any(Option::is_some)
    }

    pub fn selected_category(&self) -> Option<ExperienceLevel> {
        self.selected
    }

    /// Inside every active range. The category selection never takes part.
    pub fn is_member(&self, record: &Record) -> bool {
        self.active_ranges()
            .all(|(dimension, range)| range.contains(dimension.value(record)))
    }

    pub fn is_category_emphasized(&self, level: ExperienceLevel) -> bool {
        self.selected.map_or(true, |selected| selected == level)
    }

    /// Member of the range filter and matching the selected category, if any
    pub fn is_emphasized(&self, record: &Record) -> bool {
        self.is_member(record) && self.is_category_emphasized(record.experience_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CompanySize;

    fn record(level: ExperienceLevel, year: i32, salary: f64, remote: f64) -> Record {
        Record::new(level, CompanySize::Medium, year, salary, remote)
    }

    #[test]
    fn test_empty_state_admits_everything() {
        let state = FilterState::new();
        assert!(!state.has_ranges());
        assert!(state.is_member(&record(ExperienceLevel::Mid, 2020, 0.0, 0.0)));
        assert!(state.is_category_emphasized(ExperienceLevel::Executive));
    }

    #[test]
    fn test_ranges_combine_with_and() {
        let mut state = FilterState::new();
        state.set_range(Dimension::SalaryInUsd, 100_000.0, 200_000.0).unwrap();
        state.set_range(Dimension::RemoteRatio, 50.0, 100.0).unwrap();

        assert!(state.is_member(&record(ExperienceLevel::Senior, 2022, 150_000.0, 100.0)));
        assert!(!state.is_member(&record(ExperienceLevel::Senior, 2023, 160_000.0, 0.0)));
        assert!(!state.is_member(&record(ExperienceLevel::Entry, 2021, 50_000.0, 50.0)));
    }

    #[test]
    fn test_bounds_are_inclusive_and_zero_width_is_exact() {
        let mut state = FilterState::new();
        state.set_range(Dimension::WorkYear, 2022.0, 2022.0).unwrap();
        assert!(state.is_member(&record(ExperienceLevel::Mid, 2022, 1.0, 0.0)));
        assert!(!state.is_member(&record(ExperienceLevel::Mid, 2023, 1.0, 0.0)));
    }

    #[test]
    fn test_set_range_replaces_and_clear_removes() {
        let mut state = FilterState::new();
        state.set_range(Dimension::RemoteRatio, 0.0, 10.0).unwrap();
        state.set_range(Dimension::RemoteRatio, 90.0, 100.0).unwrap();
        assert_eq!(state.range(Dimension::RemoteRatio).map(|r| r.min()), Some(90.0));
        assert_eq!(state.active_ranges().count(), 1);

        state.clear_range(Dimension::RemoteRatio);
        state.clear_range(Dimension::RemoteRatio);
        assert!(!state.has_ranges());
    }

    #[test]
    fn test_rejected_range_keeps_previous() {
        let mut state = FilterState::new();
        state.set_range(Dimension::SalaryInUsd, 10.0, 20.0).unwrap();
        let before = state.clone();

        assert!(matches!(
            state.set_range(Dimension::SalaryInUsd, 30.0, 5.0),
            Err(FilterError::InvertedRange { .. })
        ));
        assert_eq!(
            state.set_range(Dimension::SalaryInUsd, f64::NAN, 5.0),
            Err(FilterError::NonFiniteBound(Dimension::SalaryInUsd))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_toggle_category() {
        let mut state = FilterState::new();
        state.toggle_category(ExperienceLevel::Senior);
        assert_eq!(state.selected_category(), Some(ExperienceLevel::Senior));

        state.toggle_category(ExperienceLevel::Entry);
        assert_eq!(state.selected_category(), Some(ExperienceLevel::Entry));

        state.toggle_category(ExperienceLevel::Entry);
        assert_eq!(state.selected_category(), None);
    }

    #[test]
    fn test_category_only_affects_emphasis() {
        let mut state = FilterState::new();
        state.toggle_category(ExperienceLevel::Senior);
        let entry = record(ExperienceLevel::Entry, 2021, 50_000.0, 50.0);

        assert!(state.is_member(&entry));
        assert!(!state.is_emphasized(&entry));
        assert!(state.is_emphasized(&record(ExperienceLevel::Senior, 2021, 1.0, 0.0)));
    }
}
