//! Employment records and the immutable store that holds them

use std::ops::Index;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::category::{CompanySize, ExperienceLevel};
use crate::dimension::Dimension;

/// One employment observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub work_year: i32,
    pub salary_in_usd: f64,
    pub remote_ratio: f64,
    pub experience_level: ExperienceLevel,
    pub company_size: CompanySize,
}

impl Record {
    pub fn new(
        experience_level: ExperienceLevel,
        company_size: CompanySize,
        work_year: i32,
        salary_in_usd: f64,
        remote_ratio: f64,
    ) -> Self {
        Self {
            work_year,
            salary_in_usd,
            remote_ratio,
            experience_level,
            company_size,
        }
    }
}

/// Position of a record in its store; stable for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub usize);

/// Immutable, ordered dataset shared by the engine and the views.
///
/// Cloning is cheap: every clone points at the same records.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Arc<[Record]>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.iter()
    }

    /// Records paired with their identity
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (RecordId, &Record)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(idx, record)| (RecordId(idx), record))
    }

    /// Minimum and maximum of a dimension, `None` for an empty store
    pub fn extent(&self, dimension: Dimension) -> Option<(f64, f64)> {
        self.records.iter().map(|r| dimension.value(r)).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

impl Index<RecordId> for RecordStore {
    type Output = Record;

    fn index(&self, id: RecordId) -> &Self::Output {
        &self.records[id.0]
    }
}

impl From<Vec<Record>> for RecordStore {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_per_dimension() {
        let store = RecordStore::new(vec![
            Record::new(ExperienceLevel::Entry, CompanySize::Small, 2021, 50_000.0, 50.0),
            Record::new(ExperienceLevel::Senior, CompanySize::Large, 2023, 160_000.0, 0.0),
        ]);

        assert_eq!(store.extent(Dimension::WorkYear), Some((2021.0, 2023.0)));
        assert_eq!(store.extent(Dimension::SalaryInUsd), Some((50_000.0, 160_000.0)));
        assert_eq!(store.extent(Dimension::RemoteRatio), Some((0.0, 50.0)));
        assert_eq!(RecordStore::default().extent(Dimension::WorkYear), None);
    }

    #[test]
    fn test_ids_follow_load_order() {
        let store = RecordStore::new(vec![
            Record::new(ExperienceLevel::Mid, CompanySize::Medium, 2020, 1.0, 0.0),
            Record::new(ExperienceLevel::Executive, CompanySize::Large, 2022, 2.0, 100.0),
        ]);
        let ids: Vec<_> = store.iter_with_ids().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![RecordId(0), RecordId(1)]);
        assert_eq!(store[RecordId(1)].experience_level, ExperienceLevel::Executive);
    }
}
