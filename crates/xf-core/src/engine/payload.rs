use serde::Serialize;

use crate::aggregate::{aggregate, Aggregates};
use crate::category::{Category, ExperienceLevel};
use crate::filter::FilterState;
use crate::record::{RecordId, RecordStore};

/// Target state pushed to every view after a transition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatePayload {
    /// Bar data: mean salary per experience level over the range-filtered records
    pub aggregate_rows: Aggregates<ExperienceLevel>,

    /// Indexed by [`RecordId`]; muted records stay in place
    pub record_emphasis: Vec<bool>,

    /// Indexed by [`Category::index`]
    pub category_emphasis: Vec<bool>,

    /// Records passing every active range
    pub filtered_count: usize,
}

impl UpdatePayload {
    /// Derive the full payload for `filter` over `store`
    pub fn compute(store: &RecordStore, filter: &FilterState) -> Self {
        let filtered: Vec<_> = store.iter().filter(|r| filter.is_member(r)).collect();
        let aggregate_rows = aggregate::<ExperienceLevel, _>(filtered.iter().copied());

        let record_emphasis = store.iter().map(|r| filter.is_emphasized(r)).collect();

        let category_emphasis = ExperienceLevel::DOMAIN
            .iter()
            .map(|&level| filter.is_category_emphasized(level))
            .collect();

        Self {
            aggregate_rows,
            record_emphasis,
            category_emphasis,
            filtered_count: filtered.len(),
        }
    }

    pub fn is_record_emphasized(&self, id: RecordId) -> bool {
        self.record_emphasis.get(id.0).copied().unwrap_or(false)
    }

    pub fn is_category_emphasized(&self, level: ExperienceLevel) -> bool {
        self.category_emphasis
            .get(level.index())
            .copied()
            .unwrap_or(false)
    }

    pub fn emphasized_count(&self) -> usize {
        self.record_emphasis.iter().filter(|e| **e).count()
    }

    pub fn emphasized_ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.record_emphasis
            .iter()
            .enumerate()
            .filter(|(_, e)| **e)
            .map(|(idx, _)| RecordId(idx))
    }
}
