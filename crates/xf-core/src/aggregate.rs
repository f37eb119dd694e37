//! Grouped statistics over arbitrary subsets of the record store

use serde::Serialize;

use crate::category::Category;
use crate::record::Record;

/// Count and mean salary for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateRow<C> {
    pub key: C,
    pub count: usize,
    pub mean: f64,
}

/// One row per category of the full domain, in domain order.
///
/// Categories without records keep a row with zero count and zero mean, so
/// consumers always see the same keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates<C> {
    rows: Vec<AggregateRow<C>>,
}

impl<C: Category> Aggregates<C> {
    pub fn rows(&self) -> &[AggregateRow<C>] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &AggregateRow<C>> + '_ {
        self.rows.iter()
    }

    pub fn get(&self, key: C) -> &AggregateRow<C> {
        &self.rows[key.index()]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Records counted across all rows
    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }

    /// Largest mean; 0 when every row is empty
    pub fn max_mean(&self) -> f64 {
        self.rows.iter().map(|r| r.mean).fold(0.0, f64::max)
    }
}

/// Group `records` by `C` and compute the count and mean salary per group.
pub fn aggregate<'a, C, I>(records: I) -> Aggregates<C>
where
    C: Category,
    I: IntoIterator<Item = &'a Record>,
{
    let mut counts = vec![0usize; C::DOMAIN.len()];
    let mut sums = vec![0.0f64; C::DOMAIN.len()];

    for record in records {
        let idx = C::of(record).index();
        counts[idx] += 1;
        sums[idx] += record.salary_in_usd;
    }

    let rows = C::DOMAIN
        .iter()
        .zip(counts.into_iter().zip(sums))
        .map(|(&key, (count, sum))| AggregateRow {
            key,
            count,
            mean: if count > 0 { sum / count as f64 } else { 0.0 },
        })
        .collect();

    Aggregates { rows }
}
