//! The salary dataset layout and conversion of loaded batches into records

use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use csv::StringRecord;

use xf_core::{CompanySize, ExperienceLevel, Record};

use crate::DataError;

pub const WORK_YEAR: &str = "work_year";
pub const SALARY_IN_USD: &str = "salary_in_usd";
pub const REMOTE_RATIO: &str = "remote_ratio";
pub const EXPERIENCE_LEVEL: &str = "experience_level";
pub const COMPANY_SIZE: &str = "company_size";

/// Columns the dashboard reads, in batch order
pub const COLUMNS: [&str; 5] = [WORK_YEAR, SALARY_IN_USD, REMOTE_RATIO, EXPERIENCE_LEVEL, COMPANY_SIZE];

/// Arrow schema of a loaded batch. Every column is nullable until validated.
pub fn salary_schema() -> Schema {
    Schema::new(vec![
        Field::new(WORK_YEAR, DataType::Int64, true),
        Field::new(SALARY_IN_USD, DataType::Float64, true),
        Field::new(REMOTE_RATIO, DataType::Float64, true),
        Field::new(EXPERIENCE_LEVEL, DataType::Utf8, true),
        Field::new(COMPANY_SIZE, DataType::Utf8, true),
    ])
}

/// Position of each dashboard column in the source header
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnMap {
    indices: [usize; 5],
}

impl ColumnMap {
    /// Resolve columns by header name; extra columns are ignored
    pub fn resolve(headers: &StringRecord) -> Result<Self, DataError> {
        let mut indices = [0usize; 5];
        for (slot, name) in indices.iter_mut().zip(COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))?;
        }
        Ok(Self { indices })
    }

    /// Source index of the `i`-th dashboard column
    pub fn index(&self, i: usize) -> usize {
        self.indices[i]
    }
}

/// Records extracted from a batch plus how many rows were dropped
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub records: Vec<Record>,
    pub skipped: usize,
}

fn typed_column<'a, T: 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T, DataError> {
    batch
        .column_by_name(name)
        .and_then(|col| col.as_any().downcast_ref::<T>())
        .ok_or_else(|| DataError::MissingColumn(name.to_string()))
}

/// Typed views of the five dashboard columns of one batch
struct Columns<'a> {
    years: &'a Int64Array,
    salaries: &'a Float64Array,
    remote: &'a Float64Array,
    levels: &'a StringArray,
    sizes: &'a StringArray,
}

impl<'a> Columns<'a> {
    fn new(batch: &'a RecordBatch) -> Result<Self, DataError> {
        Ok(Self {
            years: typed_column(batch, WORK_YEAR)?,
            salaries: typed_column(batch, SALARY_IN_USD)?,
            remote: typed_column(batch, REMOTE_RATIO)?,
            levels: typed_column(batch, EXPERIENCE_LEVEL)?,
            sizes: typed_column(batch, COMPANY_SIZE)?,
        })
    }

    fn missing(&self, row: usize) -> Option<&'static str> {
        [
            (self.years.is_null(row), WORK_YEAR),
            (self.salaries.is_null(row), SALARY_IN_USD),
            (self.remote.is_null(row), REMOTE_RATIO),
            (self.levels.is_null(row), EXPERIENCE_LEVEL),
            (self.sizes.is_null(row), COMPANY_SIZE),
        ]
        .into_iter()
        .find_map(|(null, name)| null.then_some(name))
    }

    fn record(&self, row: usize) -> Result<Record, String> {
        if let Some(name) = self.missing(row) {
            return Err(format!("missing {}", name));
        }

        let year = self.years.value(row);
        let work_year = i32::try_from(year).map_err(|_| format!("year {} out of range", year))?;

        let salary_in_usd = self.salaries.value(row);
        if !(salary_in_usd.is_finite() && salary_in_usd >= 0.0) {
            return Err(format!("salary {} is not a non-negative number", salary_in_usd));
        }

        let remote_ratio = self.remote.value(row);
        if !(0.0..=100.0).contains(&remote_ratio) {
            return Err(format!("remote ratio {} outside [0, 100]", remote_ratio));
        }

        let experience_level = self
            .levels
            .value(row)
            .parse::<ExperienceLevel>()
            .map_err(|e| e.to_string())?;
        let company_size = self
            .sizes
            .value(row)
            .parse::<CompanySize>()
            .map_err(|e| e.to_string())?;

        Ok(Record::new(experience_level, company_size, work_year, salary_in_usd, remote_ratio))
    }
}

/// Convert a batch shaped like [`salary_schema`] into validated records.
///
/// Rows with a missing field, an unknown category code, a negative salary or
/// a remote ratio outside `[0, 100]` are skipped when `skip_invalid` is set,
/// otherwise the first one fails the conversion.
pub fn records_from_batch(batch: &RecordBatch, skip_invalid: bool) -> Result<LoadedRecords, DataError> {
    let columns = Columns::new(batch)?;
    let mut loaded = LoadedRecords {
        records: Vec::with_capacity(batch.num_rows()),
        skipped: 0,
    };

    for row in 0..batch.num_rows() {
        match columns.record(row) {
            Ok(record) => loaded.records.push(record),
            Err(reason) if skip_invalid => {
                tracing::warn!("Skipping row {}: {}", row, reason);
                loaded.skipped += 1;
            }
            Err(reason) => return Err(DataError::InvalidRow { row, reason }),
        }
    }

    Ok(loaded)
}
