//! Tabular text output of a payload

use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use xf_core::{Category, UpdatePayload};

/// One row per experience level: count, mean salary and emphasis
pub fn aggregate_batch(payload: &UpdatePayload) -> Result<RecordBatch, ArrowError> {
    let rows = payload.aggregate_rows.rows();

    let schema = Schema::new(vec![
        Field::new("experience_level", DataType::Utf8, false),
        Field::new("records", DataType::UInt64, false),
        Field::new("mean_salary_usd", DataType::Float64, false),
        Field::new("emphasized", DataType::Boolean, false),
    ]);

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.key.label()).collect::<Vec<_>>(),
        )),
        Arc::new(UInt64Array::from(
            rows.iter().map(|r| r.count as u64).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            rows.iter().map(|r| r.mean.round()).collect::<Vec<_>>(),
        )),
        Arc::new(BooleanArray::from(
            rows.iter()
                .map(|r| payload.is_category_emphasized(r.key))
                .collect::<Vec<_>>(),
        )),
    ];

    RecordBatch::try_new(Arc::new(schema), columns)
}

/// Pretty-printed table of [`aggregate_batch`]
pub fn render(payload: &UpdatePayload) -> Result<String, ArrowError> {
    let batch = aggregate_batch(payload)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xf_core::{CompanySize, CrossFilterEngine, EngineConfig, ExperienceLevel, Record, RecordStore};

    #[test]
    fn test_table_lists_every_level() {
        let store = RecordStore::new(vec![
            Record::new(ExperienceLevel::Entry, CompanySize::Small, 2021, 50_000.0, 50.0),
            Record::new(ExperienceLevel::Senior, CompanySize::Medium, 2022, 150_000.0, 100.0),
        ]);
        let engine = CrossFilterEngine::new(store, &EngineConfig::default());
        let payload = engine.on_category_click(ExperienceLevel::Senior);

        let batch = aggregate_batch(&payload).unwrap();
        assert_eq!(batch.num_rows(), 4);

        let table = render(&payload).unwrap();
        assert!(table.contains("experience_level"));
        assert!(table.contains("Entry"));
        assert!(table.contains("150000"));
    }
}
