use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder, Int64Builder, StringBuilder};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use csv::ReaderBuilder;
use tracing::info;

use xf_core::RecordStore;

use crate::config::LoadConfig;
use crate::schema::{records_from_batch, salary_schema, ColumnMap};
use crate::DataError;

/// CSV data source for the salary dataset
pub struct CsvSource {
    /// Path to the CSV file
    path: PathBuf,
    /// Parsing options
    config: LoadConfig,
}

impl CsvSource {
    /// Create a new CSV source from a file path
    pub fn new(path: impl Into<PathBuf>, config: LoadConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    /// Read the whole file into one batch on the blocking pool
    pub async fn load_batch(&self) -> Result<RecordBatch, DataError> {
        let path = self.path.clone();
        let config = self.config.clone();

        tokio::task::spawn_blocking(move || {
            let file = File::open(&path)?;
            Self::read_batch(BufReader::new(file), &config)
        })
        .await?
    }

    /// Parse CSV text into a batch shaped like [`salary_schema`].
    ///
    /// Cells that are null markers or fail to parse become nulls; deciding
    /// what to do with such rows is left to [`records_from_batch`].
    pub fn read_batch<R: Read>(reader: R, config: &LoadConfig) -> Result<RecordBatch, DataError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(config.delimiter_byte())
            .flexible(true)
            .from_reader(reader);

        let columns = ColumnMap::resolve(csv_reader.headers()?)?;

        let mut years = Int64Builder::new();
        let mut salaries = Float64Builder::new();
        let mut remote = Float64Builder::new();
        let mut levels = StringBuilder::new();
        let mut sizes = StringBuilder::new();

        for result in csv_reader.records() {
            let record = result?;
            let cell = |i: usize| record.get(columns.index(i)).and_then(|v| config.null.cell(v));

            years.append_option(cell(0).and_then(parse_year));
            salaries.append_option(cell(1).and_then(parse_number));
            remote.append_option(cell(2).and_then(parse_number));
            levels.append_option(cell(3));
            sizes.append_option(cell(4));
        }

        let arrays: Vec<ArrayRef> = vec![
            Arc::new(years.finish()),
            Arc::new(salaries.finish()),
            Arc::new(remote.finish()),
            Arc::new(levels.finish()),
            Arc::new(sizes.finish()),
        ];

        RecordBatch::try_new(Arc::new(salary_schema()), arrays).map_err(|e| e.into())
    }

    /// Parse CSV text straight into a record store
    pub fn read_store<R: Read>(reader: R, config: &LoadConfig) -> Result<RecordStore, DataError> {
        let batch = Self::read_batch(reader, config)?;
        let loaded = records_from_batch(&batch, config.skip_invalid_rows)?;
        Ok(RecordStore::new(loaded.records))
    }
}

/// Whole years; `2022.0` is accepted, `2022.5` is not
fn parse_year(value: &str) -> Option<i64> {
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    })
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[async_trait]
impl xf_core::data::RecordSource for CsvSource {
    async fn load(&self) -> anyhow::Result<RecordStore> {
        info!("Loading salary dataset from {:?}", self.path);

        let batch = self.load_batch().await?;
        let loaded = records_from_batch(&batch, self.config.skip_invalid_rows)?;

        info!(
            "Loaded {} records from {} ({} rows skipped)",
            loaded.records.len(),
            self.source_name(),
            loaded.skipped
        );

        Ok(RecordStore::new(loaded.records))
    }

    fn source_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use xf_core::data::RecordSource;
    use xf_core::{CompanySize, ExperienceLevel};

    const SALARIES: &str = "\
work_year,experience_level,employment_type,job_title,salary,salary_currency,salary_in_usd,employee_residence,remote_ratio,company_location,company_size
2021,EN,FT,Data Analyst,50000,USD,50000,US,50,US,S
2022,SE,FT,Data Scientist,150000,USD,150000,US,100,US,M
2023,SE,FT,ML Engineer,160000,USD,160000,US,0,US,L
";

    #[test]
    fn test_reads_columns_by_name() {
        let store = CsvSource::read_store(SALARIES.as_bytes(), &LoadConfig::default()).unwrap();

        assert_eq!(store.len(), 3);
        let first = &store.records()[0];
        assert_eq!(first.work_year, 2021);
        assert_eq!(first.salary_in_usd, 50_000.0);
        assert_eq!(first.remote_ratio, 50.0);
        assert_eq!(first.experience_level, ExperienceLevel::Entry);
        assert_eq!(first.company_size, CompanySize::Small);
    }

    #[test]
    fn test_missing_column_fails() {
        let input = "work_year,experience_level,salary_in_usd,remote_ratio\n2021,EN,1,0\n";
        let err = CsvSource::read_batch(input.as_bytes(), &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(name) if name == "company_size"));
    }

    #[test]
    fn test_nulls_and_bad_values_are_skipped() {
        let input = "\
work_year,salary_in_usd,remote_ratio,experience_level,company_size
2021,N/A,0,EN,S
2022,1000,0,XX,M
2022,1000,150,MI,M
2022.0,-5,0,MI,M
2023,2000,100,EX,L
";
        let batch = CsvSource::read_batch(input.as_bytes(), &LoadConfig::default()).unwrap();
        assert_eq!(batch.num_rows(), 5);

        let loaded = records_from_batch(&batch, true).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.skipped, 4);
        assert_eq!(loaded.records[0].experience_level, ExperienceLevel::Executive);
    }

    #[test]
    fn test_strict_load_reports_first_bad_row() {
        let input = "work_year,salary_in_usd,remote_ratio,experience_level,company_size\n2021,10,0,EN,S\n2021,,0,EN,S\n";
        let config = LoadConfig {
            skip_invalid_rows: false,
            ..LoadConfig::default()
        };

        let err = CsvSource::read_store(input.as_bytes(), &config).unwrap_err();
        assert!(matches!(err, DataError::InvalidRow { row: 1, .. }));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let input = "work_year;salary_in_usd;remote_ratio;experience_level;company_size\n2020;1;0;MI;M\n";
        let config = LoadConfig {
            delimiter: ';',
            ..LoadConfig::default()
        };
        let store = CsvSource::read_store(input.as_bytes(), &config).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_config_from_json() {
        let config: LoadConfig =
            serde_json::from_str(r#"{"skip_invalid_rows": false, "null": {"markers": ["?"]}}"#).unwrap();
        assert!(!config.skip_invalid_rows);
        assert_eq!(config.delimiter, ',');
        assert!(config.null.is_null("?"));
        assert!(!config.null.is_null(""));
    }

    #[tokio::test]
    async fn test_async_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SALARIES.as_bytes()).unwrap();
        file.flush().unwrap();

        let source = CsvSource::new(file.path(), LoadConfig::default());
        let store = source.load().await.unwrap();

        assert_eq!(store.len(), 3);
        assert!(source.source_name().ends_with(".csv"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = CsvSource::new("/nonexistent/ds_salaries.csv", LoadConfig::default());
        let err = source.load_batch().await.unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
