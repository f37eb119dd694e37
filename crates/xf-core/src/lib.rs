//! Core functionality for the salary dashboard
//!
//! This crate owns the dataset model, the grouped aggregates and the
//! cross-filter engine that keeps every view of the dashboard consistent.

pub mod aggregate;
pub mod category;
pub mod config;
pub mod dimension;
pub mod engine;
pub mod error;
pub mod events;
pub mod filter;
pub mod record;
pub mod scale;

// Re-export commonly used types
pub use aggregate::{aggregate, AggregateRow, Aggregates};
pub use category::{Category, CompanySize, ExperienceLevel};
pub use config::EngineConfig;
pub use dimension::Dimension;
pub use engine::{CrossFilterEngine, UpdatePayload, UpdateSubscriber};
pub use error::{ConfigError, FilterError};
pub use events::{BrushExtent, InteractionEvent};
pub use filter::{DimensionRange, FilterState};
pub use record::{Record, RecordId, RecordStore};
pub use scale::{AxisScales, LinearScale};
pub use data::RecordSource;

pub mod data {
    use crate::record::RecordStore;

    /// Trait for anything that can supply the full dataset up front
    #[async_trait::async_trait]
    pub trait RecordSource: Send + Sync {
        /// Load every record; the engine is built only after this completes
        async fn load(&self) -> anyhow::Result<RecordStore>;

        /// Get the source name/path
        fn source_name(&self) -> &str;
    }
}
