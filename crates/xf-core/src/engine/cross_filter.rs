//! Cross-filter engine implementation

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::{UpdatePayload, UpdateSubscriber};
use crate::aggregate::{aggregate, Aggregates};
use crate::category::{CompanySize, ExperienceLevel};
use crate::config::EngineConfig;
use crate::dimension::Dimension;
use crate::error::FilterError;
use crate::events::{BrushExtent, InteractionEvent};
use crate::filter::FilterState;
use crate::record::RecordStore;
use crate::scale::AxisScales;

/// Mutable engine state, only written through [`CrossFilterEngine`]
#[derive(Debug)]
struct EngineState {
    filter: FilterState,
    payload: Arc<UpdatePayload>,
    revision: u64,
}

/// Owns the selection and publishes a consistent target state to all views
pub struct CrossFilterEngine {
    store: RecordStore,
    axes: AxisScales,
    overview: Aggregates<CompanySize>,
    state: RwLock<EngineState>,
    subscribers: RwLock<Vec<Weak<dyn UpdateSubscriber>>>,
}

impl CrossFilterEngine {
    /// Create an engine over a fully loaded dataset
    pub fn new(store: RecordStore, config: &EngineConfig) -> Self {
        let axes = AxisScales::from_store(&store, config);
        let overview = aggregate::<CompanySize, _>(store.iter());
        let filter = FilterState::new();
        let payload = Arc::new(UpdatePayload::compute(&store, &filter));

        tracing::info!(
            "Cross-filter engine ready with {} records across {} dimensions",
            store.len(),
            Dimension::ALL.len()
        );

        Self {
            store,
            axes,
            overview,
            state: RwLock::new(EngineState {
                filter,
                payload,
                revision: 0,
            }),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Apply any interaction event
    pub fn handle(&self, event: &InteractionEvent) -> Result<Arc<UpdatePayload>, FilterError> {
        match event {
            InteractionEvent::BrushChanged { dimension, extent } => {
                self.on_brush_change(*dimension, *extent)
            }
            InteractionEvent::CategoryClicked { category } => {
                let level = category.parse::<ExperienceLevel>().map_err(|e| {
                    tracing::warn!("Ignoring click: {}", e);
                    e
                })?;
                Ok(self.on_category_click(level))
            }
        }
    }

    /// Set or clear the brush on `dimension`.
    ///
    /// Pixel extents are inverted through the axis scale and reordered, since
    /// pixels grow downward while data grows upward. Data extents are taken
    /// as given and rejected if inverted.
    pub fn on_brush_change(
        &self,
        dimension: Dimension,
        extent: Option<BrushExtent>,
    ) -> Result<Arc<UpdatePayload>, FilterError> {
        let bounds = extent.map(|extent| self.data_extent(dimension, extent));

        let mut state = self.state.write();
        match bounds {
            Some((min, max)) => {
                if let Err(e) = state.filter.set_range(dimension, min, max) {
                    tracing::warn!("Rejected brush: {}", e);
                    return Err(e);
                }
                tracing::debug!("Brush on {} set to [{}, {}]", dimension, min, max);
            }
            None => {
                state.filter.clear_range(dimension);
                tracing::debug!("Brush on {} cleared", dimension);
            }
        }

        let payload = self.recompute(&mut state);
        let revision = state.revision;
        drop(state);
        self.notify_subscribers(revision, &payload);
        Ok(payload)
    }

    /// Toggle the highlighted experience level
    pub fn on_category_click(&self, level: ExperienceLevel) -> Arc<UpdatePayload> {
        let mut state = self.state.write();
        state.filter.toggle_category(level);
        tracing::debug!(
            "Category click on {}, selection now {:?}",
            level,
            state.filter.selected_category()
        );

        let payload = self.recompute(&mut state);
        let revision = state.revision;
        drop(state);
        self.notify_subscribers(revision, &payload);
        payload
    }

    fn data_extent(&self, dimension: Dimension, extent: BrushExtent) -> (f64, f64) {
        match extent {
            BrushExtent::Pixels { y0, y1 } => {
                let scale = self.axes.scale(dimension);
                let (a, b) = (scale.invert(y0), scale.invert(y1));
                if a <= b {
                    (a, b)
                } else {
                    (b, a)
                }
            }
            BrushExtent::Data { min, max } => (min, max),
        }
    }

    /// Rebuild the payload from scratch for the current filter
    fn recompute(&self, state: &mut EngineState) -> Arc<UpdatePayload> {
        let payload = Arc::new(UpdatePayload::compute(&self.store, &state.filter));
        state.payload = payload.clone();
        state.revision += 1;

        tracing::debug!(
            "Recomputed revision {}: {} of {} records pass the brushes, {} emphasized",
            state.revision,
            payload.filtered_count,
            self.store.len(),
            payload.emphasized_count()
        );

        payload
    }

    /// Latest published payload
    pub fn payload(&self) -> Arc<UpdatePayload> {
        self.state.read().payload.clone()
    }

    /// Number of payloads published since creation
    pub fn revision(&self) -> u64 {
        self.state.read().revision
    }

    /// Snapshot of the current selection
    pub fn filter_state(&self) -> FilterState {
        self.state.read().filter.clone()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn axes(&self) -> &AxisScales {
        &self.axes
    }

    /// Company-size counts over the whole dataset; never filtered
    pub fn overview(&self) -> &Aggregates<CompanySize> {
        &self.overview
    }

    /// Add a subscriber
    pub fn add_subscriber(&self, subscriber: Arc<dyn UpdateSubscriber>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    /// Notify all subscribers of a new payload
    fn notify_subscribers(&self, revision: u64, payload: &UpdatePayload) {
        let mut subscribers = self.subscribers.write();

        // Remove any dead weak references
        subscribers.retain(|weak| weak.strong_count() > 0);

        for weak in subscribers.iter() {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_update(revision, payload);
            }
        }
    }
}
