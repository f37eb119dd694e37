//! Composition root wiring the engine to the three views

use std::sync::Arc;

use egui::{pos2, Pos2, Shape};
use parking_lot::RwLockReadGuard;
use serde_json::{json, Value};
use tracing::{info, warn};

use xf_core::data::RecordSource;
use xf_core::{
    CrossFilterEngine, Dimension, EngineConfig, FilterError, InteractionEvent, RecordStore,
    UpdatePayload,
};

use crate::bar::BarView;
use crate::parallel::ParallelView;
use crate::pie::PieView;
use crate::style::ViewStyle;
use crate::{DashboardView, ViewHandle};

/// Gap between the plots when laid out side by side
const PANEL_GAP: f32 = 60.0;

/// The coordinated dashboard: one engine, two reactive views and a static overview
pub struct Dashboard {
    engine: CrossFilterEngine,
    bar: Arc<ViewHandle<BarView>>,
    parallel: Arc<ViewHandle<ParallelView>>,
    pie: PieView,
}

impl Dashboard {
    pub fn new(store: RecordStore, config: &EngineConfig, style: ViewStyle) -> Self {
        let engine = CrossFilterEngine::new(store, config);

        let pie = PieView::for_overview(engine.overview(), &style);
        let bar = Arc::new(ViewHandle::new(BarView::new(
            uuid::Uuid::new_v4(),
            "Average Salary by Experience Level".to_string(),
            style.clone(),
        )));
        let parallel = Arc::new(ViewHandle::new(ParallelView::for_store(
            engine.store(),
            engine.axes().clone(),
            style,
        )));

        engine.add_subscriber(bar.clone());
        engine.add_subscriber(parallel.clone());

        // Views start from the engine's initial payload
        let initial = engine.payload();
        bar.write().on_payload(&initial);
        parallel.write().on_payload(&initial);

        info!(
            "Dashboard ready: {} records, {} lines drawn",
            engine.store().len(),
            parallel.read().lines().len()
        );

        Self {
            engine,
            bar,
            parallel,
            pie,
        }
    }

    /// Load the dataset from `source` and build the dashboard over it
    pub async fn load(
        source: &dyn RecordSource,
        config: &EngineConfig,
        style: ViewStyle,
    ) -> anyhow::Result<Self> {
        let store = source.load().await?;
        Ok(Self::new(store, config, style))
    }

    pub fn engine(&self) -> &CrossFilterEngine {
        &self.engine
    }

    pub fn bar(&self) -> RwLockReadGuard<'_, BarView> {
        self.bar.read()
    }

    pub fn parallel(&self) -> RwLockReadGuard<'_, ParallelView> {
        self.parallel.read()
    }

    pub fn pie(&self) -> &PieView {
        &self.pie
    }

    /// Forward an event; subscribed views are retargeted by the engine
    pub fn handle(&self, event: &InteractionEvent) -> Result<Arc<UpdatePayload>, FilterError> {
        self.engine.handle(event)
    }

    /// Click inside the bar chart, in plot coordinates
    pub fn click_bar(&self, pos: Pos2) -> Option<Arc<UpdatePayload>> {
        let event = self.bar.read().click(pos)?;
        self.engine.handle(&event).ok()
    }

    /// Brush an axis of the parallel-coordinates plot, in pixels
    pub fn brush_axis(
        &self,
        dimension: Dimension,
        y0: f32,
        y1: f32,
    ) -> Result<Arc<UpdatePayload>, FilterError> {
        let event = self.parallel.write().brush(dimension, y0, y1);
        self.engine.handle(&event).map_err(|e| {
            warn!("Brush on {} rejected: {}", dimension, e);
            self.parallel.write().forget_brush(dimension);
            e
        })
    }

    pub fn clear_axis(&self, dimension: Dimension) -> Result<Arc<UpdatePayload>, FilterError> {
        let event = self.parallel.write().clear_brush(dimension);
        self.engine.handle(&event)
    }

    /// Advance every running transition by `dt` seconds
    pub fn tick(&self, dt: f32) {
        self.bar.write().on_frame_update(dt);
        self.parallel.write().on_frame_update(dt);
    }

    pub fn is_animating(&self) -> bool {
        self.bar.read().is_animating() || self.parallel.read().is_animating()
    }

    /// Plot origins: pie center, parallel plot top-left, bar plot top-left
    pub fn layout(&self) -> (Pos2, Pos2, Pos2) {
        let r = self.pie.radius();
        let parallel_width = self.parallel.read().style().parallel_width;
        let pie_center = pos2(r, r);
        let parallel_origin = pos2(0.0, 2.0 * r + PANEL_GAP);
        let bar_origin = pos2(parallel_width.max(2.0 * r) + PANEL_GAP, 0.0);
        (pie_center, parallel_origin, bar_origin)
    }

    /// Everything to paint for the current frame
    pub fn shapes(&self) -> Vec<Shape> {
        let (pie_center, parallel_origin, bar_origin) = self.layout();
        let mut shapes = self.pie.shapes(pie_center);
        shapes.extend(self.parallel.read().shapes(parallel_origin));
        shapes.extend(self.bar.read().shapes(bar_origin));
        shapes
    }

    /// Per-view configuration keyed by view type
    pub fn save_config(&self) -> Value {
        json!({
            "bar": self.bar.read().save_config(),
            "parallel": self.parallel.read().save_config(),
            "pie": self.pie.save_config(),
        })
    }

    pub fn load_config(&mut self, config: Value) {
        if let Some(bar) = config.get("bar") {
            self.bar.write().load_config(bar.clone());
        }
        if let Some(parallel) = config.get("parallel") {
            self.parallel.write().load_config(parallel.clone());
        }
        if let Some(pie) = config.get("pie") {
            self.pie.load_config(pie.clone());
        }
    }
}
