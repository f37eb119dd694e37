//! Bar chart of average salary per experience level

use egui::{pos2, vec2, Pos2, Rect, Shape};
use serde_json::{json, Value};
use uuid::Uuid;

use xf_core::{Category, ExperienceLevel, InteractionEvent, LinearScale, UpdatePayload};

use crate::layout::BandScale;
use crate::style::{level_color, with_opacity, ViewStyle};
use crate::transition::{seconds, Tween};
use crate::{DashboardView, ViewId};

/// Y-axis top used while every mean is zero
const EMPTY_AXIS_MAX: f64 = 10_000.0;

/// One bar and its animated geometry
#[derive(Debug, Clone, PartialEq)]
pub struct BarMark {
    pub level: ExperienceLevel,
    pub count: usize,
    pub mean: f64,
    height: Tween,
    opacity: Tween,
}

impl BarMark {
    /// Displayed height in pixels
    pub fn height(&self) -> f32 {
        self.height.value()
    }

    pub fn target_height(&self) -> f32 {
        self.height.target()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    pub fn target_opacity(&self) -> f32 {
        self.opacity.target()
    }
}

/// Bar chart view
pub struct BarView {
    id: ViewId,
    title: String,
    style: ViewStyle,
    x: BandScale,
    y: LinearScale,
    axis_max: Tween,
    bars: Vec<BarMark>,
}

impl BarView {
    /// Create a bar chart with every bar collapsed at the baseline
    pub fn new(id: ViewId, title: String, style: ViewStyle) -> Self {
        let height_secs = seconds(style.bar_height_ms);
        let opacity_secs = seconds(style.bar_opacity_ms);
        let y = Self::y_scale_for(0.0, &style);

        let bars = ExperienceLevel::DOMAIN
            .iter()
            .map(|&level| BarMark {
                level,
                count: 0,
                mean: 0.0,
                height: Tween::settled(0.0, height_secs),
                opacity: Tween::settled(style.bar_emphasized_opacity, opacity_secs),
            })
            .collect();

        Self {
            id,
            title,
            x: Self::band_for(&style),
            axis_max: Tween::settled(y.domain().1 as f32, height_secs),
            y,
            style,
            bars,
        }
    }

    fn band_for(style: &ViewStyle) -> BandScale {
        BandScale::new(ExperienceLevel::DOMAIN.len(), (0.0, style.bar_width), style.bar_padding)
    }

    /// `[0, max_mean]` niced, or `[0, 10000]` when there is nothing to show
    fn y_scale_for(max_mean: f64, style: &ViewStyle) -> LinearScale {
        let top = if max_mean > 0.0 { max_mean } else { EMPTY_AXIS_MAX };
        LinearScale::new((0.0, top), (style.bar_height as f64, 0.0)).nice(10)
    }

    pub fn bars(&self) -> &[BarMark] {
        &self.bars
    }

    pub fn bar(&self, level: ExperienceLevel) -> &BarMark {
        &self.bars[level.index()]
    }

    /// Target y scale for the latest payload
    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    /// Displayed top of the y axis
    pub fn axis_max(&self) -> f32 {
        self.axis_max.value()
    }

    pub fn style(&self) -> &ViewStyle {
        &self.style
    }

    /// Displayed rectangle of a bar, relative to the plot origin
    pub fn bar_rect(&self, level: ExperienceLevel, origin: Pos2) -> Rect {
        let bar = self.bar(level);
        let left = origin.x + self.x.position(level.index());
        let top = origin.y + self.style.bar_height - bar.height();
        Rect::from_min_size(pos2(left, top), vec2(self.x.bandwidth(), bar.height()))
    }

    /// Bar under a point given in plot coordinates
    pub fn hit_test(&self, pos: Pos2) -> Option<ExperienceLevel> {
        let level = ExperienceLevel::DOMAIN[self.x.index_at(pos.x)?];
        self.bar_rect(level, Pos2::ZERO)
            .contains(pos)
            .then_some(level)
    }

    /// Category click produced by clicking at `pos`
    pub fn click(&self, pos: Pos2) -> Option<InteractionEvent> {
        let level = self.hit_test(pos)?;
        tracing::debug!("Bar clicked: {}", level.label());
        Some(InteractionEvent::category_clicked(level.code()))
    }

    /// Filled rectangles for the current frame
    pub fn shapes(&self, origin: Pos2) -> Vec<Shape> {
        self.bars
            .iter()
            .map(|bar| {
                Shape::rect_filled(
                    self.bar_rect(bar.level, origin),
                    0.0,
                    with_opacity(level_color(bar.level), bar.opacity()),
                )
            })
            .collect()
    }

    /// Rebuild the y scale for `max_mean` and retarget the axis and bar heights
    fn retarget_heights(&mut self, max_mean: f64) {
        self.y = Self::y_scale_for(max_mean, &self.style);
        self.axis_max.retarget(self.y.domain().1 as f32);

        for bar in &mut self.bars {
            let target = self.style.bar_height - self.y.apply(bar.mean) as f32;
            bar.height.retarget(target.max(0.0));
        }
    }

    fn apply_style(&mut self, style: ViewStyle) {
        self.x = Self::band_for(&style);
        for bar in &mut self.bars {
            bar.height.set_duration(seconds(style.bar_height_ms));
            bar.opacity.set_duration(seconds(style.bar_opacity_ms));
        }
        self.axis_max.set_duration(seconds(style.bar_height_ms));
        self.style = style;

        let max_mean = self.bars.iter().map(|b| b.mean).fold(0.0, f64::max);
        self.retarget_heights(max_mean);
    }
}

impl DashboardView for BarView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "BarView"
    }

    fn on_payload(&mut self, payload: &UpdatePayload) {
        let rows = &payload.aggregate_rows;

        for bar in &mut self.bars {
            let row = rows.get(bar.level);
            bar.count = row.count;
            bar.mean = row.mean;

            let opacity = if payload.is_category_emphasized(bar.level) {
                self.style.bar_emphasized_opacity
            } else {
                self.style.bar_muted_opacity
            };
            bar.opacity.retarget(opacity);
        }

        self.retarget_heights(rows.max_mean());
    }

    fn on_frame_update(&mut self, dt: f32) {
        self.axis_max.advance(dt);
        for bar in &mut self.bars {
            bar.height.advance(dt);
            bar.opacity.advance(dt);
        }
    }

    fn is_animating(&self) -> bool {
        !self.axis_max.is_settled()
            || self
                .bars
                .iter()
                .any(|b| !b.height.is_settled() || !b.opacity.is_settled())
    }

    fn save_config(&self) -> Value {
        json!({
            "title": self.title,
            "style": self.style,
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(title) = config.get("title").and_then(|v| v.as_str()) {
            self.title = title.to_string();
        }
        if let Some(style) = config
            .get("style")
            .and_then(|v| serde_json::from_value::<ViewStyle>(v.clone()).ok())
        {
            self.apply_style(style);
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl Default for BarView {
    fn default() -> Self {
        Self::new(
            Uuid::new_v4(),
            "Average Salary by Experience Level".to_string(),
            ViewStyle::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xf_core::{CompanySize, CrossFilterEngine, Dimension, EngineConfig, Record, RecordStore};

    fn engine() -> CrossFilterEngine {
        let store = RecordStore::new(vec![
            Record::new(ExperienceLevel::Entry, CompanySize::Small, 2021, 50_000.0, 50.0),
            Record::new(ExperienceLevel::Senior, CompanySize::Medium, 2022, 150_000.0, 100.0),
            Record::new(ExperienceLevel::Senior, CompanySize::Large, 2023, 160_000.0, 0.0),
        ]);
        CrossFilterEngine::new(store, &EngineConfig::default())
    }

    #[test]
    fn test_bars_grow_from_baseline() {
        let engine = engine();
        let mut view = BarView::default();
        view.on_payload(&engine.payload());

        assert_eq!(view.y_scale().domain(), (0.0, 160_000.0));
        assert_eq!(view.bar(ExperienceLevel::Senior).height(), 0.0);
        assert_eq!(view.bar(ExperienceLevel::Senior).target_height(), 387.5);
        assert_eq!(view.bar(ExperienceLevel::Entry).target_height(), 125.0);
        assert_eq!(view.bar(ExperienceLevel::Mid).target_height(), 0.0);
        assert!(view.is_animating());

        view.on_frame_update(0.5);
        assert_eq!(view.bar(ExperienceLevel::Senior).height(), 387.5);
        assert!(!view.is_animating());
    }

    #[test]
    fn test_selection_mutes_other_bars() {
        let engine = engine();
        let mut view = BarView::default();
        view.on_payload(&engine.payload());
        view.on_frame_update(1.0);

        let payload = engine.on_category_click(ExperienceLevel::Senior);
        view.on_payload(&payload);
        view.on_frame_update(0.1);

        assert_eq!(view.bar(ExperienceLevel::Senior).opacity(), 1.0);
        assert_eq!(view.bar(ExperienceLevel::Entry).opacity(), 0.5);
        assert_eq!(view.bar(ExperienceLevel::Senior).target_height(), 387.5);
    }

    #[test]
    fn test_empty_subset_uses_fallback_axis() {
        let engine = engine();
        let mut view = BarView::default();
        let payload = engine
            .handle(&InteractionEvent::brush_data(Dimension::RemoteRatio, 60.0, 70.0))
            .unwrap();
        view.on_payload(&payload);

        assert_eq!(view.y_scale().domain(), (0.0, 10_000.0));
        assert!(view.bars().iter().all(|b| b.target_height() == 0.0));
    }

    #[test]
    fn test_click_hits_displayed_bar() {
        let engine = engine();
        let mut view = BarView::default();
        view.on_payload(&engine.payload());
        view.on_frame_update(1.0);

        let senior = view.bar_rect(ExperienceLevel::Senior, Pos2::ZERO);
        let event = view.click(senior.center()).unwrap();
        assert_eq!(event, InteractionEvent::category_clicked("SE"));

        // Mid has no records, so there is no bar to click
        let mid = view.bar_rect(ExperienceLevel::Mid, Pos2::ZERO);
        assert!(view.click(pos2(mid.center().x, 200.0)).is_none());
        assert_eq!(view.shapes(Pos2::ZERO).len(), 4);
    }

    #[test]
    fn test_config_round_trip() {
        let mut view = BarView::default();
        let mut config = view.save_config();
        config["title"] = json!("Salaries");
        config["style"]["bar_width"] = json!(840.0);
        view.load_config(config);

        assert_eq!(view.title(), "Salaries");
        assert_eq!(view.style().bar_width, 840.0);
    }

    #[test]
    fn test_shorter_plot_rescales_bars() {
        let engine = engine();
        let mut view = BarView::default();
        view.on_payload(&engine.payload());
        view.on_frame_update(1.0);

        let mut config = view.save_config();
        config["style"]["bar_height"] = json!(200.0);
        view.load_config(config);

        assert_eq!(view.y_scale().range(), (200.0, 0.0));
        assert_eq!(view.bar(ExperienceLevel::Senior).target_height(), 193.75);
        assert_eq!(view.bar(ExperienceLevel::Entry).target_height(), 62.5);
        assert!(view.is_animating());

        view.on_frame_update(1.0);
        let senior = view.bar_rect(ExperienceLevel::Senior, Pos2::ZERO);
        assert!((senior.top() - 6.25).abs() < 1e-3);
        assert!((senior.bottom() - 200.0).abs() < 1e-3);
    }
}
