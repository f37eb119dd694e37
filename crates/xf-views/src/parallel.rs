//! Parallel-coordinates plot with a brushable axis per dimension

use ahash::AHashMap;
use egui::{pos2, Color32, Pos2, Rect, Shape, Stroke};
use serde_json::{json, Value};
use uuid::Uuid;

use xf_core::{
    AxisScales, Dimension, ExperienceLevel, InteractionEvent, RecordId, RecordStore, UpdatePayload,
};

use crate::layout::PointScale;
use crate::style::{level_color, mix, with_opacity, ViewStyle, MUTED_LINE};
use crate::transition::{seconds, Tween};
use crate::{DashboardView, ViewId};

const AXIS_COLOR: Color32 = Color32::from_gray(90);
const BRUSH_FILL: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 60);

/// Polyline of one record across the axes
#[derive(Debug, Clone, PartialEq)]
pub struct LineMark {
    pub id: RecordId,
    pub level: ExperienceLevel,
    /// Plot-space vertices, skipping axes where the value is off-scale
    pub points: Vec<Pos2>,
    /// Axis index of each vertex
    slots: Vec<usize>,
    /// 1.0 fully emphasized, 0.0 fully muted
    emphasis: Tween,
}

impl LineMark {
    pub fn emphasis(&self) -> f32 {
        self.emphasis.value()
    }

    pub fn is_emphasized(&self) -> bool {
        self.emphasis.target() > 0.5
    }
}

/// Parallel-coordinates view
pub struct ParallelView {
    id: ViewId,
    title: String,
    style: ViewStyle,
    axes: AxisScales,
    x: PointScale,
    lines: Vec<LineMark>,
    by_record: AHashMap<RecordId, usize>,
    brushes: [Option<(f32, f32)>; 3],
    hidden: usize,
}

impl ParallelView {
    pub fn new(id: ViewId, title: String, store: &RecordStore, axes: AxisScales, style: ViewStyle) -> Self {
        let x = Self::x_scale_for(&style);
        let duration = seconds(style.line_ms);

        let mut lines = Vec::with_capacity(store.len());
        let mut by_record = AHashMap::with_capacity(store.len());
        let mut hidden = 0;

        for (id, record) in store.iter_with_ids() {
            let (slots, points): (Vec<usize>, Vec<Pos2>) = Dimension::ALL
                .iter()
                .enumerate()
                .filter_map(|(i, &dimension)| {
                    let scale = axes.scale(dimension);
                    let value = dimension.value(record);
                    scale
                        .contains(value)
                        .then(|| (i, pos2(x.position(i), scale.apply(value) as f32)))
                })
                .unzip();

            if points.len() < 2 {
                hidden += 1;
                continue;
            }

            by_record.insert(id, lines.len());
            lines.push(LineMark {
                id,
                level: record.experience_level,
                points,
                slots,
                emphasis: Tween::settled(1.0, duration),
            });
        }

        if hidden > 0 {
            tracing::debug!("{} records have fewer than two on-scale values and are not drawn", hidden);
        }

        Self {
            id,
            title,
            style,
            axes,
            x,
            lines,
            by_record,
            brushes: [None; 3],
            hidden,
        }
    }

    fn x_scale_for(style: &ViewStyle) -> PointScale {
        PointScale::new(Dimension::ALL.len(), (0.0, style.parallel_width), 1.0)
    }

    pub fn lines(&self) -> &[LineMark] {
        &self.lines
    }

    pub fn line(&self, id: RecordId) -> Option<&LineMark> {
        self.by_record.get(&id).map(|&i| &self.lines[i])
    }

    /// Records without a drawable line
    pub fn hidden_count(&self) -> usize {
        self.hidden
    }

    pub fn style(&self) -> &ViewStyle {
        &self.style
    }

    pub fn axes(&self) -> &AxisScales {
        &self.axes
    }

    pub fn axis_x(&self, dimension: Dimension) -> f32 {
        self.x.position(dimension.index())
    }

    fn axis_height(&self, dimension: Dimension) -> f32 {
        self.axes.scale(dimension).range().0 as f32
    }

    /// Axis whose brush strip contains the horizontal coordinate `x`
    pub fn axis_at(&self, x: f32) -> Option<Dimension> {
        self.x
            .index_near(x, self.style.brush_half_width)
            .map(|i| Dimension::ALL[i])
    }

    /// Current stroke color of a line, opacity included
    pub fn line_color(&self, line: &LineMark) -> Color32 {
        let e = line.emphasis();
        let opacity = self.style.line_muted_opacity * (1.0 - e) + self.style.line_emphasized_opacity * e;
        with_opacity(mix(MUTED_LINE, level_color(line.level), e), opacity)
    }

    /// Record a brush gesture on an axis and produce the event for the engine
    pub fn brush(&mut self, dimension: Dimension, y0: f32, y1: f32) -> InteractionEvent {
        let height = self.axis_height(dimension).max(0.0);
        let y0 = y0.clamp(0.0, height);
        let y1 = y1.clamp(0.0, height);
        self.brushes[dimension.index()] = Some((y0.min(y1), y0.max(y1)));
        InteractionEvent::brush_pixels(dimension, y0 as f64, y1 as f64)
    }

    fn apply_style(&mut self, style: ViewStyle) {
        self.x = Self::x_scale_for(&style);
        let duration = seconds(style.line_ms);
        for line in &mut self.lines {
            for (point, &slot) in line.points.iter_mut().zip(&line.slots) {
                point.x = self.x.position(slot);
            }
            line.emphasis.set_duration(duration);
        }
        self.style = style;
    }

    /// Remove a brush and produce the clearing event
    pub fn clear_brush(&mut self, dimension: Dimension) -> InteractionEvent {
        self.brushes[dimension.index()] = None;
        InteractionEvent::clear_brush(dimension)
    }

    /// Drop the drawn brush without raising an event
    pub fn forget_brush(&mut self, dimension: Dimension) {
        self.brushes[dimension.index()] = None;
    }

    pub fn brush_extent(&self, dimension: Dimension) -> Option<(f32, f32)> {
        self.brushes[dimension.index()]
    }

    /// Axes, brush rectangles and record lines for the current frame
    pub fn shapes(&self, origin: Pos2) -> Vec<Shape> {
        let offset = origin.to_vec2();
        let mut shapes = Vec::with_capacity(self.lines.len() + 6);

        for line in &self.lines {
            let points = line.points.iter().map(|p| *p + offset).collect();
            shapes.push(Shape::line(
                points,
                Stroke::new(self.style.line_width, self.line_color(line)),
            ));
        }

        for dimension in Dimension::ALL {
            let x = origin.x + self.axis_x(dimension);
            let height = self.axis_height(dimension);
            shapes.push(Shape::line_segment(
                [pos2(x, origin.y), pos2(x, origin.y + height)],
                Stroke::new(1.0, AXIS_COLOR),
            ));

            if let Some((top, bottom)) = self.brush_extent(dimension) {
                let half = self.style.brush_half_width;
                let rect = Rect::from_min_max(
                    pos2(x - half, origin.y + top),
                    pos2(x + half, origin.y + bottom),
                );
                shapes.push(Shape::rect_filled(rect, 0.0, BRUSH_FILL));
            }
        }

        shapes
    }
}

impl DashboardView for ParallelView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "ParallelView"
    }

    fn on_payload(&mut self, payload: &UpdatePayload) {
        for line in &mut self.lines {
            let target = if payload.is_record_emphasized(line.id) { 1.0 } else { 0.0 };
            line.emphasis.retarget(target);
        }
    }

    fn on_frame_update(&mut self, dt: f32) {
        for line in &mut self.lines {
            line.emphasis.advance(dt);
        }
    }

    fn is_animating(&self) -> bool {
        self.lines.iter().any(|l| !l.emphasis.is_settled())
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

impl ParallelView {
    /// View with a fresh id and the default title
    pub fn for_store(store: &RecordStore, axes: AxisScales, style: ViewStyle) -> Self {
        Self::new(
            Uuid::new_v4(),
            "Parallel Coordinates".to_string(),
            store,
            axes,
            style,
        )
    }
}
