//! Static company-size overview

use std::f32::consts::{FRAC_PI_2, TAU};

use egui::{pos2, Color32, Pos2, Shape, Stroke};
use serde_json::{json, Value};
use uuid::Uuid;

use xf_core::{Aggregates, Category, CompanySize, UpdatePayload};

use crate::style::{size_color, ViewStyle};
use crate::{DashboardView, ViewId};

/// Arc vertices per quarter turn
const ARC_STEPS: usize = 16;

/// One wedge of the pie, angles clockwise from twelve o'clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    pub size: CompanySize,
    pub count: usize,
    pub start_angle: f32,
    pub end_angle: f32,
}

impl PieSlice {
    pub fn sweep(&self) -> f32 {
        self.end_angle - self.start_angle
    }
}

/// Pie chart of record counts per company size over the whole dataset
pub struct PieView {
    id: ViewId,
    title: String,
    radius: f32,
    slices: Vec<PieSlice>,
}

impl PieView {
    pub fn new(id: ViewId, title: String, overview: &Aggregates<CompanySize>, style: &ViewStyle) -> Self {
        Self {
            id,
            title,
            radius: style.pie_radius,
            slices: Self::layout(overview),
        }
    }

    /// Slices in domain order; an empty dataset gives zero-width slices
    fn layout(overview: &Aggregates<CompanySize>) -> Vec<PieSlice> {
        let total = overview.total();
        let k = if total > 0 { TAU / total as f32 } else { 0.0 };

        let mut angle = 0.0;
        overview
            .iter()
            .map(|row| {
                let start_angle = angle;
                angle += row.count as f32 * k;
                PieSlice {
                    size: row.key,
                    count: row.count,
                    start_angle,
                    end_angle: angle,
                }
            })
            .collect()
    }

    pub fn slices(&self) -> &[PieSlice] {
        &self.slices
    }

    pub fn slice(&self, size: CompanySize) -> &PieSlice {
        &self.slices[size.index()]
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    fn arc_point(&self, center: Pos2, angle: f32) -> Pos2 {
        pos2(
            center.x + self.radius * angle.sin(),
            center.y - self.radius * angle.cos(),
        )
    }

    /// Filled wedges around `center`, split so every polygon stays convex
    pub fn shapes(&self, center: Pos2) -> Vec<Shape> {
        let mut shapes = Vec::new();

        for slice in self.slices.iter().filter(|s| s.sweep() > 0.0) {
            let fill = size_color(slice.size);
            let pieces = (slice.sweep() / FRAC_PI_2).ceil().max(1.0) as usize;
            let piece = slice.sweep() / pieces as f32;

            for p in 0..pieces {
                let from = slice.start_angle + piece * p as f32;
                let mut points = Vec::with_capacity(ARC_STEPS + 2);
                points.push(center);
                for step in 0..=ARC_STEPS {
                    let angle = from + piece * step as f32 / ARC_STEPS as f32;
                    points.push(self.arc_point(center, angle));
                }
                shapes.push(Shape::convex_polygon(points, fill, Stroke::NONE));
            }

            shapes.push(Shape::line_segment(
                [center, self.arc_point(center, slice.start_angle)],
                Stroke::new(2.0, Color32::WHITE),
            ));
        }

        shapes
    }
}

impl DashboardView for PieView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "PieView"
    }

    fn on_payload(&mut self, _payload: &UpdatePayload) {
        // Always shows the full dataset
    }

    fn on_frame_update(&mut self, _dt: f32) {}

    fn save_config(&self) -> Value {
        json!({
            "title": self.title,
            "radius": self.radius,
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(title) = config.get("title").and_then(|v| v.as_str()) {
            self.title = title.to_string();
        }
        if let Some(radius) = config.get("radius").and_then(|v| v.as_f64()) {
            self.radius = radius as f32;
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl PieView {
    /// View with a fresh id and the default title
    pub fn for_overview(overview: &Aggregates<CompanySize>, style: &ViewStyle) -> Self {
        Self::new(
            Uuid::new_v4(),
            "Distribution of Company Sizes".to_string(),
            overview,
            style,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xf_core::{aggregate, ExperienceLevel, Record};

    fn overview(sizes: &[CompanySize]) -> Aggregates<CompanySize> {
        let records: Vec<Record> = sizes
            .iter()
            .map(|&size| Record::new(ExperienceLevel::Mid, size, 2022, 1.0, 0.0))
            .collect();
        aggregate::<CompanySize, _>(&records)
    }

    #[test]
    fn test_slices_cover_full_turn_in_domain_order() {
        let view = PieView::for_overview(
            &overview(&[CompanySize::Large, CompanySize::Small, CompanySize::Medium, CompanySize::Medium]),
            &ViewStyle::default(),
        );

        let sizes: Vec<_> = view.slices().iter().map(|s| s.size).collect();
        assert_eq!(sizes, vec![CompanySize::Small, CompanySize::Medium, CompanySize::Large]);

        assert_eq!(view.slices()[0].start_angle, 0.0);
        assert!((view.slices()[2].end_angle - TAU).abs() < 1e-5);
        assert!((view.slice(CompanySize::Medium).sweep() - TAU / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_missing_size_has_empty_slice() {
        let view = PieView::for_overview(&overview(&[CompanySize::Small]), &ViewStyle::default());

        assert_eq!(view.slice(CompanySize::Medium).count, 0);
        assert_eq!(view.slice(CompanySize::Medium).sweep(), 0.0);
        // A full circle in four convex pieces plus one separator
        assert_eq!(view.shapes(Pos2::ZERO).len(), 5);
    }

    #[test]
    fn test_empty_dataset() {
        let view = PieView::for_overview(&overview(&[]), &ViewStyle::default());
        assert!(view.slices().iter().all(|s| s.sweep() == 0.0));
        assert!(view.shapes(Pos2::ZERO).is_empty());
    }
}
