//! Colors, sizes and timings shared by the dashboard views

use egui::Color32;
use serde::{Deserialize, Serialize};

use xf_core::{Category, CompanySize, ExperienceLevel};

/// Stroke color of lines outside the current emphasis
pub const MUTED_LINE: Color32 = Color32::from_rgb(0xdd, 0xdd, 0xdd);

/// Categorical color of an experience level
pub fn level_color(level: ExperienceLevel) -> Color32 {
    const PALETTE: [Color32; 4] = [
        Color32::from_rgb(0x1f, 0x77, 0xb4), // Blue
        Color32::from_rgb(0xff, 0x7f, 0x0e), // Orange
        Color32::from_rgb(0x2c, 0xa0, 0x2c), // Green
        Color32::from_rgb(0xd6, 0x27, 0x28), // Red
    ];
    PALETTE[level.index()]
}

/// Slice color of a company size
pub fn size_color(size: CompanySize) -> Color32 {
    const PALETTE: [Color32; 3] = [
        Color32::from_rgb(0x1f, 0x77, 0xb4),
        Color32::from_rgb(0x2c, 0xa0, 0x2c),
        Color32::from_rgb(0xff, 0x7f, 0x0e),
    ];
    PALETTE[size.index()]
}

/// Apply an opacity in `[0, 1]` to an opaque color
pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Linear blend between two opaque colors
pub fn mix(from: Color32, to: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color32::from_rgb(
        channel(from.r(), to.r()),
        channel(from.g(), to.g()),
        channel(from.b(), to.b()),
    )
}

/// Layout and animation settings for the three views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewStyle {
    /// Bar chart plot area
    pub bar_width: f32,
    pub bar_height: f32,

    /// Band padding between bars, as a fraction of the step
    pub bar_padding: f32,

    pub bar_emphasized_opacity: f32,
    pub bar_muted_opacity: f32,

    /// Width of the parallel-coordinates plot; its height is the engine's axis height
    pub parallel_width: f32,

    /// Half-width of the brushable strip around each axis
    pub brush_half_width: f32,

    pub line_width: f32,
    pub line_emphasized_opacity: f32,
    pub line_muted_opacity: f32,

    pub pie_radius: f32,

    /// Transition durations in milliseconds
    pub bar_height_ms: u64,
    pub bar_opacity_ms: u64,
    pub line_ms: u64,
}

impl Default for ViewStyle {
    fn default() -> Self {
        Self {
            bar_width: 420.0,
            bar_height: 400.0,
            bar_padding: 0.2,
            bar_emphasized_opacity: 1.0,
            bar_muted_opacity: 0.5,
            parallel_width: 400.0,
            brush_half_width: 10.0,
            line_width: 1.5,
            line_emphasized_opacity: 0.7,
            line_muted_opacity: 0.05,
            pie_radius: 120.0,
            bar_height_ms: 500,
            bar_opacity_ms: 100,
            line_ms: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_follow_domain_order() {
        assert_eq!(level_color(ExperienceLevel::Entry), Color32::from_rgb(31, 119, 180));
        assert_eq!(level_color(ExperienceLevel::Executive), Color32::from_rgb(214, 39, 40));
        assert_eq!(size_color(CompanySize::Medium), Color32::from_rgb(44, 160, 44));
        assert_eq!(size_color(CompanySize::Large), Color32::from_rgb(255, 127, 14));
    }

    #[test]
    fn test_mix_endpoints() {
        let to = level_color(ExperienceLevel::Mid);
        assert_eq!(mix(MUTED_LINE, to, 0.0), MUTED_LINE);
        assert_eq!(mix(MUTED_LINE, to, 1.0), to);
        assert_eq!(with_opacity(to, 1.0), to);
        assert_eq!(with_opacity(to, 0.0).a(), 0);
    }

    #[test]
    fn test_partial_style_json() {
        let style: ViewStyle = serde_json::from_str(r#"{"line_ms": 0, "pie_radius": 80.0}"#).unwrap();
        assert_eq!(style.line_ms, 0);
        assert_eq!(style.pie_radius, 80.0);
        assert_eq!(style.bar_padding, 0.2);
    }
}
