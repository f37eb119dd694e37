//! Interaction events raised by view adapters

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;

/// Extent of a brush on one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "space", rename_all = "snake_case")]
pub enum BrushExtent {
    /// Raw brush selection in axis pixels, in either order
    Pixels { y0: f64, y1: f64 },
    /// Already converted to data space; must be ascending
    Data { min: f64, max: f64 },
}

/// Everything a view can ask the engine to do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InteractionEvent {
    /// Brush started, moved or ended on an axis; `None` clears it
    BrushChanged {
        dimension: Dimension,
        #[serde(default)]
        extent: Option<BrushExtent>,
    },

    /// A category bar was clicked; carries the dataset code (`EN`, `SE`, ...)
    CategoryClicked { category: String },
}

impl InteractionEvent {
    pub fn brush_pixels(dimension: Dimension, y0: f64, y1: f64) -> Self {
        Self::BrushChanged {
            dimension,
            extent: Some(BrushExtent::Pixels { y0, y1 }),
        }
    }

    pub fn brush_data(dimension: Dimension, min: f64, max: f64) -> Self {
        Self::BrushChanged {
            dimension,
            extent: Some(BrushExtent::Data { min, max }),
        }
    }

    pub fn clear_brush(dimension: Dimension) -> Self {
        Self::BrushChanged {
            dimension,
            extent: None,
        }
    }

    pub fn category_clicked(category: impl Into<String>) -> Self {
        Self::CategoryClicked {
            category: category.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_json_shape() {
        let json = r#"[
            {"kind": "brush_changed", "dimension": "salary_in_usd", "extent": {"space": "data", "min": 1.0, "max": 2.0}},
            {"kind": "brush_changed", "dimension": "work_year"},
            {"kind": "category_clicked", "category": "SE"}
        ]"#;

        let events: Vec<InteractionEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events[0], InteractionEvent::brush_data(Dimension::SalaryInUsd, 1.0, 2.0));
        assert_eq!(events[1], InteractionEvent::clear_brush(Dimension::WorkYear));
        assert_eq!(events[2], InteractionEvent::category_clicked("SE"));
    }
}
