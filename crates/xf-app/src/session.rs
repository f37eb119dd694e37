//! Scripted interaction sessions replayed against a dashboard

use std::path::Path;

use anyhow::{Context, Result};
use egui::pos2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use xf_core::{Dimension, InteractionEvent};
use xf_views::Dashboard;

use crate::config::FrameConfig;

/// One scripted user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionStep {
    /// Engine event, e.g. `{"kind": "category_clicked", "category": "SE"}`
    Event(InteractionEvent),

    /// Click at a point of the bar chart, in plot coordinates
    ClickBar { click_bar: [f32; 2] },

    /// Pixel brush on one axis of the parallel-coordinates plot
    BrushAxis { brush_axis: Dimension, y0: f32, y1: f32 },

    /// Let transitions run for a while
    Wait { wait_ms: u64 },
}

impl SessionStep {
    fn describe(&self) -> String {
        match self {
            SessionStep::Event(InteractionEvent::BrushChanged { dimension, extent }) => match extent {
                Some(extent) => format!("brush {} {:?}", dimension, extent),
                None => format!("clear brush on {}", dimension),
            },
            SessionStep::Event(InteractionEvent::CategoryClicked { category }) => {
                format!("click category {}", category)
            }
            SessionStep::ClickBar { click_bar } => {
                format!("click bar chart at ({}, {})", click_bar[0], click_bar[1])
            }
            SessionStep::BrushAxis { brush_axis, y0, y1 } => {
                format!("brush {} axis from {}px to {}px", brush_axis, y0, y1)
            }
            SessionStep::Wait { wait_ms } => format!("wait {}ms", wait_ms),
        }
    }
}

/// Outcome of replaying one step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub description: String,
    /// `None` for steps that do not talk to the engine
    pub accepted: Option<bool>,
    pub revision: u64,
    pub filtered_count: usize,
    pub emphasized_count: usize,
    pub frames: usize,
}

/// Ordered list of steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    pub steps: Vec<SessionStep>,
}

impl Default for Session {
    /// Brush high salaries, then highlight senior staff
    fn default() -> Self {
        Self {
            steps: vec![
                SessionStep::Event(InteractionEvent::brush_data(
                    Dimension::SalaryInUsd,
                    100_000.0,
                    200_000.0,
                )),
                SessionStep::Event(InteractionEvent::category_clicked("SE")),
            ],
        }
    }
}

impl Session {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading session {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing session {}", path.display()))
    }

    /// Run every step in order, letting transitions settle after each one
    pub fn replay(&self, dashboard: &Dashboard, frame: &FrameConfig) -> Vec<StepReport> {
        let dt = frame.frame_secs();
        let mut reports = Vec::with_capacity(self.steps.len());

        for (index, step) in self.steps.iter().enumerate() {
            let description = step.describe();
            debug!("Step {}: {}", index, description);

            let accepted = match step {
                SessionStep::Event(event) => Some(dashboard.handle(event).is_ok()),
                SessionStep::ClickBar { click_bar } => {
                    Some(dashboard.click_bar(pos2(click_bar[0], click_bar[1])).is_some())
                }
                SessionStep::BrushAxis { brush_axis, y0, y1 } => {
                    Some(dashboard.brush_axis(*brush_axis, *y0, *y1).is_ok())
                }
                SessionStep::Wait { .. } => None,
            };

            let frames = match step {
                SessionStep::Wait { wait_ms } => {
                    let frames = wait_ms.div_ceil(frame.frame_ms.max(1)) as usize;
                    for _ in 0..frames {
                        dashboard.tick(dt);
                    }
                    frames
                }
                _ => {
                    let mut frames = 0;
                    while dashboard.is_animating() && frames < frame.max_settle_frames {
                        dashboard.tick(dt);
                        frames += 1;
                    }
                    frames
                }
            };

            let engine = dashboard.engine();
            let payload = engine.payload();
            let report = StepReport {
                index,
                description,
                accepted,
                revision: engine.revision(),
                filtered_count: payload.filtered_count,
                emphasized_count: payload.emphasized_count(),
                frames,
            };

            info!(
                "Step {} ({}): {} records pass the brushes, {} emphasized, settled in {} frames",
                index, report.description, report.filtered_count, report.emphasized_count, frames
            );
            reports.push(report);
        }

        reports
    }
}
