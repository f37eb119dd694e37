//! View adapters for the salary dashboard
//!
//! Views receive [`xf_core::UpdatePayload`]s and turn them into animated
//! geometry; user gestures come back out as [`xf_core::InteractionEvent`]s.

pub mod bar;
pub mod dashboard;
pub mod layout;
pub mod parallel;
pub mod pie;
pub mod style;
pub mod transition;
mod view;

pub use bar::{BarMark, BarView};
pub use dashboard::Dashboard;
pub use parallel::{LineMark, ParallelView};
pub use pie::{PieSlice, PieView};
pub use style::ViewStyle;
pub use transition::Tween;
pub use view::{DashboardView, ViewHandle, ViewId};
