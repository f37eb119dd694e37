//! Dashboard view abstraction - base trait for the coordinated views

use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde_json::Value;
use uuid::Uuid;

use xf_core::{UpdatePayload, UpdateSubscriber};

/// Unique identifier for a dashboard view
pub type ViewId = Uuid;

/// Base trait for all dashboard views
pub trait DashboardView: Send + Sync {
    /// Get the unique ID of this view
    fn id(&self) -> ViewId;

    /// Get the title of this view
    fn title(&self) -> &str;

    /// Get the view type (for serialization)
    fn view_type(&self) -> &str;

    /// Retarget the view to a freshly published payload
    fn on_payload(&mut self, payload: &UpdatePayload);

    /// Called each frame for updates
    fn on_frame_update(&mut self, dt: f32);

    /// Whether any transition is still running
    fn is_animating(&self) -> bool {
        false
    }

    /// Save configuration
    fn save_config(&self) -> Value;

    /// Load configuration
    fn load_config(&mut self, config: Value);

    /// Get as any for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Get as any mut for downcasting
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// Shared, lockable view that the engine can notify directly.
///
/// Notifications older than the last applied revision are dropped, so
/// payloads published from different threads never roll a view back.
pub struct ViewHandle<V> {
    view: RwLock<V>,
    applied: Mutex<u64>,
}

impl<V: DashboardView> ViewHandle<V> {
    pub fn new(view: V) -> Self {
        Self {
            view: RwLock::new(view),
            applied: Mutex::new(0),
        }
    }

    /// Revision of the last payload delivered through [`UpdateSubscriber`]
    pub fn applied_revision(&self) -> u64 {
        *self.applied.lock()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, V> {
        self.view.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, V> {
        self.view.write()
    }
}

impl<V: DashboardView> UpdateSubscriber for ViewHandle<V> {
    fn on_update(&self, revision: u64, payload: &UpdatePayload) {
        // Held until the payload is applied so two updates cannot interleave
        let mut applied = self.applied.lock();
        if revision <= *applied {
            tracing::debug!(
                "{} skipped stale revision {} (at {})",
                self.view.read().view_type(),
                revision,
                *applied
            );
            return;
        }
        *applied = revision;
        self.view.write().on_payload(payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::BarView;
    use xf_core::{CompanySize, CrossFilterEngine, EngineConfig, ExperienceLevel, Record, RecordStore};

    #[test]
    fn test_older_revision_is_ignored() {
        let store = RecordStore::new(vec![
            Record::new(ExperienceLevel::Entry, CompanySize::Small, 2021, 50_000.0, 50.0),
            Record::new(ExperienceLevel::Senior, CompanySize::Medium, 2022, 150_000.0, 100.0),
        ]);
        let engine = CrossFilterEngine::new(store, &EngineConfig::default());
        let selected = engine.on_category_click(ExperienceLevel::Senior);
        let cleared = engine.on_category_click(ExperienceLevel::Senior);

        let handle = ViewHandle::new(BarView::default());
        handle.on_update(2, &cleared);
        // revision 1 arrives late, e.g. from a slower thread
        handle.on_update(1, &selected);

        assert_eq!(handle.applied_revision(), 2);
        assert_eq!(handle.read().bar(ExperienceLevel::Entry).target_opacity(), 1.0);

        handle.on_update(3, &selected);
        assert_eq!(handle.applied_revision(), 3);
        assert_eq!(handle.read().bar(ExperienceLevel::Entry).target_opacity(), 0.5);
    }
}
