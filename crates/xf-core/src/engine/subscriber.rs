//! Update subscriber trait

use super::UpdatePayload;

/// Trait for views that need to respond to selection changes
pub trait UpdateSubscriber: Send + Sync {
    /// Called after every accepted interaction with the new target state.
    ///
    /// `revision` increases with every publication, so a subscriber notified
    /// from several threads can tell an older payload from a newer one.
    fn on_update(&self, revision: u64, payload: &UpdatePayload);
}
