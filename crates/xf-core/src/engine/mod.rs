mod cross_filter;
mod payload;
mod subscriber;

pub use cross_filter::CrossFilterEngine;
pub use payload::UpdatePayload;
pub use subscriber::UpdateSubscriber;
