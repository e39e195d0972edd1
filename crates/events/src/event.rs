use chrono::{DateTime, Utc};

/// Something that happened to an order (or any aggregate) and can be
/// published after the state change is stored.
///
/// Payload schemas change over time; `version` lets consumers tell them apart.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Dotted name, e.g. "orders.order.status_changed".
    fn event_type(&self) -> &'static str;

    fn version(&self) -> u32;

    /// Business time of the change, not publication time.
    fn occurred_at(&self) -> DateTime<Utc>;
}
