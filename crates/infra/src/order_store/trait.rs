use std::sync::Arc;

use thiserror::Error;

use glowcart_core::{ExpectedVersion, OrderId};
use glowcart_orders::Order;

/// Order store operation error.
///
/// These are **infrastructure errors** (storage, concurrency) as opposed to the
/// domain's `InvalidTransition`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderStoreError {
    #[error("optimistic concurrency check failed: {0}")]
    Concurrency(String),

    #[error("order {0} already exists")]
    Duplicate(OrderId),

    #[error("order {0} not found")]
    NotFound(OrderId),

    /// The write would rewrite or drop status history.
    #[error("invalid write: {0}")]
    InvalidWrite(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence boundary for orders.
///
/// ## Write semantics
///
/// `save()` is a conditional update: it succeeds only while the stored order is
/// still at `expected_version`. Two writers racing on the same order therefore
/// cannot both win; the loser gets `OrderStoreError::Concurrency` and must
/// reload before deciding again.
///
/// Implementations must also refuse writes whose status history does not
/// extend the stored history (append-only audit trail).
pub trait OrderStore: Send + Sync {
    /// Persist a newly placed order.
    fn insert(&self, order: Order) -> Result<(), OrderStoreError>;

    /// Load the current order state.
    fn load(&self, order_id: &OrderId) -> Result<Option<Order>, OrderStoreError>;

    /// Replace the stored order if its version still matches.
    fn save(&self, order: Order, expected_version: ExpectedVersion) -> Result<(), OrderStoreError>;
}

impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    fn insert(&self, order: Order) -> Result<(), OrderStoreError> {
        (**self).insert(order)
    }

    fn load(&self, order_id: &OrderId) -> Result<Option<Order>, OrderStoreError> {
        (**self).load(order_id)
    }

    fn save(&self, order: Order, expected_version: ExpectedVersion) -> Result<(), OrderStoreError> {
        (**self).save(order, expected_version)
    }
}
