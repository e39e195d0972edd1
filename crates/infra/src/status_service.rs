//! Order status change pipeline (application-level orchestration).
//!
//! ```text
//! ChangeOrderStatus
//!   ↓
//! 1. Load the order from the store
//!   ↓
//! 2. Decide + apply (pure transition guard)
//!   ↓
//! 3. Save with ExpectedVersion::Exact(read version)
//!   ↓
//! 4. Optionally publish a customer notification (best-effort)
//! ```
//!
//! The guard never sees a stale status that then gets written: if another
//! writer got in between steps 1 and 3, the conditional save fails and the
//! caller gets `OrderServiceError::Conflict`. Conflicts are surfaced, not
//! retried here.

use thiserror::Error;
use tracing::{info, warn};

use glowcart_core::{AggregateRoot, ExpectedVersion, OrderId};
use glowcart_events::{EventBus, EventEnvelope};
use glowcart_orders::{ChangeOrderStatus, InvalidTransition, Order, OrderStatus};

use crate::notifications::OrderNotification;
use crate::order_store::{OrderStore, OrderStoreError};

/// Aggregate type tag used on published envelopes.
pub const ORDER_AGGREGATE_TYPE: &str = "orders.order";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderServiceError {
    /// No order with this id.
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// The guard rejected the requested status.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    /// Optimistic concurrency failure or duplicate id.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other storage failure.
    #[error("order store failed: {0}")]
    Store(OrderStoreError),
}

impl From<OrderStoreError> for OrderServiceError {
    fn from(value: OrderStoreError) -> Self {
        match value {
            OrderStoreError::Concurrency(msg) => OrderServiceError::Conflict(msg),
            OrderStoreError::Duplicate(id) => {
                OrderServiceError::Conflict(format!("order {id} already exists"))
            }
            OrderStoreError::NotFound(id) => OrderServiceError::NotFound(id),
            other => OrderServiceError::Store(other),
        }
    }
}

/// Runs status changes against a store and publishes notifications to a bus.
///
/// - `S`: order store (`InMemoryOrderStore` in tests/dev)
/// - `B`: notification bus; publish failures are logged, never returned
#[derive(Debug)]
pub struct OrderStatusService<S, B> {
    store: S,
    bus: B,
}

impl<S, B> OrderStatusService<S, B> {
    pub fn new(store: S, bus: B) -> Self {
        Self { store, bus }
    }
}

impl<S, B> OrderStatusService<S, B>
where
    S: OrderStore,
    B: EventBus<EventEnvelope<OrderNotification>>,
{
    /// Persist a newly placed (pending) order.
    pub fn place_order(&self, order: Order) -> Result<Order, OrderServiceError> {
        self.store.insert(order.clone())?;
        info!(order_id = %order.id(), "order placed");
        Ok(order)
    }

    pub fn get_order(&self, order_id: &OrderId) -> Result<Order, OrderServiceError> {
        self.store
            .load(order_id)?
            .ok_or_else(|| OrderServiceError::NotFound(order_id.clone()))
    }

    /// Statuses the order may move to next, for UI affordances.
    pub fn allowed_transitions(
        &self,
        order_id: &OrderId,
    ) -> Result<Vec<OrderStatus>, OrderServiceError> {
        Ok(self.get_order(order_id)?.allowed_next().to_vec())
    }

    /// Validate and persist a status change; returns the updated order.
    ///
    /// When `notify_customer` is set and the change was saved, a notification
    /// is published. Publication failure does not affect the result.
    pub fn change_status(
        &self,
        order_id: &OrderId,
        command: ChangeOrderStatus,
        notify_customer: bool,
    ) -> Result<Order, OrderServiceError> {
        // 1) Load
        let mut order = self.get_order(order_id)?;
        let expected = ExpectedVersion::Exact(order.version());

        // 2) Decide + apply
        let changes = match glowcart_events::execute(&mut order, &command) {
            Ok(changes) => changes,
            Err(err) => {
                info!(
                    order_id = %order_id,
                    from = %err.from,
                    to = %err.to,
                    "rejected order status change"
                );
                return Err(err.into());
            }
        };

        // 3) Conditional save
        self.store.save(order.clone(), expected)?;
        info!(
            order_id = %order_id,
            status = %order.status(),
            changed_by = %command.changed_by,
            version = order.version(),
            "order status changed"
        );

        // 4) Notify (fire-and-forget)
        if notify_customer {
            for change in &changes {
                let notification = OrderNotification::from_change(&order, change);
                let envelope = EventEnvelope::wrap(
                    order_id.as_str(),
                    ORDER_AGGREGATE_TYPE,
                    order.version(),
                    notification,
                );
                if let Err(err) = self.bus.publish(envelope) {
                    warn!(order_id = %order_id, error = ?err, "customer notification not published");
                }
            }
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use glowcart_core::ActorId;
    use glowcart_events::{InMemoryEventBus, Subscription};

    use super::*;
    use crate::order_store::InMemoryOrderStore;

    type Bus = Arc<InMemoryEventBus<EventEnvelope<OrderNotification>>>;

    fn setup() -> (OrderStatusService<Arc<InMemoryOrderStore>, Bus>, Subscription<EventEnvelope<OrderNotification>>) {
        let store = Arc::new(InMemoryOrderStore::new());
        let bus: Bus = Arc::new(InMemoryEventBus::new());
        let sub = bus.subscribe();
        let service = OrderStatusService::new(store, bus);
        service
            .place_order(Order::place(OrderId::new("o-1"), "ana@example.com", 9_900, Utc::now()))
            .unwrap();
        (service, sub)
    }

    fn change(to: OrderStatus) -> ChangeOrderStatus {
        ChangeOrderStatus::new(to, ActorId::new("admin@glowcart.test"), Utc::now())
    }

    fn id() -> OrderId {
        OrderId::new("o-1")
    }

    #[test]
    fn legal_change_is_persisted() {
        let (service, _sub) = setup();

        let updated = service.change_status(&id(), change(OrderStatus::Processing), false).unwrap();
        assert_eq!(updated.status(), OrderStatus::Processing);

        let stored = service.get_order(&id()).unwrap();
        assert_eq!(stored, updated);
        assert_eq!(stored.status_history().len(), 1);
    }

    #[test]
    fn illegal_change_is_not_persisted() {
        let (service, _sub) = setup();

        let err = service.change_status(&id(), change(OrderStatus::Shipped), false).unwrap_err();
        match err {
            OrderServiceError::InvalidTransition(e) => {
                assert_eq!(e.from, OrderStatus::Pending);
                assert_eq!(e.allowed, vec![OrderStatus::Processing, OrderStatus::Cancelled]);
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }

        let stored = service.get_order(&id()).unwrap();
        assert_eq!(stored.status(), OrderStatus::Pending);
        assert!(stored.status_history().is_empty());
    }

    #[test]
    fn unknown_order_is_not_found() {
        let (service, _sub) = setup();
        let err = service
            .change_status(&OrderId::new("nope"), change(OrderStatus::Processing), false)
            .unwrap_err();
        assert_eq!(err, OrderServiceError::NotFound(OrderId::new("nope")));
    }

    #[test]
    fn notification_published_only_when_requested() {
        let (service, sub) = setup();

        service.change_status(&id(), change(OrderStatus::Processing), false).unwrap();
        assert!(sub.try_recv().is_err());

        let cmd = change(OrderStatus::Shipped).with_tracking_number("TRK-77");
        service.change_status(&id(), cmd, true).unwrap();

        let envelope = sub.try_recv().unwrap();
        assert_eq!(envelope.aggregate_id(), "o-1");
        assert_eq!(envelope.aggregate_type(), ORDER_AGGREGATE_TYPE);
        assert_eq!(envelope.sequence_number(), 2);
        assert_eq!(envelope.event_type(), "orders.order.customer_notification");
        assert_eq!(envelope.payload().status, OrderStatus::Shipped);
        assert_eq!(envelope.payload().tracking_number.as_deref(), Some("TRK-77"));
    }

    #[test]
    fn allowed_transitions_follow_current_status() {
        let (service, _sub) = setup();
        assert_eq!(
            service.allowed_transitions(&id()).unwrap(),
            vec![OrderStatus::Processing, OrderStatus::Cancelled]
        );
        service.change_status(&id(), change(OrderStatus::Cancelled), false).unwrap();
        assert!(service.allowed_transitions(&id()).unwrap().is_empty());
    }

    #[test]
    fn placing_same_id_twice_conflicts() {
        let (service, _sub) = setup();
        let err = service
            .place_order(Order::place(id(), "x@example.com", 1, Utc::now()))
            .unwrap_err();
        assert!(matches!(err, OrderServiceError::Conflict(_)));
    }
}
