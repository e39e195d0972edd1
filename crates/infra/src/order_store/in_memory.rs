use std::collections::HashMap;
use std::sync::RwLock;

use glowcart_core::{AggregateRoot, ExpectedVersion, OrderId};
use glowcart_orders::Order;

use super::r#trait::{OrderStore, OrderStoreError};

/// In-memory order store.
///
/// Intended for tests/dev. The write lock makes check-and-set atomic.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.read().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OrderStore for InMemoryOrderStore {
    fn insert(&self, order: Order) -> Result<(), OrderStoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| OrderStoreError::Unavailable("lock poisoned".to_string()))?;

        let id = order.id().clone();
        if orders.contains_key(&id) {
            return Err(OrderStoreError::Duplicate(id));
        }
        orders.insert(id, order);
        Ok(())
    }

    fn load(&self, order_id: &OrderId) -> Result<Option<Order>, OrderStoreError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| OrderStoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(orders.get(order_id).cloned())
    }

    fn save(&self, order: Order, expected_version: ExpectedVersion) -> Result<(), OrderStoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| OrderStoreError::Unavailable("lock poisoned".to_string()))?;

        let id = order.id().clone();
        let current = orders
            .get(&id)
            .ok_or_else(|| OrderStoreError::NotFound(id.clone()))?;

        expected_version
            .check(current.version())
            .map_err(|e| OrderStoreError::Concurrency(format!("order {id}: {e}")))?;

        let stored = current.status_history();
        let incoming = order.status_history();
        if incoming.len() < stored.len() || incoming[..stored.len()] != *stored {
            return Err(OrderStoreError::InvalidWrite(format!(
                "order {id}: status history must only grow"
            )));
        }

        orders.insert(id, order);
        Ok(())
    }
}
