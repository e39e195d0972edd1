use std::sync::Arc;

use tracing::info;

use glowcart_catalog::CatalogProduct;
use glowcart_core::{OrderId, ProductId};
use glowcart_events::{EventEnvelope, InMemoryEventBus};
use glowcart_infra::{
    CatalogProvider, InMemoryCatalog, InMemoryOrderStore, LoggingNotifier, NotificationWorker,
    OrderNotification, OrderServiceError, OrderStatusService, WorkerHandle,
};
use glowcart_orders::{ChangeOrderStatus, Order};
use glowcart_recommendations::{Recommendation, RecommendationEngine};

use crate::config::ApiConfig;

pub type NotificationBus = Arc<InMemoryEventBus<EventEnvelope<OrderNotification>>>;
pub type OrderService = OrderStatusService<Arc<InMemoryOrderStore>, NotificationBus>;

/// Everything the handlers need, shared behind an `Arc`.
pub struct AppServices {
    catalog: Arc<InMemoryCatalog>,
    engine: RecommendationEngine,
    orders: OrderService,
    notifications_enabled: bool,
    // Dropping the services drops the bus, which stops the worker.
    _notification_worker: Option<WorkerHandle>,
}

/// In-memory wiring (dev/test): catalog + order store + notification bus.
pub fn build_services(config: &ApiConfig) -> std::io::Result<AppServices> {
    let catalog = Arc::new(InMemoryCatalog::new());
    let store = Arc::new(InMemoryOrderStore::new());
    let bus: NotificationBus = Arc::new(InMemoryEventBus::new());

    let worker = if config.notifications {
        Some(NotificationWorker::spawn(
            "order-notifications",
            bus.clone(),
            LoggingNotifier,
        )?)
    } else {
        info!("customer notifications disabled");
        None
    };

    Ok(AppServices {
        catalog,
        engine: RecommendationEngine::with_default_limit(config.recommendation_limit),
        orders: OrderStatusService::new(store, bus),
        notifications_enabled: config.notifications,
        _notification_worker: worker,
    })
}

impl AppServices {
    pub fn upsert_product(&self, product: CatalogProduct) {
        info!(product_id = %product.id, active = product.active, "catalog product upserted");
        self.catalog.upsert(product);
    }

    /// `None` when the reference product is unknown or inactive.
    pub fn recommendations(
        &self,
        product_id: &ProductId,
        limit: Option<usize>,
    ) -> Option<Vec<Recommendation>> {
        let current = self
            .catalog
            .get(product_id)
            .filter(CatalogProduct::is_active)?
            .to_lite();
        let snapshot = self.catalog.active_snapshot();
        Some(self.engine.recommend(&current, &snapshot, limit))
    }

    pub fn place_order(&self, order: Order) -> Result<Order, OrderServiceError> {
        self.orders.place_order(order)
    }

    pub fn get_order(&self, order_id: &OrderId) -> Result<Order, OrderServiceError> {
        self.orders.get_order(order_id)
    }

    /// `notify_customer` is ignored when notifications are switched off.
    pub fn change_status(
        &self,
        order_id: &OrderId,
        command: ChangeOrderStatus,
        notify_customer: bool,
    ) -> Result<Order, OrderServiceError> {
        self.orders
            .change_status(order_id, command, notify_customer && self.notifications_enabled)
    }
}
