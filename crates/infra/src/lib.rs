//! Infrastructure layer: storage collaborators, orchestration, background workers.
//!
//! The domain crates stay pure; everything that reads or writes shared state
//! (order store, catalog, notification bus) lives here.

pub mod catalog_store;
pub mod notifications;
pub mod order_store;
pub mod status_service;
pub mod workers;


pub use catalog_store::{CatalogProvider, InMemoryCatalog};
pub use notifications::{CustomerNotifier, LoggingNotifier, NotifyError, OrderNotification};
pub use order_store::{InMemoryOrderStore, OrderStore, OrderStoreError};
pub use status_service::{OrderServiceError, OrderStatusService};
pub use workers::notification_worker::{NotificationWorker, WorkerHandle};
