//! Customer notification hook for order status changes.
//!
//! Dispatch is fire-and-forget: a failed notification is logged and dropped,
//! it never rolls back or blocks the status change that triggered it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use glowcart_core::OrderId;
use glowcart_events::Event;
use glowcart_orders::{Order, OrderStatus, OrderStatusChanged};

/// What the customer is told after a status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNotification {
    pub order_id: OrderId,
    pub customer_email: String,
    pub previous_status: OrderStatus,
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
    pub notes: String,
    pub occurred_at: DateTime<Utc>,
}

impl OrderNotification {
    /// Build from the order *after* the change and the event that changed it.
    pub fn from_change(order: &Order, change: &OrderStatusChanged) -> Self {
        Self {
            order_id: change.order_id.clone(),
            customer_email: order.customer_email().to_string(),
            previous_status: change.from,
            status: change.entry.status,
            tracking_number: order.tracking_number().map(str::to_string),
            notes: change.entry.notes.clone(),
            occurred_at: change.entry.timestamp,
        }
    }

    /// Subject line for the customer email.
    pub fn subject(&self) -> String {
        match self.status {
            OrderStatus::Pending => format!("Recibimos tu pedido {}", self.order_id),
            OrderStatus::Processing => format!("Estamos preparando tu pedido {}", self.order_id),
            OrderStatus::Shipped => format!("Tu pedido {} va en camino", self.order_id),
            OrderStatus::Delivered => format!("Tu pedido {} fue entregado", self.order_id),
            OrderStatus::Cancelled => format!("Tu pedido {} fue cancelado", self.order_id),
        }
    }
}

impl Event for OrderNotification {
    fn event_type(&self) -> &'static str {
        "orders.order.customer_notification"
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("notification rejected: {0}")]
    Rejected(String),

    #[error("notification transport failed: {0}")]
    Transport(String),
}

/// Delivers notifications to customers (SMTP, SMS, ...).
///
/// Credentials and transport settings belong to the implementation and are
/// injected where it is constructed.
pub trait CustomerNotifier: Send + Sync {
    fn notify(&self, notification: &OrderNotification) -> Result<(), NotifyError>;
}

impl<N> CustomerNotifier for std::sync::Arc<N>
where
    N: CustomerNotifier + ?Sized,
{
    fn notify(&self, notification: &OrderNotification) -> Result<(), NotifyError> {
        (**self).notify(notification)
    }
}

/// Notifier that only logs; the default when no transport is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

impl CustomerNotifier for LoggingNotifier {
    fn notify(&self, notification: &OrderNotification) -> Result<(), NotifyError> {
        if notification.customer_email.trim().is_empty() {
            return Err(NotifyError::Rejected(format!(
                "order {} has no customer email",
                notification.order_id
            )));
        }

        info!(
            order_id = %notification.order_id,
            to = %notification.customer_email,
            status = %notification.status,
            subject = %notification.subject(),
            "customer notification"
        );
        Ok(())
    }
}
