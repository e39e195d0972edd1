use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use glowcart_core::{ActorId, Aggregate, AggregateRoot, OrderId};
use glowcart_events::Event;

use crate::status::{InvalidTransition, OrderStatus};

/// Payment state, owned by the payment verification flow.
///
/// Status transitions never touch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

/// One audit-trail record; the history is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
    pub notes: String,
    pub changed_by: ActorId,
}

/// Aggregate root: Order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    customer_email: String,
    /// Total in smallest currency unit (e.g., cents).
    total: u64,
    payment_status: PaymentStatus,
    status: OrderStatus,
    status_history: Vec<StatusHistoryEntry>,
    tracking_number: Option<String>,
    created_at: DateTime<Utc>,
    version: u64,
}

impl Order {
    /// A freshly placed order: `pending`, empty history, version 0.
    pub fn place(
        id: OrderId,
        customer_email: impl Into<String>,
        total: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_email: customer_email.into(),
            total,
            payment_status: PaymentStatus::Pending,
            status: OrderStatus::Pending,
            status_history: Vec::new(),
            tracking_number: None,
            created_at,
            version: 0,
        }
    }

    /// Builder-style override used when loading orders whose payment settled.
    pub fn with_payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = payment_status;
        self
    }

    pub fn id_typed(&self) -> &OrderId {
        &self.id
    }

    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn status_history(&self) -> &[StatusHistoryEntry] {
        &self.status_history
    }

    pub fn tracking_number(&self) -> Option<&str> {
        self.tracking_number.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Statuses the order may move to next (for UI affordances).
    pub fn allowed_next(&self) -> &'static [OrderStatus] {
        self.status.allowed_next()
    }
}

impl AggregateRoot for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: ChangeOrderStatus.
///
/// `occurred_at` becomes the history timestamp; callers pass the wall clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeOrderStatus {
    pub to: OrderStatus,
    pub notes: Option<String>,
    pub tracking_number: Option<String>,
    pub changed_by: ActorId,
    pub occurred_at: DateTime<Utc>,
}

impl ChangeOrderStatus {
    pub fn new(to: OrderStatus, changed_by: ActorId, occurred_at: DateTime<Utc>) -> Self {
        Self {
            to,
            notes: None,
            tracking_number: None,
            changed_by,
            occurred_at,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_tracking_number(mut self, tracking_number: impl Into<String>) -> Self {
        self.tracking_number = Some(tracking_number.into());
        self
    }
}

/// Event: OrderStatusChanged.
///
/// `tracking_number` is only ever set when `entry.status` is `shipped`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusChanged {
    pub order_id: OrderId,
    pub from: OrderStatus,
    pub entry: StatusHistoryEntry,
    pub tracking_number: Option<String>,
}

impl Event for OrderStatusChanged {
    fn event_type(&self) -> &'static str {
        "orders.order.status_changed"
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.entry.timestamp
    }
}

impl Aggregate for Order {
    type Command = ChangeOrderStatus;
    type Event = OrderStatusChanged;
    type Error = InvalidTransition;

    fn apply(&mut self, event: &Self::Event) {
        self.status = event.entry.status;
        self.status_history.push(event.entry.clone());
        if let Some(tracking) = &event.tracking_number {
            self.tracking_number = Some(tracking.clone());
        }

        self.version += 1;
    }

    fn handle(&self, cmd: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        Ok(vec![self.decide(cmd)?])
    }
}

impl Order {
    fn decide(&self, cmd: &ChangeOrderStatus) -> Result<OrderStatusChanged, InvalidTransition> {
        if !self.status.can_transition_to(cmd.to) {
            return Err(InvalidTransition::new(self.status, cmd.to));
        }

        let tracking_number = match cmd.to {
            OrderStatus::Shipped => cmd
                .tracking_number
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            _ => None,
        };

        Ok(OrderStatusChanged {
            order_id: self.id.clone(),
            from: self.status,
            entry: StatusHistoryEntry {
                status: cmd.to,
                timestamp: cmd.occurred_at,
                notes: cmd.notes.clone().unwrap_or_default(),
                changed_by: cmd.changed_by.clone(),
            },
            tracking_number,
        })
    }
}

/// Validate and apply a status change in one step.
///
/// On success the order has exactly one more history entry, which is
/// returned. On failure the order is untouched.
pub fn apply_transition(
    order: &mut Order,
    cmd: &ChangeOrderStatus,
) -> Result<StatusHistoryEntry, InvalidTransition> {
    let event = order.decide(cmd)?;
    order.apply(&event);
    Ok(event.entry)
}
