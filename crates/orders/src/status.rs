use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use glowcart_core::{DomainError, DomainResult};

/// Order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Legal moves out of each status. `Delivered` and `Cancelled` are terminal.
pub const TRANSITIONS: &[(OrderStatus, &[OrderStatus])] = &[
    (
        OrderStatus::Pending,
        &[OrderStatus::Processing, OrderStatus::Cancelled],
    ),
    (
        OrderStatus::Processing,
        &[OrderStatus::Shipped, OrderStatus::Cancelled],
    ),
    (OrderStatus::Shipped, &[OrderStatus::Delivered]),
    (OrderStatus::Delivered, &[]),
    (OrderStatus::Cancelled, &[]),
];

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Statuses reachable in one step, in table order.
    pub fn allowed_next(self) -> &'static [OrderStatus] {
        TRANSITIONS
            .iter()
            .find(|(from, _)| *from == self)
            .map(|(_, allowed)| *allowed)
            .unwrap_or(&[])
    }

    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        self.allowed_next().contains(&to)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let wanted = s.trim();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown order status '{wanted}' (expected one of: pending, processing, shipped, delivered, cancelled)"
                ))
            })
    }
}

/// Requested status is not reachable from the current one.
///
/// `allowed` lists what the caller may request instead, for display.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("cannot change order status from {from} to {to} (allowed: {})", display_list(.allowed))]
pub struct InvalidTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub allowed: Vec<OrderStatus>,
}

impl InvalidTransition {
    pub fn new(from: OrderStatus, to: OrderStatus) -> Self {
        Self {
            from,
            to,
            allowed: from.allowed_next().to_vec(),
        }
    }
}

fn display_list(statuses: &[OrderStatus]) -> String {
    if statuses.is_empty() {
        return "none".to_string();
    }
    statuses
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_status_once() {
        for status in OrderStatus::ALL {
            let rows = TRANSITIONS.iter().filter(|(from, _)| *from == status).count();
            assert_eq!(rows, 1, "{status}");
        }
    }

    #[test]
    fn allowed_transitions_match_lifecycle() {
        use OrderStatus::*;
        assert_eq!(Pending.allowed_next(), &[Processing, Cancelled]);
        assert_eq!(Processing.allowed_next(), &[Shipped, Cancelled]);
        assert_eq!(Shipped.allowed_next(), &[Delivered]);
        assert!(Delivered.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Shipped.can_transition_to(Cancelled));
    }

    #[test]
    fn parses_known_labels_only() {
        assert_eq!(" Shipped ".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        let err = "refunded".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("refunded")));
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }

    #[test]
    fn invalid_transition_lists_alternatives() {
        let err = InvalidTransition::new(OrderStatus::Pending, OrderStatus::Shipped);
        assert_eq!(err.allowed, vec![OrderStatus::Processing, OrderStatus::Cancelled]);
        assert_eq!(
            err.to_string(),
            "cannot change order status from pending to shipped (allowed: processing, cancelled)"
        );

        let terminal = InvalidTransition::new(OrderStatus::Delivered, OrderStatus::Pending);
        assert!(terminal.to_string().ends_with("(allowed: none)"));
    }
}
