use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use glowcart_core::{ActorId, OrderId};
use glowcart_orders::{OrderStatus, PaymentStatus};

/// Header naming who performs an admin action.
pub const ACTOR_HEADER: &str = "x-actor";

/// Used when no `x-actor` header is sent.
pub const DEFAULT_ACTOR: &str = "admin";

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    /// Generated when omitted.
    pub id: Option<String>,
    pub customer_email: String,
    pub total: u64,
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    /// Parsed by the handler so unknown values get a 400 with a clear message.
    pub status: String,
    pub notes: Option<String>,
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub notify_customer: bool,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct TransitionsResponse {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub allowed: Vec<OrderStatus>,
}

pub fn actor_from_headers(headers: &HeaderMap) -> ActorId {
    headers
        .get(ACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ActorId::new)
        .unwrap_or_else(|| ActorId::new(DEFAULT_ACTOR))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn actor_defaults_to_admin() {
        let mut headers = HeaderMap::new();
        assert_eq!(actor_from_headers(&headers).as_str(), "admin");

        headers.insert(ACTOR_HEADER, HeaderValue::from_static("  "));
        assert_eq!(actor_from_headers(&headers).as_str(), "admin");

        headers.insert(ACTOR_HEADER, HeaderValue::from_static("maria@glowcart.test"));
        assert_eq!(actor_from_headers(&headers).as_str(), "maria@glowcart.test");
    }

    #[test]
    fn notify_defaults_off() {
        let req: ChangeStatusRequest = serde_json::from_str(r#"{"status":"processing"}"#).unwrap();
        assert!(!req.notify_customer);
        assert!(req.notes.is_none());
    }
}
