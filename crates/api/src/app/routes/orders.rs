use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::Utc;
use uuid::Uuid;

use glowcart_core::OrderId;
use glowcart_orders::{ChangeOrderStatus, Order, OrderStatus};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(place_order))
        .route("/:id", get(get_order))
        .route("/:id/transitions", get(get_transitions))
        .route("/:id/status", patch(change_status))
}

fn parse_order_id(raw: &str) -> Result<OrderId, axum::response::Response> {
    raw.parse().map_err(errors::domain_error_to_response)
}

pub async fn place_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::PlaceOrderRequest>,
) -> axum::response::Response {
    let id = match body.id.as_deref() {
        Some(raw) => match parse_order_id(raw) {
            Ok(v) => v,
            Err(resp) => return resp,
        },
        None => OrderId::new(Uuid::now_v7().to_string()),
    };

    let mut order = Order::place(id, body.customer_email, body.total, Utc::now());
    if let Some(payment_status) = body.payment_status {
        order = order.with_payment_status(payment_status);
    }

    match services.place_order(order) {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.get_order(&order_id) {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_transitions(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.get_order(&order_id) {
        Ok(order) => (
            StatusCode::OK,
            Json(dto::TransitionsResponse {
                order_id,
                status: order.status(),
                allowed: order.allowed_next().to_vec(),
            }),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn change_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<dto::ChangeStatusRequest>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let to: OrderStatus = match body.status.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let mut cmd = ChangeOrderStatus::new(to, dto::actor_from_headers(&headers), Utc::now());
    if let Some(notes) = body.notes {
        cmd = cmd.with_notes(notes);
    }
    if let Some(tracking) = body.tracking_number {
        cmd = cmd.with_tracking_number(tracking);
    }

    match services.change_status(&order_id, cmd, body.notify_customer) {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
