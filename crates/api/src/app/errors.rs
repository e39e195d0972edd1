use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use glowcart_core::DomainError;
use glowcart_infra::{OrderServiceError, OrderStoreError};

pub fn service_error_to_response(err: OrderServiceError) -> axum::response::Response {
    match err {
        OrderServiceError::NotFound(id) => {
            json_error(StatusCode::NOT_FOUND, "not_found", format!("order {id} not found"))
        }
        OrderServiceError::InvalidTransition(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({
                "error": "invalid_transition",
                "message": e.to_string(),
                "from": e.from,
                "to": e.to,
                "allowed": e.allowed,
            })),
        )
            .into_response(),
        OrderServiceError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        OrderServiceError::Store(OrderStoreError::Unavailable(msg)) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg)
        }
        OrderServiceError::Store(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            e.to_string(),
        ),
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
