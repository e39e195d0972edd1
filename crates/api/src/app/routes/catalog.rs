use std::sync::Arc;

use axum::{Extension, Json, Router, http::StatusCode, response::IntoResponse, routing::put};

use glowcart_catalog::CatalogProduct;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/products", put(upsert_product))
}

/// Insert or replace a catalog row. Labels may arrive as lists or as
/// serialized text; they are normalized when the catalog is read.
pub async fn upsert_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(mut body): Json<CatalogProduct>,
) -> axum::response::Response {
    // Stored under the same trimmed form that path lookups parse to.
    body.id = match body.id.as_str().parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let id = body.id.clone();
    let active = body.active;
    services.upsert_product(body);

    (
        StatusCode::OK,
        Json(serde_json::json!({ "id": id, "active": active })),
    )
        .into_response()
}
