use axum::Router;

pub mod catalog;
pub mod orders;
pub mod recommendations;
pub mod system;

/// Router for all API endpoints except `/health`.
pub fn router() -> Router {
    Router::new()
        .nest("/catalog", catalog::router())
        .nest("/products", recommendations::router())
        .nest("/orders", orders::router())
}
