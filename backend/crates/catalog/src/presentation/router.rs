//! Catalog Router
//!
//! The router carries no authentication of its own; callers wrap it with
//! the bearer gate (`auth::middleware::require_bearer`).

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::CatalogConfig;
use crate::domain::repository::ProductRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Build the router over any repository implementation
pub fn catalog_router<R>(repo: R, config: CatalogConfig) -> Router
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/products",
            get(handlers::list_products::<R>).post(handlers::create_product::<R>),
        )
        .route("/products/summary", get(handlers::inventory_summary::<R>))
        .route(
            "/products/{id}",
            get(handlers::get_product::<R>)
                .patch(handlers::update_product::<R>)
                .delete(handlers::delete_product::<R>),
        )
        .route("/products/{id}/stock", post(handlers::adjust_stock::<R>))
        .with_state(state)
}
