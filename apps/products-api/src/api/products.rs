//! Products API routes

use axum::Router;
use domain_products::{handlers, PgProductRepository, ProductService};
use std::sync::Arc;

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let repository = PgProductRepository::new(Arc::clone(&state.db));
    let service = ProductService::new(repository);
    handlers::router(service)
}
