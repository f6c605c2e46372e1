//! # Axum Helpers
//!
//! Utilities shared by the HTTP services.
//!
//! ## Modules
//!
//! - **[`validation`]**: declarative per-route rules over raw request input
//! - **[`extractors`]**: the [`Validated`] gate that runs those rules
//! - **[`errors`]**: `AppError` and the JSON error bodies
//! - **[`response`]**: the `{ "data": ... }` success envelope
//! - **[`server`]**: router setup, health checks, graceful shutdown
//! - **[`http`]**: CORS configuration
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::{create_production_app, create_router, health_router, http};
//! use core_config::{app_info, server::ServerConfig};
//!
//! let cors = http::cors_layer_from_origins(None)?;
//! let router = create_router::<ApiDoc>(api_routes, cors).merge(health_router(app_info!()));
//! create_production_app(router, &ServerConfig::default(), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;
pub mod validation;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, OPENAPI_JSON_PATH, ShutdownCoordinator,
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
};

// Re-export error types
pub use errors::{AppError, ErrorResponse, ValidationErrorResponse};

pub use extractors::Validated;
pub use response::DataResponse;
pub use validation::{
    Check, FieldDefault, FieldKind, FieldSchema, Location, RequestInput, Rule, RuleSet, Violation,
    run_rules,
};
