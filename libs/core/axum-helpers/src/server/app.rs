use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use axum::{Json, Router, routing::get};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Creates a configured Axum router with common middleware and documentation.
///
/// This sets up:
/// - the OpenAPI document at [`OPENAPI_JSON_PATH`] and a Scalar UI at `/docs`
/// - API routes nested under `/api`
/// - request tracing, the given CORS policy and response compression
/// - a JSON 404 fallback
///
/// Health endpoints and other root routes are merged by the app.
///
/// # Example
/// ```ignore
/// let cors = axum_helpers::http::cors_layer_from_origins(None)?;
/// let router = create_router::<ApiDoc>(api_routes, cors)
///     .merge(health_router(app_info!()));
/// ```
pub fn create_router<T>(apis: Router, cors: CorsLayer) -> Router
where
    T: OpenApi + 'static,
{
    let openapi = T::openapi();
    let document = openapi.clone();

    Router::new()
        .route(OPENAPI_JSON_PATH, get(move || async move { Json(document) }))
        .merge(Scalar::with_url("/docs", openapi))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(CompressionLayer::new())
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup`.
///
/// After the signal, in-flight requests get `shutdown_timeout` to finish;
/// `cleanup` (closing pools and the like) gets the same bound.
///
/// # Example
/// ```ignore
/// create_production_app(router, &config.server, async move {
///     database::postgres::close(db).await.ok();
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let shutdown_timeout = server_config.shutdown_timeout;
    let coordinator = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signal = coordinator.clone();
    tokio::spawn(async move { signal.wait_for_signal().await });

    let graceful = coordinator.clone();
    let server = async move {
        axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(async move { graceful.wait_for_shutdown().await })
            .await
    };

    let drain_deadline = async {
        coordinator.wait_for_shutdown().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    let serve_result = tokio::select! {
        result = server => result.inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        }),
        _ = drain_deadline => {
            warn!("Open connections did not finish within {:?}, forcing shutdown", shutdown_timeout);
            Ok(())
        }
    };

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
