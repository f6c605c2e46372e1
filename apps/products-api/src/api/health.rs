//! Landing page and readiness endpoint

use axum::{
    extract::State,
    response::{Html, Response},
    routing::get,
    Router,
};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::postgres::check_health;

use crate::state::AppState;

const LANDING_PAGE: &str = "<h1>¡Server funcionando! 🥳</h1>";

async fn landing() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

async fn ready(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async { check_health(&state.db).await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}

/// Root routes: `/` and `/ready`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/ready", get(ready))
        .with_state(state)
}
