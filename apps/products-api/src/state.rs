//! Application state management

use database::postgres::DatabaseConnection;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: Arc<DatabaseConnection>,
}
