use std::sync::Arc;

use crate::checkout_store::CheckoutStore;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cleanpro_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Checkout sessions and confirmations, keyed by token.
    pub checkouts: Arc<CheckoutStore>,
}

impl AppState {
    pub fn new(pool: cleanpro_db::DbPool, config: ServerConfig) -> Self {
        let checkouts = CheckoutStore::with_limits(config.checkout_capacity, config.checkout_ttl_secs);
        Self {
            pool,
            config: Arc::new(config),
            checkouts: Arc::new(checkouts),
        }
    }
}
