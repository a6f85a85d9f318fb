//! Catalog, quote and seeded-service routes.
//!
//! ```text
//! GET    /catalog             get_catalog
//! POST   /quotes              create_quote
//! GET    /services            list_services
//! GET    /services/{id}       get_service
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{catalog, quote, services};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(catalog::get_catalog))
        .route("/quotes", post(quote::create_quote))
        .route("/services", get(services::list_services))
        .route("/services/{id}", get(services::get_service))
}
