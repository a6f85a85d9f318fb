//! Dashboard routes, mounted at `/dashboards`.
//!
//! ```text
//! GET    /admin                                 admin (?status=)
//! GET    /cleaner                               cleaner
//! GET    /customer                              customer
//! POST   /customer/bookings/{booking_id}/rating rate_booking
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard::admin))
        .route("/cleaner", get(dashboard::cleaner))
        .route("/customer", get(dashboard::customer))
        .route(
            "/customer/bookings/{booking_id}/rating",
            post(dashboard::rate_booking),
        )
}
