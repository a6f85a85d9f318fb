//! Route definitions for the booking checkout.
//!
//! Mounted at `/checkout` by `api_routes()`.
//!
//! ```text
//! POST   /                                    create_checkout
//! GET    /{token}                             get_checkout
//! PUT    /{token}/service                     select_service
//! POST   /{token}/add-ons/{add_on_id}/toggle  toggle_add_on
//! PUT    /{token}/schedule                    set_schedule
//! PUT    /{token}/property                    set_property
//! PUT    /{token}/contact                     set_contact
//! POST   /{token}/advance                     advance
//! POST   /{token}/back                        go_back
//! GET    /{token}/payment                     get_payment
//! POST   /{token}/payment                     pay
//! GET    /{token}/confirmation                get_confirmation
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{checkout, payment};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::create_checkout))
        .route("/{token}", get(checkout::get_checkout))
        .route("/{token}/service", put(checkout::select_service))
        .route(
            "/{token}/add-ons/{add_on_id}/toggle",
            post(checkout::toggle_add_on),
        )
        .route("/{token}/schedule", put(checkout::set_schedule))
        .route("/{token}/property", put(checkout::set_property))
        .route("/{token}/contact", put(checkout::set_contact))
        .route("/{token}/advance", post(checkout::advance))
        .route("/{token}/back", post(checkout::go_back))
        .route(
            "/{token}/payment",
            get(payment::get_payment).post(payment::pay),
        )
        .route("/{token}/confirmation", get(checkout::get_confirmation))
}
