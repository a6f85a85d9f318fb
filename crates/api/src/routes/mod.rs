pub mod catalog;
pub mod checkout;
pub mod dashboard;
pub mod health;
pub mod home;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /catalog                                         booking catalog (GET)
/// /quotes                                          price a selection (POST)
/// /services                                        seeded services (GET)
/// /services/{id}                                   one seeded service (GET)
///
/// /checkout                                        start (POST)
/// /checkout/{token}                                get
/// /checkout/{token}/service                        step 1 (PUT)
/// /checkout/{token}/add-ons/{add_on_id}/toggle     toggle add-on (POST)
/// /checkout/{token}/schedule                       step 2 (PUT)
/// /checkout/{token}/property                       step 3 (PUT)
/// /checkout/{token}/contact                        step 4 (PUT)
/// /checkout/{token}/advance                        next step (POST)
/// /checkout/{token}/back                           previous step (POST)
/// /checkout/{token}/payment                        summary (GET), pay (POST)
/// /checkout/{token}/confirmation                   paid booking, else 303 to /
///
/// /dashboards/admin                                admin view (?status=)
/// /dashboards/cleaner                              cleaner view
/// /dashboards/customer                             customer view
/// /dashboards/customer/bookings/{id}/rating        rate a booking (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .nest("/checkout", checkout::router())
        .nest("/dashboards", dashboard::router())
}
