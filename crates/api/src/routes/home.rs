use axum::routing::get;
use axum::Router;

use crate::handlers::home;
use crate::state::AppState;

/// The landing page, mounted at the root. Confirmation redirects land here.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home::home))
}
