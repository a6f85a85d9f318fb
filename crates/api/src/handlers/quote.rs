//! Price a selection without starting a checkout.

use axum::Json;
use cleanpro_core::pricing::{self, Quote, Selection};
use serde::Serialize;

use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub quote: Quote,
    /// The total as shown to customers, e.g. `S$153.00`.
    pub total_display: String,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            total_display: quote.total.to_string(),
            quote,
        }
    }
}

/// POST /quotes
///
/// Never fails on unknown ids: they price at zero.
pub async fn create_quote(Json(selection): Json<Selection>) -> Json<DataResponse<QuoteResponse>> {
    let quote = pricing::quote(&selection);
    tracing::debug!(
        service_id = ?selection.service_id,
        option_id = ?selection.option_id,
        add_ons = selection.add_on_ids.len(),
        total = %quote.total,
        "Quote calculated"
    );
    Json(DataResponse { data: quote.into() })
}
