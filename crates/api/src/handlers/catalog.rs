use axum::Json;
use cleanpro_core::catalog::{self, Catalog};

use crate::response::DataResponse;

/// GET /catalog: everything the booking wizard offers.
pub async fn get_catalog() -> Json<DataResponse<Catalog>> {
    Json(DataResponse {
        data: catalog::catalog(),
    })
}
