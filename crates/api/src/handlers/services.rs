use axum::extract::{Path, State};
use axum::Json;
use cleanpro_core::error::CoreError;
use cleanpro_db::models::service::ServiceWithOptions;
use cleanpro_db::repositories::ServiceRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /services: seeded service records with their options.
pub async fn list_services(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ServiceWithOptions>>>> {
    let services = ServiceRepo::list_with_options(&state.pool).await?;
    Ok(Json(DataResponse { data: services }))
}

/// GET /services/{id}
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<ServiceWithOptions>>> {
    let service = ServiceRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| CoreError::not_found("Service", &id))?;
    let options = ServiceRepo::list_options(&state.pool, &id).await?;
    Ok(Json(DataResponse {
        data: ServiceWithOptions { service, options },
    }))
}
