//! Read-only role dashboards over demo data.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cleanpro_core::dashboard::{
    self, AdminDashboard, CleanerDashboard, CustomerDashboard, RatingSubmission, StatusFilter,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::now_and_today;
use crate::query::StatusParams;
use crate::response::DataResponse;

/// GET /dashboards/admin?status=
pub async fn admin(
    Query(params): Query<StatusParams>,
) -> AppResult<Json<DataResponse<AdminDashboard>>> {
    let filter = StatusFilter::parse(params.status.as_deref().unwrap_or_default())?;
    let (_, today) = now_and_today();
    Ok(Json(DataResponse {
        data: dashboard::admin_dashboard(today, filter),
    }))
}

/// GET /dashboards/cleaner
pub async fn cleaner() -> AppResult<Json<DataResponse<CleanerDashboard>>> {
    let (_, today) = now_and_today();
    Ok(Json(DataResponse {
        data: dashboard::cleaner_dashboard(today)?,
    }))
}

/// GET /dashboards/customer
pub async fn customer() -> AppResult<Json<DataResponse<CustomerDashboard>>> {
    let (_, today) = now_and_today();
    Ok(Json(DataResponse {
        data: dashboard::customer_dashboard(today)?,
    }))
}

#[derive(Debug, Serialize)]
pub struct RatingReceipt {
    pub booking_id: String,
    pub rating: u8,
    /// Always `false`: ratings are acknowledged, not stored.
    pub stored: bool,
}

/// POST /dashboards/customer/bookings/{booking_id}/rating
pub async fn rate_booking(
    Path(booking_id): Path<String>,
    Json(body): Json<RatingSubmission>,
) -> AppResult<impl IntoResponse> {
    let (_, today) = now_and_today();
    dashboard::validate_rating(&dashboard::demo_bookings(today), &booking_id, &body)?;

    tracing::info!(
        booking_id = %booking_id,
        rating = body.rating,
        has_review = body.review.is_some(),
        "Rating received"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: RatingReceipt {
                booking_id,
                rating: body.rating,
                stored: false,
            },
        }),
    ))
}
