//! Simulated payment for a checkout on the payment step.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use chrono::Utc;
use cleanpro_core::checkout::{BookingSummary, CheckoutStep};
use cleanpro_core::error::CoreError;
use cleanpro_core::payment::{self, ConfirmationRecord, PaymentInstructions, PaymentMethod, PaymentRequest};
use serde::Serialize;

use crate::checkout_store::CheckoutEntry;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

const METHODS: [PaymentMethod; 3] = [PaymentMethod::Card, PaymentMethod::PayNow, PaymentMethod::Bank];

#[derive(Debug, Serialize)]
pub struct MethodOption {
    pub method: PaymentMethod,
    pub label: &'static str,
    pub instructions: PaymentInstructions,
}

#[derive(Debug, Serialize)]
pub struct PaymentView {
    pub summary: BookingSummary,
    pub total_display: String,
    pub methods: Vec<MethodOption>,
}

/// GET /checkout/{token}/payment: what is being paid for and how.
///
/// Only a checkout waiting on payment has anything to show. Any other
/// checkout is sent with a 303 to where it currently stands, and an unknown
/// token is sent home.
pub async fn get_payment(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Response> {
    let session = match state.checkouts.get(&token).await {
        Ok(CheckoutEntry::InProgress(session)) if session.step == CheckoutStep::Payment => session,
        Ok(CheckoutEntry::Confirmed(_)) => {
            return Ok(Redirect::to(&format!("/api/v1/checkout/{token}/confirmation")).into_response());
        }
        Ok(_) => return Ok(Redirect::to(&format!("/api/v1/checkout/{token}")).into_response()),
        Err(CoreError::NotFound { .. }) => return Ok(Redirect::to("/").into_response()),
        Err(e) => return Err(e.into()),
    };
    let summary = payment::pending_summary(&session)?.clone();

    let methods = METHODS
        .into_iter()
        .map(|method| MethodOption {
            method,
            label: method.label(),
            instructions: payment::instructions(method, summary.total),
        })
        .collect();

    Ok(Json(DataResponse {
        data: PaymentView {
            total_display: summary.total.to_string(),
            summary,
            methods,
        },
    })
    .into_response())
}

/// POST /checkout/{token}/payment
///
/// Always succeeds once validated, after the configured processing delay.
/// The delay runs on its own task so a dropped request still completes the
/// booking.
pub async fn pay(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<PaymentRequest>,
) -> AppResult<Json<DataResponse<ConfirmationRecord>>> {
    payment::validate_payment(&body)?;
    let summary = state.checkouts.begin_payment(&token).await?;

    tracing::info!(
        token = %token,
        method = body.method.as_str(),
        total = %summary.total,
        "Payment processing started"
    );

    let delay = Duration::from_millis(state.config.payment_delay_ms);
    let store = Arc::clone(&state.checkouts);
    let task_token = token.clone();
    let method = body.method;

    let record = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let record = payment::confirm(summary, method, Utc::now());
        store.complete_payment(&task_token, record.clone()).await?;
        Ok::<_, CoreError>(record)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Payment task failed: {e}")))??;

    tracing::info!(
        token = %token,
        booking_id = %record.booking_id,
        method = record.payment_method.as_str(),
        "Payment completed"
    );

    Ok(Json(DataResponse { data: record }))
}
