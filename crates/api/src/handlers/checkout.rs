//! Handlers for the booking checkout wizard.
//!
//! A checkout is created empty, edited step by step, advanced once each
//! step's fields are present, and handed to the payment handlers on the
//! payment step. Every response carries the recomputed quote.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use chrono::NaiveDate;
use cleanpro_core::checkout::{
    BookingSummary, CheckoutSession, CheckoutStep, ContactDetails, DraftBooking, PropertyDetails,
};
use cleanpro_core::pricing::Quote;
use serde::{Deserialize, Serialize};

use crate::checkout_store::{CheckoutEntry, EntryStatus};
use crate::error::AppResult;
use crate::handlers::now_and_today;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Views and request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub step: CheckoutStep,
    pub step_number: u8,
    pub step_label: &'static str,
    /// Whether the current step's fields are complete.
    pub can_advance: bool,
    pub draft: DraftBooking,
    pub quote: Quote,
    /// Present on the payment step.
    pub summary: Option<BookingSummary>,
}

impl SessionView {
    fn new(session: CheckoutSession, today: NaiveDate) -> Self {
        Self {
            step: session.step,
            step_number: session.step.to_number(),
            step_label: session.step.label(),
            can_advance: session.can_advance(today),
            quote: session.draft.quote(),
            draft: session.draft,
            summary: session.summary,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckoutView {
    pub token: String,
    pub status: EntryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionView>,
    /// Set once paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
}

impl CheckoutView {
    fn in_progress(token: String, session: CheckoutSession, today: NaiveDate) -> Self {
        Self {
            token,
            status: EntryStatus::InProgress,
            session: Some(SessionView::new(session, today)),
            booking_id: None,
        }
    }

    fn from_entry(token: String, entry: CheckoutEntry, today: NaiveDate) -> Self {
        let status = entry.status();
        match entry {
            CheckoutEntry::InProgress(session) | CheckoutEntry::Processing(session) => Self {
                token,
                status,
                session: Some(SessionView::new(session, today)),
                booking_id: None,
            },
            CheckoutEntry::Confirmed(record) => Self {
                token,
                status,
                session: None,
                booking_id: Some(record.booking_id),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SelectServiceRequest {
    pub service_id: String,
    pub option_id: Option<String>,
    pub frequency_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub date: NaiveDate,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleAddOnResponse {
    pub add_on_id: String,
    pub included: bool,
    #[serde(flatten)]
    pub checkout: CheckoutView,
}

type CheckoutResponse = AppResult<Json<DataResponse<CheckoutView>>>;

fn respond(token: String, session: CheckoutSession, today: NaiveDate) -> CheckoutResponse {
    Ok(Json(DataResponse {
        data: CheckoutView::in_progress(token, session, today),
    }))
}

// ---------------------------------------------------------------------------
// POST /checkout
// ---------------------------------------------------------------------------

pub async fn create_checkout(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (now, today) = now_and_today();
    let (token, session) = state.checkouts.create(now).await?;

    tracing::info!(token = %token, "Checkout started");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CheckoutView::in_progress(token, session, today),
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /checkout/{token}
// ---------------------------------------------------------------------------

pub async fn get_checkout(State(state): State<AppState>, Path(token): Path<String>) -> CheckoutResponse {
    let (_, today) = now_and_today();
    let entry = state.checkouts.get(&token).await?;
    Ok(Json(DataResponse {
        data: CheckoutView::from_entry(token, entry, today),
    }))
}

// ---------------------------------------------------------------------------
// Step edits
// ---------------------------------------------------------------------------

/// PUT /checkout/{token}/service
pub async fn select_service(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<SelectServiceRequest>,
) -> CheckoutResponse {
    let (now, today) = now_and_today();
    let (_, session) = state
        .checkouts
        .update(&token, |s| {
            s.select_service(
                body.service_id.clone(),
                body.option_id.clone(),
                body.frequency_id.clone(),
                now,
            )
        })
        .await?;

    tracing::debug!(
        token = %token,
        service_id = %body.service_id,
        option_id = ?body.option_id,
        frequency_id = %session.draft.frequency_id,
        "Checkout service selected"
    );
    respond(token, session, today)
}

/// POST /checkout/{token}/add-ons/{add_on_id}/toggle
pub async fn toggle_add_on(
    State(state): State<AppState>,
    Path((token, add_on_id)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<ToggleAddOnResponse>>> {
    let (now, today) = now_and_today();
    let (included, session) = state
        .checkouts
        .update(&token, |s| s.toggle_add_on(&add_on_id, now))
        .await?;

    tracing::debug!(token = %token, add_on_id = %add_on_id, included, "Checkout add-on toggled");
    Ok(Json(DataResponse {
        data: ToggleAddOnResponse {
            add_on_id,
            included,
            checkout: CheckoutView::in_progress(token, session, today),
        },
    }))
}

/// PUT /checkout/{token}/schedule
pub async fn set_schedule(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<ScheduleRequest>,
) -> CheckoutResponse {
    let (now, today) = now_and_today();
    let (_, session) = state
        .checkouts
        .update(&token, |s| s.set_schedule(body.date, body.time.clone(), today, now))
        .await?;

    tracing::debug!(token = %token, date = %body.date, time = %body.time, "Checkout scheduled");
    respond(token, session, today)
}

/// PUT /checkout/{token}/property
pub async fn set_property(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<PropertyDetails>,
) -> CheckoutResponse {
    let (now, today) = now_and_today();
    let (_, session) = state
        .checkouts
        .update(&token, |s| s.set_property(body, now))
        .await?;
    respond(token, session, today)
}

/// PUT /checkout/{token}/contact
///
/// Incomplete contact details are stored; they only block advancing.
pub async fn set_contact(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<ContactDetails>,
) -> CheckoutResponse {
    let (now, today) = now_and_today();
    let (_, session) = state
        .checkouts
        .update(&token, |s| s.set_contact(body, now))
        .await?;
    respond(token, session, today)
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// POST /checkout/{token}/advance
pub async fn advance(State(state): State<AppState>, Path(token): Path<String>) -> CheckoutResponse {
    let (now, today) = now_and_today();
    let (from, to, session) = state
        .checkouts
        .update(&token, |s| {
            let from = s.step;
            s.advance(today, now).map(|to| (from, to))
        })
        .await
        .map(|((from, to), session)| (from, to, session))?;

    tracing::info!(
        token = %token,
        from_step = from.to_number(),
        to_step = to.to_number(),
        "Checkout advanced"
    );
    respond(token, session, today)
}

/// POST /checkout/{token}/back
pub async fn go_back(State(state): State<AppState>, Path(token): Path<String>) -> CheckoutResponse {
    let (now, today) = now_and_today();
    let (to, session) = state.checkouts.update(&token, |s| s.go_back(now)).await?;

    tracing::info!(token = %token, to_step = to.to_number(), "Checkout went back");
    respond(token, session, today)
}

// ---------------------------------------------------------------------------
// GET /checkout/{token}/confirmation
// ---------------------------------------------------------------------------

/// The paid booking, or a redirect home when there is nothing to confirm.
pub async fn get_confirmation(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Response {
    match state.checkouts.confirmation(&token).await {
        Some(record) => Json(DataResponse { data: record }).into_response(),
        None => {
            tracing::debug!(token = %token, "No confirmation to show, redirecting home");
            Redirect::to("/").into_response()
        }
    }
}
