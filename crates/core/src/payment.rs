//! Simulated payment and the confirmation record it produces.
//!
//! Payment never fails once the request passes validation. The processing
//! delay itself is applied by the caller; this module only decides what is
//! accepted and what the resulting record looks like.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::checkout::{not_blank, BookingSummary, CheckoutSession, CheckoutStep};
use crate::error::CoreError;
use crate::pricing::Money;
use crate::types::Timestamp;

/// Artificial processing latency, in milliseconds.
pub const DEFAULT_PROCESSING_DELAY_MS: u64 = 2000;

/// Prefix of every generated booking id.
pub const BOOKING_ID_PREFIX: &str = "CP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    PayNow,
    Bank,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::PayNow => "paynow",
            Self::Bank => "bank",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Card => "Credit/Debit Card",
            Self::PayNow => "PayNow",
            Self::Bank => "Bank Transfer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Completed,
}

/// Card fields. Only presence is checked; nothing is charged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CardDetails {
    #[validate(custom(function = "not_blank"))]
    pub cardholder_name: String,
    #[validate(custom(function = "not_blank"))]
    pub card_number: String,
    #[validate(custom(function = "not_blank"))]
    pub expiry_date: String,
    #[validate(custom(function = "not_blank"))]
    pub cvv: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    pub method: PaymentMethod,
    #[serde(default)]
    pub card: Option<CardDetails>,
}

/// Reject a card payment with missing card fields. Other methods need nothing.
pub fn validate_payment(request: &PaymentRequest) -> Result<(), CoreError> {
    if request.method != PaymentMethod::Card {
        return Ok(());
    }
    let card = request
        .card
        .as_ref()
        .ok_or_else(|| CoreError::Validation("Card details are required".into()))?;
    card.validate().map_err(|e| {
        let mut fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        CoreError::Validation(format!("Missing card fields: {}", fields.join(", ")))
    })
}

/// The finalized, display-only booking.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationRecord {
    #[serde(flatten)]
    pub booking: BookingSummary,
    pub booking_id: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub booking_date: Timestamp,
}

/// Timestamp-derived booking id, e.g. `CP1703123456789`.
pub fn booking_id_for(now: Timestamp) -> String {
    format!("{BOOKING_ID_PREFIX}{}", now.timestamp_millis())
}

/// Take the payment hand-off out of a session that is waiting on payment.
pub fn pending_summary(session: &CheckoutSession) -> Result<&BookingSummary, CoreError> {
    if session.step != CheckoutStep::Payment {
        return Err(CoreError::Validation(format!(
            "Payment is not available on the {} step",
            session.step.label()
        )));
    }
    session
        .summary
        .as_ref()
        .ok_or_else(|| CoreError::Internal("Payment step reached without a booking summary".into()))
}

/// Build the confirmation for a paid booking.
pub fn confirm(booking: BookingSummary, method: PaymentMethod, now: Timestamp) -> ConfirmationRecord {
    ConfirmationRecord {
        booking,
        booking_id: booking_id_for(now),
        payment_method: method,
        payment_status: PaymentStatus::Completed,
        booking_date: now,
    }
}

// ---------------------------------------------------------------------------
// Display instructions
// ---------------------------------------------------------------------------

pub const BANK_NAME: &str = "DBS Bank";
pub const BANK_ACCOUNT_NAME: &str = "CleanPro Singapore Pte Ltd";
pub const BANK_ACCOUNT_NUMBER: &str = "123-456789-0";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum PaymentInstructions {
    Card,
    PayNow { steps: Vec<String> },
    Bank {
        bank: &'static str,
        account_name: &'static str,
        account_number: &'static str,
        reference: &'static str,
    },
}

pub fn instructions(method: PaymentMethod, total: Money) -> PaymentInstructions {
    match method {
        PaymentMethod::Card => PaymentInstructions::Card,
        PaymentMethod::PayNow => PaymentInstructions::PayNow {
            steps: vec![
                "Open your mobile banking app".into(),
                "Select PayNow and scan the QR code".into(),
                format!("Confirm the payment amount: {total}"),
                "Complete the transaction".into(),
            ],
        },
        PaymentMethod::Bank => PaymentInstructions::Bank {
            bank: BANK_NAME,
            account_name: BANK_ACCOUNT_NAME,
            account_number: BANK_ACCOUNT_NUMBER,
            reference: "Your booking ID will be provided after confirmation",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::json;

    use crate::checkout::ContactDetails;

    fn card() -> CardDetails {
        CardDetails {
            cardholder_name: "John Doe".into(),
            card_number: "4111 1111 1111 1111".into(),
            expiry_date: "12/29".into(),
            cvv: "123".into(),
        }
    }

    fn paid_session() -> CheckoutSession {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let mut s = CheckoutSession::new(now);
        s.select_service("commercial".into(), Some("monthly".into()), None, now)
            .unwrap();
        s.advance(today, now).unwrap();
        let visit = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        s.set_schedule(visit, "2:00 PM".into(), today, now).unwrap();
        s.advance(today, now).unwrap();
        s.advance(today, now).unwrap();
        s.set_contact(
            ContactDetails {
                first_name: "Jane".into(),
                last_name: "Smith".into(),
                email: "jane.smith@email.com".into(),
                phone: "+65 8234 5678".into(),
                address: "456 Marina Bay".into(),
                unit: "#05-10".into(),
                postal_code: "018956".into(),
            },
            now,
        )
        .unwrap();
        s.advance(today, now).unwrap();
        s
    }

    #[test]
    fn method_serde_names() {
        let m: PaymentMethod = serde_json::from_value(json!("paynow")).unwrap();
        assert_eq!(m, PaymentMethod::PayNow);
        assert_eq!(serde_json::to_value(PaymentMethod::Bank).unwrap(), json!("bank"));
        assert_eq!(PaymentMethod::Card.as_str(), "card");
    }

    #[test]
    fn card_payment_requires_every_card_field() {
        let mut req = PaymentRequest {
            method: PaymentMethod::Card,
            card: None,
        };
        assert!(validate_payment(&req).is_err());

        let mut c = card();
        c.cvv = " ".into();
        req.card = Some(c);
        let err = validate_payment(&req).unwrap_err().to_string();
        assert!(err.contains("cvv"));

        req.card = Some(card());
        assert!(validate_payment(&req).is_ok());
    }

    #[test]
    fn non_card_methods_need_no_details() {
        for method in [PaymentMethod::PayNow, PaymentMethod::Bank] {
            let req = PaymentRequest { method, card: None };
            assert!(validate_payment(&req).is_ok());
        }
    }

    #[test]
    fn booking_id_is_timestamp_derived() {
        let now = Utc.timestamp_millis_opt(1_703_123_456_789).unwrap();
        assert_eq!(booking_id_for(now), "CP1703123456789");
    }

    #[test]
    fn pending_summary_only_on_payment_step() {
        let now = Utc::now();
        let fresh = CheckoutSession::new(now);
        assert!(pending_summary(&fresh).is_err());

        let s = paid_session();
        let summary = pending_summary(&s).unwrap();
        assert_eq!(summary.total, Money::from_dollars(150));
    }

    #[test]
    fn confirmation_carries_booking_and_payment_fields() {
        let s = paid_session();
        let now = Utc.timestamp_millis_opt(1_703_000_000_000).unwrap();
        let record = confirm(
            pending_summary(&s).unwrap().clone(),
            PaymentMethod::PayNow,
            now,
        );
        assert_eq!(record.booking_id, "CP1703000000000");
        assert_eq!(record.payment_status, PaymentStatus::Completed);

        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["payment_method"], "paynow");
        assert_eq!(v["payment_status"], "completed");
        assert_eq!(v["service"]["id"], "commercial");
        assert_eq!(v["customer"]["first_name"], "Jane");
        assert_eq!(v["total"], json!(150.0));
    }

    #[test]
    fn paynow_instructions_quote_the_total() {
        let PaymentInstructions::PayNow { steps } =
            instructions(PaymentMethod::PayNow, Money::from_dollars(153))
        else {
            panic!("expected PayNow instructions");
        };
        assert!(steps.iter().any(|s| s.contains("S$153.00")));
    }
}
