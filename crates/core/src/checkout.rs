//! Checkout wizard: the draft booking and the step state machine that
//! accumulates it.
//!
//! ```text
//! ServiceSelection -> DateTime -> PropertyDetails -> ContactInfo -> Payment -> Confirmation
//! ```
//!
//! Going forward from a step requires that step's fields to be present.
//! Going back is always allowed until payment has been taken. Leaving
//! `ContactInfo` freezes the draft into a [`BookingSummary`], which is what
//! the payment step charges for. Reaching `Confirmation` happens only through
//! [`crate::payment::confirm`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::catalog::{self, AddOn, Frequency, Service, ServiceOption};
use crate::error::CoreError;
use crate::pricing::{self, Money, Quote, Selection};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    ServiceSelection,
    DateTime,
    PropertyDetails,
    ContactInfo,
    Payment,
    Confirmation,
}

/// Number of steps the customer fills in before paying.
pub const FORM_STEPS: u8 = 4;

impl CheckoutStep {
    /// Convert a 1-based step number.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::ServiceSelection),
            2 => Ok(Self::DateTime),
            3 => Ok(Self::PropertyDetails),
            4 => Ok(Self::ContactInfo),
            5 => Ok(Self::Payment),
            6 => Ok(Self::Confirmation),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between 1 and 6"
            ))),
        }
    }

    pub fn to_number(self) -> u8 {
        match self {
            Self::ServiceSelection => 1,
            Self::DateTime => 2,
            Self::PropertyDetails => 3,
            Self::ContactInfo => 4,
            Self::Payment => 5,
            Self::Confirmation => 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ServiceSelection => "Choose Your Service",
            Self::DateTime => "Schedule",
            Self::PropertyDetails => "Property Details",
            Self::ContactInfo => "Contact Information",
            Self::Payment => "Payment",
            Self::Confirmation => "Confirmation",
        }
    }

    /// Whether the draft may still be edited on this step.
    pub fn is_form_step(self) -> bool {
        self.to_number() <= FORM_STEPS
    }

    fn next(self) -> Option<Self> {
        Self::from_number(self.to_number() + 1).ok()
    }

    fn previous(self) -> Option<Self> {
        Self::from_number(self.to_number().checked_sub(1)?).ok()
    }
}

// ---------------------------------------------------------------------------
// Draft records
// ---------------------------------------------------------------------------

/// Presence check shared by the form validators: whitespace does not count.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Step 3 fields. Nothing here is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PropertyDetails {
    #[validate(range(min = 1, max = 6))]
    pub bedrooms: u8,
    #[validate(range(min = 1, max = 6))]
    pub bathrooms: u8,
    #[serde(default)]
    pub square_footage: Option<u32>,
    #[serde(default)]
    pub special_instructions: String,
}

impl Default for PropertyDetails {
    fn default() -> Self {
        Self {
            bedrooms: catalog::MIN_ROOMS,
            bathrooms: catalog::MIN_ROOMS,
            square_footage: None,
            special_instructions: String::new(),
        }
    }
}

/// Step 4 fields. Everything except `unit` must be non-blank to advance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ContactDetails {
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[validate(custom(function = "not_blank"))]
    pub email: String,
    #[validate(custom(function = "not_blank"))]
    pub phone: String,
    #[validate(custom(function = "not_blank"))]
    pub address: String,
    pub unit: String,
    #[validate(custom(function = "not_blank"))]
    pub postal_code: String,
}

/// The in-progress, not-yet-paid booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftBooking {
    pub service_id: Option<String>,
    pub option_id: Option<String>,
    pub frequency_id: String,
    pub add_on_ids: Vec<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub property: PropertyDetails,
    pub contact: ContactDetails,
}

impl Default for DraftBooking {
    fn default() -> Self {
        Self {
            service_id: None,
            option_id: None,
            frequency_id: catalog::DEFAULT_FREQUENCY_ID.to_string(),
            add_on_ids: Vec::new(),
            date: None,
            time: None,
            property: PropertyDetails::default(),
            contact: ContactDetails::default(),
        }
    }
}

impl DraftBooking {
    /// The pricing view of this draft.
    pub fn selection(&self) -> Selection {
        Selection {
            service_id: self.service_id.clone(),
            option_id: self.option_id.clone(),
            add_on_ids: self.add_on_ids.clone(),
            frequency_id: Some(self.frequency_id.clone()),
        }
    }

    pub fn quote(&self) -> Quote {
        pricing::quote(&self.selection())
    }

    /// Flip inclusion of an add-on. Returns whether it is now included.
    ///
    /// Toggling the same id twice restores the previous list.
    pub fn toggle_add_on(&mut self, add_on_id: &str) -> bool {
        if let Some(pos) = self.add_on_ids.iter().position(|id| id == add_on_id) {
            self.add_on_ids.remove(pos);
            false
        } else {
            self.add_on_ids.push(add_on_id.to_string());
            true
        }
    }

    /// Service and option, when both resolve together in the catalog.
    pub fn resolved_service(&self) -> Option<(&'static Service, &'static ServiceOption)> {
        let service = catalog::find_service(self.service_id.as_deref()?)?;
        let option = catalog::find_option(service.id, self.option_id.as_deref()?)?;
        Some((service, option))
    }
}

// ---------------------------------------------------------------------------
// Hand-off to payment
// ---------------------------------------------------------------------------

/// Everything the payment and confirmation steps display, resolved against
/// the catalog and priced once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingSummary {
    pub service: Service,
    pub option: ServiceOption,
    pub frequency: Frequency,
    pub add_ons: Vec<AddOn>,
    pub date: NaiveDate,
    pub time: String,
    pub property: PropertyDetails,
    pub customer: ContactDetails,
    pub quote: Quote,
    pub total: Money,
}

impl BookingSummary {
    /// Freeze a fully validated draft.
    pub fn from_draft(draft: &DraftBooking) -> Result<Self, CoreError> {
        let (service, option) = draft.resolved_service().ok_or_else(|| {
            CoreError::Validation("A service and one of its options must be selected".into())
        })?;
        let frequency = catalog::find_frequency(&draft.frequency_id)
            .ok_or_else(|| CoreError::not_found("Frequency", &draft.frequency_id))?;
        let (date, time) = match (draft.date, draft.time.as_ref()) {
            (Some(date), Some(time)) => (date, time.clone()),
            _ => {
                return Err(CoreError::Validation(
                    "A date and time slot must be selected".into(),
                ))
            }
        };
        let add_ons = draft
            .add_on_ids
            .iter()
            .filter_map(|id| catalog::find_add_on(id).copied())
            .collect();
        let quote = draft.quote();

        Ok(Self {
            service: *service,
            option: *option,
            frequency: *frequency,
            add_ons,
            date,
            time,
            property: draft.property.clone(),
            customer: draft.contact.clone(),
            quote,
            total: quote.total,
        })
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One customer's pass through the wizard.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSession {
    pub step: CheckoutStep,
    pub draft: DraftBooking,
    /// Set when the draft leaves `ContactInfo`; cleared when going back.
    pub summary: Option<BookingSummary>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CheckoutSession {
    pub fn new(now: Timestamp) -> Self {
        Self {
            step: CheckoutStep::ServiceSelection,
            draft: DraftBooking::default(),
            summary: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn ensure_editable(&self) -> Result<(), CoreError> {
        if !self.step.is_form_step() {
            return Err(CoreError::Validation(format!(
                "Booking details are locked on the {} step",
                self.step.label()
            )));
        }
        Ok(())
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
    }

    /// Record the step 1 choice. Ids are stored as given; unresolvable ids
    /// price at zero and keep step 1 from validating.
    pub fn select_service(
        &mut self,
        service_id: String,
        option_id: Option<String>,
        frequency_id: Option<String>,
        now: Timestamp,
    ) -> Result<(), CoreError> {
        self.ensure_editable()?;
        if let Some(frequency_id) = &frequency_id {
            if catalog::find_frequency(frequency_id).is_none() {
                return Err(CoreError::not_found("Frequency", frequency_id));
            }
        }
        self.draft.service_id = Some(service_id);
        self.draft.option_id = option_id;
        if let Some(frequency_id) = frequency_id {
            self.draft.frequency_id = frequency_id;
        }
        self.touch(now);
        Ok(())
    }

    /// Toggle an add-on on or off. Returns whether it is now included.
    pub fn toggle_add_on(&mut self, add_on_id: &str, now: Timestamp) -> Result<bool, CoreError> {
        self.ensure_editable()?;
        if catalog::find_add_on(add_on_id).is_none() {
            return Err(CoreError::not_found("AddOn", add_on_id));
        }
        let included = self.draft.toggle_add_on(add_on_id);
        self.touch(now);
        Ok(included)
    }

    /// Record the step 2 choice.
    pub fn set_schedule(
        &mut self,
        date: NaiveDate,
        time: String,
        today: NaiveDate,
        now: Timestamp,
    ) -> Result<(), CoreError> {
        self.ensure_editable()?;
        validate_schedule(date, &time, today)?;
        self.draft.date = Some(date);
        self.draft.time = Some(time);
        self.touch(now);
        Ok(())
    }

    pub fn set_property(&mut self, details: PropertyDetails, now: Timestamp) -> Result<(), CoreError> {
        self.ensure_editable()?;
        details.validate().map_err(|e| validation_error("Invalid property details", &e))?;
        self.draft.property = details;
        self.touch(now);
        Ok(())
    }

    /// Contact fields are stored even when incomplete; completeness is
    /// checked when advancing.
    pub fn set_contact(&mut self, details: ContactDetails, now: Timestamp) -> Result<(), CoreError> {
        self.ensure_editable()?;
        self.draft.contact = details;
        self.touch(now);
        Ok(())
    }

    /// Check that `step`'s required fields are present in the draft.
    pub fn validate_step(&self, step: CheckoutStep, today: NaiveDate) -> Result<(), CoreError> {
        validate_step(&self.draft, step, today)
    }

    pub fn can_advance(&self, today: NaiveDate) -> bool {
        self.step.is_form_step() && self.validate_step(self.step, today).is_ok()
    }

    /// Move one step forward if the current step is complete.
    pub fn advance(&mut self, today: NaiveDate, now: Timestamp) -> Result<CheckoutStep, CoreError> {
        if !self.step.is_form_step() {
            return Err(CoreError::Validation(format!(
                "Cannot advance from the {} step",
                self.step.label()
            )));
        }
        self.validate_step(self.step, today)?;

        if self.step == CheckoutStep::ContactInfo {
            self.summary = Some(BookingSummary::from_draft(&self.draft)?);
        }
        // Form steps always have a successor.
        self.step = self.step.next().unwrap_or(CheckoutStep::Payment);
        self.touch(now);
        Ok(self.step)
    }

    /// Move one step back. A no-op on the first step; refused once paid.
    pub fn go_back(&mut self, now: Timestamp) -> Result<CheckoutStep, CoreError> {
        if self.step == CheckoutStep::Confirmation {
            return Err(CoreError::Validation(
                "A confirmed booking cannot be reopened".into(),
            ));
        }
        if let Some(prev) = self.step.previous() {
            if self.step == CheckoutStep::Payment {
                self.summary = None;
            }
            self.step = prev;
            self.touch(now);
        }
        Ok(self.step)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validation_error(prefix: &str, errors: &ValidationErrors) -> CoreError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|k| k.to_string())
        .collect();
    fields.sort();
    CoreError::Validation(format!("{prefix}: {}", fields.join(", ")))
}

fn validate_schedule(date: NaiveDate, time: &str, today: NaiveDate) -> Result<(), CoreError> {
    // The earliest bookable day is tomorrow.
    if date <= today {
        return Err(CoreError::Validation(format!(
            "Date {date} is not available; bookings open from {}",
            today.succ_opt().unwrap_or(today)
        )));
    }
    if !catalog::is_valid_time_slot(time) {
        return Err(CoreError::Validation(format!(
            "'{time}' is not an available time slot"
        )));
    }
    Ok(())
}

/// Check the fields a step requires before the customer may continue.
pub fn validate_step(
    draft: &DraftBooking,
    step: CheckoutStep,
    today: NaiveDate,
) -> Result<(), CoreError> {
    match step {
        CheckoutStep::ServiceSelection => {
            if draft.resolved_service().is_none() {
                return Err(CoreError::Validation(
                    "Select a service and one of its options to continue".into(),
                ));
            }
        }
        CheckoutStep::DateTime => match (draft.date, draft.time.as_deref()) {
            (Some(date), Some(time)) => validate_schedule(date, time, today)?,
            _ => {
                return Err(CoreError::Validation(
                    "Select a date and time slot to continue".into(),
                ))
            }
        },
        CheckoutStep::PropertyDetails => {}
        CheckoutStep::ContactInfo => {
            draft
                .contact
                .validate()
                .map_err(|e| validation_error("Missing required contact fields", &e))?;
        }
        CheckoutStep::Payment | CheckoutStep::Confirmation => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn tomorrow() -> NaiveDate {
        today().succ_opt().unwrap()
    }

    fn contact() -> ContactDetails {
        ContactDetails {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john.doe@email.com".into(),
            phone: "+65 9123 4567".into(),
            address: "123 Orchard Road".into(),
            unit: String::new(),
            postal_code: "238863".into(),
        }
    }

    fn session_at_contact() -> CheckoutSession {
        let mut s = CheckoutSession::new(now());
        s.select_service("residential".into(), Some("deep".into()), Some("weekly".into()), now())
            .unwrap();
        s.toggle_add_on("windows", now()).unwrap();
        s.advance(today(), now()).unwrap();
        s.set_schedule(tomorrow(), "10:00 AM".into(), today(), now())
            .unwrap();
        s.advance(today(), now()).unwrap();
        s.advance(today(), now()).unwrap();
        assert_eq!(s.step, CheckoutStep::ContactInfo);
        s
    }

    #[test]
    fn step_numbers_roundtrip() {
        for n in 1..=6 {
            assert_eq!(CheckoutStep::from_number(n).unwrap().to_number(), n);
        }
        assert!(CheckoutStep::from_number(0).is_err());
        assert!(CheckoutStep::from_number(7).is_err());
    }

    #[test]
    fn new_session_starts_empty_on_step_one() {
        let s = CheckoutSession::new(now());
        assert_eq!(s.step, CheckoutStep::ServiceSelection);
        assert_eq!(s.draft.frequency_id, "once");
        assert!(s.draft.add_on_ids.is_empty());
        assert!(s.summary.is_none());
    }

    #[test]
    fn step_one_blocks_until_service_and_option() {
        let mut s = CheckoutSession::new(now());
        assert!(!s.can_advance(today()));
        assert!(s.advance(today(), now()).is_err());

        s.select_service("residential".into(), None, None, now()).unwrap();
        assert!(s.advance(today(), now()).is_err());

        s.select_service("residential".into(), Some("postreno".into()), None, now())
            .unwrap();
        assert!(s.advance(today(), now()).is_err(), "option of another service");

        s.select_service("residential".into(), Some("basic".into()), None, now())
            .unwrap();
        assert_eq!(s.advance(today(), now()).unwrap(), CheckoutStep::DateTime);
    }

    #[test]
    fn step_two_requires_date_and_slot() {
        let mut s = CheckoutSession::new(now());
        s.select_service("deep".into(), Some("standard".into()), None, now())
            .unwrap();
        s.advance(today(), now()).unwrap();
        assert!(s.advance(today(), now()).is_err());

        assert!(s
            .set_schedule(today().pred_opt().unwrap(), "9:00 AM".into(), today(), now())
            .is_err());
        assert!(s
            .set_schedule(tomorrow(), "7:00 AM".into(), today(), now())
            .is_err());

        s.set_schedule(tomorrow(), "9:00 AM".into(), today(), now()).unwrap();
        assert_eq!(s.advance(today(), now()).unwrap(), CheckoutStep::PropertyDetails);
    }

    #[test]
    fn same_day_bookings_are_rejected() {
        let mut s = CheckoutSession::new(now());
        s.select_service("deep".into(), Some("standard".into()), None, now())
            .unwrap();
        s.advance(today(), now()).unwrap();

        let err = s
            .set_schedule(today(), "8:00 AM".into(), today(), now())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("2026-03-03"));
        assert_eq!(s.draft.date, None);
        assert!(s.advance(today(), now()).is_err());
        assert_eq!(s.step, CheckoutStep::DateTime);
    }

    #[test]
    fn stale_date_blocks_advance_on_a_later_day() {
        let mut s = CheckoutSession::new(now());
        s.select_service("deep".into(), Some("standard".into()), None, now())
            .unwrap();
        s.advance(today(), now()).unwrap();
        s.set_schedule(tomorrow(), "9:00 AM".into(), today(), now()).unwrap();

        // Tomorrow's booking becomes a same-day booking once the day turns.
        assert!(s.advance(tomorrow(), now()).is_err());
    }

    #[test]
    fn property_step_has_no_requirements() {
        let mut s = CheckoutSession::new(now());
        s.select_service("deep".into(), Some("standard".into()), None, now())
            .unwrap();
        s.advance(today(), now()).unwrap();
        s.set_schedule(tomorrow(), "9:00 AM".into(), today(), now()).unwrap();
        s.advance(today(), now()).unwrap();
        assert!(s.can_advance(today()));
    }

    #[test]
    fn property_details_reject_out_of_range_rooms() {
        let mut s = CheckoutSession::new(now());
        let bad = PropertyDetails {
            bedrooms: 7,
            ..PropertyDetails::default()
        };
        let err = s.set_property(bad, now()).unwrap_err();
        assert!(err.to_string().contains("bedrooms"));

        let good = PropertyDetails {
            bedrooms: 3,
            bathrooms: 2,
            square_footage: Some(1200),
            special_instructions: "Mind the cat".into(),
        };
        s.set_property(good.clone(), now()).unwrap();
        assert_eq!(s.draft.property, good);
    }

    #[test]
    fn contact_step_requires_every_mandatory_field() {
        let mut s = session_at_contact();
        assert!(s.advance(today(), now()).is_err());

        let mut partial = contact();
        partial.postal_code = "   ".into();
        partial.email = String::new();
        s.set_contact(partial, now()).unwrap();
        let err = s.advance(today(), now()).unwrap_err().to_string();
        assert!(err.contains("email"));
        assert!(err.contains("postal_code"));
        assert!(!err.contains("unit"));

        s.set_contact(contact(), now()).unwrap();
        assert_eq!(s.advance(today(), now()).unwrap(), CheckoutStep::Payment);
    }

    #[test]
    fn leaving_contact_freezes_a_priced_summary() {
        let mut s = session_at_contact();
        s.set_contact(contact(), now()).unwrap();
        s.advance(today(), now()).unwrap();

        let summary = s.summary.as_ref().unwrap();
        assert_eq!(summary.service.id, "residential");
        assert_eq!(summary.option.id, "deep");
        assert_eq!(summary.frequency.id, "weekly");
        assert_eq!(summary.add_ons.len(), 1);
        assert_eq!(summary.total, Money::from_dollars(153));
        assert_eq!(summary.customer.first_name, "John");

        // The draft can no longer change.
        assert!(s.toggle_add_on("oven", now()).is_err());
        assert!(s.advance(today(), now()).is_err());
    }

    #[test]
    fn back_is_unconditional_and_bottoms_out_at_step_one() {
        let mut s = CheckoutSession::new(now());
        assert_eq!(s.go_back(now()).unwrap(), CheckoutStep::ServiceSelection);

        let mut s = session_at_contact();
        // Contact fields are empty, yet going back is fine.
        assert_eq!(s.go_back(now()).unwrap(), CheckoutStep::PropertyDetails);
        assert_eq!(s.go_back(now()).unwrap(), CheckoutStep::DateTime);
    }

    #[test]
    fn back_from_payment_unfreezes_the_draft() {
        let mut s = session_at_contact();
        s.set_contact(contact(), now()).unwrap();
        s.advance(today(), now()).unwrap();

        assert_eq!(s.go_back(now()).unwrap(), CheckoutStep::ContactInfo);
        assert!(s.summary.is_none());
        assert!(s.toggle_add_on("oven", now()).unwrap());
    }

    #[test]
    fn confirmation_is_terminal() {
        let mut s = CheckoutSession::new(now());
        s.step = CheckoutStep::Confirmation;
        assert!(s.go_back(now()).is_err());
        assert!(s.advance(today(), now()).is_err());
    }

    #[test]
    fn add_on_toggle_is_an_involution() {
        let mut draft = DraftBooking::default();
        draft.toggle_add_on("fridge");
        let before = draft.add_on_ids.clone();

        assert!(draft.toggle_add_on("oven"));
        assert!(!draft.toggle_add_on("oven"));
        assert_eq!(draft.add_on_ids, before);
    }

    #[test]
    fn unknown_add_on_is_rejected_by_the_session() {
        let mut s = CheckoutSession::new(now());
        let err = s.toggle_add_on("garage", now()).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { entity: "AddOn", .. }));
    }

    #[test]
    fn unknown_frequency_is_rejected() {
        let mut s = CheckoutSession::new(now());
        assert!(s
            .select_service("residential".into(), Some("basic".into()), Some("daily".into()), now())
            .is_err());
    }
}
