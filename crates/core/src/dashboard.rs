//! Role dashboards: demo records and the filters and aggregates shown over
//! them.
//!
//! The records are fixed demonstration data with dates placed relative to
//! the `today` passed in, so an "upcoming" booking stays upcoming whenever
//! the dashboard is viewed. Nothing here writes anywhere.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::pricing::Money;

// ---------------------------------------------------------------------------
// Statuses and filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(CoreError::Validation(format!(
                "Invalid booking status '{s}'. Must be one of: confirmed, in-progress, completed, cancelled"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Confirmed or in progress.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Confirmed | Self::InProgress)
    }
}

/// Status filter for booking lists: `all` or a single status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(BookingStatus),
}

impl StatusFilter {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "" | "all" => Ok(Self::All),
            other => BookingStatus::from_str_db(other).map(Self::Only),
        }
    }

    pub fn matches(self, status: BookingStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRecord {
    pub id: &'static str,
    pub customer: &'static str,
    pub customer_email: &'static str,
    pub customer_phone: &'static str,
    pub service: &'static str,
    /// The service option booked, e.g. "Deep Clean".
    pub service_type: &'static str,
    pub date: NaiveDate,
    pub time: &'static str,
    pub status: BookingStatus,
    pub cleaner: Option<&'static str>,
    pub cleaner_id: Option<&'static str>,
    pub total: Money,
    pub address: &'static str,
    pub frequency: &'static str,
    pub notes: Option<&'static str>,
    pub estimated_duration_minutes: Option<u32>,
    pub rating: Option<u8>,
    pub review: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanerRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub status: AccountStatus,
    pub rating: f64,
    pub completed_jobs: u32,
    pub specialties: &'static [&'static str],
    pub join_date: NaiveDate,
    pub hourly_rate: Option<Money>,
    pub total_earnings: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub address: &'static str,
    pub postal_code: Option<&'static str>,
    pub total_bookings: u32,
    pub total_spent: Money,
    pub last_booking: NaiveDate,
    pub status: AccountStatus,
    pub preferences: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRecord {
    pub id: &'static str,
    pub booking_id: &'static str,
    pub amount: Money,
    pub date: NaiveDate,
    pub method: &'static str,
    pub status: &'static str,
}

// ---------------------------------------------------------------------------
// Demo data
// ---------------------------------------------------------------------------

fn plus_days(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_add_days(Days::new(days)).unwrap_or(today)
}

fn minus_days(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(today)
}

fn fixed_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// The three platform bookings: one upcoming, one underway today, one done
/// yesterday.
pub fn demo_bookings(today: NaiveDate) -> Vec<BookingRecord> {
    vec![
        BookingRecord {
            id: "CP1703123456",
            customer: "John Doe",
            customer_email: "john.doe@email.com",
            customer_phone: "+65 9123 4567",
            service: "Residential Cleaning",
            service_type: "Deep Clean",
            date: plus_days(today, 2),
            time: "10:00 AM",
            status: BookingStatus::Confirmed,
            cleaner: Some("Sarah Chen"),
            cleaner_id: Some("CL001"),
            total: Money::from_dollars(130),
            address: "123 Orchard Road, #12-34, Singapore 238863",
            frequency: "One-time",
            notes: Some("Please focus on kitchen and bathrooms"),
            estimated_duration_minutes: Some(120),
            rating: None,
            review: None,
        },
        BookingRecord {
            id: "CP1703123455",
            customer: "Jane Smith",
            customer_email: "jane.smith@email.com",
            customer_phone: "+65 8234 5678",
            service: "Commercial Cleaning",
            service_type: "Daily Maintenance",
            date: today,
            time: "8:00 AM",
            status: BookingStatus::InProgress,
            cleaner: Some("Michael Tan"),
            cleaner_id: Some("CL002"),
            total: Money::from_dollars(120),
            address: "456 Marina Bay, #05-10, Singapore 018956",
            frequency: "Daily",
            notes: Some("Office building, 5th floor only"),
            estimated_duration_minutes: Some(90),
            rating: None,
            review: None,
        },
        BookingRecord {
            id: "CP1703123454",
            customer: "Robert Wilson",
            customer_email: "robert.wilson@email.com",
            customer_phone: "+65 9876 5432",
            service: "Deep Cleaning",
            service_type: "Post-Renovation",
            date: minus_days(today, 1),
            time: "9:00 AM",
            status: BookingStatus::Completed,
            cleaner: Some("Lisa Wong"),
            cleaner_id: Some("CL003"),
            total: Money::from_dollars(250),
            address: "789 Sentosa Cove, #12-01, Singapore 098234",
            frequency: "One-time",
            notes: Some("Post-renovation cleanup, heavy dust"),
            estimated_duration_minutes: Some(180),
            rating: Some(5),
            review: Some("Excellent work! Very thorough cleaning."),
        },
    ]
}

pub fn demo_cleaners() -> Vec<CleanerRecord> {
    vec![
        CleanerRecord {
            id: "CL001",
            name: "Sarah Chen",
            email: "sarah.chen@cleanpro.sg",
            phone: "+65 9111 2222",
            status: AccountStatus::Active,
            rating: 4.9,
            completed_jobs: 156,
            specialties: &["Residential", "Deep Cleaning"],
            join_date: fixed_date(2023, 1, 15),
            hourly_rate: Some(Money::from_dollars(25)),
            total_earnings: Some(Money::from_dollars(3890)),
        },
        CleanerRecord {
            id: "CL002",
            name: "Michael Tan",
            email: "michael.tan@cleanpro.sg",
            phone: "+65 9333 4444",
            status: AccountStatus::Active,
            rating: 4.8,
            completed_jobs: 203,
            specialties: &["Commercial", "Office Cleaning"],
            join_date: fixed_date(2022, 8, 20),
            hourly_rate: None,
            total_earnings: None,
        },
        CleanerRecord {
            id: "CL003",
            name: "Lisa Wong",
            email: "lisa.wong@cleanpro.sg",
            phone: "+65 9555 6666",
            status: AccountStatus::Active,
            rating: 4.9,
            completed_jobs: 189,
            specialties: &["Deep Cleaning", "Post-Renovation"],
            join_date: fixed_date(2022, 11, 10),
            hourly_rate: None,
            total_earnings: None,
        },
    ]
}

pub fn demo_customers(today: NaiveDate) -> Vec<CustomerRecord> {
    vec![
        CustomerRecord {
            id: "CU001",
            name: "John Doe",
            email: "john.doe@email.com",
            phone: "+65 9123 4567",
            address: "123 Orchard Road, #12-34",
            postal_code: Some("238863"),
            total_bookings: 5,
            total_spent: Money::from_dollars(650),
            last_booking: minus_days(today, 7),
            status: AccountStatus::Active,
            preferences: Some("Focus on kitchen and bathrooms, eco-friendly products preferred"),
        },
        CustomerRecord {
            id: "CU002",
            name: "Jane Smith",
            email: "jane.smith@email.com",
            phone: "+65 8234 5678",
            address: "456 Marina Bay, #05-10",
            postal_code: None,
            total_bookings: 12,
            total_spent: Money::from_dollars(1440),
            last_booking: today,
            status: AccountStatus::Active,
            preferences: None,
        },
    ]
}

/// Payment history of the demo customer.
pub fn demo_payments(today: NaiveDate) -> Vec<PaymentRecord> {
    vec![
        PaymentRecord {
            id: "PAY001",
            booking_id: "CP1703123456",
            amount: Money::from_dollars(130),
            date: today,
            method: "Credit Card",
            status: "completed",
        },
        PaymentRecord {
            id: "PAY002",
            booking_id: "CP1703123455",
            amount: Money::from_dollars(80),
            date: minus_days(today, 7),
            method: "PayNow",
            status: "completed",
        },
    ]
}

/// The demo cleaner's id (whose jobs make up the cleaner dashboard).
pub const DEMO_CLEANER_ID: &str = "CL001";
/// The demo customer's id.
pub const DEMO_CUSTOMER_ID: &str = "CU001";

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

pub fn filter_by_status(bookings: &[BookingRecord], filter: StatusFilter) -> Vec<BookingRecord> {
    bookings
        .iter()
        .filter(|b| filter.matches(b.status))
        .cloned()
        .collect()
}

pub fn sum_totals(bookings: &[BookingRecord]) -> Money {
    bookings.iter().map(|b| b.total).sum()
}

/// Mean of the ratings that are present, or 0 when none are.
pub fn average_rating(bookings: &[BookingRecord]) -> f64 {
    let ratings: Vec<u8> = bookings.iter().filter_map(|b| b.rating).collect();
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / ratings.len() as f64
}

/// Booked for a day after today and still confirmed.
pub fn is_upcoming(booking: &BookingRecord, today: NaiveDate) -> bool {
    booking.date > today && booking.status == BookingStatus::Confirmed
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

// ---------------------------------------------------------------------------
// Admin dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminOverview {
    pub total_revenue: Money,
    pub completed_bookings: usize,
    pub active_cleaners: usize,
    pub total_customers: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub overview: AdminOverview,
    /// The most recent bookings, unfiltered (at most five).
    pub recent_bookings: Vec<BookingRecord>,
    pub bookings: Vec<BookingRecord>,
    pub cleaners: Vec<CleanerRecord>,
    pub customers: Vec<CustomerRecord>,
}

/// Number of bookings in the admin "recent" panel.
pub const RECENT_BOOKINGS: usize = 5;

pub fn admin_overview(
    bookings: &[BookingRecord],
    cleaners: &[CleanerRecord],
    customers: &[CustomerRecord],
) -> AdminOverview {
    AdminOverview {
        total_revenue: sum_totals(bookings),
        completed_bookings: bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Completed)
            .count(),
        active_cleaners: cleaners
            .iter()
            .filter(|c| c.status == AccountStatus::Active)
            .count(),
        total_customers: customers.len(),
    }
}

/// Overview metrics always cover every booking; `filter` narrows the list.
pub fn admin_dashboard(today: NaiveDate, filter: StatusFilter) -> AdminDashboard {
    let bookings = demo_bookings(today);
    let cleaners = demo_cleaners();
    let customers = demo_customers(today);

    AdminDashboard {
        overview: admin_overview(&bookings, &cleaners, &customers),
        recent_bookings: bookings.iter().take(RECENT_BOOKINGS).cloned().collect(),
        bookings: filter_by_status(&bookings, filter),
        cleaners,
        customers,
    }
}

// ---------------------------------------------------------------------------
// Cleaner dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanerOverview {
    pub today_jobs: usize,
    pub upcoming_jobs: usize,
    pub completed_jobs: usize,
    pub total_earnings: Money,
    pub average_rating: f64,
    pub jobs_this_month: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CleanerDashboard {
    pub profile: CleanerRecord,
    pub overview: CleanerOverview,
    pub today: Vec<BookingRecord>,
    pub upcoming: Vec<BookingRecord>,
    pub completed: Vec<BookingRecord>,
    /// Completed jobs that left a rating.
    pub reviews: Vec<BookingRecord>,
}

pub fn cleaner_dashboard(today: NaiveDate) -> Result<CleanerDashboard, CoreError> {
    let profile = demo_cleaners()
        .into_iter()
        .find(|c| c.id == DEMO_CLEANER_ID)
        .ok_or_else(|| CoreError::not_found("Cleaner", DEMO_CLEANER_ID))?;
    // The demo cleaner's job sheet is the full demo booking list.
    let jobs = demo_bookings(today);

    let today_jobs: Vec<_> = jobs.iter().filter(|j| j.date == today).cloned().collect();
    let upcoming: Vec<_> = jobs.iter().filter(|j| is_upcoming(j, today)).cloned().collect();
    let completed = filter_by_status(&jobs, StatusFilter::Only(BookingStatus::Completed));
    let reviews: Vec<_> = completed.iter().filter(|j| j.rating.is_some()).cloned().collect();

    let overview = CleanerOverview {
        today_jobs: today_jobs.len(),
        upcoming_jobs: upcoming.len(),
        completed_jobs: completed.len(),
        total_earnings: sum_totals(&jobs),
        average_rating: profile.rating,
        jobs_this_month: jobs.iter().filter(|j| same_month(j.date, today)).count(),
    };

    Ok(CleanerDashboard {
        profile,
        overview,
        today: today_jobs,
        upcoming,
        completed,
        reviews,
    })
}

// ---------------------------------------------------------------------------
// Customer dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerOverview {
    pub upcoming_bookings: usize,
    pub active_bookings: usize,
    pub completed_bookings: usize,
    pub total_spent: Money,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerDashboard {
    pub profile: CustomerRecord,
    pub overview: CustomerOverview,
    pub upcoming: Vec<BookingRecord>,
    pub active: Vec<BookingRecord>,
    pub completed: Vec<BookingRecord>,
    pub payments: Vec<PaymentRecord>,
}

pub fn customer_dashboard(today: NaiveDate) -> Result<CustomerDashboard, CoreError> {
    let profile = demo_customers(today)
        .into_iter()
        .find(|c| c.id == DEMO_CUSTOMER_ID)
        .ok_or_else(|| CoreError::not_found("Customer", DEMO_CUSTOMER_ID))?;
    let bookings = demo_bookings(today);

    let upcoming: Vec<_> = bookings.iter().filter(|b| is_upcoming(b, today)).cloned().collect();
    let active: Vec<_> = bookings.iter().filter(|b| b.status.is_active()).cloned().collect();
    let completed = filter_by_status(&bookings, StatusFilter::Only(BookingStatus::Completed));

    let overview = CustomerOverview {
        upcoming_bookings: upcoming.len(),
        active_bookings: active.len(),
        completed_bookings: completed.len(),
        total_spent: sum_totals(&bookings),
        average_rating: average_rating(&completed),
    };

    Ok(CustomerDashboard {
        profile,
        overview,
        upcoming,
        active,
        completed,
        payments: demo_payments(today),
    })
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A customer's star rating for a completed booking.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingSubmission {
    pub rating: u8,
    #[serde(default)]
    pub review: Option<String>,
}

/// Check a rating against a booking. Accepted ratings are not stored.
pub fn validate_rating(
    bookings: &[BookingRecord],
    booking_id: &str,
    submission: &RatingSubmission,
) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&submission.rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    let booking = bookings
        .iter()
        .find(|b| b.id == booking_id)
        .ok_or_else(|| CoreError::not_found("Booking", booking_id))?;
    if booking.status != BookingStatus::Completed {
        return Err(CoreError::Validation(
            "Only completed bookings can be rated".into(),
        ));
    }
    Ok(())
}
