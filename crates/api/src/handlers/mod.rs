pub mod catalog;
pub mod checkout;
pub mod dashboard;
pub mod home;
pub mod payment;
pub mod quote;
pub mod services;

use chrono::{FixedOffset, NaiveDate, Utc};
use cleanpro_core::types::Timestamp;

/// Singapore is UTC+8 with no daylight saving.
const BUSINESS_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// The current instant and the business-local calendar date.
pub(crate) fn now_and_today() -> (Timestamp, NaiveDate) {
    let now = Utc::now();
    let today = FixedOffset::east_opt(BUSINESS_UTC_OFFSET_SECS)
        .map_or_else(|| now.date_naive(), |tz| now.with_timezone(&tz).date_naive());
    (now, today)
}
