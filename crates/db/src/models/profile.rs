//! Role-specific profile rows. Each user has at most one of each kind.

use chrono::NaiveDate;
use cleanpro_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomerProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub address: Option<String>,
    pub unit: Option<String>,
    pub postal_code: Option<String>,
    pub preferences: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub struct NewCustomerProfile {
    pub address: Option<String>,
    pub unit: Option<String>,
    pub postal_code: Option<String>,
    pub preferences: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CleanerProfile {
    pub id: DbId,
    pub user_id: DbId,
    /// Comma-separated specialty names.
    pub specialties: String,
    pub hourly_rate_cents: i64,
    pub rating: f64,
    pub completed_jobs: i64,
    pub availability: Option<String>,
    pub documents: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub struct NewCleanerProfile {
    pub specialties: String,
    pub hourly_rate_cents: i64,
    pub rating: f64,
    pub completed_jobs: i64,
    pub availability: Option<String>,
    pub documents: Option<String>,
    pub join_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminProfile {
    pub id: DbId,
    pub user_id: DbId,
    /// Comma-separated permission names, or `all`.
    pub permissions: String,
    pub created_at: Timestamp,
}
