//! Service catalog rows as seeded for administration.

use cleanpro_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceRow {
    pub id: String,
    pub name: String,
    /// `RESIDENTIAL`, `COMMERCIAL` or `DEEP_CLEANING`.
    pub category: String,
    pub description: String,
    pub base_price_cents: i64,
    pub duration_minutes: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct NewService {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub base_price_cents: i64,
    pub duration_minutes: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceOptionRow {
    pub id: String,
    pub service_id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct NewServiceOption {
    pub id: String,
    pub service_id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
}

/// A service together with its options.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceWithOptions {
    #[serde(flatten)]
    pub service: ServiceRow,
    pub options: Vec<ServiceOptionRow>,
}
