//! Well-known role and account status constants.
//!
//! These must match the CHECK constraints in `0001_create_accounts.sql`.

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_CUSTOMER: &str = "CUSTOMER";
pub const ROLE_CLEANER: &str = "CLEANER";

pub const STATUS_ACTIVE: &str = "ACTIVE";
