//! Domain logic for the CleanPro booking platform.
//!
//! Everything in this crate is pure: no database, no HTTP, no clocks read
//! implicitly. Callers pass "today" / "now" in so the same inputs always
//! produce the same outputs.

pub mod catalog;
pub mod checkout;
pub mod dashboard;
pub mod error;
pub mod password;
pub mod payment;
pub mod pricing;
pub mod roles;
pub mod types;
