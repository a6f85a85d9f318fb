//! Row structs and insert DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the table and a `New*` DTO carrying the columns supplied on insert.

pub mod profile;
pub mod service;
pub mod user;
