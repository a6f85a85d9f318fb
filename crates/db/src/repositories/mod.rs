//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&SqlitePool` as the first argument. Inserts keyed by a natural key are
//! create-if-absent: an existing row is returned untouched.

pub mod profile_repo;
pub mod service_repo;
pub mod user_repo;

pub use profile_repo::ProfileRepo;
pub use service_repo::ServiceRepo;
pub use user_repo::UserRepo;

/// The row for a natural key and whether this call created it.
#[derive(Debug, Clone)]
pub struct Upserted<T> {
    pub row: T,
    pub created: bool,
}
