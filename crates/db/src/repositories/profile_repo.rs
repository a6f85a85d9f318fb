//! Repository for the `customers`, `cleaners` and `admins` profile tables.
//!
//! All three are keyed by `user_id`; inserting a second profile of the same
//! kind for a user is a no-op. Inserts accept a pool or an open transaction
//! so a profile can be written together with its user.

use chrono::Utc;
use cleanpro_core::types::DbId;
use sqlx::{Acquire, Executor, Sqlite, SqlitePool};

use super::Upserted;
use crate::models::profile::{
    AdminProfile, CleanerProfile, CustomerProfile, NewCleanerProfile, NewCustomerProfile,
};

const CUSTOMER_COLUMNS: &str = "id, user_id, address, unit, postal_code, preferences, created_at";
const CLEANER_COLUMNS: &str = "id, user_id, specialties, hourly_rate_cents, rating, completed_jobs, \
                               availability, documents, join_date, created_at";
const ADMIN_COLUMNS: &str = "id, user_id, permissions, created_at";

pub struct ProfileRepo;

impl ProfileRepo {
    // -----------------------------------------------------------------------
    // Customers
    // -----------------------------------------------------------------------

    pub async fn insert_customer_if_absent<'a, A>(
        conn: A,
        user_id: DbId,
        input: &NewCustomerProfile,
    ) -> Result<Upserted<CustomerProfile>, sqlx::Error>
    where
        A: Acquire<'a, Database = Sqlite>,
    {
        let mut conn = conn.acquire().await?;
        let result = sqlx::query(
            "INSERT INTO customers (user_id, address, unit, postal_code, preferences, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(&input.address)
        .bind(&input.unit)
        .bind(&input.postal_code)
        .bind(&input.preferences)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        let row = Self::find_customer(&mut *conn, user_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(Upserted {
            row,
            created: result.rows_affected() > 0,
        })
    }

    pub async fn find_customer<'e, E>(
        executor: E,
        user_id: DbId,
    ) -> Result<Option<CustomerProfile>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE user_id = ?1");
        sqlx::query_as::<_, CustomerProfile>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    // -----------------------------------------------------------------------
    // Cleaners
    // -----------------------------------------------------------------------

    pub async fn insert_cleaner_if_absent<'a, A>(
        conn: A,
        user_id: DbId,
        input: &NewCleanerProfile,
    ) -> Result<Upserted<CleanerProfile>, sqlx::Error>
    where
        A: Acquire<'a, Database = Sqlite>,
    {
        let mut conn = conn.acquire().await?;
        let result = sqlx::query(
            "INSERT INTO cleaners
                (user_id, specialties, hourly_rate_cents, rating, completed_jobs,
                 availability, documents, join_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(&input.specialties)
        .bind(input.hourly_rate_cents)
        .bind(input.rating)
        .bind(input.completed_jobs)
        .bind(&input.availability)
        .bind(&input.documents)
        .bind(input.join_date)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        let row = Self::find_cleaner(&mut *conn, user_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(Upserted {
            row,
            created: result.rows_affected() > 0,
        })
    }

    pub async fn find_cleaner<'e, E>(
        executor: E,
        user_id: DbId,
    ) -> Result<Option<CleanerProfile>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {CLEANER_COLUMNS} FROM cleaners WHERE user_id = ?1");
        sqlx::query_as::<_, CleanerProfile>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    // -----------------------------------------------------------------------
    // Admins
    // -----------------------------------------------------------------------

    pub async fn insert_admin_if_absent<'a, A>(
        conn: A,
        user_id: DbId,
        permissions: &str,
    ) -> Result<Upserted<AdminProfile>, sqlx::Error>
    where
        A: Acquire<'a, Database = Sqlite>,
    {
        let mut conn = conn.acquire().await?;
        let result = sqlx::query(
            "INSERT INTO admins (user_id, permissions, created_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(permissions)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        let row = Self::find_admin(&mut *conn, user_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(Upserted {
            row,
            created: result.rows_affected() > 0,
        })
    }

    pub async fn find_admin<'e, E>(
        executor: E,
        user_id: DbId,
    ) -> Result<Option<AdminProfile>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE user_id = ?1");
        sqlx::query_as::<_, AdminProfile>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// Row count of one profile table: `customers`, `cleaners` or `admins`.
    pub async fn count(pool: &SqlitePool, table: ProfileTable) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM {}", table.as_str());
        let (n,): (i64,) = sqlx::query_as(&query).fetch_one(pool).await?;
        Ok(n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileTable {
    Customers,
    Cleaners,
    Admins,
}

impl ProfileTable {
    fn as_str(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Cleaners => "cleaners",
            Self::Admins => "admins",
        }
    }
}
