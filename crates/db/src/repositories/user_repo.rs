//! Repository for the `users` table.

use chrono::Utc;
use sqlx::{Acquire, Executor, Sqlite, SqlitePool};

use super::Upserted;
use crate::models::user::{NewUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, first_name, last_name, phone, role, status, \
                       created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a user unless one with the same email exists.
    ///
    /// An existing row is returned unchanged, whatever `input` says.
    /// Accepts a pool, a connection or an open transaction.
    pub async fn insert_if_absent<'a, A>(
        conn: A,
        input: &NewUser,
    ) -> Result<Upserted<User>, sqlx::Error>
    where
        A: Acquire<'a, Database = Sqlite>,
    {
        let mut conn = conn.acquire().await?;
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users
                (email, password_hash, first_name, last_name, phone, role, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.phone)
        .bind(&input.role)
        .bind(&input.status)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        let row = Self::find_by_email(&mut *conn, &input.email)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(Upserted {
            row,
            created: result.rows_affected() > 0,
        })
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = ?1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(executor)
            .await
    }

    /// List users with the given role, oldest first.
    pub async fn list_by_role(pool: &SqlitePool, role: &str) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE role = ?1 ORDER BY id");
        sqlx::query_as::<_, User>(&query)
            .bind(role)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        Ok(n)
    }
}
