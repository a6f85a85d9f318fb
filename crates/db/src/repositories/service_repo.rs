//! Repository for the `services` and `service_options` tables.

use chrono::Utc;
use sqlx::SqlitePool;

use super::Upserted;
use crate::models::service::{
    NewService, NewServiceOption, ServiceOptionRow, ServiceRow, ServiceWithOptions,
};

const COLUMNS: &str = "id, name, category, description, base_price_cents, duration_minutes, \
                       is_active, created_at";
const OPTION_COLUMNS: &str = "id, service_id, name, description, price_cents, created_at";

pub struct ServiceRepo;

impl ServiceRepo {
    /// Insert a service unless its id is already present.
    pub async fn insert_if_absent(
        pool: &SqlitePool,
        input: &NewService,
    ) -> Result<Upserted<ServiceRow>, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO services
                (id, name, category, description, base_price_cents, duration_minutes, is_active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(&input.id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.description)
        .bind(input.base_price_cents)
        .bind(input.duration_minutes)
        .bind(input.is_active)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        let row = Self::find_by_id(pool, &input.id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(Upserted {
            row,
            created: result.rows_affected() > 0,
        })
    }

    /// Insert a service option unless its id is already present.
    ///
    /// Fails with a foreign-key error if the parent service does not exist.
    pub async fn insert_option_if_absent(
        pool: &SqlitePool,
        input: &NewServiceOption,
    ) -> Result<Upserted<ServiceOptionRow>, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO service_options (id, service_id, name, description, price_cents, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(&input.id)
        .bind(&input.service_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price_cents)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        let query = format!("SELECT {OPTION_COLUMNS} FROM service_options WHERE id = ?1");
        let row = sqlx::query_as::<_, ServiceOptionRow>(&query)
            .bind(&input.id)
            .fetch_one(pool)
            .await?;
        Ok(Upserted {
            row,
            created: result.rows_affected() > 0,
        })
    }

    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<ServiceRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = ?1");
        sqlx::query_as::<_, ServiceRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active services ordered by base price, then id.
    pub async fn list_active(pool: &SqlitePool) -> Result<Vec<ServiceRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM services WHERE is_active = 1 ORDER BY base_price_cents, id"
        );
        sqlx::query_as::<_, ServiceRow>(&query).fetch_all(pool).await
    }

    pub async fn list_options(
        pool: &SqlitePool,
        service_id: &str,
    ) -> Result<Vec<ServiceOptionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {OPTION_COLUMNS} FROM service_options WHERE service_id = ?1 ORDER BY price_cents, id"
        );
        sqlx::query_as::<_, ServiceOptionRow>(&query)
            .bind(service_id)
            .fetch_all(pool)
            .await
    }

    /// Every active service with its options attached.
    pub async fn list_with_options(
        pool: &SqlitePool,
    ) -> Result<Vec<ServiceWithOptions>, sqlx::Error> {
        let services = Self::list_active(pool).await?;
        let mut out = Vec::with_capacity(services.len());
        for service in services {
            let options = Self::list_options(pool, &service.id).await?;
            out.push(ServiceWithOptions { service, options });
        }
        Ok(out)
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM services")
            .fetch_one(pool)
            .await?;
        Ok(n)
    }

    pub async fn count_options(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM service_options")
            .fetch_one(pool)
            .await?;
        Ok(n)
    }
}
