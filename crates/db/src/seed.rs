//! Fixture loading for the demo accounts and the service catalog.
//!
//! Two fixture sets exist: `development` (catalog with add-on style options
//! under residential cleaning) and `production` (leaner catalog, no options).
//! Both are safe to run repeatedly; existing rows are never modified.

use chrono::NaiveDate;
use cleanpro_core::error::CoreError;
use cleanpro_core::password::{hash_password, validate_password_strength};
use cleanpro_core::roles::{ROLE_ADMIN, ROLE_CLEANER, ROLE_CUSTOMER, STATUS_ACTIVE};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::models::profile::{NewCleanerProfile, NewCustomerProfile};
use crate::models::service::{NewService, NewServiceOption};
use crate::models::user::{NewUser, User};
use crate::repositories::{ProfileRepo, ServiceRepo, UserRepo};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Unknown fixture set '{0}'. Must be one of: development, production")]
    UnknownFixtureSet(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureSet {
    Development,
    Production,
}

impl FixtureSet {
    pub fn parse(s: &str) -> Result<Self, SeedError> {
        match s {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(SeedError::UnknownFixtureSet(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// What one seeding run created versus found already present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users_created: usize,
    pub users_existing: usize,
    pub services_created: usize,
    pub services_existing: usize,
    pub options_created: usize,
    pub options_existing: usize,
}

// ---------------------------------------------------------------------------
// Fixture data
// ---------------------------------------------------------------------------

/// A demo login and the profile that goes with it.
struct AccountFixture {
    email: &'static str,
    password: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    phone: &'static str,
    profile: ProfileFixture,
}

enum ProfileFixture {
    Admin { permissions: &'static str },
    Customer(NewCustomerProfile),
    Cleaner(NewCleanerProfile),
}

impl ProfileFixture {
    fn role(&self) -> &'static str {
        match self {
            Self::Admin { .. } => ROLE_ADMIN,
            Self::Customer(_) => ROLE_CUSTOMER,
            Self::Cleaner(_) => ROLE_CLEANER,
        }
    }
}

fn accounts(set: FixtureSet) -> Vec<AccountFixture> {
    let dev = set == FixtureSet::Development;
    vec![
        AccountFixture {
            email: "admin@cleanpro.sg",
            password: "admin123",
            first_name: "Admin",
            last_name: "User",
            phone: "+65 1234 5678",
            profile: ProfileFixture::Admin {
                permissions: if dev {
                    "manage_users,manage_bookings,manage_services,view_analytics"
                } else {
                    "all"
                },
            },
        },
        AccountFixture {
            email: "john.doe@email.com",
            password: "customer123",
            first_name: "John",
            last_name: "Doe",
            phone: if dev { "+65 9123 4567" } else { "+65 9876 5432" },
            profile: ProfileFixture::Customer(if dev {
                NewCustomerProfile {
                    address: Some("123 Orchard Road, #12-34".into()),
                    unit: None,
                    postal_code: Some("238863".into()),
                    preferences: Some(
                        "Focus on kitchen and bathrooms, eco-friendly products preferred".into(),
                    ),
                }
            } else {
                NewCustomerProfile {
                    address: Some("123 Main Street".into()),
                    unit: Some("Apt 4B".into()),
                    postal_code: Some("123456".into()),
                    preferences: Some(
                        r#"{"cleaningFrequency":"weekly","preferredTime":"morning","specialInstructions":"Pet-friendly cleaning products only"}"#
                            .into(),
                    ),
                }
            }),
        },
        AccountFixture {
            email: "sarah.chen@cleanpro.sg",
            password: "cleaner123",
            first_name: "Sarah",
            last_name: "Chen",
            phone: if dev { "+65 9111 2222" } else { "+65 8765 4321" },
            profile: ProfileFixture::Cleaner(if dev {
                NewCleanerProfile {
                    specialties: "Residential,Deep Cleaning".into(),
                    hourly_rate_cents: 2500,
                    rating: 4.9,
                    completed_jobs: 156,
                    availability: Some(
                        "Monday to Friday: 8:00 AM - 6:00 PM, Saturday: 9:00 AM - 3:00 PM, Sunday: Closed"
                            .into(),
                    ),
                    documents: Some("ID_verification.pdf,cleaning_certification.pdf".into()),
                    join_date: None,
                }
            } else {
                NewCleanerProfile {
                    specialties: "residential,deep-cleaning,eco-friendly".into(),
                    hourly_rate_cents: 2500,
                    rating: 4.8,
                    completed_jobs: 150,
                    availability: Some(
                        r#"{"monday":{"start":"08:00","end":"18:00"},"tuesday":{"start":"08:00","end":"18:00"},"wednesday":{"start":"08:00","end":"18:00"},"thursday":{"start":"08:00","end":"18:00"},"friday":{"start":"08:00","end":"18:00"},"saturday":{"start":"09:00","end":"16:00"},"sunday":{"start":"09:00","end":"16:00"}}"#
                            .into(),
                    ),
                    documents: Some("id-card,cleaning-certificate,insurance".into()),
                    join_date: NaiveDate::from_ymd_opt(2023, 1, 15),
                }
            }),
        },
    ]
}

fn service(
    id: &str,
    name: &str,
    category: &str,
    description: &str,
    base_price: i64,
    duration_minutes: i64,
) -> NewService {
    NewService {
        id: id.into(),
        name: name.into(),
        category: category.into(),
        description: description.into(),
        base_price_cents: base_price * 100,
        duration_minutes,
        is_active: true,
    }
}

fn services(set: FixtureSet) -> Vec<NewService> {
    match set {
        FixtureSet::Development => vec![
            service(
                "residential-cleaning",
                "Residential Cleaning",
                "RESIDENTIAL",
                "Regular house cleaning for homes and apartments",
                80,
                120,
            ),
            service(
                "commercial-cleaning",
                "Commercial Cleaning",
                "COMMERCIAL",
                "Professional office and commercial space cleaning",
                120,
                90,
            ),
            service(
                "deep-cleaning",
                "Deep Cleaning",
                "DEEP_CLEANING",
                "Comprehensive deep cleaning and sanitization",
                150,
                180,
            ),
        ],
        FixtureSet::Production => vec![
            service(
                "residential-cleaning",
                "Residential Cleaning",
                "RESIDENTIAL",
                "Regular house cleaning service for homes and apartments",
                80,
                120,
            ),
            service(
                "deep-cleaning",
                "Deep Cleaning",
                "RESIDENTIAL",
                "Thorough cleaning including hard-to-reach areas",
                150,
                240,
            ),
            service(
                "commercial-cleaning",
                "Commercial Cleaning",
                "COMMERCIAL",
                "Office and commercial space cleaning",
                120,
                180,
            ),
        ],
    }
}

fn service_options(set: FixtureSet) -> Vec<NewServiceOption> {
    if set == FixtureSet::Production {
        return Vec::new();
    }
    [
        ("fridge-cleaning", "Inside Fridge Cleaning", "Deep clean inside refrigerator and freezer", 25),
        ("oven-cleaning", "Inside Oven Cleaning", "Deep clean inside oven and stovetop", 30),
        ("window-cleaning", "Window Cleaning", "Clean all windows and mirrors", 40),
    ]
    .into_iter()
    .map(|(id, name, description, price)| NewServiceOption {
        id: id.into(),
        service_id: "residential-cleaning".into(),
        name: name.into(),
        description: description.into(),
        price_cents: price * 100,
    })
    .collect()
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Load a fixture set. Running it again creates nothing new.
pub async fn run(pool: &SqlitePool, set: FixtureSet) -> Result<SeedReport, SeedError> {
    tracing::info!(fixture_set = set.as_str(), "Seeding database");
    let mut report = SeedReport::default();

    for account in accounts(set) {
        let (user, created) = seed_account(pool, &account).await?;
        if created {
            report.users_created += 1;
            tracing::info!(user_id = user.id, email = %user.email, role = %user.role, "Created user");
        } else {
            report.users_existing += 1;
            tracing::debug!(email = %user.email, "User already present");
        }
    }

    for input in services(set) {
        let upserted = ServiceRepo::insert_if_absent(pool, &input).await?;
        if upserted.created {
            report.services_created += 1;
            tracing::info!(service_id = %upserted.row.id, "Created service");
        } else {
            report.services_existing += 1;
        }
    }

    for input in service_options(set) {
        let upserted = ServiceRepo::insert_option_if_absent(pool, &input).await?;
        if upserted.created {
            report.options_created += 1;
            tracing::info!(
                option_id = %upserted.row.id,
                service_id = %upserted.row.service_id,
                "Created service option"
            );
        } else {
            report.options_existing += 1;
        }
    }

    tracing::info!(
        fixture_set = set.as_str(),
        users_created = report.users_created,
        services_created = report.services_created,
        options_created = report.options_created,
        "Seeding complete"
    );
    Ok(report)
}

/// Create the user and its profile when the email is new.
///
/// Both rows are written in one transaction, so a failed profile insert
/// leaves no orphan user behind. An existing user keeps whatever profile it
/// has; the password is only hashed when a row is about to be inserted.
async fn seed_account(
    pool: &SqlitePool,
    account: &AccountFixture,
) -> Result<(User, bool), SeedError> {
    if let Some(existing) = UserRepo::find_by_email(pool, account.email).await? {
        return Ok((existing, false));
    }

    validate_password_strength(account.password)?;
    let new_user = NewUser {
        email: account.email.into(),
        password_hash: hash_password(account.password)?,
        first_name: account.first_name.into(),
        last_name: account.last_name.into(),
        phone: Some(account.phone.into()),
        role: account.profile.role().into(),
        status: STATUS_ACTIVE.into(),
    };
    let mut tx = pool.begin().await?;
    let upserted = UserRepo::insert_if_absent(&mut *tx, &new_user).await?;
    if !upserted.created {
        tx.commit().await?;
        return Ok((upserted.row, false));
    }

    let user_id = upserted.row.id;
    match &account.profile {
        ProfileFixture::Admin { permissions } => {
            ProfileRepo::insert_admin_if_absent(&mut *tx, user_id, permissions).await?;
        }
        ProfileFixture::Customer(profile) => {
            ProfileRepo::insert_customer_if_absent(&mut *tx, user_id, profile).await?;
        }
        ProfileFixture::Cleaner(profile) => {
            ProfileRepo::insert_cleaner_if_absent(&mut *tx, user_id, profile).await?;
        }
    }
    tx.commit().await?;
    Ok((upserted.row, true))
}
