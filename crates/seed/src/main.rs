//! Load the demo accounts and service catalog into a database.
//!
//! ```text
//! cleanpro-seed --profile development
//! cleanpro-seed --profile production --database-url sqlite://data/prod.db
//! ```

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cleanpro_db::seed::FixtureSet;

#[derive(Parser, Debug)]
#[command(name = "cleanpro-seed")]
#[command(version)]
#[command(about = "Seed the CleanPro database with demo accounts and services", long_about = None)]
struct Args {
    /// Fixture set to load: development (dev) or production (prod)
    #[arg(short, long, default_value = "development", value_parser = parse_profile)]
    profile: FixtureSet,

    /// sqlite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://data/cleanpro.db")]
    database_url: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn parse_profile(s: &str) -> Result<FixtureSet, String> {
    FixtureSet::parse(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cleanpro_seed=info,cleanpro_db=info".into());
    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let pool = cleanpro_db::create_pool(&args.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", args.database_url))?;

    cleanpro_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let report = cleanpro_db::seed::run(&pool, args.profile)
        .await
        .with_context(|| format!("Seeding the {} fixtures failed", args.profile.as_str()))?;

    tracing::info!(
        fixture_set = args.profile.as_str(),
        users_created = report.users_created,
        users_existing = report.users_existing,
        services_created = report.services_created,
        services_existing = report.services_existing,
        options_created = report.options_created,
        options_existing = report.options_existing,
        "Seed finished"
    );

    pool.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_aliases_parse() {
        let args = Args::try_parse_from(["cleanpro-seed", "--profile", "prod"]).unwrap();
        assert_eq!(args.profile, FixtureSet::Production);

        let args = Args::try_parse_from(["cleanpro-seed"]).unwrap();
        assert_eq!(args.profile, FixtureSet::Development);
    }

    #[test]
    fn unknown_profile_is_rejected() {
        assert!(Args::try_parse_from(["cleanpro-seed", "--profile", "staging"]).is_err());
    }
}
