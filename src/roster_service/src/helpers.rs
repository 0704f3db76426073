use color_eyre::eyre::{Result, WrapErr};
use roster_adapters::{
    config::RosterSettings, hashing::Argon2Hasher, persistence::PostgresAccountStore,
};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::AccountService;

/// Account service backed by Postgres with Argon2id hashing.
pub type PostgresAccountService = AccountService<PostgresAccountStore<Argon2Hasher>>;

/// Connect to Postgres, migrate, and wire up an [`AccountService`].
///
/// Pass `None` to load settings from the config file and environment.
pub async fn build_account_service(
    settings: Option<&RosterSettings>,
) -> Result<PostgresAccountService> {
    let loaded;
    let settings = match settings {
        Some(settings) => settings,
        None => {
            loaded = RosterSettings::load().wrap_err("Failed to load settings")?;
            &loaded
        }
    };

    let pg_pool = configure_postgresql(settings).await?;
    tracing::info!("Account service connected to Postgres");

    Ok(AccountService::new(PostgresAccountStore::new(
        pg_pool,
        Argon2Hasher::new(),
    )))
}

/// Configure and return a PostgreSQL connection pool
///
/// Creates a pool from the loaded settings and runs all pending migrations.
///
/// # Returns
/// A configured PgPool ready for use
pub async fn configure_postgresql(settings: &RosterSettings) -> Result<PgPool> {
    let pg_pool = get_postgres_pool(
        settings.postgres.url.expose_secret(),
        settings.postgres.max_connections,
    )
    .await
    .wrap_err("Failed to create Postgres connection pool")?;

    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .wrap_err("Failed to run migrations")?;

    Ok(pg_pool)
}

/// Create a PostgreSQL connection pool
///
/// # Arguments
/// * `url` - Database connection URL
/// * `max_connections` - Upper bound on pooled connections
pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default `info` filter. Fails if a subscriber is
/// already installed.
pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
