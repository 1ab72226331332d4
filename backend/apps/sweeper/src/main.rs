//! Session Sweeper Entry Point
//!
//! Periodically deletes expired bearer sessions. Uses `anyhow` for
//! startup errors; sweep failures are logged and retried next tick.

mod config;

use std::sync::Arc;

use anyhow::Context;
use auth::{AuthConfig, AuthService, PgAuthRepository};
use sqlx::postgres::PgPoolOptions;
use tokio::time::{MissedTickBehavior, interval};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::SweeperConfig;

type PgAuthService = AuthService<PgAuthRepository, PgAuthRepository>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sweeper=info,auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SweeperConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Database connection failed"))
        .context("could not connect to the database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let repo = Arc::new(PgAuthRepository::new(pool));
    let auth = AuthService::new(repo.clone(), repo, Arc::new(AuthConfig::from_env()?))?;

    if config.once {
        sweep(&auth).await;
        return Ok(());
    }

    tracing::info!(interval_secs = config.interval.as_secs(), "Sweeper started");

    let mut ticker = interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => sweep(&auth).await,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}

/// One pass; failures never stop the loop
async fn sweep(auth: &PgAuthService) {
    match auth.sweep_expired().await {
        Ok(deleted) => {
            tracing::info!(sessions_deleted = deleted, "Expired session sweep completed");
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Expired session sweep failed, retrying next tick"
            );
        }
    }
}
