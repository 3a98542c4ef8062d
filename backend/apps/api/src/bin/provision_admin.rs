//! Creates an admin account from `ADMIN_*` environment variables.
//!
//! ```text
//! ADMIN_USERNAME=treasurer ADMIN_EMAIL=t@example.org ADMIN_PASSWORD=... \
//! ADMIN_PERMISSIONS=view_donations,view_analytics cargo run --bin provision_admin
//! ```

use std::env;
use std::sync::Arc;

use anyhow::Context;
use auth::PgAdminRepository;
use auth::application::provision_admin::{ProvisionAdminInput, ProvisionAdminUseCase};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{} must be set", key))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "provision_admin=info,auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let input = ProvisionAdminInput {
        username: required("ADMIN_USERNAME")?,
        email: required("ADMIN_EMAIL")?,
        password: required("ADMIN_PASSWORD")?,
        role: env::var("ADMIN_ROLE").ok(),
        permissions: env::var("ADMIN_PERMISSIONS")
            .map(|raw| raw.split(',').map(|p| p.trim().to_string()).collect())
            .unwrap_or_default(),
    };

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&required("DATABASE_URL")?)
        .await?;

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    let repo = Arc::new(PgAdminRepository::new(pool));
    let admin = ProvisionAdminUseCase::new(repo)
        .execute(input)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    tracing::info!(
        admin_id = %admin.admin_id,
        role = %admin.role,
        permissions = ?admin.permissions.codes(),
        "Admin ready"
    );

    Ok(())
}
