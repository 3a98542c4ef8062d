//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use auth::{AuthConfig, AuthMiddlewareState, PgAdminRepository, TokenService, auth_router};
use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use donation::{
    ConfiguredNotifier, DonationConfig, LogOnlyNotifier, MailReceiptNotifier,
    PgDonationRepository, admin_router, donation_router,
};
use platform::mail::{HttpMailer, MailConfig};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TOKEN_TTL_HOURS: u64 = 24;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,donation=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let max_connections = env_parse("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await?;

    tracing::info!(max_connections, "Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Token configuration
    let auth_config = load_auth_config()?;
    let tokens = Arc::new(TokenService::new(&auth_config));

    // Receipt mail
    let notifier = Arc::new(load_notifier()?);

    let admins = Arc::new(PgAdminRepository::new(pool.clone()));
    let donations = Arc::new(PgDonationRepository::new(pool.clone()));
    let donation_config = Arc::new(DonationConfig::default());
    let auth_state = AuthMiddlewareState::new(admins.clone(), tokens.clone());

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let admin_routes = auth_router(admins, tokens).merge(admin_router(
        donations.clone(),
        notifier.clone(),
        donation_config.clone(),
        auth_state.clone(),
    ));

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/admin", admin_routes)
        .nest(
            "/api/donations",
            donation_router(donations, notifier, donation_config, auth_state),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .context("BIND_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "success": true, "status": "ok" }))
}

fn env_parse<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} is not a valid value", key)),
        Err(_) => Ok(default),
    }
}

fn load_auth_config() -> anyhow::Result<AuthConfig> {
    let ttl_hours = env_parse("JWT_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)?;
    let ttl = token_ttl(ttl_hours)?;

    let config = match env::var("JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => AuthConfig::new(secret.into_bytes()),
        _ if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, using a random development secret");
            AuthConfig::development()
        }
        _ => anyhow::bail!("JWT_SECRET must be set in production"),
    };

    Ok(config.with_token_ttl(ttl))
}

fn token_ttl(hours: u64) -> anyhow::Result<Duration> {
    match hours.checked_mul(3600) {
        Some(secs) if secs > 0 && i64::try_from(secs).is_ok() => Ok(Duration::from_secs(secs)),
        _ => anyhow::bail!("JWT_TTL_HOURS out of range: {}", hours),
    }
}

fn load_notifier() -> anyhow::Result<ConfiguredNotifier> {
    let (Ok(endpoint), Ok(api_key), Ok(from)) = (
        env::var("MAIL_API_URL"),
        env::var("MAIL_API_KEY"),
        env::var("MAIL_FROM"),
    ) else {
        tracing::warn!("Mail relay not configured, receipts will only be logged");
        return Ok(ConfiguredNotifier::LogOnly(LogOnlyNotifier));
    };

    let mailer = HttpMailer::new(MailConfig {
        endpoint,
        api_key,
        from,
    })?;
    tracing::info!(sender = mailer.sender(), "Receipt mail enabled");

    Ok(ConfiguredNotifier::Mail(MailReceiptNotifier::new(mailer)))
}
