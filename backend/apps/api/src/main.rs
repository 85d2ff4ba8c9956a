//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod config;

use std::sync::Arc;

use anyhow::Context;
use auth::{AuthAppState, AuthConfig, PgAuthRepository, TokenService};
use platform::token::TokenKeys;
use post::{PgPostRepository, PostAppState};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{build_router, cors_layer};
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                //.unwrap_or_else(|_| "api=debug,auth=debug,post=debug,tower_http=debug".into()),
                .unwrap_or_else(|_| "api=info,auth=info,post=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let auth_config = AuthConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(max_connections = config.max_connections, "Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Signing keys
    let keys = TokenKeys::from_pem_files(&config.jwt_private_key_path, &config.jwt_public_key_path)
        .context("Failed to load JWT keys")?;
    let tokens = TokenService::new(&keys, &auth_config);

    tracing::info!(
        issuer = %auth_config.issuer,
        token_ttl_ms = auth_config.token_ttl.as_millis() as u64,
        "Token service ready"
    );

    let auth_state = AuthAppState::new(PgAuthRepository::new(pool.clone()), auth_config, tokens);
    let post_state = PostAppState::new(
        PgPostRepository::new(pool),
        Arc::clone(&auth_state.repo),
    );

    let app = build_router(auth_state, post_state, cors_layer(&config.frontend_origins));

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
