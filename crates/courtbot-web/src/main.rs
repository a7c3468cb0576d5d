//! Courtbot web server.
//!
//! Receives inbound text messages from the SMS gateway, answers case lookups
//! and files reminder requests. Also serves a JSON case search.

mod config;
mod error;
mod routes;
mod state;

use courtbot::{Conversation, Messages, SessionCodec, SqliteCaseRepository};
use database::{hearing, Database, PhoneKey};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, environment = ?config.environment, "Starting Courtbot");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;
    let hearings = hearing::count_hearings(db.pool()).await?;
    info!(hearings, court_tz = %config.court_tz, "Hearing data loaded");

    // Build the conversation
    let phone_key = PhoneKey::new(&config.phone_encryption_key)?;
    let conversation = Conversation::new(
        SqliteCaseRepository::new(db, phone_key, config.court_tz),
        Messages::new(&config.court_public_url, config.queue_ttl_days, config.court_tz),
    );

    // Build application state
    let state = AppState::new(
        conversation,
        SessionCodec::new(&config.cookie_secret),
        config.environment,
    );

    // The impersonation test page is never served in production
    let static_dir = (!config.environment.is_production()).then_some(config.static_dir.as_path());
    let app = routes::router(static_dir).with_state(state);

    // Start server
    info!(addr = %config.addr, "Courtbot listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
