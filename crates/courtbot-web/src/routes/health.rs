//! Landing and health check endpoints.

use axum::Json;
use courtbot::messages::I_AM_COURTBOT;
use serde::Serialize;

#[derive(Serialize)]
pub struct Health {
    pub status: String,
}

/// Health check endpoint.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

/// Greeting at the root.
pub async fn index() -> &'static str {
    I_AM_COURTBOT
}
