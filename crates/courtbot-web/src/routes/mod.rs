//! Route handlers for the Courtbot web server.

pub mod cases;
pub mod health;
pub mod sms;

use std::path::Path;

use axum::http::{HeaderName, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the router with all routes.
///
/// `static_dir` serves the SMS test page; pass `None` in production.
pub fn router(static_dir: Option<&Path>) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([HeaderName::from_static("x-requested-with")]);

    let router = Router::new()
        .route("/", get(health::index))
        // Health check
        .route("/health", get(health::health))
        // Public case search
        .route("/cases", get(cases::search_cases))
        // Carrier webhook
        .route("/sms", post(sms::sms_webhook));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(cors).layer(TraceLayer::new_for_http())
}
