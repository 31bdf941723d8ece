//! Contains all the routes that this application can handle.

mod api;
mod home;

use crate::AppState;
use home::home;

use axum::{
    http::StatusCode,
    routing::{get, post, put},
    Router,
};

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .nest("/api", api_routes(app_state))
        .route("/health-check", get(health_check))
}

/// API - Routes nested under "/api" path
fn api_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/subscriptions", get(api::list_subscriptions))
        .route(
            "/subscriptions/{subscription_id}/status",
            put(api::update_subscription_status),
        )
        .route("/scan-email", post(api::scan_email))
        .route(
            "/generate-unsubscribe-email/{subscription_id}",
            post(api::generate_unsubscribe_email),
        )
        .route("/send-unsubscribe", post(api::send_unsubscribe))
        .with_state(app_state)
}
