//! Route table of the admin API

use axum::extract::OriginalUri;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use super::auth;
use super::handlers::{notifications, reports};
use super::resource_registry::ResourceRegistry;
use super::state::AppState;
use crate::core::error::ErrorResponse;

/// Registry of the plain list/detail collections
pub fn resource_registry(state: &AppState) -> ResourceRegistry {
    let mut registry = ResourceRegistry::new();
    registry.register_store(state.settlements.clone());
    registry.register_store(state.transactions.clone());
    registry.register_store(state.users.clone());
    registry.register_store(state.revenue_details.clone());
    registry
}

/// Notification inbox routes
///
/// `/read` and `/unread-count` are static segments and win over `/{id}`.
pub fn notification_routes(state: &AppState) -> Router {
    Router::new()
        .route("/api/notifications", get(notifications::list_notifications))
        .route("/api/notifications/unread-count", get(notifications::unread_count))
        .route("/api/notifications/read", patch(notifications::mark_many_read))
        .route(
            "/api/notifications/{id}",
            get(notifications::get_notification).delete(notifications::delete_notification),
        )
        .route("/api/notifications/{id}/read", patch(notifications::mark_read))
        .with_state(state.notifications.clone())
}

/// Aggregations and session routes
pub fn report_routes(state: &AppState) -> Router {
    Router::new()
        .route("/api/settlements/monthly", get(reports::monthly_settlements))
        .route("/api/revenue/summary", get(reports::revenue))
        .route("/api/dashboard/summary", get(reports::dashboard))
        .route("/api/auth/refresh", post(auth::refresh))
        .with_state(state.clone())
}

pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME")
    }))
}

/// JSON 404 for unknown routes
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("No route for {}", uri.path()),
            code: "ROUTE_NOT_FOUND",
        }),
    )
}

/// Every route of the admin API, without middleware
pub fn build_routes(state: &AppState) -> Router {
    health_routes()
        .merge(resource_registry(state).build_routes())
        .merge(notification_routes(state))
        .merge(report_routes(state))
        .fallback(route_not_found)
}
