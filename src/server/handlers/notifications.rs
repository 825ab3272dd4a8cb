//! Notification inbox handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::records::parse_id;
use crate::core::error::{AdminResult, ValidationError};
use crate::core::query::{ListParams, Page};
use crate::entities::Notification;
use crate::services::NotificationService;

/// Body of `PATCH /api/notifications/read`
#[derive(Debug, Deserialize)]
pub struct MarkManyRequest {
    pub ids: Vec<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkManyResponse {
    /// Notifications that went from unread to read
    pub updated: usize,
    pub unread_count: usize,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: usize,
}

pub async fn list_notifications(
    State(service): State<NotificationService>,
    Query(query): Query<HashMap<String, String>>,
) -> AdminResult<Json<Page<Notification>>> {
    let params = ListParams::from_query(query);
    Ok(Json(service.list(&params).await?))
}

pub async fn unread_count(State(service): State<NotificationService>) -> AdminResult<Json<UnreadCount>> {
    Ok(Json(UnreadCount {
        count: service.unread_count().await?,
    }))
}

pub async fn get_notification(
    State(service): State<NotificationService>,
    Path(raw_id): Path<String>,
) -> AdminResult<Json<Notification>> {
    Ok(Json(service.get(parse_id(&raw_id)?).await?))
}

pub async fn mark_read(
    State(service): State<NotificationService>,
    Path(raw_id): Path<String>,
) -> AdminResult<Json<Notification>> {
    Ok(Json(service.mark_read(parse_id(&raw_id)?).await?))
}

/// The body is decoded by hand so malformed input gets the JSON error shape
pub async fn mark_many_read(
    State(service): State<NotificationService>,
    body: Bytes,
) -> AdminResult<Json<MarkManyResponse>> {
    let request: MarkManyRequest =
        serde_json::from_slice(&body).map_err(|e| ValidationError::InvalidBody {
            message: e.to_string(),
        })?;

    let updated = service.mark_many_read(&request.ids).await?;
    Ok(Json(MarkManyResponse {
        updated,
        unread_count: service.unread_count().await?,
    }))
}

pub async fn delete_notification(
    State(service): State<NotificationService>,
    Path(raw_id): Path<String>,
) -> AdminResult<StatusCode> {
    service.delete(parse_id(&raw_id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
