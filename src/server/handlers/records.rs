//! Generic list/detail handlers shared by every record collection

use axum::Json;
use axum::extract::{Path, Query, State};
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::engine::ListQueryEngine;
use crate::core::error::{AdminError, AdminResult, ValidationError};
use crate::core::query::{ListParams, Page};
use crate::core::record::{Queryable, Record};
use crate::core::store::RecordStore;

/// Parse a path id; only positive integers are ids
pub fn parse_id(raw: &str) -> AdminResult<u64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            ValidationError::InvalidId {
                value: raw.to_string(),
            }
            .into()
        })
}

/// `GET /api/{resource}`
pub async fn list_records<T: Queryable>(
    State(store): State<Arc<dyn RecordStore<T>>>,
    Query(query): Query<HashMap<String, String>>,
) -> AdminResult<Json<Page<T>>> {
    let params = ListParams::from_query(query);
    let records = store.list().await?;
    let page = ListQueryEngine::<T>::new(&params).run(records);

    tracing::debug!(
        resource = T::resource_name(),
        total = page.total,
        page = page.page,
        page_size = page.page_size,
        "listed records"
    );
    Ok(Json(page))
}

/// `GET /api/{resource}/{id}`
pub async fn get_record<T: Queryable>(
    State(store): State<Arc<dyn RecordStore<T>>>,
    Path(raw_id): Path<String>,
) -> AdminResult<Json<T>> {
    let id = parse_id(&raw_id)?;
    store
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AdminError::not_found(T::resource_name_singular(), id))
}
