//! Aggregated views: monthly settlements, revenue and dashboard summaries

use axum::Json;
use axum::extract::{Query, State};
use std::collections::HashMap;

use crate::core::error::AdminResult;
use crate::core::query::ListParams;
use crate::server::state::AppState;
use crate::services::{
    DashboardSummary, MonthlyPage, MonthlyQuery, RevenueSummary, dashboard_summary, monthly,
    revenue_summary,
};

/// `GET /api/settlements/monthly?year=&month=[&week=][&date=]`
pub async fn monthly_settlements(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> AdminResult<Json<MonthlyPage>> {
    let query = MonthlyQuery::from_query(query)?;
    let settlements = state.settlements.list().await?;
    Ok(Json(monthly(settlements, &query)))
}

/// `GET /api/revenue/summary`, accepting the revenue detail filters
pub async fn revenue(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> AdminResult<Json<RevenueSummary>> {
    let params = ListParams::from_query(query);
    let details = state.revenue_details.list().await?;
    Ok(Json(revenue_summary(details, &params)))
}

/// `GET /api/dashboard/summary`
pub async fn dashboard(State(state): State<AppState>) -> AdminResult<Json<DashboardSummary>> {
    let (users, transactions, settlements, unread) = tokio::try_join!(
        state.users.list(),
        state.transactions.list(),
        state.settlements.list(),
        state.notifications.unread_count(),
    )?;
    Ok(Json(dashboard_summary(&users, &transactions, &settlements, unread)))
}
