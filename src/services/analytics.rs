//! Dashboard aggregations

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::core::classify::PRODUCT_CATEGORIES;
use crate::core::engine::ListQueryEngine;
use crate::core::query::ListParams;
use crate::entities::{RevenueDetail, Settlement, SettlementStatus, Transaction, User, UserCategory};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub amount: i64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRevenue {
    pub category: &'static str,
    pub amount: i64,
    pub count: usize,
}

/// Revenue over the filtered sales detail lines
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    pub total_amount: i64,
    /// Distinct order numbers
    pub order_count: usize,
    /// Ascending by date
    pub daily: Vec<DailyRevenue>,
    /// Product category order, `기타` last; categories without sales are omitted
    pub by_category: Vec<CategoryRevenue>,
}

/// Aggregate revenue details after applying the revenue filters in `params`
pub fn revenue_summary(details: Vec<RevenueDetail>, params: &ListParams) -> RevenueSummary {
    let filtered = ListQueryEngine::<RevenueDetail>::new(params).filter(details);

    let mut daily: BTreeMap<NaiveDate, DailyRevenue> = BTreeMap::new();
    let mut categories: IndexMap<&'static str, CategoryRevenue> = PRODUCT_CATEGORIES
        .labels()
        .into_iter()
        .map(|category| {
            (
                category,
                CategoryRevenue {
                    category,
                    amount: 0,
                    count: 0,
                },
            )
        })
        .collect();
    let mut orders = HashSet::new();
    let mut total_amount = 0;

    for detail in &filtered {
        total_amount += detail.amount;
        orders.insert(detail.order_number.as_str());

        let date = detail.sold_at.date();
        let day = daily.entry(date).or_insert(DailyRevenue {
            date,
            amount: 0,
            count: 0,
        });
        day.amount += detail.amount;
        day.count += 1;

        if let Some(bucket) = categories.get_mut(detail.category()) {
            bucket.amount += detail.amount;
            bucket.count += 1;
        }
    }

    RevenueSummary {
        total_amount,
        order_count: orders.len(),
        daily: daily.into_values().collect(),
        by_category: categories.into_values().filter(|c| c.count > 0).collect(),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    pub count: usize,
    pub total_amount: i64,
    pub refund_count: usize,
}

/// Headline numbers of the dashboard landing page
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Every user category, zero counts included
    pub users: IndexMap<&'static str, usize>,
    pub transactions: TransactionStats,
    /// Every settlement status, zero counts included
    pub settlements: IndexMap<&'static str, usize>,
    pub unread_notifications: usize,
}

pub fn dashboard_summary(
    users: &[User],
    transactions: &[Transaction],
    settlements: &[Settlement],
    unread_notifications: usize,
) -> DashboardSummary {
    let mut user_counts: IndexMap<&'static str, usize> =
        UserCategory::ALL.iter().map(|c| (c.as_str(), 0)).collect();
    for user in users {
        *user_counts.entry(user.category.as_str()).or_default() += 1;
    }

    let mut settlement_counts: IndexMap<&'static str, usize> =
        SettlementStatus::ALL.iter().map(|s| (s.as_str(), 0)).collect();
    for settlement in settlements {
        *settlement_counts.entry(settlement.status.as_str()).or_default() += 1;
    }

    DashboardSummary {
        users: user_counts,
        transactions: TransactionStats {
            count: transactions.len(),
            total_amount: transactions.iter().map(|t| t.amount).sum(),
            refund_count: transactions.iter().filter(|t| t.is_refund()).count(),
        },
        settlements: settlement_counts,
        unread_notifications,
    }
}
