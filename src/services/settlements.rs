//! Monthly settlement view: day buckets for one calendar month
//!
//! Settlements of the month are filtered with the regular settlement filters,
//! narrowed to a half-month window or a single day, grouped by settlement
//! date and paginated. Days without settlements never appear as buckets.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::core::engine::{ListQueryEngine, parse_date};
use crate::core::error::{AdminResult, ValidationError};
use crate::core::query::{ListParams, Page};
use crate::entities::Settlement;

/// Half-month window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Week {
    /// Days 1 to 15
    First,
    /// Day 16 to the end of the month
    Second,
}

impl Week {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1week" => Some(Week::First),
            "2week" => Some(Week::Second),
            _ => None,
        }
    }
}

/// Parameters of a monthly settlement request
#[derive(Debug, Clone)]
pub struct MonthlyQuery {
    pub year: i32,
    pub month: u32,
    pub week: Option<Week>,
    pub date: Option<NaiveDate>,
    /// Pagination and the remaining settlement filters
    pub params: ListParams,
}

fn required<'a>(query: &'a HashMap<String, String>, name: &str) -> Result<&'a str, ValidationError> {
    query
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ValidationError::MissingParameter {
            name: name.to_string(),
        })
}

impl MonthlyQuery {
    /// Parse a raw query map; `year` and `month` are required
    pub fn from_query(mut query: HashMap<String, String>) -> AdminResult<Self> {
        let year_raw = required(&query, "year")?;
        let month_raw = required(&query, "month")?;

        let invalid = |name: &str, value: &str| ValidationError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
        };

        let year: i32 = year_raw.parse().map_err(|_| invalid("year", year_raw))?;
        let month: u32 = month_raw
            .parse()
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| invalid("month", month_raw))?;
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(invalid("year", year_raw).into());
        }

        let week = query.get("week").and_then(|w| Week::parse(w));
        let date = query.get("date").and_then(|d| parse_date(d));

        for key in ["year", "month", "week", "date"] {
            query.remove(key);
        }

        Ok(Self {
            year,
            month,
            week,
            date,
            params: ListParams::from_query(query),
        })
    }

    fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Inclusive day range covered by the month and the optional week
    pub fn window(&self) -> (NaiveDate, NaiveDate) {
        let first = self.first_day();
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.checked_sub_days(Days::new(1)))
            .unwrap_or(first);
        let mid = first.with_day(15).unwrap_or(first);

        match self.week {
            None => (first, last),
            Some(Week::First) => (first, mid),
            Some(Week::Second) => (mid.succ_opt().unwrap_or(mid), last),
        }
    }

    fn includes(&self, day: NaiveDate) -> bool {
        let (from, to) = self.window();
        day >= from && day <= to && self.date.is_none_or(|d| d == day)
    }
}

/// Settlements of one day
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub items: Vec<Settlement>,
}

/// Sums over settlements
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettlementTotals {
    pub count: usize,
    pub total_sales: i64,
    pub commission: i64,
    pub delivery_fee: i64,
    pub settlement_amount: i64,
}

pub fn settlement_totals(settlements: &[Settlement]) -> SettlementTotals {
    settlements
        .iter()
        .fold(SettlementTotals::default(), |mut totals, s| {
            totals.count += 1;
            totals.total_sales += s.total_sales;
            totals.commission += s.commission;
            totals.delivery_fee += s.delivery_fee;
            totals.settlement_amount += s.settlement_amount;
            totals
        })
}

/// Paginated day buckets
///
/// `total` counts settlements, not buckets.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPage {
    pub data: Vec<DayBucket>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    /// Totals over every settlement of the window, not just this page
    pub summary: SettlementTotals,
}

/// Group consecutive items sharing a settlement date
fn regroup(items: Vec<Settlement>) -> Vec<DayBucket> {
    let mut buckets: Vec<DayBucket> = Vec::new();
    for item in items {
        match buckets.last_mut() {
            Some(bucket) if bucket.date == item.settlement_date => bucket.items.push(item),
            _ => buckets.push(DayBucket {
                date: item.settlement_date,
                items: vec![item],
            }),
        }
    }
    buckets
}

/// Build the monthly view from the full settlement collection
pub fn monthly(settlements: Vec<Settlement>, query: &MonthlyQuery) -> MonthlyPage {
    let filtered = ListQueryEngine::<Settlement>::new(&query.params).filter(settlements);

    // Calendar order across days, collection (or requested sort) order within a day
    let mut days: BTreeMap<NaiveDate, Vec<Settlement>> = BTreeMap::new();
    for settlement in filtered {
        if query.includes(settlement.settlement_date) {
            days.entry(settlement.settlement_date)
                .or_default()
                .push(settlement);
        }
    }

    let flattened: Vec<Settlement> = days.into_values().flatten().collect();
    let summary = settlement_totals(&flattened);
    let page = Page::paginate(flattened, &query.params);

    tracing::debug!(
        year = query.year,
        month = query.month,
        total = page.total,
        "built monthly settlement page"
    );

    MonthlyPage {
        data: regroup(page.data),
        total: page.total,
        page: page.page,
        page_size: page.page_size,
        summary,
    }
}
