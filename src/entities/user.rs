//! Platform members: customers, shops, florists and withdrawn accounts

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::classify::REGIONS;
use crate::core::engine::{FilterKind, FilterRule};
use crate::core::record::{FieldValue, Queryable};
use crate::{impl_record, record_enum};

record_enum! {
    UserCategory {
        Customer => "customer",
        Shop => "shop",
        Florist => "florist",
        Seceder => "seceder",
    }
}

record_enum! {
    /// Membership tier, lowest first
    Grade {
        Bronze => "BRONZE",
        Silver => "SILVER",
        Gold => "GOLD",
        Platinum => "PLATINUM",
        Vip => "VIP",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub nickname: String,
    pub category: UserCategory,
    pub grade: Grade,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub join_date: NaiveDate,
    pub last_access_at: NaiveDateTime,
}

impl_record!(User, "user", "users");

impl User {
    /// Region derived from the address
    pub fn region(&self) -> &'static str {
        REGIONS.classify(&self.address)
    }
}

const USER_FILTERS: &[FilterRule] = &[
    FilterRule::new(
        &["search"],
        FilterKind::Search(&["name", "nickname", "id", "phone", "email", "address"]),
    ),
    FilterRule::new(&["category", "categories"], FilterKind::OneOf("category")),
    FilterRule::new(&["grade", "grades"], FilterKind::OneOf("grade")),
    FilterRule::new(&["region", "regions"], FilterKind::OneOf("region")),
    FilterRule::new(&["dateFrom"], FilterKind::DateFrom("joinDate")),
    FilterRule::new(&["dateTo"], FilterKind::DateTo("joinDate")),
];

impl Queryable for User {
    fn filters() -> &'static [FilterRule] {
        USER_FILTERS
    }

    fn sort_fields() -> &'static [&'static str] {
        &["id", "name", "joinDate", "lastAccessAt"]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "id" => FieldValue::Number(self.id as i64),
            "name" => FieldValue::text(&self.name),
            "nickname" => FieldValue::text(&self.nickname),
            "category" => FieldValue::text(self.category.as_str()),
            "grade" => FieldValue::text(self.grade.as_str()),
            "phone" => FieldValue::text(&self.phone),
            "email" => FieldValue::text(&self.email),
            "address" => FieldValue::text(&self.address),
            "region" => FieldValue::text(self.region()),
            "joinDate" => FieldValue::Date(self.join_date),
            // Full timestamp so same-day accesses still sort
            "lastAccessAt" => FieldValue::text_owned(
                self.last_access_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ),
            _ => return None,
        };
        Some(value)
    }
}
