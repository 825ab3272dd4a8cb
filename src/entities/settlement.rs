//! Settlement records: periodic payouts to shops and florists

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::engine::{FilterKind, FilterRule};
use crate::core::record::{FieldValue, Queryable};
use crate::{impl_record, record_enum};

record_enum! {
    /// Settlement lifecycle; only moves forward from `PENDING`
    SettlementStatus {
        Pending => "PENDING",
        Canceled => "CANCELED",
        Completed => "COMPLETED",
    }
}

record_enum! {
    /// Kind of party receiving the payout
    PartyType {
        Shop => "SHOP",
        Florist => "FLORIST",
    }
}

/// A payout computation for one party on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub id: u64,
    pub nickname: String,
    pub login_id: String,
    pub phone: String,
    pub email: String,
    pub total_sales: i64,
    pub commission: i64,
    pub delivery_fee: i64,
    /// `total_sales - commission + delivery_fee`
    pub settlement_amount: i64,
    pub status: SettlementStatus,
    pub settlement_date: NaiveDate,
    pub party_type: PartyType,
}

impl_record!(Settlement, "settlement", "settlements");

impl Settlement {
    /// A pending settlement with zero totals and no contact details
    pub fn new(
        id: u64,
        nickname: impl Into<String>,
        login_id: impl Into<String>,
        party_type: PartyType,
        settlement_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            nickname: nickname.into(),
            login_id: login_id.into(),
            phone: String::new(),
            email: String::new(),
            total_sales: 0,
            commission: 0,
            delivery_fee: 0,
            settlement_amount: 0,
            status: SettlementStatus::Pending,
            settlement_date,
            party_type,
        }
    }

    pub fn with_contact(mut self, phone: impl Into<String>, email: impl Into<String>) -> Self {
        self.phone = phone.into();
        self.email = email.into();
        self
    }

    /// Set the totals and recompute the settlement amount
    pub fn with_totals(mut self, total_sales: i64, commission: i64, delivery_fee: i64) -> Self {
        self.total_sales = total_sales;
        self.commission = commission;
        self.delivery_fee = delivery_fee;
        self.settlement_amount = total_sales - commission + delivery_fee;
        self
    }

    pub fn with_status(mut self, status: SettlementStatus) -> Self {
        self.status = status;
        self
    }
}

const SETTLEMENT_FILTERS: &[FilterRule] = &[
    FilterRule::new(
        &["search"],
        FilterKind::Search(&["nickname", "loginId", "phone", "email", "id"]),
    ),
    FilterRule::new(&["status", "statuses"], FilterKind::OneOf("status")),
    FilterRule::new(&["type", "partyType"], FilterKind::OneOf("partyType")),
    FilterRule::new(&["dateFrom"], FilterKind::DateFrom("settlementDate")),
    FilterRule::new(&["dateTo"], FilterKind::DateTo("settlementDate")),
    FilterRule::new(&["date"], FilterKind::OnDate("settlementDate")),
];

impl Queryable for Settlement {
    fn filters() -> &'static [FilterRule] {
        SETTLEMENT_FILTERS
    }

    fn sort_fields() -> &'static [&'static str] {
        &[
            "id",
            "nickname",
            "settlementDate",
            "totalSales",
            "settlementAmount",
        ]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "id" => FieldValue::Number(self.id as i64),
            "nickname" => FieldValue::text(&self.nickname),
            "loginId" => FieldValue::text(&self.login_id),
            "phone" => FieldValue::text(&self.phone),
            "email" => FieldValue::text(&self.email),
            "totalSales" => FieldValue::Number(self.total_sales),
            "commission" => FieldValue::Number(self.commission),
            "deliveryFee" => FieldValue::Number(self.delivery_fee),
            "settlementAmount" => FieldValue::Number(self.settlement_amount),
            "status" => FieldValue::text(self.status.as_str()),
            "settlementDate" => FieldValue::Date(self.settlement_date),
            "partyType" => FieldValue::text(self.party_type.as_str()),
            _ => return None,
        };
        Some(value)
    }
}
