//! Transaction records: orders and payments between customers and shops

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::engine::{FilterKind, FilterRule};
use crate::core::record::{FieldValue, Queryable};
use crate::{impl_record, record_enum};

record_enum! {
    /// How an order was paid
    PaymentMethod {
        Card => "CARD",
        BankTransfer => "BANK_TRANSFER",
        KakaoPay => "KAKAO_PAY",
        NaverPay => "NAVER_PAY",
        Point => "POINT",
    }
}

record_enum! {
    /// Fulfilment channel of a transaction
    TransactionType {
        Barogo => "BAROGO",
        Pickup => "PICKUP",
        Refund => "REFUND",
        Ordering => "ORDERING",
        Etc => "ETC",
    }
}

record_enum! {
    RefundStatus {
        Requested => "REQUESTED",
        Completed => "COMPLETED",
        Rejected => "REJECTED",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub order_number: String,
    /// Paying party
    pub from: String,
    /// Receiving shop or florist
    pub to: String,
    pub product_name: String,
    pub product_id: u64,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub order_date: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDateTime>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_status: Option<RefundStatus>,
}

impl_record!(Transaction, "transaction", "transactions");

impl Transaction {
    pub fn is_refund(&self) -> bool {
        self.kind == TransactionType::Refund || self.refund_status.is_some()
    }
}

const TRANSACTION_FILTERS: &[FilterRule] = &[
    FilterRule::new(
        &["search"],
        FilterKind::Search(&["orderNumber", "from", "to", "productName", "id"]),
    ),
    FilterRule::new(&["type", "types"], FilterKind::OneOf("type")),
    FilterRule::new(
        &["paymentMethod", "paymentMethods"],
        FilterKind::OneOf("paymentMethod"),
    ),
    FilterRule::new(&["refundStatus"], FilterKind::OneOf("refundStatus")),
    FilterRule::new(&["date"], FilterKind::OnDate("orderDate")),
    FilterRule::new(&["dateFrom"], FilterKind::DateFrom("orderDate")),
    FilterRule::new(&["dateTo"], FilterKind::DateTo("orderDate")),
];

impl Queryable for Transaction {
    fn filters() -> &'static [FilterRule] {
        TRANSACTION_FILTERS
    }

    fn sort_fields() -> &'static [&'static str] {
        &["id", "orderDate", "amount", "orderNumber"]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "id" => FieldValue::Number(self.id as i64),
            "orderNumber" => FieldValue::text(&self.order_number),
            "from" => FieldValue::text(&self.from),
            "to" => FieldValue::text(&self.to),
            "productName" => FieldValue::text(&self.product_name),
            "productId" => FieldValue::Number(self.product_id as i64),
            "amount" => FieldValue::Number(self.amount),
            "paymentMethod" => FieldValue::text(self.payment_method.as_str()),
            "orderDate" => FieldValue::Date(self.order_date.date()),
            "paymentDate" => FieldValue::Date(self.payment_date?.date()),
            "type" => FieldValue::text(self.kind.as_str()),
            "refundStatus" => FieldValue::text(self.refund_status?.as_str()),
            _ => return None,
        };
        Some(value)
    }
}
