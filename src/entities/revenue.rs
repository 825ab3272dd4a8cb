//! Revenue detail lines: one sold product per order

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::classify::PRODUCT_CATEGORIES;
use crate::core::engine::{FilterKind, FilterRule};
use crate::core::record::{FieldValue, Queryable};
use crate::entities::transaction::PaymentMethod;
use crate::impl_record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueDetail {
    pub id: u64,
    pub order_number: String,
    pub sold_at: NaiveDateTime,
    pub product_name: String,
    pub shop_nickname: String,
    pub quantity: u32,
    pub unit_price: i64,
    /// `quantity * unit_price`
    pub amount: i64,
    pub payment_method: PaymentMethod,
}

impl_record!(RevenueDetail, "revenue detail", "revenue-details");

impl RevenueDetail {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        order_number: impl Into<String>,
        sold_at: NaiveDateTime,
        product_name: impl Into<String>,
        shop_nickname: impl Into<String>,
        quantity: u32,
        unit_price: i64,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            id,
            order_number: order_number.into(),
            sold_at,
            product_name: product_name.into(),
            shop_nickname: shop_nickname.into(),
            quantity,
            unit_price,
            amount: i64::from(quantity) * unit_price,
            payment_method,
        }
    }

    /// Product category derived from the product name
    pub fn category(&self) -> &'static str {
        PRODUCT_CATEGORIES.classify(&self.product_name)
    }
}

const REVENUE_FILTERS: &[FilterRule] = &[
    FilterRule::new(
        &["search"],
        FilterKind::Search(&["productName", "shopNickname", "orderNumber", "id"]),
    ),
    FilterRule::new(&["category", "categories"], FilterKind::OneOf("category")),
    FilterRule::new(
        &["paymentMethod", "paymentMethods"],
        FilterKind::OneOf("paymentMethod"),
    ),
    FilterRule::new(&["nickname"], FilterKind::Exact("shopNickname")),
    FilterRule::new(&["date"], FilterKind::OnDate("soldAt")),
    FilterRule::new(&["dateFrom"], FilterKind::DateFrom("soldAt")),
    FilterRule::new(&["dateTo"], FilterKind::DateTo("soldAt")),
];

impl Queryable for RevenueDetail {
    fn filters() -> &'static [FilterRule] {
        REVENUE_FILTERS
    }

    fn sort_fields() -> &'static [&'static str] {
        &["id", "soldAt", "amount", "quantity"]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "id" => FieldValue::Number(self.id as i64),
            "orderNumber" => FieldValue::text(&self.order_number),
            "soldAt" => FieldValue::Date(self.sold_at.date()),
            "productName" => FieldValue::text(&self.product_name),
            "shopNickname" => FieldValue::text(&self.shop_nickname),
            "quantity" => FieldValue::Number(i64::from(self.quantity)),
            "unitPrice" => FieldValue::Number(self.unit_price),
            "amount" => FieldValue::Number(self.amount),
            "paymentMethod" => FieldValue::text(self.payment_method.as_str()),
            "category" => FieldValue::text(self.category()),
            _ => return None,
        };
        Some(value)
    }
}
