//! Admin notifications

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::engine::{FilterKind, FilterRule};
use crate::core::record::{FieldValue, Queryable};
use crate::impl_record;

/// A notification shown in the admin inbox
///
/// `is_read` only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub is_read: bool,
}

impl_record!(Notification, "notification", "notifications");

impl Notification {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            created_at,
            is_read: false,
        }
    }

    /// Mark as read, returning whether the flag changed
    pub fn mark_read(&mut self) -> bool {
        let changed = !self.is_read;
        self.is_read = true;
        changed
    }
}

const NOTIFICATION_FILTERS: &[FilterRule] = &[
    FilterRule::new(&["search"], FilterKind::Search(&["title", "content"])),
    FilterRule::new(&["isRead"], FilterKind::Flag("isRead")),
];

impl Queryable for Notification {
    fn filters() -> &'static [FilterRule] {
        NOTIFICATION_FILTERS
    }

    fn sort_fields() -> &'static [&'static str] {
        &["id", "createdAt"]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "id" => FieldValue::Number(self.id as i64),
            "title" => FieldValue::text(&self.title),
            "content" => FieldValue::text(&self.content),
            "createdAt" => FieldValue::text_owned(
                self.created_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ),
            "isRead" => FieldValue::Bool(self.is_read),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn created_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 30)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_mark_read_reports_change_once() {
        let mut n = Notification::new(1, "정산 완료", "2월 정산이 완료되었습니다", created_at());
        assert!(n.mark_read());
        assert!(!n.mark_read());
        assert!(n.is_read);
    }

    #[test]
    fn test_missing_is_read_defaults_to_unread() {
        let n: Notification = serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "신규 주문",
            "content": "주문이 접수되었습니다",
            "createdAt": "2024-03-30T08:15:00"
        }))
        .unwrap();
        assert!(!n.is_read);
        assert_eq!(n.created_at, created_at());
    }
}
