//! Shared fixtures for the integration tests
//!
//! Collections are small and hand-written so expectations can be computed by
//! reading this file.

#![allow(dead_code)]

use axum_test::TestServer;
use bouquet::config::{AdminConfig, MockConfig};
use bouquet::entities::{
    Grade, Notification, PartyType, PaymentMethod, RevenueDetail, Settlement, SettlementStatus,
    Transaction, TransactionType, User, UserCategory,
};
use bouquet::mock::MockDataset;
use bouquet::server::{AppState, ServerBuilder};
use chrono::{NaiveDate, NaiveDateTime};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(hour, 0, 0).unwrap()
}

/// Address of user `i`, keyed by `i % 5`: 서울, 경기, 부산, 충북, then 기타
const ADDRESSES: [&str; 5] = [
    "서울특별시 강남구 테헤란로 1",
    "경기도 성남시 분당구 판교로 2",
    "부산광역시 해운대구 센텀로 3",
    "충청북도 청주시 상당구 4",
    "Singapore 018956",
];

const CATEGORIES: [UserCategory; 4] = [
    UserCategory::Customer,
    UserCategory::Shop,
    UserCategory::Florist,
    UserCategory::Seceder,
];

/// 25 users, ids 1..=25
///
/// Category is `CATEGORIES[i % 4]`, grade `Grade::ALL[i % 5]`, nickname `nickNN`
/// and join date 2024-01-i.
pub fn users() -> Vec<User> {
    (1..=25u32)
        .map(|i| User {
            id: u64::from(i),
            name: format!("회원{i}"),
            nickname: format!("nick{i:02}"),
            category: CATEGORIES[i as usize % 4],
            grade: Grade::ALL[i as usize % 5],
            phone: format!("010-1000-{i:04}"),
            email: format!("user{i}@example.com"),
            address: ADDRESSES[i as usize % 5].to_string(),
            join_date: date(2024, 1, i),
            last_access_at: at(2024, 3, 1, 9),
        })
        .collect()
}

/// Settlements around February 2024, in store order:
///
/// | id | date       | status    |
/// |----|------------|-----------|
/// | 1  | 2024-01-31 | COMPLETED |
/// | 2  | 2024-02-03 | COMPLETED |
/// | 3  | 2024-02-20 | COMPLETED |
/// | 4  | 2024-02-03 | COMPLETED |
/// | 5  | 2024-02-10 | PENDING   |
/// | 6  | 2024-02-20 | COMPLETED |
/// | 7  | 2024-02-29 | PENDING   |
/// | 8  | 2024-02-20 | COMPLETED |
/// | 9  | 2024-03-01 | COMPLETED |
///
/// Even ids are florists, odd ids are shops.
pub fn settlements() -> Vec<Settlement> {
    let days = [
        (1, date(2024, 1, 31)),
        (2, date(2024, 2, 3)),
        (3, date(2024, 2, 20)),
        (4, date(2024, 2, 3)),
        (5, date(2024, 2, 10)),
        (6, date(2024, 2, 20)),
        (7, date(2024, 2, 29)),
        (8, date(2024, 2, 20)),
        (9, date(2024, 3, 1)),
    ];
    days.into_iter()
        .map(|(id, day)| {
            let party = if id % 2 == 0 {
                PartyType::Florist
            } else {
                PartyType::Shop
            };
            let status = if id == 5 || id == 7 {
                SettlementStatus::Pending
            } else {
                SettlementStatus::Completed
            };
            Settlement::new(id, format!("partner{id}"), format!("login{id}"), party, day)
                .with_contact(format!("010-2000-{id:04}"), format!("partner{id}@example.com"))
                .with_totals(100_000, 10_000, 3_000)
                .with_status(status)
        })
        .collect()
}

/// Notifications with ids 1, 3, 4, 5, 6 and 7 (id 2 is missing)
///
/// Ids 4 and 6 are read, so four are unread.
pub fn notifications() -> Vec<Notification> {
    [1, 3, 4, 5, 6, 7]
        .into_iter()
        .map(|id| {
            let mut notification = Notification::new(
                id,
                format!("알림 {id}"),
                format!("notification body {id}"),
                at(2024, 3, id as u32, 10),
            );
            if id == 4 || id == 6 {
                notification.mark_read();
            }
            notification
        })
        .collect()
}

pub fn transactions() -> Vec<Transaction> {
    let kinds = [
        TransactionType::Barogo,
        TransactionType::Pickup,
        TransactionType::Refund,
        TransactionType::Ordering,
    ];
    (1..=4u64)
        .map(|id| Transaction {
            id,
            order_number: format!("ORD-{id:04}"),
            from: format!("회원{id}"),
            to: format!("partner{id}"),
            product_name: "장미 꽃다발".to_string(),
            product_id: 100 + id,
            amount: 10_000 * id as i64,
            payment_method: PaymentMethod::Card,
            order_date: at(2024, 2, id as u32, 12),
            payment_date: Some(at(2024, 2, id as u32, 13)),
            kind: kinds[(id - 1) as usize],
            refund_status: None,
        })
        .collect()
}

pub fn revenue_details() -> Vec<RevenueDetail> {
    vec![
        RevenueDetail::new(1, "ORD-0001", at(2024, 2, 1, 11), "축하 화환", "꽃담", 1, 80_000, PaymentMethod::Card),
        RevenueDetail::new(2, "ORD-0001", at(2024, 2, 1, 11), "생일 케이크", "꽃담", 1, 30_000, PaymentMethod::Card),
        RevenueDetail::new(3, "ORD-0002", at(2024, 2, 2, 15), "장미 꽃다발", "플로라", 2, 25_000, PaymentMethod::KakaoPay),
        RevenueDetail::new(4, "ORD-0003", at(2024, 2, 3, 9), "포장 리본", "플로라", 1, 2_000, PaymentMethod::Point),
    ]
}

pub fn dataset() -> MockDataset {
    MockDataset {
        settlements: settlements(),
        transactions: transactions(),
        users: users(),
        revenue_details: revenue_details(),
        notifications: notifications(),
    }
}

/// Mock-mode configuration with a tiny generated dataset
pub fn config() -> AdminConfig {
    AdminConfig {
        mock: MockConfig {
            days: 5,
            users: 3,
            transactions: 3,
            revenue_details: 3,
            notifications: 3,
            ..MockConfig::default()
        },
        ..AdminConfig::default()
    }
}

pub fn server_with_config(config: AdminConfig) -> TestServer {
    let state = AppState::from_dataset(config, dataset());
    let app = ServerBuilder::with_state(state).build();
    TestServer::new(app).expect("Failed to create test server")
}

/// Test server over the fixtures of this module
pub fn server() -> TestServer {
    server_with_config(config())
}
