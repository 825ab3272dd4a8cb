//! Seeded mock dataset for mock mode and tests
//!
//! Generation is driven by a `ChaCha8Rng` seeded from [`MockConfig::seed`], so
//! the same configuration always yields the same collections. Ids start at 1
//! in every collection.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::config::MockConfig;
use crate::entities::{
    Grade, Notification, PartyType, PaymentMethod, RefundStatus, RevenueDetail, Settlement,
    SettlementStatus, Transaction, TransactionType, User, UserCategory,
};

/// Shops and florists that receive settlements: (nickname, login id, type)
const PARTIES: &[(&str, &str, PartyType)] = &[
    ("꽃담", "kkotdam", PartyType::Shop),
    ("들꽃정원", "wildgarden", PartyType::Shop),
    ("플로라하우스", "florahouse", PartyType::Shop),
    ("봄날의꽃", "springday", PartyType::Shop),
    ("로즈마리", "rosemary", PartyType::Shop),
    ("그린하우스", "greenhouse", PartyType::Shop),
    ("김하늘 플로리스트", "sky_florist", PartyType::Florist),
    ("이수아 플로리스트", "sua_florist", PartyType::Florist),
    ("박도윤 플로리스트", "doyun_florist", PartyType::Florist),
    ("최서연 플로리스트", "seoyeon_florist", PartyType::Florist),
];

/// Catalogue: (product name, unit price)
const PRODUCTS: &[(&str, i64)] = &[
    ("봄날 꽃바구니", 45_000),
    ("프리미엄 장미 꽃바구니", 89_000),
    ("프리미엄 장미 꽃다발", 55_000),
    ("웨딩 부케", 120_000),
    ("몬스테라 화분", 38_000),
    ("관엽식물 세트", 42_000),
    ("호접란 3대", 90_000),
    ("승진 축하 동양란", 70_000),
    ("개업 축하화환", 100_000),
    ("근조화환", 90_000),
    ("플라워 케이크", 48_000),
    ("포장 리본", 3_000),
];

const SURNAMES: &[&str] = &["김", "이", "박", "최", "정", "강", "조", "윤", "장", "임"];
const GIVEN_NAMES: &[&str] = &[
    "민준", "서연", "도윤", "하은", "지호", "수아", "예준", "지우", "시우", "하린",
];

const ADDRESSES: &[&str] = &[
    "서울특별시 강남구 테헤란로 152",
    "서울특별시 마포구 양화로 45",
    "경기도 성남시 분당구 판교역로 235",
    "경기도 광주시 오포읍 신현로 12",
    "인천광역시 연수구 송도과학로 32",
    "부산광역시 해운대구 센텀중앙로 79",
    "대구광역시 수성구 달구벌대로 2450",
    "광주광역시 서구 상무중앙로 110",
    "대전광역시 유성구 대학로 99",
    "울산광역시 남구 삼산로 200",
    "세종특별자치시 한누리대로 2130",
    "강원도 춘천시 중앙로 1",
    "충청북도 청주시 상당구 상당로 82",
    "충청남도 천안시 동남구 만남로 43",
    "전라북도 전주시 완산구 효자로 225",
    "전라남도 여수시 시청로 1",
    "경상북도 포항시 남구 시청로 1",
    "경상남도 창원시 의창구 중앙대로 151",
    "제주특별자치도 제주시 문연로 6",
    "Singapore 018956",
];

const NOTIFICATION_TEMPLATES: &[(&str, &str)] = &[
    ("신규 주문 접수", "새로운 주문이 접수되었습니다. 주문 내역을 확인해 주세요."),
    ("정산 완료", "정산 처리가 완료되었습니다."),
    ("환불 요청", "고객의 환불 요청이 등록되었습니다."),
    ("신규 회원 가입", "신규 회원이 가입했습니다."),
    ("배송 지연", "배송이 지연되고 있는 주문이 있습니다."),
    ("시스템 점검 안내", "예정된 시스템 점검 일정을 확인해 주세요."),
];

/// Every collection served in mock mode
#[derive(Debug, Clone)]
pub struct MockDataset {
    pub settlements: Vec<Settlement>,
    pub transactions: Vec<Transaction>,
    pub users: Vec<User>,
    pub revenue_details: Vec<RevenueDetail>,
    pub notifications: Vec<Notification>,
}

struct Generator<'c> {
    config: &'c MockConfig,
    rng: ChaCha8Rng,
}

impl MockDataset {
    pub fn generate(config: &MockConfig) -> Self {
        let mut generator = Generator {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        };

        let dataset = Self {
            settlements: generator.settlements(),
            users: generator.users(),
            transactions: generator.transactions(),
            revenue_details: generator.revenue_details(),
            notifications: generator.notifications(),
        };

        tracing::info!(
            seed = config.seed,
            settlements = dataset.settlements.len(),
            users = dataset.users.len(),
            transactions = dataset.transactions.len(),
            revenue_details = dataset.revenue_details.len(),
            notifications = dataset.notifications.len(),
            "generated mock dataset"
        );
        dataset
    }
}

impl Generator<'_> {
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        // Every table above is non-empty
        items.choose(&mut self.rng).unwrap_or(&items[0])
    }

    fn days_before_anchor(&self, days: u64) -> NaiveDate {
        self.config
            .anchor_date
            .checked_sub_days(Days::new(days))
            .unwrap_or(self.config.anchor_date)
    }

    /// A random day within the configured span
    fn day_in_span(&mut self) -> NaiveDate {
        let span = u64::from(self.config.days).max(1);
        let offset = self.rng.gen_range(0..span);
        self.days_before_anchor(offset)
    }

    /// A timestamp during business hours of `date`
    fn business_time(&mut self, date: NaiveDate) -> NaiveDateTime {
        let minutes = self.rng.gen_range(9 * 60..21 * 60);
        date.and_time(NaiveTime::MIN) + Duration::minutes(minutes)
    }

    fn person_name(&mut self) -> String {
        format!("{}{}", self.pick(SURNAMES), self.pick(GIVEN_NAMES))
    }

    fn phone(&mut self) -> String {
        format!(
            "010-{:04}-{:04}",
            self.rng.gen_range(0..10_000),
            self.rng.gen_range(0..10_000)
        )
    }

    fn payment_method(&mut self) -> PaymentMethod {
        *self.pick(PaymentMethod::ALL)
    }

    fn settlements(&mut self) -> Vec<Settlement> {
        let days = u64::from(self.config.days);
        let mut settlements = Vec::new();

        for offset in (0..days).rev() {
            let date = self.days_before_anchor(offset);
            let per_day = self.rng.gen_range(0..=4);
            for _ in 0..per_day {
                let (nickname, login_id, party_type) = *self.pick(PARTIES);
                let total_sales = self.rng.gen_range(10..=300) * 10_000;
                let commission = total_sales / 10;
                let delivery_fee = self.rng.gen_range(0..=5) * 3_000;
                // The last week is still open
                let status = if offset < 7 {
                    SettlementStatus::Pending
                } else {
                    match self.rng.gen_range(0..10) {
                        0 => SettlementStatus::Canceled,
                        1 => SettlementStatus::Pending,
                        _ => SettlementStatus::Completed,
                    }
                };
                let phone = self.phone();

                settlements.push(
                    Settlement::new(
                        settlements.len() as u64 + 1,
                        nickname,
                        login_id,
                        party_type,
                        date,
                    )
                    .with_contact(phone, format!("{}@bouquet.example", login_id))
                    .with_totals(total_sales, commission, delivery_fee)
                    .with_status(status),
                );
            }
        }
        settlements
    }

    fn users(&mut self) -> Vec<User> {
        (1..=self.config.users as u64)
            .map(|id| {
                let category = match self.rng.gen_range(0..20) {
                    0..=12 => UserCategory::Customer,
                    13..=15 => UserCategory::Shop,
                    16..=18 => UserCategory::Florist,
                    _ => UserCategory::Seceder,
                };
                let joined_days_ago = self.rng.gen_range(0..730);
                let join_date = self.days_before_anchor(joined_days_ago);
                let accessed_days_ago = self.rng.gen_range(0..30);
                let last_access_day = self.days_before_anchor(accessed_days_ago).max(join_date);
                let last_access_at = self.business_time(last_access_day);

                User {
                    id,
                    name: self.person_name(),
                    nickname: format!("user{:04}", id),
                    category,
                    grade: *self.pick(Grade::ALL),
                    phone: self.phone(),
                    email: format!("user{:04}@bouquet.example", id),
                    address: self.pick(ADDRESSES).to_string(),
                    join_date,
                    last_access_at,
                }
            })
            .collect()
    }

    fn transactions(&mut self) -> Vec<Transaction> {
        (1..=self.config.transactions as u64)
            .map(|id| {
                let (product_name, unit_price) = *self.pick(PRODUCTS);
                let product_id = PRODUCTS
                    .iter()
                    .position(|(name, _)| *name == product_name)
                    .map_or(0, |index| index as u64 + 1);
                let order_day = self.day_in_span();
                let order_date = self.business_time(order_day);
                let kind = match self.rng.gen_range(0..20) {
                    0..=7 => TransactionType::Barogo,
                    8..=12 => TransactionType::Pickup,
                    13..=16 => TransactionType::Ordering,
                    17 => TransactionType::Refund,
                    _ => TransactionType::Etc,
                };
                let refund_status = (kind == TransactionType::Refund).then(|| *self.pick(RefundStatus::ALL));
                let payment_date = (kind != TransactionType::Ordering)
                    .then(|| order_date + Duration::minutes(self.rng.gen_range(1..30)));
                let (to, _, _) = *self.pick(PARTIES);

                Transaction {
                    id,
                    order_number: format!("ORD-{}-{:05}", order_date.format("%Y%m%d"), id),
                    from: self.person_name(),
                    to: to.to_string(),
                    product_name: product_name.to_string(),
                    product_id,
                    amount: unit_price * self.rng.gen_range(1..=3),
                    payment_method: self.payment_method(),
                    order_date,
                    payment_date,
                    kind,
                    refund_status,
                }
            })
            .collect()
    }

    fn revenue_details(&mut self) -> Vec<RevenueDetail> {
        let mut details = Vec::with_capacity(self.config.revenue_details);
        let mut order = 0u64;

        while details.len() < self.config.revenue_details {
            // Orders carry one to three lines
            order += 1;
            let sold_day = self.day_in_span();
            let sold_at = self.business_time(sold_day);
            let (shop, _, _) = *self.pick(PARTIES);
            let payment_method = self.payment_method();
            let lines = self.rng.gen_range(1..=3);

            for _ in 0..lines {
                if details.len() == self.config.revenue_details {
                    break;
                }
                let (product_name, unit_price) = *self.pick(PRODUCTS);
                details.push(RevenueDetail::new(
                    details.len() as u64 + 1,
                    format!("ORD-{}-R{:05}", sold_at.format("%Y%m%d"), order),
                    sold_at,
                    product_name,
                    shop,
                    self.rng.gen_range(1..=3),
                    unit_price,
                    payment_method,
                ));
            }
        }
        details
    }

    fn notifications(&mut self) -> Vec<Notification> {
        let anchor = self.config.anchor_date.and_time(NaiveTime::MIN);
        (1..=self.config.notifications as u64)
            .map(|id| {
                let (title, content) = *self.pick(NOTIFICATION_TEMPLATES);
                let created_at = anchor - Duration::hours(self.rng.gen_range(0..24 * 14));
                let mut notification = Notification::new(id, title, content, created_at);
                notification.is_read = self.rng.gen_bool(0.4);
                notification
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn small_config() -> MockConfig {
        MockConfig {
            days: 60,
            users: 40,
            transactions: 50,
            revenue_details: 70,
            notifications: 12,
            ..MockConfig::default()
        }
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let a = MockDataset::generate(&small_config());
        let b = MockDataset::generate(&small_config());
        assert_eq!(a.settlements, b.settlements);
        assert_eq!(a.users, b.users);
        assert_eq!(a.transactions, b.transactions);
        assert_eq!(a.revenue_details, b.revenue_details);
        assert_eq!(a.notifications, b.notifications);
    }

    #[test]
    fn test_different_seed_differs() {
        let a = MockDataset::generate(&small_config());
        let b = MockDataset::generate(&MockConfig {
            seed: 7,
            ..small_config()
        });
        assert_ne!(a.users, b.users);
    }

    #[test]
    fn test_collection_sizes_and_sequential_ids() {
        let config = small_config();
        let data = MockDataset::generate(&config);
        assert_eq!(data.users.len(), config.users);
        assert_eq!(data.transactions.len(), config.transactions);
        assert_eq!(data.revenue_details.len(), config.revenue_details);
        assert_eq!(data.notifications.len(), config.notifications);

        let ids: Vec<u64> = data.settlements.iter().map(|s| s.id).collect();
        assert_eq!(ids, (1..=data.settlements.len() as u64).collect::<Vec<_>>());
        let ids: Vec<u64> = data.revenue_details.iter().map(|d| d.id).collect();
        assert_eq!(ids, (1..=config.revenue_details as u64).collect::<Vec<_>>());
    }

    #[test]
    fn test_settlements_span_days_ending_at_anchor() {
        let config = small_config();
        let data = MockDataset::generate(&config);
        let first_day = config.anchor_date - Days::new(59);

        assert!(data.settlements.iter().all(|s| {
            s.settlement_date >= first_day && s.settlement_date <= config.anchor_date
        }));
        // Generation order is calendar order
        assert!(data
            .settlements
            .windows(2)
            .all(|w| w[0].settlement_date <= w[1].settlement_date));

        let days_with_settlements: BTreeSet<NaiveDate> =
            data.settlements.iter().map(|s| s.settlement_date).collect();
        assert!(days_with_settlements.len() < 60, "some days have no settlements");
    }

    #[test]
    fn test_zero_day_span_collapses_to_anchor() {
        let config = MockConfig {
            days: 0,
            ..small_config()
        };
        let data = MockDataset::generate(&config);

        assert!(data.settlements.is_empty());
        assert_eq!(data.transactions.len(), config.transactions);
        assert!(data
            .transactions
            .iter()
            .all(|t| t.order_date.date() == config.anchor_date));
    }

    #[test]
    fn test_settlement_amounts_are_consistent() {
        let data = MockDataset::generate(&small_config());
        assert!(data.settlements.iter().all(|s| {
            s.settlement_amount == s.total_sales - s.commission + s.delivery_fee
        }));
    }

    #[test]
    fn test_refund_status_only_on_refunds() {
        let data = MockDataset::generate(&MockConfig::default());
        assert!(data
            .transactions
            .iter()
            .all(|t| t.refund_status.is_none() || t.kind == TransactionType::Refund));
    }
}
