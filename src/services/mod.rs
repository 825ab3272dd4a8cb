//! Domain operations layered over the record stores

pub mod analytics;
pub mod notifications;
pub mod settlements;

pub use analytics::{DashboardSummary, RevenueSummary, dashboard_summary, revenue_summary};
pub use notifications::NotificationService;
pub use settlements::{DayBucket, MonthlyPage, MonthlyQuery, SettlementTotals, Week, monthly};
