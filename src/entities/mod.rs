//! Record kinds served by the admin API

pub mod macros;
pub mod notification;
pub mod revenue;
pub mod settlement;
pub mod transaction;
pub mod user;

pub use notification::Notification;
pub use revenue::RevenueDetail;
pub use settlement::{PartyType, Settlement, SettlementStatus};
pub use transaction::{PaymentMethod, RefundStatus, Transaction, TransactionType};
pub use user::{Grade, User, UserCategory};
