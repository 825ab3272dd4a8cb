//! HTTP handlers of the admin API

pub mod notifications;
pub mod records;
pub mod reports;

pub use records::parse_id;
