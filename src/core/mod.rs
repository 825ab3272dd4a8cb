//! Core module containing the traits and types shared by every collection

pub mod classify;
pub mod engine;
pub mod error;
pub mod query;
pub mod record;
pub mod store;

pub use classify::{FALLBACK_LABEL, KeywordClassifier, PRODUCT_CATEGORIES, REGIONS};
pub use engine::{FilterKind, FilterRule, ListQueryEngine};
pub use error::{AdminError, AdminResult, ConfigError, ValidationError};
pub use query::{ListParams, Page, SortSpec};
pub use record::{FieldValue, Queryable, Record};
pub use store::RecordStore;
