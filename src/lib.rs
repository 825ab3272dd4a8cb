//! # Bouquet Admin
//!
//! Admin API of a flower and gift delivery platform.
//!
//! ## Features
//!
//! - **List Engine**: one filter/sort/paginate pipeline shared by every collection
//! - **Derived Fields**: region from address, category from product name, by keyword
//! - **Notifications**: mark read (single and bulk), delete, live unread count
//! - **Monthly Settlements**: day buckets paginated over the flattened items
//! - **Two Modes**: seeded in-memory mock data, or an upstream backend with token refresh
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bouquet::prelude::*;
//!
//! let params = ListParams::default()
//!     .with_filter("status", "PENDING,COMPLETED")
//!     .with_page(2, 20);
//! let page = ListQueryEngine::<Settlement>::new(&params).run(settlements);
//! assert!(page.data.len() <= page.page_size);
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod mock;
pub mod server;
pub mod services;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AdminError, AdminResult, FieldValue, FilterKind, FilterRule, KeywordClassifier,
        ListParams, ListQueryEngine, Page, Queryable, Record, RecordStore, SortSpec,
    };

    // === Records ===
    pub use crate::entities::{
        Notification, RevenueDetail, Settlement, SettlementStatus, Transaction, User,
    };

    // === Services ===
    pub use crate::services::{MonthlyQuery, NotificationService, monthly};

    // === Storage ===
    pub use crate::storage::{InMemoryStore, UpstreamClient, UpstreamStore};

    // === Server ===
    pub use crate::config::{AdminConfig, Mode};
    pub use crate::server::{AppState, ServerBuilder};

    // === Mock data ===
    pub use crate::mock::MockDataset;
}
