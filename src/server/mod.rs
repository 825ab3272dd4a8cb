//! HTTP surface of the admin API
//!
//! The [`ServerBuilder`] assembles:
//! - list/detail routes for every record collection in the [`ResourceRegistry`]
//! - notification inbox routes
//! - monthly settlement, revenue and dashboard aggregations
//! - the token refresh endpoint and, when enabled, the cookie session gate

pub mod auth;
pub mod builder;
pub mod handlers;
pub mod resource_registry;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use resource_registry::{RecordResource, ResourceDescriptor, ResourceRegistry};
pub use state::AppState;
