//! Record store implementations for the two operating modes

pub mod in_memory;
pub mod upstream;

pub use in_memory::InMemoryStore;
pub use upstream::{TokenPair, UpstreamClient, UpstreamStore};
