//! Shared application state handed to every handler

use std::sync::Arc;

use crate::config::{AdminConfig, Mode};
use crate::core::error::AdminResult;
use crate::core::store::RecordStore;
use crate::entities::{Notification, RevenueDetail, Settlement, Transaction, User};
use crate::mock::MockDataset;
use crate::services::NotificationService;
use crate::storage::{InMemoryStore, UpstreamClient, UpstreamStore};

/// Stores and services behind the HTTP surface
///
/// Every collection sits behind `Arc<dyn RecordStore<_>>`, so mock and
/// upstream mode only differ in how the state is assembled.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AdminConfig>,
    pub settlements: Arc<dyn RecordStore<Settlement>>,
    pub transactions: Arc<dyn RecordStore<Transaction>>,
    pub users: Arc<dyn RecordStore<User>>,
    pub revenue_details: Arc<dyn RecordStore<RevenueDetail>>,
    pub notifications: NotificationService,
    /// Present in upstream mode only
    pub upstream: Option<UpstreamClient>,
}

impl AppState {
    /// In-memory state seeded from an existing dataset
    pub fn from_dataset(config: AdminConfig, dataset: MockDataset) -> Self {
        let notifications: Arc<dyn RecordStore<Notification>> =
            Arc::new(InMemoryStore::with_records(dataset.notifications));

        Self {
            config: Arc::new(config),
            settlements: Arc::new(InMemoryStore::with_records(dataset.settlements)),
            transactions: Arc::new(InMemoryStore::with_records(dataset.transactions)),
            users: Arc::new(InMemoryStore::with_records(dataset.users)),
            revenue_details: Arc::new(InMemoryStore::with_records(dataset.revenue_details)),
            notifications: NotificationService::new(notifications),
            upstream: None,
        }
    }

    /// In-memory state generated from `config.mock`
    pub fn mock(config: AdminConfig) -> Self {
        let dataset = MockDataset::generate(&config.mock);
        Self::from_dataset(config, dataset)
    }

    /// State forwarding every store call to the upstream backend
    pub fn upstream(config: AdminConfig) -> AdminResult<Self> {
        let client = UpstreamClient::new(&config.upstream)?;
        tracing::info!(base_url = client.base_url(), "using upstream backend");

        let notifications: Arc<dyn RecordStore<Notification>> =
            Arc::new(UpstreamStore::<Notification>::new(client.clone()));

        Ok(Self {
            config: Arc::new(config),
            settlements: Arc::new(UpstreamStore::<Settlement>::new(client.clone())),
            transactions: Arc::new(UpstreamStore::<Transaction>::new(client.clone())),
            users: Arc::new(UpstreamStore::<User>::new(client.clone())),
            revenue_details: Arc::new(UpstreamStore::<RevenueDetail>::new(client.clone())),
            notifications: NotificationService::new(notifications),
            upstream: Some(client),
        })
    }

    /// Validate `config` and assemble the state matching its mode
    pub fn from_config(config: AdminConfig) -> AdminResult<Self> {
        config.validate()?;
        match config.mode {
            Mode::Mock => Ok(Self::mock(config)),
            Mode::Upstream => Self::upstream(config),
        }
    }
}
