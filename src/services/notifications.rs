//! Notification inbox operations

use std::collections::HashSet;
use std::sync::Arc;

use crate::core::engine::ListQueryEngine;
use crate::core::error::{AdminError, AdminResult};
use crate::core::query::{ListParams, Page};
use crate::core::record::Record;
use crate::core::store::RecordStore;
use crate::entities::Notification;

/// Read/unread bookkeeping and deletion over a notification store
///
/// The unread count is derived from the store on every call, so it always
/// agrees with the outcome of earlier mutations.
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn RecordStore<Notification>>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn RecordStore<Notification>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Arc<dyn RecordStore<Notification>> {
        Arc::clone(&self.store)
    }

    pub async fn list(&self, params: &ListParams) -> AdminResult<Page<Notification>> {
        let notifications = self.store.list().await?;
        Ok(ListQueryEngine::<Notification>::new(params).run(notifications))
    }

    pub async fn get(&self, id: u64) -> AdminResult<Notification> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AdminError::not_found(Notification::resource_name_singular(), id))
    }

    /// Mark one notification read; already-read notifications are left as they are
    pub async fn mark_read(&self, id: u64) -> AdminResult<Notification> {
        let mut notification = self.get(id).await?;
        if notification.mark_read() {
            notification = self
                .store
                .update(notification)
                .await?
                .ok_or_else(|| AdminError::not_found(Notification::resource_name_singular(), id))?;
            tracing::debug!(id, "notification marked read");
        }
        Ok(notification)
    }

    /// Mark every existing id read, ignoring unknown ids
    ///
    /// Returns how many notifications went from unread to read.
    pub async fn mark_many_read(&self, ids: &[u64]) -> AdminResult<usize> {
        let mut seen = HashSet::with_capacity(ids.len());
        let mut marked = 0;

        for id in ids.iter().copied().filter(|id| seen.insert(*id)) {
            let Some(mut notification) = self.store.get(id).await? else {
                continue;
            };
            if notification.mark_read() && self.store.update(notification).await?.is_some() {
                marked += 1;
            }
        }

        tracing::debug!(requested = ids.len(), marked, "notifications marked read");
        Ok(marked)
    }

    pub async fn delete(&self, id: u64) -> AdminResult<()> {
        if !self.store.delete(id).await? {
            return Err(AdminError::not_found(
                Notification::resource_name_singular(),
                id,
            ));
        }
        tracing::debug!(id, "notification deleted");
        Ok(())
    }

    pub async fn unread_count(&self) -> AdminResult<usize> {
        let notifications = self.store.list().await?;
        Ok(notifications.iter().filter(|n| !n.is_read).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use chrono::NaiveDate;

    fn service(read_ids: &[u64]) -> NotificationService {
        let created_at = NaiveDate::from_ymd_opt(2024, 3, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let notifications = (1..=6).map(|id| {
            let mut n = Notification::new(id, format!("알림 {}", id), "본문", created_at);
            n.is_read = read_ids.contains(&id);
            n
        });
        NotificationService::new(Arc::new(InMemoryStore::with_records(notifications)))
    }

    #[tokio::test]
    async fn test_mark_many_read_ignores_missing_ids() {
        let service = service(&[]);
        service.store().delete(2).await.unwrap();

        let before = service.unread_count().await.unwrap();
        let marked = service.mark_many_read(&[1, 2, 3]).await.unwrap();
        assert_eq!(marked, 2);
        assert_eq!(service.unread_count().await.unwrap(), before - 2);
        assert!(service.get(1).await.unwrap().is_read);
        assert!(service.get(3).await.unwrap().is_read);
    }

    #[tokio::test]
    async fn test_mark_many_read_counts_only_previously_unread() {
        let service = service(&[1]);
        assert_eq!(service.unread_count().await.unwrap(), 5);
        let marked = service.mark_many_read(&[1, 3, 3, 99]).await.unwrap();
        assert_eq!(marked, 1);
        assert_eq!(service.unread_count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_mark_read_is_idempotent() {
        let service = service(&[]);
        assert!(service.mark_read(4).await.unwrap().is_read);
        assert!(service.mark_read(4).await.unwrap().is_read);
        assert_eq!(service.unread_count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_mark_read_missing_is_not_found() {
        let err = service(&[]).mark_read(42).await.unwrap_err();
        assert!(matches!(err, AdminError::NotFound { id: 42, .. }));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = service(&[]);
        service.delete(5).await.unwrap();

        assert!(matches!(
            service.get(5).await.unwrap_err(),
            AdminError::NotFound { .. }
        ));
        let page = service.list(&ListParams::default()).await.unwrap();
        assert!(page.data.iter().all(|n| n.id != 5));
        assert_eq!(page.total, 5);

        assert!(service.delete(5).await.is_err());
    }

    #[tokio::test]
    async fn test_list_filters_on_read_flag() {
        let service = service(&[2, 4]);
        let params = ListParams::default().with_filter("isRead", "true");
        let page = service.list(&params).await.unwrap();
        let ids: Vec<u64> = page.data.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }
}
