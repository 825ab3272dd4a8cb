//! Resource registry generating the list/detail routes of every record collection

use axum::Router;
use axum::routing::get;
use indexmap::IndexMap;
use std::marker::PhantomData;
use std::sync::Arc;

use super::handlers::records::{get_record, list_records};
use crate::core::record::Queryable;
use crate::core::store::RecordStore;

/// Trait that describes how to build routes for a resource
///
/// Each collection (settlements, users, etc.) is described by one
/// implementation providing its read routes.
pub trait ResourceDescriptor: Send + Sync {
    /// The singular name (e.g., "settlement")
    fn resource_type(&self) -> &str;

    /// The plural form used in URLs (e.g., "settlements")
    fn plural(&self) -> &str;

    /// Build the routes for this resource
    ///
    /// Should return a Router with:
    /// - GET /api/{plural}
    /// - GET /api/{plural}/{id}
    fn build_routes(&self) -> Router;
}

/// Descriptor of a queryable collection served from a record store
pub struct RecordResource<T: Queryable> {
    store: Arc<dyn RecordStore<T>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Queryable> RecordResource<T> {
    pub fn new(store: Arc<dyn RecordStore<T>>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }
}

impl<T: Queryable> ResourceDescriptor for RecordResource<T> {
    fn resource_type(&self) -> &str {
        T::resource_name_singular()
    }

    fn plural(&self) -> &str {
        T::resource_name()
    }

    fn build_routes(&self) -> Router {
        let collection = format!("/api/{}", T::resource_name());
        let item = format!("{collection}/{{id}}");

        Router::new()
            .route(&collection, get(list_records::<T>))
            .route(&item, get(get_record::<T>))
            .with_state(self.store.clone())
    }
}

/// Registry for all read-only collections of the dashboard
///
/// Registration order is kept so route listings stay stable.
#[derive(Default)]
pub struct ResourceRegistry {
    descriptors: IndexMap<String, Box<dyn ResourceDescriptor>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor; a second one with the same plural replaces the first
    pub fn register(&mut self, descriptor: Box<dyn ResourceDescriptor>) {
        let plural = descriptor.plural().to_string();
        self.descriptors.insert(plural, descriptor);
    }

    /// Register the collection served by `store`
    pub fn register_store<T: Queryable>(&mut self, store: Arc<dyn RecordStore<T>>) {
        self.register(Box::new(RecordResource::new(store)));
    }

    /// Merge the routes of every registered resource
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// Plural names of the registered resources, in registration order
    pub fn resource_names(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Notification, User};
    use crate::storage::InMemoryStore;

    fn user_store() -> Arc<dyn RecordStore<User>> {
        Arc::new(InMemoryStore::<User>::new())
    }

    #[test]
    fn test_new_registry_is_empty() {
        assert!(ResourceRegistry::new().resource_names().is_empty());
    }

    #[test]
    fn test_register_keeps_order() {
        let mut registry = ResourceRegistry::new();
        registry.register_store(user_store());
        registry.register_store::<Notification>(Arc::new(InMemoryStore::new()));
        assert_eq!(registry.resource_names(), vec!["users", "notifications"]);
    }

    #[test]
    fn test_register_duplicate_replaces() {
        let mut registry = ResourceRegistry::new();
        registry.register_store(user_store());
        registry.register_store(user_store());
        assert_eq!(registry.resource_names().len(), 1);
    }

    #[test]
    fn test_descriptor_names() {
        let resource = RecordResource::new(user_store());
        assert_eq!(resource.resource_type(), "user");
        assert_eq!(resource.plural(), "users");
    }

    #[test]
    fn test_build_routes_with_resources() {
        let mut registry = ResourceRegistry::new();
        registry.register_store(user_store());
        let _router = registry.build_routes();
    }
}
