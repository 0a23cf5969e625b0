//! In-memory registry (for testing and development).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{DiscoveryError, Result};
use crate::service::{KeyValueStore, ServiceInstance, ServiceRegistry};

/// In-memory registry backend.
#[derive(Clone)]
pub struct InMemoryRegistry {
    services: Arc<RwLock<HashMap<String, Vec<ServiceInstance>>>>,
    kv: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            services: Arc::new(RwLock::new(HashMap::new())),
            kv: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register an instance under a service name.
    pub async fn register(&self, service_name: impl Into<String>, instance: ServiceInstance) {
        self.services
            .write()
            .await
            .entry(service_name.into())
            .or_default()
            .push(instance);
    }

    /// Store a key-value entry.
    pub async fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        self.kv.write().await.insert(key.into(), value.into());
    }

    /// Remove all registered instances and key-value entries.
    pub async fn clear(&self) {
        self.services.write().await.clear();
        self.kv.write().await.clear();
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceRegistry for InMemoryRegistry {
    async fn healthy_instances(&self, service_name: &str) -> Result<Vec<ServiceInstance>> {
        Ok(self
            .services
            .read()
            .await
            .get(service_name)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl KeyValueStore for InMemoryRegistry {
    async fn fetch(&self, key: &str) -> Result<String> {
        self.kv
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or(DiscoveryError::ResourceNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registers_and_discovers_instances() {
        let registry = InMemoryRegistry::new();
        registry
            .register("users", ServiceInstance::new("localhost", 8080).with_tag("1-0-0"))
            .await;

        let instances = registry.healthy_instances("users").await.unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].address, "localhost");
    }

    #[tokio::test]
    async fn unknown_services_are_an_empty_list() {
        let registry = InMemoryRegistry::new();
        let instances = registry.healthy_instances("nonexistent").await.unwrap();
        assert!(instances.is_empty());
    }

    #[tokio::test]
    async fn stores_and_fetches_kv_entries() {
        let registry = InMemoryRegistry::new();
        registry.put("app/config", "test value").await;

        assert_eq!(registry.fetch("app/config").await.unwrap(), "test value");

        let err = registry.fetch("missing").await.unwrap_err();
        assert_eq!(err.to_string(), "resource not found");
    }
}
