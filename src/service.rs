//! Service instances and the registry seam.

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, Result};

/// One healthy instance of a logical service, as reported by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstance {
    /// Host/IP address.
    pub address: String,

    /// Port number.
    pub port: u16,

    /// Ordered tags; the first is conventionally the instance's version tag,
    /// with `-` separating numeric components (`1-0-0`).
    pub tags: Vec<String>,
}

impl ServiceInstance {
    /// Create a new service instance.
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
            tags: Vec::new(),
        }
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// The instance's version tag, when it carries any tags.
    pub fn version_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    /// Base URL of the instance.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.address, self.port)
    }

    /// Instance URL with an endpoint path appended.
    ///
    /// An absent or empty endpoint yields the bare base URL. Leading slashes
    /// on the endpoint are trimmed so the join always uses a single
    /// separator.
    pub fn endpoint_url(&self, endpoint: Option<&str>) -> String {
        match endpoint
            .map(|e| e.trim_start_matches('/'))
            .filter(|e| !e.is_empty())
        {
            Some(endpoint) => format!("{}/{}", self.url(), endpoint),
            None => self.url(),
        }
    }
}

/// Healthy-instance lookup against a discovery registry.
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// Return the currently passing instances of `service_name`.
    ///
    /// An unknown service is an empty list, not an error; the caller owns
    /// the empty-set failure.
    async fn healthy_instances(&self, service_name: &str) -> Result<Vec<ServiceInstance>>;
}

/// Key-value retrieval for registries that double as a small config store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch and decode the value stored under `key`.
    async fn fetch(&self, key: &str) -> Result<String>;
}

/// Pick one instance uniformly at random.
///
/// Selection is stateless: no round-robin position, no health weighting, no
/// stickiness between calls. The returned instance is always a member of
/// `instances`.
pub fn select_instance(instances: &[ServiceInstance]) -> Result<&ServiceInstance> {
    instances
        .choose(&mut rand::rng())
        .ok_or(DiscoveryError::NoInstancesAvailable)
}
