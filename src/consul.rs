//! Consul registry backend.

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use tracing::debug;

use crate::error::{DiscoveryError, Result};
use crate::service::{KeyValueStore, ServiceInstance, ServiceRegistry};

/// Compose the registry query for the passing instances of a service.
pub fn compose_health_url(host: &str, service_name: &str) -> String {
    format!("http://{host}/v1/health/service/{service_name}?passing")
}

/// Compose the registry query for a key-value entry.
pub fn compose_kv_url(host: &str, key: &str) -> String {
    format!("http://{host}/v1/kv/{key}")
}

/// Consul-backed registry speaking the agent's HTTP API.
#[derive(Clone)]
pub struct ConsulRegistry {
    host: String,
    client: reqwest::Client,
}

impl ConsulRegistry {
    /// Create a registry client for the agent at `host`.
    ///
    /// `host` is a bare network location (`discovery.example.com:8500`); it
    /// is interpolated into the fixed query templates unchanged.
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_client(host, reqwest::Client::new())
    }

    /// Create a registry client reusing an existing HTTP client.
    pub fn with_client(host: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            host: host.into(),
            client,
        }
    }

    /// The configured registry host.
    pub fn host(&self) -> &str {
        &self.host
    }
}

#[derive(Debug, Deserialize)]
struct HealthEntry {
    #[serde(rename = "Service")]
    service: HealthService,
}

#[derive(Debug, Deserialize)]
struct HealthService {
    #[serde(rename = "Address", default)]
    address: String,
    #[serde(rename = "Port", default)]
    port: u16,
    #[serde(rename = "Tags", default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct KvEntry {
    #[serde(rename = "Value")]
    value: String,
}

#[async_trait]
impl ServiceRegistry for ConsulRegistry {
    async fn healthy_instances(&self, service_name: &str) -> Result<Vec<ServiceInstance>> {
        let url = compose_health_url(&self.host, service_name);
        debug!(service_name, %url, "querying health endpoint");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(DiscoveryError::NonSuccessStatus { status, message });
        }

        let entries: Vec<HealthEntry> = response.json().await?;
        let instances: Vec<ServiceInstance> = entries
            .into_iter()
            .map(|entry| {
                let mut instance = ServiceInstance::new(entry.service.address, entry.service.port);
                instance.tags = entry.service.tags;
                instance
            })
            .collect();

        debug!(service_name, count = instances.len(), "discovered passing instances");
        Ok(instances)
    }
}

#[async_trait]
impl KeyValueStore for ConsulRegistry {
    async fn fetch(&self, key: &str) -> Result<String> {
        let url = compose_kv_url(&self.host, key);
        debug!(key, %url, "querying kv endpoint");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DiscoveryError::ResourceNotFound);
        }

        let entries: Vec<KvEntry> = response.json().await?;
        let entry = entries
            .into_iter()
            .next()
            .ok_or(DiscoveryError::ResourceNotFound)?;

        let raw = base64::engine::general_purpose::STANDARD
            .decode(entry.value)
            .map_err(|err| DiscoveryError::Decode(err.to_string()))?;
        String::from_utf8(raw).map_err(|err| DiscoveryError::Decode(err.to_string()))
    }
}
