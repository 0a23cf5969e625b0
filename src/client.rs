//! Discovery client orchestration.

use std::sync::Arc;

use http::header::CONTENT_TYPE;
use tracing::debug;

use crate::config::DiscoveryConfig;
use crate::consul::ConsulRegistry;
use crate::error::{DiscoveryError, Result};
use crate::request::{self, RequestConfig, TransportOptions};
use crate::response::Response;
use crate::service::{self, KeyValueStore, ServiceRegistry};
use crate::version;

/// Service discovery request client.
///
/// Resolves a logical service name to one healthy instance per call and
/// relays the configured request to it. The client holds only immutable
/// configuration, so clones may be shared across tasks and used
/// concurrently.
#[derive(Clone)]
pub struct DiscoveryClient<R = ConsulRegistry> {
    registry: R,
    http: reqwest::Client,
    config: Arc<DiscoveryConfig>,
}

impl DiscoveryClient<ConsulRegistry> {
    /// Create a client against the Consul agent at `host`.
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_config(host, DiscoveryConfig::default())
    }

    /// Create a Consul-backed client with an explicit configuration.
    pub fn with_config(host: impl Into<String>, config: DiscoveryConfig) -> Self {
        let http = build_http_client(&config);
        let registry = ConsulRegistry::with_client(host, http.clone());
        Self {
            registry,
            http,
            config: Arc::new(config),
        }
    }
}

impl<R: ServiceRegistry> DiscoveryClient<R> {
    /// Create a client over a custom registry backend.
    pub fn with_registry(registry: R, config: DiscoveryConfig) -> Self {
        let http = build_http_client(&config);
        Self {
            registry,
            http,
            config: Arc::new(config),
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Get the registry backend.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Discover a healthy instance of the configured service and relay the
    /// request to it.
    ///
    /// The pipeline is strictly ordered: validation, constraint parsing,
    /// health query, candidate narrowing and selection, URL composition,
    /// option preparation, dispatch. No step is retried; a failure at any
    /// step terminates the call. The success path performs exactly two
    /// network round-trips.
    pub async fn request(&self, config: RequestConfig) -> Result<Response> {
        let service_name = config
            .service_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(DiscoveryError::MissingServiceName)?;
        let method = request::resolve_method(config.method.as_deref())?;

        let constraint = config
            .version
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .map(version::parse_constraint)
            .transpose()?;

        let instances = self.registry.healthy_instances(service_name).await?;
        if instances.is_empty() {
            return Err(DiscoveryError::NoInstancesAvailable);
        }

        let candidates = match &constraint {
            Some(constraint) => version::narrow_to_best(instances, constraint)?,
            None => instances,
        };
        let instance = service::select_instance(&candidates)?;

        let url = instance.endpoint_url(config.endpoint.as_deref());
        let options = request::prepare(&config, method);
        debug!(service_name, %url, method = %options.method, "dispatching to selected instance");

        self.dispatch(&url, options).await
    }

    async fn dispatch(&self, url: &str, options: TransportOptions) -> Result<Response> {
        let mut builder = self.http.request(options.method, url);

        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(body) = options.body {
            if let Some(content_type) = body.content_type {
                builder = builder.header(CONTENT_TYPE, content_type);
            }
            builder = builder.body(body.bytes);
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let response = Response::from_reqwest(builder.send().await?).await;
        if self.config.error_on_non_success {
            response.error_for_status()
        } else {
            Ok(response)
        }
    }
}

impl<R: ServiceRegistry + KeyValueStore> DiscoveryClient<R> {
    /// Fetch a value from the registry's key-value store.
    pub async fn retrieve(&self, key: &str) -> Result<String> {
        self.registry.fetch(key).await
    }
}

/// Build the shared HTTP transport from the configuration.
fn build_http_client(config: &DiscoveryConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(&config.user_agent)
        .build()
        .expect("Failed to build HTTP client")
}
