//! # Outrider
//!
//! Client-side service discovery for Consul-backed deployments: resolve a
//! logical service name to one healthy instance and relay an HTTP request to
//! it, without hardcoding host:port pairs.
//!
//! ## Features
//!
//! - **Health-checked discovery** - only passing instances are considered
//! - **Version constraints** - semantic-version ranges matched against
//!   instance tags, narrowed to the best satisfying version
//! - **Uniform random selection** - stateless choice among the candidates
//! - **Key-value retrieval** - read configuration values from the registry
//! - **Pluggable backends** - Consul over HTTP, or in-memory for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use outrider::{DiscoveryClient, RequestConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DiscoveryClient::new("discovery.internal:8500");
//!
//!     let response = client
//!         .request(
//!             RequestConfig::new("users")
//!                 .version("^1.0.0")
//!                 .endpoint("profiles/42"),
//!         )
//!         .await?;
//!
//!     println!("status: {}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Posting a Structured Body
//!
//! ```rust,no_run
//! use outrider::{DiscoveryClient, RequestConfig};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DiscoveryClient::new("discovery.internal:8500");
//!
//! let response = client
//!     .request(
//!         RequestConfig::new("orders")
//!             .endpoint("orders")
//!             .method("POST")
//!             .json(&json!({"item": "widget", "quantity": 5})),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod consul;
mod error;
mod memory;
mod request;
mod response;
mod service;
mod version;

pub use client::DiscoveryClient;
pub use config::{DiscoveryConfig, DiscoveryConfigBuilder};
pub use consul::{ConsulRegistry, compose_health_url, compose_kv_url};
pub use error::{DiscoveryError, Result};
pub use memory::InMemoryRegistry;
pub use request::{Body, PreparedBody, RequestConfig, TransportOptions, prepare, resolve_method};
pub use response::Response;
pub use service::{KeyValueStore, ServiceInstance, ServiceRegistry, select_instance};
pub use version::{narrow_to_best, normalize_tag, parse_constraint};

// Re-export common types
pub use bytes::Bytes;
pub use http::{Method, StatusCode};
pub use url::Url;

/// Prelude for common imports.
///
/// ```
/// use outrider::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::DiscoveryClient;
    pub use crate::config::{DiscoveryConfig, DiscoveryConfigBuilder};
    pub use crate::consul::ConsulRegistry;
    pub use crate::error::{DiscoveryError, Result};
    pub use crate::memory::InMemoryRegistry;
    pub use crate::request::{Body, RequestConfig};
    pub use crate::response::Response;
    pub use crate::service::{KeyValueStore, ServiceInstance, ServiceRegistry};
    pub use http::{Method, StatusCode};
}
