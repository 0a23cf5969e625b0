//! Discovery client configuration.

use std::time::Duration;

/// Discovery client configuration.
///
/// Immutable once the client is constructed; clones of the client share it
/// and may be used concurrently.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Default request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
    /// Treat non-2xx/3xx dispatch responses as errors instead of returning
    /// them verbatim.
    pub error_on_non_success: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("outrider/{}", env!("CARGO_PKG_VERSION")),
            error_on_non_success: false,
        }
    }
}

impl DiscoveryConfig {
    /// Create a new configuration builder.
    pub fn builder() -> DiscoveryConfigBuilder {
        DiscoveryConfigBuilder::default()
    }
}

/// Builder for discovery client configuration.
#[derive(Debug, Default)]
pub struct DiscoveryConfigBuilder {
    config: DiscoveryConfig,
}

impl DiscoveryConfigBuilder {
    /// Set the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable erroring on non-success dispatch statuses.
    pub fn error_on_non_success(mut self, enable: bool) -> Self {
        self.config.error_on_non_success = enable;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> DiscoveryConfig {
        self.config
    }
}
