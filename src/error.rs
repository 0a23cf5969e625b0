//! Discovery client error types.

use thiserror::Error;

/// Result type for discovery client operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Discovery client errors.
///
/// Message texts are stable; calling code and tests match on them verbatim.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// No service name was supplied in the request configuration.
    #[error("service name required")]
    MissingServiceName,

    /// The configured HTTP method is outside the supported set.
    #[error("unsupported method")]
    UnsupportedMethod,

    /// The version constraint does not parse as a semantic-version range.
    #[error("invalid version supplied")]
    InvalidVersion(#[source] semver::Error),

    /// The health query returned zero instances.
    #[error("no service instances available")]
    NoInstancesAvailable,

    /// Instances exist, but none satisfy the version constraint.
    #[error("no services matching requested version were found")]
    NoVersionMatch,

    /// A registry or service response outside the success range, surfaced
    /// when the status-gating policy applies.
    #[error("unexpected status {status}: {message}")]
    NonSuccessStatus {
        /// Upstream HTTP status code.
        status: u16,
        /// Upstream error body, when one was readable.
        message: String,
    },

    /// A key-value lookup found nothing, or the registry said not found.
    #[error("resource not found")]
    ResourceNotFound,

    /// A response payload failed to decode.
    #[error("failed to decode response body: {0}")]
    Decode(String),

    /// Underlying HTTP transport failure, propagated unmodified.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}
