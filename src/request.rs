//! Request configuration and transport option preparation.

use std::time::Duration;

use http::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::{DiscoveryError, Result};

/// Request body payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Structured body, serialized to JSON before dispatch.
    Json(Value),
    /// Pre-serialized text, passed through unchanged.
    Text(String),
    /// Raw bytes, passed through unchanged.
    Raw(Vec<u8>),
}

/// Caller-supplied request configuration.
///
/// The discovery-only fields (`service_name`, `version`, `endpoint`) steer
/// the pipeline and are never forwarded to the transport; everything else
/// passes through.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Target logical service. Required on every call.
    pub service_name: Option<String>,

    /// Semantic-version range filtering on the instance version tag.
    pub version: Option<String>,

    /// Path suffix appended to the instance base URL.
    pub endpoint: Option<String>,

    /// HTTP verb; defaults to GET when unset.
    pub method: Option<String>,

    /// Request payload.
    pub body: Option<Body>,

    /// Extra headers forwarded to the transport.
    pub headers: Vec<(String, String)>,

    /// Extra query parameters forwarded to the transport.
    pub query: Vec<(String, String)>,

    /// Per-request timeout forwarded to the transport.
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a configuration targeting `service_name`.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: Some(service_name.into()),
            ..Self::default()
        }
    }

    /// Set the version constraint.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the endpoint path suffix.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the HTTP method.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set a structured body, serialized to JSON at dispatch time.
    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(Body::Json(value)),
            Err(err) => {
                tracing::error!(error = %err, "failed to convert json body");
            }
        }
        self
    }

    /// Set a pre-serialized text body.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Body::Text(body.into()));
        self
    }

    /// Set a raw byte body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(Body::Raw(body.into()));
        self
    }

    /// Add a header to forward to the transport.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter to forward to the transport.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Options handed to the transport for the final dispatch.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Resolved HTTP method.
    pub method: Method,
    /// Headers to forward.
    pub headers: Vec<(String, String)>,
    /// Query parameters to forward.
    pub query: Vec<(String, String)>,
    /// Prepared body, when the request carries one.
    pub body: Option<PreparedBody>,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
}

/// A request body ready for the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedBody {
    /// Serialized payload bytes.
    pub bytes: Vec<u8>,
    /// Content type implied by the body kind, when there is one.
    pub content_type: Option<&'static str>,
}

/// Resolve the configured method, defaulting to GET.
///
/// Anything outside the supported set (GET, POST, PUT, DELETE) is rejected;
/// input is case-insensitive.
pub fn resolve_method(raw: Option<&str>) -> Result<Method> {
    let Some(raw) = raw else {
        return Ok(Method::GET);
    };

    let method = Method::from_bytes(raw.to_ascii_uppercase().as_bytes())
        .map_err(|_| DiscoveryError::UnsupportedMethod)?;
    let supported = [Method::GET, Method::POST, Method::PUT, Method::DELETE];
    if supported.contains(&method) {
        Ok(method)
    } else {
        Err(DiscoveryError::UnsupportedMethod)
    }
}

/// Map a request configuration into transport options.
///
/// Strips the discovery-only fields, serializes a structured body to JSON
/// bytes, and leaves pre-serialized bodies untouched. The caller's
/// configuration is not consumed or mutated.
pub fn prepare(config: &RequestConfig, method: Method) -> TransportOptions {
    let body = config.body.as_ref().map(|body| match body {
        Body::Json(value) => PreparedBody {
            bytes: serde_json::to_vec(value).unwrap_or_default(),
            content_type: Some("application/json"),
        },
        Body::Text(text) => PreparedBody {
            bytes: text.clone().into_bytes(),
            content_type: Some("text/plain; charset=utf-8"),
        },
        Body::Raw(bytes) => PreparedBody {
            bytes: bytes.clone(),
            content_type: None,
        },
    });

    TransportOptions {
        method,
        headers: config.headers.clone(),
        query: config.query.clone(),
        body,
        timeout: config.timeout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_defaults_to_get() {
        assert_eq!(resolve_method(None).unwrap(), Method::GET);
    }

    #[test]
    fn method_parsing_is_case_insensitive() {
        assert_eq!(resolve_method(Some("post")).unwrap(), Method::POST);
        assert_eq!(resolve_method(Some("DELETE")).unwrap(), Method::DELETE);
        assert_eq!(resolve_method(Some("Put")).unwrap(), Method::PUT);
    }

    #[test]
    fn methods_outside_the_supported_set_are_rejected() {
        for raw in ["asdf", "TRACE", "patch", ""] {
            let err = resolve_method(Some(raw)).unwrap_err();
            assert_eq!(err.to_string(), "unsupported method");
        }
    }

    #[test]
    fn structured_bodies_are_serialized_to_json() {
        let config = RequestConfig::new("users").json(&json!({"beep": "boop"}));
        let options = prepare(&config, Method::POST);

        let body = options.body.unwrap();
        assert_eq!(body.bytes, br#"{"beep":"boop"}"#);
        assert_eq!(body.content_type, Some("application/json"));
    }

    #[test]
    fn raw_bodies_pass_through_unchanged() {
        let payload = vec![0xde, 0xad, 0xbe, 0xef];
        let config = RequestConfig::new("users").body(payload.clone());
        let options = prepare(&config, Method::POST);

        let body = options.body.unwrap();
        assert_eq!(body.bytes, payload);
        assert_eq!(body.content_type, None);
    }

    #[test]
    fn text_bodies_keep_their_bytes() {
        let config = RequestConfig::new("users").text("already-serialized");
        let options = prepare(&config, Method::PUT);

        let body = options.body.unwrap();
        assert_eq!(body.bytes, b"already-serialized");
    }

    #[test]
    fn passthrough_options_are_carried() {
        let config = RequestConfig::new("users")
            .header("x-beep", "boop")
            .query("page", "2")
            .timeout(Duration::from_secs(5));
        let options = prepare(&config, Method::GET);

        assert_eq!(options.headers, vec![("x-beep".into(), "boop".into())]);
        assert_eq!(options.query, vec![("page".into(), "2".into())]);
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
        assert!(options.body.is_none());
    }

    #[test]
    fn preparation_leaves_the_config_intact() {
        let config = RequestConfig::new("users")
            .version("^1.0.0")
            .endpoint("res")
            .json(&json!({"beep": "boop"}));

        let _ = prepare(&config, Method::GET);

        assert_eq!(config.service_name.as_deref(), Some("users"));
        assert_eq!(config.version.as_deref(), Some("^1.0.0"));
        assert_eq!(config.endpoint.as_deref(), Some("res"));
        assert!(config.body.is_some());
    }
}
