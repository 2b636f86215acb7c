//! HTTP client shared foundation
//!
//! One request per call: no retries, no caching. Every failure is mapped to a
//! [`RegistryError`] so callers can decide what a failed fetch means.

use crate::error::RegistryError;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default timeout for registry requests
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(8000);

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = concat!("depscope/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper mapping transport failures to registry errors
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RegistryError::network_error(
                    "",
                    "HTTP client",
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { client, timeout })
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform a GET request and decode the JSON body into `T`
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        debug!(%url, package, "fetching package metadata");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| map_transport_error(e, package, registry))?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "registry responded");

        if status == StatusCode::NOT_FOUND {
            return Err(RegistryError::package_not_found(package, registry));
        }
        if !status.is_success() {
            return Err(RegistryError::http_status(package, registry, status.as_u16()));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::timeout(package, registry)
            } else {
                RegistryError::invalid_response(
                    package,
                    registry,
                    format!("failed to parse JSON: {}", e),
                )
            }
        })
    }
}

fn map_transport_error(error: reqwest::Error, package: &str, registry: &str) -> RegistryError {
    if error.is_timeout() {
        RegistryError::timeout(package, registry)
    } else {
        RegistryError::network_error(package, registry, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_http_client_with_config() {
        let client = HttpClient::with_config(Duration::from_secs(2), "test-agent/1.0").unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_millis(8000));
        assert!(DEFAULT_USER_AGENT.starts_with("depscope/"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = HttpClient::with_config(Duration::from_secs(2), "test").unwrap();
        // Port 9 (discard) on localhost is expected to refuse connections
        let err = client
            .get_json::<serde_json::Value>("http://127.0.0.1:9/left-pad", "left-pad", "npm")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::NetworkError { .. } | RegistryError::Timeout { .. }
        ));
        assert_eq!(err.package(), "left-pad");
    }
}
