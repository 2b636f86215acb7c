//! npm Registry client
//!
//! Fetches the full package document (packument) from the npm registry.
//! API endpoint: https://registry.npmjs.org/{package}

use crate::domain::RegistryMetadata;
use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryClient};
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use serde_json::{Map, Value};

/// npm registry base URL
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Characters left unescaped by JavaScript's `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// npm Registry client
pub struct NpmRegistry {
    client: HttpClient,
    base_url: String,
}

impl NpmRegistry {
    /// Create a client for the public npm registry
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, NPM_REGISTRY_URL)
    }

    /// Create a client for a registry mirror
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Registry base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the URL for a package; the name is encoded as one path segment
    fn build_url(&self, package: &str) -> String {
        format!(
            "{}/{}",
            self.base_url,
            utf8_percent_encode(package, COMPONENT)
        )
    }
}

#[async_trait]
impl RegistryClient for NpmRegistry {
    fn registry_name(&self) -> &'static str {
        "npm"
    }

    async fn fetch_metadata(&self, package: &str) -> Result<RegistryMetadata, RegistryError> {
        let url = self.build_url(package);
        let body: Map<String, Value> = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        RegistryMetadata::deserialize(Value::Object(body)).map_err(|e| {
            RegistryError::invalid_response(package, self.registry_name(), e.to_string())
        })
    }
}
