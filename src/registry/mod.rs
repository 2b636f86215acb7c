//! Registry access for fetching package metadata
//!
//! This module provides:
//! - HTTP client shared foundation with a bounded per-request timeout
//! - npm Registry client

mod client;
mod npm;

pub use client::{HttpClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use npm::{NpmRegistry, NPM_REGISTRY_URL};

use crate::domain::RegistryMetadata;
use crate::error::RegistryError;
use async_trait::async_trait;

/// Outcome of fetching one package's metadata
pub type FetchResult = Result<RegistryMetadata, RegistryError>;

/// Source of package metadata
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch the metadata record of a package.
    ///
    /// Issues exactly one request per call.
    async fn fetch_metadata(&self, package: &str) -> FetchResult;
}
