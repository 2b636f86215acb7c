//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: the manifest could not be read or is not valid JSON
//! - RegistryError: fetching one package's metadata failed
//! - ConfigError: invalid CLI configuration
//! - AnalysisError: the batch itself was aborted

use std::path::PathBuf;
use thiserror::Error;

/// Error type returned by a progress callback
pub type ProgressError = Box<dyn std::error::Error + Send + Sync>;

/// Errors related to reading and parsing the manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest text is not valid JSON
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Registry answered with a non-success status
    #[error("{registry} returned HTTP {status} for '{package}'")]
    HttpStatus {
        package: String,
        registry: String,
        status: u16,
    },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Registry base URL could not be parsed
    #[error("invalid registry URL '{value}': {message}")]
    InvalidRegistryUrl { value: String, message: String },

    /// Request timeout must be positive
    #[error("invalid timeout '{value}': expected a positive duration like '8000', '500ms' or '8s'")]
    InvalidTimeout { value: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

/// Errors that abort an analysis run
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The progress callback reported a failure
    #[error("analysis aborted after {completed}/{total} dependencies: progress failed: {source}")]
    ProgressAborted {
        completed: usize,
        total: usize,
        #[source]
        source: ProgressError,
    },
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the manifest path this error refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            ManifestError::NotFound { path }
            | ManifestError::ReadError { path, .. }
            | ManifestError::JsonParseError { path, .. } => path,
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new HttpStatus error
    pub fn http_status(
        package: impl Into<String>,
        registry: impl Into<String>,
        status: u16,
    ) -> Self {
        RegistryError::HttpStatus {
            package: package.into(),
            registry: registry.into(),
            status,
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Returns the package this error refers to
    pub fn package(&self) -> &str {
        match self {
            RegistryError::PackageNotFound { package, .. }
            | RegistryError::NetworkError { package, .. }
            | RegistryError::HttpStatus { package, .. }
            | RegistryError::InvalidResponse { package, .. }
            | RegistryError::Timeout { package, .. } => package,
        }
    }
}
