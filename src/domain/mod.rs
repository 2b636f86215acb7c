//! Core domain models for depscope
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency declarations read from the manifest
//! - Package metadata fetched from the registry
//! - Per-dependency reports and the overall analysis result

mod analysis;
mod dependency;
mod metadata;
mod report;

pub use analysis::{AnalysisResult, AnalysisSummary};
pub use dependency::{DependencyDeclaration, DependencyKind};
pub use metadata::{
    DeprecationMarker, RegistryMetadata, RepositoryDescriptor, VersionMetadata, LATEST_TAG,
};
pub use report::{DependencyReport, SecurityFlag, FETCH_FAILED_NOTE};
