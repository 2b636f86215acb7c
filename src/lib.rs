//! depscope - npm dependency health report library
//!
//! This library provides the pipeline behind the CLI:
//! - Manifest parsing (package.json)
//! - npm registry metadata fetching
//! - Version evaluation (outdated, deprecated, pre-release, repository link)
//! - Sequential analysis with progress notification

pub mod cli;
pub mod domain;
pub mod error;
pub mod evaluate;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
