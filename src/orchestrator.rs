//! Analysis orchestrator for the dependency report workflow
//!
//! This module provides:
//! - Workflow coordination: fetch → evaluate → aggregate, per declaration
//! - Strictly sequential registry queries in declaration order
//! - Per-dependency failure isolation (a failed fetch becomes a degraded report)
//! - Progress notification after every dependency

use crate::domain::{AnalysisResult, DependencyDeclaration, DependencyReport};
use crate::error::{AnalysisError, ProgressError, RegistryError};
use crate::evaluate::evaluate;
use crate::manifest::ManifestDependencies;
use crate::registry::{
    HttpClient, NpmRegistry, RegistryClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, NPM_REGISTRY_URL,
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration for the orchestrator
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Registry base URL
    pub registry_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// User-Agent sent to the registry
    pub user_agent: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            registry_url: NPM_REGISTRY_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Orchestrator for the analysis workflow
pub struct Orchestrator {
    registry: Box<dyn RegistryClient>,
}

impl Orchestrator {
    /// Create an orchestrator talking to the configured npm registry
    pub fn new(config: &AnalyzerConfig) -> Result<Self, RegistryError> {
        let client = HttpClient::with_config(config.timeout, &config.user_agent)?;
        let registry = NpmRegistry::with_base_url(client, config.registry_url.as_str());
        Ok(Self::with_registry(Box::new(registry)))
    }

    /// Create an orchestrator with a custom registry client (for testing)
    pub fn with_registry(registry: Box<dyn RegistryClient>) -> Self {
        Self { registry }
    }

    /// Analyze every dependency of a parsed manifest
    pub async fn analyze(&self, manifest: &ManifestDependencies) -> AnalysisResult {
        let mut reports = Vec::with_capacity(manifest.len());
        for declaration in manifest.declarations() {
            reports.push(self.check_dependency(&declaration).await);
        }
        self.finish(reports)
    }

    /// Analyze a declaration list, notifying `on_progress` after each item.
    ///
    /// The callback receives `(completed, total)`. If it returns an error the
    /// run stops immediately and no result is produced.
    pub async fn analyze_with_progress<F>(
        &self,
        declarations: &[DependencyDeclaration],
        mut on_progress: F,
    ) -> Result<AnalysisResult, AnalysisError>
    where
        F: FnMut(usize, usize) -> Result<(), ProgressError>,
    {
        let total = declarations.len();
        let mut reports = Vec::with_capacity(total);

        for declaration in declarations {
            reports.push(self.check_dependency(declaration).await);

            let completed = reports.len();
            on_progress(completed, total).map_err(|source| AnalysisError::ProgressAborted {
                completed,
                total,
                source,
            })?;
        }

        Ok(self.finish(reports))
    }

    /// Fetch and evaluate a single dependency; never fails
    async fn check_dependency(&self, declaration: &DependencyDeclaration) -> DependencyReport {
        debug!(dependency = %declaration, "checking dependency");

        match self.registry.fetch_metadata(&declaration.name).await {
            Ok(metadata) => {
                evaluate(&metadata, &declaration.requested_range).into_report(declaration)
            }
            Err(e) => {
                warn!(
                    package = %declaration.name,
                    registry = self.registry.registry_name(),
                    error = %e,
                    "metadata fetch failed"
                );
                DependencyReport::fetch_failed(declaration, e.to_string())
            }
        }
    }

    fn finish(&self, reports: Vec<DependencyReport>) -> AnalysisResult {
        let result = AnalysisResult::new(reports);
        let summary = result.summary();
        info!(
            total = summary.total,
            outdated = summary.outdated,
            deprecated = summary.deprecated,
            failed = summary.failed,
            "analysis finished"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyKind, RegistryMetadata, SecurityFlag, FETCH_FAILED_NOTE};
    use crate::manifest::parse_manifest;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// In-memory registry recording every request in order
    #[derive(Default)]
    struct FakeRegistry {
        packages: HashMap<String, Value>,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl FakeRegistry {
        fn with_package(mut self, name: &str, body: Value) -> Self {
            self.packages.insert(name.to_string(), body);
            self
        }
    }

    #[async_trait]
    impl RegistryClient for FakeRegistry {
        fn registry_name(&self) -> &'static str {
            "fake"
        }

        async fn fetch_metadata(&self, package: &str) -> Result<RegistryMetadata, RegistryError> {
            self.requests.lock().unwrap().push(package.to_string());
            let body = self
                .packages
                .get(package)
                .cloned()
                .ok_or_else(|| RegistryError::package_not_found(package, "fake"))?;
            RegistryMetadata::from_json(body)
                .map_err(|message| RegistryError::invalid_response(package, "fake", message))
        }
    }

    fn latest(version: &str) -> Value {
        json!({ "dist-tags": { "latest": version }, "versions": { (version): {} } })
    }

    fn orchestrator(registry: FakeRegistry) -> Orchestrator {
        Orchestrator::with_registry(Box::new(registry))
    }

    #[test]
    fn test_analyzer_config_default() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.registry_url, "https://registry.npmjs.org");
        assert_eq!(config.timeout, Duration::from_millis(8000));
        assert!(config.user_agent.starts_with("depscope/"));
    }

    #[test]
    fn test_orchestrator_new() {
        assert!(Orchestrator::new(&AnalyzerConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_left_pad_example() {
        let registry = FakeRegistry::default().with_package("left-pad", latest("1.3.0"));
        let manifest = parse_manifest(r#"{"dependencies":{"left-pad":"^1.0.0"}}"#).unwrap();

        let result = orchestrator(registry).analyze(&manifest).await;

        assert_eq!(result.reports.len(), 1);
        let report = &result.reports[0];
        assert_eq!(report.name, "left-pad");
        assert_eq!(report.requested_range, "^1.0.0");
        assert_eq!(report.latest_version.as_deref(), Some("1.3.0"));
        assert_eq!(report.is_outdated, Some(false));
        assert_eq!(report.security_flag, SecurityFlag::None);
        assert!(report.note.is_none());
    }

    #[tokio::test]
    async fn test_reports_follow_declaration_order() {
        let registry = FakeRegistry::default()
            .with_package("zod", latest("3.22.0"))
            .with_package("axios", latest("1.6.0"))
            .with_package("vitest", latest("1.2.0"));
        let requests = registry.requests.clone();
        let manifest = parse_manifest(
            r#"{
                "devDependencies": { "vitest": "^1.0.0" },
                "dependencies": { "zod": "^3.0.0", "axios": "^1.0.0" }
            }"#,
        )
        .unwrap();

        let result = orchestrator(registry).analyze(&manifest).await;

        let order: Vec<_> = result
            .reports
            .iter()
            .map(|r| (r.name.as_str(), r.kind))
            .collect();
        assert_eq!(
            order,
            vec![
                ("zod", DependencyKind::Runtime),
                ("axios", DependencyKind::Runtime),
                ("vitest", DependencyKind::Development),
            ]
        );
        assert_eq!(*requests.lock().unwrap(), vec!["zod", "axios", "vitest"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_isolated() {
        let registry = FakeRegistry::default()
            .with_package("react", latest("18.2.0"))
            .with_package("vue", latest("3.4.0"));
        let declarations = vec![
            DependencyDeclaration::runtime("react", "^17.0.0"),
            DependencyDeclaration::runtime("ghost-package", "^1.0.0"),
            DependencyDeclaration::runtime("vue", "^3.0.0"),
        ];

        let result = orchestrator(registry)
            .analyze_with_progress(&declarations, |_, _| Ok(()))
            .await
            .unwrap();

        assert_eq!(result.reports.len(), 3);
        assert_eq!(result.reports[0].is_outdated, Some(true));
        assert_eq!(result.reports[2].is_outdated, Some(false));

        let failed = &result.reports[1];
        assert_eq!(failed.name, "ghost-package");
        assert_eq!(failed.security_flag, SecurityFlag::None);
        assert_eq!(failed.note.as_deref(), Some(FETCH_FAILED_NOTE));
        assert!(failed.latest_version.is_none());
        assert!(failed.is_outdated.is_none());
        assert!(failed.repository_url.is_none());
        assert!(failed.fetch_error.as_deref().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_fetch_failure() {
        let registry = FakeRegistry::default().with_package("weird", json!(["1.0.0"]));
        let declarations = vec![DependencyDeclaration::runtime("weird", "^1.0.0")];

        let result = orchestrator(registry)
            .analyze_with_progress(&declarations, |_, _| Ok(()))
            .await
            .unwrap();

        assert_eq!(result.reports[0].note.as_deref(), Some(FETCH_FAILED_NOTE));
    }

    #[tokio::test]
    async fn test_all_fetches_fail() {
        let declarations = vec![
            DependencyDeclaration::runtime("a", "^1.0.0"),
            DependencyDeclaration::development("b", "^1.0.0"),
        ];

        let result = orchestrator(FakeRegistry::default())
            .analyze_with_progress(&declarations, |_, _| Ok(()))
            .await
            .unwrap();

        assert_eq!(result.reports.len(), 2);
        assert!(result.reports.iter().all(|r| r.is_fetch_failure()));
        assert_eq!(result.summary().failed, 2);
    }

    #[tokio::test]
    async fn test_progress_fires_once_per_declaration() {
        let registry = FakeRegistry::default().with_package("a", latest("1.0.0"));
        let declarations = vec![
            DependencyDeclaration::runtime("a", "^1.0.0"),
            DependencyDeclaration::runtime("missing", "^1.0.0"),
            DependencyDeclaration::development("a", "^1.0.0"),
        ];

        let mut seen = Vec::new();
        orchestrator(registry)
            .analyze_with_progress(&declarations, |done, total| {
                seen.push((done, total));
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[tokio::test]
    async fn test_progress_failure_aborts_batch() {
        let registry = FakeRegistry::default()
            .with_package("a", latest("1.0.0"))
            .with_package("b", latest("1.0.0"));
        let requests = registry.requests.clone();
        let declarations = vec![
            DependencyDeclaration::runtime("a", "^1.0.0"),
            DependencyDeclaration::runtime("b", "^1.0.0"),
        ];

        let err = orchestrator(registry)
            .analyze_with_progress(&declarations, |done, _| {
                if done == 1 {
                    Err("display closed".into())
                } else {
                    Ok(())
                }
            })
            .await
            .unwrap_err();

        match err {
            AnalysisError::ProgressAborted { completed, total, .. } => {
                assert_eq!((completed, total), (1, 2));
            }
        }
        assert_eq!(*requests.lock().unwrap(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_empty_manifest() {
        let mut calls = 0;
        let result = orchestrator(FakeRegistry::default())
            .analyze_with_progress(&[], |_, _| {
                calls += 1;
                Ok(())
            })
            .await
            .unwrap();

        assert!(result.is_empty());
        assert_eq!(calls, 0);
    }
}
