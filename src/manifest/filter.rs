//! Declaration filter configuration
//!
//! Narrows the declaration list before analysis. Filtering happens before
//! the orchestrator runs, so every declaration it receives still yields
//! exactly one report.

use crate::domain::DependencyDeclaration;

/// Filter configuration for which declarations get analyzed
#[derive(Debug, Clone, Default)]
pub struct DeclarationFilter {
    /// Skip `devDependencies`
    pub omit_dev: bool,
    /// Packages to exclude
    pub exclude: Vec<String>,
    /// If non-empty, only analyze these packages
    pub only: Vec<String>,
}

impl DeclarationFilter {
    /// Create a new filter that keeps everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether development dependencies are skipped
    pub fn with_omit_dev(mut self, omit_dev: bool) -> Self {
        self.omit_dev = omit_dev;
        self
    }

    /// Set packages to exclude
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Set packages to include (only list)
    pub fn with_only(mut self, only: Vec<String>) -> Self {
        self.only = only;
        self
    }

    /// Check if a package should be analyzed based on name filters
    pub fn should_process_package(&self, name: &str) -> bool {
        // If --only is specified, only process those packages
        if !self.only.is_empty() {
            return self.only.iter().any(|p| p == name);
        }
        !self.exclude.iter().any(|p| p == name)
    }

    /// Check if a declaration should be analyzed
    pub fn matches(&self, declaration: &DependencyDeclaration) -> bool {
        if self.omit_dev && declaration.is_dev() {
            return false;
        }
        self.should_process_package(&declaration.name)
    }

    /// Keep matching declarations, preserving order
    pub fn apply(&self, declarations: Vec<DependencyDeclaration>) -> Vec<DependencyDeclaration> {
        declarations.into_iter().filter(|d| self.matches(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<DependencyDeclaration> {
        vec![
            DependencyDeclaration::runtime("react", "^18.0.0"),
            DependencyDeclaration::runtime("lodash", "^4.17.21"),
            DependencyDeclaration::development("jest", "^29.0.0"),
            DependencyDeclaration::development("lodash", "^4.17.21"),
        ]
    }

    fn names(decls: &[DependencyDeclaration]) -> Vec<String> {
        decls.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_default_keeps_everything() {
        let kept = DeclarationFilter::new().apply(sample());
        assert_eq!(kept, sample());
    }

    #[test]
    fn test_omit_dev() {
        let kept = DeclarationFilter::new().with_omit_dev(true).apply(sample());
        assert_eq!(names(&kept), vec!["react@^18.0.0", "lodash@^4.17.21"]);
    }

    #[test]
    fn test_exclude_applies_to_both_sections() {
        let kept = DeclarationFilter::new()
            .with_exclude(vec!["lodash".to_string()])
            .apply(sample());
        assert_eq!(names(&kept), vec!["react@^18.0.0", "jest@^29.0.0 (dev)"]);
    }

    #[test]
    fn test_only_wins_over_exclude() {
        let filter = DeclarationFilter::new()
            .with_only(vec!["jest".to_string()])
            .with_exclude(vec!["jest".to_string()]);
        assert!(filter.should_process_package("jest"));
        assert!(!filter.should_process_package("react"));
    }

    #[test]
    fn test_only_with_omit_dev() {
        let kept = DeclarationFilter::new()
            .with_only(vec!["jest".to_string()])
            .with_omit_dev(true)
            .apply(sample());
        assert!(kept.is_empty());
    }
}
