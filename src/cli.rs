//! CLI argument parsing module for depscope

use crate::error::ConfigError;
use crate::manifest::DeclarationFilter;
use crate::orchestrator::AnalyzerConfig;
use crate::registry::{DEFAULT_USER_AGENT, NPM_REGISTRY_URL};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Parse a timeout: bare milliseconds (`8000`), `Nms`, or `Ns`
fn parse_timeout(s: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidTimeout {
        value: s.to_string(),
    };
    let trimmed = s.trim();

    let (num_str, unit_ms) = if let Some(n) = trimmed.strip_suffix("ms") {
        (n, 1)
    } else if let Some(n) = trimmed.strip_suffix('s') {
        (n, 1000)
    } else {
        (trimmed, 1)
    };

    let num: u64 = num_str.parse().map_err(|_| invalid())?;
    let millis = num.checked_mul(unit_ms).ok_or_else(invalid)?;
    if millis == 0 {
        return Err(invalid());
    }

    Ok(Duration::from_millis(millis))
}

/// Dependency health report for package.json manifests
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depscope",
    version,
    about = "Report outdated, deprecated and pre-release npm dependencies"
)]
pub struct CliArgs {
    /// package.json file or directory containing one
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Show notes, repository links and fetch errors
    #[arg(long)]
    pub verbose: bool,

    /// Only show dependencies that need attention
    #[arg(short, long)]
    pub quiet: bool,

    // Registry options
    /// Registry base URL
    #[arg(long, default_value = NPM_REGISTRY_URL)]
    pub registry: String,

    /// Per-request timeout (e.g. 8000, 500ms, 8s)
    #[arg(long, default_value = "8000", value_parser = parse_timeout)]
    pub timeout: Duration,

    // Package filters
    /// Skip devDependencies
    #[arg(long)]
    pub omit_dev: bool,

    /// Analyze only specific packages (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub only: Vec<String>,

    /// Exclude specific packages (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Exit with status 1 when anything is outdated or deprecated
    #[arg(long)]
    pub strict: bool,
}

impl CliArgs {
    /// Reject option combinations that cannot be honored
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quiet && self.verbose {
            return Err(ConfigError::ConflictingOptions {
                message: "--quiet and --verbose cannot be used together".to_string(),
            });
        }
        Ok(())
    }

    /// Build the analyzer configuration, validating the registry URL
    pub fn analyzer_config(&self) -> Result<AnalyzerConfig, ConfigError> {
        let url =
            reqwest::Url::parse(&self.registry).map_err(|e| ConfigError::InvalidRegistryUrl {
                value: self.registry.clone(),
                message: e.to_string(),
            })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidRegistryUrl {
                value: self.registry.clone(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(AnalyzerConfig {
            registry_url: self.registry.clone(),
            timeout: self.timeout,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Build the declaration filter from package options
    pub fn declaration_filter(&self) -> DeclarationFilter {
        DeclarationFilter::new()
            .with_omit_dev(self.omit_dev)
            .with_only(self.only.clone())
            .with_exclude(self.exclude.clone())
    }

    /// Whether to draw a progress bar
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["depscope"]);
        assert_eq!(args.path, PathBuf::from("."));
        assert!(!args.json);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert_eq!(args.registry, "https://registry.npmjs.org");
        assert_eq!(args.timeout, Duration::from_millis(8000));
        assert!(!args.omit_dev);
        assert!(args.only.is_empty());
        assert!(args.exclude.is_empty());
        assert!(!args.strict);
    }

    #[test]
    fn test_path_argument() {
        let args = CliArgs::parse_from(["depscope", "/some/project/package.json"]);
        assert_eq!(args.path, PathBuf::from("/some/project/package.json"));
    }

    #[test]
    fn test_quiet_flags() {
        assert!(CliArgs::parse_from(["depscope", "-q"]).quiet);
        assert!(CliArgs::parse_from(["depscope", "--quiet"]).quiet);
    }

    #[test]
    fn test_timeout_formats() {
        let args = CliArgs::parse_from(["depscope", "--timeout", "500ms"]);
        assert_eq!(args.timeout, Duration::from_millis(500));

        let args = CliArgs::parse_from(["depscope", "--timeout", "3s"]);
        assert_eq!(args.timeout, Duration::from_secs(3));

        let args = CliArgs::parse_from(["depscope", "--timeout", "1200"]);
        assert_eq!(args.timeout, Duration::from_millis(1200));
    }

    #[test]
    fn test_parse_timeout_invalid() {
        assert!(parse_timeout("").is_err());
        assert!(parse_timeout("abc").is_err());
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("10m").is_err());
        assert!(CliArgs::try_parse_from(["depscope", "--timeout", "-5"]).is_err());
        assert!(matches!(
            parse_timeout("0ms"),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(CliArgs::try_parse_from(["depscope", "--timeout", "0s"]).is_err());
    }

    #[test]
    fn test_parse_timeout_overflow() {
        assert!(matches!(
            parse_timeout("18446744073709552s"),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(
            CliArgs::try_parse_from(["depscope", "--timeout", "18446744073709552s"]).is_err()
        );
        assert_eq!(
            parse_timeout("18446744073709551615ms").unwrap(),
            Duration::from_millis(u64::MAX)
        );
    }

    #[test]
    fn test_only_and_exclude_multiple() {
        let args = CliArgs::parse_from([
            "depscope",
            "--only",
            "react",
            "--only",
            "vue",
            "--exclude",
            "lodash",
        ]);
        assert_eq!(args.only, vec!["react", "vue"]);
        assert_eq!(args.exclude, vec!["lodash"]);
    }

    #[test]
    fn test_validate_conflicting_verbosity() {
        let args = CliArgs::parse_from(["depscope", "--quiet", "--verbose"]);
        assert!(matches!(
            args.validate(),
            Err(ConfigError::ConflictingOptions { .. })
        ));
        assert!(CliArgs::parse_from(["depscope", "--verbose"]).validate().is_ok());
    }

    #[test]
    fn test_analyzer_config_from_args() {
        let args = CliArgs::parse_from([
            "depscope",
            "--registry",
            "http://localhost:4873/",
            "--timeout",
            "2s",
        ]);
        let config = args.analyzer_config().unwrap();
        assert_eq!(config.registry_url, "http://localhost:4873/");
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_analyzer_config_invalid_registry() {
        let args = CliArgs::parse_from(["depscope", "--registry", "not a url"]);
        assert!(matches!(
            args.analyzer_config(),
            Err(ConfigError::InvalidRegistryUrl { .. })
        ));

        let args = CliArgs::parse_from(["depscope", "--registry", "ftp://mirror.example"]);
        assert!(args.analyzer_config().is_err());
    }

    #[test]
    fn test_declaration_filter_from_args() {
        let args = CliArgs::parse_from(["depscope", "--omit-dev", "--exclude", "left-pad"]);
        let filter = args.declaration_filter();
        assert!(filter.omit_dev);
        assert!(!filter.should_process_package("left-pad"));
        assert!(filter.should_process_package("react"));
    }

    #[test]
    fn test_show_progress() {
        assert!(CliArgs::parse_from(["depscope"]).show_progress());
        assert!(!CliArgs::parse_from(["depscope", "--json"]).show_progress());
        assert!(!CliArgs::parse_from(["depscope", "-q"]).show_progress());
    }
}
