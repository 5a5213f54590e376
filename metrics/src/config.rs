//! Engine configuration.
//!
//! Resolution order (highest priority first):
//! 1. CLI flags (applied via [`EngineConfig::apply_cli_overrides`])
//! 2. A TOML file (loaded via [`EngineConfig::load`])
//! 3. Compiled defaults

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, MetricsError};
use crate::registry::MetricName;

/// Default cap on enumerated root-to-leaf paths per metric.
pub const DEFAULT_MAX_PATHS: usize = 1_000_000;

/// Default wall-clock budget for one path enumeration, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Top-level configuration of a metrics run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Metric codes to evaluate; empty means every registered metric.
    pub metrics: Vec<String>,
    /// Worker threads; `0` lets rayon pick the number of CPUs.
    pub threads: usize,
    /// Path enumeration budget.
    pub walk: WalkConfig,
    /// Namespace classification.
    pub namespaces: NamespaceConfig,
}

/// `[walk]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Maximum root-to-leaf paths a single metric may enumerate.
    pub max_paths: usize,
    /// Maximum time a single path enumeration may take.
    pub timeout_ms: u64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_paths: DEFAULT_MAX_PATHS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl WalkConfig {
    /// The timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// `[namespaces]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NamespaceConfig {
    /// Base namespace; overrides the one reported by the graph.
    pub base: Option<String>,
    /// Namespaces treated as built-in vocabulary in addition to RDF, RDFS,
    /// OWL, XSD and XML.
    pub extra_default: Vec<String>,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Replaces `metrics` when non-empty.
    pub metrics: Vec<String>,
    /// Replaces `threads`.
    pub threads: Option<usize>,
    /// Replaces `walk.max_paths`.
    pub max_paths: Option<usize>,
    /// Replaces `walk.timeout_ms`.
    pub timeout_ms: Option<u64>,
    /// Replaces `namespaces.base`.
    pub base: Option<String>,
}

impl EngineConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] if the document is not valid TOML
    /// or does not match the config schema.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Self::parse(toml_str, "<string>")
    }

    /// Reads, parses and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, and parse or
    /// validation errors otherwise.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content, &path.display().to_string())?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    fn parse(content: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Checks value ranges and metric names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationFailed`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.walk.max_paths == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "walk.max_paths".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.walk.timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "walk.timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.namespaces.base.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::ValidationFailed {
                field: "namespaces.base".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if let Some(unknown) = self
            .metrics
            .iter()
            .find(|code| code.parse::<MetricName>().is_err())
        {
            return Err(ConfigError::ValidationFailed {
                field: "metrics".to_string(),
                message: format!("unknown metric `{unknown}`"),
            });
        }
        Ok(())
    }

    /// Applies CLI flags on top of this config.
    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if !cli.metrics.is_empty() {
            self.metrics = cli.metrics.clone();
        }
        if let Some(threads) = cli.threads {
            self.threads = threads;
        }
        if let Some(max_paths) = cli.max_paths {
            self.walk.max_paths = max_paths;
        }
        if let Some(timeout_ms) = cli.timeout_ms {
            self.walk.timeout_ms = timeout_ms;
        }
        if let Some(ref base) = cli.base {
            self.namespaces.base = Some(base.clone());
        }
    }

    /// The configured metric selection, or every metric when none is named.
    ///
    /// Duplicates are dropped; order follows [`MetricName::ALL`].
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::UnknownMetric`] for a code that does not parse.
    pub fn selected_metrics(&self) -> Result<Vec<MetricName>, MetricsError> {
        if self.metrics.is_empty() {
            return Ok(MetricName::ALL.to_vec());
        }
        let mut selected = self
            .metrics
            .iter()
            .map(|code| code.parse::<MetricName>())
            .collect::<Result<Vec<_>, _>>()?;
        selected.sort();
        selected.dedup();
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert!(config.metrics.is_empty());
        assert_eq!(config.threads, 0);
        assert_eq!(config.walk.max_paths, DEFAULT_MAX_PATHS);
        assert_eq!(config.walk.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
        assert_eq!(config.selected_metrics().unwrap().len(), MetricName::ALL.len());
    }

    #[test]
    fn parses_partial_document() {
        let config = EngineConfig::from_toml(
            r#"
metrics = ["tm", "DITOnto", "TM"]
threads = 2

[namespaces]
base = "http://example.org/onto#"
extra_default = ["http://www.w3.org/2004/02/skos/core#"]
"#,
        )
        .unwrap();
        assert_eq!(config.threads, 2);
        assert_eq!(config.walk, WalkConfig::default());
        assert_eq!(config.namespaces.base.as_deref(), Some("http://example.org/onto#"));
        assert_eq!(
            config.selected_metrics().unwrap(),
            vec![MetricName::Dit, MetricName::Tm]
        );
    }

    #[test]
    fn parse_error_names_source() {
        let err = EngineConfig::from_toml("threads = \"many\"").unwrap_err();
        match err {
            ConfigError::ParseError { path, .. } => assert_eq!(path, "<string>"),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.walk.max_paths = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed { ref field, .. }) if field == "walk.max_paths"
        ));

        let mut config = EngineConfig::default();
        config.metrics = vec!["DIT".to_string(), "NOPE".to_string()];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed { ref field, .. }) if field == "metrics"
        ));

        let mut config = EngineConfig::default();
        config.namespaces.base = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn cli_overrides_win() {
        let mut config = EngineConfig::from_toml("threads = 8\n[walk]\nmax_paths = 10").unwrap();
        config.apply_cli_overrides(&CliOverrides {
            metrics: vec!["AG".to_string()],
            threads: Some(1),
            max_paths: None,
            timeout_ms: Some(5),
            base: Some("http://example.org/x#".to_string()),
        });
        assert_eq!(config.threads, 1);
        assert_eq!(config.walk.max_paths, 10);
        assert_eq!(config.walk.timeout_ms, 5);
        assert_eq!(config.metrics, vec!["AG".to_string()]);
        assert_eq!(config.namespaces.base.as_deref(), Some("http://example.org/x#"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[walk]\ntimeout_ms = 250").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.walk.timeout_ms, 250);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            EngineConfig::load(&missing),
            Err(ConfigError::Io { .. })
        ));
    }
}
