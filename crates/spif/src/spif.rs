//! Main Spif struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{load_definition, DefinitionSource};
use crate::schema::Dataset;
use crate::validation::{substitute_derived_units, Severity, ValidationEngine, Violation};

/// Configuration for definition checking.
#[derive(Debug, Clone)]
pub struct SpifConfig {
    /// Whether to rewrite `derived_from_file` units before validation.
    pub substitute_units: bool,
}

impl Default for SpifConfig {
    fn default() -> Self {
        Self {
            substitute_units: true,
        }
    }
}

/// Counts of violations by severity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViolationCounts {
    pub error: usize,
    pub warning: usize,
}

/// Summary of a definition check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSummary {
    /// Total number of groups in the definition.
    pub total_groups: usize,
    /// Total number of variables, including top-level ones.
    pub total_variables: usize,
    pub violations_by_severity: ViolationCounts,
    /// True when no error-severity violations were found.
    pub is_valid: bool,
}

/// Result of checking a definition document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Metadata about the source file, when loaded from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<DefinitionSource>,
    /// The document, after any units substitution.
    pub dataset: Dataset,
    /// Every violation found, errors first.
    pub violations: Vec<Violation>,
    pub summary: CheckSummary,
}

impl CheckResult {
    /// True when the definition carries no error-severity violations.
    pub fn is_valid(&self) -> bool {
        self.summary.is_valid
    }

    /// Render the full report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The main SPIF definition checker.
///
/// Performs load, units substitution and semantic validation in one call:
///
/// ```no_run
/// use spif::Spif;
///
/// let spif = Spif::new();
/// let result = spif.check_file("products/spif_example.json").unwrap();
///
/// for violation in &result.violations {
///     println!("{}: {}", violation.path, violation.message);
/// }
/// assert!(result.is_valid());
/// ```
pub struct Spif {
    config: SpifConfig,
    engine: ValidationEngine,
}

impl Spif {
    /// Create a checker with default configuration.
    pub fn new() -> Self {
        Self::with_config(SpifConfig::default())
    }

    /// Create a checker with custom configuration.
    pub fn with_config(config: SpifConfig) -> Self {
        Self {
            config,
            engine: ValidationEngine::new(),
        }
    }

    /// Load and check a definition file.
    pub fn check_file(&self, path: impl AsRef<Path>) -> Result<CheckResult> {
        let (dataset, source) = load_definition(path)?;
        let mut result = self.check_dataset(dataset);
        result.source = Some(source);
        Ok(result)
    }

    /// Check an in-memory dataset document.
    pub fn check_dataset(&self, mut dataset: Dataset) -> CheckResult {
        if self.config.substitute_units {
            substitute_derived_units(&mut dataset);
        }

        let violations = self.engine.validate(&dataset);

        let counts = ViolationCounts {
            error: violations
                .iter()
                .filter(|v| v.severity == Severity::Error)
                .count(),
            warning: violations
                .iter()
                .filter(|v| v.severity == Severity::Warning)
                .count(),
        };

        let summary = CheckSummary {
            total_groups: dataset.group_count(),
            total_variables: dataset.variable_count(),
            is_valid: counts.error == 0,
            violations_by_severity: counts,
        };

        CheckResult {
            source: None,
            dataset,
            violations,
            summary,
        }
    }
}

impl Default for Spif {
    fn default() -> Self {
        Self::new()
    }
}
