//! Violation records produced by semantic validation.

use serde::{Deserialize, Serialize};

/// Severity level of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Potential issue that should be reviewed.
    Warning,
    /// Definite standard violation. The definition is rejected.
    Error,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// A single rule violation found during validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Name of the violated rule.
    pub rule: String,
    /// Path of the group (or `/` for the dataset root) the violation was
    /// found in.
    pub path: String,
    pub severity: Severity,
    /// Human-readable explanation.
    pub message: String,
}

impl Violation {
    /// Create an error-severity violation.
    pub fn new(rule: impl Into<String>, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            path: path.into(),
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Create a warning-severity violation.
    pub fn warning(
        rule: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::new(rule, path, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
    }

    #[test]
    fn test_violation_constructors() {
        let v = Violation::new("variable_exists", "/cip/core", "missing 'image'");
        assert_eq!(v.severity, Severity::Error);

        let w = Violation::warning("instrument_groups_listed", "/", "not listed");
        assert_eq!(w.severity, Severity::Warning);
        assert_eq!(w.rule, "instrument_groups_listed");
    }
}
