//! Composite engine that walks a dataset tree and runs every matching rule.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::{Dataset, Group, GroupKind};

use super::rules::{check_dimension_refs, registry, GroupContext, Rule};
use super::violation::Violation;

static CONVENTIONS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bSPIF-\d+\.\d+\b").unwrap());

/// Runs the full rule registry over a dataset.
///
/// Violations are collected across all rules and all groups; the walk
/// never stops at the first failure.
pub struct ValidationEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl ValidationEngine {
    /// Create an engine with the full SPIF rule registry.
    pub fn new() -> Self {
        Self { rules: registry() }
    }

    /// Validate a dataset, returning every violation found, errors first.
    pub fn validate(&self, dataset: &Dataset) -> Vec<Violation> {
        let mut violations = Vec::new();

        self.check_root(dataset, &mut violations);

        let root_dims: Vec<String> = dataset.dimensions.iter().map(|d| d.name.clone()).collect();
        for group in &dataset.groups {
            self.walk(group, "", &root_dims, &mut violations);
        }

        violations.sort_by(|a, b| b.severity.cmp(&a.severity));
        violations
    }

    /// Dataset-level checks that have no group to dispatch on.
    fn check_root(&self, dataset: &Dataset, violations: &mut Vec<Violation>) {
        if !CONVENTIONS_RE.is_match(&dataset.attributes.conventions) {
            violations.push(Violation::new(
                "conventions_declared",
                "/",
                format!(
                    "Global 'Conventions' attribute must include a SPIF version \
                     token, got '{}'",
                    dataset.attributes.conventions
                ),
            ));
        }

        let instrument_groups: Vec<&Group> = dataset
            .groups
            .iter()
            .filter(|g| g.kind() == GroupKind::Instrument)
            .collect();

        if instrument_groups.is_empty() {
            violations.push(Violation::new(
                "instrument_group_exists",
                "/",
                "Dataset must contain at least one instrument group",
            ));
        }

        for group in &dataset.groups {
            if group.kind() != GroupKind::Instrument {
                violations.push(Violation::new(
                    "root_groups_are_instruments",
                    "/",
                    format!(
                        "Root group '{}' has group_type '{}'; root groups must \
                         be instrument groups",
                        group.meta.name,
                        group.kind().label()
                    ),
                ));
            }
        }

        // The listing attribute is advisory, so a mismatch is only a warning.
        if let Some(listing) = &dataset.attributes.instrument_groups {
            let listed: Vec<&str> = listing
                .split([' ', ','])
                .filter(|s| !s.is_empty())
                .collect();
            for group in &instrument_groups {
                if !listed.contains(&group.meta.name.as_str()) {
                    violations.push(Violation::warning(
                        "instrument_groups_listed",
                        "/",
                        format!(
                            "Instrument group '{}' is not listed in the global \
                             'instrument_groups' attribute",
                            group.meta.name
                        ),
                    ));
                }
            }
        }

        let resolves = |name: &str| dataset.dimensions.iter().any(|d| d.name == name);
        violations.extend(check_dimension_refs(
            "dimensions_resolve",
            &dataset.variables,
            "/",
            resolves,
        ));
    }

    fn walk(
        &self,
        group: &Group,
        parent_path: &str,
        ancestor_dims: &[String],
        violations: &mut Vec<Violation>,
    ) {
        let path = format!("{parent_path}/{}", group.meta.name);
        let kind = group.kind();

        let ctx = GroupContext {
            path: &path,
            ancestor_dims,
        };
        for rule in &self.rules {
            if rule.kinds().contains(&kind) {
                violations.extend(rule.check(group, &ctx));
            }
        }

        let mut visible = ancestor_dims.to_vec();
        visible.extend(group.dimensions.iter().map(|d| d.name.clone()));
        for child in &group.groups {
            self.walk(child, &path, &visible, violations);
        }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}
