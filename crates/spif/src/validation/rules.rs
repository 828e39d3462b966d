//! The semantic rule registry.
//!
//! Each rule is an independent, pure check over one group. Rules declare
//! the group kinds they apply to; the engine skips non-matching groups.
//! Rules report every violation they find rather than stopping at the
//! first one.

use crate::schema::types::{FLOATS, INT8, INTS, UINT64, UINT8, UINTS};
use crate::schema::{Dimension, Group, GroupKind, Variable};

use super::units::{TimeUnits, TimeUnitsError};
use super::violation::Violation;

const CORE: &[GroupKind] = &[GroupKind::Core];
const INSTRUMENT: &[GroupKind] = &[GroupKind::Instrument];
const ALL_KINDS: &[GroupKind] = &[
    GroupKind::Core,
    GroupKind::Instrument,
    GroupKind::Platform,
    GroupKind::Generic,
];

/// Where a group sits in the tree, and which dimension names are visible
/// from ancestor scopes.
pub struct GroupContext<'a> {
    /// Slash-separated path of the group, e.g. `/cip/core`.
    pub path: &'a str,
    /// Dimension names declared by ancestor groups and the dataset root.
    pub ancestor_dims: &'a [String],
}

/// A named semantic check applied to groups of matching kinds.
pub trait Rule {
    /// Stable rule name, used in violation reports.
    fn name(&self) -> &'static str;

    /// Group kinds this rule applies to.
    fn kinds(&self) -> &'static [GroupKind];

    /// Run the check, returning every violation found.
    fn check(&self, group: &Group, ctx: &GroupContext<'_>) -> Vec<Violation>;
}

/// Build the full rule registry.
///
/// Parameterized instances cover the per-variable and per-dimension
/// requirements of core and instrument groups; the bespoke rules cover
/// unlimited dimensions, time units and the array-dimensions size.
pub fn registry() -> Vec<Box<dyn Rule>> {
    vec![
        // Core group required variables
        Box::new(VariableExists::new(CORE, "image")),
        Box::new(VariableExists::new(CORE, "timestamp")),
        Box::new(VariableExists::new(CORE, "startpixel")),
        Box::new(VariableExists::new(CORE, "width")),
        Box::new(VariableExists::new(CORE, "height")),
        Box::new(VariableExists::new(CORE, "overload")),
        // Core group required dimensions
        Box::new(DimensionExists::new(CORE, "image_num")),
        Box::new(DimensionExists::new(CORE, "pixel")),
        // Core group variable dimensions
        Box::new(VariableHasDimensions::new(CORE, "image", &["pixel"])),
        Box::new(VariableHasDimensions::new(CORE, "timestamp", &["image_num"])),
        Box::new(VariableHasDimensions::new(CORE, "startpixel", &["image_num"])),
        Box::new(VariableHasDimensions::new(CORE, "width", &["image_num"])),
        Box::new(VariableHasDimensions::new(CORE, "height", &["image_num"])),
        // Core group variable datatypes
        Box::new(VariableHasTypes::new(CORE, "image", UINT8)),
        Box::new(VariableHasTypes::new(CORE, "timestamp", UINT64)),
        Box::new(VariableHasTypes::new(CORE, "startpixel", UINTS)),
        Box::new(VariableHasTypes::new(CORE, "width", UINTS)),
        Box::new(VariableHasTypes::new(CORE, "height", UINTS)),
        Box::new(VariableHasTypes::new(CORE, "overload", INT8)),
        // Core group bespoke rules
        Box::new(UnlimitedDimensions::new(CORE, &["image_num", "pixel"])),
        Box::new(TimeUnitsValid),
        Box::new(TimestampStandardName),
        // Instrument group nesting
        Box::new(CoreChildExists),
        // Instrument group required variables
        Box::new(VariableExists::new(INSTRUMENT, "color_value")),
        Box::new(VariableExists::new(INSTRUMENT, "array_size")),
        Box::new(VariableExists::new(INSTRUMENT, "image_size")),
        Box::new(VariableExists::new(INSTRUMENT, "resolution")),
        Box::new(VariableExists::new(INSTRUMENT, "wavelength")),
        Box::new(VariableExists::new(INSTRUMENT, "pathlength")),
        // Instrument group required dimensions
        Box::new(DimensionExists::new(INSTRUMENT, "array_dimensions")),
        Box::new(DimensionExists::new(INSTRUMENT, "pixel_colors")),
        // Instrument group variable dimensions
        Box::new(VariableHasDimensions::new(
            INSTRUMENT,
            "color_value",
            &["pixel_colors"],
        )),
        Box::new(VariableHasDimensions::new(
            INSTRUMENT,
            "array_size",
            &["array_dimensions"],
        )),
        Box::new(VariableHasDimensions::new(
            INSTRUMENT,
            "image_size",
            &["array_dimensions"],
        )),
        Box::new(VariableHasDimensions::new(
            INSTRUMENT,
            "resolution",
            &["array_dimensions"],
        )),
        // Instrument group variable datatypes
        Box::new(VariableHasTypes::new(INSTRUMENT, "color_value", FLOATS)),
        Box::new(VariableHasTypes::new(INSTRUMENT, "array_size", INTS)),
        Box::new(VariableHasTypes::new(INSTRUMENT, "image_size", INTS)),
        Box::new(VariableHasTypes::new(INSTRUMENT, "resolution", FLOATS)),
        Box::new(VariableHasTypes::new(INSTRUMENT, "wavelength", FLOATS)),
        Box::new(VariableHasTypes::new(INSTRUMENT, "pathlength", FLOATS)),
        Box::new(ArrayDimensionsSize),
        // All groups
        Box::new(DimensionsResolve),
    ]
}

/// Requires a named variable to be present in the group.
pub struct VariableExists {
    kinds: &'static [GroupKind],
    name: &'static str,
}

impl VariableExists {
    pub fn new(kinds: &'static [GroupKind], name: &'static str) -> Self {
        Self { kinds, name }
    }
}

impl Rule for VariableExists {
    fn name(&self) -> &'static str {
        "variable_exists"
    }

    fn kinds(&self) -> &'static [GroupKind] {
        self.kinds
    }

    fn check(&self, group: &Group, ctx: &GroupContext<'_>) -> Vec<Violation> {
        if group.variable(self.name).is_some() {
            return Vec::new();
        }
        vec![Violation::new(
            self.name(),
            ctx.path,
            format!(
                "Group '{}' is missing required variable '{}'",
                group.meta.name, self.name
            ),
        )]
    }
}

/// Requires a named dimension to be declared in the group.
pub struct DimensionExists {
    kinds: &'static [GroupKind],
    name: &'static str,
}

impl DimensionExists {
    pub fn new(kinds: &'static [GroupKind], name: &'static str) -> Self {
        Self { kinds, name }
    }
}

impl Rule for DimensionExists {
    fn name(&self) -> &'static str {
        "dimension_exists"
    }

    fn kinds(&self) -> &'static [GroupKind] {
        self.kinds
    }

    fn check(&self, group: &Group, ctx: &GroupContext<'_>) -> Vec<Violation> {
        if group.dimension(self.name).is_some() {
            return Vec::new();
        }
        vec![Violation::new(
            self.name(),
            ctx.path,
            format!(
                "Group '{}' is missing required dimension '{}'",
                group.meta.name, self.name
            ),
        )]
    }
}

/// Requires a variable's declared dimension references to equal a fixed
/// ordered list. A no-op when the variable is absent; `variable_exists`
/// reports that case.
pub struct VariableHasDimensions {
    kinds: &'static [GroupKind],
    name: &'static str,
    dimensions: &'static [&'static str],
}

impl VariableHasDimensions {
    pub fn new(
        kinds: &'static [GroupKind],
        name: &'static str,
        dimensions: &'static [&'static str],
    ) -> Self {
        Self {
            kinds,
            name,
            dimensions,
        }
    }
}

impl Rule for VariableHasDimensions {
    fn name(&self) -> &'static str {
        "variable_has_dimensions"
    }

    fn kinds(&self) -> &'static [GroupKind] {
        self.kinds
    }

    fn check(&self, group: &Group, ctx: &GroupContext<'_>) -> Vec<Violation> {
        let Some(var) = group.variable(self.name) else {
            return Vec::new();
        };
        if var.dimensions.iter().map(String::as_str).eq(self.dimensions.iter().copied()) {
            return Vec::new();
        }
        vec![Violation::new(
            self.name(),
            ctx.path,
            format!(
                "Variable '{}' in group '{}' must have dimensions {:?}, got {:?}",
                self.name, group.meta.name, self.dimensions, var.dimensions
            ),
        )]
    }
}

/// Requires a variable's datatype to belong to a datatype class.
pub struct VariableHasTypes {
    kinds: &'static [GroupKind],
    name: &'static str,
    types: &'static [&'static str],
}

impl VariableHasTypes {
    pub fn new(
        kinds: &'static [GroupKind],
        name: &'static str,
        types: &'static [&'static str],
    ) -> Self {
        Self { kinds, name, types }
    }
}

impl Rule for VariableHasTypes {
    fn name(&self) -> &'static str {
        "variable_has_types"
    }

    fn kinds(&self) -> &'static [GroupKind] {
        self.kinds
    }

    fn check(&self, group: &Group, ctx: &GroupContext<'_>) -> Vec<Violation> {
        let Some(var) = group.variable(self.name) else {
            return Vec::new();
        };
        if self.types.contains(&var.meta.datatype.as_str()) {
            return Vec::new();
        }
        vec![Violation::new(
            self.name(),
            ctx.path,
            format!(
                "Variable '{}' in group '{}' must be one of {:?}, got '{}'",
                self.name, group.meta.name, self.types, var.meta.datatype
            ),
        )]
    }
}

/// Requires the named dimensions, when declared, to be unlimited.
pub struct UnlimitedDimensions {
    kinds: &'static [GroupKind],
    names: &'static [&'static str],
}

impl UnlimitedDimensions {
    pub fn new(kinds: &'static [GroupKind], names: &'static [&'static str]) -> Self {
        Self { kinds, names }
    }
}

impl Rule for UnlimitedDimensions {
    fn name(&self) -> &'static str {
        "unlimited_dimension"
    }

    fn kinds(&self) -> &'static [GroupKind] {
        self.kinds
    }

    fn check(&self, group: &Group, ctx: &GroupContext<'_>) -> Vec<Violation> {
        group
            .dimensions
            .iter()
            .filter(|dim| self.names.contains(&dim.name.as_str()) && !dim.is_unlimited())
            .map(|dim| {
                Violation::new(
                    self.name(),
                    ctx.path,
                    format!(
                        "{} - the '{}' dimension must be unlimited size",
                        group.meta.name, dim.name
                    ),
                )
            })
            .collect()
    }
}

/// Requires the `timestamp` variable's units to parse as a time-since-epoch
/// expression.
pub struct TimeUnitsValid;

impl Rule for TimeUnitsValid {
    fn name(&self) -> &'static str {
        "time_units_valid"
    }

    fn kinds(&self) -> &'static [GroupKind] {
        CORE
    }

    fn check(&self, group: &Group, ctx: &GroupContext<'_>) -> Vec<Violation> {
        let Some(var) = group.variable("timestamp") else {
            return Vec::new();
        };

        let Some(units) = var.units() else {
            return vec![Violation::new(
                self.name(),
                ctx.path,
                "'timestamp' variable must have a units attribute",
            )];
        };

        match TimeUnits::parse(units) {
            Ok(_) => Vec::new(),
            Err(TimeUnitsError::NotTimeEquivalent) => vec![Violation::new(
                self.name(),
                ctx.path,
                format!(
                    "'timestamp' variable units must be equivalent to \
                     'seconds since 1970-01-01 00:00:00' (got '{units}')"
                ),
            )],
            Err(err) => vec![Violation::new(
                self.name(),
                ctx.path,
                format!("'timestamp' variable units not valid (got '{units}'): {err}"),
            )],
        }
    }
}

/// Requires the `timestamp` variable's standard_name to be `time`.
pub struct TimestampStandardName;

impl Rule for TimestampStandardName {
    fn name(&self) -> &'static str {
        "timestamp_standard_name"
    }

    fn kinds(&self) -> &'static [GroupKind] {
        CORE
    }

    fn check(&self, group: &Group, ctx: &GroupContext<'_>) -> Vec<Violation> {
        let Some(var) = group.variable("timestamp") else {
            return Vec::new();
        };

        match var.standard_name() {
            None => vec![Violation::new(
                self.name(),
                ctx.path,
                "'timestamp' variable must have a standard_name attribute",
            )],
            Some("time") => Vec::new(),
            Some(other) => vec![Violation::new(
                self.name(),
                ctx.path,
                format!("'timestamp' variable standard_name must be 'time', got '{other}'"),
            )],
        }
    }
}

/// Requires an instrument group to contain a child group named `core`.
///
/// Duplicate `core` children are not checked; the standard leaves that
/// case open.
pub struct CoreChildExists;

impl Rule for CoreChildExists {
    fn name(&self) -> &'static str {
        "core_child_exists"
    }

    fn kinds(&self) -> &'static [GroupKind] {
        INSTRUMENT
    }

    fn check(&self, group: &Group, ctx: &GroupContext<'_>) -> Vec<Violation> {
        if group.child("core").is_some() {
            return Vec::new();
        }
        vec![Violation::new(
            self.name(),
            ctx.path,
            format!(
                "Instrument group '{}' must contain a 'core' group",
                group.meta.name
            ),
        )]
    }
}

/// Requires the `array_dimensions` dimension to have size 1 or 2.
pub struct ArrayDimensionsSize;

impl Rule for ArrayDimensionsSize {
    fn name(&self) -> &'static str {
        "array_dimensions_size"
    }

    fn kinds(&self) -> &'static [GroupKind] {
        INSTRUMENT
    }

    fn check(&self, group: &Group, ctx: &GroupContext<'_>) -> Vec<Violation> {
        let fail = |got: &str| {
            vec![Violation::new(
                self.name(),
                ctx.path,
                format!(
                    "The 'array_dimensions' dimension in group '{}' must have \
                     a size of 1 or 2, got {got}",
                    group.meta.name
                ),
            )]
        };

        match group.dimension("array_dimensions") {
            None => fail("no dimension"),
            Some(Dimension { size: None, .. }) => fail("unlimited"),
            Some(Dimension { size: Some(n), .. }) if ![1, 2].contains(n) => {
                fail(&n.to_string())
            }
            Some(_) => Vec::new(),
        }
    }
}

/// Requires every variable dimension reference to resolve to a sibling or
/// ancestor dimension.
pub struct DimensionsResolve;

impl Rule for DimensionsResolve {
    fn name(&self) -> &'static str {
        "dimensions_resolve"
    }

    fn kinds(&self) -> &'static [GroupKind] {
        ALL_KINDS
    }

    fn check(&self, group: &Group, ctx: &GroupContext<'_>) -> Vec<Violation> {
        let resolves = |name: &str| {
            group.dimensions.iter().any(|d| d.name == name)
                || ctx.ancestor_dims.iter().any(|d| d == name)
        };
        check_dimension_refs(self.name(), &group.variables, ctx.path, resolves)
    }
}

/// Shared reference check, also used by the engine for top-level dataset
/// variables.
pub(super) fn check_dimension_refs(
    rule: &'static str,
    variables: &[Variable],
    path: &str,
    resolves: impl Fn(&str) -> bool,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for var in variables {
        for dim in &var.dimensions {
            if !resolves(dim) {
                violations.push(Violation::new(
                    rule,
                    path,
                    format!(
                        "Variable '{}' references dimension '{}', which is not \
                         declared in this group or an ancestor",
                        var.meta.name, dim
                    ),
                ));
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::units::EPOCH_UNITS;

    fn make_variable(name: &str, datatype: &str, dims: &[&str]) -> Variable {
        serde_json::from_value(serde_json::json!({
            "meta": {"datatype": datatype, "name": name},
            "dimensions": dims,
        }))
        .unwrap()
    }

    fn make_core_group() -> Group {
        serde_json::from_value(serde_json::json!({
            "meta": {"name": "core"},
            "attributes": {"group_type": "core"},
            "dimensions": [
                {"name": "image_num"},
                {"name": "pixel"}
            ],
            "variables": [
                {
                    "meta": {"datatype": "<uint8>", "name": "image"},
                    "dimensions": ["pixel"]
                },
                {
                    "meta": {"datatype": "<uint64>", "name": "timestamp"},
                    "dimensions": ["image_num"],
                    "attributes": {"units": EPOCH_UNITS, "standard_name": "time"}
                },
                {
                    "meta": {"datatype": "<uint32>", "name": "startpixel"},
                    "dimensions": ["image_num"]
                },
                {
                    "meta": {"datatype": "<uint8>", "name": "width"},
                    "dimensions": ["image_num"]
                },
                {
                    "meta": {"datatype": "<uint8>", "name": "height"},
                    "dimensions": ["image_num"]
                },
                {
                    "meta": {"datatype": "<byte>", "name": "overload"},
                    "dimensions": ["image_num"]
                }
            ]
        }))
        .unwrap()
    }

    fn ctx() -> GroupContext<'static> {
        GroupContext {
            path: "/cip/core",
            ancestor_dims: &[],
        }
    }

    fn run_core_rules(group: &Group) -> Vec<Violation> {
        registry()
            .iter()
            .filter(|rule| rule.kinds().contains(&GroupKind::Core))
            .flat_map(|rule| rule.check(group, &ctx()))
            .collect()
    }

    #[test]
    fn test_valid_core_group_passes_all_rules() {
        let violations = run_core_rules(&make_core_group());
        assert!(violations.is_empty(), "unexpected: {violations:?}");
    }

    #[test]
    fn test_missing_required_variable_reported_by_name() {
        for name in ["image", "timestamp", "startpixel", "width", "height", "overload"] {
            let mut group = make_core_group();
            group.variables.retain(|v| v.meta.name != name);

            let violations = run_core_rules(&group);
            assert!(
                violations
                    .iter()
                    .any(|v| v.rule == "variable_exists" && v.message.contains(name)),
                "no variable_exists violation for '{name}'"
            );
        }
    }

    #[test]
    fn test_fixed_size_record_dimension_rejected() {
        let mut group = make_core_group();
        group.dimensions[0].size = Some(100);

        let violations = run_core_rules(&group);
        assert!(
            violations
                .iter()
                .any(|v| v.rule == "unlimited_dimension" && v.message.contains("image_num"))
        );
    }

    #[test]
    fn test_wrong_variable_dimensions_rejected() {
        let mut group = make_core_group();
        group.variables[0].dimensions = vec!["image_num".to_string()];

        let violations = run_core_rules(&group);
        assert!(violations.iter().any(|v| v.rule == "variable_has_dimensions"));
    }

    #[test]
    fn test_wrong_datatype_rejected() {
        let mut group = make_core_group();
        group.variables[0].meta.datatype = "<float32>".to_string();

        let violations = run_core_rules(&group);
        assert!(violations.iter().any(|v| v.rule == "variable_has_types"));
    }

    #[test]
    fn test_timestamp_units_meters_rejected() {
        let mut group = make_core_group();
        group.variables[1].attributes.units = Some("meters".to_string());

        let violations = run_core_rules(&group);
        assert!(
            violations
                .iter()
                .any(|v| v.rule == "time_units_valid" && v.message.contains("equivalent"))
        );
    }

    #[test]
    fn test_timestamp_units_hours_since_accepted() {
        let mut group = make_core_group();
        group.variables[1].attributes.units = Some("hours since 2000-01-01".to_string());

        let violations = run_core_rules(&group);
        assert!(violations.is_empty(), "unexpected: {violations:?}");
    }

    #[test]
    fn test_timestamp_missing_units_rejected() {
        let mut group = make_core_group();
        group.variables[1].attributes.units = None;

        let violations = run_core_rules(&group);
        assert!(
            violations
                .iter()
                .any(|v| v.rule == "time_units_valid" && v.message.contains("units attribute"))
        );
    }

    #[test]
    fn test_timestamp_wrong_standard_name_rejected() {
        let mut group = make_core_group();
        group.variables[1].attributes.standard_name = Some("timestamp".to_string());

        let violations = run_core_rules(&group);
        assert!(violations.iter().any(|v| v.rule == "timestamp_standard_name"));
    }

    #[test]
    fn test_unresolved_dimension_reference_rejected() {
        let mut group = make_core_group();
        group
            .variables
            .push(make_variable("extra", "<float32>", &["nonexistent"]));

        let violations = run_core_rules(&group);
        assert!(
            violations
                .iter()
                .any(|v| v.rule == "dimensions_resolve" && v.message.contains("nonexistent"))
        );
    }

    #[test]
    fn test_ancestor_dimension_reference_resolves() {
        let mut group = make_core_group();
        group
            .variables
            .push(make_variable("extra", "<float32>", &["array_dimensions"]));

        let ancestors = vec!["array_dimensions".to_string()];
        let ctx = GroupContext {
            path: "/cip/core",
            ancestor_dims: &ancestors,
        };
        let violations = DimensionsResolve.check(&group, &ctx);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_core_rules_skip_platform_group() {
        let group: Group = serde_json::from_value(serde_json::json!({
            "meta": {"name": "aircraft"},
            "attributes": {"group_type": "platform"},
            "variables": []
        }))
        .unwrap();

        let violations: Vec<_> = registry()
            .iter()
            .filter(|rule| rule.kinds().contains(&group.kind()))
            .flat_map(|rule| rule.check(&group, &ctx()))
            .collect();
        assert!(violations.is_empty());
    }
}
