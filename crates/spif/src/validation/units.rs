//! CF-style time-units parsing and the derived-units substitution pass.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::schema::{Dataset, Group, Variable};

/// Sentinel units value rewritten before validation runs. Used in
/// definitions where the real epoch reference is only known once data is
/// written.
pub const DERIVED_FROM_FILE: &str = "derived_from_file";

/// Units substituted for the sentinel.
pub const EPOCH_UNITS: &str = "seconds since 1970-01-01T00:00:00Z";

static SINCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z]+)\s+since\s+(.+?)\s*$").unwrap());

/// Why a units string failed the time-units check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeUnitsError {
    /// Not a `<unit> since <reference>` expression.
    #[error("units are not equivalent to a time since a reference epoch")]
    NotTimeEquivalent,

    /// The unit word is not a recognised time unit.
    #[error("'{0}' is not a recognised time unit")]
    UnknownUnit(String),

    /// The reference timestamp could not be parsed.
    #[error("reference timestamp '{0}' is not a valid date or datetime")]
    BadReference(String),
}

/// A parsed time-units expression, e.g. `hours since 2000-01-01`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeUnits {
    /// Scale of one unit in seconds.
    pub seconds_per_unit: f64,
    /// The reference epoch, in UTC.
    pub reference: NaiveDateTime,
}

impl TimeUnits {
    /// Parse a units string. Success implies equivalence to
    /// seconds-since-epoch.
    pub fn parse(units: &str) -> Result<Self, TimeUnitsError> {
        let caps = SINCE_RE
            .captures(units)
            .ok_or(TimeUnitsError::NotTimeEquivalent)?;

        let seconds_per_unit = match caps[1].to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => 1.0,
            "min" | "mins" | "minute" | "minutes" => 60.0,
            "h" | "hr" | "hrs" | "hour" | "hours" => 3600.0,
            "d" | "day" | "days" => 86400.0,
            other => return Err(TimeUnitsError::UnknownUnit(other.to_string())),
        };

        let reference = parse_reference(&caps[2])?;

        Ok(Self {
            seconds_per_unit,
            reference,
        })
    }
}

/// Parse a CF reference timestamp. Accepts RFC 3339 as well as the common
/// space-separated and date-only forms.
fn parse_reference(text: &str) -> Result<NaiveDateTime, TimeUnitsError> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_utc());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }

    Err(TimeUnitsError::BadReference(text.to_string()))
}

/// Rewrite sentinel units throughout a dataset. This is the one mutation
/// in the pipeline and runs before any rule does.
pub fn substitute_derived_units(dataset: &mut Dataset) {
    for var in &mut dataset.variables {
        substitute_variable(var);
    }
    for group in &mut dataset.groups {
        substitute_group(group);
    }
}

fn substitute_group(group: &mut Group) {
    for var in &mut group.variables {
        substitute_variable(var);
    }
    for child in &mut group.groups {
        substitute_group(child);
    }
}

fn substitute_variable(var: &mut Variable) {
    if let Some(units) = &var.attributes.units {
        if units.contains(DERIVED_FROM_FILE) {
            var.attributes.units = Some(EPOCH_UNITS.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_units_parse() {
        let units = TimeUnits::parse(EPOCH_UNITS).unwrap();
        assert_eq!(units.seconds_per_unit, 1.0);
        assert_eq!(
            units.reference,
            NaiveDate::from_ymd_opt(1970, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_hours_since_is_time_equivalent() {
        let units = TimeUnits::parse("hours since 2000-01-01").unwrap();
        assert_eq!(units.seconds_per_unit, 3600.0);
    }

    #[test]
    fn test_space_separated_reference() {
        assert!(TimeUnits::parse("seconds since 1970-01-01 00:00:00").is_ok());
    }

    #[test]
    fn test_meters_not_time_equivalent() {
        assert_eq!(
            TimeUnits::parse("meters"),
            Err(TimeUnitsError::NotTimeEquivalent)
        );
    }

    #[test]
    fn test_unknown_unit_word() {
        assert_eq!(
            TimeUnits::parse("furlongs since 2000-01-01"),
            Err(TimeUnitsError::UnknownUnit("furlongs".to_string()))
        );
    }

    #[test]
    fn test_bad_reference() {
        assert!(matches!(
            TimeUnits::parse("seconds since the dawn of time"),
            Err(TimeUnitsError::BadReference(_))
        ));
    }

    #[test]
    fn test_substitution_rewrites_sentinel() {
        let mut var: Variable = serde_json::from_str(
            r#"{
                "meta": {"datatype": "<uint64>", "name": "timestamp"},
                "dimensions": ["image_num"],
                "attributes": {"units": "derived_from_file", "standard_name": "time"}
            }"#,
        )
        .unwrap();

        substitute_variable(&mut var);
        assert_eq!(var.units(), Some(EPOCH_UNITS));
        assert!(TimeUnits::parse(var.units().unwrap()).is_ok());
    }

    #[test]
    fn test_substitution_leaves_concrete_units_alone() {
        let mut var: Variable = serde_json::from_str(
            r#"{
                "meta": {"datatype": "<uint64>", "name": "timestamp"},
                "dimensions": ["image_num"],
                "attributes": {"units": "hours since 2000-01-01"}
            }"#,
        )
        .unwrap();

        substitute_variable(&mut var);
        assert_eq!(var.units(), Some("hours since 2000-01-01"));
    }
}
