//! Attribute records attached at the dataset, group and variable levels.
//!
//! Each record has a fixed subset of named fields; extra keys are allowed
//! and passed through verbatim, preserving declaration order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::group::GroupKind;

/// Attributes attached to the dataset root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalAttributes {
    /// netCDF conventions followed by this file. Must include a
    /// `SPIF-m.n` token, where m.n is the standard version.
    #[serde(rename = "Conventions")]
    pub conventions: String,

    /// Space- or comma-delineated list of instrument group names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_groups: Option<String>,

    /// Open metadata passed through verbatim.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Kind-specific group attributes, tagged by the `group_type` key.
///
/// The tag doubles as the group kind: there is no separate kind field to
/// keep in sync with the attribute record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "group_type", rename_all = "snake_case")]
pub enum GroupAttributes {
    Core(CoreAttributes),
    Instrument(InstrumentAttributes),
    Platform(PlatformAttributes),
    Generic(GenericAttributes),
}

impl GroupAttributes {
    /// The group kind this attribute record declares.
    pub fn kind(&self) -> GroupKind {
        match self {
            GroupAttributes::Core(_) => GroupKind::Core,
            GroupAttributes::Instrument(_) => GroupKind::Instrument,
            GroupAttributes::Platform(_) => GroupKind::Platform,
            GroupAttributes::Generic(_) => GroupKind::Generic,
        }
    }
}

/// Attributes of a `core` group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreAttributes {
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Attributes of an `instrument` group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentAttributes {
    /// Short name of the instrument. May be the same as the group name.
    pub instrument_name: String,

    /// Full descriptive name of the instrument.
    pub instrument_long_name: String,

    /// Serial number or instrument identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_serial_number: Option<String>,

    /// Instrument firmware version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_firmware: Option<String>,

    /// Name and version of the acquisition software.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_software: Option<String>,

    /// Name of the instrument manufacturer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_manufacturer: Option<String>,

    /// Name of the platform on which the instrument is mounted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Raw filenames used to create this dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_filenames: Option<String>,

    /// Publications or other references for this instrument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Attributes of a `platform` group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformAttributes {
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Attributes of a `generic` group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenericAttributes {
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Attributes attached to a variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableAttributes {
    /// Descriptive name for this variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,

    /// CF standard name for this variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_name: Option<String>,

    /// Units string. May be the `derived_from_file` sentinel at
    /// definition time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,

    /// Fill value for missing data.
    #[serde(
        rename = "_FillValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fill_value: Option<Value>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_attributes_tagged_by_group_type() {
        let attrs: GroupAttributes = serde_json::from_str(
            r#"{
                "group_type": "instrument",
                "instrument_name": "CIP",
                "instrument_long_name": "Cloud Imaging Probe",
                "operator": "FAAM"
            }"#,
        )
        .unwrap();

        assert_eq!(attrs.kind(), GroupKind::Instrument);
        match attrs {
            GroupAttributes::Instrument(inst) => {
                assert_eq!(inst.instrument_name, "CIP");
                assert_eq!(inst.extra["operator"], "FAAM");
            }
            _ => panic!("expected instrument attributes"),
        }
    }

    #[test]
    fn test_unknown_group_type_rejected() {
        let result: Result<GroupAttributes, _> =
            serde_json::from_str(r#"{"group_type": "imager"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_variable_attributes_extra_keys_preserved() {
        let attrs: VariableAttributes = serde_json::from_str(
            r#"{
                "units": "m",
                "coverage_content_type": "image",
                "ancillary_variables": "overload"
            }"#,
        )
        .unwrap();

        assert_eq!(attrs.units.as_deref(), Some("m"));
        let keys: Vec<_> = attrs.extra.keys().cloned().collect();
        assert_eq!(keys, vec!["coverage_content_type", "ancillary_variables"]);
    }
}
