//! Group declarations and the group-kind tag.

use serde::{Deserialize, Serialize};

use super::attributes::GroupAttributes;
use super::dimension::Dimension;
use super::variable::Variable;

/// Group kind, carried by the `group_type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// Raw per-image pixel and timestamp data for one instrument.
    Core,
    /// One imaging instrument, containing exactly one core group.
    Instrument,
    /// Data about the platform the instrument was operated on.
    Platform,
    /// Any other group.
    Generic,
}

impl GroupKind {
    /// Human-readable label, matching the `group_type` wire form.
    pub fn label(&self) -> &'static str {
        match self {
            GroupKind::Core => "core",
            GroupKind::Instrument => "instrument",
            GroupKind::Platform => "platform",
            GroupKind::Generic => "generic",
        }
    }
}

/// Metadata identifying a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMeta {
    pub name: String,
    /// Path of the group within the netCDF file, if different from the
    /// name alone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// A named namespace within a dataset, holding attributes, dimensions,
/// variables and nested groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub meta: GroupMeta,
    pub attributes: GroupAttributes,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Group {
    /// The kind declared by this group's attribute record.
    pub fn kind(&self) -> GroupKind {
        self.attributes.kind()
    }

    /// Look up a variable by name.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.meta.name == name)
    }

    /// Look up a dimension by name.
    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// Look up a child group by name.
    pub fn child(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.meta.name == name)
    }
}
