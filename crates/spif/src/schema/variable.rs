//! Variable declarations.

use serde::{Deserialize, Serialize};

use super::attributes::VariableAttributes;

/// Metadata identifying a variable and its wire datatype.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableMeta {
    /// Wire datatype of the data, e.g. `"<uint8>"`.
    pub datatype: String,
    pub name: String,
    /// Whether the variable must be present in data files.
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

/// A variable declaration within a dataset or group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub meta: VariableMeta,
    /// Dimension-name references. Each must resolve to a sibling or
    /// ancestor dimension.
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub attributes: VariableAttributes,
}

impl Variable {
    /// The units attribute, if set.
    pub fn units(&self) -> Option<&str> {
        self.attributes.units.as_deref()
    }

    /// The standard_name attribute, if set.
    pub fn standard_name(&self) -> Option<&str> {
        self.attributes.standard_name.as_deref()
    }
}
