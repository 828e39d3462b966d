//! Dataset root model.

use serde::{Deserialize, Serialize};

use super::attributes::GlobalAttributes;
use super::dimension::Dimension;
use super::group::Group;
use super::variable::Variable;

/// Metadata describing the dataset product itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMeta {
    /// Canonical filename pattern for this dataset.
    pub file_pattern: String,

    /// Unique short name for this dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,

    /// Description of this dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// References for this dataset, as (name, URL) pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<(String, String)>>,
}

/// Root container of a SPIF definition document.
///
/// Groups at this level must be instrument groups; platform and generic
/// groups nest inside them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub meta: DatasetMeta,
    pub attributes: GlobalAttributes,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl Dataset {
    /// Look up a top-level group by name.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.meta.name == name)
    }

    /// Total number of groups in the tree.
    pub fn group_count(&self) -> usize {
        fn count(groups: &[Group]) -> usize {
            groups.iter().map(|g| 1 + count(&g.groups)).sum()
        }
        count(&self.groups)
    }

    /// Total number of variables in the tree, including top-level ones.
    pub fn variable_count(&self) -> usize {
        fn count(groups: &[Group]) -> usize {
            groups
                .iter()
                .map(|g| g.variables.len() + count(&g.groups))
                .sum()
        }
        self.variables.len() + count(&self.groups)
    }
}
