//! Dimension declarations.

use serde::{Deserialize, Serialize};

/// A named axis with either a fixed size or unlimited (growable) size.
///
/// Absence of a size denotes an unlimited dimension, matching the netCDF
/// convention for record dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    /// Fixed size, or `None` for an unlimited dimension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Dimension {
    /// Create a fixed-size dimension.
    pub fn fixed(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size: Some(size),
        }
    }

    /// Create an unlimited dimension.
    pub fn unlimited(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
        }
    }

    /// Returns true if this dimension has no fixed size.
    pub fn is_unlimited(&self) -> bool {
        self.size.is_none()
    }
}
