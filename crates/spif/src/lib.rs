//! SPIF: a metadata standard for netCDF-encoded imaging-probe data.
//!
//! A SPIF definition file describes one dataset product: its global
//! attributes, instrument groups, the `core` group holding raw image data,
//! and the dimensions and variables each group must carry. This crate
//! parses definition files (JSON or YAML) into a typed document tree and
//! validates them against the standard's rules.
//!
//! Validation collects every violation rather than stopping at the first,
//! so a report names all of the work needed to bring a definition into
//! conformance.
//!
//! # Example
//!
//! ```no_run
//! use spif::Spif;
//!
//! let spif = Spif::new();
//! let result = spif.check_file("products/spif_example.json").unwrap();
//!
//! println!("Groups: {}", result.summary.total_groups);
//! println!("Violations: {}", result.violations.len());
//! ```

pub mod error;
pub mod input;
pub mod schema;
pub mod validation;

mod spif;

pub use crate::spif::{CheckResult, CheckSummary, Spif, SpifConfig, ViolationCounts};
pub use error::{Result, SpifError};
pub use input::{load_definition, DefinitionFormat, DefinitionSource};
pub use schema::{
    Dataset, DatasetMeta, Dimension, GlobalAttributes, Group, GroupAttributes, GroupKind,
    GroupMeta, Variable, VariableAttributes, VariableMeta,
};
pub use validation::{Severity, ValidationEngine, Violation};
