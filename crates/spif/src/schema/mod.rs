//! Entity schema for SPIF definition documents.
//!
//! A definition document is a tree: a [`Dataset`] holding instrument
//! [`Group`]s, which hold a `core` group plus optional platform and generic
//! groups, all carrying [`Dimension`]s, [`Variable`]s and attribute records.

mod attributes;
mod dataset;
mod dimension;
mod group;
pub mod types;
mod variable;

pub use attributes::{
    CoreAttributes, GenericAttributes, GlobalAttributes, GroupAttributes, InstrumentAttributes,
    PlatformAttributes, VariableAttributes,
};
pub use dataset::{Dataset, DatasetMeta};
pub use dimension::Dimension;
pub use group::{Group, GroupKind, GroupMeta};
pub use variable::{Variable, VariableMeta};
