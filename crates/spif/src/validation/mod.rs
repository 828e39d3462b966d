//! Semantic validation of parsed definition documents.
//!
//! Structural parsing happens first (in [`crate::schema`] via serde); the
//! engine here then runs the semantic rule registry over the tree and
//! collects every violation rather than failing fast.

mod engine;
mod rules;
pub mod units;
mod violation;

pub use engine::ValidationEngine;
pub use rules::{GroupContext, Rule};
pub use units::{substitute_derived_units, TimeUnits, TimeUnitsError, DERIVED_FROM_FILE, EPOCH_UNITS};
pub use violation::{Severity, Violation};
