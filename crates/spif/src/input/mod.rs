//! Definition-file loading.

mod loader;

pub use loader::{load_definition, DefinitionFormat, DefinitionSource};
